//! CVP CLI - Command line tool for refreshing the case panel's fixtures.

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "cvp-cli",
    version,
    about = "COVID-19 case panel data toolkit"
)]
struct Cli {
    #[command(subcommand)]
    command: cvp_cmd::Command,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    cvp_cmd::run(cli.command).await
}
