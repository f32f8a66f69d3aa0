//! Command implementations for the case panel CLI.
//!
//! Provides subcommands for refreshing the dashboard's embedded fixtures:
//! the JHU CSSE snapshot CSVs and the scraped regional counts table.

use clap::Subcommand;

pub mod query;
pub mod regional;

#[derive(Subcommand)]
pub enum Command {
    /// Fetch the JHU CSSE snapshot and write the three category CSVs
    Query {
        /// Output directory for the snapshot CSVs
        #[arg(short = 'o', long, default_value = "fixtures")]
        out_dir: String,
    },

    /// Fetch the health-ministry regional table and write code,name,cases CSV
    RegionalQuery {
        /// Output path for the regional counts CSV
        #[arg(short = 'r', long, default_value = "fixtures/regional.csv")]
        out_csv: String,
    },
}

pub async fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Query { out_dir } => query::run_query(&out_dir).await,
        Command::RegionalQuery { out_csv } => regional::run_regional_query(&out_csv).await,
    }
}
