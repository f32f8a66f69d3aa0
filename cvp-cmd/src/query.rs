//! Snapshot query: fetch the JHU CSSE time series CSVs.
//!
//! Downloads the three category files, validates them as one schema-checked
//! snapshot, and only then writes the raw bodies into the fixtures
//! directory consumed by the dashboard's build script. A schema failure
//! therefore never clobbers a previously good fixture set.

use cvp_csse::case_set::CaseSet;
use cvp_csse::case_table::CaseTable;
use cvp_csse::category::Category;
use cvp_csse::client;
use log::info;
use std::path::Path;

/// Fixture file name for one category's snapshot CSV.
pub fn fixture_file(category: Category) -> &'static str {
    match category {
        Category::Confirmed => "confirmed_global.csv",
        Category::Deaths => "deaths_global.csv",
        Category::Recovered => "recovered_global.csv",
    }
}

pub async fn run_query(out_dir: &str) -> anyhow::Result<()> {
    std::fs::create_dir_all(out_dir)?;

    let client = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(60))
        .build()?;

    let mut bodies: Vec<(Category, String)> = Vec::with_capacity(Category::ALL.len());
    let mut tables: Vec<CaseTable> = Vec::with_capacity(Category::ALL.len());
    for category in Category::ALL {
        info!("Fetching {} time series", category.label());
        let body = client::fetch_category_csv(&client, category).await?;
        let table = CaseTable::parse_csv(&body)?;
        info!(
            "  {} rows x {} dates for {}",
            table.rows.len(),
            table.dates.len(),
            category.label()
        );
        bodies.push((category, body));
        tables.push(table);

        // Be polite to the mirror between files
        tokio::time::sleep(std::time::Duration::from_millis(500)).await;
    }

    // Validate the date columns agree across categories before writing.
    let [confirmed, deaths, recovered]: [CaseTable; 3] = tables
        .try_into()
        .map_err(|_| anyhow::anyhow!("expected three category tables"))?;
    let case_set = CaseSet::from_tables(confirmed, deaths, recovered)?;
    info!(
        "Snapshot validated: {} countries over {} dates",
        case_set.countries().len(),
        case_set.dates().len()
    );

    for (category, body) in &bodies {
        let path = Path::new(out_dir).join(fixture_file(*category));
        std::fs::write(&path, body)?;
        info!("Wrote {}", path.display());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::fixture_file;
    use cvp_csse::category::Category;

    #[test]
    fn test_fixture_files_are_distinct() {
        let names: Vec<&str> = Category::ALL.iter().map(|c| fixture_file(*c)).collect();
        assert_eq!(names.len(), 3);
        assert!(names.iter().all(|n| n.ends_with(".csv")));
        assert_ne!(names[0], names[1]);
        assert_ne!(names[1], names[2]);
    }
}
