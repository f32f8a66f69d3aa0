//! Regional query: scrape the Chilean health-ministry table.
//!
//! The ministry publishes the latest per-region confirmed counts as an
//! HTML table on a live webpage. The table carries no region codes, so the
//! rows are parsed positionally and zipped against the fixed code list
//! matching the boundary file. Any drift in the page layout fails the
//! whole query rather than writing a misaligned CSV.

use log::info;
use scraper::{Html, Selector};

/// Live page carrying the per-region confirmed case table.
pub const REGIONAL_SOURCE_URL: &str =
    "https://www.minsal.cl/nuevo-coronavirus-2019-ncov/casos-confirmados-en-chile-covid-19/";

/// Region codes in the order the ministry table lists its rows
/// (north to south), matching the boundary file's `codregion` property.
pub const REGION_CODES: [i64; 16] = [15, 1, 2, 3, 4, 5, 13, 6, 7, 16, 8, 9, 14, 10, 11, 12];

/// Banner rows and the header row preceding the first region row.
const PREAMBLE_ROWS: usize = 3;
/// Trailing national-total row.
const TRAILING_ROWS: usize = 1;

/// One parsed region row.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionRow {
    pub code: i64,
    pub name: String,
    pub cases: i64,
}

fn parse_count(cell: &str) -> Option<i64> {
    let cleaned: String = cell
        .chars()
        .filter(|c| !matches!(c, '.' | ',' | ' ' | '\u{a0}'))
        .collect();
    cleaned.parse().ok()
}

/// Parse the first table of the ministry page positionally.
///
/// Expects `PREAMBLE_ROWS` rows of banner/header, sixteen region rows
/// (name in the first cell, cumulative cases in the second), and one
/// trailing total row.
pub fn parse_regional_table(html: &str) -> anyhow::Result<Vec<RegionRow>> {
    let document = Html::parse_document(html);
    let table_sel = Selector::parse("table").expect("static selector");
    let row_sel = Selector::parse("tr").expect("static selector");
    let cell_sel = Selector::parse("td, th").expect("static selector");

    let table = document
        .select(&table_sel)
        .next()
        .ok_or_else(|| anyhow::anyhow!("no table found on the page"))?;

    let rows: Vec<Vec<String>> = table
        .select(&row_sel)
        .map(|tr| {
            tr.select(&cell_sel)
                .map(|cell| cell.text().collect::<String>().trim().to_string())
                .collect()
        })
        .collect();

    if rows.len() < PREAMBLE_ROWS + REGION_CODES.len() + TRAILING_ROWS {
        anyhow::bail!(
            "table has {} rows, expected at least {}",
            rows.len(),
            PREAMBLE_ROWS + REGION_CODES.len() + TRAILING_ROWS
        );
    }
    let data = &rows[PREAMBLE_ROWS..rows.len() - TRAILING_ROWS];
    if data.len() != REGION_CODES.len() {
        anyhow::bail!(
            "table has {} region rows, expected {}",
            data.len(),
            REGION_CODES.len()
        );
    }

    let mut result = Vec::with_capacity(REGION_CODES.len());
    for (code, cells) in REGION_CODES.iter().zip(data) {
        let name = cells
            .first()
            .filter(|n| !n.is_empty())
            .ok_or_else(|| anyhow::anyhow!("region row for code {} has no name cell", code))?;
        let cases = cells
            .get(1)
            .and_then(|c| parse_count(c))
            .ok_or_else(|| {
                anyhow::anyhow!("region row '{}' has a non-numeric case count", name)
            })?;
        result.push(RegionRow {
            code: *code,
            name: name.clone(),
            cases,
        });
    }
    Ok(result)
}

pub async fn run_regional_query(out_csv: &str) -> anyhow::Result<()> {
    let client = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(60))
        .build()?;

    info!("Fetching regional table from {}", REGIONAL_SOURCE_URL);
    let response = client.get(REGIONAL_SOURCE_URL).send().await?;
    if !response.status().is_success() {
        anyhow::bail!("regional source returned {}", response.status());
    }
    let html = response.text().await?;

    let rows = parse_regional_table(&html)?;

    let mut output = String::from("code,name,cases\n");
    for row in &rows {
        output.push_str(&format!("{},{},{}\n", row.code, row.name, row.cases));
    }
    if let Some(parent) = std::path::Path::new(out_csv).parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(out_csv, &output)?;

    info!("Wrote {} regions to {}", rows.len(), out_csv);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{parse_count, parse_regional_table, REGION_CODES};

    fn sample_page(region_rows: &str) -> String {
        format!(
            r#"<html><body><table>
<tr><td colspan="2">Casos confirmados en Chile</td></tr>
<tr><td colspan="2">Actualizado al dia de hoy</td></tr>
<tr><th>Region</th><th>Casos totales</th></tr>
{}
<tr><td>Total</td><td>9.999</td></tr>
</table></body></html>"#,
            region_rows
        )
    }

    fn sixteen_rows() -> String {
        (0..16)
            .map(|i| format!("<tr><td>Region {}</td><td>{}</td></tr>", i, i * 10))
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_parse_regional_table() {
        let rows = parse_regional_table(&sample_page(&sixteen_rows())).unwrap();
        assert_eq!(rows.len(), 16);
        assert_eq!(rows[0].code, REGION_CODES[0]);
        assert_eq!(rows[0].name, "Region 0");
        assert_eq!(rows[15].cases, 150);
    }

    #[test]
    fn test_thousands_separators() {
        assert_eq!(parse_count("1.554"), Some(1554));
        assert_eq!(parse_count("12,030"), Some(12030));
        assert_eq!(parse_count("7"), Some(7));
        assert_eq!(parse_count("n/a"), None);
    }

    #[test]
    fn test_missing_rows_fail() {
        let few = "<tr><td>Only</td><td>1</td></tr>";
        assert!(parse_regional_table(&sample_page(few)).is_err());
    }

    #[test]
    fn test_non_numeric_count_fails() {
        let mut rows = sixteen_rows();
        rows = rows.replacen("<td>0</td>", "<td>pendiente</td>", 1);
        assert!(parse_regional_table(&sample_page(&rows)).is_err());
    }

    #[test]
    fn test_no_table_fails() {
        assert!(parse_regional_table("<html><body><p>nothing</p></body></html>").is_err());
    }
}
