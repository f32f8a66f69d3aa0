//! Loading functions for populating the in-memory SQLite database.
//!
//! The case loader normalizes the wide-format snapshot (one column per
//! date) into long rows; the regional loader parses the small
//! `code,name,cases` CSV produced by the CLI's regional query.

use crate::Database;
use cvp_csse::case_set::CaseSet;
use cvp_csse::category::Category;
use rusqlite::params;

/// Compact date key used inside SQLite: "YYYYMMDD".
const DATE_KEY_FORMAT: &str = "%Y%m%d";

impl Database {
    /// Load a validated snapshot into the `cases` table.
    ///
    /// Each (category, row, date) cell becomes one normalized row. The
    /// snapshot has already been schema-checked by `CaseSet::from_tables`,
    /// so the per-row count lengths are trusted here.
    pub fn load_case_set(&self, case_set: &CaseSet) -> anyhow::Result<()> {
        let conn = self.conn.borrow();
        let mut stmt = conn.prepare(
            "INSERT OR REPLACE INTO cases (category, country, province, date, value)
             VALUES (?1, ?2, ?3, ?4, ?5)",
        )?;

        let date_keys: Vec<String> = case_set
            .dates()
            .iter()
            .map(|d| d.format(DATE_KEY_FORMAT).to_string())
            .collect();

        let mut count = 0u32;
        for category in Category::ALL {
            for row in &case_set.table(category).rows {
                let province = row.province.as_deref().unwrap_or("");
                for (date_key, value) in date_keys.iter().zip(&row.counts) {
                    stmt.execute(params![
                        category.label(),
                        row.country,
                        province,
                        date_key,
                        value
                    ])?;
                    count += 1;
                }
            }
        }
        log::info!("loader: inserted {} case rows", count);
        Ok(())
    }

    /// Load per-region counts from CSV string.
    ///
    /// Expected format (with headers): `code,name,cases`
    ///
    /// # Example CSV
    /// ```text
    /// code,name,cases
    /// 13,Metropolitana,1554
    /// ```
    pub fn load_regional_csv(&self, csv_data: &str) -> anyhow::Result<()> {
        let conn = self.conn.borrow();
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(csv_data.as_bytes());

        let mut count = 0u32;
        let mut skipped = 0u32;
        for result in rdr.records() {
            let r = result?;
            let code: i64 = match r.get(0).and_then(|s| s.trim().parse().ok()) {
                Some(c) => c,
                None => {
                    skipped += 1;
                    continue;
                }
            };
            let name = r.get(1).unwrap_or("").trim();
            let cases: i64 = match r.get(2).and_then(|s| s.trim().parse().ok()) {
                Some(c) => c,
                None => {
                    skipped += 1;
                    continue;
                }
            };
            if name.is_empty() {
                skipped += 1;
                continue;
            }

            conn.execute(
                "INSERT OR REPLACE INTO regions (code, name, cases) VALUES (?1, ?2, ?3)",
                params![code, name, cases],
            )?;
            count += 1;
        }
        log::info!(
            "loader: loaded {} regions, skipped {} malformed rows",
            count,
            skipped
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::Database;
    use cvp_csse::case_set::CaseSet;
    use cvp_csse::case_table::CaseTable;

    const CONFIRMED: &str = "\
Province/State,Country/Region,Lat,Long,1/22/20,1/23/20
,Chile,-35.0,-71.0,0,5
Hubei,China,30.9,112.2,444,549
Beijing,China,40.1,116.4,14,36
";

    fn sample_set() -> CaseSet {
        let confirmed = CaseTable::parse_csv(CONFIRMED).unwrap();
        CaseSet::from_tables(confirmed.clone(), confirmed.clone(), confirmed).unwrap()
    }

    #[test]
    fn test_load_case_set() {
        let db = Database::new().unwrap();
        db.load_case_set(&sample_set()).unwrap();
        assert_eq!(db.query_countries().unwrap(), vec!["Chile", "China"]);
        assert_eq!(db.query_dates().unwrap(), vec!["20200122", "20200123"]);
    }

    #[test]
    fn test_load_regional_csv_skips_malformed_rows() {
        let db = Database::new().unwrap();
        db.load_regional_csv("code,name,cases\n13,Metropolitana,1554\nxx,Nowhere,1\n5,Valparaiso,one\n")
            .unwrap();
        let regions = db.query_regions().unwrap();
        assert_eq!(regions.len(), 1);
        assert_eq!(regions[0].name, "Metropolitana");
    }
}
