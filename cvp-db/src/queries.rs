//! Typed query methods for retrieving case data from the database.
//!
//! All queries return typed structs from [`crate::models`] that can be
//! serialized to JSON for consumption by D3.js chart components, and all
//! results are freshly owned per call so no caller can observe another
//! caller's data.

use crate::models::{CountryValue, DateValue, RegionCount};
use crate::Database;
use cvp_csse::category::Category;
use rusqlite::params;

impl Database {
    /// Cumulative series for one category, summed per date.
    ///
    /// With `country = None` this is the global total (all sub-regions of
    /// all countries); otherwise rows are filtered to the given
    /// country-level identifier before summing. Ordered chronologically.
    pub fn query_category_series(
        &self,
        category: Category,
        country: Option<&str>,
    ) -> anyhow::Result<Vec<DateValue>> {
        let conn = self.conn.borrow();
        let rows = match country {
            None => {
                let mut stmt = conn.prepare(
                    "SELECT date, SUM(value) FROM cases
                     WHERE category = ?1
                     GROUP BY date
                     ORDER BY date",
                )?;
                let rows = stmt
                    .query_map(params![category.label()], |row| {
                        Ok(DateValue {
                            date: row.get(0)?,
                            value: row.get(1)?,
                        })
                    })?
                    .collect::<Result<Vec<_>, _>>()?;
                rows
            }
            Some(country) => {
                let mut stmt = conn.prepare(
                    "SELECT date, SUM(value) FROM cases
                     WHERE category = ?1 AND country = ?2
                     GROUP BY date
                     ORDER BY date",
                )?;
                let rows = stmt
                    .query_map(params![category.label(), country], |row| {
                        Ok(DateValue {
                            date: row.get(0)?,
                            value: row.get(1)?,
                        })
                    })?
                    .collect::<Result<Vec<_>, _>>()?;
                rows
            }
        };
        log::info!(
            "query: category_series {} ({:?}) returned {} records",
            category.label(),
            country,
            rows.len()
        );
        Ok(rows)
    }

    /// Sorted distinct country list, for UI dropdowns.
    pub fn query_countries(&self) -> anyhow::Result<Vec<String>> {
        let conn = self.conn.borrow();
        let mut stmt = conn.prepare("SELECT DISTINCT country FROM cases ORDER BY country")?;
        let rows = stmt
            .query_map([], |row| row.get(0))?
            .collect::<Result<Vec<String>, _>>()?;
        Ok(rows)
    }

    /// Whether a country-level identifier exists in the snapshot.
    pub fn country_exists(&self, country: &str) -> anyhow::Result<bool> {
        let conn = self.conn.borrow();
        let exists: i64 = conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM cases WHERE country = ?1)",
            params![country],
            |row| row.get(0),
        )?;
        Ok(exists != 0)
    }

    /// Sorted distinct date keys ("YYYYMMDD") of the snapshot.
    pub fn query_dates(&self) -> anyhow::Result<Vec<String>> {
        let conn = self.conn.borrow();
        let mut stmt = conn.prepare("SELECT DISTINCT date FROM cases ORDER BY date")?;
        let rows = stmt
            .query_map([], |row| row.get(0))?
            .collect::<Result<Vec<String>, _>>()?;
        Ok(rows)
    }

    /// Per-country totals for one category at one snapshot day.
    pub fn query_country_values(
        &self,
        category: Category,
        date: &str,
    ) -> anyhow::Result<Vec<CountryValue>> {
        let conn = self.conn.borrow();
        let mut stmt = conn.prepare(
            "SELECT country, SUM(value) FROM cases
             WHERE category = ?1 AND date = ?2
             GROUP BY country
             ORDER BY country",
        )?;
        let rows = stmt
            .query_map(params![category.label(), date], |row| {
                Ok(CountryValue {
                    country: row.get(0)?,
                    value: row.get(1)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        log::info!(
            "query: country_values {} at {} returned {} records",
            category.label(),
            date,
            rows.len()
        );
        Ok(rows)
    }

    /// Maximum per-country total for one category across the full date
    /// range.
    ///
    /// This fixes the choropleth color domain to `[0, peak]` so the scale
    /// does not jump as the day slider moves within a category selection.
    pub fn query_category_peak(&self, category: Category) -> anyhow::Result<i64> {
        let conn = self.conn.borrow();
        let peak: i64 = conn.query_row(
            "SELECT COALESCE(MAX(total), 0) FROM (
                 SELECT SUM(value) AS total FROM cases
                 WHERE category = ?1
                 GROUP BY country, date
             )",
            params![category.label()],
            |row| row.get(0),
        )?;
        Ok(peak)
    }

    /// All regional counts, ordered by region code.
    pub fn query_regions(&self) -> anyhow::Result<Vec<RegionCount>> {
        let conn = self.conn.borrow();
        let mut stmt = conn.prepare("SELECT code, name, cases FROM regions ORDER BY code")?;
        let rows = stmt
            .query_map([], |row| {
                Ok(RegionCount {
                    code: row.get(0)?,
                    name: row.get(1)?,
                    cases: row.get(2)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use crate::Database;
    use cvp_csse::case_set::CaseSet;
    use cvp_csse::case_table::CaseTable;
    use cvp_csse::category::Category;

    const CONFIRMED: &str = "\
Province/State,Country/Region,Lat,Long,1/22/20,1/23/20,1/24/20
,Chile,-35.0,-71.0,0,5,8
Hubei,China,30.9,112.2,444,549,761
Beijing,China,40.1,116.4,14,36,41
,Uruguay,-32.5,-55.7,1,1,2
";
    const DEATHS: &str = "\
Province/State,Country/Region,Lat,Long,1/22/20,1/23/20,1/24/20
,Chile,-35.0,-71.0,0,0,1
Hubei,China,30.9,112.2,17,24,40
Beijing,China,40.1,116.4,0,0,1
,Uruguay,-32.5,-55.7,0,0,0
";

    fn loaded_db() -> Database {
        let confirmed = CaseTable::parse_csv(CONFIRMED).unwrap();
        let deaths = CaseTable::parse_csv(DEATHS).unwrap();
        let recovered = CaseTable::parse_csv(DEATHS).unwrap();
        let set = CaseSet::from_tables(confirmed, deaths, recovered).unwrap();
        let db = Database::new().unwrap();
        db.load_case_set(&set).unwrap();
        db
    }

    #[test]
    fn test_global_series_sums_all_rows() {
        let db = loaded_db();
        let series = db
            .query_category_series(Category::Confirmed, None)
            .unwrap();
        assert_eq!(series.len(), 3);
        assert_eq!(series[0].date, "20200122");
        assert_eq!(series[0].value, 459);
        assert_eq!(series[2].value, 812);
    }

    #[test]
    fn test_country_series_sums_provinces() {
        let db = loaded_db();
        let series = db
            .query_category_series(Category::Confirmed, Some("China"))
            .unwrap();
        assert_eq!(
            series.iter().map(|p| p.value).collect::<Vec<_>>(),
            vec![458, 585, 802]
        );
    }

    #[test]
    fn test_global_equals_sum_over_countries() {
        let db = loaded_db();
        for category in Category::ALL {
            let global = db.query_category_series(category, None).unwrap();
            let mut summed = vec![0i64; global.len()];
            for country in db.query_countries().unwrap() {
                let series = db
                    .query_category_series(category, Some(&country))
                    .unwrap();
                assert_eq!(series.len(), global.len());
                for (idx, point) in series.iter().enumerate() {
                    summed[idx] += point.value;
                }
            }
            let expected: Vec<i64> = global.iter().map(|p| p.value).collect();
            assert_eq!(summed, expected);
        }
    }

    #[test]
    fn test_unknown_country_yields_empty_series() {
        let db = loaded_db();
        assert!(!db.country_exists("Nowhereland").unwrap());
        let series = db
            .query_category_series(Category::Confirmed, Some("Nowhereland"))
            .unwrap();
        assert!(series.is_empty());
    }

    #[test]
    fn test_country_values_at_day() {
        let db = loaded_db();
        let values = db
            .query_country_values(Category::Confirmed, "20200123")
            .unwrap();
        assert_eq!(values.len(), 3);
        let china = values.iter().find(|v| v.country == "China").unwrap();
        assert_eq!(china.value, 585);
    }

    #[test]
    fn test_category_peak_is_slider_independent() {
        let db = loaded_db();
        let peak = db.query_category_peak(Category::Confirmed).unwrap();
        // China's last-day total is the largest per-country value anywhere
        // in the range.
        assert_eq!(peak, 802);
    }

    #[test]
    fn test_category_peak_empty_db() {
        let db = Database::new().unwrap();
        assert_eq!(db.query_category_peak(Category::Deaths).unwrap(), 0);
    }
}
