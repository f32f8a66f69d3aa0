//! SQL schema definitions for the in-memory SQLite database.
//!
//! Contains CREATE TABLE statements for the case and region tables.
//! The schema is applied as a single batch when the database is initialized.

/// Returns the full SQL schema as a single batch string.
///
/// This creates the following tables:
///
/// - `cases` - Normalized cumulative counts, one row per
///   (category, country, province, date). The `province` column is an
///   empty string for countries reported as a single region.
/// - `regions` - Latest per-region counts joined against the boundary
///   file for the regional choropleth, keyed by the numeric region code.
///
/// Aggregates (global/per-country series, per-day map values, category
/// peaks) are derived on-the-fly via SQL `GROUP BY` + `SUM(value)`.
pub fn create_schema() -> &'static str {
    r#"
    CREATE TABLE IF NOT EXISTS cases (
        category TEXT NOT NULL,
        country TEXT NOT NULL,
        province TEXT NOT NULL,
        date TEXT NOT NULL,
        value INTEGER NOT NULL,
        PRIMARY KEY (category, country, province, date)
    );
    CREATE INDEX IF NOT EXISTS idx_cases_category_date ON cases(category, date);
    CREATE INDEX IF NOT EXISTS idx_cases_country ON cases(country);

    CREATE TABLE IF NOT EXISTS regions (
        code INTEGER PRIMARY KEY,
        name TEXT NOT NULL,
        cases INTEGER NOT NULL
    );

    "#
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;

    #[test]
    fn schema_is_valid_sql() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(create_schema())
            .expect("Schema SQL should be valid");
    }

    #[test]
    fn schema_creates_all_tables() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(create_schema()).unwrap();

        for table in ["cases", "regions"] {
            let count: i64 = conn
                .query_row(
                    &format!(
                        "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name='{}'",
                        table
                    ),
                    [],
                    |row| row.get(0),
                )
                .unwrap();
            assert_eq!(count, 1, "Table '{}' should exist", table);
        }
    }

    #[test]
    fn schema_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(create_schema()).unwrap();
        conn.execute_batch(create_schema())
            .expect("Applying schema twice should succeed due to IF NOT EXISTS");
    }
}
