use crate::category::Category;
use chrono::NaiveDate;
use csv::ReaderBuilder;
use std::collections::BTreeSet;
use std::fmt;

/// Date format used for JHU CSSE time series column headers: "M/D/YY".
pub const DATE_FORMAT: &str = "%m/%d/%y";

/// Identifier columns preceding the date columns, in order.
pub const IDENTIFIER_COLUMNS: [&str; 4] = ["Province/State", "Country/Region", "Lat", "Long"];

/// Errors raised while fetching or parsing a case snapshot.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchError {
    /// Request failed or returned a non-OK status.
    Http(String),
    /// Response body was empty or unreadable.
    EmptyResponse,
    /// An expected identifier column is missing from the header.
    MissingColumn(&'static str),
    /// A header column past the identifiers did not parse as a date.
    BadDateHeader(String),
    /// A row's cell count does not match the header width.
    ShortRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    /// A count cell did not parse as a non-negative integer.
    BadCount { row: usize, date: NaiveDate },
    /// Two category tables carry different date-column sets.
    DateColumnsDiverge { left: Category, right: Category },
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::Http(msg) => write!(f, "request failed: {}", msg),
            FetchError::EmptyResponse => write!(f, "empty response body"),
            FetchError::MissingColumn(col) => {
                write!(f, "missing identifier column '{}'", col)
            }
            FetchError::BadDateHeader(header) => {
                write!(f, "header column '{}' is not a M/D/YY date", header)
            }
            FetchError::ShortRow {
                row,
                expected,
                found,
            } => write!(
                f,
                "row {} has {} cells, expected {}",
                row, found, expected
            ),
            FetchError::BadCount { row, date } => {
                write!(f, "row {} has a non-numeric count for {}", row, date)
            }
            FetchError::DateColumnsDiverge { left, right } => write!(
                f,
                "date columns diverge between {} and {}",
                left.label(),
                right.label()
            ),
        }
    }
}

impl std::error::Error for FetchError {}

/// One geographic sub-region row of a wide-format case table.
#[derive(Debug, Clone, PartialEq)]
pub struct CaseRow {
    /// Province or state; empty for single-region countries.
    pub province: Option<String>,
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Cumulative counts, one per date column.
    pub counts: Vec<i64>,
}

/// A wide-format case table: rows are sub-regions, columns are dates.
#[derive(Debug, Clone, PartialEq)]
pub struct CaseTable {
    /// Reporting dates, ascending, parsed from the header.
    pub dates: Vec<NaiveDate>,
    pub rows: Vec<CaseRow>,
}

impl CaseTable {
    /// Parse a wide-format JHU CSSE CSV body.
    ///
    /// The header must start with the four identifier columns followed by
    /// at least one date column. A row whose cell count disagrees with the
    /// header width is a data-quality error and fails the parse.
    pub fn parse_csv(body: &str) -> Result<CaseTable, FetchError> {
        if body.trim().is_empty() {
            return Err(FetchError::EmptyResponse);
        }
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .from_reader(body.as_bytes());

        let headers = rdr
            .headers()
            .map_err(|_| FetchError::EmptyResponse)?
            .clone();
        for (idx, expected) in IDENTIFIER_COLUMNS.iter().enumerate() {
            match headers.get(idx) {
                Some(h) if h.trim() == *expected => {}
                _ => return Err(FetchError::MissingColumn(expected)),
            }
        }

        let mut dates = Vec::with_capacity(headers.len().saturating_sub(4));
        for header in headers.iter().skip(IDENTIFIER_COLUMNS.len()) {
            let date = NaiveDate::parse_from_str(header.trim(), DATE_FORMAT)
                .map_err(|_| FetchError::BadDateHeader(header.to_string()))?;
            dates.push(date);
        }
        if dates.is_empty() {
            return Err(FetchError::BadDateHeader(String::from("<none>")));
        }

        let expected_len = IDENTIFIER_COLUMNS.len() + dates.len();
        let mut rows = Vec::new();
        for (row_idx, result) in rdr.records().enumerate() {
            let record = result.map_err(|_| FetchError::ShortRow {
                row: row_idx,
                expected: expected_len,
                found: 0,
            })?;
            if record.len() != expected_len {
                return Err(FetchError::ShortRow {
                    row: row_idx,
                    expected: expected_len,
                    found: record.len(),
                });
            }

            let province = match record.get(0).unwrap_or("").trim() {
                "" => None,
                name => Some(name.to_string()),
            };
            let country = record.get(1).unwrap_or("").trim().to_string();
            // Coordinates are display metadata; tolerate blanks.
            let latitude = record
                .get(2)
                .and_then(|s| s.trim().parse::<f64>().ok())
                .unwrap_or_default();
            let longitude = record
                .get(3)
                .and_then(|s| s.trim().parse::<f64>().ok())
                .unwrap_or_default();

            let mut counts = Vec::with_capacity(dates.len());
            for (date_idx, date) in dates.iter().enumerate() {
                let cell = record
                    .get(IDENTIFIER_COLUMNS.len() + date_idx)
                    .unwrap_or("")
                    .trim();
                let value = cell.parse::<i64>().map_err(|_| FetchError::BadCount {
                    row: row_idx,
                    date: *date,
                })?;
                counts.push(value);
            }

            rows.push(CaseRow {
                province,
                country,
                latitude,
                longitude,
                counts,
            });
        }

        Ok(CaseTable { dates, rows })
    }

    /// Sorted, deduplicated country list.
    pub fn countries(&self) -> Vec<String> {
        let set: BTreeSet<&str> = self.rows.iter().map(|r| r.country.as_str()).collect();
        set.into_iter().map(String::from).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::{CaseTable, FetchError};
    use chrono::NaiveDate;

    // Header layout matches the JHU CSSE global time series files.
    const SAMPLE_CSV: &str = "\
Province/State,Country/Region,Lat,Long,1/22/20,1/23/20,1/24/20,1/25/20
,Chile,-35.6751,-71.543,0,0,5,8
,Uruguay,-32.5228,-55.7658,0,1,1,2
Hubei,China,30.9756,112.2707,444,444,549,761
Beijing,China,40.1824,116.4142,14,22,36,41
";

    #[test]
    fn test_parse_sample() {
        let table = CaseTable::parse_csv(SAMPLE_CSV).unwrap();
        assert_eq!(table.dates.len(), 4);
        assert_eq!(table.dates[0], NaiveDate::from_ymd_opt(2020, 1, 22).unwrap());
        assert_eq!(table.rows.len(), 4);
        assert_eq!(table.rows[0].country, "Chile");
        assert_eq!(table.rows[0].province, None);
        assert_eq!(table.rows[0].counts, vec![0, 0, 5, 8]);
        assert_eq!(table.rows[2].province.as_deref(), Some("Hubei"));
    }

    #[test]
    fn test_countries_sorted_and_deduplicated() {
        let table = CaseTable::parse_csv(SAMPLE_CSV).unwrap();
        assert_eq!(table.countries(), vec!["Chile", "China", "Uruguay"]);
    }

    #[test]
    fn test_short_row_is_an_error() {
        let body = "\
Province/State,Country/Region,Lat,Long,1/22/20,1/23/20
,Chile,-35.6751,-71.543,0
";
        // The csv reader itself flags the uneven record; either way the
        // parse must not silently coerce the row.
        assert!(CaseTable::parse_csv(body).is_err());
    }

    #[test]
    fn test_non_numeric_count_is_an_error() {
        let body = "\
Province/State,Country/Region,Lat,Long,1/22/20
,Chile,-35.6751,-71.543,n/a
";
        let err = CaseTable::parse_csv(body).unwrap_err();
        assert!(matches!(err, FetchError::BadCount { row: 0, .. }));
    }

    #[test]
    fn test_missing_identifier_column() {
        let body = "Country,Lat,Long,1/22/20\nChile,-35.0,-71.0,3\n";
        let err = CaseTable::parse_csv(body).unwrap_err();
        assert_eq!(err, FetchError::MissingColumn("Province/State"));
    }

    #[test]
    fn test_non_date_header_is_an_error() {
        let body = "Province/State,Country/Region,Lat,Long,notadate\n,Chile,-35.0,-71.0,3\n";
        let err = CaseTable::parse_csv(body).unwrap_err();
        assert!(matches!(err, FetchError::BadDateHeader(_)));
    }
}
