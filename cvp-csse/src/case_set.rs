use crate::case_table::{CaseTable, FetchError};
use crate::category::Category;
use chrono::NaiveDate;
use std::collections::BTreeSet;

/// The three category tables of one remote snapshot.
///
/// Constructed once per process and treated as immutable afterward; every
/// transform downstream returns owned data rather than views into this.
#[derive(Debug, Clone, PartialEq)]
pub struct CaseSet {
    confirmed: CaseTable,
    deaths: CaseTable,
    recovered: CaseTable,
}

impl CaseSet {
    /// Build a snapshot from the three category tables.
    ///
    /// The date-column sets must be identical across all three tables;
    /// divergence is a data-quality error and fails fast.
    pub fn from_tables(
        confirmed: CaseTable,
        deaths: CaseTable,
        recovered: CaseTable,
    ) -> Result<CaseSet, FetchError> {
        if confirmed.dates != deaths.dates {
            return Err(FetchError::DateColumnsDiverge {
                left: Category::Confirmed,
                right: Category::Deaths,
            });
        }
        if confirmed.dates != recovered.dates {
            return Err(FetchError::DateColumnsDiverge {
                left: Category::Confirmed,
                right: Category::Recovered,
            });
        }
        Ok(CaseSet {
            confirmed,
            deaths,
            recovered,
        })
    }

    pub fn table(&self, category: Category) -> &CaseTable {
        match category {
            Category::Confirmed => &self.confirmed,
            Category::Deaths => &self.deaths,
            Category::Recovered => &self.recovered,
        }
    }

    /// The shared reporting dates, ascending.
    pub fn dates(&self) -> &[NaiveDate] {
        &self.confirmed.dates
    }

    /// Sorted union of countries across all three tables.
    pub fn countries(&self) -> Vec<String> {
        let mut set: BTreeSet<&str> = BTreeSet::new();
        for category in Category::ALL {
            for row in &self.table(category).rows {
                set.insert(row.country.as_str());
            }
        }
        set.into_iter().map(String::from).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::CaseSet;
    use crate::case_table::{CaseTable, FetchError};
    use crate::category::Category;

    fn table(dates_header: &str) -> CaseTable {
        let body = format!(
            "Province/State,Country/Region,Lat,Long,{}\n,Chile,-35.0,-71.0{}\n",
            dates_header,
            ",1".repeat(dates_header.split(',').count())
        );
        CaseTable::parse_csv(&body).unwrap()
    }

    #[test]
    fn test_from_tables_accepts_matching_dates() {
        let set = CaseSet::from_tables(
            table("1/22/20,1/23/20"),
            table("1/22/20,1/23/20"),
            table("1/22/20,1/23/20"),
        )
        .unwrap();
        assert_eq!(set.dates().len(), 2);
        assert_eq!(set.countries(), vec!["Chile"]);
    }

    #[test]
    fn test_from_tables_rejects_divergent_dates() {
        let err = CaseSet::from_tables(
            table("1/22/20,1/23/20"),
            table("1/22/20,1/24/20"),
            table("1/22/20,1/23/20"),
        )
        .unwrap_err();
        assert_eq!(
            err,
            FetchError::DateColumnsDiverge {
                left: Category::Confirmed,
                right: Category::Deaths,
            }
        );
    }
}
