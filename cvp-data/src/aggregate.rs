//! Time series aggregation over the case database.
//!
//! `aggregate` is the single entry point the dashboard uses for line
//! charts: it sums every sub-region per date (globally or filtered to one
//! country) and zips the three categories into one owned series. The
//! realignment helpers derive the relative "days since contagion" axis
//! for the comparison chart.

use chrono::NaiveDate;
use cvp_csse::category::Category;
use cvp_db::models::DateValue;
use cvp_db::Database;
use std::fmt;

/// Date key format used by the database layer: "YYYYMMDD".
const DATE_KEY_FORMAT: &str = "%Y%m%d";

/// Series label used when no region filter is set.
pub const WORLD_LABEL: &str = "World";

/// A region filter named a country absent from the snapshot.
///
/// The source of this dashboard silently produced an all-zero series for
/// unknown regions; that behavior is upgraded to an explicit error here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownRegionError(pub String);

impl fmt::Display for UnknownRegionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "region '{}' is not present in the snapshot", self.0)
    }
}

impl std::error::Error for UnknownRegionError {}

/// The per-category series returned by the database disagree on their
/// date sets. The snapshot is validated on load, so this indicates a
/// corrupted or partially loaded database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateAlignmentError {
    pub category: Category,
}

impl fmt::Display for DateAlignmentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} series dates diverge from the Confirmed series",
            self.category.label()
        )
    }
}

impl std::error::Error for DateAlignmentError {}

/// One aggregated time series: per-date totals for all three categories.
///
/// Built fresh on every call; owns all of its data.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregatedSeries {
    /// Country filter, or `None` for the global total.
    pub region: Option<String>,
    /// Calendar dates, ascending.
    pub dates: Vec<NaiveDate>,
    pub confirmed: Vec<i64>,
    pub deaths: Vec<i64>,
    pub recovered: Vec<i64>,
}

/// A series re-indexed to a relative day axis for comparison charts.
///
/// Day 0 is the region's first date with a nonzero confirmed count.
#[derive(Debug, Clone, PartialEq)]
pub struct RealignedSeries {
    pub label: String,
    /// Relative day offsets, starting at 0.
    pub days: Vec<i64>,
    /// Confirmed counts from the first nonzero date onward.
    pub confirmed: Vec<i64>,
}

impl AggregatedSeries {
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Display label for chart legends.
    pub fn label(&self) -> &str {
        self.region.as_deref().unwrap_or(WORLD_LABEL)
    }

    /// Index of the first date with a nonzero confirmed count.
    pub fn first_confirmed_case(&self) -> Option<usize> {
        self.confirmed.iter().position(|&v| v > 0)
    }

    /// Truncate at the first nonzero confirmed count and re-index to a
    /// relative day axis. Returns `None` for a series that never records
    /// a confirmed case.
    ///
    /// The result owns copies of the counts; the original series is left
    /// untouched.
    pub fn days_since_first_case(&self) -> Option<RealignedSeries> {
        let start = self.first_confirmed_case()?;
        let confirmed: Vec<i64> = self.confirmed[start..].to_vec();
        let days: Vec<i64> = (0..confirmed.len() as i64).collect();
        Some(RealignedSeries {
            label: self.label().to_string(),
            days,
            confirmed,
        })
    }
}

/// Aggregate the snapshot into one three-category series.
///
/// With `region = None` every sub-region row is summed per date (global
/// total); otherwise rows are filtered to the country-level identifier
/// first. An unknown region fails with [`UnknownRegionError`] rather than
/// returning an empty series.
pub fn aggregate(db: &Database, region: Option<&str>) -> anyhow::Result<AggregatedSeries> {
    if let Some(name) = region {
        if !db.country_exists(name)? {
            return Err(UnknownRegionError(name.to_string()).into());
        }
    }

    let confirmed = db.query_category_series(Category::Confirmed, region)?;
    let deaths = db.query_category_series(Category::Deaths, region)?;
    let recovered = db.query_category_series(Category::Recovered, region)?;

    check_alignment(&confirmed, &deaths, Category::Deaths)?;
    check_alignment(&confirmed, &recovered, Category::Recovered)?;

    let dates = confirmed
        .iter()
        .map(|point| {
            NaiveDate::parse_from_str(&point.date, DATE_KEY_FORMAT)
                .map_err(|e| anyhow::anyhow!("bad date key '{}': {}", point.date, e))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    Ok(AggregatedSeries {
        region: region.map(String::from),
        dates,
        confirmed: confirmed.into_iter().map(|p| p.value).collect(),
        deaths: deaths.into_iter().map(|p| p.value).collect(),
        recovered: recovered.into_iter().map(|p| p.value).collect(),
    })
}

fn check_alignment(
    confirmed: &[DateValue],
    other: &[DateValue],
    category: Category,
) -> Result<(), DateAlignmentError> {
    let aligned = confirmed.len() == other.len()
        && confirmed
            .iter()
            .zip(other)
            .all(|(a, b)| a.date == b.date);
    if aligned {
        Ok(())
    } else {
        Err(DateAlignmentError { category })
    }
}

/// Realigned series for a principal region and its comparison set.
///
/// Each series is truncated and re-indexed independently so the curves
/// are time-aligned at their respective first confirmed case. Regions
/// that never record a case are skipped with a warning; an unknown
/// region name is still an error.
pub fn comparative_series(
    db: &Database,
    principal: &str,
    compared: &[String],
) -> anyhow::Result<Vec<RealignedSeries>> {
    let mut result = Vec::with_capacity(1 + compared.len());
    for name in std::iter::once(principal).chain(compared.iter().map(String::as_str)) {
        // The principal may also appear in the comparison set.
        if result.iter().any(|s: &RealignedSeries| s.label == name) {
            continue;
        }
        let series = aggregate(db, Some(name))?;
        match series.days_since_first_case() {
            Some(realigned) => result.push(realigned),
            None => log::warn!("comparison region {} has no confirmed cases, skipping", name),
        }
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::{aggregate, comparative_series, UnknownRegionError};
    use cvp_csse::case_set::CaseSet;
    use cvp_csse::case_table::CaseTable;
    use cvp_db::Database;

    const CONFIRMED: &str = "\
Province/State,Country/Region,Lat,Long,1/22/20,1/23/20,1/24/20,1/25/20
,Chile,-35.0,-71.0,0,0,5,8
Hubei,China,30.9,112.2,444,549,761,1058
Beijing,China,40.1,116.4,14,36,41,68
";
    const DEATHS: &str = "\
Province/State,Country/Region,Lat,Long,1/22/20,1/23/20,1/24/20,1/25/20
,Chile,-35.0,-71.0,0,0,0,1
Hubei,China,30.9,112.2,17,24,40,52
Beijing,China,40.1,116.4,0,0,0,1
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
    fn test_aggregate_region_filter() {
        let db = loaded_db();
        let chile = aggregate(&db, Some("Chile")).unwrap();
        assert_eq!(chile.confirmed, vec![0, 0, 5, 8]);
        assert_eq!(chile.deaths, vec![0, 0, 0, 1]);
        assert_eq!(chile.label(), "Chile");
        assert_eq!(chile.len(), 4);
    }

    #[test]
    fn test_aggregate_global_is_sum_of_regions() {
        let db = loaded_db();
        let global = aggregate(&db, None).unwrap();
        let chile = aggregate(&db, Some("Chile")).unwrap();
        let china = aggregate(&db, Some("China")).unwrap();
        for idx in 0..global.len() {
            assert_eq!(
                global.confirmed[idx],
                chile.confirmed[idx] + china.confirmed[idx]
            );
            assert_eq!(global.deaths[idx], chile.deaths[idx] + china.deaths[idx]);
        }
        assert_eq!(global.label(), "World");
    }

    #[test]
    fn test_unknown_region_is_an_error() {
        let db = loaded_db();
        let err = aggregate(&db, Some("Nowhereland")).unwrap_err();
        let unknown = err
            .downcast_ref::<UnknownRegionError>()
            .expect("should be an UnknownRegionError");
        assert_eq!(unknown.0, "Nowhereland");
    }

    #[test]
    fn test_realignment_starts_at_first_case() {
        let db = loaded_db();
        let chile = aggregate(&db, Some("Chile")).unwrap();
        let realigned = chile.days_since_first_case().unwrap();
        assert_eq!(realigned.days, vec![0, 1]);
        assert_eq!(realigned.confirmed, vec![5, 8]);
        // Index 0 equals the original value at the first nonzero date.
        let first = chile.first_confirmed_case().unwrap();
        assert_eq!(realigned.confirmed[0], chile.confirmed[first]);
    }

    #[test]
    fn test_realignment_of_empty_series() {
        let db = Database::new().unwrap();
        let global = aggregate(&db, None).unwrap();
        assert!(global.is_empty());
        assert!(global.days_since_first_case().is_none());
    }

    #[test]
    fn test_comparative_series_principal_first() {
        let db = loaded_db();
        let series =
            comparative_series(&db, "Chile", &[String::from("China"), String::from("Chile")])
                .unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].label, "Chile");
        assert_eq!(series[1].label, "China");
        // China reports from day one, so nothing is truncated.
        assert_eq!(series[1].days.len(), 4);
    }
}
