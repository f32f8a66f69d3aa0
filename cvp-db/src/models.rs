//! Query result model structs for case data.
//!
//! All structs derive `Serialize` so they can be passed to D3.js as JSON
//! from the Dioxus WASM frontend.

use serde::Serialize;

/// A single (date, value) pair used for line chart data points.
///
/// The `date` field is a compact `YYYYMMDD` key; `value` is a cumulative
/// case count summed over the selected rows.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DateValue {
    pub date: String,
    pub value: i64,
}

/// A per-country total at one snapshot day (choropleth input).
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CountryValue {
    pub country: String,
    pub value: i64,
}

/// One first-level administrative region with its latest case count.
///
/// The `code` matches the numeric region code carried by the boundary
/// file, which is the join key for the regional choropleth.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RegionCount {
    pub code: i64,
    pub name: String,
    pub cases: i64,
}
