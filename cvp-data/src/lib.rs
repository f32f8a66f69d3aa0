//! Aggregation and chart-facing transforms for case data.
//!
//! This crate turns the normalized database rows back into the series
//! shapes the charts consume: the per-date three-category series, the
//! relative "days since contagion" realignment used for cross-region
//! comparison, and the region-code join that produces the regional
//! choropleth feature collection.

pub mod aggregate;
pub mod choropleth;
