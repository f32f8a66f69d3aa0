//! Chile section: national time series, cross-country comparison on the
//! days-since-contagion axis, and the regional choropleth.

use super::{choropleth_config, render_series_chart};
use cvp_chart_ui::components::{ChartContainer, ChartHeader, CompareSelector, ShowDataCheckbox};
use cvp_chart_ui::data::inflate_fixture;
use cvp_chart_ui::js_bridge;
use cvp_chart_ui::state::AppState;
use cvp_csse::category::Category;
use cvp_data::aggregate;
use cvp_data::choropleth;
use dioxus::prelude::*;
use geojson::GeoJson;
use serde_json::json;

const SERIES_CHART_ID: &str = "chile-series-chart";
const SERIES_TABLE_ID: &str = "chile-series-table";
const COMPARE_CHART_ID: &str = "chile-compare-chart";
const REGION_MAP_ID: &str = "chile-region-map";

/// The comparison principal.
const PRINCIPAL: &str = "Chile";

/// Simplified first-level administrative boundaries, keyed by `codregion`.
const REGIONS_GEOJSON_GZ: &[u8] =
    include_bytes!(concat!(env!("OUT_DIR"), "/chile_regions.geojson.gz"));

#[component]
pub fn ChileSection() -> Element {
    let mut state = use_context::<AppState>();

    // National line chart and its optional data table.
    use_effect(move || {
        if (state.loading)() {
            return;
        }
        let db = match &*state.db.read() {
            Some(db) => db.clone(),
            None => return,
        };
        let show_table = (state.show_table)();

        js_bridge::init_charts();
        match aggregate::aggregate(&db, Some(PRINCIPAL)) {
            Ok(series) => {
                state.error_msg.set(None);
                render_series_chart(
                    SERIES_CHART_ID,
                    SERIES_TABLE_ID,
                    &series,
                    "Time series in Chile",
                    show_table,
                );
            }
            Err(e) => state.error_msg.set(Some(e.to_string())),
        }
    });

    // Comparison chart: every selected country realigned to its own
    // first confirmed case.
    use_effect(move || {
        if (state.loading)() {
            return;
        }
        let db = match &*state.db.read() {
            Some(db) => db.clone(),
            None => return,
        };
        let compared = state.compare_countries.read().clone();

        match aggregate::comparative_series(&db, PRINCIPAL, &compared) {
            Ok(series) => {
                state.error_msg.set(None);
                let data: Vec<serde_json::Value> = series
                    .iter()
                    .map(|s| {
                        let points: Vec<serde_json::Value> = s
                            .days
                            .iter()
                            .zip(&s.confirmed)
                            .map(|(day, value)| json!({"day": day, "value": value}))
                            .collect();
                        json!({"label": s.label, "points": points})
                    })
                    .collect();
                let data_json = serde_json::to_string(&data).unwrap_or_default();
                let config_json = json!({
                    "xAxisLabel": "Days since contagion",
                    "yAxisLabel": "Confirmed cases",
                    "principal": PRINCIPAL,
                    "principalColor": "#000000",
                })
                .to_string();
                js_bridge::render_compare_chart(COMPARE_CHART_ID, &data_json, &config_json);
            }
            Err(e) => state.error_msg.set(Some(e.to_string())),
        }
    });

    // Regional choropleth: ministry counts joined onto the boundary file.
    use_effect(move || {
        if (state.loading)() {
            return;
        }
        let db = match &*state.db.read() {
            Some(db) => db.clone(),
            None => return,
        };

        let rendered = db.query_regions().and_then(|counts| {
            if counts.is_empty() {
                js_bridge::destroy_chart(REGION_MAP_ID);
                log::warn!("no regional counts loaded, skipping Chile map");
                return Ok(());
            }
            let boundary = inflate_fixture(REGIONS_GEOJSON_GZ)?;
            let collection = choropleth::merge_regional_counts(&boundary, &counts)?;
            let peak = counts.iter().map(|r| r.cases).max().unwrap_or(0);
            let config_json = choropleth_config(
                Category::Confirmed,
                "Confirmed cases by region",
                peak,
            );
            let fc_json = GeoJson::from(collection).to_string();
            js_bridge::render_region_map(REGION_MAP_ID, &fc_json, &config_json);
            Ok(())
        });
        if let Err(e) = rendered {
            state.error_msg.set(Some(e.to_string()));
        }
    });

    rsx! {
        div {
            ChartHeader {
                title: "Time series in Chile".to_string(),
                unit_description: "Cumulative confirmed, death, and recovered counts".to_string(),
            }
            ChartContainer {
                id: SERIES_CHART_ID.to_string(),
                loading: false,
                min_height: 430,
            }
            ShowDataCheckbox {}
            div { id: SERIES_TABLE_ID }

            ChartHeader {
                title: "Chile compared with other countries".to_string(),
                unit_description: "Confirmed cases on a days-since-contagion axis".to_string(),
            }
            CompareSelector {}
            ChartContainer {
                id: COMPARE_CHART_ID.to_string(),
                loading: false,
                min_height: 430,
            }

            ChartHeader {
                title: "Infection map of Chile".to_string(),
            }
            ChartContainer {
                id: REGION_MAP_ID.to_string(),
                loading: false,
                min_height: 570,
            }
        }
    }
}
