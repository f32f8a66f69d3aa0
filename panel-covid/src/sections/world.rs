//! World section: global time series and the slider-driven world map.

use super::{choropleth_config, render_series_chart};
use cvp_chart_ui::components::{
    CategorySelector, ChartContainer, ChartHeader, DaySlider, ShowDataCheckbox,
};
use cvp_chart_ui::dates::format_date_key;
use cvp_chart_ui::js_bridge;
use cvp_chart_ui::state::AppState;
use cvp_csse::category::Category;
use cvp_data::aggregate;
use dioxus::prelude::*;
use serde_json::json;

const SERIES_CHART_ID: &str = "world-series-chart";
const SERIES_TABLE_ID: &str = "world-series-table";
const MAP_ID: &str = "world-map";

#[component]
pub fn WorldSection() -> Element {
    let mut state = use_context::<AppState>();

    // Global line chart and its optional data table.
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
        match aggregate::aggregate(&db, None) {
            Ok(series) => {
                state.error_msg.set(None);
                render_series_chart(
                    SERIES_CHART_ID,
                    SERIES_TABLE_ID,
                    &series,
                    "World time series",
                    show_table,
                );
            }
            Err(e) => state.error_msg.set(Some(e.to_string())),
        }
    });

    // World choropleth: re-renders on category or slider day changes.
    use_effect(move || {
        if (state.loading)() {
            return;
        }
        let db = match &*state.db.read() {
            Some(db) => db.clone(),
            None => return,
        };
        let category = match Category::from_label(&(state.map_category)()) {
            Some(c) => c,
            None => return,
        };
        let dates = state.dates.read().clone();
        if dates.is_empty() {
            return;
        }
        let day_index = (state.day_index)().min(dates.len() - 1);
        let date_key = &dates[day_index];

        let payload = db
            .query_country_values(category, date_key)
            .and_then(|values| {
                let peak = db.query_category_peak(category)?;
                Ok((values, peak))
            });
        match payload {
            Ok((values, peak)) => {
                state.error_msg.set(None);
                let rows: Vec<serde_json::Value> = values
                    .iter()
                    .map(|v| json!({"country": v.country, "value": v.value}))
                    .collect();
                let data_json = serde_json::to_string(&rows).unwrap_or_default();
                let title = format!(
                    "{} through {}",
                    category.label(),
                    format_date_key(date_key)
                );
                let config_json = choropleth_config(category, &title, peak);
                js_bridge::render_choropleth(MAP_ID, &data_json, &config_json);
            }
            Err(e) => state.error_msg.set(Some(e.to_string())),
        }
    });

    rsx! {
        div {
            ChartHeader {
                title: "Time series in the world".to_string(),
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
                title: "Infection map of the world".to_string(),
            }
            div {
                style: "display: flex; flex-wrap: wrap; gap: 12px; align-items: flex-end;",
                CategorySelector {}
                DaySlider {}
            }
            ChartContainer {
                id: MAP_ID.to_string(),
                loading: false,
                min_height: 470,
            }
        }
    }
}
