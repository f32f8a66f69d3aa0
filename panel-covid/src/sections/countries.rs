//! Other-countries section: a per-country time series chart.

use super::render_series_chart;
use cvp_chart_ui::components::{ChartContainer, ChartHeader, CountrySelector, ShowDataCheckbox};
use cvp_chart_ui::js_bridge;
use cvp_chart_ui::state::AppState;
use cvp_data::aggregate;
use dioxus::prelude::*;

const SERIES_CHART_ID: &str = "country-series-chart";
const SERIES_TABLE_ID: &str = "country-series-table";

#[component]
pub fn CountriesSection() -> Element {
    let mut state = use_context::<AppState>();

    use_effect(move || {
        if (state.loading)() {
            return;
        }
        let db = match &*state.db.read() {
            Some(db) => db.clone(),
            None => return,
        };
        let country = (state.selected_country)();
        let show_table = (state.show_table)();
        if country.is_empty() {
            return;
        }

        js_bridge::init_charts();
        match aggregate::aggregate(&db, Some(country.as_str())) {
            Ok(series) => {
                state.error_msg.set(None);
                let title = format!("Time series in {}", country);
                render_series_chart(
                    SERIES_CHART_ID,
                    SERIES_TABLE_ID,
                    &series,
                    &title,
                    show_table,
                );
            }
            Err(e) => state.error_msg.set(Some(e.to_string())),
        }
    });

    rsx! {
        div {
            ChartHeader {
                title: "Time series in other countries".to_string(),
                unit_description: "Cumulative confirmed, death, and recovered counts".to_string(),
            }
            CountrySelector {}
            ChartContainer {
                id: SERIES_CHART_ID.to_string(),
                loading: false,
                min_height: 430,
            }
            ShowDataCheckbox {}
            div { id: SERIES_TABLE_ID }
        }
    }
}
