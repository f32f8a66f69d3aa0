//! The three dashboard sections and their shared chart plumbing.

mod chile;
mod countries;
mod world;

pub use chile::ChileSection;
pub use countries::CountriesSection;
pub use world::WorldSection;

use cvp_chart_ui::js_bridge;
use cvp_csse::category::Category;
use cvp_data::aggregate::AggregatedSeries;
use serde_json::json;

/// Per-category line colors shared by every time series chart.
const SERIES_COLORS: [(&str, &str); 3] = [
    ("Confirmed", "#1E88E5"),
    ("Deaths", "#E53935"),
    ("Recovered", "#43A047"),
];

/// Chart payload rows for one aggregated series.
fn series_rows(series: &AggregatedSeries) -> Vec<serde_json::Value> {
    series
        .dates
        .iter()
        .enumerate()
        .map(|(idx, date)| {
            json!({
                "date": date.format("%Y-%m-%d").to_string(),
                "Confirmed": series.confirmed[idx],
                "Deaths": series.deaths[idx],
                "Recovered": series.recovered[idx],
            })
        })
        .collect()
}

/// Render a three-category line chart for one aggregated series, plus the
/// optional underlying table.
fn render_series_chart(
    chart_id: &str,
    table_id: &str,
    series: &AggregatedSeries,
    title: &str,
    show_table: bool,
) {
    let rows = series_rows(series);
    let data_json = serde_json::to_string(&rows).unwrap_or_default();
    let config_json = json!({
        "title": title,
        "yAxisLabel": "Cumulative cases",
        "series": SERIES_COLORS
            .iter()
            .map(|(key, color)| json!({"key": key, "color": color}))
            .collect::<Vec<_>>(),
    })
    .to_string();
    js_bridge::render_line_chart(chart_id, &data_json, &config_json);

    if show_table {
        let table_config = json!({
            "columns": [
                {"key": "date", "label": "Date"},
                {"key": "Confirmed", "label": "Confirmed"},
                {"key": "Deaths", "label": "Deaths"},
                {"key": "Recovered", "label": "Recovered"},
            ],
        })
        .to_string();
        js_bridge::render_data_table(table_id, &data_json, &table_config);
    } else {
        js_bridge::destroy_chart(table_id);
    }
}

/// Choropleth config for one category: the fixed scale lookup plus the
/// full-range domain clamp.
fn choropleth_config(category: Category, title: &str, domain_max: i64) -> String {
    let scale = category.color_scale();
    json!({
        "title": title,
        "interpolator": scale.interpolator,
        "reversed": scale.reversed,
        "domainMax": domain_max,
    })
    .to_string()
}
