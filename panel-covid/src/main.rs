//! COVID-19 case panel.
//!
//! Interactive dashboard over the JHU CSSE case time series: global and
//! per-country line charts, a days-since-contagion comparison, a
//! slider-driven world choropleth, and a regional map for Chile.
//!
//! Data flow:
//! 1. `build.rs` gzips the snapshot CSVs and the boundary file into
//!    `OUT_DIR`; `include_bytes!` embeds them into the WASM binary.
//! 2. On mount the fixtures are inflated, parsed into a schema-checked
//!    `CaseSet` (cached in a process-wide single-slot cache), and loaded
//!    into an in-memory SQLite database.
//! 3. Each section's effect re-runs on UI parameter changes, re-aggregates
//!    via SQL, and hands JSON payloads to D3.js.

mod sections;

use cvp_chart_ui::components::{ErrorDisplay, LoadingSpinner, SectionNav};
use cvp_chart_ui::data::inflate_fixture;
use cvp_chart_ui::js_bridge;
use cvp_chart_ui::state::{AppState, SECTION_CHILE, SECTION_COUNTRIES, SECTION_WORLD};
use cvp_csse::case_set::CaseSet;
use cvp_csse::case_table::CaseTable;
use cvp_csse::snapshot::SnapshotCache;
use cvp_db::Database;
use dioxus::prelude::*;
use wasm_bindgen::JsValue;

// Embedded gzipped fixtures produced by build.rs.
const CONFIRMED_GZ: &[u8] = include_bytes!(concat!(env!("OUT_DIR"), "/confirmed_global.csv.gz"));
const DEATHS_GZ: &[u8] = include_bytes!(concat!(env!("OUT_DIR"), "/deaths_global.csv.gz"));
const RECOVERED_GZ: &[u8] = include_bytes!(concat!(env!("OUT_DIR"), "/recovered_global.csv.gz"));
const REGIONAL_GZ: &[u8] = include_bytes!(concat!(env!("OUT_DIR"), "/regional.csv.gz"));

/// Region shown by default and used as the comparison principal.
const PRINCIPAL_COUNTRY: &str = "Chile";

/// Process-wide snapshot slot, passed into the load path by reference.
static SNAPSHOT: SnapshotCache = SnapshotCache::new();

fn main() {
    dioxus_logger::init(dioxus_logger::tracing::Level::INFO).expect("failed to init logger");
    dioxus::LaunchBuilder::new()
        .with_cfg(dioxus::web::Config::new().rootname("covid-panel-root"))
        .launch(App);
}

/// Parse the embedded snapshot (once) and load it into a fresh database.
fn load_data(cache: &SnapshotCache) -> anyhow::Result<Database> {
    let case_set: &CaseSet = cache.get_or_populate_with(|| -> anyhow::Result<CaseSet> {
        let confirmed = CaseTable::parse_csv(&inflate_fixture(CONFIRMED_GZ)?)?;
        let deaths = CaseTable::parse_csv(&inflate_fixture(DEATHS_GZ)?)?;
        let recovered = CaseTable::parse_csv(&inflate_fixture(RECOVERED_GZ)?)?;
        Ok(CaseSet::from_tables(confirmed, deaths, recovered)?)
    })?;

    let db = Database::new()?;
    db.load_case_set(case_set)?;
    // The regional table is optional; the Chile map reports its absence.
    match inflate_fixture(REGIONAL_GZ) {
        Ok(csv) if !csv.trim().is_empty() => db.load_regional_csv(&csv)?,
        _ => log::warn!("regional fixture is empty, Chile map will be unavailable"),
    }
    Ok(db)
}

#[component]
fn App() -> Element {
    let mut state = use_context_provider(AppState::new);

    // Load the embedded snapshot once on mount.
    use_effect(move || {
        web_sys::console::log_1(&JsValue::from_str("covid panel mounted"));
        match load_data(&SNAPSHOT) {
            Ok(db) => {
                match (db.query_countries(), db.query_dates()) {
                    (Ok(countries), Ok(dates)) => {
                        if countries.is_empty() || dates.is_empty() {
                            state
                                .error_msg
                                .set(Some("No case data available.".to_string()));
                            state.loading.set(false);
                            return;
                        }
                        let default_country = countries
                            .iter()
                            .find(|c| *c == PRINCIPAL_COUNTRY)
                            .or_else(|| countries.first())
                            .cloned()
                            .unwrap_or_default();
                        state.selected_country.set(default_country);
                        state.countries.set(countries);
                        state.dates.set(dates);
                    }
                    (Err(e), _) | (_, Err(e)) => {
                        state.error_msg.set(Some(format!("Snapshot load failed: {}", e)));
                        state.loading.set(false);
                        return;
                    }
                }
                state.db.set(Some(db));
                state.loading.set(false);
                js_bridge::init_charts();
            }
            Err(e) => {
                state
                    .error_msg
                    .set(Some(format!("Snapshot load failed: {}", e)));
                state.loading.set(false);
            }
        }
    });

    let section = (state.section)();

    rsx! {
        div {
            style: "display: flex; min-height: 100vh; font-family: system-ui, -apple-system, sans-serif;",

            SectionNav {}

            div {
                style: "flex: 1; max-width: 960px; padding: 16px;",
                h2 {
                    style: "margin: 0 0 12px 0;",
                    "COVID-19 case panel"
                }

                if let Some(err) = state.error_msg.read().as_ref() {
                    ErrorDisplay { message: err.clone() }
                }

                if *state.loading.read() {
                    LoadingSpinner {}
                } else if section == SECTION_WORLD {
                    sections::WorldSection {}
                } else if section == SECTION_CHILE {
                    sections::ChileSection {}
                } else if section == SECTION_COUNTRIES {
                    sections::CountriesSection {}
                }
            }
        }
    }
}
