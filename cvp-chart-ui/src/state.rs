//! Application state managed via Dioxus context.
//!
//! `AppState` bundles all reactive signals into a single struct provided via
//! `use_context_provider`. Child components retrieve it with
//! `use_context::<AppState>()`. Every UI parameter lives here; the app has
//! no persisted state or config file.

use cvp_db::Database;
use dioxus::prelude::*;

/// Dashboard sections reachable from the sidebar.
pub const SECTION_WORLD: &str = "world";
pub const SECTION_CHILE: &str = "chile";
pub const SECTION_COUNTRIES: &str = "countries";

/// Shared application state for the case panel.
#[derive(Clone, Copy)]
pub struct AppState {
    /// Database instance (None until the snapshot is loaded)
    pub db: Signal<Option<Database>>,
    /// Whether the app is still loading
    pub loading: Signal<bool>,
    /// Error message if something went wrong
    pub error_msg: Signal<Option<String>>,
    /// Active sidebar section
    pub section: Signal<String>,
    /// Countries available in the snapshot, sorted
    pub countries: Signal<Vec<String>>,
    /// Snapshot date keys ("YYYYMMDD"), ascending
    pub dates: Signal<Vec<String>>,
    /// Country selected in the "Other countries" section
    pub selected_country: Signal<String>,
    /// Countries picked for the comparison chart
    pub compare_countries: Signal<Vec<String>>,
    /// Category label driving the world map
    pub map_category: Signal<String>,
    /// Day slider position (index into `dates`)
    pub day_index: Signal<usize>,
    /// Whether to reveal the underlying numeric table
    pub show_table: Signal<bool>,
}

impl AppState {
    /// Create a new AppState with default signal values.
    pub fn new() -> Self {
        Self {
            db: Signal::new(None),
            loading: Signal::new(true),
            error_msg: Signal::new(None),
            section: Signal::new(SECTION_WORLD.to_string()),
            countries: Signal::new(Vec::new()),
            dates: Signal::new(Vec::new()),
            selected_country: Signal::new(String::new()),
            compare_countries: Signal::new(Vec::new()),
            map_category: Signal::new("Confirmed".to_string()),
            day_index: Signal::new(0),
            show_table: Signal::new(false),
        }
    }
}
