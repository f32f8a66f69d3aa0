//! Sidebar navigation between the three dashboard sections.

use crate::state::{AppState, SECTION_CHILE, SECTION_COUNTRIES, SECTION_WORLD};
use dioxus::prelude::*;

const SECTIONS: [(&str, &str); 3] = [
    (SECTION_WORLD, "World"),
    (SECTION_CHILE, "Chile"),
    (SECTION_COUNTRIES, "Other countries"),
];

/// Sidebar with one entry per analysis section.
#[component]
pub fn SectionNav() -> Element {
    let mut state = use_context::<AppState>();
    let active = (state.section)();

    rsx! {
        div {
            style: "min-width: 170px; padding: 12px; background: #FAFAFA; border-right: 1px solid #E0E0E0;",
            h3 {
                style: "margin: 0 0 8px 0; font-size: 14px;",
                "Navigation"
            }
            for (key, label) in SECTIONS {
                button {
                    style: if active == key {
                        "display: block; width: 100%; text-align: left; margin: 2px 0; padding: 6px 8px; border: none; border-radius: 4px; background: #1565C0; color: #fff; cursor: pointer;"
                    } else {
                        "display: block; width: 100%; text-align: left; margin: 2px 0; padding: 6px 8px; border: none; border-radius: 4px; background: transparent; cursor: pointer;"
                    },
                    onclick: move |_| state.section.set(key.to_string()),
                    "{label}"
                }
            }
            p {
                style: "font-size: 11px; color: #888; margin-top: 16px;",
                "Data source: JHU CSSE COVID-19 time series"
            }
        }
    }
}
