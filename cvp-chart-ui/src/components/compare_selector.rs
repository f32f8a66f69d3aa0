//! Multi-select for the comparison chart's country set.

use crate::state::AppState;
use dioxus::prelude::*;

/// Scrollable checkbox list for picking comparison countries.
///
/// Each checkbox toggles membership in `compare_countries`; the selection
/// order is preserved so the chart legend matches the picking order.
#[component]
pub fn CompareSelector() -> Element {
    let mut state = use_context::<AppState>();
    let countries = state.countries.read().clone();
    let selected = state.compare_countries.read().clone();

    rsx! {
        div {
            style: "margin: 8px 0;",
            p {
                style: "font-weight: bold; margin: 0 0 4px 0;",
                "Select countries to compare:"
            }
            div {
                style: "max-height: 160px; overflow-y: auto; border: 1px solid #E0E0E0; border-radius: 4px; padding: 4px 8px; max-width: 320px;",
                for country in countries.iter().cloned() {
                    label {
                        style: "display: block; font-size: 13px; padding: 1px 0; cursor: pointer;",
                        input {
                            r#type: "checkbox",
                            checked: selected.contains(&country),
                            onchange: {
                                let country = country.clone();
                                move |_| {
                                    let mut picked = state.compare_countries.read().clone();
                                    match picked.iter().position(|c| *c == country) {
                                        Some(idx) => {
                                            picked.remove(idx);
                                        }
                                        None => picked.push(country.clone()),
                                    }
                                    state.compare_countries.set(picked);
                                }
                            },
                        }
                        " {country}"
                    }
                }
            }
        }
    }
}
