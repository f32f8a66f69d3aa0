//! Checkbox revealing the underlying numeric table.

use crate::state::AppState;
use dioxus::prelude::*;

#[component]
pub fn ShowDataCheckbox() -> Element {
    let mut state = use_context::<AppState>();
    let show = (state.show_table)();

    rsx! {
        label {
            style: "display: inline-flex; align-items: center; gap: 6px; font-size: 13px; margin: 8px 0; cursor: pointer;",
            input {
                r#type: "checkbox",
                checked: show,
                onchange: move |_| {
                    let current = (state.show_table)();
                    state.show_table.set(!current);
                },
            }
            "Show data"
        }
    }
}
