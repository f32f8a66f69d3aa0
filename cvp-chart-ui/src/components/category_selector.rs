//! Dropdown selector for the map category.

use crate::state::AppState;
use cvp_csse::category::Category;
use dioxus::prelude::*;

/// Category dropdown driving the world map.
#[component]
pub fn CategorySelector() -> Element {
    let mut state = use_context::<AppState>();
    let selected = (state.map_category)();

    let on_change = move |evt: Event<FormData>| {
        state.map_category.set(evt.value());
    };

    rsx! {
        div {
            style: "margin: 8px 0;",
            label {
                r#for: "category-select",
                style: "font-weight: bold; margin-right: 8px;",
                "Category: "
            }
            select {
                id: "category-select",
                onchange: on_change,
                for category in Category::ALL {
                    option {
                        value: "{category.label()}",
                        selected: category.label() == selected,
                        "{category.label()}"
                    }
                }
            }
        }
    }
}
