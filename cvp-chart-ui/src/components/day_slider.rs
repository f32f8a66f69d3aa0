//! Day slider over the snapshot's reporting dates.

use crate::dates::format_date_key;
use crate::state::AppState;
use dioxus::prelude::*;

/// Range slider selecting the snapshot day shown on the map.
///
/// The slider position is an index into the shared ascending date list;
/// the label echoes the selected calendar date.
#[component]
pub fn DaySlider() -> Element {
    let mut state = use_context::<AppState>();
    let dates = state.dates.read().clone();
    if dates.is_empty() {
        return rsx! {};
    }

    let index = (state.day_index)().min(dates.len() - 1);
    let max = dates.len() - 1;
    let first = format_date_key(&dates[0]);
    let current = format_date_key(&dates[index]);

    let on_input = move |evt: Event<FormData>| {
        if let Ok(value) = evt.value().parse::<usize>() {
            state.day_index.set(value.min(max));
        }
    };

    rsx! {
        div {
            style: "margin: 8px 0;",
            label {
                r#for: "day-slider",
                style: "font-weight: bold; margin-right: 8px;",
                "Days since the start of the pandemic ({first}): "
            }
            input {
                id: "day-slider",
                r#type: "range",
                min: "0",
                max: "{max}",
                step: "1",
                value: "{index}",
                style: "width: 300px; vertical-align: middle;",
                oninput: on_input,
            }
            span {
                style: "margin-left: 8px; font-size: 13px; color: #444;",
                "{current}"
            }
        }
    }
}
