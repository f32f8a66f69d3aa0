//! Reusable Dioxus RSX components for the case panel.

mod category_selector;
mod chart_container;
mod chart_header;
mod compare_selector;
mod country_selector;
mod day_slider;
mod error_display;
mod loading_spinner;
mod section_nav;
mod show_data_checkbox;

pub use category_selector::CategorySelector;
pub use chart_container::ChartContainer;
pub use chart_header::ChartHeader;
pub use compare_selector::CompareSelector;
pub use country_selector::CountrySelector;
pub use day_slider::DaySlider;
pub use error_display::ErrorDisplay;
pub use loading_spinner::LoadingSpinner;
pub use section_nav::SectionNav;
pub use show_data_checkbox::ShowDataCheckbox;
