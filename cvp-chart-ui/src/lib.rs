//! Shared Dioxus components and D3.js bridge for the COVID case panel.
//!
//! This crate provides:
//! - `js_bridge`: Rust wrappers for D3.js chart functions via `js_sys::eval()`
//! - `state`: Reactive AppState with Dioxus Signals
//! - `components`: Reusable RSX components (navigation, selectors, slider,
//!   containers, etc.)
//! - `data`: gunzip helper for compressed embedded fixtures

pub mod components;
pub mod data;
pub mod dates;
pub mod js_bridge;
pub mod state;
