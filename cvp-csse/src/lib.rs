pub mod case_set;
pub mod case_table;
pub mod category;
#[cfg(feature = "api")]
pub mod client;
pub mod snapshot;
