//! In-memory SQLite database layer for COVID-19 case data.
//!
//! Loads a parsed case snapshot into an in-memory SQLite database and
//! exposes typed query methods for consumption by the Dioxus/D3.js
//! dashboard compiled to WASM.
//!
//! # Architecture
//!
//! - `Rc<RefCell<Connection>>` wrapper for interior mutability in
//!   single-threaded WASM
//! - In-memory SQLite via `rusqlite` (compiles to `wasm32-unknown-unknown`)
//! - Snapshot data embedded via `include_bytes!` at compile time in the
//!   dashboard crate and loaded on mount
//! - Typed query methods returning serializable structs for JSON export
//!   to D3.js
//!
//! # Tables
//!
//! See [`schema::create_schema`] for the full SQL schema.
//!
//! - `cases` - One row per (category, country, province, date) with the
//!   cumulative count; wide source tables are normalized on load
//! - `regions` - Latest per-region counts for the regional choropleth
//!
//! Aggregates (global series, per-country series, per-day map values) are
//! derived on-the-fly via SQL `GROUP BY` + `SUM(value)` queries.

pub mod schema;
mod loader;
pub mod models;
mod queries;

use rusqlite::Connection;
use std::cell::RefCell;
use std::rc::Rc;

/// In-memory SQLite database wrapping one case snapshot.
///
/// Cheaply cloneable (via `Rc`) and suitable for sharing across Dioxus
/// components in a single-threaded WASM environment.
#[derive(Clone)]
pub struct Database {
    conn: Rc<RefCell<Connection>>,
}

impl Database {
    /// Create a new in-memory database with the full schema applied.
    ///
    /// The database is empty after creation; use the `load_*` methods
    /// to populate it from a snapshot.
    pub fn new() -> anyhow::Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(schema::create_schema())?;
        Ok(Self {
            conn: Rc::new(RefCell::new(conn)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn database_creates_successfully() {
        assert!(Database::new().is_ok());
    }

    #[test]
    fn database_is_cloneable() {
        let db = Database::new().unwrap();
        let db2 = db.clone();
        db.load_regional_csv("code,name,cases\n13,Metropolitana,1554\n")
            .unwrap();
        let regions = db2.query_regions().unwrap();
        assert_eq!(regions.len(), 1, "Clone should see same data via shared Rc");
    }

    #[test]
    fn database_starts_empty() {
        let db = Database::new().unwrap();
        assert!(db.query_countries().unwrap().is_empty());
        assert!(db.query_regions().unwrap().is_empty());
    }
}
