//! Gantry core - data engines for the Gantry admin console.
//!
//! The console itself is a thin CRUD surface over the gateway's admin API;
//! this crate holds the two parts with actual behavior: the schema-driven
//! plugin-configuration engine and the dashboard's time-series aggregation
//! and chart geometry. Everything here is a pure transformation - no I/O,
//! no shared state - so the UI layer can call it on every keystroke.

pub mod dashboard;
pub mod schema;
