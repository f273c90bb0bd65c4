//! Dashboard aggregation module.
//!
//! Turns the workspace's raw request-activity feed into the per-bucket
//! series, summary statistics, and chart paths the dashboard renders.

mod aggregate;
mod chart;
mod models;
mod timeframe;

pub use aggregate::*;
pub use chart::*;
pub use models::*;
pub use timeframe::*;
