//! Dashboard model types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One request-activity row from the gateway's admin API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityRecord {
    pub id: String,
    pub status_code: i32,
    pub service_id: String,
    pub route_id: Option<String>,
    pub consumer_id: String,
    pub created_at: DateTime<Utc>,
}

impl ActivityRecord {
    /// 4xx and 5xx responses count against the error series.
    pub fn is_error(&self) -> bool {
        self.status_code >= 400
    }
}

/// Success/error counts for one fixed-width time slot.
///
/// Derived on every aggregation pass, never stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeBucket {
    pub start: DateTime<Utc>,
    pub success: u64,
    pub error: u64,
}

/// Scalar statistics over the records inside the timeframe window.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActivitySummary {
    pub total_requests: u64,
    pub error_requests: u64,
    /// Percentage, 0 when there were no requests at all.
    pub avg_error_rate: f64,
    pub total_consumers: u64,
    pub total_services: u64,
}

/// Everything the dashboard needs for one timeframe render.
#[derive(Debug, Clone, Serialize)]
pub struct ActivityOverview {
    pub buckets: Vec<TimeBucket>,
    pub summary: ActivitySummary,
}
