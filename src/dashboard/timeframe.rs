//! Dashboard timeframes.

use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The lookback windows the dashboard offers.
///
/// Each timeframe pairs a lookback duration with a fixed chart bucket width;
/// the pairing is a design table, not derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Timeframe {
    #[default]
    #[serde(rename = "1h")]
    OneHour,
    #[serde(rename = "6h")]
    SixHours,
    #[serde(rename = "12h")]
    TwelveHours,
    #[serde(rename = "24h")]
    Day,
    #[serde(rename = "7d")]
    Week,
}

/// Error returned for unrecognized timeframe names.
#[derive(Error, Debug, PartialEq)]
#[error("unknown timeframe: {0}")]
pub struct ParseTimeframeError(String);

impl Timeframe {
    /// All timeframes, in the order the dashboard lists them.
    pub const ALL: [Timeframe; 5] = [
        Timeframe::OneHour,
        Timeframe::SixHours,
        Timeframe::TwelveHours,
        Timeframe::Day,
        Timeframe::Week,
    ];

    /// How far back from `now` this timeframe looks.
    pub fn lookback(self) -> Duration {
        match self {
            Timeframe::OneHour => Duration::hours(1),
            Timeframe::SixHours => Duration::hours(6),
            Timeframe::TwelveHours => Duration::hours(12),
            Timeframe::Day => Duration::hours(24),
            Timeframe::Week => Duration::days(7),
        }
    }

    /// Width of one chart bucket.
    pub fn bucket_width(self) -> Duration {
        match self {
            Timeframe::OneHour => Duration::minutes(2),
            Timeframe::SixHours | Timeframe::TwelveHours => Duration::minutes(10),
            Timeframe::Day => Duration::minutes(20),
            Timeframe::Week => Duration::minutes(240),
        }
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Timeframe::OneHour => "1h",
            Timeframe::SixHours => "6h",
            Timeframe::TwelveHours => "12h",
            Timeframe::Day => "24h",
            Timeframe::Week => "7d",
        };
        f.write_str(name)
    }
}

impl FromStr for Timeframe {
    type Err = ParseTimeframeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1h" => Ok(Timeframe::OneHour),
            "6h" => Ok(Timeframe::SixHours),
            "12h" => Ok(Timeframe::TwelveHours),
            "24h" => Ok(Timeframe::Day),
            "7d" => Ok(Timeframe::Week),
            other => Err(ParseTimeframeError(other.to_string())),
        }
    }
}
