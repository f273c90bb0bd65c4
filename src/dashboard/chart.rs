//! Chart geometry.
//!
//! Converts the success/error bucket series into SVG path strings. Pure
//! formatting - the browser only has to drop the paths into a `<path d=...>`.

use serde::Serialize;

use super::models::TimeBucket;

/// Pixel dimensions of the chart viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartDims {
    pub width: f64,
    pub height: f64,
}

impl Default for ChartDims {
    fn default() -> Self {
        Self {
            width: 600.0,
            height: 200.0,
        }
    }
}

/// Line and area paths for one rendered chart.
#[derive(Debug, Clone, Serialize)]
pub struct ChartPaths {
    pub success_line: String,
    pub success_area: String,
    pub error_line: String,
    pub error_area: String,
    pub max_y: f64,
}

/// Shared vertical scale for the success/error pair.
///
/// Floors at 1 so an all-empty window still has a usable scale instead of a
/// division by zero.
pub fn max_y(success: &[u64], error: &[u64]) -> f64 {
    let top = success.iter().chain(error).copied().max().unwrap_or(0);
    (top as f64).max(1.0)
}

/// Move-then-line path through every point of the series.
///
/// Empty input yields an empty string.
pub fn line_path(values: &[u64], max_y: f64, dims: ChartDims) -> String {
    let points = project(values, max_y, dims);
    let mut path = String::new();

    for (i, (x, y)) in points.iter().enumerate() {
        if i > 0 {
            path.push(' ');
        }
        let command = if i == 0 { 'M' } else { 'L' };
        path.push_str(&format!("{}{:.2},{:.2}", command, x, y));
    }

    path
}

/// Line path closed down to the baseline and back to the origin, forming a
/// fillable polygon.
pub fn area_path(values: &[u64], max_y: f64, dims: ChartDims) -> String {
    let points = project(values, max_y, dims);
    let Some((last_x, _)) = points.last() else {
        return String::new();
    };

    let mut path = line_path(values, max_y, dims);
    path.push_str(&format!(
        " L{:.2},{:.2} L{:.2},{:.2} Z",
        last_x, dims.height, 0.0, dims.height
    ));
    path
}

/// All four paths for a bucket series, on a shared scale.
pub fn chart_paths(buckets: &[TimeBucket], dims: ChartDims) -> ChartPaths {
    let success: Vec<u64> = buckets.iter().map(|b| b.success).collect();
    let error: Vec<u64> = buckets.iter().map(|b| b.error).collect();
    let scale = max_y(&success, &error);

    ChartPaths {
        success_line: line_path(&success, scale, dims),
        success_area: area_path(&success, scale, dims),
        error_line: line_path(&error, scale, dims),
        error_area: area_path(&error, scale, dims),
        max_y: scale,
    }
}

/// Map series values to pixel coordinates.
///
/// A single-point series has no horizontal extent, so x pins to 0; any
/// non-finite y is clamped to the baseline.
fn project(values: &[u64], max_y: f64, dims: ChartDims) -> Vec<(f64, f64)> {
    let n = values.len();

    values
        .iter()
        .enumerate()
        .map(|(i, &value)| {
            let x = if n <= 1 {
                0.0
            } else {
                i as f64 * dims.width / (n as f64 - 1.0)
            };
            let mut y = dims.height - (value as f64 / max_y) * dims.height;
            if !y.is_finite() {
                y = dims.height;
            }
            (x, y)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_max_y_floors_at_one() {
        assert_eq!(max_y(&[0, 0, 0], &[0, 0, 0]), 1.0);
        assert_eq!(max_y(&[], &[]), 1.0);
        assert_eq!(max_y(&[3, 7], &[2, 5]), 7.0);
    }

    #[test]
    fn test_empty_series_yields_empty_paths() {
        let dims = ChartDims::default();
        assert_eq!(line_path(&[], 1.0, dims), "");
        assert_eq!(area_path(&[], 1.0, dims), "");
    }

    #[test]
    fn test_all_zero_series_is_flat_at_baseline() {
        let dims = ChartDims::default();
        let path = line_path(&[0, 0, 0, 0, 0], max_y(&[0; 5], &[0; 5]), dims);

        assert_eq!(
            path,
            "M0.00,200.00 L150.00,200.00 L300.00,200.00 L450.00,200.00 L600.00,200.00"
        );
    }

    #[test]
    fn test_line_path_scaling() {
        let dims = ChartDims {
            width: 100.0,
            height: 100.0,
        };

        // max 4 => values 0/2/4 land at y = 100/50/0
        let path = line_path(&[0, 2, 4], 4.0, dims);
        assert_eq!(path, "M0.00,100.00 L50.00,50.00 L100.00,0.00");
    }

    #[test]
    fn test_single_point_pins_to_left_edge() {
        let dims = ChartDims {
            width: 100.0,
            height: 100.0,
        };

        assert_eq!(line_path(&[5], 5.0, dims), "M0.00,0.00");
    }

    #[test]
    fn test_area_path_closes_polygon() {
        let dims = ChartDims {
            width: 100.0,
            height: 100.0,
        };

        let path = area_path(&[1, 1], 1.0, dims);
        assert_eq!(path, "M0.00,0.00 L100.00,0.00 L100.00,100.00 L0.00,100.00 Z");
    }

    #[test]
    fn test_chart_paths_share_scale() {
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        let buckets = vec![
            TimeBucket {
                start: at,
                success: 8,
                error: 1,
            },
            TimeBucket {
                start: at,
                success: 2,
                error: 4,
            },
        ];

        let paths = chart_paths(&buckets, ChartDims::default());
        assert_eq!(paths.max_y, 8.0);
        assert!(paths.success_line.starts_with("M0.00,0.00"));
        assert!(!paths.error_area.is_empty());
        assert!(paths.error_area.ends_with('Z'));
    }
}
