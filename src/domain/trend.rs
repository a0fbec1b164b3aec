use serde::Serialize;

/// Fitted line drawn between the shortest and the longest sample.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct TrendLine {
    pub x: [f64; 2],
    pub y: [f64; 2],
    pub slope: f64,
    pub intercept: f64,
}
