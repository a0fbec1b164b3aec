/// A completed project used as a historical reference point.
/// Length or cost may be missing or unusable in the source data.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HistoricalSample {
    pub code: String,
    pub project_name: String,
    pub scope: Option<String>,
    pub length_km: Option<f64>,
    pub cost_millions: Option<f64>,
    pub start_year: i32,
}

impl HistoricalSample {
    /// Length and cost when both are present and finite.
    pub fn usable_values(&self) -> Option<(f64, f64)> {
        match (self.length_km, self.cost_millions) {
            (Some(length), Some(cost)) if length.is_finite() && cost.is_finite() => {
                Some((length, cost))
            }
            _ => None,
        }
    }
}
