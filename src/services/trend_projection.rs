use std::collections::BTreeMap;

use serde::Serialize;
use tracing::{debug, warn};

use crate::domain::history::HistoricalSample;
use crate::domain::scope::scope_label;
use crate::domain::trend::TrendLine;
use crate::services::present_value::PresentValue;
use crate::services::regression::trend_line_through;

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ProjectedSample {
    pub code: String,
    pub project_name: String,
    pub scope: String,
    pub start_year: i32,
    pub length_km: f64,
    pub cost_millions: f64,
    pub cost_at_present_year: f64,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct TrendProjection {
    pub present_year: i32,
    pub points: Vec<ProjectedSample>,
    pub trend_line: Option<TrendLine>,
    /// Indices into `points`, grouped by scope label.
    pub groups: BTreeMap<String, Vec<usize>>,
    pub skipped: usize,
}

/// Brings every usable sample to `present_year` money and fits a linear
/// trend of present cost against length.
///
/// Samples without a finite length and cost are left out of both the
/// points and the fit and counted in `skipped`. Samples of zero or negative
/// length stay as points but are left out of the fit; with fewer than two
/// positive-length samples there is no trend line.
pub fn project_trend(
    samples: &[HistoricalSample],
    present_year: i32,
    present_value: &PresentValue,
) -> TrendProjection {
    let mut points = Vec::with_capacity(samples.len());
    let mut groups: BTreeMap<String, Vec<usize>> = BTreeMap::new();
    let mut skipped = 0;

    for sample in samples {
        let Some((length_km, cost_millions)) = sample.usable_values() else {
            warn!(code = %sample.code, "skipping historical sample without usable length or cost");
            skipped += 1;
            continue;
        };

        let scope = scope_label(sample.scope.as_deref());
        groups.entry(scope.clone()).or_default().push(points.len());
        points.push(ProjectedSample {
            code: sample.code.clone(),
            project_name: sample.project_name.clone(),
            scope,
            start_year: sample.start_year,
            length_km,
            cost_millions,
            cost_at_present_year: present_value.present_value(
                cost_millions,
                sample.start_year,
                present_year,
            ),
        });
    }

    let trend_line = trend_line(&points);
    debug!(
        points = points.len(),
        skipped,
        has_trend = trend_line.is_some(),
        "projected historical samples"
    );

    TrendProjection {
        present_year,
        points,
        trend_line,
        groups,
        skipped,
    }
}

/// Only samples with a positive length take part in the fit.
fn trend_line(points: &[ProjectedSample]) -> Option<TrendLine> {
    let pairs: Vec<(f64, f64)> = points
        .iter()
        .filter(|point| point.length_km > 0.0)
        .map(|point| (point.length_km, point.cost_at_present_year))
        .collect();
    trend_line_through(&pairs)
}
