use std::collections::BTreeMap;
use std::io;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::domain::scope::scope_label;
use crate::services::present_value::PresentValue;

const MILLION: f64 = 1e6;

#[derive(Error, Debug)]
pub enum CostPerKmError {
    #[error("failed to read cost rows: {0}")]
    Read(#[from] io::Error),
    #[error("failed to parse cost rows: {0}")]
    Parse(#[from] serde_yaml::Error),
}

/// One recorded item cost of a project, seen from one of its functional units.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct CostRow {
    pub item: String,
    #[serde(default)]
    pub scope: Option<String>,
    pub unit_length_km: f64,
    pub project_length_km: f64,
    pub value: f64,
    pub start_year: i32,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct CostPerKmStats {
    pub category: String,
    pub scope: String,
    pub mean_millions: f64,
    pub median_millions: f64,
    pub std_millions: f64,
    pub min_millions: f64,
    pub max_millions: f64,
    pub count: usize,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct HeatmapRow {
    pub category: String,
    /// Mean cost per km in millions for each scope; `None` where there is no data.
    pub values: BTreeMap<String, Option<f64>>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct CostPerKmSummary {
    pub present_year: i32,
    pub summary: Vec<CostPerKmStats>,
    pub categories: Vec<String>,
    pub scopes: Vec<String>,
    pub heatmap: Vec<HeatmapRow>,
    pub skipped: usize,
}

pub async fn load_cost_rows_from_yaml_file(path: &str) -> Result<Vec<CostRow>, CostPerKmError> {
    let contents = tokio::fs::read_to_string(path).await?;
    Ok(serde_yaml::from_str(&contents)?)
}

/// Present-value cost per km of every item, grouped by item and scope.
///
/// A project's item cost is shared among its functional units by length, so
/// each row contributes `pv(value) * unit_length / project_length / unit_length`.
pub fn summarize_cost_per_km(
    rows: &[CostRow],
    present_year: i32,
    present_value: &PresentValue,
) -> CostPerKmSummary {
    let mut grouped: BTreeMap<String, BTreeMap<String, Vec<f64>>> = BTreeMap::new();
    let mut skipped = 0;

    for row in rows {
        if !(row.unit_length_km.is_finite() && row.unit_length_km > 0.0)
            || !(row.value.is_finite() && row.value > 0.0)
        {
            warn!(item = %row.item, "skipping cost row without positive length or value");
            skipped += 1;
            continue;
        }

        let weight = if row.project_length_km > 0.0 {
            row.unit_length_km / row.project_length_km
        } else {
            0.0
        };
        let value = present_value.present_value(row.value, row.start_year, present_year);
        let cost_per_km = value * weight / row.unit_length_km;

        grouped
            .entry(row.item.clone())
            .or_default()
            .entry(scope_label(row.scope.as_deref()))
            .or_default()
            .push(cost_per_km);
    }

    let mut summary = Vec::new();
    let mut scopes: Vec<String> = Vec::new();
    for (category, by_scope) in &grouped {
        for (scope, values) in by_scope {
            if !scopes.contains(scope) {
                scopes.push(scope.clone());
            }
            summary.push(stats(category, scope, values));
        }
    }
    scopes.sort();

    let categories: Vec<String> = grouped.keys().cloned().collect();
    let heatmap = categories
        .iter()
        .map(|category| HeatmapRow {
            category: category.clone(),
            values: scopes
                .iter()
                .map(|scope| {
                    let mean = summary
                        .iter()
                        .find(|s| &s.category == category && &s.scope == scope)
                        .map(|s| s.mean_millions);
                    (scope.clone(), mean)
                })
                .collect(),
        })
        .collect();

    debug!(groups = summary.len(), skipped, "summarized cost per km");

    CostPerKmSummary {
        present_year,
        summary,
        categories,
        scopes,
        heatmap,
        skipped,
    }
}

fn stats(category: &str, scope: &str, values: &[f64]) -> CostPerKmStats {
    let count = values.len();
    let n = count as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let median = if count % 2 == 1 {
        sorted[count / 2]
    } else {
        (sorted[count / 2 - 1] + sorted[count / 2]) / 2.0
    };

    CostPerKmStats {
        category: category.to_string(),
        scope: scope.to_string(),
        mean_millions: mean / MILLION,
        median_millions: median / MILLION,
        std_millions: variance.sqrt() / MILLION,
        min_millions: sorted[0] / MILLION,
        max_millions: sorted[count - 1] / MILLION,
        count,
    }
}
