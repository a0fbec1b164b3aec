use std::io;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::domain::item::ItemTypeId;
use crate::domain::scope::scope_label;
use crate::domain::trend::TrendLine;
use crate::services::present_value::PresentValue;
use crate::services::regression::trend_line_through;

const MILLION: f64 = 1e6;

#[derive(Error, Debug)]
pub enum ItemComparisonError {
    #[error("failed to read item cost rows: {0}")]
    Read(#[from] io::Error),
    #[error("failed to parse item cost rows: {0}")]
    Parse(#[from] serde_yaml::Error),
}

/// Recorded cost of one item type in a past project, seen from one of its
/// functional units.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct ItemCostRow {
    pub item_type_id: ItemTypeId,
    pub code: String,
    #[serde(default)]
    pub project_name: String,
    pub start_year: i32,
    #[serde(default)]
    pub phase: Option<String>,
    #[serde(default)]
    pub scope: Option<String>,
    pub length_km: f64,
    pub value: f64,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ComparedUnit {
    pub code: String,
    pub project_name: String,
    pub start_year: i32,
    pub phase: Option<String>,
    pub scope: String,
    pub length_km: f64,
    pub present_value: f64,
    pub cost_millions: f64,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ItemComparison {
    pub item_type_id: ItemTypeId,
    pub present_year: i32,
    pub units: Vec<ComparedUnit>,
    pub trend_line: Option<TrendLine>,
    pub skipped: usize,
}

pub async fn load_item_cost_rows_from_yaml_file(
    path: &str,
) -> Result<Vec<ItemCostRow>, ItemComparisonError> {
    let contents = tokio::fs::read_to_string(path).await?;
    Ok(serde_yaml::from_str(&contents)?)
}

/// History of one item type: every functional unit carrying a positive cost
/// for it, brought to `present_year` money in millions, plus a trend of cost
/// against unit length.
///
/// Rows of other item types are ignored. Rows without a positive length or
/// value are counted in `skipped`. The trend needs two units with a positive
/// present cost.
pub fn compare_item(
    rows: &[ItemCostRow],
    item_type_id: ItemTypeId,
    present_year: i32,
    present_value: &PresentValue,
) -> ItemComparison {
    let mut units = Vec::new();
    let mut skipped = 0;

    for row in rows.iter().filter(|row| row.item_type_id == item_type_id) {
        if !(row.length_km.is_finite() && row.length_km > 0.0)
            || !(row.value.is_finite() && row.value > 0.0)
        {
            warn!(code = %row.code, item_type_id, "skipping item cost row without positive length or value");
            skipped += 1;
            continue;
        }

        let value = present_value.present_value(row.value, row.start_year, present_year);
        units.push(ComparedUnit {
            code: row.code.clone(),
            project_name: row.project_name.clone(),
            start_year: row.start_year,
            phase: row.phase.clone(),
            scope: scope_label(row.scope.as_deref()),
            length_km: row.length_km,
            present_value: value,
            cost_millions: value / MILLION,
        });
    }

    let pairs: Vec<(f64, f64)> = units
        .iter()
        .filter(|unit| unit.cost_millions > 0.0)
        .map(|unit| (unit.length_km, unit.cost_millions))
        .collect();
    let trend_line = trend_line_through(&pairs);
    debug!(item_type_id, units = units.len(), skipped, "compared item history");

    ItemComparison {
        item_type_id,
        present_year,
        units,
        trend_line,
        skipped,
    }
}
