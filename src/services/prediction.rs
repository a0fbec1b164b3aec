use std::collections::HashMap;

use futures::future::join_all;
use thiserror::Error;
use tracing::{debug, warn};

use crate::domain::functional_unit::FunctionalUnit;
use crate::domain::item::{CostMap, ItemTypeId, RequiredItem, sort_by_item_order};
use crate::services::cost_tree::CostForest;
use crate::services::prediction_types::{
    AssemblyMetadata, ItemEstimate, ItemPrediction, PredictionQuery, PredictionRequest,
    PredictionResult, UnitPrediction,
};
use crate::services::predictor::{Predictor, PredictorError};

#[derive(Error, Debug)]
pub enum PredictionError {
    #[error("at least one functional unit is required")]
    NoFunctionalUnits,
    #[error("the phase has no required items")]
    NoRequiredItems,
    #[error("functional unit {0} has no length")]
    MissingLength(u32),
    #[error("functional unit {unit} has an invalid length: {length}")]
    InvalidLength { unit: u32, length: f64 },
}

/// Predictor answers for one functional unit, keyed by item type.
pub type UnitOutcomes = HashMap<ItemTypeId, Result<ItemPrediction, PredictorError>>;

/// Queries the predictor for every leaf item of every functional unit and
/// assembles the answers. Calls for one unit run concurrently; a failed call
/// only zeroes its own item.
pub async fn predict_project<P: Predictor>(
    predictor: &P,
    request: &PredictionRequest,
) -> Result<PredictionResult, PredictionError> {
    validate_request(request)?;

    let items = ordered_items(&request.required_items);
    let forest = CostForest::new(&items);
    let leaves = predictable_items(&forest);

    let mut outcomes = Vec::with_capacity(request.functional_units.len());
    for unit in &request.functional_units {
        let queries: Vec<PredictionQuery> = leaves
            .iter()
            .map(|item| build_query(request, unit, item))
            .collect();
        debug!(unit = unit.number, items = queries.len(), "requesting item predictions");

        let answers = join_all(queries.iter().map(|query| predictor.predict(query))).await;
        let unit_outcomes: UnitOutcomes = queries
            .iter()
            .map(|query| query.item_type_id)
            .zip(answers)
            .collect();
        outcomes.push(unit_outcomes);
    }

    assemble(request, &outcomes)
}

/// Merges predictor answers (one map per functional unit, in request order)
/// with the structure of the request.
///
/// Parent items are shown with the sum of their children but never counted
/// in a total. Missing or failed answers count as zero with `predicted: false`.
pub fn assemble(
    request: &PredictionRequest,
    outcomes: &[UnitOutcomes],
) -> Result<PredictionResult, PredictionError> {
    validate_request(request)?;

    let items = ordered_items(&request.required_items);
    let forest = CostForest::new(&items);
    let empty = UnitOutcomes::new();

    let mut metadata = AssemblyMetadata::default();
    let mut units = Vec::with_capacity(request.functional_units.len());
    let mut all_confidences = Vec::new();
    let mut total_cost = 0.0;
    let mut total_length = 0.0;

    for (position, unit) in request.functional_units.iter().enumerate() {
        let unit_outcomes = outcomes.get(position).unwrap_or(&empty);
        let length = unit.length_km.unwrap_or(0.0);

        let mut cost_map = CostMap::new();
        for item in forest.items() {
            if forest.is_parent(item.id) {
                continue;
            }
            match unit_outcomes.get(&item.item_type_id) {
                Some(Ok(prediction)) => {
                    cost_map.insert(item.item_type_id, prediction.value);
                }
                Some(Err(e)) => warn!(
                    unit = unit.number,
                    item_type_id = item.item_type_id,
                    error = %e,
                    "prediction failed, counting item as zero"
                ),
                None => warn!(
                    unit = unit.number,
                    item_type_id = item.item_type_id,
                    "no prediction for item, counting it as zero"
                ),
            }
        }
        let values = forest.evaluate(&cost_map);

        let mut rows = Vec::with_capacity(items.len());
        let mut unit_confidences = Vec::new();
        for item in forest.items() {
            let is_parent = forest.is_parent(item.id);
            let prediction = if is_parent {
                None
            } else {
                unit_outcomes
                    .get(&item.item_type_id)
                    .and_then(|outcome| outcome.as_ref().ok())
            };
            if !is_parent {
                if prediction.is_some() {
                    metadata.predicted_items += 1;
                } else {
                    metadata.failed_items += 1;
                }
            }
            let confidence = prediction.and_then(|p| p.confidence);
            if let Some(confidence) = confidence {
                unit_confidences.push(confidence);
            }
            rows.push(ItemEstimate {
                item: item.label(),
                item_type_id: item.item_type_id,
                estimated_cost: values.value_of(item.id),
                confidence,
                metrics: prediction.and_then(|p| p.metrics.clone()),
                predicted: prediction.is_some(),
                is_parent,
            });
        }

        let estimated_cost = sum_of_leaves(&rows);
        total_cost += estimated_cost;
        total_length += length;

        units.push(UnitPrediction {
            number: unit.number,
            length_km: length,
            scope: unit.scope.as_ref().map(|scope| scope.to_string()),
            estimated_cost,
            cost_per_km: per_km(estimated_cost, length),
            average_confidence: mean(&unit_confidences),
            items: rows,
        });
        all_confidences.extend(unit_confidences);
    }

    metadata.zero_length = total_length == 0.0;
    if metadata.zero_length {
        warn!(project = %request.project_name, "total length is zero, reporting cost per km as 0");
    }

    Ok(PredictionResult {
        project_name: request.project_name.clone(),
        phase_id: request.phase_id,
        location: request.location.clone(),
        total_cost,
        total_length_km: total_length,
        cost_per_km: per_km(total_cost, total_length),
        average_confidence: mean(&all_confidences),
        functional_unit_count: units.len(),
        units,
        metadata,
    })
}

pub fn validate_request(request: &PredictionRequest) -> Result<(), PredictionError> {
    if request.functional_units.is_empty() {
        return Err(PredictionError::NoFunctionalUnits);
    }
    if request.required_items.is_empty() {
        return Err(PredictionError::NoRequiredItems);
    }
    for unit in &request.functional_units {
        let length = unit
            .length_km
            .ok_or(PredictionError::MissingLength(unit.number))?;
        if !length.is_finite() || length < 0.0 {
            return Err(PredictionError::InvalidLength {
                unit: unit.number,
                length,
            });
        }
    }
    Ok(())
}

/// Sum of every non-parent estimate; parents already contain their children.
pub fn sum_of_leaves(rows: &[ItemEstimate]) -> f64 {
    rows.iter()
        .filter(|row| !row.is_parent)
        .map(|row| row.estimated_cost)
        .sum()
}

fn per_km(cost: f64, length: f64) -> f64 {
    if length > 0.0 { cost / length } else { 0.0 }
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

fn ordered_items(items: &[RequiredItem]) -> Vec<RequiredItem> {
    let mut ordered = items.to_vec();
    sort_by_item_order(&mut ordered);
    ordered
}

/// One item per item type among the leaves, in display order.
fn predictable_items(forest: &CostForest) -> Vec<&RequiredItem> {
    let mut seen = std::collections::HashSet::new();
    forest
        .items()
        .iter()
        .filter(|item| !forest.is_parent(item.id))
        .filter(|item| seen.insert(item.item_type_id))
        .collect()
}

fn build_query(
    request: &PredictionRequest,
    unit: &FunctionalUnit,
    item: &RequiredItem,
) -> PredictionQuery {
    PredictionQuery {
        project_name: request.project_name.clone(),
        phase_id: request.phase_id,
        location: request.location.clone(),
        item_type_id: item.item_type_id,
        item: item.label(),
        functional_unit: unit.clone(),
    }
}
