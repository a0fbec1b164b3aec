use std::collections::HashMap;
use std::sync::Mutex;

use crate::domain::history::HistoricalSample;
use crate::domain::item::{ItemId, ItemTypeId, RequiredItem};
use crate::services::prediction_types::{ItemPrediction, PredictionQuery};
use crate::services::predictor::{Predictor, PredictorError};

// A mock Predictor answering fixed values per item type and recording every query
pub struct MockPredictor {
    values: HashMap<ItemTypeId, f64>,
    failing: Vec<ItemTypeId>,
    queried: Mutex<Vec<ItemTypeId>>,
}

impl MockPredictor {
    pub fn new(values: &[(ItemTypeId, f64)]) -> Self {
        Self {
            values: values.iter().copied().collect(),
            failing: Vec::new(),
            queried: Mutex::new(Vec::new()),
        }
    }

    pub fn failing_for(mut self, item_type_id: ItemTypeId) -> Self {
        self.failing.push(item_type_id);
        self
    }

    pub fn queried_item_types(&self) -> Vec<ItemTypeId> {
        self.queried.lock().unwrap().clone()
    }
}

impl Predictor for MockPredictor {
    async fn predict(&self, query: &PredictionQuery) -> Result<ItemPrediction, PredictorError> {
        self.queried.lock().unwrap().push(query.item_type_id);
        if self.failing.contains(&query.item_type_id) {
            return Err(PredictorError::NotFound);
        }
        Ok(prediction(
            self.values.get(&query.item_type_id).copied().unwrap_or(0.0),
            None,
        ))
    }
}

pub fn prediction(value: f64, confidence: Option<f64>) -> ItemPrediction {
    ItemPrediction {
        value,
        confidence,
        metrics: None,
    }
}

pub fn leaf_item(id: ItemId, item_type_id: ItemTypeId) -> RequiredItem {
    RequiredItem::new(id, item_type_id)
}

pub fn parent_item(id: ItemId, item_type_id: ItemTypeId, parent_id: Option<ItemId>) -> RequiredItem {
    RequiredItem {
        parent_id,
        has_children: true,
        ..RequiredItem::new(id, item_type_id)
    }
}

pub fn child_item(id: ItemId, item_type_id: ItemTypeId, parent_id: ItemId) -> RequiredItem {
    RequiredItem {
        parent_id: Some(parent_id),
        ..RequiredItem::new(id, item_type_id)
    }
}

pub fn sample(
    code: &str,
    scope: Option<&str>,
    length_km: Option<f64>,
    cost_millions: Option<f64>,
    start_year: i32,
) -> HistoricalSample {
    HistoricalSample {
        code: code.to_string(),
        project_name: format!("Proyecto {code}"),
        scope: scope.map(str::to_string),
        length_km,
        cost_millions,
        start_year,
    }
}
