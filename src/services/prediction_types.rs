use serde::{Deserialize, Serialize};

use crate::domain::functional_unit::FunctionalUnit;
use crate::domain::item::{ItemTypeId, PhaseId, RequiredItem};

/// Quality figures a trained model reports for one item (optionally per scope).
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct MetricSet {
    #[serde(default, alias = "alcance", skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub r2: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mae: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rmse: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mape: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub median_ae: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_error: Option<f64>,
}

/// Models trained per scope report a list; single models report one set.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum Metrics {
    PerScope(Vec<MetricSet>),
    Single(MetricSet),
}

/// What the predictor answers for one item of one functional unit.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct ItemPrediction {
    #[serde(alias = "causacion_estimada")]
    pub value: f64,
    #[serde(default, alias = "confianza")]
    pub confidence: Option<f64>,
    #[serde(default)]
    pub metrics: Option<Metrics>,
}

/// Body sent to the predictor for one item of one functional unit.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct PredictionQuery {
    pub project_name: String,
    pub phase_id: PhaseId,
    pub location: Option<String>,
    pub item_type_id: ItemTypeId,
    pub item: String,
    pub functional_unit: FunctionalUnit,
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct PredictionRequest {
    pub project_name: String,
    pub phase_id: PhaseId,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub functional_units: Vec<FunctionalUnit>,
    #[serde(default)]
    pub required_items: Vec<RequiredItem>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ItemEstimate {
    pub item: String,
    pub item_type_id: ItemTypeId,
    pub estimated_cost: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metrics: Option<Metrics>,
    pub predicted: bool,
    pub is_parent: bool,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct UnitPrediction {
    pub number: u32,
    pub length_km: f64,
    pub scope: Option<String>,
    pub estimated_cost: f64,
    pub cost_per_km: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_confidence: Option<f64>,
    pub items: Vec<ItemEstimate>,
}

#[derive(Serialize, Debug, Clone, Default, PartialEq)]
pub struct AssemblyMetadata {
    /// Set when the total length is zero and the per-km figure was forced to 0.
    pub zero_length: bool,
    pub predicted_items: usize,
    pub failed_items: usize,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct PredictionResult {
    pub project_name: String,
    pub phase_id: PhaseId,
    pub location: Option<String>,
    pub total_cost: f64,
    pub total_length_km: f64,
    pub cost_per_km: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_confidence: Option<f64>,
    pub functional_unit_count: usize,
    pub units: Vec<UnitPrediction>,
    pub metadata: AssemblyMetadata,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metrics_accept_a_single_set_or_a_list() {
        let single: Metrics = serde_json::from_str(r#"{"r2": 0.8, "mae": 12.5}"#).unwrap();
        assert_eq!(
            single,
            Metrics::Single(MetricSet {
                r2: Some(0.8),
                mae: Some(12.5),
                ..MetricSet::default()
            })
        );

        let list: Metrics =
            serde_json::from_str(r#"[{"alcance": "Nuevo", "r2": 0.5}, {"scope": "Mejoramiento"}]"#)
                .unwrap();
        match list {
            Metrics::PerScope(sets) => {
                assert_eq!(sets.len(), 2);
                assert_eq!(sets[0].scope.as_deref(), Some("Nuevo"));
                assert_eq!(sets[1].scope.as_deref(), Some("Mejoramiento"));
            }
            other => panic!("expected per-scope metrics, got {other:?}"),
        }
    }

    #[test]
    fn item_prediction_accepts_backend_field_names() {
        let prediction: ItemPrediction =
            serde_json::from_str(r#"{"causacion_estimada": 1500.0, "confianza": 0.75}"#).unwrap();
        assert_eq!(prediction.value, 1500.0);
        assert_eq!(prediction.confidence, Some(0.75));
        assert_eq!(prediction.metrics, None);
    }
}
