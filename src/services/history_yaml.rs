use std::io;

use serde::Deserialize;
use serde_yaml::Value;
use thiserror::Error;

use crate::domain::history::HistoricalSample;

#[derive(Error, Debug)]
pub enum HistoryYamlError {
    #[error("failed to read history file: {0}")]
    Read(#[from] io::Error),
    #[error("failed to parse history yaml: {0}")]
    Parse(#[from] serde_yaml::Error),
}

#[derive(Deserialize)]
struct SampleRecord {
    #[serde(alias = "codigo")]
    code: String,
    #[serde(default, alias = "nombre")]
    project_name: String,
    #[serde(default, alias = "alcance")]
    scope: Option<String>,
    #[serde(default, alias = "longitud_km")]
    length_km: Option<Value>,
    #[serde(default, alias = "costo_millones")]
    cost_millions: Option<Value>,
    #[serde(alias = "anio_inicio")]
    start_year: i32,
}

pub async fn load_history_from_yaml_file(
    path: &str,
) -> Result<Vec<HistoricalSample>, HistoryYamlError> {
    let contents = tokio::fs::read_to_string(path).await?;
    deserialize_history_from_yaml_str(&contents)
}

/// Numbers may arrive as YAML numbers or numeric strings; anything else is
/// kept as missing so the projection can skip and count it.
pub fn deserialize_history_from_yaml_str(
    input: &str,
) -> Result<Vec<HistoricalSample>, HistoryYamlError> {
    let records: Vec<SampleRecord> = serde_yaml::from_str(input)?;
    Ok(records
        .into_iter()
        .map(|record| HistoricalSample {
            code: record.code,
            project_name: record.project_name,
            scope: record.scope,
            length_km: record.length_km.as_ref().and_then(number_value),
            cost_millions: record.cost_millions.as_ref().and_then(number_value),
            start_year: record.start_year,
        })
        .collect())
}

fn number_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    }
}
