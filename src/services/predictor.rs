use thiserror::Error;

use crate::services::prediction_types::{ItemPrediction, PredictionQuery};

#[derive(Error, Debug)]
pub enum PredictorError {
    #[error("predictor model not found")]
    NotFound,
    #[error("connection error")]
    Connection,
    #[error("predictor request timed out")]
    Timeout,
    #[error("parse error")]
    Parse,
    #[error("unauthorized")]
    Unauthorized,
    #[error("{0}")]
    Other(String),
}

/// Describes an interface for obtaining the estimated cost of one item of one
/// functional unit. Implementations are opaque to the assembler.
pub trait Predictor {
    async fn predict(&self, query: &PredictionQuery) -> Result<ItemPrediction, PredictorError>;
}
