use thiserror::Error;

use crate::domain::item::RequiredItem;

#[derive(Error, Debug)]
pub enum RequiredItemsJsonError {
    #[error("failed to encode required items: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("failed to decode required items: {0}")]
    Decode(#[source] serde_json::Error),
}

/// JSON array of required items as exchanged with the REST backend.
pub fn encode_required_items_json(items: &[RequiredItem]) -> Result<String, RequiredItemsJsonError> {
    serde_json::to_string(items).map_err(RequiredItemsJsonError::Encode)
}

pub fn decode_required_items_json(input: &str) -> Result<Vec<RequiredItem>, RequiredItemsJsonError> {
    serde_json::from_str(input).map_err(RequiredItemsJsonError::Decode)
}
