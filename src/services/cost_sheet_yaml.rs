use std::collections::HashSet;
use std::io;

use serde::Deserialize;
use thiserror::Error;

use crate::domain::coord::Coordinate;
use crate::domain::functional_unit::FunctionalUnit;
use crate::domain::item::{CostEntry, ItemId, PhaseId, RequiredItem};
use crate::domain::project::Project;
use crate::services::cost_sheet::CostSheet;

#[derive(Error, Debug)]
pub enum CostSheetYamlError {
    #[error("failed to read cost sheet yaml: {0}")]
    Read(#[from] io::Error),
    #[error("failed to parse cost sheet yaml: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("missing project code")]
    MissingProjectCode,
    #[error("duplicate required item id: {0}")]
    DuplicateItemId(ItemId),
    #[error("duplicate functional unit number: {0}")]
    DuplicateUnitNumber(u32),
}

#[derive(Deserialize)]
struct CostSheetRecord {
    project: ProjectRecord,
    #[serde(default)]
    functional_units: Vec<FunctionalUnit>,
    #[serde(default)]
    required_items: Vec<RequiredItem>,
    #[serde(default)]
    costs: Vec<CostEntry>,
}

#[derive(Deserialize)]
struct ProjectRecord {
    #[serde(default)]
    id: Option<u32>,
    code: String,
    name: String,
    #[serde(default)]
    phase_id: PhaseId,
    #[serde(default)]
    location: Option<String>,
    #[serde(default)]
    start_year: Option<i32>,
    #[serde(default)]
    duration_months: Option<u32>,
    #[serde(default)]
    start_coord: Option<Coordinate>,
    #[serde(default)]
    end_coord: Option<Coordinate>,
}

pub async fn load_cost_sheet_from_yaml_file(path: &str) -> Result<CostSheet, CostSheetYamlError> {
    let contents = tokio::fs::read_to_string(path).await?;
    deserialize_cost_sheet_from_yaml_str(&contents)
}

pub fn deserialize_cost_sheet_from_yaml_str(input: &str) -> Result<CostSheet, CostSheetYamlError> {
    let record: CostSheetRecord = serde_yaml::from_str(input)?;

    if record.project.code.trim().is_empty() {
        return Err(CostSheetYamlError::MissingProjectCode);
    }

    let mut item_ids = HashSet::new();
    for item in &record.required_items {
        if !item_ids.insert(item.id) {
            return Err(CostSheetYamlError::DuplicateItemId(item.id));
        }
    }

    let mut unit_numbers = HashSet::new();
    for unit in &record.functional_units {
        if !unit_numbers.insert(unit.number) {
            return Err(CostSheetYamlError::DuplicateUnitNumber(unit.number));
        }
    }

    let project = Project {
        id: record.project.id,
        code: record.project.code,
        name: record.project.name,
        phase_id: record.project.phase_id,
        location: record.project.location,
        start_year: record.project.start_year,
        duration_months: record.project.duration_months,
        start_coord: record.project.start_coord,
        end_coord: record.project.end_coord,
        functional_units: record.functional_units,
        cost_entries: record.costs,
    };

    Ok(CostSheet {
        project,
        required_items: record.required_items,
    })
}
