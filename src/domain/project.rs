use crate::domain::coord::Coordinate;
use crate::domain::functional_unit::FunctionalUnit;
use crate::domain::item::{CostEntry, PhaseId};

/// A highway project. Its total length and cost are always derived from the
/// functional units and cost entries it owns.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Project {
    pub id: Option<u32>,
    pub code: String,
    pub name: String,
    pub phase_id: PhaseId,
    pub location: Option<String>,
    pub start_year: Option<i32>,
    pub duration_months: Option<u32>,
    pub start_coord: Option<Coordinate>,
    pub end_coord: Option<Coordinate>,
    pub functional_units: Vec<FunctionalUnit>,
    pub cost_entries: Vec<CostEntry>,
}

impl Project {
    pub fn total_length(&self) -> f64 {
        self.functional_units
            .iter()
            .filter_map(|unit| unit.length_km)
            .sum()
    }

    pub fn total_cost(&self) -> f64 {
        self.cost_entries.iter().map(|entry| entry.value).sum()
    }
}
