use serde::{Deserialize, Serialize};

use crate::domain::scope::{Scope, Terrain, Zone};

/// One physical road segment of a project.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FunctionalUnit {
    #[serde(default)]
    pub id: Option<u32>,
    #[serde(default)]
    pub project_id: Option<u32>,
    pub number: u32,
    /// Missing lengths are a structural error for prediction.
    #[serde(default)]
    pub length_km: Option<f64>,
    #[serde(default)]
    pub vehicular_bridges: u32,
    #[serde(default)]
    pub vehicular_bridges_m2: f64,
    #[serde(default)]
    pub pedestrian_bridges: u32,
    #[serde(default)]
    pub pedestrian_bridges_m2: f64,
    #[serde(default)]
    pub tunnels: u32,
    #[serde(default)]
    pub tunnels_km: f64,
    #[serde(default)]
    pub scope: Option<Scope>,
    #[serde(default)]
    pub zone: Option<Zone>,
    #[serde(default)]
    pub terrain: Option<Terrain>,
}

impl FunctionalUnit {
    pub fn new(number: u32, length_km: f64) -> Self {
        Self {
            number,
            length_km: Some(length_km),
            ..Self::default()
        }
    }
}
