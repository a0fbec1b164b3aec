use serde::Serialize;
use tracing::{debug, warn};

use crate::domain::item::{
    ItemId, ItemTypeId, RequiredItem, cost_map_from_entries, sort_by_item_order,
};
use crate::domain::project::Project;
use crate::services::cost_tree::CostForest;

/// A project snapshot together with the items its phase requires.
#[derive(Debug, Clone, PartialEq)]
pub struct CostSheet {
    pub project: Project,
    pub required_items: Vec<RequiredItem>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct CostSheetRow {
    pub id: ItemId,
    pub item_type_id: ItemTypeId,
    pub description: String,
    pub is_parent: bool,
    pub value: f64,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct CostSheetReport {
    pub code: String,
    pub name: String,
    pub total_length_km: f64,
    pub total_cost: f64,
    pub cost_per_km: f64,
    pub items: Vec<CostSheetRow>,
}

/// Values every required item of the sheet; parents carry the sum of their
/// subtree. The total counts each leaf exactly once.
pub fn build_cost_sheet_report(sheet: &CostSheet) -> CostSheetReport {
    let costs = cost_map_from_entries(&sheet.project.cost_entries);
    let forest = CostForest::new(&sheet.required_items);
    let totals = forest.evaluate(&costs);

    let recorded = sheet.project.total_cost();
    if (recorded - totals.total).abs() > 1e-6 {
        warn!(
            code = %sheet.project.code,
            recorded,
            aggregated = totals.total,
            "cost entries do not match the leaves of the item tree"
        );
    }

    let mut ordered = sheet.required_items.clone();
    sort_by_item_order(&mut ordered);
    let items = ordered
        .iter()
        .map(|item| CostSheetRow {
            id: item.id,
            item_type_id: item.item_type_id,
            description: item.label(),
            is_parent: forest.is_parent(item.id),
            value: totals.value_of(item.id),
        })
        .collect();

    let total_length_km = sheet.project.total_length();
    let cost_per_km = if total_length_km > 0.0 {
        totals.total / total_length_km
    } else {
        0.0
    };
    debug!(code = %sheet.project.code, total = totals.total, "built cost sheet");

    CostSheetReport {
        code: sheet.project.code.clone(),
        name: sheet.project.name.clone(),
        total_length_km,
        total_cost: totals.total,
        cost_per_km,
        items,
    }
}
