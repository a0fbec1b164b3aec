use std::collections::HashMap;

use serde::{Deserialize, Serialize};

pub type ItemId = u32;
pub type ItemTypeId = u32;
pub type PhaseId = u32;

/// Leaf values keyed by item type, as entered by a user or returned by the predictor.
pub type CostMap = HashMap<ItemTypeId, f64>;

/// Catalog entry for a cost category ("Estructuras", "Geología", ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemType {
    pub id: ItemTypeId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// An item a phase requires. Items with a `parent_id` hang below another
/// required item of the same phase; together they form a forest.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RequiredItem {
    pub id: ItemId,
    #[serde(default)]
    pub phase_id: PhaseId,
    pub item_type_id: ItemTypeId,
    #[serde(default)]
    pub parent_id: Option<ItemId>,
    #[serde(default)]
    pub has_children: bool,
    #[serde(default)]
    pub mandatory: bool,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub computed_value: Option<f64>,
}

impl RequiredItem {
    pub fn new(id: ItemId, item_type_id: ItemTypeId) -> Self {
        Self {
            id,
            item_type_id,
            ..Self::default()
        }
    }

    pub fn label(&self) -> String {
        self.description
            .clone()
            .unwrap_or_else(|| format!("Item {}", self.item_type_id))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostEntry {
    pub item_type_id: ItemTypeId,
    pub value: f64,
}

/// Later entries for the same item type replace earlier ones.
pub fn cost_map_from_entries(entries: &[CostEntry]) -> CostMap {
    entries
        .iter()
        .map(|entry| (entry.item_type_id, entry.value))
        .collect()
}

/// Numeric order taken from the leading number of a description:
/// `"2.3 - SEGURIDAD VIAL"` orders as 2.3. Descriptions without a number sort last.
pub fn item_order(description: Option<&str>) -> f64 {
    const UNORDERED: f64 = 9999.0;
    let Some(text) = description.map(str::trim) else {
        return UNORDERED;
    };
    let digits = |s: &str| s.bytes().take_while(u8::is_ascii_digit).count();

    let integer = digits(text);
    if integer == 0 {
        return UNORDERED;
    }
    let mut end = integer;
    if text[end..].starts_with('.') {
        let fraction = digits(&text[end + 1..]);
        if fraction > 0 {
            end += 1 + fraction;
        }
    }
    text[..end].parse::<f64>().unwrap_or(UNORDERED)
}

/// Stable sort of required items by [`item_order`].
pub fn sort_by_item_order(items: &mut [RequiredItem]) {
    items.sort_by(|a, b| {
        item_order(a.description.as_deref()).total_cmp(&item_order(b.description.as_deref()))
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_order_reads_leading_number() {
        assert_eq!(item_order(Some("1 - TRANSPORTE")), 1.0);
        assert_eq!(item_order(Some("2.3 - SEGURIDAD VIAL")), 2.3);
        assert_eq!(item_order(Some("  16 - DIRECCIÓN")), 16.0);
        assert_eq!(item_order(Some("Sin número")), 9999.0);
        assert_eq!(item_order(None), 9999.0);
    }

    #[test]
    fn sort_by_item_order_keeps_unnumbered_items_last() {
        let mut items = vec![
            RequiredItem {
                description: Some("Otros".into()),
                ..RequiredItem::new(1, 10)
            },
            RequiredItem {
                description: Some("3 - GEOLOGÍA".into()),
                ..RequiredItem::new(2, 11)
            },
            RequiredItem {
                description: Some("2.1 - TRAZADO".into()),
                ..RequiredItem::new(3, 12)
            },
        ];

        sort_by_item_order(&mut items);

        let ids: Vec<ItemId> = items.iter().map(|item| item.id).collect();
        assert_eq!(ids, vec![3, 2, 1]);
    }

    #[test]
    fn cost_map_keeps_last_entry_per_item_type() {
        let entries = vec![
            CostEntry { item_type_id: 10, value: 1.0 },
            CostEntry { item_type_id: 11, value: 2.0 },
            CostEntry { item_type_id: 10, value: 3.0 },
        ];
        let map = cost_map_from_entries(&entries);
        assert_eq!(map.get(&10), Some(&3.0));
        assert_eq!(map.get(&11), Some(&2.0));
    }
}
