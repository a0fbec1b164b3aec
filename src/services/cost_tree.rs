use std::collections::HashMap;

use petgraph::Direction;
use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use tracing::warn;

use crate::domain::item::{CostMap, ItemId, RequiredItem};

/// Required items of a phase indexed as a forest (edges point parent -> child).
///
/// A node counts as a parent when it is flagged `has_children` or when some
/// other item names it as parent. Parents are worth the sum of their
/// children; leaves are worth their entry in the cost map, or zero.
pub struct CostForest {
    items: Vec<RequiredItem>,
    graph: DiGraph<usize, ()>,
    indices: HashMap<ItemId, NodeIndex>,
    roots: Vec<NodeIndex>,
}

/// Values of every item in a forest plus the project total.
#[derive(Debug, Clone, PartialEq)]
pub struct CostTotals {
    pub values: HashMap<ItemId, f64>,
    pub total: f64,
}

impl CostTotals {
    pub fn value_of(&self, id: ItemId) -> f64 {
        self.values.get(&id).copied().unwrap_or(0.0)
    }
}

impl CostForest {
    pub fn new(items: &[RequiredItem]) -> Self {
        let mut graph: DiGraph<usize, ()> = DiGraph::new();
        let mut indices: HashMap<ItemId, NodeIndex> = HashMap::new();

        for (position, item) in items.iter().enumerate() {
            let node = graph.add_node(position);
            if indices.insert(item.id, node).is_some() {
                warn!(item_id = item.id, "duplicate required item id, keeping the last one");
            }
        }

        let mut roots = Vec::new();
        for (position, item) in items.iter().enumerate() {
            let node = NodeIndex::new(position);
            if indices.get(&item.id) != Some(&node) {
                continue;
            }
            match item.parent_id {
                None => roots.push(node),
                Some(parent_id) => match indices.get(&parent_id) {
                    Some(parent) => {
                        graph.add_edge(*parent, node, ());
                    }
                    None => {
                        warn!(
                            item_id = item.id,
                            parent_id, "parent of required item not found, treating it as a root"
                        );
                        roots.push(node);
                    }
                },
            }
        }

        Self {
            items: items.to_vec(),
            graph,
            indices,
            roots,
        }
    }

    pub fn items(&self) -> &[RequiredItem] {
        &self.items
    }

    pub fn roots(&self) -> Vec<&RequiredItem> {
        self.roots.iter().map(|node| self.item_at(*node)).collect()
    }

    pub fn children_of(&self, id: ItemId) -> Vec<&RequiredItem> {
        let Some(node) = self.indices.get(&id) else {
            return Vec::new();
        };
        let mut children: Vec<NodeIndex> = self
            .graph
            .neighbors_directed(*node, Direction::Outgoing)
            .collect();
        children.sort();
        children.into_iter().map(|child| self.item_at(child)).collect()
    }

    pub fn is_parent(&self, id: ItemId) -> bool {
        self.indices
            .get(&id)
            .map(|node| self.node_is_parent(*node))
            .unwrap_or(false)
    }

    /// Items that hold direct cost entries.
    pub fn leaves(&self) -> Vec<&RequiredItem> {
        self.indices
            .values()
            .filter(|node| !self.node_is_parent(**node))
            .map(|node| self.item_at(*node))
            .collect()
    }

    pub fn value_of(&self, id: ItemId, costs: &CostMap) -> f64 {
        self.evaluate(costs).value_of(id)
    }

    /// Computes every node bottom-up. Strongly connected components come out
    /// of Tarjan's algorithm children first, so each parent sees finished
    /// child values. Items caught in a parent cycle are worth zero.
    pub fn evaluate(&self, costs: &CostMap) -> CostTotals {
        let mut by_node = vec![0.0_f64; self.graph.node_count()];

        for component in tarjan_scc(&self.graph) {
            let cyclic = component.len() > 1
                || component
                    .iter()
                    .any(|node| self.graph.contains_edge(*node, *node));
            if cyclic {
                let ids: Vec<ItemId> = component.iter().map(|node| self.item_at(*node).id).collect();
                warn!(?ids, "required items form a parent cycle, valuing them at zero");
                continue;
            }

            let node = component[0];
            by_node[node.index()] = if self.node_is_parent(node) {
                self.graph
                    .neighbors_directed(node, Direction::Outgoing)
                    .map(|child| by_node[child.index()])
                    .sum()
            } else {
                let item = self.item_at(node);
                costs.get(&item.item_type_id).copied().unwrap_or(0.0)
            };
        }

        let values = self
            .indices
            .iter()
            .map(|(id, node)| (*id, by_node[node.index()]))
            .collect();
        let total = self.roots.iter().map(|node| by_node[node.index()]).sum();

        CostTotals { values, total }
    }

    fn node_is_parent(&self, node: NodeIndex) -> bool {
        self.item_at(node).has_children
            || self
                .graph
                .neighbors_directed(node, Direction::Outgoing)
                .next()
                .is_some()
    }

    fn item_at(&self, node: NodeIndex) -> &RequiredItem {
        &self.items[self.graph[node]]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{child_item, leaf_item, parent_item};

    fn costs(pairs: &[(u32, f64)]) -> CostMap {
        pairs.iter().copied().collect()
    }

    #[test]
    fn parent_is_the_sum_of_its_leaves() {
        let items = vec![
            parent_item(1, 100, None),
            child_item(2, 10, 1),
            child_item(3, 11, 1),
        ];
        let forest = CostForest::new(&items);
        let totals = forest.evaluate(&costs(&[(10, 100.0), (11, 250.0)]));

        assert_eq!(totals.value_of(1), 350.0);
        assert_eq!(totals.total, 350.0);
    }

    #[test]
    fn empty_cost_map_values_everything_at_zero() {
        let items = vec![
            parent_item(1, 100, None),
            child_item(2, 10, 1),
            child_item(3, 11, 1),
            leaf_item(4, 12),
        ];
        let totals = CostForest::new(&items).evaluate(&CostMap::new());

        for item in &items {
            assert_eq!(totals.value_of(item.id), 0.0);
        }
        assert_eq!(totals.total, 0.0);
    }

    #[test]
    fn nested_parents_sum_through_every_level() {
        let items = vec![
            parent_item(1, 100, None),
            parent_item(2, 101, Some(1)),
            child_item(3, 10, 2),
            child_item(4, 11, 2),
            parent_item(5, 102, Some(2)),
            child_item(6, 12, 5),
            child_item(7, 13, 1),
            leaf_item(8, 14),
        ];
        let cost_map = costs(&[(10, 1.0), (11, 2.0), (12, 4.0), (13, 8.0), (14, 16.0)]);
        let forest = CostForest::new(&items);
        let totals = forest.evaluate(&cost_map);

        assert_eq!(totals.value_of(5), 4.0);
        assert_eq!(totals.value_of(2), 7.0);
        assert_eq!(totals.value_of(1), 15.0);
        assert_eq!(totals.total, 31.0);

        let leaf_sum: f64 = forest
            .leaves()
            .iter()
            .map(|leaf| cost_map.get(&leaf.item_type_id).copied().unwrap_or(0.0))
            .sum();
        assert_eq!(totals.total, leaf_sum);
    }

    #[test]
    fn parent_values_in_the_cost_map_are_ignored() {
        let items = vec![parent_item(1, 100, None), child_item(2, 10, 1)];
        let totals = CostForest::new(&items).evaluate(&costs(&[(100, 999.0), (10, 5.0)]));

        assert_eq!(totals.value_of(1), 5.0);
        assert_eq!(totals.total, 5.0);
    }

    #[test]
    fn flagged_parent_without_children_is_worth_zero() {
        let items = vec![parent_item(1, 100, None), leaf_item(2, 10)];
        let totals = CostForest::new(&items).evaluate(&costs(&[(100, 40.0), (10, 5.0)]));

        assert_eq!(totals.value_of(1), 0.0);
        assert_eq!(totals.total, 5.0);
    }

    #[test]
    fn unflagged_item_with_children_is_still_a_parent() {
        let items = vec![leaf_item(1, 100), child_item(2, 10, 1)];
        let forest = CostForest::new(&items);
        let totals = forest.evaluate(&costs(&[(100, 40.0), (10, 5.0)]));

        assert!(forest.is_parent(1));
        assert_eq!(totals.value_of(1), 5.0);
        assert_eq!(totals.total, 5.0);
    }

    #[test]
    fn unknown_parent_makes_the_item_a_root() {
        let items = vec![child_item(2, 10, 42)];
        let forest = CostForest::new(&items);
        let totals = forest.evaluate(&costs(&[(10, 7.0)]));

        assert_eq!(forest.roots().len(), 1);
        assert_eq!(totals.total, 7.0);
    }

    #[test]
    fn cycles_are_valued_at_zero_without_looping() {
        let items = vec![
            child_item(1, 10, 2),
            child_item(2, 11, 1),
            leaf_item(3, 12),
        ];
        let totals = CostForest::new(&items).evaluate(&costs(&[(10, 1.0), (11, 1.0), (12, 3.0)]));

        assert_eq!(totals.value_of(1), 0.0);
        assert_eq!(totals.value_of(2), 0.0);
        assert_eq!(totals.total, 3.0);
    }

    #[test]
    fn evaluation_is_idempotent() {
        let items = vec![
            parent_item(1, 100, None),
            child_item(2, 10, 1),
            child_item(3, 11, 1),
        ];
        let cost_map = costs(&[(10, 1.5), (11, 2.5)]);
        let forest = CostForest::new(&items);

        assert_eq!(forest.evaluate(&cost_map), forest.evaluate(&cost_map));
        assert_eq!(forest.value_of(1, &cost_map), forest.value_of(1, &cost_map));
    }

    #[test]
    fn children_are_listed_in_input_order() {
        let items = vec![
            parent_item(1, 100, None),
            child_item(3, 11, 1),
            child_item(2, 10, 1),
        ];
        let forest = CostForest::new(&items);
        let ids: Vec<ItemId> = forest.children_of(1).iter().map(|item| item.id).collect();
        assert_eq!(ids, vec![3, 2]);
    }
}
