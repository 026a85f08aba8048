//! Creation-order scheduling
//!
//! A stable topological sort over the surviving items: every parent precedes
//! its declared children, and independent items order by ascending
//! `hierarchy_level` (absent levels sort as 0) with original input position
//! as the final tie-break, so equal inputs always produce the same order.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use super::graph::DependencyGraph;
use super::item::BatchItem;

/// Compute the order in which surviving items are sent to the capability.
///
/// Structurally-failed items are excluded, and edges from failed parents are
/// ignored for in-degree so their descendants still get scheduled; those
/// descendants later fail by registry miss rather than being dropped.
pub(crate) fn creation_order(graph: &DependencyGraph, items: &[BatchItem]) -> Vec<usize> {
    let mut in_degree = vec![0usize; graph.len()];
    for position in 0..graph.len() {
        if graph.is_failed(position) {
            continue;
        }
        if let Some(parent) = graph.parent(position) {
            if !graph.is_failed(parent) {
                in_degree[position] = 1;
            }
        }
    }

    let mut ready: BinaryHeap<Reverse<(u32, usize)>> = BinaryHeap::new();
    for position in 0..graph.len() {
        if !graph.is_failed(position) && in_degree[position] == 0 {
            ready.push(Reverse((level_of(items, position), position)));
        }
    }

    let mut order = Vec::with_capacity(graph.len());
    while let Some(Reverse((_, position))) = ready.pop() {
        order.push(position);
        for &child in graph.children(position) {
            if graph.is_failed(child) {
                continue;
            }
            in_degree[child] -= 1;
            if in_degree[child] == 0 {
                ready.push(Reverse((level_of(items, child), child)));
            }
        }
    }

    order
}

fn level_of(items: &[BatchItem], position: usize) -> u32 {
    items[position].hierarchy_level.unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::batch::item::BatchItem;
    use serde_json::json;

    fn task(name: &str) -> BatchItem {
        BatchItem::task(json!({"name": name}))
    }

    fn order_for(items: &[BatchItem]) -> Vec<usize> {
        let mut graph = DependencyGraph::build(items);
        graph.detect_cycles();
        graph.resolve_missing_references(items);
        creation_order(&graph, items)
    }

    #[test]
    fn test_parent_precedes_child_regardless_of_input_order() {
        let items = vec![
            task("Grandchild").with_parent_temp_id("p"),
            task("Parent").with_temp_id("p").with_parent_temp_id("gp"),
            task("Grandparent").with_temp_id("gp"),
        ];
        assert_eq!(order_for(&items), vec![2, 1, 0]);
    }

    #[test]
    fn test_independent_items_order_by_hierarchy_level() {
        let items = vec![
            task("Deep").at_level(3),
            task("Shallow").at_level(1),
            task("Unhinted"),
        ];
        // absent level sorts as 0
        assert_eq!(order_for(&items), vec![2, 1, 0]);
    }

    #[test]
    fn test_equal_levels_fall_back_to_input_order() {
        let items = vec![
            task("A").at_level(1),
            task("B").at_level(1),
            task("C"),
            task("D"),
        ];
        assert_eq!(order_for(&items), vec![2, 3, 0, 1]);
    }

    #[test]
    fn test_level_never_overrides_parent_edge() {
        let items = vec![
            // child claims a shallower level than its parent
            task("Child").with_parent_temp_id("p").at_level(0),
            task("Parent").with_temp_id("p").at_level(5),
        ];
        assert_eq!(order_for(&items), vec![1, 0]);
    }

    #[test]
    fn test_children_of_failed_parents_stay_scheduled() {
        let items = vec![
            task("A").with_temp_id("a").with_parent_temp_id("b"),
            task("B").with_temp_id("b").with_parent_temp_id("a"),
            task("Child").with_parent_temp_id("a"),
        ];
        // cycle members are excluded; their descendant still gets a slot
        assert_eq!(order_for(&items), vec![2]);
    }

    #[test]
    fn test_order_is_deterministic() {
        let items = vec![
            task("Root").with_temp_id("r").at_level(2),
            task("Leaf").with_parent_temp_id("r"),
            task("Other").at_level(1),
            task("Plain"),
        ];
        let first = order_for(&items);
        let second = order_for(&items);
        assert_eq!(first, second);
        assert_eq!(first, vec![3, 2, 0, 1]);
    }
}
