//! Dependency graph over the items of a single batch
//!
//! Nodes are keyed by input position rather than temp id, since temp ids are
//! optional. Each item declares at most one parent, so the graph is an arena
//! of nodes carrying a parent pointer and a child list; all traversals are
//! iterative.

use std::collections::{HashMap, HashSet};

use super::item::BatchItem;

const CYCLE_ERROR: &str = "Cycle detected in item hierarchy";

/// A single item's place in the hierarchy declared by the batch.
#[derive(Debug)]
struct Node {
    /// Position of the parent item, where `parent_temp_id` resolved in-batch.
    parent: Option<usize>,
    children: Vec<usize>,
    /// Structural error that excludes this item from scheduling.
    error: Option<String>,
}

#[derive(Debug)]
pub(crate) struct DependencyGraph {
    nodes: Vec<Node>,
    /// First declaration of each temp id. Duplicated temp ids keep their
    /// first entry so children referencing them resolve to a known (failed)
    /// parent instead of reporting an unknown reference.
    temp_ids: HashMap<String, usize>,
}

impl DependencyGraph {
    /// Build the node arena and parent/child edges for one batch.
    ///
    /// Items declaring a duplicated temp id are failed here; items with a
    /// `parent_real_id` are treated as already-resolved roots and get no
    /// edge even when a `parent_temp_id` is also present.
    pub(crate) fn build(items: &[BatchItem]) -> Self {
        let mut temp_ids: HashMap<String, usize> = HashMap::new();
        let mut duplicates: HashSet<String> = HashSet::new();

        for (position, item) in items.iter().enumerate() {
            if let Some(temp_id) = &item.temp_id {
                if temp_ids.contains_key(temp_id) {
                    duplicates.insert(temp_id.clone());
                } else {
                    temp_ids.insert(temp_id.clone(), position);
                }
            }
        }

        let mut nodes: Vec<Node> = items
            .iter()
            .map(|item| {
                let error = item
                    .temp_id
                    .as_ref()
                    .filter(|temp_id| duplicates.contains(temp_id.as_str()))
                    .map(|temp_id| format!("Duplicate tempId '{}'", temp_id));
                Node {
                    parent: None,
                    children: Vec::new(),
                    error,
                }
            })
            .collect();

        for (position, item) in items.iter().enumerate() {
            if item.parent_real_id.is_some() {
                continue;
            }
            let Some(parent_temp_id) = &item.parent_temp_id else {
                continue;
            };
            if let Some(&parent) = temp_ids.get(parent_temp_id) {
                nodes[position].parent = Some(parent);
                nodes[parent].children.push(position);
            }
        }

        if !duplicates.is_empty() {
            log::warn!(
                "Batch declares {} duplicated temp id(s); declaring items rejected",
                duplicates.len()
            );
        }

        Self { nodes, temp_ids }
    }

    /// Fail every item participating in a reference cycle.
    ///
    /// Three-state walk (unvisited / in-progress / done) along parent
    /// pointers; reaching an in-progress node closes a cycle and every node
    /// from its first occurrence on the current path is on it. Runs before
    /// any external call is issued.
    pub(crate) fn detect_cycles(&mut self) {
        #[derive(Clone, Copy, PartialEq)]
        enum Mark {
            Unvisited,
            InProgress,
            Done,
        }

        let mut marks = vec![Mark::Unvisited; self.nodes.len()];

        for start in 0..self.nodes.len() {
            if marks[start] != Mark::Unvisited {
                continue;
            }
            let mut path: Vec<usize> = Vec::new();
            let mut current = start;
            loop {
                match marks[current] {
                    Mark::Done => break,
                    Mark::InProgress => {
                        // `current` is on the active path, so the slice from
                        // its first occurrence to the end is the cycle.
                        let entry = path.iter().position(|&p| p == current).unwrap_or(0);
                        for &member in &path[entry..] {
                            let node = &mut self.nodes[member];
                            if node.error.is_none() {
                                node.error = Some(CYCLE_ERROR.to_string());
                            }
                        }
                        log::warn!(
                            "Cycle in batch hierarchy: {} item(s) rejected",
                            path.len() - entry
                        );
                        break;
                    }
                    Mark::Unvisited => {
                        marks[current] = Mark::InProgress;
                        path.push(current);
                        match self.nodes[current].parent {
                            Some(parent) => current = parent,
                            None => break,
                        }
                    }
                }
            }
            for &visited in &path {
                marks[visited] = Mark::Done;
            }
        }
    }

    /// Fail every remaining item whose `parent_temp_id` names no item in the
    /// batch and which carries no `parent_real_id` fallback.
    ///
    /// Runs after cycle detection; a dangling reference is not a cycle.
    pub(crate) fn resolve_missing_references(&mut self, items: &[BatchItem]) {
        for (position, item) in items.iter().enumerate() {
            if self.nodes[position].error.is_some() || item.parent_real_id.is_some() {
                continue;
            }
            let Some(parent_temp_id) = &item.parent_temp_id else {
                continue;
            };
            if !self.temp_ids.contains_key(parent_temp_id) {
                log::warn!(
                    "Item {} references unknown parent temp id '{}'",
                    position,
                    parent_temp_id
                );
                self.nodes[position].error =
                    Some(format!("Unknown parentTempId '{}'", parent_temp_id));
            }
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }

    pub(crate) fn is_failed(&self, position: usize) -> bool {
        self.nodes[position].error.is_some()
    }

    pub(crate) fn parent(&self, position: usize) -> Option<usize> {
        self.nodes[position].parent
    }

    pub(crate) fn children(&self, position: usize) -> &[usize] {
        &self.nodes[position].children
    }

    /// Positions and messages of every structurally-failed item.
    pub(crate) fn structural_failures(&self) -> impl Iterator<Item = (usize, &str)> {
        self.nodes
            .iter()
            .enumerate()
            .filter_map(|(position, node)| node.error.as_deref().map(|error| (position, error)))
    }
}
