//! Batch collection and the sequential creation driver

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::api::capability::{CreateResponse, EntityCreator};

use super::graph::DependencyGraph;
use super::item::{BatchItem, ItemKind};
use super::outcome::{BatchResult, ItemOutcome};
use super::registry::TempIdRegistry;
use super::schedule::creation_order;

const PARENT_FAILED_ERROR: &str = "Parent item failed to create";
const UNKNOWN_ERROR: &str = "Unknown error";

/// An ordered collection of items to create together.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Batch {
    items: Vec<BatchItem>,
}

impl Batch {
    /// Create a new empty batch
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Create a batch from a vector of items
    pub fn from_items(items: Vec<BatchItem>) -> Self {
        Self { items }
    }

    /// Add a single item to the batch
    pub fn add(mut self, item: BatchItem) -> Self {
        self.items.push(item);
        self
    }

    /// Add a task creation item
    pub fn task(mut self, fields: Value) -> Self {
        self.items.push(BatchItem::task(fields));
        self
    }

    /// Add a project creation item
    pub fn project(mut self, fields: Value) -> Self {
        self.items.push(BatchItem::project(fields));
        self
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[BatchItem] {
        &self.items
    }

    /// Attempt every item against the supplied capability and report one
    /// outcome per item in input order.
    pub async fn execute(&self, creator: &dyn EntityCreator) -> BatchResult {
        batch_create(creator, &self.items).await
    }
}

impl From<BatchItem> for Batch {
    fn from(item: BatchItem) -> Self {
        Self::from_items(vec![item])
    }
}

impl From<Vec<BatchItem>> for Batch {
    fn from(items: Vec<BatchItem>) -> Self {
        Self::from_items(items)
    }
}

impl IntoIterator for Batch {
    type Item = BatchItem;
    type IntoIter = std::vec::IntoIter<BatchItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a Batch {
    type Item = &'a BatchItem;
    type IntoIter = std::slice::Iter<'a, BatchItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Create every item of a batch, parents before children.
///
/// Cyclic, duplicated and dangling references are rejected up front and never
/// reach the capability; the rest are attempted strictly in creation order,
/// one at a time, threading each assigned real id to the item's children. A
/// failure never aborts the batch: it only leaves the item's temp id
/// unregistered, which surfaces as a named dependent failure on each child.
/// The returned outcomes always match the input list one-to-one and in order.
pub async fn batch_create(creator: &dyn EntityCreator, items: &[BatchItem]) -> BatchResult {
    if items.is_empty() {
        log::debug!("Batch is empty, nothing to create");
        return BatchResult::from_outcomes(0, Vec::new());
    }
    log::debug!("Executing batch of {} item(s)", items.len());

    let mut graph = DependencyGraph::build(items);
    graph.detect_cycles();
    graph.resolve_missing_references(items);

    let mut recorded: Vec<ItemOutcome> = graph
        .structural_failures()
        .map(|(index, error)| ItemOutcome::failed(index, error.to_string()))
        .collect();

    let mut registry = TempIdRegistry::new();
    for index in creation_order(&graph, items) {
        recorded.push(create_item(creator, items, index, &mut registry).await);
    }

    let result = BatchResult::from_outcomes(items.len(), recorded);
    log::info!(
        "Batch complete: {} created, {} failed",
        result.success_count,
        result.failure_count
    );
    result
}

/// Resolve an item's effective parent, invoke the capability for its kind,
/// and record the assigned real id against its temp id.
async fn create_item(
    creator: &dyn EntityCreator,
    items: &[BatchItem],
    index: usize,
    registry: &mut TempIdRegistry,
) -> ItemOutcome {
    let item = &items[index];

    let parent_real_id = match (&item.parent_real_id, &item.parent_temp_id) {
        (Some(real_id), _) => Some(real_id.clone()),
        (None, Some(temp_id)) => match registry.resolve(temp_id) {
            Some(real_id) => Some(real_id.to_string()),
            // Topological order guarantees the parent was already attempted,
            // so a miss means it failed to create.
            None => {
                log::warn!(
                    "Skipping item {}: parent '{}' was never created",
                    index,
                    temp_id
                );
                return ItemOutcome::failed(index, PARENT_FAILED_ERROR.to_string());
            }
        },
        (None, None) => None,
    };

    log::debug!(
        "Creating {} at index {} (parent: {:?})",
        item.kind.as_str(),
        index,
        parent_real_id
    );
    let response = match item.kind {
        ItemKind::Task => {
            creator
                .create_task(&item.fields, parent_real_id.as_deref())
                .await
        }
        ItemKind::Project => {
            creator
                .create_project(&item.fields, parent_real_id.as_deref())
                .await
        }
    };

    match response {
        Ok(CreateResponse {
            success: true,
            id: Some(real_id),
            name,
            ..
        }) => {
            if let Some(temp_id) = &item.temp_id {
                registry.register(temp_id.clone(), real_id.clone());
            }
            ItemOutcome::created(index, real_id, name)
        }
        Ok(response) => {
            let error = response
                .error
                .filter(|message| !message.is_empty())
                .unwrap_or_else(|| UNKNOWN_ERROR.to_string());
            log::warn!("Creation failed for item {}: {}", index, error);
            ItemOutcome::failed(index, error)
        }
        Err(err) => {
            let message = err.to_string();
            let error = if message.is_empty() {
                UNKNOWN_ERROR.to_string()
            } else {
                message
            };
            log::warn!("Capability call failed for item {}: {}", index, error);
            ItemOutcome::failed(index, error)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_batch_builder() {
        let batch = Batch::new()
            .task(json!({"name": "Buy milk"}))
            .project(json!({"name": "Kitchen remodel"}))
            .add(BatchItem::task(json!({"name": "Call plumber"})).with_temp_id("t1"));

        assert_eq!(batch.len(), 3);
        assert!(!batch.is_empty());
        assert_eq!(batch.items()[0].kind, ItemKind::Task);
        assert_eq!(batch.items()[1].kind, ItemKind::Project);
        assert_eq!(batch.items()[2].temp_id.as_deref(), Some("t1"));
    }

    #[test]
    fn test_batch_conversions() {
        let single = Batch::from(BatchItem::task(json!({"name": "One"})));
        assert_eq!(single.len(), 1);

        let many = Batch::from(vec![
            BatchItem::task(json!({"name": "A"})),
            BatchItem::task(json!({"name": "B"})),
        ]);
        assert_eq!(many.len(), 2);

        let names: Vec<_> = (&many)
            .into_iter()
            .map(|item| item.fields["name"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["A", "B"]);
    }
}
