//! Caller input model for batch creation

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Which external creation capability an item is sent to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Task,
    Project,
}

impl ItemKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemKind::Task => "task",
            ItemKind::Project => "project",
        }
    }
}

/// One entity to create, as described by the caller.
///
/// `temp_id` is a caller-chosen placeholder, unique within the batch, that
/// lets other items in the same request reference this one before it has a
/// real identity. A parent is declared either through `parent_temp_id`
/// (another item's `temp_id`) or through `parent_real_id` (a pre-existing
/// identifier known before the batch started); `parent_real_id` takes
/// precedence when both are present. `hierarchy_level` is an ordering hint
/// among structurally independent items only.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchItem {
    pub kind: ItemKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temp_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_temp_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_real_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hierarchy_level: Option<u32>,
    /// Kind-specific creation payload, passed through to the capability
    /// unchanged except for parent substitution.
    #[serde(default)]
    pub fields: Value,
}

impl BatchItem {
    pub fn new(kind: ItemKind, fields: Value) -> Self {
        Self {
            kind,
            temp_id: None,
            parent_temp_id: None,
            parent_real_id: None,
            hierarchy_level: None,
            fields,
        }
    }

    pub fn task(fields: Value) -> Self {
        Self::new(ItemKind::Task, fields)
    }

    pub fn project(fields: Value) -> Self {
        Self::new(ItemKind::Project, fields)
    }

    pub fn with_temp_id(mut self, temp_id: impl Into<String>) -> Self {
        self.temp_id = Some(temp_id.into());
        self
    }

    pub fn with_parent_temp_id(mut self, parent_temp_id: impl Into<String>) -> Self {
        self.parent_temp_id = Some(parent_temp_id.into());
        self
    }

    pub fn with_parent_real_id(mut self, parent_real_id: impl Into<String>) -> Self {
        self.parent_real_id = Some(parent_real_id.into());
        self
    }

    pub fn at_level(mut self, level: u32) -> Self {
        self.hierarchy_level = Some(level);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_builder_constructors() {
        let item = BatchItem::task(json!({"name": "Write report"}))
            .with_temp_id("t1")
            .with_parent_temp_id("p1")
            .at_level(2);

        assert_eq!(item.kind, ItemKind::Task);
        assert_eq!(item.temp_id.as_deref(), Some("t1"));
        assert_eq!(item.parent_temp_id.as_deref(), Some("p1"));
        assert_eq!(item.parent_real_id, None);
        assert_eq!(item.hierarchy_level, Some(2));
        assert_eq!(item.fields["name"], "Write report");
    }

    #[test]
    fn test_deserializes_bridge_json() {
        let item: BatchItem = serde_json::from_value(json!({
            "kind": "project",
            "tempId": "proj-1",
            "parentRealId": "folder-abc",
            "hierarchyLevel": 1,
            "fields": {"name": "Q3 Planning", "sequential": true}
        }))
        .unwrap();

        assert_eq!(item.kind, ItemKind::Project);
        assert_eq!(item.temp_id.as_deref(), Some("proj-1"));
        assert_eq!(item.parent_temp_id, None);
        assert_eq!(item.parent_real_id.as_deref(), Some("folder-abc"));
        assert_eq!(item.hierarchy_level, Some(1));
        assert_eq!(item.fields["sequential"], true);
    }

    #[test]
    fn test_optional_references_default_to_none() {
        let item: BatchItem = serde_json::from_value(json!({
            "kind": "task",
            "fields": {"name": "Standalone"}
        }))
        .unwrap();

        assert_eq!(item.temp_id, None);
        assert_eq!(item.parent_temp_id, None);
        assert_eq!(item.parent_real_id, None);
        assert_eq!(item.hierarchy_level, None);
    }
}
