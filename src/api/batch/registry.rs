//! Batch-scoped mapping from temp ids to real ids
//!
//! Created empty at batch start, populated as items are created, discarded
//! with the batch. Never shared across batches; the engine threads it
//! explicitly through the creation loop.

use std::collections::HashMap;

#[derive(Debug, Default)]
pub(crate) struct TempIdRegistry {
    assigned: HashMap<String, String>,
}

impl TempIdRegistry {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Record the real id assigned to a temp id by a successful creation.
    pub(crate) fn register(&mut self, temp_id: String, real_id: String) {
        log::debug!("Registered tempId '{}' -> '{}'", temp_id, real_id);
        self.assigned.insert(temp_id, real_id);
    }

    /// Look up the real id for a temp id. A miss on a temp id that exists in
    /// the batch means its item failed to create.
    pub(crate) fn resolve(&self, temp_id: &str) -> Option<&str> {
        self.assigned.get(temp_id).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_and_resolve() {
        let mut registry = TempIdRegistry::new();
        assert_eq!(registry.resolve("a"), None);

        registry.register("a".to_string(), "task-123".to_string());
        assert_eq!(registry.resolve("a"), Some("task-123"));
        assert_eq!(registry.resolve("b"), None);
    }
}
