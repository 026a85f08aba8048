//! Per-item outcomes and the aggregated batch result

use serde::{Deserialize, Serialize};

/// Outcome of one input item, reported in the caller's original order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemOutcome {
    pub original_index: usize,
    pub success: bool,
    /// Real identifier assigned by the host application, on success.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub real_id: Option<String>,
    /// Name echoed from the created entity, when the capability returned one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ItemOutcome {
    pub fn created(original_index: usize, real_id: String, name: Option<String>) -> Self {
        Self {
            original_index,
            success: true,
            real_id: Some(real_id),
            name,
            error: None,
        }
    }

    pub fn failed(original_index: usize, error: String) -> Self {
        Self {
            original_index,
            success: false,
            real_id: None,
            name: None,
            error: Some(error),
        }
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn is_failure(&self) -> bool {
        !self.success
    }
}

/// Aggregated result of one batch invocation.
///
/// `overall_success` follows the at-least-one-success rule: true iff one or
/// more items were created, however many failed alongside them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchResult {
    pub overall_success: bool,
    pub success_count: usize,
    pub failure_count: usize,
    pub outcomes: Vec<ItemOutcome>,
}

impl BatchResult {
    /// Re-project outcomes recorded in processing order back into the
    /// caller's input order and compute the aggregate counts.
    ///
    /// `item_count` is the batch length; the engine records exactly one
    /// outcome per input item, so every slot gets filled.
    pub(crate) fn from_outcomes(item_count: usize, recorded: Vec<ItemOutcome>) -> Self {
        let mut slots: Vec<Option<ItemOutcome>> = (0..item_count).map(|_| None).collect();
        for outcome in recorded {
            let index = outcome.original_index;
            slots[index] = Some(outcome);
        }
        let outcomes: Vec<ItemOutcome> = slots.into_iter().flatten().collect();
        debug_assert_eq!(outcomes.len(), item_count);

        let success_count = outcomes.iter().filter(|o| o.success).count();
        let failure_count = outcomes.len() - success_count;
        Self {
            overall_success: success_count > 0,
            success_count,
            failure_count,
            outcomes,
        }
    }
}
