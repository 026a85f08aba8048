//! Entity creation capability consumed by the batch engine
//!
//! The physical "create one entity" operations live in the host application
//! bridge and are injected here as a trait object, so ordering and failure
//! logic can be exercised without the host application.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Result of a single creation call against the host application.
///
/// A capability may also fail at the transport level by returning `Err`;
/// this type covers the structured success/failure responses.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CreateResponse {
    /// Successful creation with the real identifier assigned by the host.
    pub fn created(id: impl Into<String>, name: Option<String>) -> Self {
        Self {
            success: true,
            id: Some(id.into()),
            name,
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            id: None,
            name: None,
            error: Some(error.into()),
        }
    }
}

/// Creation capability supplied by the host application bridge.
///
/// `fields` is the kind-specific creation payload and is passed through
/// unchanged; `parent_real_id` is the already-resolved parent reference, if
/// any. Implementations may return a failure `CreateResponse` or reject the
/// call outright with `Err`; the engine treats both as per-item failures.
#[async_trait]
pub trait EntityCreator: Send + Sync {
    async fn create_task(
        &self,
        fields: &Value,
        parent_real_id: Option<&str>,
    ) -> anyhow::Result<CreateResponse>;

    async fn create_project(
        &self,
        fields: &Value,
        parent_real_id: Option<&str>,
    ) -> anyhow::Result<CreateResponse>;
}
