//! Persisted record types.

use crate::models::{RequestSpec, ResponseResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A named, reusable request.
///
/// At most one template exists per name; saving under an existing name
/// updates the template in place and keeps its `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Template {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display name, unique among templates.
    pub name: String,

    /// The saved request.
    pub request: RequestSpec,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl Template {
    pub(crate) fn new(name: &str, request: RequestSpec) -> Self {
        let now = Utc::now();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.to_string(),
            request,
            created_at: now,
            updated_at: now,
        }
    }
}

/// An immutable record of one past execution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// The request as it was when sent.
    pub request: RequestSpec,

    /// What came back.
    pub response: ResponseResult,

    /// When the entry was recorded.
    pub timestamp: DateTime<Utc>,
}

impl HistoryEntry {
    pub(crate) fn new(request: RequestSpec, response: ResponseResult) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            request,
            response,
            timestamp: Utc::now(),
        }
    }
}
