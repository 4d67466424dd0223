//! Advisory lock metadata.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use uuid::Uuid;

/// Metadata describing the holder of a workspace lock.
///
/// The store persists this verbatim as the lock file's JSON content and
/// interprets nothing but `id`: a lock created with some id is released only
/// by presenting the same id. Everything else is holder-supplied context for
/// operators inspecting a held lock.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LockInfo {
    /// Opaque token chosen by the caller requesting the lock.
    pub id: String,

    /// What the holder is doing (e.g., "apply", "plan").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operation: Option<String>,

    /// Who holds the lock (e.g., "alice@host").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub who: Option<String>,

    /// When the lock was requested. Recorded for operator inspection only;
    /// nothing expires a lock automatically.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,

    /// Any further caller-supplied fields, round-tripped untouched.
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

impl LockInfo {
    /// Create lock metadata with a caller-chosen id.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            operation: None,
            who: None,
            created: Some(Utc::now()),
            extra: HashMap::new(),
        }
    }

    /// Create lock metadata with a freshly generated UUIDv4 id, for callers
    /// without their own token scheme.
    #[must_use]
    pub fn generate() -> Self {
        Self::new(Uuid::new_v4().to_string())
    }

    /// Set the holder's operation.
    #[must_use]
    pub fn with_operation(mut self, operation: impl Into<String>) -> Self {
        self.operation = Some(operation.into());
        self
    }

    /// Set the holder's identity.
    #[must_use]
    pub fn with_who(mut self, who: impl Into<String>) -> Self {
        self.who = Some(who.into());
        self
    }

    /// Attach an opaque caller field.
    #[must_use]
    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }
}
