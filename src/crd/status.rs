//! # Status Conditions
//!
//! Conditions reported on managed resources. `Ready` tracks the external
//! resource's availability, `Synced` tracks whether the last reconcile
//! succeeded.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Condition type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, schemars::JsonSchema)]
pub enum ConditionType {
    Ready,
    Synced,
}

/// Machine-readable reason attached to a condition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, schemars::JsonSchema)]
pub enum ConditionReason {
    /// The external resource exists and is usable
    Available,
    /// The external resource is being created
    Creating,
    /// The external resource is being deleted
    Deleting,
    /// The last reconcile completed without error
    ReconcileSuccess,
    /// The last reconcile failed
    ReconcileError,
}

impl fmt::Display for ConditionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

impl fmt::Display for ConditionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Condition represents a status condition for the resource
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    /// Type of condition
    pub r#type: ConditionType,
    /// Status of condition (True, False, Unknown)
    pub status: String,
    /// Last transition time (RFC3339)
    #[serde(default)]
    pub last_transition_time: Option<String>,
    /// Reason for condition
    pub reason: ConditionReason,
    /// Message describing condition
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl Condition {
    fn new(r#type: ConditionType, status: bool, reason: ConditionReason) -> Self {
        Self {
            r#type,
            status: if status { "True" } else { "False" }.to_string(),
            last_transition_time: Some(chrono::Utc::now().to_rfc3339()),
            reason,
            message: None,
        }
    }

    #[must_use]
    pub fn available() -> Self {
        Self::new(ConditionType::Ready, true, ConditionReason::Available)
    }

    #[must_use]
    pub fn creating() -> Self {
        Self::new(ConditionType::Ready, false, ConditionReason::Creating)
    }

    #[must_use]
    pub fn deleting() -> Self {
        Self::new(ConditionType::Ready, false, ConditionReason::Deleting)
    }

    #[must_use]
    pub fn reconcile_success() -> Self {
        Self::new(ConditionType::Synced, true, ConditionReason::ReconcileSuccess)
    }

    #[must_use]
    pub fn reconcile_error(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..Self::new(ConditionType::Synced, false, ConditionReason::ReconcileError)
        }
    }

    /// Whether two conditions describe the same state, ignoring transition time
    #[must_use]
    pub fn equivalent(&self, other: &Self) -> bool {
        self.r#type == other.r#type
            && self.status == other.status
            && self.reason == other.reason
            && self.message == other.message
    }
}

/// Insert or replace the condition of the same type
///
/// An equivalent existing condition is left untouched so its
/// `lastTransitionTime` keeps pointing at the real transition.
pub fn set_condition(conditions: &mut Vec<Condition>, condition: Condition) {
    match conditions.iter_mut().find(|c| c.r#type == condition.r#type) {
        Some(existing) if existing.equivalent(&condition) => {}
        Some(existing) => *existing = condition,
        None => conditions.push(condition),
    }
}
