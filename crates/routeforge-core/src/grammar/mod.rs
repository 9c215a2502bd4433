//! Closed route vocabularies.
//!
//! Domains, actions and severities are table data: each enumeration carries
//! its full member list and lookup, and actions are mapped to rule buckets
//! through [`ActionBuckets`]. Adding a member means extending a table, not
//! touching the classifier.

#[macro_use]
mod macros;


use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Shared behaviour of the closed vocabularies.
pub trait Vocabulary: Copy + Eq + Default + 'static {
    /// Vocabulary name used in diagnostics.
    const KIND: &'static str;

    /// All members in declaration order.
    fn members() -> &'static [Self];

    /// Canonical lowercase spelling of this member.
    fn as_str(self) -> &'static str;

    /// Case-insensitive lookup by canonical spelling.
    fn lookup(text: &str) -> Option<Self> {
        let text = text.trim();
        Self::members()
            .iter()
            .copied()
            .find(|member| member.as_str().eq_ignore_ascii_case(text))
    }
}

vocabulary! {
    /// Route domain: the subsystem a route addresses.
    pub enum Domain: "domain", default = Recovery {
        Incident => "incident",
        Policy => "policy",
        Mesh => "mesh",
        Recovery => "recovery",
        Telemetry => "telemetry",
        Fabric => "fabric",
        Signal => "signal",
        Planner => "planner",
        Catalog => "catalog",
        Workload => "workload",
        Boot => "boot",
        Audit => "audit",
        Identity => "identity",
        Quota => "quota",
        Runtime => "runtime",
        Network => "network",
        Storage => "storage",
        Cache => "cache",
        Scheduler => "scheduler",
        Observability => "observability",
    }
}

vocabulary! {
    /// Route action: the verb applied to the domain.
    pub enum Action: "action", default = Assess {
        Discover => "discover",
        Assess => "assess",
        Boot => "boot",
        Rollback => "rollback",
        Simulate => "simulate",
        Deploy => "deploy",
        Drain => "drain",
        Restart => "restart",
        Patch => "patch",
        Scale => "scale",
        Audit => "audit",
        Notify => "notify",
        Quarantine => "quarantine",
        Snapshot => "snapshot",
        Restore => "restore",
        Verify => "verify",
        Observe => "observe",
        Reconcile => "reconcile",
        Migrate => "migrate",
        Throttle => "throttle",
        Failover => "failover",
        Archive => "archive",
        Shutdown => "shutdown",
        Freeze => "freeze",
    }
}

vocabulary! {
    /// Route severity, ordered `low < medium < high < critical < emergency`.
    pub enum Severity: "severity", default = Low {
        Low => "low",
        Medium => "medium",
        High => "high",
        Critical => "critical",
        Emergency => "emergency",
    }
}

impl Severity {
    /// Power-of-two scoring weight.
    ///
    /// # Examples
    ///
    /// ```
    /// use routeforge_core::Severity;
    ///
    /// assert_eq!(Severity::Low.weight(), 1);
    /// assert_eq!(Severity::Emergency.weight(), 16);
    /// ```
    pub const fn weight(self) -> i64 {
        match self {
            Severity::Low => 1,
            Severity::Medium => 2,
            Severity::High => 4,
            Severity::Critical => 8,
            Severity::Emergency => 16,
        }
    }

    /// Returns true for `critical` and `emergency`.
    pub fn is_critical(self) -> bool {
        self >= Severity::Critical
    }
}

/// Rule bucket an action belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionBucket {
    /// Unconditionally refused.
    Blocked,
    /// High-impact actions that may be rerouted or escalated.
    Critical,
    /// Actions that may be postponed.
    Deferrable,
    /// Actions that close out a workflow.
    Closing,
    /// Everything else.
    Standard,
}

impl Action {
    /// Built-in bucket for this action.
    pub const fn default_bucket(self) -> ActionBucket {
        match self {
            Action::Shutdown | Action::Freeze => ActionBucket::Blocked,
            Action::Rollback | Action::Quarantine | Action::Restore | Action::Failover => {
                ActionBucket::Critical
            }
            Action::Drain | Action::Migrate | Action::Archive | Action::Snapshot => {
                ActionBucket::Deferrable
            }
            Action::Verify | Action::Reconcile | Action::Audit => ActionBucket::Closing,
            _ => ActionBucket::Standard,
        }
    }
}

/// Action-to-bucket mapping with per-action overrides.
///
/// # Examples
///
/// ```
/// use routeforge_core::{Action, ActionBucket, ActionBuckets};
///
/// let buckets = ActionBuckets::new().with_override(Action::Deploy, ActionBucket::Blocked);
/// assert_eq!(buckets.bucket_of(Action::Deploy), ActionBucket::Blocked);
/// assert_eq!(buckets.bucket_of(Action::Shutdown), ActionBucket::Blocked);
/// assert_eq!(buckets.bucket_of(Action::Discover), ActionBucket::Standard);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionBuckets {
    overrides: BTreeMap<Action, ActionBucket>,
}

impl ActionBuckets {
    /// Creates the built-in mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves `action` into `bucket`.
    pub fn with_override(mut self, action: Action, bucket: ActionBucket) -> Self {
        self.overrides.insert(action, bucket);
        self
    }

    /// Moves `action` into `bucket` in place.
    pub fn set(&mut self, action: Action, bucket: ActionBucket) {
        self.overrides.insert(action, bucket);
    }

    pub fn bucket_of(&self, action: Action) -> ActionBucket {
        self.overrides
            .get(&action)
            .copied()
            .unwrap_or_else(|| action.default_bucket())
    }

    /// Actions currently mapped to `bucket`, in declaration order.
    pub fn members_of(&self, bucket: ActionBucket) -> Vec<Action> {
        Action::ALL
            .iter()
            .copied()
            .filter(|action| self.bucket_of(*action) == bucket)
            .collect()
    }
}
