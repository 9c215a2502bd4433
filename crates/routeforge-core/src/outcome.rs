//! Outcome taxonomy for branch decisions.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which engine an outcome belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeFamily {
    /// Admission outcomes: accepted, rejected, rerouted, deferred, errored.
    Gate,
    /// Progress outcomes: stable, warning, escalate, abort, resolved.
    Phase,
}

/// Verdict assigned to a route by a rule chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Accepted,
    Rejected,
    Rerouted,
    Deferred,
    Errored,
    Stable,
    Warning,
    Escalate,
    Abort,
    Resolved,
}

impl Outcome {
    /// Gate family members, in declaration order.
    pub const GATE: [Outcome; 5] = [
        Outcome::Accepted,
        Outcome::Rejected,
        Outcome::Rerouted,
        Outcome::Deferred,
        Outcome::Errored,
    ];

    /// Phase family members, in declaration order.
    pub const PHASE: [Outcome; 5] = [
        Outcome::Stable,
        Outcome::Warning,
        Outcome::Escalate,
        Outcome::Abort,
        Outcome::Resolved,
    ];

    pub const fn family(self) -> OutcomeFamily {
        match self {
            Outcome::Accepted
            | Outcome::Rejected
            | Outcome::Rerouted
            | Outcome::Deferred
            | Outcome::Errored => OutcomeFamily::Gate,
            Outcome::Stable
            | Outcome::Warning
            | Outcome::Escalate
            | Outcome::Abort
            | Outcome::Resolved => OutcomeFamily::Phase,
        }
    }

    /// Returns true if retrying the same route cannot change anything.
    ///
    /// Rerouted, deferred, warning and escalate are the retryable outcomes.
    pub const fn is_terminal(self) -> bool {
        !matches!(
            self,
            Outcome::Rerouted | Outcome::Deferred | Outcome::Warning | Outcome::Escalate
        )
    }

    /// Returns true for outcomes that refuse the route.
    pub const fn is_refusal(self) -> bool {
        matches!(self, Outcome::Rejected | Outcome::Abort)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Outcome::Accepted => "accepted",
            Outcome::Rejected => "rejected",
            Outcome::Rerouted => "rerouted",
            Outcome::Deferred => "deferred",
            Outcome::Errored => "errored",
            Outcome::Stable => "stable",
            Outcome::Warning => "warning",
            Outcome::Escalate => "escalate",
            Outcome::Abort => "abort",
            Outcome::Resolved => "resolved",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
