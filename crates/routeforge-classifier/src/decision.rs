//! Branch decisions.

use routeforge_core::{Domain, Outcome, Route, RouteScore};
use serde::{Deserialize, Serialize};

/// The verdict for one route in one classification pass.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BranchDecision {
    /// The classified route.
    pub route: Route,
    /// Outcome from the engine's family.
    pub outcome: Outcome,
    /// Name of the rule that fired.
    pub rule: String,
    /// Human-readable reason code.
    pub reason: String,
    pub score: RouteScore,
    pub attempt: u32,
    pub depth: u32,
}

impl BranchDecision {
    /// Domain of the decided route.
    pub fn domain(&self) -> Domain {
        self.route.domain()
    }
}
