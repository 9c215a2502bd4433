//! Hand-built branch decisions.
//!
//! Useful for aggregation tests that need exact scores and outcomes without
//! running a rule chain.
//!
//! # Example
//!
//! ```
//! use routeforge_core::{Domain, Outcome};
//! use routeforge_test::decision::decision;
//!
//! let d = decision("mesh/deploy/a/low", Outcome::Accepted, 5);
//! assert_eq!(d.domain(), Domain::Mesh);
//! assert_eq!(d.score.value(), 5);
//! ```

use routeforge_classifier::BranchDecision;
use routeforge_core::{parse, Outcome, RouteScore};

/// A decision for `raw` with the given outcome and score, made by a rule
/// named after the outcome.
pub fn decision(raw: &str, outcome: Outcome, score: i64) -> BranchDecision {
    decision_with_rule(raw, outcome, outcome.as_str(), score)
}

/// A decision with an explicit rule name.
pub fn decision_with_rule(raw: &str, outcome: Outcome, rule: &str, score: i64) -> BranchDecision {
    BranchDecision {
        route: parse(raw),
        outcome,
        rule: rule.to_string(),
        reason: format!("fixture: {}", rule),
        score: RouteScore::of(score),
        attempt: 0,
        depth: 0,
    }
}
