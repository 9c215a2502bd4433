//! Branch rules.
//!
//! A rule inspects a route and its context and either returns a verdict or
//! declines. Rules are evaluated in chain order; the first verdict wins.

mod category;
mod guard;
mod severity;

use std::fmt::Debug;

use routeforge_config::EngineKind;
use routeforge_core::{Outcome, Route};

use crate::context::ClassifyContext;

pub use category::{ClosingActionRule, CriticalActionRule, DeferredActionRule};
pub use guard::{AttemptCeilingRule, BlockedCommandRule, MalformedRouteRule, VolumeRule};
pub use severity::SeverityEscalationRule;

/// Name reported for routes no rule matched.
pub const DEFAULT_RULE: &str = "default";

/// Outcome and reason returned by a matching rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    pub outcome: Outcome,
    pub reason: String,
}

impl Verdict {
    pub fn new(outcome: Outcome, reason: impl Into<String>) -> Self {
        Self {
            outcome,
            reason: reason.into(),
        }
    }
}

/// A single predicate rule in a chain.
///
/// Implementations must be pure: the same route and context always yield
/// the same verdict. A verdict whose outcome belongs to the other engine's
/// family is ignored by the chain and logged at warn level, so the next rule
/// decides.
pub trait BranchRule: Send + Sync + Debug {
    /// Stable rule name recorded on decisions.
    fn name(&self) -> &'static str;

    /// Returns a verdict, or `None` to let the next rule decide.
    fn evaluate(&self, route: &Route, ctx: &ClassifyContext) -> Option<Verdict>;
}

/// Picks the gate or phase outcome for an engine.
#[inline]
pub(crate) fn pick(engine: EngineKind, gate: Outcome, phase: Outcome) -> Outcome {
    match engine {
        EngineKind::Gate => gate,
        EngineKind::Phase => phase,
    }
}
