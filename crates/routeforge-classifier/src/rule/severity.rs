//! Severity escalation rule.

use routeforge_config::EngineKind;
use routeforge_core::{Outcome, Route};

use super::{BranchRule, Verdict};
use crate::context::ClassifyContext;

/// Upgrades critical and emergency routes.
///
/// Gate: critical severity reroutes. Phase: critical severity escalates,
/// and a non-zero even attempt warns.
#[derive(Debug, Clone)]
pub struct SeverityEscalationRule {
    engine: EngineKind,
}

impl SeverityEscalationRule {
    pub fn new(engine: EngineKind) -> Self {
        Self { engine }
    }
}

impl BranchRule for SeverityEscalationRule {
    fn name(&self) -> &'static str {
        "severity-escalation"
    }

    fn evaluate(&self, route: &Route, ctx: &ClassifyContext) -> Option<Verdict> {
        let severity = route.severity();
        match self.engine {
            EngineKind::Gate if severity.is_critical() => Some(Verdict::new(
                Outcome::Rerouted,
                format!("severity-escalation: '{}' rerouted", severity),
            )),
            EngineKind::Gate => None,
            EngineKind::Phase if severity.is_critical() => Some(Verdict::new(
                Outcome::Escalate,
                format!("severity-escalation: '{}' escalated", severity),
            )),
            EngineKind::Phase if ctx.attempt() > 0 && ctx.attempt() % 2 == 0 => Some(Verdict::new(
                Outcome::Warning,
                format!("severity-escalation: repeated attempt {}", ctx.attempt()),
            )),
            EngineKind::Phase => None,
        }
    }
}
