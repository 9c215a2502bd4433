//! Category rules keyed on the action's bucket.
//!
//! Each rule keeps its own attempt modulus; they are intentionally not
//! unified.

use routeforge_config::{EngineKind, RunMode};
use routeforge_core::{ActionBucket, ActionBuckets, Outcome, Route, Severity};

use super::{BranchRule, Verdict};
use crate::context::ClassifyContext;

/// High-impact actions: rerouted (gate) or escalated (phase).
///
/// Gate: critical severity, or a non-zero attempt divisible by 3, reroutes;
/// in dry-run mode the reroute is held as a deferral. Otherwise the rule
/// declines.
///
/// Phase: severity of at least `high`, or a non-zero attempt divisible by 3,
/// escalates; otherwise warns.
#[derive(Debug, Clone)]
pub struct CriticalActionRule {
    buckets: ActionBuckets,
    engine: EngineKind,
}

impl CriticalActionRule {
    pub fn new(buckets: ActionBuckets, engine: EngineKind) -> Self {
        Self { buckets, engine }
    }
}

impl BranchRule for CriticalActionRule {
    fn name(&self) -> &'static str {
        "critical-action"
    }

    fn evaluate(&self, route: &Route, ctx: &ClassifyContext) -> Option<Verdict> {
        if self.buckets.bucket_of(route.action()) != ActionBucket::Critical {
            return None;
        }
        let retry_turn = ctx.attempt() > 0 && ctx.attempt() % 3 == 0;

        match self.engine {
            EngineKind::Gate => {
                let reason = if route.severity().is_critical() {
                    "critical-action: critical severity"
                } else if retry_turn {
                    "critical-action: retry reroute"
                } else {
                    return None;
                };
                if ctx.mode() == RunMode::DryRun {
                    Some(Verdict::new(
                        Outcome::Deferred,
                        format!("{} held in dry run", reason),
                    ))
                } else {
                    Some(Verdict::new(Outcome::Rerouted, reason))
                }
            }
            EngineKind::Phase => {
                if route.severity() >= Severity::High || retry_turn {
                    Some(Verdict::new(
                        Outcome::Escalate,
                        format!("critical-action: '{}' escalated", route.action()),
                    ))
                } else {
                    Some(Verdict::new(
                        Outcome::Warning,
                        format!("critical-action: '{}' under watch", route.action()),
                    ))
                }
            }
        }
    }
}

/// Deferrable actions alternate on attempt parity.
///
/// Even attempts defer, odd attempts accept. Replays are never deferred,
/// so the rule declines in replay mode.
#[derive(Debug, Clone)]
pub struct DeferredActionRule {
    buckets: ActionBuckets,
}

impl DeferredActionRule {
    pub fn new(buckets: ActionBuckets) -> Self {
        Self { buckets }
    }
}

impl BranchRule for DeferredActionRule {
    fn name(&self) -> &'static str {
        "deferred-action"
    }

    fn evaluate(&self, route: &Route, ctx: &ClassifyContext) -> Option<Verdict> {
        if self.buckets.bucket_of(route.action()) != ActionBucket::Deferrable {
            return None;
        }
        if ctx.mode() == RunMode::Replay {
            return None;
        }
        if ctx.attempt() % 2 == 0 {
            Some(Verdict::new(
                Outcome::Deferred,
                format!("deferred-action: '{}' deferred on even attempt", route.action()),
            ))
        } else {
            Some(Verdict::new(
                Outcome::Accepted,
                format!("deferred-action: '{}' released on odd attempt", route.action()),
            ))
        }
    }
}

/// Closing actions resolve every fourth attempt and hold stable otherwise.
#[derive(Debug, Clone)]
pub struct ClosingActionRule {
    buckets: ActionBuckets,
}

impl ClosingActionRule {
    pub fn new(buckets: ActionBuckets) -> Self {
        Self { buckets }
    }
}

impl BranchRule for ClosingActionRule {
    fn name(&self) -> &'static str {
        "closing-action"
    }

    fn evaluate(&self, route: &Route, ctx: &ClassifyContext) -> Option<Verdict> {
        if self.buckets.bucket_of(route.action()) != ActionBucket::Closing {
            return None;
        }
        if ctx.attempt() % 4 == 0 {
            Some(Verdict::new(
                Outcome::Resolved,
                format!("closing-action: '{}' resolved", route.action()),
            ))
        } else {
            Some(Verdict::new(
                Outcome::Stable,
                format!("closing-action: '{}' pending", route.action()),
            ))
        }
    }
}
