//! Guard rules: evaluated before any category rule.

use routeforge_config::EngineKind;
use routeforge_core::{ActionBucket, ActionBuckets, Outcome, Route};

use super::{pick, BranchRule, Verdict};
use crate::context::ClassifyContext;

/// Refuses actions in the blocked bucket, whatever the other fields say.
///
/// # Example
///
/// ```
/// use routeforge_classifier::rule::{BlockedCommandRule, BranchRule};
/// use routeforge_classifier::ClassifyContext;
/// use routeforge_config::{EngineKind, RunMode};
/// use routeforge_core::{parse, ActionBuckets, Outcome};
///
/// let rule = BlockedCommandRule::new(ActionBuckets::new(), EngineKind::Gate);
/// let verdict = rule
///     .evaluate(&parse("mesh/shutdown/x/low"), &ClassifyContext::new(0, RunMode::Live))
///     .unwrap();
/// assert_eq!(verdict.outcome, Outcome::Rejected);
/// ```
#[derive(Debug, Clone)]
pub struct BlockedCommandRule {
    buckets: ActionBuckets,
    engine: EngineKind,
}

impl BlockedCommandRule {
    pub fn new(buckets: ActionBuckets, engine: EngineKind) -> Self {
        Self { buckets, engine }
    }
}

impl BranchRule for BlockedCommandRule {
    fn name(&self) -> &'static str {
        "blocked-command"
    }

    fn evaluate(&self, route: &Route, _ctx: &ClassifyContext) -> Option<Verdict> {
        if self.buckets.bucket_of(route.action()) != ActionBucket::Blocked {
            return None;
        }
        Some(Verdict::new(
            pick(self.engine, Outcome::Rejected, Outcome::Abort),
            format!("blocked-command: action '{}' is blocked", route.action()),
        ))
    }
}

/// Refuses routes retried more than `ceiling` times.
///
/// Once the ceiling is passed every larger attempt is refused too.
#[derive(Debug, Clone)]
pub struct AttemptCeilingRule {
    ceiling: u32,
    engine: EngineKind,
}

impl AttemptCeilingRule {
    pub fn new(ceiling: u32, engine: EngineKind) -> Self {
        Self { ceiling, engine }
    }
}

impl BranchRule for AttemptCeilingRule {
    fn name(&self) -> &'static str {
        "attempt-ceiling"
    }

    fn evaluate(&self, _route: &Route, ctx: &ClassifyContext) -> Option<Verdict> {
        if ctx.attempt() <= self.ceiling {
            return None;
        }
        Some(Verdict::new(
            pick(self.engine, Outcome::Rejected, Outcome::Abort),
            format!(
                "attempt-ceiling: attempt {} exceeds ceiling {}",
                ctx.attempt(),
                self.ceiling
            ),
        ))
    }
}

/// Refuses routes whose domain carries more than `threshold` routes in the
/// current batch.
#[derive(Debug, Clone)]
pub struct VolumeRule {
    threshold: usize,
    engine: EngineKind,
}

impl VolumeRule {
    pub fn new(threshold: usize, engine: EngineKind) -> Self {
        Self { threshold, engine }
    }
}

impl BranchRule for VolumeRule {
    fn name(&self) -> &'static str {
        "volume-threshold"
    }

    fn evaluate(&self, route: &Route, ctx: &ClassifyContext) -> Option<Verdict> {
        if ctx.domain_volume() <= self.threshold {
            return None;
        }
        Some(Verdict::new(
            pick(self.engine, Outcome::Rejected, Outcome::Abort),
            format!(
                "volume-threshold: {} routes for domain '{}' exceed {}",
                ctx.domain_volume(),
                route.domain(),
                self.threshold
            ),
        ))
    }
}

/// Flags routes that were replaced by a grammar fallback.
#[derive(Debug, Clone)]
pub struct MalformedRouteRule {
    engine: EngineKind,
}

impl MalformedRouteRule {
    pub fn new(engine: EngineKind) -> Self {
        Self { engine }
    }
}

impl BranchRule for MalformedRouteRule {
    fn name(&self) -> &'static str {
        "malformed-route"
    }

    fn evaluate(&self, route: &Route, _ctx: &ClassifyContext) -> Option<Verdict> {
        if !route.is_fallback() {
            return None;
        }
        Some(Verdict::new(
            pick(self.engine, Outcome::Errored, Outcome::Warning),
            "malformed-route: input replaced by fallback route",
        ))
    }
}
