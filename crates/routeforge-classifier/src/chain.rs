//! Ordered rule chains.

use std::fmt;
use std::sync::OnceLock;

use routeforge_config::{EngineConfig, EngineKind};
use routeforge_core::{Outcome, OutcomeFamily, Route, RouteScore};
use tracing::{trace, warn};

use crate::context::ClassifyContext;
use crate::decision::BranchDecision;
use crate::rule::{
    AttemptCeilingRule, BlockedCommandRule, BranchRule, ClosingActionRule, CriticalActionRule,
    DeferredActionRule, MalformedRouteRule, SeverityEscalationRule, VolumeRule, DEFAULT_RULE,
};

/// An ordered list of rules with a fallthrough outcome.
///
/// Rules are evaluated top to bottom and the first verdict wins; when no
/// rule matches the chain falls through to `accepted` (gate) or `stable`
/// (phase). Classification is therefore total.
///
/// # Examples
///
/// ```
/// use routeforge_classifier::{ClassifyContext, RuleChain};
/// use routeforge_config::{EngineConfig, RunMode};
/// use routeforge_core::{parse, Outcome};
///
/// let chain = RuleChain::gate(&EngineConfig::default());
/// let ctx = ClassifyContext::new(0, RunMode::Live);
///
/// let decision = chain.classify(&parse("mesh/shutdown/x/emergency"), &ctx);
/// assert_eq!(decision.outcome, Outcome::Rejected);
/// assert_eq!(decision.rule, "blocked-command");
///
/// let decision = chain.classify(&parse("mesh/discover/x/low"), &ctx);
/// assert_eq!(decision.outcome, Outcome::Accepted);
/// assert_eq!(decision.rule, "default");
/// ```
pub struct RuleChain {
    engine: EngineKind,
    rules: Vec<Box<dyn BranchRule>>,
}

impl RuleChain {
    /// Creates a chain with no rules; everything falls through.
    pub fn empty(engine: EngineKind) -> Self {
        Self {
            engine,
            rules: Vec::new(),
        }
    }

    /// Builds the standard chain for `engine`.
    pub fn for_engine(engine: EngineKind, config: &EngineConfig) -> Self {
        match engine {
            EngineKind::Gate => Self::gate(config),
            EngineKind::Phase => Self::phase(config),
        }
    }

    /// Gate chain: accepted, rejected, rerouted, deferred, errored.
    pub fn gate(config: &EngineConfig) -> Self {
        let engine = EngineKind::Gate;
        let buckets = config.buckets.buckets();
        let thresholds = &config.thresholds;

        Self::empty(engine)
            .with_rule(BlockedCommandRule::new(buckets.clone(), engine))
            .with_rule(AttemptCeilingRule::new(thresholds.attempt_ceiling, engine))
            .with_rule(VolumeRule::new(thresholds.volume_threshold, engine))
            .with_rule(MalformedRouteRule::new(engine))
            .with_rule(CriticalActionRule::new(buckets.clone(), engine))
            .with_rule(DeferredActionRule::new(buckets))
            .with_rule(SeverityEscalationRule::new(engine))
    }

    /// Phase chain: stable, warning, escalate, abort, resolved.
    pub fn phase(config: &EngineConfig) -> Self {
        let engine = EngineKind::Phase;
        let buckets = config.buckets.buckets();
        let thresholds = &config.thresholds;

        Self::empty(engine)
            .with_rule(BlockedCommandRule::new(buckets.clone(), engine))
            .with_rule(AttemptCeilingRule::new(thresholds.attempt_ceiling, engine))
            .with_rule(VolumeRule::new(thresholds.volume_threshold, engine))
            .with_rule(MalformedRouteRule::new(engine))
            .with_rule(ClosingActionRule::new(buckets.clone()))
            .with_rule(CriticalActionRule::new(buckets, engine))
            .with_rule(SeverityEscalationRule::new(engine))
    }

    /// Appends a rule after the existing ones.
    pub fn with_rule(mut self, rule: impl BranchRule + 'static) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Inserts a rule at `index`, clamped to the chain length.
    pub fn insert_rule(&mut self, index: usize, rule: impl BranchRule + 'static) {
        let index = index.min(self.rules.len());
        self.rules.insert(index, Box::new(rule));
    }

    pub fn engine(&self) -> EngineKind {
        self.engine
    }

    /// Outcome family this chain emits.
    pub fn family(&self) -> OutcomeFamily {
        match self.engine {
            EngineKind::Gate => OutcomeFamily::Gate,
            EngineKind::Phase => OutcomeFamily::Phase,
        }
    }

    /// Outcome used when no rule matches.
    pub fn fallthrough(&self) -> Outcome {
        match self.engine {
            EngineKind::Gate => Outcome::Accepted,
            EngineKind::Phase => Outcome::Stable,
        }
    }

    /// Rule names in evaluation order, ending with the fallthrough.
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules
            .iter()
            .map(|rule| rule.name())
            .chain(std::iter::once(DEFAULT_RULE))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Classifies one route. First matching rule wins.
    ///
    /// Verdicts outside this chain's outcome family are skipped.
    pub fn classify(&self, route: &Route, ctx: &ClassifyContext) -> BranchDecision {
        let family = self.family();
        let (rule, outcome, reason) = self
            .rules
            .iter()
            .find_map(|rule| {
                let verdict = rule.evaluate(route, ctx)?;
                if verdict.outcome.family() != family {
                    warn!(
                        rule = rule.name(),
                        outcome = %verdict.outcome,
                        "rule verdict outside the chain's outcome family ignored"
                    );
                    return None;
                }
                Some((rule.name(), verdict.outcome, verdict.reason))
            })
            .unwrap_or_else(|| {
                (
                    DEFAULT_RULE,
                    self.fallthrough(),
                    "default: no rule matched".to_string(),
                )
            });

        trace!(
            route = %route,
            rule,
            outcome = %outcome,
            attempt = ctx.attempt(),
            "route classified"
        );

        BranchDecision {
            route: route.clone(),
            outcome,
            rule: rule.to_string(),
            reason,
            score: RouteScore::for_route(route, ctx.attempt()),
            attempt: ctx.attempt(),
            depth: ctx.depth(),
        }
    }
}

impl fmt::Debug for RuleChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleChain")
            .field("engine", &self.engine)
            .field("rules", &self.rule_names())
            .finish()
    }
}

fn default_gate() -> &'static RuleChain {
    static GATE: OnceLock<RuleChain> = OnceLock::new();
    GATE.get_or_init(|| RuleChain::gate(&EngineConfig::default()))
}

fn default_phase() -> &'static RuleChain {
    static PHASE: OnceLock<RuleChain> = OnceLock::new();
    PHASE.get_or_init(|| RuleChain::phase(&EngineConfig::default()))
}

/// Classifies a route with the default gate chain.
///
/// # Examples
///
/// ```
/// use routeforge_classifier::{classify, ClassifyContext};
/// use routeforge_config::RunMode;
/// use routeforge_core::{parse, Outcome};
///
/// let decision = classify(
///     &parse("incident/shutdown/x/critical"),
///     &ClassifyContext::new(0, RunMode::Live),
/// );
/// assert_eq!(decision.outcome, Outcome::Rejected);
/// assert!(decision.reason.contains("blocked-command"));
/// ```
pub fn classify(route: &Route, ctx: &ClassifyContext) -> BranchDecision {
    default_gate().classify(route, ctx)
}

/// Classifies a route with the default phase chain.
pub fn classify_phase(route: &Route, ctx: &ClassifyContext) -> BranchDecision {
    default_phase().classify(route, ctx)
}
