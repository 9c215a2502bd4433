//! Batch engine.
//!
//! [`RouteEngine`] owns the parser, both rule chains, the solver chain and
//! the aggregator built from one [`EngineConfig`].

use std::collections::BTreeMap;

use rayon::prelude::*;
use routeforge_classifier::{BranchDecision, ClassifyContext, RuleChain, TraceAccumulator};
use routeforge_config::{EngineConfig, EngineKind, RunMode};
use routeforge_core::error::Result;
use routeforge_core::{
    Attempt, Depth, Domain, Route, RouteCatalog, RouteForgeError, RouteParser, MAX_ATTEMPT_CEILING,
};
use tracing::{debug, info};

use crate::aggregate::{AggregateReport, Aggregator};
use crate::chain::{SolverChain, SolverChainState};
use crate::stats::EngineStats;

/// Per-batch options.
///
/// # Examples
///
/// ```
/// use routeforge_config::{EngineKind, RunMode};
/// use routeforge_solver::BatchOptions;
///
/// let options = BatchOptions::default()
///     .with_engine(EngineKind::Phase)
///     .with_mode(RunMode::DryRun)
///     .with_chain_depth(4)
///     .with_parallel(true);
///
/// assert_eq!(options.engine, EngineKind::Phase);
/// assert_eq!(options.chain_depth, Some(4));
/// assert!(options.parallel);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchOptions {
    pub engine: EngineKind,
    pub mode: RunMode,
    pub attempt: u32,
    /// Solves a chain of this depth per route when set.
    pub chain_depth: Option<u32>,
    pub parallel: bool,
}

impl BatchOptions {
    /// Batch defaults taken from `config`.
    pub fn from_config(config: &EngineConfig) -> Self {
        Self {
            engine: config.batch.engine,
            mode: config.batch.mode,
            attempt: config.batch.attempt,
            chain_depth: config.chain.depth,
            parallel: config.batch.parallel,
        }
    }

    pub fn with_engine(mut self, engine: EngineKind) -> Self {
        self.engine = engine;
        self
    }

    pub fn with_mode(mut self, mode: RunMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_attempt(mut self, attempt: u32) -> Self {
        self.attempt = attempt;
        self
    }

    pub fn with_chain_depth(mut self, depth: u32) -> Self {
        self.chain_depth = Some(depth);
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}

/// Everything a batch produced.
#[derive(Debug, Clone)]
pub struct BatchResult {
    /// Decisions in catalog order.
    pub decisions: Vec<BranchDecision>,
    /// Chain states of every route, concatenated in catalog order.
    pub chains: Vec<SolverChainState>,
    pub report: AggregateReport,
    pub stats: EngineStats,
}

/// Route classification engine.
///
/// # Examples
///
/// ```
/// use routeforge_config::EngineConfig;
/// use routeforge_core::Outcome;
/// use routeforge_solver::{BatchOptions, RouteEngine};
///
/// let engine = RouteEngine::new(EngineConfig::default()).unwrap();
/// let catalog = ["incident/shutdown/a/low", "mesh/discover/b/low"];
///
/// let result = engine.run_batch(&catalog[..], &BatchOptions::default());
/// assert_eq!(result.decisions.len(), 2);
/// assert_eq!(result.report.count(Outcome::Rejected), 1);
/// assert_eq!(result.report.count(Outcome::Accepted), 1);
/// ```
#[derive(Debug)]
pub struct RouteEngine {
    config: EngineConfig,
    parser: RouteParser,
    gate: RuleChain,
    phase: RuleChain,
    solver: SolverChain,
    aggregator: Aggregator,
}

impl RouteEngine {
    /// Builds an engine, rejecting invalid configurations.
    pub fn new(config: EngineConfig) -> Result<Self> {
        config
            .validate()
            .map_err(|e| RouteForgeError::Config(e.to_string()))?;

        Ok(Self {
            parser: config.vocabulary.parser(),
            gate: RuleChain::gate(&config),
            phase: RuleChain::phase(&config),
            solver: SolverChain::from_config(&config.chain, &config.thresholds),
            aggregator: Aggregator::new(config.aggregation.group_by),
            config,
        })
    }

    /// Engine with the default configuration.
    pub fn with_defaults() -> Self {
        let config = EngineConfig::default();
        Self {
            parser: config.vocabulary.parser(),
            gate: RuleChain::gate(&config),
            phase: RuleChain::phase(&config),
            solver: SolverChain::from_config(&config.chain, &config.thresholds),
            aggregator: Aggregator::new(config.aggregation.group_by),
            config,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn parser(&self) -> &RouteParser {
        &self.parser
    }

    pub fn solver(&self) -> &SolverChain {
        &self.solver
    }

    pub fn aggregator(&self) -> &Aggregator {
        &self.aggregator
    }

    pub fn chain(&self, engine: EngineKind) -> &RuleChain {
        match engine {
            EngineKind::Gate => &self.gate,
            EngineKind::Phase => &self.phase,
        }
    }

    /// Mutable access for inserting custom rules.
    pub fn chain_mut(&mut self, engine: EngineKind) -> &mut RuleChain {
        match engine {
            EngineKind::Gate => &mut self.gate,
            EngineKind::Phase => &mut self.phase,
        }
    }

    pub fn parse(&self, raw: &str) -> Route {
        self.parser.parse(raw)
    }

    pub fn classify(
        &self,
        route: &Route,
        engine: EngineKind,
        ctx: &ClassifyContext,
    ) -> BranchDecision {
        self.chain(engine).classify(route, ctx)
    }

    /// Solves a chain for `seed` with the configured variant and ceiling.
    pub fn solve(&self, seed: &Route, depth: Depth) -> Vec<SolverChainState> {
        self.solver.solve(seed, depth)
    }

    /// Solves a chain for `seed` and pairs every state with the seed's
    /// decision, stamped with that state's step index as `depth`.
    ///
    /// The seed is classified once; chain states carry no route of their
    /// own, so the paired decisions differ only in `depth`.
    pub fn solve_classified(
        &self,
        seed: &Route,
        depth: Depth,
        engine: EngineKind,
        ctx: &ClassifyContext,
    ) -> Vec<(SolverChainState, BranchDecision)> {
        let decision = self.chain(engine).classify(seed, ctx);
        self.solver
            .solve(seed, depth)
            .into_iter()
            .map(|state| {
                let mut stamped = decision.clone();
                stamped.depth = state.step_index;
                (state, stamped)
            })
            .collect()
    }

    /// Parses, classifies, optionally solves and aggregates a catalog.
    pub fn run_batch<C>(&self, catalog: &C, options: &BatchOptions) -> BatchResult
    where
        C: RouteCatalog + ?Sized,
    {
        let mut stats = EngineStats::default();
        stats.start();

        let raw = catalog.routes();
        info!(
            event = "batch_start",
            routes = raw.len(),
            engine = ?options.engine,
            mode = ?options.mode,
            parallel = options.parallel,
        );

        let routes: Vec<Route> = raw.iter().map(|r| self.parser.parse(r)).collect();
        for route in &routes {
            stats.record_route(route.origin());
        }

        let mut volume: BTreeMap<Domain, usize> = BTreeMap::new();
        for route in &routes {
            *volume.entry(route.domain()).or_insert(0) += 1;
        }

        let chain = self.chain(options.engine);
        let base = ClassifyContext::new(options.attempt, options.mode);
        let classify_one = |route: &Route| {
            let ctx = base.with_domain_volume(volume.get(&route.domain()).copied().unwrap_or(0));
            chain.classify(route, &ctx)
        };

        let classified: Vec<BranchDecision> = if options.parallel {
            routes.par_iter().map(classify_one).collect()
        } else {
            routes.iter().map(classify_one).collect()
        };

        let mut trace = TraceAccumulator::with_capacity(classified.len());
        for decision in classified {
            debug!(
                event = "decision",
                route = %decision.route,
                outcome = %decision.outcome,
                rule = %decision.rule,
                score = %decision.score,
            );
            stats.record_decision();
            trace.record(decision);
        }
        let decisions = trace.take();

        let chains: Vec<SolverChainState> = match options.chain_depth {
            Some(depth) => routes
                .iter()
                .flat_map(|route| {
                    let states = self.solver.solve(route, Depth::new(depth));
                    debug!(event = "chain", seed = %route, steps = states.len());
                    states
                })
                .collect(),
            None => Vec::new(),
        };
        stats.record_chain_steps(chains.len());

        let report = self.aggregator.aggregate(
            &decisions,
            options.chain_depth.map(|_| chains.as_slice()),
        );

        info!(
            event = "batch_end",
            decisions = decisions.len(),
            total_score = %report.total_score,
            fallbacks = stats.fallbacks,
            chain_steps = report.chain_steps,
            elapsed_ms = stats.elapsed_ms(),
        );

        BatchResult {
            decisions,
            chains,
            report,
            stats,
        }
    }

    /// Classifies one route at attempts `0, 1, ...` until a terminal outcome.
    ///
    /// At most `attempt_ceiling + 2` decisions are returned, and never more
    /// than `MAX_ATTEMPT_CEILING + 2`; the attempt past the ceiling is always
    /// refused.
    pub fn retry(&self, raw: &str, engine: EngineKind, mode: RunMode) -> Vec<BranchDecision> {
        let route = self.parse(raw);
        let chain = self.chain(engine);
        let last = self
            .config
            .thresholds
            .attempt_ceiling
            .min(MAX_ATTEMPT_CEILING)
            .saturating_add(1);

        let mut decisions = Vec::new();
        let mut attempt = Attempt::new(0);
        loop {
            let ctx = ClassifyContext::new(0, mode).with_attempt(attempt);
            let decision = chain.classify(&route, &ctx);
            let done = decision.outcome.is_terminal() || attempt.get() >= last;
            decisions.push(decision);
            if done {
                break;
            }
            attempt = attempt.next();
        }

        if let Some(final_decision) = decisions.last() {
            info!(
                event = "retry_end",
                route = %route,
                attempts = decisions.len(),
                outcome = %final_decision.outcome,
                rule = %final_decision.rule,
            );
        }
        decisions
    }
}
