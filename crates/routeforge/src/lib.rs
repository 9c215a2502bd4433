//! RouteForge - Route Branch Classification in Rust
//!
//! Parse structured route strings, classify them through ordered rule
//! chains, derive bounded solver chains and aggregate the result.
//!
//! # Example
//!
//! ```rust
//! use routeforge::prelude::*;
//!
//! let route = parse("incident/shutdown/id-2/low");
//! let decision = classify(&route, &ClassifyContext::new(0, RunMode::Live));
//! assert_eq!(decision.outcome, Outcome::Rejected);
//!
//! let states = solve(&parse("incident:discover:low:id-a"), 5);
//! assert_eq!(states[4].trace.len(), 5);
//!
//! let report = aggregate(&[], None);
//! assert!(report.counts.is_empty());
//! ```

// Route grammar and value types
pub use routeforge_core::{
    parse, Action, ActionBucket, ActionBuckets, Attempt, Depth, Domain, Grammar, Outcome,
    OutcomeFamily, Route, RouteCatalog, RouteForgeError, RouteOrigin, RouteParser, RouteScore,
    Severity, StaticCatalog, Vocabulary, DEPTH_CEILING, MAX_DEPTH_CEILING,
};

// Configuration
pub use routeforge_config::{
    ChainVariant, ConfigError, EngineConfig, EngineKind, GroupBy, RunMode,
};

// Rule chains
pub use routeforge_classifier::{
    classify, classify_phase, BranchDecision, BranchRule, ClassifyContext, RuleChain,
    TraceAccumulator, Verdict,
};

// Solver chains, aggregation and the batch engine
pub use routeforge_solver::{
    aggregate, solve, solve_mutual, AggregateReport, Aggregator, BatchOptions, BatchResult,
    CountKey, EngineStats, Phase, RouteEngine, SolverChain, SolverChainState,
};

/// Console output, enabled with the `console` feature.
#[cfg(feature = "console")]
pub use routeforge_console as console;

mod runner;
pub use runner::{run_catalog, CONFIG_FILE};

pub mod prelude {
    pub use super::{aggregate, classify, classify_phase, parse, solve, solve_mutual};
    pub use super::{
        BatchOptions, BranchDecision, ClassifyContext, EngineConfig, EngineKind, Outcome,
        Route, RouteCatalog, RouteEngine, RunMode,
    };
}
