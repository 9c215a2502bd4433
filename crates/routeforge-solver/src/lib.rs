//! RouteForge Solver - chains, aggregation and the batch engine
//!
//! This crate provides:
//! - Bounded [`SolverChain`]s in the linear and two-phase mutual variants
//! - The [`Aggregator`] folding decisions into an [`AggregateReport`]
//! - [`RouteEngine`] running catalogs sequentially or on the rayon pool
//! - [`EngineStats`] for batch runs

pub mod aggregate;
pub mod chain;
pub mod engine;
pub mod stats;

#[cfg(test)]
mod chain_tests;
#[cfg(test)]
mod engine_tests;

pub use aggregate::{aggregate, AggregateReport, Aggregator, CountKey};
pub use chain::{solve, solve_mutual, Phase, SolverChain, SolverChainState};
pub use engine::{BatchOptions, BatchResult, RouteEngine};
pub use stats::EngineStats;
