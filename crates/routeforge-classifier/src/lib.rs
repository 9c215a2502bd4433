//! RouteForge Classifier - ordered branch rule chains
//!
//! This crate provides:
//! - The [`BranchRule`](rule::BranchRule) trait and the built-in rules
//! - [`RuleChain`] for the gate and phase engines
//! - [`BranchDecision`] values and the [`TraceAccumulator`]

pub mod chain;
pub mod context;
pub mod decision;
pub mod rule;
pub mod trace;


pub use chain::{classify, classify_phase, RuleChain};
pub use context::ClassifyContext;
pub use decision::BranchDecision;
pub use rule::{BranchRule, Verdict};
pub use trace::TraceAccumulator;
