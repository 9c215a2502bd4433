//! RouteForge Core - route grammar and value types
//!
//! This crate provides the fundamental pieces of RouteForge:
//! - Closed vocabularies (domains, actions, severities) and action buckets
//! - The total route parser and its fallback routes
//! - Outcome and score types carried by branch decisions
//! - Depth and attempt counter normalisation
//! - Route catalogs

pub mod catalog;
pub mod counter;
pub mod error;
pub mod grammar;
pub mod outcome;
pub mod route;
pub mod score;

#[cfg(test)]
mod route_tests;

pub use catalog::{RouteCatalog, StaticCatalog};
pub use counter::{Attempt, Depth, DEPTH_CEILING, MAX_ATTEMPT_CEILING, MAX_DEPTH_CEILING};
pub use error::{RouteForgeError, UnknownMember};
pub use grammar::{Action, ActionBucket, ActionBuckets, Domain, Severity, Vocabulary};
pub use outcome::{Outcome, OutcomeFamily};
pub use route::{
    parse, Grammar, Route, RouteOrigin, RouteParser, COMMAND_FALLBACK, FALLBACK_IDENTIFIER,
    PATH_FALLBACK,
};
pub use score::RouteScore;
