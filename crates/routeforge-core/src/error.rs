//! Error types for RouteForge

use thiserror::Error;

/// Main error type for RouteForge operations.
///
/// Classification itself never fails; the only error is an engine built
/// from a configuration that does not validate.
#[derive(Debug, Error)]
pub enum RouteForgeError {
    /// Error in engine configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Returned by `FromStr` on vocabulary enumerations.
///
/// The parser never produces this; it coerces unknown members to the
/// default member instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} '{value}'")]
pub struct UnknownMember {
    /// Vocabulary name, e.g. `domain`.
    pub kind: &'static str,
    /// The text that did not match any member.
    pub value: String,
}

/// Result type alias for RouteForge operations
pub type Result<T> = std::result::Result<T, RouteForgeError>;
