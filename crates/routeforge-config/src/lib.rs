//! Configuration system for RouteForge.
//!
//! Load engine configuration from TOML or YAML files to control thresholds,
//! vocabulary defaults, action buckets and batch behaviour without code
//! changes.
//!
//! # Examples
//!
//! Load configuration from TOML string:
//!
//! ```
//! use routeforge_config::{ChainVariant, EngineConfig};
//! use routeforge_core::{Action, Severity};
//!
//! let config = EngineConfig::from_toml_str(r#"
//!     [thresholds]
//!     volume_threshold = 25
//!     attempt_ceiling = 6
//!
//!     [vocabulary]
//!     default_severity = "medium"
//!     [vocabulary.severity_aliases]
//!     sev1 = "critical"
//!
//!     [buckets]
//!     blocked = ["shutdown", "freeze", "deploy"]
//!
//!     [chain]
//!     variant = "mutual"
//!     depth = 8
//! "#).unwrap();
//!
//! assert_eq!(config.thresholds.volume_threshold, 25);
//! assert_eq!(config.vocabulary.default_severity, Severity::Medium);
//! assert_eq!(config.chain.variant, ChainVariant::Mutual);
//! assert!(config.buckets.blocked.contains(&Action::Deploy));
//! ```
//!
//! Use default config when file is missing:
//!
//! ```
//! use routeforge_config::EngineConfig;
//!
//! let config = EngineConfig::load("routeforge.toml").unwrap_or_default();
//! // Proceeds with defaults if file doesn't exist
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use routeforge_core::{
    Action, ActionBucket, ActionBuckets, Domain, RouteParser, Severity, DEPTH_CEILING,
    MAX_ATTEMPT_CEILING, MAX_DEPTH_CEILING,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main engine configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct EngineConfig {
    /// Rule thresholds and ceilings.
    #[serde(default)]
    pub thresholds: ThresholdConfig,

    /// Vocabulary default members and aliases.
    #[serde(default)]
    pub vocabulary: VocabularyConfig,

    /// Action bucket overrides.
    #[serde(default)]
    pub buckets: BucketConfig,

    /// Solver chain configuration.
    #[serde(default)]
    pub chain: ChainConfig,

    /// Report aggregation configuration.
    #[serde(default)]
    pub aggregation: AggregationConfig,

    /// Batch defaults.
    #[serde(default)]
    pub batch: BatchConfig,
}

impl EngineConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if file doesn't exist or contains invalid TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_file(path)
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(s)?)
    }

    /// Sets the per-domain volume threshold.
    pub fn with_volume_threshold(mut self, threshold: usize) -> Self {
        self.thresholds.volume_threshold = threshold;
        self
    }

    /// Sets the attempt ceiling.
    pub fn with_attempt_ceiling(mut self, ceiling: u32) -> Self {
        self.thresholds.attempt_ceiling = ceiling;
        self
    }

    /// Sets the solver chain depth ceiling.
    pub fn with_depth_ceiling(mut self, ceiling: u32) -> Self {
        self.thresholds.depth_ceiling = ceiling;
        self
    }

    /// Sets the solver chain variant.
    pub fn with_chain_variant(mut self, variant: ChainVariant) -> Self {
        self.chain.variant = variant;
        self
    }

    /// Sets the depth solved for every route in a batch.
    pub fn with_chain_depth(mut self, depth: u32) -> Self {
        self.chain.depth = Some(depth);
        self
    }

    /// Sets the report grouping.
    pub fn with_group_by(mut self, group_by: GroupBy) -> Self {
        self.aggregation.group_by = group_by;
        self
    }

    /// Moves an action into a bucket.
    pub fn with_bucket(mut self, action: Action, bucket: ActionBucket) -> Self {
        self.buckets.assign(action, bucket);
        self
    }

    /// Checks thresholds and bucket assignments for consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] for a zero volume threshold, a depth
    /// ceiling above [`MAX_DEPTH_CEILING`], an attempt ceiling above
    /// [`MAX_ATTEMPT_CEILING`], or an action listed in more than one bucket.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.thresholds.validate()?;
        self.buckets.validate()?;
        if let Some(depth) = self.chain.depth {
            if depth > self.thresholds.depth_ceiling {
                return Err(ConfigError::Invalid(format!(
                    "chain depth {} exceeds depth ceiling {}",
                    depth, self.thresholds.depth_ceiling
                )));
            }
        }
        Ok(())
    }
}

/// Rule thresholds.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct ThresholdConfig {
    /// Routes per domain in one batch above which the domain is refused.
    pub volume_threshold: usize,

    /// Attempts above this value are refused.
    pub attempt_ceiling: u32,

    /// Maximum solver chain depth.
    pub depth_ceiling: u32,
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            volume_threshold: 40,
            attempt_ceiling: 10,
            depth_ceiling: DEPTH_CEILING,
        }
    }
}

impl ThresholdConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.volume_threshold == 0 {
            return Err(ConfigError::Invalid(
                "volume_threshold must be greater than zero".to_string(),
            ));
        }
        if self.depth_ceiling > MAX_DEPTH_CEILING {
            return Err(ConfigError::Invalid(format!(
                "depth_ceiling {} exceeds maximum {}",
                self.depth_ceiling, MAX_DEPTH_CEILING
            )));
        }
        if self.attempt_ceiling > MAX_ATTEMPT_CEILING {
            return Err(ConfigError::Invalid(format!(
                "attempt_ceiling {} exceeds maximum {}",
                self.attempt_ceiling, MAX_ATTEMPT_CEILING
            )));
        }
        Ok(())
    }
}

/// Vocabulary defaults and alias tables.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct VocabularyConfig {
    /// Domain substituted for unknown domains.
    pub default_domain: Domain,

    /// Action substituted for unknown actions.
    pub default_action: Action,

    /// Severity substituted for unknown severities.
    pub default_severity: Severity,

    /// Extra domain spellings.
    pub domain_aliases: BTreeMap<String, Domain>,

    /// Extra action spellings.
    pub action_aliases: BTreeMap<String, Action>,

    /// Extra severity spellings.
    pub severity_aliases: BTreeMap<String, Severity>,
}

impl VocabularyConfig {
    /// Builds a route parser from these defaults and aliases.
    pub fn parser(&self) -> RouteParser {
        let parser = RouteParser::new()
            .with_default_domain(self.default_domain)
            .with_default_action(self.default_action)
            .with_default_severity(self.default_severity);
        let parser = self
            .domain_aliases
            .iter()
            .fold(parser, |p, (alias, domain)| p.with_domain_alias(alias, *domain));
        let parser = self
            .action_aliases
            .iter()
            .fold(parser, |p, (alias, action)| p.with_action_alias(alias, *action));
        self.severity_aliases
            .iter()
            .fold(parser, |p, (alias, severity)| {
                p.with_severity_alias(alias, *severity)
            })
    }
}

/// Action bucket overrides. Actions not listed keep their built-in bucket.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct BucketConfig {
    pub blocked: Vec<Action>,
    pub critical: Vec<Action>,
    pub deferrable: Vec<Action>,
    pub closing: Vec<Action>,
    pub standard: Vec<Action>,
}

impl BucketConfig {
    fn lists(&self) -> [(ActionBucket, &Vec<Action>); 5] {
        [
            (ActionBucket::Blocked, &self.blocked),
            (ActionBucket::Critical, &self.critical),
            (ActionBucket::Deferrable, &self.deferrable),
            (ActionBucket::Closing, &self.closing),
            (ActionBucket::Standard, &self.standard),
        ]
    }

    /// Puts `action` in `bucket`, removing it from every other list.
    pub fn assign(&mut self, action: Action, bucket: ActionBucket) {
        for list in [
            &mut self.blocked,
            &mut self.critical,
            &mut self.deferrable,
            &mut self.closing,
            &mut self.standard,
        ] {
            list.retain(|a| *a != action);
        }
        match bucket {
            ActionBucket::Blocked => self.blocked.push(action),
            ActionBucket::Critical => self.critical.push(action),
            ActionBucket::Deferrable => self.deferrable.push(action),
            ActionBucket::Closing => self.closing.push(action),
            ActionBucket::Standard => self.standard.push(action),
        }
    }

    /// Builds the action bucket table.
    pub fn buckets(&self) -> ActionBuckets {
        let mut buckets = ActionBuckets::new();
        for (bucket, actions) in self.lists() {
            for action in actions {
                buckets.set(*action, bucket);
            }
        }
        buckets
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let mut seen: BTreeMap<Action, ActionBucket> = BTreeMap::new();
        for (bucket, actions) in self.lists() {
            for action in actions {
                if let Some(previous) = seen.insert(*action, bucket) {
                    if previous != bucket {
                        return Err(ConfigError::Invalid(format!(
                            "action '{}' listed in both {:?} and {:?} buckets",
                            action, previous, bucket
                        )));
                    }
                }
            }
        }
        Ok(())
    }
}

/// Which rule chain classifies routes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EngineKind {
    /// Admission outcomes: accepted, rejected, rerouted, deferred, errored.
    #[default]
    Gate,

    /// Progress outcomes: stable, warning, escalate, abort, resolved.
    Phase,
}

/// Run mode passed to every rule.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunMode {
    /// Normal classification.
    #[default]
    Live,

    /// Reroutes are held as deferrals.
    DryRun,

    /// Replayed routes are never deferred.
    Replay,
}

/// Solver chain derivation variant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChainVariant {
    /// Every step appends `:{i}`.
    #[default]
    Linear,

    /// Steps alternate between `:{i}` and `/{i}`.
    Mutual,
}

/// Solver chain configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct ChainConfig {
    /// Derivation variant.
    pub variant: ChainVariant,

    /// Depth solved for every route in a batch; `None` disables chains.
    pub depth: Option<u32>,
}

/// Report count grouping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupBy {
    /// Count by outcome.
    #[default]
    Outcome,

    /// Count by outcome and the rule that produced it.
    OutcomeAndRule,
}

/// Report aggregation configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct AggregationConfig {
    pub group_by: GroupBy,
}

/// Batch defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct BatchConfig {
    /// Rule chain used for batches.
    pub engine: EngineKind,

    /// Run mode for batches.
    pub mode: RunMode,

    /// Attempt number batches are classified at.
    pub attempt: u32,

    /// Classify batch routes on the rayon thread pool.
    pub parallel: bool,
}

#[cfg(test)]
mod tests;
