//! Tests for engine configuration.

use super::*;

#[test]
fn test_defaults() {
    let config = EngineConfig::new();
    assert_eq!(config.thresholds.volume_threshold, 40);
    assert_eq!(config.thresholds.attempt_ceiling, 10);
    assert_eq!(config.thresholds.depth_ceiling, DEPTH_CEILING);
    assert_eq!(config.batch.engine, EngineKind::Gate);
    assert_eq!(config.batch.mode, RunMode::Live);
    assert_eq!(config.chain.depth, None);
    assert!(config.validate().is_ok());
}

#[test]
fn test_toml_parsing() {
    let toml = r#"
        [thresholds]
        volume_threshold = 12
        depth_ceiling = 16

        [vocabulary]
        default_domain = "incident"
        [vocabulary.domain_aliases]
        k8s = "mesh"

        [buckets]
        deferrable = ["deploy"]

        [chain]
        variant = "mutual"
        depth = 4

        [aggregation]
        group_by = "outcome_and_rule"

        [batch]
        engine = "phase"
        mode = "dry_run"
        parallel = true
    "#;

    let config = EngineConfig::from_toml_str(toml).unwrap();
    assert_eq!(config.thresholds.volume_threshold, 12);
    // unspecified fields keep their defaults
    assert_eq!(config.thresholds.attempt_ceiling, 10);
    assert_eq!(config.thresholds.depth_ceiling, 16);
    assert_eq!(config.vocabulary.default_domain, Domain::Incident);
    assert_eq!(config.vocabulary.domain_aliases["k8s"], Domain::Mesh);
    assert_eq!(config.chain.variant, ChainVariant::Mutual);
    assert_eq!(config.chain.depth, Some(4));
    assert_eq!(config.aggregation.group_by, GroupBy::OutcomeAndRule);
    assert_eq!(config.batch.engine, EngineKind::Phase);
    assert_eq!(config.batch.mode, RunMode::DryRun);
    assert!(config.batch.parallel);
    assert!(config.validate().is_ok());
}

#[test]
fn test_yaml_parsing() {
    let yaml = r#"
        thresholds:
          attempt_ceiling: 3
        vocabulary:
          severity_aliases:
            sev1: critical
        buckets:
          blocked: [shutdown, freeze, patch]
    "#;

    let config = EngineConfig::from_yaml_str(yaml).unwrap();
    assert_eq!(config.thresholds.attempt_ceiling, 3);
    assert_eq!(
        config.vocabulary.severity_aliases["sev1"],
        Severity::Critical
    );
    assert_eq!(config.buckets.blocked.len(), 3);
}

#[test]
fn test_unknown_member_is_parse_error() {
    let result = EngineConfig::from_toml_str(
        r#"
        [buckets]
        blocked = ["teleport"]
    "#,
    );
    assert!(matches!(result, Err(ConfigError::Toml(_))));
}

#[test]
fn test_missing_file_is_io_error() {
    let result = EngineConfig::load("/nonexistent/routeforge.toml");
    assert!(matches!(result, Err(ConfigError::Io(_))));
}

#[test]
fn test_builder() {
    let config = EngineConfig::new()
        .with_volume_threshold(5)
        .with_attempt_ceiling(2)
        .with_depth_ceiling(8)
        .with_chain_variant(ChainVariant::Mutual)
        .with_chain_depth(8)
        .with_group_by(GroupBy::OutcomeAndRule)
        .with_bucket(Action::Deploy, ActionBucket::Blocked);

    assert_eq!(config.thresholds.volume_threshold, 5);
    assert_eq!(config.thresholds.attempt_ceiling, 2);
    assert_eq!(config.chain.depth, Some(8));
    assert_eq!(config.buckets.blocked, vec![Action::Deploy]);
    assert!(config.validate().is_ok());
}

#[test]
fn test_validate_rejects_zero_volume() {
    let err = EngineConfig::new()
        .with_volume_threshold(0)
        .validate()
        .unwrap_err();
    assert!(err.to_string().contains("volume_threshold"));
}

#[test]
fn test_validate_rejects_depth_above_cap() {
    let config = EngineConfig::new().with_depth_ceiling(MAX_DEPTH_CEILING + 1);
    assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
}

#[test]
fn test_validate_rejects_attempt_ceiling_above_cap() {
    let at_cap = EngineConfig::new().with_attempt_ceiling(MAX_ATTEMPT_CEILING);
    assert!(at_cap.validate().is_ok());

    let config = EngineConfig::new().with_attempt_ceiling(200_000);
    assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

    let parsed = EngineConfig::from_toml_str("[thresholds]\nattempt_ceiling = 4294967295\n")
        .map(|c| c.validate());
    assert!(matches!(parsed, Ok(Err(ConfigError::Invalid(_)))));
}

#[test]
fn test_validate_rejects_chain_depth_above_ceiling() {
    let config = EngineConfig::new()
        .with_depth_ceiling(4)
        .with_chain_depth(5);
    assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
}

#[test]
fn test_validate_rejects_overlapping_buckets() {
    let mut config = EngineConfig::new();
    config.buckets.blocked.push(Action::Drain);
    config.buckets.deferrable.push(Action::Drain);

    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("drain"));
}

#[test]
fn test_assign_moves_between_buckets() {
    let mut buckets = BucketConfig::default();
    buckets.assign(Action::Patch, ActionBucket::Critical);
    buckets.assign(Action::Patch, ActionBucket::Closing);

    assert!(buckets.critical.is_empty());
    assert_eq!(buckets.closing, vec![Action::Patch]);
    assert_eq!(buckets.buckets().bucket_of(Action::Patch), ActionBucket::Closing);
}

#[test]
fn test_vocabulary_parser() {
    let vocabulary = VocabularyConfig {
        default_action: Action::Observe,
        action_aliases: BTreeMap::from([("rb".to_string(), Action::Rollback)]),
        ..VocabularyConfig::default()
    };
    let parser = vocabulary.parser();

    assert_eq!(parser.parse("mesh/rb/x/low").action(), Action::Rollback);
    assert_eq!(parser.parse("mesh/zap/x/low").action(), Action::Observe);
}
