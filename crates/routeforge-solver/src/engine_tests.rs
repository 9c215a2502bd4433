//! Tests for the batch engine.

use routeforge_classifier::{BranchRule, ClassifyContext, Verdict};
use routeforge_config::{ChainVariant, EngineConfig, EngineKind, GroupBy, RunMode};
use routeforge_core::{
    Depth, Outcome, Route, RouteCatalog, RouteForgeError, RouteOrigin, MAX_ATTEMPT_CEILING,
};
use routeforge_test::catalog::{volume_batch, INCIDENT_CATALOG, MALFORMED_ROUTES, MIXED_CATALOG};

use crate::aggregate::CountKey;
use crate::engine::{BatchOptions, RouteEngine};

fn engine() -> RouteEngine {
    RouteEngine::with_defaults()
}

#[test]
fn test_invalid_config_is_rejected() {
    let config = EngineConfig::new().with_volume_threshold(0);
    let err = RouteEngine::new(config).unwrap_err();
    assert!(matches!(err, RouteForgeError::Config(_)));
}

#[test]
fn test_batch_follows_catalog_order() {
    let result = engine().run_batch(&INCIDENT_CATALOG, &BatchOptions::default());
    let routes = INCIDENT_CATALOG.routes();

    assert_eq!(result.decisions.len(), routes.len());
    for (decision, raw) in result.decisions.iter().zip(&routes) {
        assert_eq!(decision.route, routeforge_core::parse(raw));
    }
    assert_eq!(result.report.count(Outcome::Rejected), 1);
    assert_eq!(result.report.count(Outcome::Deferred), 1);
    assert_eq!(result.report.count(Outcome::Rerouted), 2);
    assert_eq!(result.report.count(Outcome::Accepted), 2);
    assert!(result.chains.is_empty());
}

#[test]
fn test_phase_batch() {
    let options = BatchOptions::default().with_engine(EngineKind::Phase);
    let result = engine().run_batch(&INCIDENT_CATALOG, &options);

    assert_eq!(result.report.count(Outcome::Abort), 1);
    assert_eq!(result.report.count(Outcome::Escalate), 2);
    assert_eq!(result.report.count(Outcome::Resolved), 1);
    assert_eq!(result.report.count(Outcome::Stable), 2);
}

#[test]
fn test_volume_threshold_across_batch() {
    let at_threshold = engine().run_batch(&volume_batch("quota", 40), &BatchOptions::default());
    assert_eq!(at_threshold.report.count(Outcome::Accepted), 40);

    let above = engine().run_batch(&volume_batch("quota", 41), &BatchOptions::default());
    assert_eq!(above.report.count(Outcome::Rejected), 41);
    assert!(above
        .decisions
        .iter()
        .all(|d| d.rule == "volume-threshold"));
}

#[test]
fn test_volume_is_counted_per_domain() {
    let mut routes = volume_batch("quota", 30);
    routes.extend(volume_batch("mesh", 30));

    let result = engine().run_batch(&routes, &BatchOptions::default());
    assert_eq!(result.report.count(Outcome::Accepted), 60);
}

#[test]
fn test_parallel_matches_sequential() {
    let mut routes = MIXED_CATALOG.routes();
    routes.extend(volume_batch("storage", 45));
    routes.extend(INCIDENT_CATALOG.routes());

    for kind in [EngineKind::Gate, EngineKind::Phase] {
        let options = BatchOptions::default().with_engine(kind).with_attempt(3);
        let sequential = engine().run_batch(&routes, &options);
        let parallel = engine().run_batch(&routes, &options.with_parallel(true));

        assert_eq!(sequential.decisions, parallel.decisions);
        assert_eq!(sequential.report, parallel.report);
    }
}

#[test]
fn test_counts_sum_to_batch_size() {
    let config = EngineConfig::new().with_group_by(GroupBy::OutcomeAndRule);
    let engine = RouteEngine::new(config).unwrap();
    let result = engine.run_batch(&MIXED_CATALOG, &BatchOptions::default());

    let total: usize = result.report.counts.values().sum();
    assert_eq!(total, MIXED_CATALOG.routes().len());
    assert!(result
        .report
        .counts
        .keys()
        .all(|key| matches!(key, CountKey::OutcomeRule(..))));
}

#[test]
fn test_batch_with_chains() {
    let options = BatchOptions::default().with_chain_depth(4);
    let result = engine().run_batch(&INCIDENT_CATALOG, &options);

    assert_eq!(result.chains.len(), 6 * 4);
    assert_eq!(result.report.chain_steps, 24);
    assert_eq!(result.report.deepest_chain, 4);
    assert_eq!(result.stats.chain_steps, 24);
    assert_eq!(result.report.decision_count(), 6);
}

#[test]
fn test_batch_stats() {
    let mut routes: Vec<&str> = MALFORMED_ROUTES.to_vec();
    routes.push("mesh/deploy/a/low");

    let result = engine().run_batch(&routes, &BatchOptions::default());

    assert_eq!(result.stats.routes_parsed, 6);
    assert_eq!(result.stats.fallbacks, 5);
    assert_eq!(result.stats.decisions, 6);
    assert_eq!(result.report.count(Outcome::Errored), 5);
}

#[test]
fn test_options_from_config() {
    let mut config = EngineConfig::new().with_chain_depth(3);
    config.batch.engine = EngineKind::Phase;
    config.batch.mode = RunMode::Replay;
    config.batch.parallel = true;

    let options = BatchOptions::from_config(&config);
    assert_eq!(options.engine, EngineKind::Phase);
    assert_eq!(options.mode, RunMode::Replay);
    assert_eq!(options.chain_depth, Some(3));
    assert!(options.parallel);
}

#[test]
fn test_retry_stops_on_terminal_outcome() {
    let decisions = engine().retry("mesh/shutdown/a/low", EngineKind::Gate, RunMode::Live);
    assert_eq!(decisions.len(), 1);
    assert_eq!(decisions[0].outcome, Outcome::Rejected);

    let decisions = engine().retry("mesh/drain/a/low", EngineKind::Gate, RunMode::Live);
    let outcomes: Vec<Outcome> = decisions.iter().map(|d| d.outcome).collect();
    assert_eq!(outcomes, vec![Outcome::Deferred, Outcome::Accepted]);
    assert_eq!(decisions[1].attempt, 1);
}

#[test]
fn test_retry_is_bounded_by_ceiling() {
    let engine = engine();
    let ceiling = engine.config().thresholds.attempt_ceiling as usize;

    for kind in [EngineKind::Gate, EngineKind::Phase] {
        let decisions = engine.retry("mesh/discover/a/critical", kind, RunMode::Live);
        assert_eq!(decisions.len(), ceiling + 2);

        let last = decisions.last().unwrap();
        assert!(last.outcome.is_refusal());
        assert_eq!(last.rule, "attempt-ceiling");
        assert!(decisions[..ceiling + 1]
            .iter()
            .all(|d| !d.outcome.is_terminal()));
    }
}

#[test]
fn test_retry_respects_configured_ceiling() {
    let engine = RouteEngine::new(EngineConfig::new().with_attempt_ceiling(2)).unwrap();
    let decisions = engine.retry("mesh/rollback/a/emergency", EngineKind::Gate, RunMode::Live);

    assert_eq!(decisions.len(), 4);
    assert_eq!(decisions[3].outcome, Outcome::Rejected);
}

#[test]
fn test_unbounded_attempt_ceiling_is_rejected() {
    let config = EngineConfig::new().with_attempt_ceiling(200_000);
    let err = RouteEngine::new(config).unwrap_err();
    assert!(matches!(err, RouteForgeError::Config(_)));
}

#[test]
fn test_retry_at_max_attempt_ceiling() {
    let config = EngineConfig::new().with_attempt_ceiling(MAX_ATTEMPT_CEILING);
    let engine = RouteEngine::new(config).unwrap();
    let decisions = engine.retry("mesh/rollback/a/critical", EngineKind::Gate, RunMode::Live);

    assert_eq!(decisions.len(), MAX_ATTEMPT_CEILING as usize + 2);
    assert_eq!(decisions.last().map(|d| d.outcome), Some(Outcome::Rejected));
}

#[test]
fn test_solve_uses_configured_variant() {
    let config = EngineConfig::new()
        .with_chain_variant(ChainVariant::Mutual)
        .with_depth_ceiling(5);
    let engine = RouteEngine::new(config).unwrap();
    let seed = engine.parse("incident:discover:low:id-a");

    let states = engine.solve(&seed, Depth::new(9));
    assert_eq!(states.len(), 5);
    assert_eq!(states[2].derived_value, "incident:discover:low:id-a:1/2");
}

#[test]
fn test_solve_classified_carries_depth() {
    let engine = engine();
    let seed = engine.parse("mesh/deploy/a/low");
    let ctx = ClassifyContext::new(0, RunMode::Live);

    let pairs = engine.solve_classified(&seed, Depth::new(3), EngineKind::Gate, &ctx);
    assert_eq!(pairs.len(), 3);
    for (state, decision) in &pairs {
        assert_eq!(decision.depth, state.step_index);
        assert_eq!(decision.outcome, Outcome::Accepted);
    }

    let base = engine.classify(&seed, EngineKind::Gate, &ctx);
    for (_, decision) in &pairs {
        let mut unstamped = decision.clone();
        unstamped.depth = base.depth;
        assert_eq!(unstamped, base);
    }
}

#[test]
fn test_parser_aliases_from_config() {
    let mut config = EngineConfig::new();
    config
        .vocabulary
        .action_aliases
        .insert("halt".to_string(), routeforge_core::Action::Shutdown);
    let engine = RouteEngine::new(config).unwrap();

    let route = engine.parse("mesh/halt/a/low");
    assert_eq!(route.action(), routeforge_core::Action::Shutdown);
    assert_ne!(route.origin(), RouteOrigin::Fallback);

    let result = engine.run_batch(&["mesh/halt/a/low"][..], &BatchOptions::default());
    assert_eq!(result.report.count(Outcome::Rejected), 1);
}

#[derive(Debug)]
struct HoldEverything;

impl BranchRule for HoldEverything {
    fn name(&self) -> &'static str {
        "hold-everything"
    }

    fn evaluate(&self, _route: &Route, _ctx: &ClassifyContext) -> Option<Verdict> {
        Some(Verdict::new(Outcome::Deferred, "hold-everything: maintenance window"))
    }
}

#[test]
fn test_custom_rule_through_engine() {
    let mut engine = engine();
    engine.chain_mut(EngineKind::Gate).insert_rule(0, HoldEverything);

    let result = engine.run_batch(&INCIDENT_CATALOG, &BatchOptions::default());
    assert_eq!(result.report.count(Outcome::Deferred), 6);
}
