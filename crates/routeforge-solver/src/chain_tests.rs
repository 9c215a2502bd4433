//! Tests for solver chains.

use routeforge_config::{ChainConfig, ChainVariant, ThresholdConfig};
use routeforge_core::{parse, Depth, DEPTH_CEILING, MAX_DEPTH_CEILING};

use crate::chain::{solve, solve_mutual, Phase, SolverChain, SolverChainState};

const SEED: &str = "incident:discover:low:id-a";

#[test]
fn test_linear_chain_of_five() {
    let states = solve(&parse(SEED), 5);

    assert_eq!(states.len(), 5);
    assert_eq!(states[4].trace.len(), 5);
    assert_eq!(states[0].derived_value, SEED);
    assert_eq!(states[4].derived_value, "incident:discover:low:id-a:1:2:3:4");
}

#[test]
fn test_trace_length_follows_step_index() {
    for (i, state) in solve(&parse(SEED), 12).iter().enumerate() {
        assert_eq!(state.step_index as usize, i);
        assert_eq!(state.trace.len(), i + 1);
        assert_eq!(state.trace.last(), Some(&state.derived_value));
    }
}

#[test]
fn test_each_trace_extends_the_previous() {
    let states = solve_mutual(&parse(SEED), 8);
    for pair in states.windows(2) {
        assert!(pair[1].trace.starts_with(&pair[0].trace));
        assert!(pair[1].derived_value.starts_with(&pair[0].derived_value));
    }
}

#[test]
fn test_length_is_clamped() {
    let seed = parse(SEED);

    assert!(solve(&seed, 0).is_empty());
    assert!(solve(&seed, -1).is_empty());
    assert!(solve(&seed, i64::MIN).is_empty());
    assert_eq!(solve(&seed, DEPTH_CEILING as i64).len(), DEPTH_CEILING as usize);
    assert_eq!(
        solve(&seed, DEPTH_CEILING as i64 + 100).len(),
        DEPTH_CEILING as usize
    );
    assert_eq!(solve_mutual(&seed, i64::MAX).len(), DEPTH_CEILING as usize);
}

#[test]
fn test_non_finite_depth_is_empty() {
    let chain = SolverChain::default();
    let seed = parse(SEED);

    assert!(chain.solve(&seed, Depth::from_f64(f64::NAN)).is_empty());
    assert!(chain.solve(&seed, Depth::from_f64(f64::NEG_INFINITY)).is_empty());
    assert_eq!(chain.solve(&seed, Depth::from_f64(3.9)).len(), 3);
}

#[test]
fn test_mutual_chain_alternates_phases() {
    let states = solve_mutual(&parse(SEED), 5);
    let phases: Vec<Phase> = states.iter().map(|s| s.phase).collect();

    assert_eq!(phases, vec![Phase::A, Phase::A, Phase::B, Phase::A, Phase::B]);
    assert_eq!(states[4].derived_value, "incident:discover:low:id-a:1/2:3/4");
}

#[test]
fn test_linear_chain_stays_in_phase_a() {
    assert!(solve(&parse(SEED), 6).iter().all(|s| s.phase == Phase::A));
}

#[test]
fn test_seed_uses_key_form() {
    let states = solve(&parse("mesh/deploy/svc-a/high"), 2);
    assert_eq!(states[0].derived_value, "mesh:deploy:high:svc-a");
    assert_eq!(states[1].derived_value, "mesh:deploy:high:svc-a:1");
    assert!(states.iter().all(|s| s.seed == parse("mesh/deploy/svc-a/high")));
}

#[test]
fn test_configured_ceiling() {
    let thresholds = ThresholdConfig {
        depth_ceiling: 6,
        ..ThresholdConfig::default()
    };
    let config = ChainConfig {
        variant: ChainVariant::Mutual,
        depth: None,
    };
    let chain = SolverChain::from_config(&config, &thresholds);

    assert_eq!(chain.variant(), ChainVariant::Mutual);
    assert_eq!(chain.ceiling(), 6);
    assert_eq!(chain.solve(&parse(SEED), Depth::new(50)).len(), 6);
}

#[test]
fn test_ceiling_is_capped() {
    let chain = SolverChain::new(ChainVariant::Linear).with_ceiling(500);
    assert_eq!(chain.ceiling(), MAX_DEPTH_CEILING);
    assert_eq!(chain.length_for(Depth::new(1000)), MAX_DEPTH_CEILING);
}

#[test]
fn test_derive_leaves_previous_state_untouched() {
    let first = SolverChainState::initial(&parse(SEED));
    let second = first.derive(Phase::B);

    assert_eq!(first.trace.len(), 1);
    assert_eq!(second.step_index, 1);
    assert_eq!(second.derived_value, "incident:discover:low:id-a/1");
}

#[test]
fn test_seed_with_colon_identifier_keeps_four_fields() {
    let seed = parse("incident/discover/a:b/low");
    let states = solve(&seed, 3);

    assert_eq!(states[0].derived_value, "incident:discover:low:a%3Ab");
    assert_eq!(parse(&states[0].derived_value), seed);
    assert_eq!(states[2].derived_value, "incident:discover:low:a%3Ab:1:2");
}
