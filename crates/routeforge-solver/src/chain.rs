//! Bounded solver chains.
//!
//! A chain starts from a seed route and derives one state per step by
//! suffixing the previous derived value with the step index. The chain is
//! built iteratively and always has exactly `clamp(depth, 0, ceiling)`
//! states.
//!
//! The mutual variant is a two-phase state machine: `Phase::A` steps append
//! `:{i}`, `Phase::B` steps append `/{i}`, alternating from `Phase::A` at
//! step 1. The linear variant stays in `Phase::A`.

use routeforge_config::{ChainConfig, ChainVariant, ThresholdConfig};
use routeforge_core::{Depth, Route, DEPTH_CEILING, MAX_DEPTH_CEILING};
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Derivation phase of a chain step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Appends `:{i}`.
    A,
    /// Appends `/{i}`.
    B,
}

impl Phase {
    /// Phase taken after this one in the mutual variant.
    pub const fn flip(self) -> Phase {
        match self {
            Phase::A => Phase::B,
            Phase::B => Phase::A,
        }
    }

    const fn separator(self) -> char {
        match self {
            Phase::A => ':',
            Phase::B => '/',
        }
    }
}

/// One state of a solver chain.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SolverChainState {
    pub seed: Route,
    pub step_index: u32,
    pub phase: Phase,
    pub derived_value: String,
    /// Derived values of every step so far, this one included.
    pub trace: Vec<String>,
}

impl SolverChainState {
    /// The first state of a chain: the seed in key form.
    pub fn initial(seed: &Route) -> Self {
        let derived_value = seed.to_key();
        Self {
            seed: seed.clone(),
            step_index: 0,
            phase: Phase::A,
            trace: vec![derived_value.clone()],
            derived_value,
        }
    }

    /// Builds the next state in `phase` without touching `self`.
    pub fn derive(&self, phase: Phase) -> Self {
        let step_index = self.step_index + 1;
        let derived_value = format!("{}{}{}", self.derived_value, phase.separator(), step_index);
        let mut trace = Vec::with_capacity(self.trace.len() + 1);
        trace.extend(self.trace.iter().cloned());
        trace.push(derived_value.clone());
        Self {
            seed: self.seed.clone(),
            step_index,
            phase,
            derived_value,
            trace,
        }
    }
}

/// Chain builder with a variant and a depth ceiling.
///
/// # Examples
///
/// ```
/// use routeforge_config::ChainVariant;
/// use routeforge_core::{parse, Depth};
/// use routeforge_solver::SolverChain;
///
/// let chain = SolverChain::new(ChainVariant::Mutual);
/// let states = chain.solve(&parse("incident:discover:low:id-a"), Depth::new(3));
///
/// assert_eq!(states.len(), 3);
/// assert_eq!(states[2].derived_value, "incident:discover:low:id-a:1/2");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolverChain {
    variant: ChainVariant,
    ceiling: u32,
}

impl Default for SolverChain {
    fn default() -> Self {
        Self::new(ChainVariant::Linear)
    }
}

impl SolverChain {
    pub fn new(variant: ChainVariant) -> Self {
        Self {
            variant,
            ceiling: DEPTH_CEILING,
        }
    }

    pub fn from_config(chain: &ChainConfig, thresholds: &ThresholdConfig) -> Self {
        Self::new(chain.variant).with_ceiling(thresholds.depth_ceiling)
    }

    /// Sets the depth ceiling, capped at [`MAX_DEPTH_CEILING`].
    pub fn with_ceiling(mut self, ceiling: u32) -> Self {
        self.ceiling = ceiling.min(MAX_DEPTH_CEILING);
        self
    }

    pub fn variant(&self) -> ChainVariant {
        self.variant
    }

    pub fn ceiling(&self) -> u32 {
        self.ceiling
    }

    /// Number of states a chain of `depth` will have.
    pub fn length_for(&self, depth: Depth) -> u32 {
        depth.clamped(self.ceiling)
    }

    /// Builds the chain for `seed`.
    pub fn solve(&self, seed: &Route, depth: Depth) -> Vec<SolverChainState> {
        let length = self.length_for(depth) as usize;
        let mut states: Vec<SolverChainState> = Vec::with_capacity(length);
        let mut phase = Phase::A;

        for step in 0..length {
            let state = match states.last() {
                None => SolverChainState::initial(seed),
                Some(previous) => {
                    let state = previous.derive(phase);
                    if self.variant == ChainVariant::Mutual {
                        phase = phase.flip();
                    }
                    state
                }
            };
            trace!(
                event = "chain_step",
                step = step as u64,
                derived = %state.derived_value,
            );
            states.push(state);
        }
        states
    }
}

/// Linear chain with the default ceiling.
///
/// Negative depths yield an empty chain; depths above the ceiling are
/// clamped.
///
/// # Examples
///
/// ```
/// use routeforge_core::parse;
/// use routeforge_solver::solve;
///
/// let states = solve(&parse("incident:discover:low:id-a"), 5);
/// assert_eq!(states.len(), 5);
/// assert_eq!(states[4].trace.len(), 5);
/// assert_eq!(states[4].derived_value, "incident:discover:low:id-a:1:2:3:4");
///
/// assert!(solve(&parse("incident:discover:low:id-a"), -3).is_empty());
/// ```
pub fn solve(seed: &Route, depth: i64) -> Vec<SolverChainState> {
    SolverChain::new(ChainVariant::Linear).solve(seed, Depth::from_i64(depth))
}

/// Mutual (two-phase) chain with the default ceiling.
pub fn solve_mutual(seed: &Route, depth: i64) -> Vec<SolverChainState> {
    SolverChain::new(ChainVariant::Mutual).solve(seed, Depth::from_i64(depth))
}
