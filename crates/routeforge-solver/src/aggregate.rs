//! Batch aggregation.
//!
//! Folds branch decisions, and optionally solver chain states, into an
//! [`AggregateReport`]. Pure: nothing outside the inputs is read.

use std::collections::BTreeMap;
use std::fmt;

use routeforge_classifier::BranchDecision;
use routeforge_config::GroupBy;
use routeforge_core::{Domain, Outcome, RouteScore};

use crate::chain::SolverChainState;

/// Key of a report count bucket.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CountKey {
    Outcome(Outcome),
    OutcomeRule(Outcome, String),
}

impl CountKey {
    pub fn outcome(&self) -> Outcome {
        match self {
            CountKey::Outcome(outcome) | CountKey::OutcomeRule(outcome, _) => *outcome,
        }
    }
}

impl fmt::Display for CountKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CountKey::Outcome(outcome) => write!(f, "{}", outcome),
            CountKey::OutcomeRule(outcome, rule) => write!(f, "{}/{}", outcome, rule),
        }
    }
}

/// Summary of one batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AggregateReport {
    /// Decisions per outcome (or outcome and rule).
    pub counts: BTreeMap<CountKey, usize>,
    /// Sum of decision scores plus one per decision.
    pub total_score: RouteScore,
    /// Decisions per route domain.
    pub per_domain: BTreeMap<Domain, usize>,
    /// Score per route domain.
    pub per_domain_score: BTreeMap<Domain, RouteScore>,
    /// Solver chain states folded in.
    pub chain_steps: usize,
    /// Longest chain trace folded in.
    pub deepest_chain: usize,
}

impl AggregateReport {
    /// Decisions with `outcome`, whatever the grouping.
    pub fn count(&self, outcome: Outcome) -> usize {
        self.counts
            .iter()
            .filter(|(key, _)| key.outcome() == outcome)
            .map(|(_, count)| *count)
            .sum()
    }

    /// Number of decisions folded in.
    pub fn decision_count(&self) -> usize {
        self.counts.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty() && self.chain_steps == 0
    }
}

/// Report builder with a grouping mode.
///
/// # Examples
///
/// ```
/// use routeforge_config::GroupBy;
/// use routeforge_solver::Aggregator;
///
/// let report = Aggregator::new(GroupBy::OutcomeAndRule).aggregate(&[], None);
/// assert!(report.is_empty());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Aggregator {
    group_by: GroupBy,
}

impl Aggregator {
    pub fn new(group_by: GroupBy) -> Self {
        Self { group_by }
    }

    pub fn group_by(&self) -> GroupBy {
        self.group_by
    }

    fn key_for(&self, decision: &BranchDecision) -> CountKey {
        match self.group_by {
            GroupBy::Outcome => CountKey::Outcome(decision.outcome),
            GroupBy::OutcomeAndRule => {
                CountKey::OutcomeRule(decision.outcome, decision.rule.clone())
            }
        }
    }

    /// Folds decisions and chain states into a report.
    pub fn aggregate(
        &self,
        decisions: &[BranchDecision],
        chains: Option<&[SolverChainState]>,
    ) -> AggregateReport {
        let mut report = decisions
            .iter()
            .fold(AggregateReport::default(), |mut report, decision| {
                *report.counts.entry(self.key_for(decision)).or_insert(0) += 1;
                *report.per_domain.entry(decision.domain()).or_insert(0) += 1;
                *report
                    .per_domain_score
                    .entry(decision.domain())
                    .or_insert(RouteScore::ZERO) += decision.score;
                report.total_score += decision.score + RouteScore::ONE;
                report
            });

        if let Some(states) = chains {
            report.chain_steps = states.len();
            report.deepest_chain = states.iter().map(|s| s.trace.len()).max().unwrap_or(0);
        }
        report
    }
}

/// Aggregates with per-outcome grouping.
///
/// # Examples
///
/// ```
/// use routeforge_solver::{aggregate, AggregateReport};
///
/// assert_eq!(aggregate(&[], None), AggregateReport::default());
/// ```
pub fn aggregate(
    decisions: &[BranchDecision],
    chains: Option<&[SolverChainState]>,
) -> AggregateReport {
    Aggregator::default().aggregate(decisions, chains)
}
