//! Append-only decision trace for one batch.

use crate::decision::BranchDecision;

/// Records branch decisions in insertion order.
///
/// No deduplication: a route retried several times appears once per
/// attempt. The batch boundary is up to the caller, who ends it with
/// [`clear`](Self::clear) or [`take`](Self::take).
///
/// # Example
///
/// ```
/// use routeforge_classifier::{classify, ClassifyContext, TraceAccumulator};
/// use routeforge_config::RunMode;
/// use routeforge_core::parse;
///
/// let mut trace = TraceAccumulator::new();
/// let route = parse("mesh/drain/n-1/low");
/// trace.record(classify(&route, &ClassifyContext::new(0, RunMode::Live)));
/// trace.record(classify(&route, &ClassifyContext::new(1, RunMode::Live)));
///
/// assert_eq!(trace.len(), 2);
/// assert_eq!(trace.snapshot()[1].attempt, 1);
///
/// trace.clear();
/// assert!(trace.is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct TraceAccumulator {
    decisions: Vec<BranchDecision>,
}

impl TraceAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            decisions: Vec::with_capacity(capacity),
        }
    }

    /// Appends a decision.
    pub fn record(&mut self, decision: BranchDecision) {
        self.decisions.push(decision);
    }

    /// Copy of every recorded decision, in insertion order.
    pub fn snapshot(&self) -> Vec<BranchDecision> {
        self.decisions.clone()
    }

    /// Borrowed view of the recorded decisions.
    pub fn as_slice(&self) -> &[BranchDecision] {
        &self.decisions
    }

    pub fn iter(&self) -> std::slice::Iter<'_, BranchDecision> {
        self.decisions.iter()
    }

    /// Drops every recorded decision.
    pub fn clear(&mut self) {
        self.decisions.clear();
    }

    /// Moves the recorded decisions out, leaving the trace empty.
    pub fn take(&mut self) -> Vec<BranchDecision> {
        std::mem::take(&mut self.decisions)
    }

    pub fn len(&self) -> usize {
        self.decisions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decisions.is_empty()
    }
}

impl Extend<BranchDecision> for TraceAccumulator {
    fn extend<I: IntoIterator<Item = BranchDecision>>(&mut self, iter: I) {
        self.decisions.extend(iter);
    }
}

impl<'a> IntoIterator for &'a TraceAccumulator {
    type Item = &'a BranchDecision;
    type IntoIter = std::slice::Iter<'a, BranchDecision>;

    fn into_iter(self) -> Self::IntoIter {
        self.decisions.iter()
    }
}
