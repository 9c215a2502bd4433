//! Engine statistics.
//!
//! Stack-allocated counters for one batch run.

use std::time::{Duration, Instant};

use routeforge_core::RouteOrigin;

/// Batch-level statistics.
///
/// # Example
///
/// ```
/// use routeforge_core::RouteOrigin;
/// use routeforge_solver::stats::EngineStats;
///
/// let mut stats = EngineStats::default();
/// stats.start();
/// stats.record_route(RouteOrigin::Parsed);
/// stats.record_route(RouteOrigin::Fallback);
/// stats.record_decision();
///
/// assert_eq!(stats.routes_parsed, 2);
/// assert_eq!(stats.fallbacks, 1);
/// assert_eq!(stats.decisions, 1);
/// assert_eq!(stats.fallback_rate(), 0.5);
/// ```
#[derive(Debug, Clone, Default)]
pub struct EngineStats {
    start_time: Option<Instant>,
    /// Routes read from the catalog.
    pub routes_parsed: u64,
    /// Routes replaced by a grammar fallback.
    pub fallbacks: u64,
    /// Routes with at least one coerced member.
    pub coercions: u64,
    /// Decisions recorded.
    pub decisions: u64,
    /// Solver chain states built.
    pub chain_steps: u64,
}

impl EngineStats {
    /// Marks the start of the batch.
    pub fn start(&mut self) {
        self.start_time = Some(Instant::now());
    }

    /// Returns the elapsed time since the batch started.
    pub fn elapsed(&self) -> Duration {
        self.start_time.map(|t| t.elapsed()).unwrap_or_default()
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed().as_millis() as u64
    }

    /// Records a parsed route by origin.
    pub fn record_route(&mut self, origin: RouteOrigin) {
        self.routes_parsed += 1;
        match origin {
            RouteOrigin::Parsed => {}
            RouteOrigin::Coerced => self.coercions += 1,
            RouteOrigin::Fallback => self.fallbacks += 1,
        }
    }

    pub fn record_decision(&mut self) {
        self.decisions += 1;
    }

    pub fn record_chain_steps(&mut self, steps: usize) {
        self.chain_steps += steps as u64;
    }

    /// Returns the routes per second rate.
    pub fn routes_per_second(&self) -> f64 {
        let secs = self.elapsed().as_secs_f64();
        if secs > 0.0 {
            self.routes_parsed as f64 / secs
        } else {
            0.0
        }
    }

    /// Returns the share of routes that fell back (fallbacks / parsed).
    pub fn fallback_rate(&self) -> f64 {
        if self.routes_parsed == 0 {
            0.0
        } else {
            self.fallbacks as f64 / self.routes_parsed as f64
        }
    }
}
