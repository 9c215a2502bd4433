//! Classification context passed to every rule.

use routeforge_config::RunMode;
use routeforge_core::Attempt;

/// Per-call inputs besides the route itself.
///
/// # Examples
///
/// ```
/// use routeforge_classifier::ClassifyContext;
/// use routeforge_config::RunMode;
///
/// let ctx = ClassifyContext::new(2, RunMode::Replay).with_domain_volume(7);
/// assert_eq!(ctx.attempt(), 2);
/// assert_eq!(ctx.domain_volume(), 7);
/// assert_eq!(ctx.depth(), 0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ClassifyContext {
    attempt: Attempt,
    mode: RunMode,
    domain_volume: usize,
    depth: u32,
}

impl ClassifyContext {
    pub fn new(attempt: u32, mode: RunMode) -> Self {
        Self {
            attempt: Attempt::new(attempt),
            mode,
            domain_volume: 0,
            depth: 0,
        }
    }

    /// Builds a context from an untyped attempt counter.
    ///
    /// NaN, infinite and negative attempts are treated as attempt 0.
    pub fn from_raw_attempt(attempt: f64, mode: RunMode) -> Self {
        Self {
            attempt: Attempt::from_f64(attempt),
            ..Self::new(0, mode)
        }
    }

    /// Number of routes sharing this route's domain in the current batch.
    pub fn with_domain_volume(mut self, volume: usize) -> Self {
        self.domain_volume = volume;
        self
    }

    /// Solver chain step the route was derived at.
    pub fn with_depth(mut self, depth: u32) -> Self {
        self.depth = depth;
        self
    }

    pub fn with_attempt(mut self, attempt: Attempt) -> Self {
        self.attempt = attempt;
        self
    }

    #[inline]
    pub fn attempt(&self) -> u32 {
        self.attempt.get()
    }

    #[inline]
    pub fn mode(&self) -> RunMode {
        self.mode
    }

    #[inline]
    pub fn domain_volume(&self) -> usize {
        self.domain_volume
    }

    #[inline]
    pub fn depth(&self) -> u32 {
        self.depth
    }
}
