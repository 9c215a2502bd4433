//! RouteScore - integer decision score

use std::cmp::Ordering;
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub};

use serde::{Deserialize, Serialize};

use crate::grammar::Severity;
use crate::route::Route;

/// Score attached to a branch decision.
///
/// Scores are plain integers; reports sum them.
///
/// # Examples
///
/// ```
/// use routeforge_core::RouteScore;
///
/// let total: RouteScore = [RouteScore::of(3), RouteScore::of(4)].into_iter().sum();
/// assert_eq!(total, RouteScore::of(7));
/// assert!(RouteScore::of(7) > RouteScore::ONE);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RouteScore {
    score: i64,
}

impl RouteScore {
    /// The zero score.
    pub const ZERO: RouteScore = RouteScore { score: 0 };

    /// A score of 1 (useful for incrementing).
    pub const ONE: RouteScore = RouteScore { score: 1 };

    /// Creates a new RouteScore with the given value.
    #[inline]
    pub const fn of(score: i64) -> Self {
        RouteScore { score }
    }

    /// Returns the score value.
    #[inline]
    pub const fn value(&self) -> i64 {
        self.score
    }

    /// Scores a route at a given attempt.
    ///
    /// `weight(severity) * (attempt + 1) + len(domain) + len(action) + chars(identifier)`
    ///
    /// # Examples
    ///
    /// ```
    /// use routeforge_core::{parse, RouteScore};
    ///
    /// // critical = 8; "incident" 8, "discover" 8, "id-1" 4
    /// let route = parse("incident/discover/id-1/critical");
    /// assert_eq!(RouteScore::for_route(&route, 0), RouteScore::of(28));
    /// assert_eq!(RouteScore::for_route(&route, 1), RouteScore::of(36));
    /// ```
    pub fn for_route(route: &Route, attempt: u32) -> Self {
        let weighted = severity_term(route.severity(), attempt);
        let lengths = route.domain().as_str().len()
            + route.action().as_str().len()
            + route.identifier().chars().count();
        RouteScore::of(weighted.saturating_add(lengths as i64))
    }
}

fn severity_term(severity: Severity, attempt: u32) -> i64 {
    severity.weight().saturating_mul(i64::from(attempt) + 1)
}

impl Ord for RouteScore {
    fn cmp(&self, other: &Self) -> Ordering {
        self.score.cmp(&other.score)
    }
}

impl PartialOrd for RouteScore {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Add for RouteScore {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        RouteScore::of(self.score.saturating_add(other.score))
    }
}

impl AddAssign for RouteScore {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl Sub for RouteScore {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        RouteScore::of(self.score.saturating_sub(other.score))
    }
}

impl Sum for RouteScore {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(RouteScore::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a RouteScore> for RouteScore {
    fn sum<I: Iterator<Item = &'a RouteScore>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

impl fmt::Debug for RouteScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RouteScore({})", self.score)
    }
}

impl fmt::Display for RouteScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.score)
    }
}

impl From<i64> for RouteScore {
    fn from(score: i64) -> Self {
        RouteScore::of(score)
    }
}
