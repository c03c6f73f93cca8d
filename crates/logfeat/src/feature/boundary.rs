//! Boundary selection: pick one endpoint value of a curve pair for a target depth.
//!
//! A [`CurvePair`] holds two `(position, value)` endpoints. A selector looks at
//! the target depth and returns exactly one of the two values; nothing is
//! interpolated and no new value is synthesized.
//!
//! Selectors are total: every combination of finite, infinite and NaN inputs
//! produces one of the endpoint values, including degenerate pairs with
//! `p1 == p2`.

use crate::error::FeatureError;

/// Two boundary endpoints of one row: `(p1, v1)` and `(p2, v2)`.
///
/// Positions are not required to be ordered.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurvePair {
    pub p1: f64,
    pub p2: f64,
    pub v1: f64,
    pub v2: f64,
}

impl CurvePair {
    #[inline]
    pub fn new(p1: f64, p2: f64, v1: f64, v2: f64) -> Self {
        Self { p1, p2, v1, v2 }
    }
}

// =============================================================================
// Selector Trait
// =============================================================================

/// Strategy that selects one endpoint value of a [`CurvePair`] for a depth.
///
/// Implementations must be pure: the result may depend only on the pair and
/// the depth, never on the row index, other rows, or the calling thread.
pub trait BoundarySelector: Send + Sync {
    /// Return either `pair.v1` or `pair.v2`.
    fn select(&self, pair: &CurvePair, depth: f64) -> f64;
}

impl<F> BoundarySelector for F
where
    F: Fn(&CurvePair, f64) -> f64 + Send + Sync,
{
    #[inline]
    fn select(&self, pair: &CurvePair, depth: f64) -> f64 {
        self(pair, depth)
    }
}

// =============================================================================
// Built-in Rules
// =============================================================================

/// Built-in boundary selection rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoundaryRule {
    /// Select `v2` only when `p2` is strictly the deeper endpoint and the
    /// target depth lies strictly beyond it; otherwise `v1`.
    #[default]
    DeeperPassed,
    /// Select the value of the endpoint closest to the target depth.
    /// Ties resolve to `v1`.
    Nearest,
}

impl BoundaryRule {
    /// Short name, as accepted by [`FromStr`](std::str::FromStr) and recorded
    /// in extraction logs.
    pub fn name(self) -> &'static str {
        match self {
            Self::DeeperPassed => "deeper_passed",
            Self::Nearest => "nearest",
        }
    }
}

impl std::str::FromStr for BoundaryRule {
    type Err = FeatureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "deeper_passed" => Ok(Self::DeeperPassed),
            "nearest" => Ok(Self::Nearest),
            other => Err(FeatureError::invalid_argument(
                "rule",
                format!("unknown boundary rule '{other}' (expected 'deeper_passed' or 'nearest')"),
            )),
        }
    }
}

impl BoundarySelector for BoundaryRule {
    #[inline]
    fn select(&self, pair: &CurvePair, depth: f64) -> f64 {
        match self {
            Self::DeeperPassed => deeper_passed(pair, depth),
            Self::Nearest => nearest(pair, depth),
        }
    }
}

#[inline]
fn deeper_passed(pair: &CurvePair, depth: f64) -> f64 {
    // NaN fails both comparisons and lands on v1.
    if pair.p2 > pair.p1 && depth > pair.p2 {
        pair.v2
    } else {
        pair.v1
    }
}

#[inline]
fn nearest(pair: &CurvePair, depth: f64) -> f64 {
    if (depth - pair.p2).abs() < (depth - pair.p1).abs() {
        pair.v2
    } else {
        pair.v1
    }
}
