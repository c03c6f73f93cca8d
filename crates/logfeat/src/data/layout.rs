//! Curve layouts: how the columns of a batch map onto curve samples.
//!
//! # Supported layouts
//!
//! - **Pair**: four columns `p1`, `p2`, `v1`, `v2` holding one [`CurvePair`]
//!   per row.
//! - **Ordinal**: every column is a curve sample; column `j` of a row sits at
//!   implicit depth `j`.
//!
//! [`CurvePair`]: crate::feature::CurvePair

use std::str::FromStr;

use crate::error::FeatureError;

/// Requested curve layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CurveLayout {
    /// Pair layout if all pair columns exist, ordinal if none exist.
    #[default]
    Auto,
    /// Explicit position/value pair columns.
    Pair,
    /// All columns are samples along the implicit ordinal depth axis.
    Ordinal,
}

impl CurveLayout {
    pub fn name(self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Pair => "pair",
            Self::Ordinal => "ordinal",
        }
    }
}

impl FromStr for CurveLayout {
    type Err = FeatureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "auto" => Ok(Self::Auto),
            "pair" => Ok(Self::Pair),
            "ordinal" => Ok(Self::Ordinal),
            other => Err(FeatureError::invalid_argument(
                "layout",
                format!("unknown curve layout '{other}' (expected 'auto', 'pair' or 'ordinal')"),
            )),
        }
    }
}

/// Column names of the pair layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurvePairColumns {
    pub p1: String,
    pub p2: String,
    pub v1: String,
    pub v2: String,
}

impl Default for CurvePairColumns {
    fn default() -> Self {
        Self {
            p1: "p1".into(),
            p2: "p2".into(),
            v1: "v1".into(),
            v2: "v2".into(),
        }
    }
}

impl CurvePairColumns {
    /// Names in `[p1, p2, v1, v2]` order.
    pub fn names(&self) -> [&str; 4] {
        [&self.p1, &self.p2, &self.v1, &self.v2]
    }
}

/// A layout bound to concrete column indices of a schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ResolvedLayout {
    /// Indices of `[p1, p2, v1, v2]`.
    Pair([usize; 4]),
    /// Curve sample columns in ordinal order.
    Ordinal(Vec<usize>),
}

/// Bracketing sample indices for `depth` on an ordinal curve of `n` samples.
///
/// Depths before the first sample bracket `(0, 1)`, depths past the last
/// sample bracket `(n - 2, n - 1)`. A single-sample curve brackets itself.
pub(crate) fn ordinal_bracket(n: usize, depth: f64) -> (usize, usize) {
    if n < 2 {
        return (0, 0);
    }
    let last_lo = n - 2;
    let lo = if depth.is_nan() || depth <= 0.0 {
        0
    } else {
        // Saturating cast, so huge depths clamp too.
        (depth.floor() as usize).min(last_lo)
    };
    (lo, lo + 1)
}
