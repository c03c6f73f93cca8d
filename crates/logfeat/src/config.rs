//! Extraction configuration with builder pattern.
//!
//! [`ExtractConfig`] uses the `bon` crate for builder generation; `build()`
//! validates the configuration.
//!
//! # Example
//!
//! ```
//! use logfeat::{BoundaryRule, CurveLayout, ExtractConfig};
//!
//! // All defaults: auto layout, deeper-passed rule, machine parallelism
//! let config = ExtractConfig::builder().build().unwrap();
//!
//! let config = ExtractConfig::builder()
//!     .rule(BoundaryRule::Nearest)
//!     .layout(CurveLayout::Ordinal)
//!     .n_threads(4)
//!     .build()
//!     .unwrap();
//!
//! assert!(ExtractConfig::builder().n_threads(0).build().is_err());
//! ```

use std::num::NonZeroUsize;

use bon::Builder;

use crate::data::{CurveLayout, CurvePairColumns};
use crate::error::Result;
use crate::feature::BoundaryRule;
use crate::validate::{resolve_thread_count, validate_thread_count};

/// Configuration for depth-feature extraction.
#[derive(Debug, Clone, PartialEq, Builder)]
#[builder(
    derive(Clone, Debug),
    finish_fn(vis = "", name = __build_internal)
)]
pub struct ExtractConfig {
    /// Boundary selection rule. Default: [`BoundaryRule::DeeperPassed`].
    #[builder(default)]
    pub rule: BoundaryRule,

    /// How batch columns map onto curves. Default: [`CurveLayout::Auto`].
    #[builder(default)]
    pub layout: CurveLayout,

    /// Column names of the pair layout. Default: `p1`, `p2`, `v1`, `v2`.
    #[builder(default)]
    pub columns: CurvePairColumns,

    /// Worker count for table extraction. `None` uses all available cores,
    /// resolved at call time. Zero and negative values are rejected.
    pub n_threads: Option<i64>,
}

impl<S: extract_config_builder::IsComplete> ExtractConfigBuilder<S> {
    /// Build and validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`FeatureError::InvalidArgument`](crate::FeatureError::InvalidArgument)
    /// if `n_threads <= 0`.
    pub fn build(self) -> Result<ExtractConfig> {
        let config = self.__build_internal();
        config.validate()?;
        Ok(config)
    }
}

impl ExtractConfig {
    /// Check every configured parameter.
    pub fn validate(&self) -> Result<()> {
        if let Some(n) = self.n_threads {
            validate_thread_count(n)?;
        }
        Ok(())
    }

    /// Worker count to use for this call.
    pub fn resolved_threads(&self) -> Result<NonZeroUsize> {
        resolve_thread_count(self.n_threads)
    }

    /// Copy of this config with a different thread count.
    pub fn with_threads(&self, n_threads: Option<i64>) -> Result<Self> {
        let config = Self {
            n_threads,
            ..self.clone()
        };
        config.validate()?;
        Ok(config)
    }
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self::builder().__build_internal()
    }
}
