//! Columnar data containers and column access.
//!
//! - [`Table`]: ordered Arrow record batches sharing one schema
//! - [`CurveLayout`] / [`CurvePairColumns`]: how batch columns map onto curves

pub(crate) mod columns;
mod layout;
mod table;

pub(crate) use layout::{ordinal_bracket, ResolvedLayout};
pub use layout::{CurveLayout, CurvePairColumns};
pub use table::Table;
