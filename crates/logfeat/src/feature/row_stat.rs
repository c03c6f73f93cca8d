//! Per-row statistic over four integer columns.

/// Number of integer columns a row statistic consumes.
pub const ROW_STAT_WIDTH: usize = 4;

/// Strategy computing one count from the four values of a row.
///
/// `None` marks a null cell. Implementations must be pure.
pub trait RowStatistic: Send + Sync {
    fn count(&self, row: &[Option<i64>; ROW_STAT_WIDTH]) -> i64;
}

/// Counts values that are strictly positive and odd. Nulls are skipped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PositiveOddCount;

impl RowStatistic for PositiveOddCount {
    #[inline]
    fn count(&self, row: &[Option<i64>; ROW_STAT_WIDTH]) -> i64 {
        row.iter()
            .flatten()
            .filter(|&&v| v > 0 && v % 2 != 0)
            .count() as i64
    }
}
