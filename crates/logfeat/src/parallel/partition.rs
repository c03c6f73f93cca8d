//! Contiguous, row-balanced grouping of whole batches.

use std::num::NonZeroUsize;
use std::ops::Range;

/// A contiguous run of whole batches assigned to one worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partition {
    /// Position of this partition in table order.
    pub index: usize,
    /// Batch indices covered by this partition.
    pub batches: Range<usize>,
    /// Total rows across the covered batches.
    pub n_rows: usize,
}

impl Partition {
    #[inline]
    pub fn n_batches(&self) -> usize {
        self.batches.len()
    }
}

/// Split batches with the given row counts into at most `n_workers` groups.
///
/// Produces `min(n_workers, row_counts.len())` partitions. Each one holds at
/// least one batch, batches are never split or reordered, and cuts are placed
/// at the batch boundary closest to the ideal even split of the row total
/// (ties go to the earlier boundary).
pub fn partition_batches(row_counts: &[usize], n_workers: NonZeroUsize) -> Vec<Partition> {
    let n_batches = row_counts.len();
    if n_batches == 0 {
        return Vec::new();
    }
    let k = n_workers.get().min(n_batches);

    // prefix[i] = rows in batches[..i]
    let mut prefix = Vec::with_capacity(n_batches + 1);
    prefix.push(0usize);
    for &rows in row_counts {
        prefix.push(prefix[prefix.len() - 1] + rows);
    }
    let total = prefix[n_batches];

    let mut partitions = Vec::with_capacity(k);
    let mut start = 0;
    for g in 0..k {
        let end = if g + 1 == k {
            n_batches
        } else {
            // Leave at least one batch for each remaining partition.
            let min_end = start + 1;
            let max_end = n_batches - (k - g - 1);
            let target = ideal_cut(total, g + 1, k);
            closest_cut(&prefix, target, min_end, max_end)
        };
        partitions.push(Partition {
            index: g,
            batches: start..end,
            n_rows: prefix[end] - prefix[start],
        });
        start = end;
    }
    partitions
}

/// `total * g / k` without intermediate overflow.
#[inline]
fn ideal_cut(total: usize, g: usize, k: usize) -> usize {
    ((total as u128 * g as u128) / k as u128) as usize
}

/// Cut index in `[min_end, max_end]` whose prefix sum is closest to `target`.
fn closest_cut(prefix: &[usize], target: usize, min_end: usize, max_end: usize) -> usize {
    let above = prefix.partition_point(|&p| p < target).clamp(min_end, max_end);
    let below = above.saturating_sub(1).clamp(min_end, max_end);
    if prefix[below].abs_diff(target) <= prefix[above].abs_diff(target) {
        below
    } else {
        above
    }
}
