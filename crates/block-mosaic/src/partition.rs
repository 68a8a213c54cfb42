//! Row partitioning for the parallel driver.

use std::num::NonZeroUsize;
use std::ops::Range;
use std::thread;

/// A contiguous row range handed to one worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partition {
    /// Worker index, `0..N`.
    pub index: usize,
    /// Rows `[start, end)` owned by the worker.
    pub rows: Range<usize>,
}

impl Partition {
    #[inline]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Hardware concurrency, or 1 when it cannot be determined.
pub fn available_workers() -> usize {
    thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1)
}

/// Split `0..height` into at most `workers` contiguous row ranges.
///
/// The worker count is clamped to `1..=height` so no partition is empty.
/// Every partition gets `height / N` rows except the last, which also takes
/// the remainder.
///
/// # Example
///
/// ```
/// use block_mosaic::plan_partitions;
///
/// let rows: Vec<_> = plan_partitions(10, 3).into_iter().map(|p| p.rows).collect();
/// assert_eq!(rows, vec![0..3, 3..6, 6..10]);
/// ```
pub fn plan_partitions(height: usize, workers: usize) -> Vec<Partition> {
    let workers = workers.clamp(1, height.max(1));
    let segment = height / workers;
    (0..workers)
        .map(|index| {
            let start = index * segment;
            let end = if index == workers - 1 {
                height
            } else {
                start + segment
            };
            Partition {
                index,
                rows: start..end,
            }
        })
        .collect()
}

/// Split `0..height` into at most `workers` row ranges whose boundaries fall
/// on the `square_size` block grid.
///
/// Partitions are whole block rows: `ceil(height / square_size)` block rows
/// are shared out `block_rows / N` per worker, the last worker taking the
/// remainder. Because no block is ever cut at a seam, a parallel run over
/// these partitions writes exactly what a sequential run writes.
///
/// ```
/// use block_mosaic::plan_block_aligned_partitions;
///
/// let rows: Vec<_> = plan_block_aligned_partitions(10, 3, 3)
///     .into_iter()
///     .map(|p| p.rows)
///     .collect();
/// assert_eq!(rows, vec![0..3, 3..6, 6..10]);
/// ```
///
/// # Panics
///
/// Panics if `square_size` is zero.
pub fn plan_block_aligned_partitions(
    height: usize,
    workers: usize,
    square_size: usize,
) -> Vec<Partition> {
    assert!(square_size > 0, "square size must be positive");
    let block_rows = height.div_ceil(square_size);
    plan_partitions(block_rows, workers)
        .into_iter()
        .map(|p| {
            let start = (p.rows.start * square_size).min(height);
            let end = (p.rows.end * square_size).min(height);
            Partition {
                index: p.index,
                rows: start..end,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn assert_tiles(height: usize, partitions: &[Partition]) {
        let mut next = 0;
        for (i, p) in partitions.iter().enumerate() {
            assert_eq!(p.index, i);
            assert_eq!(p.rows.start, next, "gap or overlap before partition {i}");
            assert!(!p.is_empty(), "partition {i} is empty");
            next = p.rows.end;
        }
        assert_eq!(next, height);
        assert_eq!(partitions.iter().map(Partition::len).sum::<usize>(), height);
    }

    #[test]
    fn test_partitions_tile_height() {
        for height in 1..64 {
            for workers in 1..20 {
                let partitions = plan_partitions(height, workers);
                assert_tiles(height, &partitions);
                assert_eq!(partitions.len(), workers.min(height));
            }
        }
    }

    #[test]
    fn test_last_partition_absorbs_remainder() {
        let partitions = plan_partitions(11, 4);
        let rows: Vec<_> = partitions.into_iter().map(|p| p.rows).collect();
        assert_eq!(rows, vec![0..2, 2..4, 4..6, 6..11]);
    }

    #[test]
    fn test_more_workers_than_rows() {
        let partitions = plan_partitions(3, 8);
        let rows: Vec<_> = partitions.into_iter().map(|p| p.rows).collect();
        assert_eq!(rows, vec![0..1, 1..2, 2..3]);
    }

    #[test]
    fn test_zero_workers_means_one() {
        assert_eq!(
            plan_partitions(5, 0),
            vec![Partition {
                index: 0,
                rows: 0..5
            }]
        );
    }

    #[test]
    fn test_aligned_partitions_tile_on_block_rows() {
        for height in 1..48 {
            for workers in 1..9 {
                for square in 1..7 {
                    let partitions = plan_block_aligned_partitions(height, workers, square);
                    assert_tiles(height, &partitions);
                    for p in &partitions[..partitions.len() - 1] {
                        assert_eq!(p.rows.end % square, 0, "{height}/{workers}/{square}");
                    }
                }
            }
        }
    }

    #[test]
    fn test_aligned_partitions_fewer_block_rows_than_workers() {
        let rows: Vec<_> = plan_block_aligned_partitions(9, 8, 4)
            .into_iter()
            .map(|p| p.rows)
            .collect();
        assert_eq!(rows, vec![0..4, 4..8, 8..9]);
    }

    #[test]
    fn test_available_workers_is_positive() {
        assert!(available_workers() >= 1);
    }
}
