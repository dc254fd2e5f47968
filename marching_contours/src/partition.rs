use std::ops::Range;

/// Contiguous slice of `items` owned by `worker_id` out of `workers`.
///
/// Every phase derives its ranges from this one function, so each worker
/// computes the same disjoint split on its own: the ranges for ids
/// `0..workers` tile `0..items` in order with no gaps and no overlap.
pub fn row_range(worker_id: usize, workers: usize, items: usize) -> Range<usize> {
    debug_assert!(workers > 0, "worker count must be positive");
    debug_assert!(worker_id < workers, "worker id out of range");
    let start = (worker_id * items) / workers;
    let end = (((worker_id + 1) * items) / workers).min(items);
    start..end
}
