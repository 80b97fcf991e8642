//! Per-batch execution helpers.
//!
//! Batches never share points, so per-batch work needs no synchronisation.
//! With the `rayon` feature the closures run on the global Rayon pool;
//! without it they run sequentially. Results are always returned in batch
//! order, so output does not depend on the feature or on thread scheduling.

use crate::algs::batch_partition::Batch;

/// Executes `func(&batch)` for every batch and collects the results in order.
pub fn map_batches<T, F>(batches: &[Batch], func: F) -> Vec<T>
where
    T: Send,
    F: Fn(&Batch) -> T + Send + Sync,
{
    #[cfg(feature = "rayon")]
    {
        use rayon::prelude::*;
        batches.par_iter().map(func).collect()
    }
    #[cfg(not(feature = "rayon"))]
    {
        batches.iter().map(func).collect()
    }
}
