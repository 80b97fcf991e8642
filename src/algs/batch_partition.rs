//! Group point indices by batch id.
//!
//! Determinism:
//! - Batches are ordered by ascending batch id.
//! - Indices inside a batch are ascending global point indices.
//!
//! Points are never reindexed; a batch only records which global indices
//! belong to it.

use hashbrown::HashMap;

/// One event: its id and the global indices of its points.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Batch {
    id: i64,
    indices: Vec<usize>,
}

impl Batch {
    #[inline]
    pub fn id(&self) -> i64 {
        self.id
    }

    /// Global point indices, ascending. Never empty.
    #[inline]
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

/// Exact partition of `0..n_points` into batches.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BatchPartition {
    batches: Vec<Batch>,
    /// Position in `batches` for every point.
    slot_of_point: Vec<usize>,
}

impl BatchPartition {
    #[inline]
    pub fn batches(&self) -> &[Batch] {
        &self.batches
    }

    /// Number of batches.
    #[inline]
    pub fn len(&self) -> usize {
        self.batches.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.batches.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Batch> {
        self.batches.iter()
    }

    /// Batch containing global point `p`.
    pub fn batch_of(&self, p: usize) -> Option<&Batch> {
        self.slot_of_point.get(p).map(|&s| &self.batches[s])
    }
}

/// Split points into batches according to `batch_ids[i]`.
pub fn partition_batches(batch_ids: &[i64]) -> BatchPartition {
    let mut slot_of_id: HashMap<i64, usize> = HashMap::new();
    let mut batches: Vec<Batch> = Vec::new();
    for (p, &id) in batch_ids.iter().enumerate() {
        let slot = *slot_of_id.entry(id).or_insert_with(|| {
            batches.push(Batch {
                id,
                indices: Vec::new(),
            });
            batches.len() - 1
        });
        batches[slot].indices.push(p);
    }

    batches.sort_unstable_by_key(|b| b.id);

    let mut slot_of_point = vec![0; batch_ids.len()];
    for (slot, b) in batches.iter().enumerate() {
        for &p in &b.indices {
            slot_of_point[p] = slot;
        }
    }

    BatchPartition {
        batches,
        slot_of_point,
    }
}
