//! Non-fatal conditions reported alongside a successful build.
//!
//! Builders never fail on degenerate input, and attaching a graph to a point
//! set that already carries one is allowed. Both are surfaced here so callers
//! can inspect them instead of scraping logs.

/// Why a batch could not get the full neighbourhood it asked for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Degeneracy {
    /// Fewer candidates than `k`; every point got `effective` neighbours.
    ClampedK { requested: usize, effective: usize },
    /// The batch holds a single point and produced no (non-loop) edges.
    SinglePoint,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Diagnostic {
    /// An adjacency was already attached and has been overwritten.
    PreexistingStructure {
        replaced_edges: usize,
        had_weights: bool,
    },
    /// A batch was too small for the requested neighbourhood.
    DegenerateBatch {
        batch_id: i64,
        size: usize,
        kind: Degeneracy,
    },
}

/// Ordered collection of [`Diagnostic`]s from one build call.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Diagnostics(Vec<Diagnostic>);

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, d: Diagnostic) {
        self.0.push(d);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.0.iter()
    }

    /// `true` if this build replaced a previously attached adjacency.
    pub fn has_preexisting_structure(&self) -> bool {
        self.0
            .iter()
            .any(|d| matches!(d, Diagnostic::PreexistingStructure { .. }))
    }

    /// `(batch_id, size, kind)` for every degenerate batch.
    pub fn degenerate_batches(&self) -> impl Iterator<Item = (i64, usize, Degeneracy)> + '_ {
        self.0.iter().filter_map(|d| match *d {
            Diagnostic::DegenerateBatch {
                batch_id,
                size,
                kind,
            } => Some((batch_id, size, kind)),
            _ => None,
        })
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.0
    }
}

impl Extend<Diagnostic> for Diagnostics {
    fn extend<I: IntoIterator<Item = Diagnostic>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl IntoIterator for Diagnostics {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
