use crate::data::point_set::PointSet;
use crate::graph::validate_edges;
use crate::graph_error::GraphError;

/// Trait for validating data structure invariants.
pub trait DebugInvariants {
    /// Assert invariants in debug builds or when invariant checking is enabled.
    fn debug_assert_invariants(&self);
    /// Validate invariants and return the first error encountered.
    fn validate_invariants(&self) -> Result<(), GraphError>;
}

/// Helper macro to run a fallible check and panic on error when invariant
/// checking is enabled.
#[macro_export]
macro_rules! debug_invariants {
    ($expr:expr, $($ctx:tt)*) => {
        #[cfg(any(debug_assertions, feature = "check-invariants"))]
        if let Err(e) = $expr {
            panic!(concat!("[invariants] ", $($ctx)*, ": {}"), e);
        }
    };
}

impl DebugInvariants for PointSet {
    fn debug_assert_invariants(&self) {
        crate::debug_invariants!(self.validate_invariants(), "PointSet");
    }

    /// An attached adjacency must be batch-respecting and in range.
    fn validate_invariants(&self) -> Result<(), GraphError> {
        match self.edge_index() {
            Some(edge_index) => validate_edges(self, edge_index, self.edge_weight()),
            None => Ok(()),
        }
    }
}
