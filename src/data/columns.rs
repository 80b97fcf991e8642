//! Coordinate column subsets used for distance computation.

use serde::{Deserialize, Serialize};

use crate::graph_error::GraphError;

/// Ordered list of feature columns that make up the coordinates of a point.
///
/// Defaults to `[0, 1, 2]` (x, y, z). Duplicates are allowed and simply
/// weight that axis twice.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnSelection(Vec<usize>);

impl Default for ColumnSelection {
    fn default() -> Self {
        Self(vec![0, 1, 2])
    }
}

impl ColumnSelection {
    pub fn new(columns: impl Into<Vec<usize>>) -> Self {
        Self(columns.into())
    }

    #[inline]
    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }

    /// Number of selected columns (the coordinate dimension).
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Check the selection against a feature matrix with `n_features` columns.
    pub fn validate(&self, n_features: usize) -> Result<(), GraphError> {
        if self.0.is_empty() {
            return Err(GraphError::EmptyColumns);
        }
        match self.0.iter().find(|&&c| c >= n_features) {
            Some(&column) => Err(GraphError::ColumnOutOfRange { column, n_features }),
            None => Ok(()),
        }
    }
}

impl From<Vec<usize>> for ColumnSelection {
    fn from(columns: Vec<usize>) -> Self {
        Self(columns)
    }
}

impl From<&[usize]> for ColumnSelection {
    fn from(columns: &[usize]) -> Self {
        Self(columns.to_vec())
    }
}

impl<const N: usize> From<[usize; N]> for ColumnSelection {
    fn from(columns: [usize; N]) -> Self {
        Self(columns.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_xyz() {
        assert_eq!(ColumnSelection::default().as_slice(), &[0, 1, 2]);
    }

    #[test]
    fn validate_reports_first_bad_column() {
        let cols = ColumnSelection::from([0, 5, 9]);
        assert_eq!(
            cols.validate(4),
            Err(GraphError::ColumnOutOfRange {
                column: 5,
                n_features: 4
            })
        );
        assert_eq!(ColumnSelection::new(vec![]).validate(4), Err(GraphError::EmptyColumns));
        assert!(cols.validate(10).is_ok());
    }
}
