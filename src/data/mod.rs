//! Input containers: point features, batch ids and column selections.

pub mod columns;
pub mod point_set;
