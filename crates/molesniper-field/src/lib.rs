//! Grid-space data structures for leaf-scatter target prediction.
//!
//! This crate provides the world model shared by the heuristic targeting
//! logic, the training-data synthesizer, and any consumer of the trained
//! model:
//!
//! - [`GridSpec`] - The fixed target lattice tiling a rectangle of the stage,
//!   and the single authority for cell indexing and coordinate conversion
//! - [`PlayerPose`] - A player position plus unit-length facing direction
//! - [`DensityMap`] - Per-cell leaf coverage in \[0.0, 1.0\]
//! - [`ScatterSeed`] - Serializable seed for deterministic random draws
//!
//! # Cell Indexing
//!
//! Cells are addressed either by `(col, row)` or by a flattened row-major
//! index `row * cols + col`. The flattened index is also the label space of
//! the trained model and the layout of the feature vector, so every consumer
//! must go through [`GridSpec::cell_index`] / [`GridSpec::index_to_cell`]
//! rather than re-deriving the arithmetic.

pub use self::{density::*, grid::*, pose::*, seed::*};

pub(crate) mod density;
pub(crate) mod grid;
pub(crate) mod pose;
pub(crate) mod seed;
