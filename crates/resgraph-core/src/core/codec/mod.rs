//! # Tensor Codec Module
//!
//! Converts a [`ProteinGraph`](crate::core::models::graph::ProteinGraph) into the
//! three typed flat arrays of an [`EncodedGraph`](crate::core::models::tensor::EncodedGraph)
//! and back into plain per-residue records.
//!
//! - [`encoder`] - `node_features` and `edge_attr` as `float32`, `edge_index` as
//!   `int64`, row-major, shapes preserved exactly
//! - [`decoder`] - Slices node rows through the shared
//!   [`layout`](crate::core::models::graph::layout) and passes edge arrays through

pub mod decoder;
pub mod encoder;
