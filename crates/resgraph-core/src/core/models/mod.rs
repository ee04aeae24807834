//! # Core Models Module
//!
//! Fixed-field data structures that flow between the pipeline stages.
//!
//! ## Key Components
//!
//! - [`residue`] - Raw residues handed over by structure readers and the typed
//!   [`ResidueFeature`](residue::ResidueFeature) records derived from them
//! - [`graph`] - Directed [`Edge`](graph::Edge)s, the shared node row
//!   [`layout`](graph::layout), and the unified [`ProteinGraph`](graph::ProteinGraph)
//! - [`tensor`] - Flat typed [`Tensor`](tensor::Tensor)s, the
//!   [`EncodedGraph`](tensor::EncodedGraph) transfer object and its decoded form
//!
//! Once constructed, none of these values is mutated by the pipeline; each stage
//! allocates its own output.

pub mod graph;
pub mod residue;
pub mod tensor;
