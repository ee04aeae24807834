//! # Core Module
//!
//! This module provides the stateless building blocks of the residue graph pipeline.
//!
//! ## Overview
//!
//! Every operation here is a pure function over in-memory values: a residue list goes
//! in, a freshly allocated result comes out, and nothing published is mutated later.
//! The submodules mirror the stages of the pipeline:
//!
//! - **Residue Features** ([`features`]) - Static amino-acid lookup table and feature extraction
//! - **Data Models** ([`models`]) - Residues, edges, the unified graph, tensors and decoded records
//! - **Spatial Graph** ([`graph`]) - Distance-gated residue contact graph construction
//! - **Tensor Codec** ([`codec`]) - Encoding the graph into typed flat arrays and decoding it back
//! - **Validation** ([`validation`]) - Shape, round-trip, edge and topology checks
//! - **File I/O** ([`io`]) - Structure readers and CSV export of decoded graphs
//! - **Utilities** ([`utils`]) - Geometry helpers shared across stages

pub mod codec;
pub mod features;
pub mod graph;
pub mod io;
pub mod models;
pub mod utils;
pub mod validation;
