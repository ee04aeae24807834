//! # resgraph Core Library
//!
//! Turns a parsed protein structure into a residue-level spatial graph, encodes it
//! into flat, typed tensors for array-based consumers, and proves that the encoding
//! can be decoded back without loss.
//!
//! ## Architectural Philosophy
//!
//! The library follows a three-layer layout so that the numerical contracts stay
//! isolated from orchestration concerns.
//!
//! - **[`core`]: The Foundation.** Stateless data models (`ResidueFeature`,
//!   `ProteinGraph`, `Tensor`), the static residue feature table, spatial graph
//!   construction, the encoder/decoder pair, validation checks and file I/O.
//!
//! - **[`engine`]: The Configuration Layer.** Graph construction settings with their
//!   builder, progress reporting hooks, and the error type surfaced by workflows.
//!
//! - **[`workflows`]: The Public API.** Runs the complete featurize, build, encode,
//!   decode and validate sequence in one call and halts at the first failed check.

pub mod core;
pub mod engine;
pub mod workflows;
