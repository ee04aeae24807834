//! # Workflows Module
//!
//! Top-level entry points that chain the core stages into a complete run.
//!
//! - **Graph Pipeline** ([`pipeline`]) - Feature extraction, spatial graph
//!   construction, encoding, and the decode/validate round trip.

pub mod pipeline;
