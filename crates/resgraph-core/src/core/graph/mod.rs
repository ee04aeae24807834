//! # Spatial Graph Module
//!
//! Builds the residue contact graph: every unordered residue pair whose coordinates
//! lie within the distance cutoff becomes two directed edges, `(i, j)` immediately
//! followed by `(j, i)`, with pairs emitted in ascending `(i, j)` order.
//!
//! - [`builder`] - The [`SpatialGraphBuilder`](builder::SpatialGraphBuilder) with its
//!   neighbor mode and search strategy options
//! - [`cell_list`] - Uniform grid bucketing used by the cell-list search strategy

pub mod builder;
pub(crate) mod cell_list;
