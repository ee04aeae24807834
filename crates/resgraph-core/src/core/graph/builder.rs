use super::cell_list::CellList;
use crate::core::models::graph::{Edge, EdgeArrays};
use crate::core::models::residue::ResidueFeature;
use crate::core::utils::geometry::euclidean_distance;
use nalgebra::Point3;
use std::cmp::Ordering;
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use tracing::{debug, info, instrument};

#[cfg(not(feature = "parallel"))]
use itertools::Itertools;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

pub const DEFAULT_DISTANCE_CUTOFF: f64 = 8.0;
pub const DEFAULT_K_NEIGHBORS: usize = 10;

/// Which residue pairs within the cutoff become edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NeighborMode {
    /// Every pair within the cutoff. Degree is never capped.
    #[default]
    Cutoff,
    /// Within the cutoff, each residue nominates its `k` nearest residues and a pair
    /// is kept if either side nominated the other.
    KNearest,
}

/// How candidate pairs are enumerated. Both strategies emit identical edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchStrategy {
    #[default]
    BruteForce,
    CellList,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unrecognized {kind} '{value}' (expected one of: {expected})")]
pub struct ParseOptionError {
    kind: &'static str,
    value: String,
    expected: &'static str,
}

impl FromStr for NeighborMode {
    type Err = ParseOptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cutoff" => Ok(NeighborMode::Cutoff),
            "k-nearest" | "k_nearest" | "knn" => Ok(NeighborMode::KNearest),
            _ => Err(ParseOptionError {
                kind: "neighbor mode",
                value: s.to_string(),
                expected: "cutoff, k-nearest",
            }),
        }
    }
}

impl fmt::Display for NeighborMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            NeighborMode::Cutoff => "cutoff",
            NeighborMode::KNearest => "k-nearest",
        })
    }
}

impl FromStr for SearchStrategy {
    type Err = ParseOptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "brute-force" | "brute_force" => Ok(SearchStrategy::BruteForce),
            "cell-list" | "cell_list" => Ok(SearchStrategy::CellList),
            _ => Err(ParseOptionError {
                kind: "search strategy",
                value: s.to_string(),
                expected: "brute-force, cell-list",
            }),
        }
    }
}

impl fmt::Display for SearchStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SearchStrategy::BruteForce => "brute-force",
            SearchStrategy::CellList => "cell-list",
        })
    }
}

/// Pair within the cutoff: `(i, j, distance)` with `i < j`.
type Pair = (usize, usize, f64);

#[derive(Debug, Clone, PartialEq)]
pub struct SpatialGraphBuilder {
    distance_cutoff: f64,
    k_neighbors: usize,
    neighbor_mode: NeighborMode,
    search: SearchStrategy,
}

impl Default for SpatialGraphBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_DISTANCE_CUTOFF)
    }
}

impl SpatialGraphBuilder {
    pub fn new(distance_cutoff: f64) -> Self {
        Self {
            distance_cutoff,
            k_neighbors: DEFAULT_K_NEIGHBORS,
            neighbor_mode: NeighborMode::Cutoff,
            search: SearchStrategy::BruteForce,
        }
    }

    pub fn neighbor_mode(mut self, mode: NeighborMode) -> Self {
        self.neighbor_mode = mode;
        self
    }

    pub fn k_neighbors(mut self, k: usize) -> Self {
        self.k_neighbors = k;
        self
    }

    pub fn search(mut self, strategy: SearchStrategy) -> Self {
        self.search = strategy;
        self
    }

    pub fn distance_cutoff(&self) -> f64 {
        self.distance_cutoff
    }

    #[instrument(skip_all, name = "spatial_graph_build")]
    pub fn build(&self, features: &[ResidueFeature]) -> EdgeArrays {
        let coords: Vec<Point3<f64>> = features.iter().map(|f| f.coord).collect();
        self.build_from_coords(&coords)
    }

    /// Emits `(i, j)` then `(j, i)` for every accepted pair, pairs ascending by
    /// `(i, j)`.
    pub fn build_from_coords(&self, coords: &[Point3<f64>]) -> EdgeArrays {
        let cutoff = self.distance_cutoff;
        let mut pairs = match self.search {
            // A grid needs a positive, finite cell edge.
            SearchStrategy::CellList if cutoff.is_finite() && cutoff > 0.0 => {
                CellList::new(coords, cutoff).pairs_within(coords, cutoff)
            }
            _ => self.brute_force_pairs(coords),
        };
        debug!(
            residues = coords.len(),
            pairs = pairs.len(),
            cutoff = self.distance_cutoff,
            "Collected residue pairs within cutoff."
        );

        if self.neighbor_mode == NeighborMode::KNearest {
            pairs = limit_to_k_nearest(pairs, coords.len(), self.k_neighbors);
        }

        let edges: Vec<Edge> = pairs
            .into_iter()
            .flat_map(|(i, j, d)| {
                let forward = Edge::new(i, j, d);
                [forward, forward.reversed()]
            })
            .collect();

        info!(
            num_nodes = coords.len(),
            num_edges = edges.len(),
            "Spatial graph built."
        );
        EdgeArrays::from_edges(&edges)
    }

    #[cfg(not(feature = "parallel"))]
    fn brute_force_pairs(&self, coords: &[Point3<f64>]) -> Vec<Pair> {
        (0..coords.len())
            .tuple_combinations()
            .filter_map(|(i, j)| self.accept(coords, i, j))
            .collect()
    }

    // `collect` keeps the sequential order of the outer and inner ranges.
    #[cfg(feature = "parallel")]
    fn brute_force_pairs(&self, coords: &[Point3<f64>]) -> Vec<Pair> {
        let n = coords.len();
        (0..n)
            .into_par_iter()
            .flat_map_iter(|i| (i + 1..n).filter_map(move |j| self.accept(coords, i, j)))
            .collect()
    }

    #[inline]
    fn accept(&self, coords: &[Point3<f64>], i: usize, j: usize) -> Option<Pair> {
        let distance = euclidean_distance(&coords[i], &coords[j]);
        (distance <= self.distance_cutoff).then_some((i, j, distance))
    }
}

/// Keeps a pair if either endpoint has the other among its `k` nearest accepted
/// partners. Ties in distance go to the lower residue index. Input order is kept.
fn limit_to_k_nearest(pairs: Vec<Pair>, num_nodes: usize, k: usize) -> Vec<Pair> {
    let mut partners: Vec<Vec<(f64, usize)>> = vec![Vec::new(); num_nodes];
    for &(i, j, d) in &pairs {
        partners[i].push((d, j));
        partners[j].push((d, i));
    }

    let mut nominated: HashSet<(usize, usize)> = HashSet::new();
    for (node, candidates) in partners.iter_mut().enumerate() {
        candidates.sort_by(|a, b| match a.0.total_cmp(&b.0) {
            Ordering::Equal => a.1.cmp(&b.1),
            other => other,
        });
        for &(_, other) in candidates.iter().take(k) {
            nominated.insert((node.min(other), node.max(other)));
        }
    }

    pairs
        .into_iter()
        .filter(|(i, j, _)| nominated.contains(&(*i, *j)))
        .collect()
}
