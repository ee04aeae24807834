use crate::core::features::table::DESCRIPTOR_NAMES;
use crate::core::graph::builder::{
    DEFAULT_DISTANCE_CUTOFF, DEFAULT_K_NEIGHBORS, NeighborMode, SearchStrategy,
    SpatialGraphBuilder,
};
use thiserror::Error;

/// Names of the node feature columns, in layout order.
pub const DEFAULT_RESIDUE_FEATURE_NAMES: [&str; 4] =
    ["residue_type", DESCRIPTOR_NAMES[0], DESCRIPTOR_NAMES[1], DESCRIPTOR_NAMES[2]];

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Invalid value for parameter '{name}': {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct GraphConfig {
    pub distance_cutoff: f64,
    pub k_neighbors: usize,
    pub neighbor_mode: NeighborMode,
    pub search: SearchStrategy,
    pub residue_feature_names: Vec<String>,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            distance_cutoff: DEFAULT_DISTANCE_CUTOFF,
            k_neighbors: DEFAULT_K_NEIGHBORS,
            neighbor_mode: NeighborMode::default(),
            search: SearchStrategy::default(),
            residue_feature_names: DEFAULT_RESIDUE_FEATURE_NAMES
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl GraphConfig {
    /// Spatial graph builder carrying this configuration.
    pub fn spatial_builder(&self) -> SpatialGraphBuilder {
        SpatialGraphBuilder::new(self.distance_cutoff)
            .neighbor_mode(self.neighbor_mode)
            .k_neighbors(self.k_neighbors)
            .search(self.search)
    }
}

#[derive(Default)]
pub struct GraphConfigBuilder {
    distance_cutoff: Option<f64>,
    k_neighbors: Option<usize>,
    neighbor_mode: Option<NeighborMode>,
    search: Option<SearchStrategy>,
    residue_feature_names: Option<Vec<String>>,
}

impl GraphConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn distance_cutoff(mut self, cutoff: f64) -> Self {
        self.distance_cutoff = Some(cutoff);
        self
    }
    pub fn k_neighbors(mut self, k: usize) -> Self {
        self.k_neighbors = Some(k);
        self
    }
    pub fn neighbor_mode(mut self, mode: NeighborMode) -> Self {
        self.neighbor_mode = Some(mode);
        self
    }
    pub fn search(mut self, strategy: SearchStrategy) -> Self {
        self.search = Some(strategy);
        self
    }
    pub fn residue_feature_names(mut self, names: Vec<String>) -> Self {
        self.residue_feature_names = Some(names);
        self
    }

    /// Fills unset parameters with defaults and checks the result.
    pub fn build(self) -> Result<GraphConfig, ConfigError> {
        let defaults = GraphConfig::default();
        let config = GraphConfig {
            distance_cutoff: self.distance_cutoff.unwrap_or(defaults.distance_cutoff),
            k_neighbors: self.k_neighbors.unwrap_or(defaults.k_neighbors),
            neighbor_mode: self.neighbor_mode.unwrap_or(defaults.neighbor_mode),
            search: self.search.unwrap_or(defaults.search),
            residue_feature_names: self
                .residue_feature_names
                .unwrap_or(defaults.residue_feature_names),
        };

        if !config.distance_cutoff.is_finite() || config.distance_cutoff <= 0.0 {
            return Err(ConfigError::InvalidParameter {
                name: "distance_cutoff",
                reason: format!(
                    "must be a finite positive number, got {}",
                    config.distance_cutoff
                ),
            });
        }
        if config.neighbor_mode == NeighborMode::KNearest && config.k_neighbors == 0 {
            return Err(ConfigError::InvalidParameter {
                name: "k_neighbors",
                reason: "must be at least 1 in k-nearest mode".to_string(),
            });
        }
        if config.residue_feature_names.len() != DEFAULT_RESIDUE_FEATURE_NAMES.len() {
            return Err(ConfigError::InvalidParameter {
                name: "residue_feature_names",
                reason: format!(
                    "expected {} names (type plus {} descriptors), got {}",
                    DEFAULT_RESIDUE_FEATURE_NAMES.len(),
                    DESCRIPTOR_NAMES.len(),
                    config.residue_feature_names.len()
                ),
            });
        }

        Ok(config)
    }
}
