use crate::core::codec::{decoder::decode, encoder::encode};
use crate::core::features::extractor::extract_features;
use crate::core::models::graph::ProteinGraph;
use crate::core::models::residue::{RawResidue, ResidueFeature};
use crate::core::models::tensor::{DecodedGraph, EncodedGraph};
use crate::core::validation::{
    validate_edge_consistency, validate_round_trip, validate_shapes, validate_topology,
};
use crate::engine::config::GraphConfig;
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use tracing::{debug, info, instrument};

const GRAPH_PHASE: &str = "Spatial Graph";
const ENCODING_PHASE: &str = "Encoding";
const VALIDATION_PHASE: &str = "Round-Trip Validation";

/// Checks run by [`decode_and_validate`], in order.
pub const CHECKS: [&str; 4] = ["shapes", "decode", "round trip", "edges"];

#[derive(Debug, Clone)]
pub struct PipelineResult {
    pub features: Vec<ResidueFeature>,
    pub graph: ProteinGraph,
    pub encoded: EncodedGraph,
    pub decoded: DecodedGraph,
}

impl PipelineResult {
    pub fn skipped_residues(&self, input_len: usize) -> usize {
        input_len.saturating_sub(self.features.len())
    }
}

#[instrument(skip_all, name = "graph_pipeline")]
pub fn run(
    residues: &[RawResidue],
    config: &GraphConfig,
    reporter: &ProgressReporter,
) -> Result<PipelineResult, EngineError> {
    // === Phase 1: Feature extraction ===
    reporter.report(Progress::PhaseStart {
        name: "Feature Extraction",
    });
    debug!(columns = ?config.residue_feature_names, "Node feature columns.");
    let features = extract_features(residues);
    let skipped = residues.len() - features.len();
    if skipped > 0 {
        reporter.report(Progress::ResiduesSkipped { count: skipped });
    }
    reporter.report(Progress::PhaseFinish);

    // === Phase 2: Spatial graph and representation ===
    reporter.report(Progress::PhaseStart { name: GRAPH_PHASE });
    let edges = config.spatial_builder().build(&features);
    let graph = ProteinGraph::new(&features, edges);
    validate_topology(&graph).map_err(EngineError::validation(GRAPH_PHASE))?;
    reporter.report(Progress::PhaseFinish);

    // === Phase 3: Encoding ===
    reporter.report(Progress::PhaseStart {
        name: ENCODING_PHASE,
    });
    let encoded = encode(&graph);
    reporter.report(Progress::PhaseFinish);

    // === Phase 4: Decode and validate ===
    let decoded = decode_and_validate(&graph, &encoded, reporter)?;

    info!(
        residues = residues.len(),
        nodes = graph.num_nodes(),
        edges = graph.num_edges(),
        cutoff = config.distance_cutoff,
        "Graph pipeline complete."
    );
    Ok(PipelineResult {
        features,
        graph,
        encoded,
        decoded,
    })
}

/// Checks the encoded shapes, decodes, then verifies the round trip and the edge
/// arrays against `graph`. Stops at the first failing check.
#[instrument(skip_all, name = "round_trip_validation")]
pub fn decode_and_validate(
    graph: &ProteinGraph,
    encoded: &EncodedGraph,
    reporter: &ProgressReporter,
) -> Result<DecodedGraph, EngineError> {
    reporter.report(Progress::PhaseStart {
        name: VALIDATION_PHASE,
    });
    reporter.report(Progress::ChecksStart {
        total: CHECKS.len() as u64,
    });
    let fail = EngineError::validation;
    let passed = |check| reporter.report(Progress::CheckPassed { check });

    validate_shapes(encoded).map_err(fail(ENCODING_PHASE))?;
    passed(CHECKS[0]);

    let decoded = decode(encoded).map_err(fail(VALIDATION_PHASE))?;
    passed(CHECKS[1]);

    validate_round_trip(graph, &decoded).map_err(fail(VALIDATION_PHASE))?;
    passed(CHECKS[2]);

    validate_edge_consistency(graph, &decoded).map_err(fail(VALIDATION_PHASE))?;
    passed(CHECKS[3]);

    reporter.report(Progress::PhaseFinish);
    debug!("Round trip reproduced the graph within tolerance.");
    Ok(decoded)
}
