//! Checks applied after encoding and decoding a graph.
//!
//! Numeric comparisons are made at the precision of the encoded arrays: original
//! `f64` values are narrowed to `f32` before being compared against decoded values
//! with an absolute tolerance of [`ROUND_TRIP_TOLERANCE`].

use crate::core::models::graph::{ProteinGraph, layout};
use crate::core::models::tensor::{DecodedGraph, EncodedGraph};
use thiserror::Error;

pub const ROUND_TRIP_TOLERANCE: f64 = 1e-6;

#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("Shape error in '{array}': {reason}")]
    Shape { array: &'static str, reason: String },
    #[error("Round-trip check failed: {kind}")]
    RoundTrip { kind: RoundTripErrorKind },
    #[error("Edge arrays changed in '{array}': {reason}")]
    EdgeConsistency { array: &'static str, reason: String },
    #[error("Graph topology violated: {reason}")]
    Topology { reason: String },
    #[error("Node row {row} has no valid residue type index (found {value})")]
    TypeIndex { row: usize, value: f32 },
}

#[derive(Debug, Error, PartialEq)]
pub enum RoundTripErrorKind {
    #[error("reconstructed node features have shape {found:?}, original has {expected:?}")]
    ShapeMismatch {
        expected: (usize, usize),
        found: (usize, usize),
    },
    #[error("node {row}, column {column}: decoded {found} differs from original {expected}")]
    ValueMismatch {
        row: usize,
        column: usize,
        expected: f64,
        found: f64,
    },
}

#[inline]
fn narrowed(value: f64) -> f64 {
    value as f32 as f64
}

#[inline]
fn within_tolerance(expected: f64, found: f64) -> bool {
    (expected - found).abs() <= ROUND_TRIP_TOLERANCE
}

/// Checks the dimensional contract of the encoded arrays: node features `[N, F]`,
/// edge index `[2, E]`, edge attributes `[E', 1]`.
pub fn validate_shapes(encoded: &EncodedGraph) -> Result<(), ValidationError> {
    let shape_error =
        |array: &'static str, reason: String| ValidationError::Shape { array, reason };

    if encoded.node_features.ndim() != 2 {
        return Err(shape_error(
            "node_features",
            format!(
                "expected 2 dimensions, found shape {:?}",
                encoded.node_features.shape()
            ),
        ));
    }

    match encoded.edge_index.dims2() {
        Some((2, _)) => {}
        _ => {
            return Err(shape_error(
                "edge_index",
                format!(
                    "expected shape [2, E], found {:?}",
                    encoded.edge_index.shape()
                ),
            ));
        }
    }

    match encoded.edge_attr.dims2() {
        Some((_, 1)) => Ok(()),
        _ => Err(shape_error(
            "edge_attr",
            format!(
                "expected shape [E, 1], found {:?}",
                encoded.edge_attr.shape()
            ),
        )),
    }
}

/// Rebuilds every node row from its decoded segments and compares it with the
/// original row.
pub fn validate_round_trip(
    original: &ProteinGraph,
    decoded: &DecodedGraph,
) -> Result<(), ValidationError> {
    let features = original.node_features();
    let expected_shape = (features.nrows(), features.ncols());
    let found_shape = (decoded.residues.len(), layout::NODE_FEATURE_WIDTH);
    if expected_shape != found_shape {
        return Err(ValidationError::RoundTrip {
            kind: RoundTripErrorKind::ShapeMismatch {
                expected: expected_shape,
                found: found_shape,
            },
        });
    }

    for (row, residue) in decoded.residues.iter().enumerate() {
        let rebuilt = layout::compose_row(
            residue.residue_index as f64,
            residue.physchem.map(f64::from),
            residue.coord.map(f64::from),
        );
        for (column, &found) in rebuilt.iter().enumerate() {
            let expected = narrowed(features[(row, column)]);
            if !within_tolerance(expected, found) {
                return Err(ValidationError::RoundTrip {
                    kind: RoundTripErrorKind::ValueMismatch {
                        row,
                        column,
                        expected,
                        found,
                    },
                });
            }
        }
    }

    Ok(())
}

/// Checks that decoding left the edge arrays untouched: identical shapes, exact
/// indices, distances within tolerance.
pub fn validate_edge_consistency(
    original: &ProteinGraph,
    decoded: &DecodedGraph,
) -> Result<(), ValidationError> {
    let index = original.edge_index();
    let expected_index_shape = (index.nrows(), index.ncols());
    if decoded.edge_index.dims2() != Some(expected_index_shape) {
        return Err(ValidationError::EdgeConsistency {
            array: "edge_index",
            reason: format!(
                "shape {:?} differs from original {:?}",
                decoded.edge_index.shape(),
                expected_index_shape
            ),
        });
    }
    for row in 0..index.nrows() {
        for col in 0..index.ncols() {
            let expected = index[(row, col)] as i64;
            let found = decoded.edge_index.get2(row, col);
            if found != Some(expected) {
                return Err(ValidationError::EdgeConsistency {
                    array: "edge_index",
                    reason: format!(
                        "entry ({row}, {col}) is {found:?}, original is {expected}"
                    ),
                });
            }
        }
    }

    let attr = original.edge_attr();
    let expected_attr_shape = (attr.nrows(), attr.ncols());
    if decoded.edge_attr.dims2() != Some(expected_attr_shape) {
        return Err(ValidationError::EdgeConsistency {
            array: "edge_attr",
            reason: format!(
                "shape {:?} differs from original {:?}",
                decoded.edge_attr.shape(),
                expected_attr_shape
            ),
        });
    }
    for row in 0..attr.nrows() {
        for col in 0..attr.ncols() {
            let expected = narrowed(attr[(row, col)]);
            let found = decoded.edge_attr.get2(row, col).map(f64::from);
            if !found.is_some_and(|found| within_tolerance(expected, found)) {
                return Err(ValidationError::EdgeConsistency {
                    array: "edge_attr",
                    reason: format!(
                        "entry ({row}, {col}) is {found:?}, original is {expected}"
                    ),
                });
            }
        }
    }

    Ok(())
}

/// Structural checks on an assembled graph: matching edge array lengths, indices in
/// range, no self-edges, and every pair stored as `(i, j)` immediately followed by
/// `(j, i)` with the same finite, non-negative distance.
pub fn validate_topology(graph: &ProteinGraph) -> Result<(), ValidationError> {
    let topology_error = |reason: String| ValidationError::Topology { reason };
    let num_nodes = graph.num_nodes();
    let num_edges = graph.num_edges();

    if graph.edge_index().nrows() != 2 {
        return Err(topology_error(format!(
            "edge_index has {} rows, expected 2",
            graph.edge_index().nrows()
        )));
    }
    if graph.edge_attr().ncols() != 1 || graph.edge_attr().nrows() != num_edges {
        return Err(topology_error(format!(
            "edge_attr has shape ({}, {}), expected ({num_edges}, 1)",
            graph.edge_attr().nrows(),
            graph.edge_attr().ncols()
        )));
    }
    if num_edges % 2 != 0 {
        return Err(topology_error(format!(
            "edge count {num_edges} is odd; edges must come in reverse pairs"
        )));
    }

    let edges: Vec<_> = graph.edges().collect();
    for (k, edge) in edges.iter().enumerate() {
        if edge.src >= num_nodes || edge.dst >= num_nodes {
            return Err(topology_error(format!(
                "edge {k} ({} -> {}) references a node outside 0..{num_nodes}",
                edge.src, edge.dst
            )));
        }
        if edge.src == edge.dst {
            return Err(topology_error(format!(
                "edge {k} is a self-edge on node {}",
                edge.src
            )));
        }
        if !edge.distance.is_finite() || edge.distance < 0.0 {
            return Err(topology_error(format!(
                "edge {k} has invalid distance {}",
                edge.distance
            )));
        }
    }

    for (pair, chunk) in edges.chunks_exact(2).enumerate() {
        if chunk[1] != chunk[0].reversed() {
            return Err(topology_error(format!(
                "edges {} and {} are not a reverse pair: {:?} then {:?}",
                2 * pair,
                2 * pair + 1,
                chunk[0],
                chunk[1]
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::codec::{decoder::decode, encoder::encode};
    use crate::core::models::graph::{Edge, EdgeArrays};
    use crate::core::models::residue::ResidueFeature;
    use crate::core::models::tensor::Tensor;
    use nalgebra::{DMatrix, Point3};

    fn two_residue_graph() -> ProteinGraph {
        let features = [
            ResidueFeature {
                type_index: 0,
                physchem: [0.0, 1.8, 0.0],
                coord: Point3::new(0.0, 0.0, 0.0),
            },
            ResidueFeature {
                type_index: 7,
                physchem: [0.0, -0.4, 0.0],
                coord: Point3::new(3.0, 4.0, 0.0),
            },
        ];
        let edges = [Edge::new(0, 1, 5.0), Edge::new(1, 0, 5.0)];
        ProteinGraph::new(&features, EdgeArrays::from_edges(&edges))
    }

    mod shapes {
        use super::*;

        #[test]
        fn encoded_graph_has_valid_shapes() {
            assert_eq!(validate_shapes(&encode(&two_residue_graph())), Ok(()));
        }

        #[test]
        fn one_dimensional_node_features_are_rejected() {
            let mut encoded = encode(&two_residue_graph());
            encoded.node_features = Tensor::new(vec![14], vec![0.0; 14]).unwrap();
            assert!(matches!(
                validate_shapes(&encoded),
                Err(ValidationError::Shape {
                    array: "node_features",
                    ..
                })
            ));
        }

        #[test]
        fn edge_index_without_two_rows_is_rejected() {
            let mut encoded = encode(&two_residue_graph());
            encoded.edge_index = Tensor::new(vec![1, 4], vec![0, 1, 1, 0]).unwrap();
            assert!(matches!(
                validate_shapes(&encoded),
                Err(ValidationError::Shape {
                    array: "edge_index",
                    ..
                })
            ));
        }

        #[test]
        fn edge_attr_with_wrong_width_is_rejected() {
            let mut encoded = encode(&two_residue_graph());
            encoded.edge_attr = Tensor::new(vec![1, 2], vec![5.0, 5.0]).unwrap();
            assert!(matches!(
                validate_shapes(&encoded),
                Err(ValidationError::Shape {
                    array: "edge_attr",
                    ..
                })
            ));
        }
    }

    mod round_trip {
        use super::*;

        #[test]
        fn unmodified_round_trip_passes() {
            let graph = two_residue_graph();
            let decoded = decode(&encode(&graph)).unwrap();
            assert_eq!(validate_round_trip(&graph, &decoded), Ok(()));
        }

        #[test]
        fn values_are_compared_at_encoded_precision() {
            let features = [ResidueFeature {
                type_index: 4,
                physchem: [0.0, 2.5, 0.0],
                coord: Point3::new(123.456789, -98.7654321, 0.1),
            }];
            let graph = ProteinGraph::new(&features, EdgeArrays::empty());
            let decoded = decode(&encode(&graph)).unwrap();
            assert_eq!(validate_round_trip(&graph, &decoded), Ok(()));
        }

        #[test]
        fn perturbed_coordinate_is_reported_with_position() {
            let graph = two_residue_graph();
            let mut decoded = decode(&encode(&graph)).unwrap();
            decoded.residues[1].coord[1] += 1e-3;

            match validate_round_trip(&graph, &decoded) {
                Err(ValidationError::RoundTrip {
                    kind: RoundTripErrorKind::ValueMismatch { row, column, .. },
                }) => {
                    assert_eq!(row, 1);
                    assert_eq!(column, 5);
                }
                other => panic!("expected a value mismatch, got {other:?}"),
            }
        }

        #[test]
        fn perturbed_encoded_array_fails_after_decoding() {
            let graph = two_residue_graph();
            let mut encoded = encode(&graph);
            encoded.node_features.data_mut()[4] += 1e-3;
            let decoded = decode(&encoded).unwrap();
            assert!(matches!(
                validate_round_trip(&graph, &decoded),
                Err(ValidationError::RoundTrip { .. })
            ));
        }

        #[test]
        fn missing_residue_is_a_shape_mismatch() {
            let graph = two_residue_graph();
            let mut decoded = decode(&encode(&graph)).unwrap();
            decoded.residues.pop();
            assert_eq!(
                validate_round_trip(&graph, &decoded),
                Err(ValidationError::RoundTrip {
                    kind: RoundTripErrorKind::ShapeMismatch {
                        expected: (2, 7),
                        found: (1, 7),
                    }
                })
            );
        }
    }

    mod edge_consistency {
        use super::*;

        #[test]
        fn unmodified_edges_pass() {
            let graph = two_residue_graph();
            let decoded = decode(&encode(&graph)).unwrap();
            assert_eq!(validate_edge_consistency(&graph, &decoded), Ok(()));
        }

        #[test]
        fn changed_index_is_detected() {
            let graph = two_residue_graph();
            let mut decoded = decode(&encode(&graph)).unwrap();
            decoded.edge_index.data_mut()[0] = 1;
            assert!(matches!(
                validate_edge_consistency(&graph, &decoded),
                Err(ValidationError::EdgeConsistency {
                    array: "edge_index",
                    ..
                })
            ));
        }

        #[test]
        fn changed_distance_is_detected() {
            let graph = two_residue_graph();
            let mut decoded = decode(&encode(&graph)).unwrap();
            decoded.edge_attr.data_mut()[1] += 1e-3;
            assert!(matches!(
                validate_edge_consistency(&graph, &decoded),
                Err(ValidationError::EdgeConsistency {
                    array: "edge_attr",
                    ..
                })
            ));
        }

        #[test]
        fn dropped_edge_is_a_shape_change() {
            let graph = two_residue_graph();
            let mut decoded = decode(&encode(&graph)).unwrap();
            decoded.edge_index = Tensor::new(vec![2, 1], vec![0, 1]).unwrap();
            assert!(matches!(
                validate_edge_consistency(&graph, &decoded),
                Err(ValidationError::EdgeConsistency {
                    array: "edge_index",
                    ..
                })
            ));
        }
    }

    mod topology {
        use super::*;

        fn graph_with_edges(num_nodes: usize, edges: &[Edge]) -> ProteinGraph {
            let arrays = EdgeArrays::from_edges(edges);
            ProteinGraph::from_parts(
                DMatrix::zeros(num_nodes, layout::NODE_FEATURE_WIDTH),
                arrays.edge_index,
                arrays.edge_attr,
            )
        }

        #[test]
        fn built_graph_is_valid() {
            assert_eq!(validate_topology(&two_residue_graph()), Ok(()));
        }

        #[test]
        fn empty_graph_is_valid() {
            assert_eq!(validate_topology(&graph_with_edges(0, &[])), Ok(()));
        }

        #[test]
        fn odd_edge_count_is_rejected() {
            let graph = graph_with_edges(2, &[Edge::new(0, 1, 1.0)]);
            assert!(matches!(
                validate_topology(&graph),
                Err(ValidationError::Topology { .. })
            ));
        }

        #[test]
        fn out_of_range_index_is_rejected() {
            let graph = graph_with_edges(2, &[Edge::new(0, 2, 1.0), Edge::new(2, 0, 1.0)]);
            assert!(validate_topology(&graph).is_err());
        }

        #[test]
        fn self_edge_is_rejected() {
            let graph = graph_with_edges(2, &[Edge::new(1, 1, 0.0), Edge::new(1, 1, 0.0)]);
            assert!(validate_topology(&graph).is_err());
        }

        #[test]
        fn reverse_must_be_adjacent() {
            let graph = graph_with_edges(
                3,
                &[
                    Edge::new(0, 1, 1.0),
                    Edge::new(0, 2, 2.0),
                    Edge::new(1, 0, 1.0),
                    Edge::new(2, 0, 2.0),
                ],
            );
            assert!(validate_topology(&graph).is_err());
        }

        #[test]
        fn reverse_with_different_distance_is_rejected() {
            let graph = graph_with_edges(2, &[Edge::new(0, 1, 1.0), Edge::new(1, 0, 1.5)]);
            assert!(validate_topology(&graph).is_err());
        }

        #[test]
        fn mismatched_edge_attr_length_is_rejected() {
            let arrays = EdgeArrays::from_edges(&[Edge::new(0, 1, 1.0), Edge::new(1, 0, 1.0)]);
            let graph = ProteinGraph::from_parts(
                DMatrix::zeros(2, layout::NODE_FEATURE_WIDTH),
                arrays.edge_index,
                DMatrix::from_element(1, 1, 1.0),
            );
            assert!(validate_topology(&graph).is_err());
        }
    }
}
