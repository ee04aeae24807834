use crate::core::models::graph::ProteinGraph;
use crate::core::models::tensor::{Element, EncodedGraph, Tensor};
use nalgebra::{DMatrix, Scalar};

/// Encodes a graph into typed flat arrays. Shapes and column order are preserved.
pub fn encode(graph: &ProteinGraph) -> EncodedGraph {
    EncodedGraph {
        node_features: flatten_row_major(graph.node_features(), |v| v as f32),
        edge_index: flatten_row_major(graph.edge_index(), |v| v as i64),
        edge_attr: flatten_row_major(graph.edge_attr(), |v| v as f32),
    }
}

fn flatten_row_major<T, U, F>(matrix: &DMatrix<T>, convert: F) -> Tensor<U>
where
    T: Scalar + Copy,
    U: Element,
    F: Fn(T) -> U,
{
    // Column-major storage of the transpose is the row-major order of the matrix.
    let data: Vec<U> = matrix.transpose().iter().map(|&v| convert(v)).collect();
    Tensor::from_rows_unchecked(matrix.nrows(), matrix.ncols(), data)
}
