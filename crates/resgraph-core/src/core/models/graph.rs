use super::residue::ResidueFeature;
use nalgebra::DMatrix;

/// Column schema of a node feature row: `[type_index, physchem(3), coord(3)]`.
///
/// Graph assembly, decoding and round-trip validation all slice rows through these
/// constants, so the layout is defined exactly once.
pub mod layout {
    use std::ops::Range;

    pub const TYPE_COLUMN: usize = 0;
    pub const PHYSCHEM_COLUMNS: Range<usize> = 1..4;
    pub const COORD_COLUMNS: Range<usize> = 4..7;
    pub const NODE_FEATURE_WIDTH: usize = 7;

    /// Concatenates the three row segments in layout order.
    pub fn compose_row(
        type_index: f64,
        physchem: [f64; 3],
        coord: [f64; 3],
    ) -> [f64; NODE_FEATURE_WIDTH] {
        let mut row = [0.0; NODE_FEATURE_WIDTH];
        row[TYPE_COLUMN] = type_index;
        row[PHYSCHEM_COLUMNS].copy_from_slice(&physchem);
        row[COORD_COLUMNS].copy_from_slice(&coord);
        row
    }
}

/// A directed proximity relation between two nodes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub src: usize,
    pub dst: usize,
    pub distance: f64,
}

impl Edge {
    pub fn new(src: usize, dst: usize, distance: f64) -> Self {
        Self { src, dst, distance }
    }

    #[inline]
    pub fn reversed(&self) -> Self {
        Self::new(self.dst, self.src, self.distance)
    }
}

/// Edge list in array form: `edge_index` is `2 x E`, `edge_attr` is `E x 1`.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeArrays {
    pub edge_index: DMatrix<usize>,
    pub edge_attr: DMatrix<f64>,
}

impl EdgeArrays {
    pub fn empty() -> Self {
        Self::from_edges(&[])
    }

    /// Stacks directed edges column-wise, preserving their order.
    pub fn from_edges(edges: &[Edge]) -> Self {
        let edge_index = DMatrix::from_fn(2, edges.len(), |row, col| {
            let edge = &edges[col];
            if row == 0 { edge.src } else { edge.dst }
        });
        let edge_attr = DMatrix::from_fn(edges.len(), 1, |row, _| edges[row].distance);
        Self {
            edge_index,
            edge_attr,
        }
    }

    pub fn len(&self) -> usize {
        self.edge_index.ncols()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Unified node/edge representation of a protein.
///
/// The node feature matrix is `N x 7` following [`layout`]; edges are stored exactly
/// as produced by the spatial graph builder. Construction performs no
/// cross-checks between node count and edge indices; that is the job of
/// [`validate_topology`](crate::core::validation::validate_topology).
#[derive(Debug, Clone, PartialEq)]
pub struct ProteinGraph {
    node_features: DMatrix<f64>,
    edge_index: DMatrix<usize>,
    edge_attr: DMatrix<f64>,
}

impl ProteinGraph {
    pub fn new(features: &[ResidueFeature], edges: EdgeArrays) -> Self {
        let rows: Vec<[f64; layout::NODE_FEATURE_WIDTH]> = features
            .iter()
            .map(|f| {
                layout::compose_row(
                    f.type_index as f64,
                    f.physchem,
                    [f.coord.x, f.coord.y, f.coord.z],
                )
            })
            .collect();
        let node_features =
            DMatrix::from_fn(rows.len(), layout::NODE_FEATURE_WIDTH, |r, c| rows[r][c]);

        Self::from_parts(node_features, edges.edge_index, edges.edge_attr)
    }

    /// Wraps already assembled arrays without any checks.
    pub fn from_parts(
        node_features: DMatrix<f64>,
        edge_index: DMatrix<usize>,
        edge_attr: DMatrix<f64>,
    ) -> Self {
        Self {
            node_features,
            edge_index,
            edge_attr,
        }
    }

    pub fn node_features(&self) -> &DMatrix<f64> {
        &self.node_features
    }

    pub fn edge_index(&self) -> &DMatrix<usize> {
        &self.edge_index
    }

    pub fn edge_attr(&self) -> &DMatrix<f64> {
        &self.edge_attr
    }

    pub fn num_nodes(&self) -> usize {
        self.node_features.nrows()
    }

    pub fn num_edges(&self) -> usize {
        self.edge_index.ncols()
    }

    /// Iterates edges in storage order. Columns without a matching distance row are
    /// skipped.
    pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        (0..self.num_edges()).filter_map(move |k| {
            let distance = *self.edge_attr.get((k, 0))?;
            Some(Edge::new(
                self.edge_index[(0, k)],
                self.edge_index[(1, k)],
                distance,
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point3;

    fn feature(type_index: usize, physchem: [f64; 3], coord: [f64; 3]) -> ResidueFeature {
        ResidueFeature {
            type_index,
            physchem,
            coord: Point3::new(coord[0], coord[1], coord[2]),
        }
    }

    #[test]
    fn compose_row_places_segments_in_layout_order() {
        let row = layout::compose_row(3.0, [-1.0, -3.5, 1.0], [1.0, 2.0, 3.0]);
        assert_eq!(row, [3.0, -1.0, -3.5, 1.0, 1.0, 2.0, 3.0]);
    }

    #[test]
    fn layout_segments_tile_the_row() {
        assert_eq!(layout::TYPE_COLUMN + 1, layout::PHYSCHEM_COLUMNS.start);
        assert_eq!(layout::PHYSCHEM_COLUMNS.end, layout::COORD_COLUMNS.start);
        assert_eq!(layout::COORD_COLUMNS.end, layout::NODE_FEATURE_WIDTH);
    }

    #[test]
    fn new_builds_one_row_per_feature_in_order() {
        let features = [
            feature(0, [0.0, 1.8, 0.0], [0.0, 0.0, 0.0]),
            feature(19, [0.0, 4.2, 0.0], [1.5, -2.0, 3.25]),
        ];
        let graph = ProteinGraph::new(&features, EdgeArrays::empty());

        assert_eq!(graph.num_nodes(), 2);
        assert_eq!(graph.node_features().ncols(), 7);
        let second: Vec<f64> = graph.node_features().row(1).iter().copied().collect();
        assert_eq!(second, vec![19.0, 0.0, 4.2, 0.0, 1.5, -2.0, 3.25]);
    }

    #[test]
    fn new_with_no_features_yields_zero_rows_and_full_width() {
        let graph = ProteinGraph::new(&[], EdgeArrays::empty());
        assert_eq!(graph.num_nodes(), 0);
        assert_eq!(graph.node_features().ncols(), layout::NODE_FEATURE_WIDTH);
        assert_eq!(graph.num_edges(), 0);
        assert_eq!(graph.edge_index().nrows(), 2);
        assert_eq!(graph.edge_attr().ncols(), 1);
    }

    #[test]
    fn edge_arrays_preserve_edge_order() {
        let edges = [Edge::new(0, 1, 1.0), Edge::new(1, 0, 1.0), Edge::new(0, 2, 2.5)];
        let arrays = EdgeArrays::from_edges(&edges);

        assert_eq!(arrays.len(), 3);
        assert_eq!(arrays.edge_index.row(0).iter().copied().collect::<Vec<_>>(), vec![0, 1, 0]);
        assert_eq!(arrays.edge_index.row(1).iter().copied().collect::<Vec<_>>(), vec![1, 0, 2]);
        assert_eq!(arrays.edge_attr[(2, 0)], 2.5);
    }

    #[test]
    fn edges_iterates_stored_edges_unchanged() {
        let edges = vec![Edge::new(0, 1, 1.0), Edge::new(1, 0, 1.0)];
        let graph = ProteinGraph::new(
            &[
                feature(0, [0.0; 3], [0.0; 3]),
                feature(1, [0.0; 3], [1.0, 0.0, 0.0]),
            ],
            EdgeArrays::from_edges(&edges),
        );
        assert_eq!(graph.edges().collect::<Vec<_>>(), edges);
    }

    #[test]
    fn reversed_swaps_endpoints_and_keeps_distance() {
        assert_eq!(Edge::new(2, 5, 3.0).reversed(), Edge::new(5, 2, 3.0));
    }
}
