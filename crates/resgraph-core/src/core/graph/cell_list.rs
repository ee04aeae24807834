use crate::core::utils::geometry::{bounding_box, euclidean_distance};
use itertools::Itertools;
use nalgebra::Point3;
use std::collections::HashMap;

type CellIndex = (i64, i64, i64);

/// Relative widening of the cell edge over the cutoff. Two points exactly one
/// cutoff apart must never round into cells two apart.
const CELL_EDGE_MARGIN: f64 = 1e-9;

/// Uniform grid over a point set. With a cell edge no smaller than the cutoff,
/// every pair within the cutoff lies in the same or in adjacent cells.
pub(crate) struct CellList {
    cells: HashMap<CellIndex, Vec<usize>>,
}

impl CellList {
    /// `cutoff` must be finite and positive.
    pub(crate) fn new(coords: &[Point3<f64>], cutoff: f64) -> Self {
        let cell_size = cutoff * (1.0 + CELL_EDGE_MARGIN);
        let origin = bounding_box(coords).map_or_else(Point3::origin, |(min, _)| min);
        let mut cells: HashMap<CellIndex, Vec<usize>> = HashMap::new();
        for (idx, coord) in coords.iter().enumerate() {
            cells
                .entry(Self::cell_of(coord, &origin, cell_size))
                .or_default()
                .push(idx);
        }
        Self { cells }
    }

    fn cell_of(coord: &Point3<f64>, origin: &Point3<f64>, cell_size: f64) -> CellIndex {
        let offset = coord - origin;
        (
            (offset.x / cell_size).floor() as i64,
            (offset.y / cell_size).floor() as i64,
            (offset.z / cell_size).floor() as i64,
        )
    }

    fn neighbor_cells(cell: CellIndex) -> impl Iterator<Item = CellIndex> {
        (-1i64..=1).flat_map(move |dx| {
            (-1i64..=1).flat_map(move |dy| {
                (-1i64..=1).map(move |dz| {
                    (
                        cell.0.saturating_add(dx),
                        cell.1.saturating_add(dy),
                        cell.2.saturating_add(dz),
                    )
                })
            })
        })
    }

    /// All pairs `(i, j, distance)` with `i < j` and `distance <= cutoff`, sorted
    /// ascending by `(i, j)`.
    pub(crate) fn pairs_within(
        &self,
        coords: &[Point3<f64>],
        cutoff: f64,
    ) -> Vec<(usize, usize, f64)> {
        let mut pairs = Vec::new();
        let mut accept = |a: usize, b: usize| {
            let (i, j) = if a < b { (a, b) } else { (b, a) };
            let distance = euclidean_distance(&coords[i], &coords[j]);
            if distance <= cutoff {
                pairs.push((i, j, distance));
            }
        };

        for (&cell, members) in &self.cells {
            for (&a, &b) in members.iter().tuple_combinations() {
                accept(a, b);
            }
            // Each pair of distinct cells is visited once, from the smaller index.
            for neighbor in Self::neighbor_cells(cell).filter(|n| *n > cell) {
                if let Some(others) = self.cells.get(&neighbor) {
                    for (&a, &b) in members.iter().cartesian_product(others) {
                        accept(a, b);
                    }
                }
            }
        }

        pairs.sort_unstable_by(|x, y| (x.0, x.1).cmp(&(y.0, y.1)));
        // Saturated cell indices at extreme coordinates can revisit a cell pair.
        pairs.dedup_by(|x, y| x.0 == y.0 && x.1 == y.1);
        pairs
    }
}
