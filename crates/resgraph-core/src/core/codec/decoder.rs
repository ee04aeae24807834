use crate::core::models::graph::layout;
use crate::core::models::tensor::{DecodedGraph, DecodedResidue, EncodedGraph};
use crate::core::validation::ValidationError;

/// Splits every node row into `(residue_index, physchem, coord)` and passes the
/// edge arrays through unchanged.
///
/// # Errors
///
/// Returns [`ValidationError::Shape`] if `node_features` is not 2-D or is narrower
/// than the node row layout, and [`ValidationError::TypeIndex`] if a type column
/// holds a negative or non-finite value.
pub fn decode(encoded: &EncodedGraph) -> Result<DecodedGraph, ValidationError> {
    let node_features = &encoded.node_features;
    let (rows, cols) = node_features
        .dims2()
        .ok_or_else(|| ValidationError::Shape {
            array: "node_features",
            reason: format!(
                "expected 2 dimensions, found shape {:?}",
                node_features.shape()
            ),
        })?;
    if cols < layout::NODE_FEATURE_WIDTH {
        return Err(ValidationError::Shape {
            array: "node_features",
            reason: format!(
                "expected at least {} columns, found {}",
                layout::NODE_FEATURE_WIDTH,
                cols
            ),
        });
    }

    let residues = (0..rows)
        .filter_map(|r| node_features.row(r).map(|row| decode_row(r, row)))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(DecodedGraph {
        residues,
        edge_index: encoded.edge_index.clone(),
        edge_attr: encoded.edge_attr.clone(),
    })
}

/// The type column is truncated toward zero, so fractional parts are discarded.
fn decode_row(index: usize, row: &[f32]) -> Result<DecodedResidue, ValidationError> {
    let type_value = row[layout::TYPE_COLUMN];
    if !type_value.is_finite() || type_value < 0.0 {
        return Err(ValidationError::TypeIndex {
            row: index,
            value: type_value,
        });
    }

    let mut physchem = [0.0f32; 3];
    physchem.copy_from_slice(&row[layout::PHYSCHEM_COLUMNS]);
    let mut coord = [0.0f32; 3];
    coord.copy_from_slice(&row[layout::COORD_COLUMNS]);
    Ok(DecodedResidue {
        residue_index: type_value as usize,
        physchem,
        coord,
    })
}
