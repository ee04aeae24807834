use super::table;
use crate::core::models::residue::{RawResidue, ResidueFeature};
use tracing::debug;

/// Converts parsed residues into feature records, preserving input order.
///
/// Residues whose type is not in the feature table are skipped rather than
/// reported; the `k`-th retained residue becomes node `k`.
pub fn extract_features(residues: &[RawResidue]) -> Vec<ResidueFeature> {
    let features: Vec<ResidueFeature> = residues
        .iter()
        .filter_map(|residue| {
            table::lookup(&residue.name).map(|entry| ResidueFeature {
                type_index: entry.index,
                physchem: entry.physchem(),
                coord: residue.coord,
            })
        })
        .collect();

    let skipped = residues.len() - features.len();
    if skipped > 0 {
        debug!(
            skipped,
            retained = features.len(),
            "Skipped residues with types outside the feature table."
        );
    }

    features
}
