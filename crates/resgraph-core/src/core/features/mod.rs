//! # Residue Features Module
//!
//! Maps raw residues onto typed feature records using a fixed chemical lookup table.
//!
//! - [`table`] - Compile-time map from three-letter residue codes to a categorical
//!   index and a physicochemical descriptor vector
//! - [`extractor`] - Converts parsed residues into [`ResidueFeature`](crate::core::models::residue::ResidueFeature)
//!   records, silently filtering residue types missing from the table
//!
//! ```ignore
//! use resgraph::core::features::{extractor::extract_features, table};
//!
//! let entry = table::lookup("ALA").unwrap();
//! assert_eq!(entry.index, 0);
//! let features = extract_features(&raw_residues);
//! ```

pub mod extractor;
pub mod table;
