//! Structure ingestion and array export.
//!
//! Readers implement [`traits::StructureFile`] and produce one
//! [`RawResidue`](crate::core::models::residue::RawResidue) per residue, in file
//! order, located at its C-alpha atom. The exporter writes decoded graphs as
//! `nodes.csv` and `edges.csv`.

pub mod export;
pub mod pdb;
pub mod residue_csv;
pub mod traits;
