use crate::core::io::traits::StructureFile;
use crate::core::models::residue::RawResidue;
use nalgebra::Point3;
use serde::Deserialize;
use std::io::{self, BufRead};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CsvResidueError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Missing required record: {0}")]
    MissingRecord(String),
}

#[derive(Debug, Deserialize)]
struct CsvResidueRecord {
    name: String,
    x: f64,
    y: f64,
    z: f64,
    #[serde(default)]
    chain_id: Option<char>,
    #[serde(default)]
    residue_number: Option<isize>,
}

/// Headered CSV with one residue per row: `name,x,y,z[,chain_id,residue_number]`.
///
/// Rows keep file order; `residue_number` defaults to the 1-based row number.
pub struct CsvResidueFile;

impl StructureFile for CsvResidueFile {
    type Error = CsvResidueError;

    fn read_from(reader: &mut impl BufRead) -> Result<Vec<RawResidue>, Self::Error> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut residues = Vec::new();
        for (row, record) in csv_reader.deserialize::<CsvResidueRecord>().enumerate() {
            let record = record?;
            let residue = RawResidue::new(&record.name, Point3::new(record.x, record.y, record.z))
                .with_origin(
                    record.chain_id.unwrap_or('A'),
                    record.residue_number.unwrap_or(row as isize + 1),
                );
            residues.push(residue);
        }

        if residues.is_empty() {
            return Err(CsvResidueError::MissingRecord("residue rows".to_string()));
        }
        Ok(residues)
    }
}
