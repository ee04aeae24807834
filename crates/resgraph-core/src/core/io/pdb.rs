use crate::core::io::traits::StructureFile;
use crate::core::models::residue::RawResidue;
use nalgebra::Point3;
use std::collections::HashSet;
use std::io::{self, BufRead};
use thiserror::Error;
use tracing::debug;

const CA_ATOM_NAME: &str = "CA";
const MIN_ATOM_LINE_LENGTH: usize = 54;

#[derive(Debug, Error)]
pub enum PdbError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error on line {line}: {kind}")]
    Parse { line: usize, kind: PdbParseErrorKind },
    #[error("Missing required record: {0}")]
    MissingRecord(String),
}

#[derive(Debug, Error)]
pub enum PdbParseErrorKind {
    #[error("Invalid integer format in columns {columns} (value: '{value}')")]
    InvalidInt { columns: String, value: String },
    #[error("Invalid float format in columns {columns} (value: '{value}')")]
    InvalidFloat { columns: String, value: String },
    #[error("Line is too short for an ATOM record ({length} chars, need at least 54)")]
    LineTooShort { length: usize },
}

fn slice_and_trim(line: &str, start: usize, end: usize) -> &str {
    line.get(start..end).unwrap_or("").trim()
}

fn parse_coord(line: &str, line_num: usize, start: usize, columns: &str) -> Result<f64, PdbError> {
    let value = slice_and_trim(line, start, start + 8);
    value.parse().map_err(|_| PdbError::Parse {
        line: line_num,
        kind: PdbParseErrorKind::InvalidFloat {
            columns: columns.into(),
            value: value.into(),
        },
    })
}

/// Fixed-column PDB reader that keeps one residue per C-alpha atom.
///
/// Only `ATOM` records are considered, so hetero groups (`HETATM`: waters, ligands,
/// modified residues) never become residues. Reading stops at the end of the first
/// model. When a C-alpha has alternate locations, the first conformer listed for
/// the residue is used, whatever its location indicator.
pub struct PdbFile;

impl StructureFile for PdbFile {
    type Error = PdbError;

    fn read_from(reader: &mut impl BufRead) -> Result<Vec<RawResidue>, Self::Error> {
        let mut residues = Vec::new();
        let mut seen: HashSet<(char, isize, char)> = HashSet::new();
        let mut skipped_hetero = 0usize;
        let mut skipped_altloc = 0usize;

        for (line_num, line_res) in reader.lines().enumerate() {
            let line = line_res?;
            let line_num = line_num + 1;

            match slice_and_trim(&line, 0, 6) {
                "ATOM" => {}
                "HETATM" => {
                    skipped_hetero += 1;
                    continue;
                }
                "ENDMDL" | "END" => break,
                _ => continue,
            }

            if slice_and_trim(&line, 12, 16) != CA_ATOM_NAME {
                continue;
            }
            if line.len() < MIN_ATOM_LINE_LENGTH {
                return Err(PdbError::Parse {
                    line: line_num,
                    kind: PdbParseErrorKind::LineTooShort { length: line.len() },
                });
            }

            let res_name = slice_and_trim(&line, 17, 20);
            let chain_id = slice_and_trim(&line, 21, 22).chars().next().unwrap_or('A');
            let res_seq_str = slice_and_trim(&line, 22, 26);
            let residue_number: isize = res_seq_str.parse().map_err(|_| PdbError::Parse {
                line: line_num,
                kind: PdbParseErrorKind::InvalidInt {
                    columns: "23-26".into(),
                    value: res_seq_str.into(),
                },
            })?;

            let insertion_code = line
                .get(26..27)
                .and_then(|c| c.chars().next())
                .unwrap_or(' ');
            if !seen.insert((chain_id, residue_number, insertion_code)) {
                skipped_altloc += 1;
                continue;
            }

            let x = parse_coord(&line, line_num, 30, "31-38")?;
            let y = parse_coord(&line, line_num, 38, "39-46")?;
            let z = parse_coord(&line, line_num, 46, "47-54")?;

            residues.push(
                RawResidue::new(res_name, Point3::new(x, y, z))
                    .with_origin(chain_id, residue_number),
            );
        }

        if residues.is_empty() {
            return Err(PdbError::MissingRecord(
                "ATOM records with a CA atom".to_string(),
            ));
        }

        debug!(
            residues = residues.len(),
            skipped_hetero,
            skipped_altloc,
            "Parsed C-alpha residues from PDB."
        );
        Ok(residues)
    }
}
