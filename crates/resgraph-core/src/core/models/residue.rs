use nalgebra::Point3;

/// A residue as handed over by structure ingestion.
#[derive(Debug, Clone, PartialEq)]
pub struct RawResidue {
    pub name: String,          // Three-letter residue code (e.g., "ALA")
    pub coord: Point3<f64>,    // Representative (C-alpha) atom position
    pub chain_id: char,        // Chain identifier from the source file
    pub residue_number: isize, // Residue sequence number from the source file
}

impl RawResidue {
    pub fn new(name: &str, coord: Point3<f64>) -> Self {
        Self {
            name: name.to_string(),
            coord,
            chain_id: 'A',
            residue_number: 0,
        }
    }

    pub fn with_origin(mut self, chain_id: char, residue_number: isize) -> Self {
        self.chain_id = chain_id;
        self.residue_number = residue_number;
        self
    }
}

/// Per-residue features of a retained residue; node `k` of the graph is the
/// `k`-th retained residue.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResidueFeature {
    pub type_index: usize,
    pub physchem: [f64; 3],
    pub coord: Point3<f64>,
}
