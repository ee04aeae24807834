use phf::{Map, phf_map};

/// Number of residue types in the lookup table.
pub const NUM_RESIDUE_TYPES: usize = 20;

/// Semantic names of the three physicochemical descriptor columns, in vector order.
pub const DESCRIPTOR_NAMES: [&str; 3] = ["charge", "hydrophobicity", "polarity"];

/// Three-letter codes ordered by categorical index.
pub static AMINO_ACIDS: [&str; NUM_RESIDUE_TYPES] = [
    "ALA", "ARG", "ASN", "ASP", "CYS", "GLU", "GLN", "GLY", "HIS", "ILE", "LEU", "LYS", "MET",
    "PHE", "PRO", "SER", "THR", "TRP", "TYR", "VAL",
];

/// One row of the residue feature table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResidueEntry {
    /// Categorical index in `0..NUM_RESIDUE_TYPES`.
    pub index: usize,
    /// Formal charge class at neutral pH (-1, 0, 0.5 for histidine, +1).
    pub charge: f64,
    /// Kyte-Doolittle hydrophobicity.
    pub hydrophobicity: f64,
    /// 1.0 for polar side chains, 0.0 otherwise.
    pub polarity: f64,
}

impl ResidueEntry {
    const fn new(index: usize, charge: f64, hydrophobicity: f64, polarity: f64) -> Self {
        Self {
            index,
            charge,
            hydrophobicity,
            polarity,
        }
    }

    /// The descriptor vector in [`DESCRIPTOR_NAMES`] order.
    #[inline]
    pub fn physchem(&self) -> [f64; 3] {
        [self.charge, self.hydrophobicity, self.polarity]
    }
}

#[rustfmt::skip]
static RESIDUE_TABLE: Map<&'static str, ResidueEntry> = phf_map! {
    // --- Aliphatic / hydrophobic ---
    "ALA" => ResidueEntry::new(0,  0.0,  1.8, 0.0),
    "GLY" => ResidueEntry::new(7,  0.0, -0.4, 0.0),
    "ILE" => ResidueEntry::new(9,  0.0,  4.5, 0.0),
    "LEU" => ResidueEntry::new(10, 0.0,  3.8, 0.0),
    "MET" => ResidueEntry::new(12, 0.0,  1.9, 0.0),
    "PRO" => ResidueEntry::new(14, 0.0, -1.6, 0.0),
    "VAL" => ResidueEntry::new(19, 0.0,  4.2, 0.0),
    "CYS" => ResidueEntry::new(4,  0.0,  2.5, 0.0),

    // --- Aromatic ---
    "PHE" => ResidueEntry::new(13, 0.0,  2.8, 0.0),
    "TRP" => ResidueEntry::new(17, 0.0, -0.9, 0.0),
    "TYR" => ResidueEntry::new(18, 0.0, -1.3, 1.0),

    // --- Polar, uncharged ---
    "ASN" => ResidueEntry::new(2,  0.0, -3.5, 1.0),
    "GLN" => ResidueEntry::new(6,  0.0, -3.5, 1.0),
    "SER" => ResidueEntry::new(15, 0.0, -0.8, 1.0),
    "THR" => ResidueEntry::new(16, 0.0, -0.7, 1.0),

    // --- Charged ---
    "ARG" => ResidueEntry::new(1,  1.0, -4.5, 1.0),
    "LYS" => ResidueEntry::new(11, 1.0, -3.9, 1.0),
    "HIS" => ResidueEntry::new(8,  0.5, -3.2, 1.0),
    "ASP" => ResidueEntry::new(3, -1.0, -3.5, 1.0),
    "GLU" => ResidueEntry::new(5, -1.0, -3.5, 1.0),
};

/// Looks up a residue by its three-letter code. Surrounding whitespace is ignored,
/// case is not.
pub fn lookup(residue_name: &str) -> Option<&'static ResidueEntry> {
    RESIDUE_TABLE.get(residue_name.trim())
}

pub fn name_for_index(index: usize) -> Option<&'static str> {
    AMINO_ACIDS.get(index).copied()
}

/// All table entries ordered by categorical index.
pub fn entries() -> impl Iterator<Item = (&'static str, &'static ResidueEntry)> {
    AMINO_ACIDS
        .iter()
        .filter_map(|&name| RESIDUE_TABLE.get(name).map(|entry| (name, entry)))
}
