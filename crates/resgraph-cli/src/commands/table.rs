use crate::error::Result;
use resgraph::core::features::table;
use std::io::{self, Write};

pub fn run() -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_table(&mut out)?;
    Ok(())
}

/// One line per residue type in index order, preceded by a header.
pub fn write_table(out: &mut impl Write) -> io::Result<()> {
    writeln!(
        out,
        "{:>5}  {:<4}  {:>6}  {:>14}  {:>8}",
        "index", "name", "charge", "hydrophobicity", "polarity"
    )?;
    for (name, entry) in table::entries() {
        writeln!(
            out,
            "{:>5}  {:<4}  {:>6.1}  {:>14.1}  {:>8.1}",
            entry.index, name, entry.charge, entry.hydrophobicity, entry.polarity
        )?;
    }
    Ok(())
}
