use crate::core::models::tensor::DecodedGraph;
use serde::Serialize;
use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

pub const NODES_FILE_NAME: &str = "nodes.csv";
pub const EDGES_FILE_NAME: &str = "edges.csv";

const NODE_COLUMNS: [&str; 9] = [
    "node",
    "residue_index",
    "residue_name",
    "charge",
    "hydrophobicity",
    "polarity",
    "x",
    "y",
    "z",
];
const EDGE_COLUMNS: [&str; 3] = ["src", "dst", "distance"];

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("I/O error on '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

#[derive(Debug, Serialize)]
struct NodeRecord {
    node: usize,
    residue_index: usize,
    residue_name: &'static str,
    charge: f32,
    hydrophobicity: f32,
    polarity: f32,
    x: f32,
    y: f32,
    z: f32,
}

#[derive(Debug, Serialize)]
struct EdgeRecord {
    src: i64,
    dst: i64,
    distance: f32,
}

// The header is written explicitly so that empty graphs still produce one.
fn headed_writer<W: Write>(writer: W, columns: &[&str]) -> Result<csv::Writer<W>, csv::Error> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    csv_writer.write_record(columns)?;
    Ok(csv_writer)
}

/// One row per node. Residue names outside the table are written as `UNK`.
pub fn write_nodes_csv<W: Write>(graph: &DecodedGraph, writer: W) -> Result<(), ExportError> {
    let mut csv_writer = headed_writer(writer, &NODE_COLUMNS)?;
    for (node, residue) in graph.residues.iter().enumerate() {
        let [charge, hydrophobicity, polarity] = residue.physchem;
        let [x, y, z] = residue.coord;
        csv_writer.serialize(NodeRecord {
            node,
            residue_index: residue.residue_index,
            residue_name: residue.residue_name().unwrap_or("UNK"),
            charge,
            hydrophobicity,
            polarity,
            x,
            y,
            z,
        })?;
    }
    csv_writer.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// One row per directed edge, in storage order.
pub fn write_edges_csv<W: Write>(graph: &DecodedGraph, writer: W) -> Result<(), ExportError> {
    let mut csv_writer = headed_writer(writer, &EDGE_COLUMNS)?;
    for (src, dst, distance) in graph.edges() {
        csv_writer.serialize(EdgeRecord { src, dst, distance })?;
    }
    csv_writer.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Writes `nodes.csv` and `edges.csv` into `dir`, creating it if needed.
/// Returns the two written paths.
pub fn write_graph_csv(
    graph: &DecodedGraph,
    dir: &Path,
) -> Result<(PathBuf, PathBuf), ExportError> {
    let io_error = |path: &Path| {
        let path = path.to_path_buf();
        move |source: io::Error| ExportError::Io { path, source }
    };

    std::fs::create_dir_all(dir).map_err(io_error(dir))?;

    let nodes_path = dir.join(NODES_FILE_NAME);
    let nodes_file = File::create(&nodes_path).map_err(io_error(&nodes_path))?;
    write_nodes_csv(graph, nodes_file)?;

    let edges_path = dir.join(EDGES_FILE_NAME);
    let edges_file = File::create(&edges_path).map_err(io_error(&edges_path))?;
    write_edges_csv(graph, edges_file)?;

    info!(
        nodes = graph.residues.len(),
        edges = graph.num_edges(),
        dir = %dir.display(),
        "Exported graph arrays as CSV."
    );
    Ok((nodes_path, edges_path))
}
