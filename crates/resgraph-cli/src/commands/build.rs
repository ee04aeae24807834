use crate::cli::{BuildArgs, InputFormat};
use crate::config::builder::build_config;
use crate::error::{CliError, Result};
use crate::utils::progress::CliProgressHandler;
use resgraph::{
    core::io::{
        export::write_graph_csv, pdb::PdbFile, residue_csv::CsvResidueFile,
        traits::StructureFile,
    },
    core::models::residue::RawResidue,
    engine::progress::ProgressReporter,
    workflows,
};
use std::path::Path;
use tracing::{info, warn};

pub fn run(args: BuildArgs) -> Result<()> {
    info!("Merging configuration from defaults, file and CLI arguments...");
    let config = build_config(&args)?;

    info!("Loading input structure from {:?}", &config.input_path);
    let residues = read_structure(&config.input_path, config.input_format)?;
    info!("Read {} residue(s).", residues.len());

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.callback());

    println!(
        "Building residue graph (cutoff {:.2} Å, {} mode)...",
        config.graph.distance_cutoff, config.graph.neighbor_mode
    );
    let result = workflows::pipeline::run(&residues, &config.graph, &reporter)?;

    if result.graph.num_nodes() == 0 {
        warn!("No residue in the input has a known type; the graph is empty.");
        println!("Warning: no residue in the input has a known type; writing an empty graph.");
    }

    let (nodes_path, edges_path) = write_graph_csv(&result.decoded, &config.output_dir)?;
    println!(
        "✓ {} node(s) written to: {}",
        result.graph.num_nodes(),
        nodes_path.display()
    );
    println!(
        "✓ {} directed edge(s) written to: {}",
        result.graph.num_edges(),
        edges_path.display()
    );
    Ok(())
}

fn read_structure(path: &Path, format: InputFormat) -> Result<Vec<RawResidue>> {
    let parsed = match format {
        InputFormat::Pdb => PdbFile::read_from_path(path).map_err(anyhow::Error::from),
        InputFormat::Csv => CsvResidueFile::read_from_path(path).map_err(anyhow::Error::from),
    };
    parsed.map_err(|source| CliError::FileParsing {
        path: path.to_path_buf(),
        source,
    })
}
