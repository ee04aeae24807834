use super::file::{FileConfig, FileGraphConfig};
use super::models::AppConfig;
use crate::cli::{BuildArgs, InputFormat};
use crate::error::{CliError, Result};
use resgraph::engine::config::GraphConfigBuilder;
use std::fmt::Display;
use std::path::Path;
use std::str::FromStr;

/// Merges defaults, the config file, `--set` values and flags, in increasing
/// precedence.
pub fn build_config(args: &BuildArgs) -> Result<AppConfig> {
    let file_config = if let Some(config_path) = &args.config {
        FileConfig::from_file(config_path)?
    } else {
        FileConfig::default()
    };

    let mut file_config = apply_set_values(file_config, &args.set_values)?;
    let graph_file = file_config.graph.take().unwrap_or_default();

    let mut builder = GraphConfigBuilder::new();
    if let Some(cutoff) = args.cutoff.or(graph_file.distance_cutoff) {
        builder = builder.distance_cutoff(cutoff);
    }
    if let Some(k) = args.k_neighbors.or(graph_file.k_neighbors) {
        builder = builder.k_neighbors(k);
    }
    if let Some(mode) = args
        .neighbor_mode
        .as_deref()
        .or(graph_file.neighbor_mode.as_deref())
    {
        builder = builder.neighbor_mode(parse_choice(mode, "neighbor-mode")?);
    }
    if let Some(search) = args.search.as_deref().or(graph_file.search.as_deref()) {
        builder = builder.search(parse_choice(search, "search")?);
    }
    if let Some(names) = graph_file.residue_feature_names {
        builder = builder.residue_feature_names(names);
    }

    let graph = builder
        .build()
        .map_err(|e| CliError::Config(e.to_string()))?;

    Ok(AppConfig {
        input_path: args.input.clone(),
        input_format: resolve_input_format(args.format, &args.input)?,
        output_dir: args.output.clone(),
        graph,
    })
}

fn parse_choice<T>(value: &str, key: &str) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    value
        .parse()
        .map_err(|e| CliError::Config(format!("Invalid value for {}: {}", key, e)))
}

fn resolve_input_format(explicit: Option<InputFormat>, path: &Path) -> Result<InputFormat> {
    if let Some(format) = explicit {
        return Ok(format);
    }
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    match extension.as_deref() {
        Some("pdb" | "ent") => Ok(InputFormat::Pdb),
        Some("csv") => Ok(InputFormat::Csv),
        _ => Err(CliError::Argument(format!(
            "Cannot infer the format of '{}'; pass --format pdb or --format csv.",
            path.display()
        ))),
    }
}

fn apply_set_values(mut config: FileConfig, set_values: &[String]) -> Result<FileConfig> {
    if set_values.is_empty() {
        return Ok(config);
    }
    for kv_pair in set_values {
        let Some((key, value_str)) = kv_pair.split_once('=') else {
            return Err(CliError::Config(format!(
                "Invalid --set format: '{}'. Expected KEY=VALUE.",
                kv_pair
            )));
        };
        let graph: &mut FileGraphConfig = config.graph.get_or_insert_with(Default::default);

        match key.trim() {
            "graph.distance-cutoff" => {
                graph.distance_cutoff = Some(value_str.trim().parse().map_err(|_| {
                    CliError::Config(format!("Invalid float value for {}: {}", key, value_str))
                })?);
            }
            "graph.k-neighbors" => {
                graph.k_neighbors = Some(value_str.trim().parse().map_err(|_| {
                    CliError::Config(format!("Invalid integer value for {}: {}", key, value_str))
                })?);
            }
            "graph.neighbor-mode" => {
                graph.neighbor_mode = Some(value_str.trim().to_string());
            }
            "graph.search" => {
                graph.search = Some(value_str.trim().to_string());
            }
            "graph.residue-feature-names" => {
                graph.residue_feature_names = Some(
                    value_str
                        .split(',')
                        .map(|name| name.trim().to_string())
                        .collect(),
                );
            }
            _ => {
                return Err(CliError::Config(format!(
                    "Unsupported configuration key for --set: '{}'",
                    key
                )));
            }
        }
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use clap::Parser;
    use resgraph::core::graph::builder::{NeighborMode, SearchStrategy};
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn write_config_file(dir: &TempDir, content: &str) -> PathBuf {
        let file_path = dir.path().join("resgraph.toml");
        fs::write(&file_path, content).unwrap();
        file_path
    }

    fn build_args(extra: &[&str]) -> BuildArgs {
        let mut args = vec!["resgraph", "build", "-i", "protein.pdb", "-o", "out"];
        args.extend_from_slice(extra);
        match Cli::parse_from(args).command {
            Commands::Build(build_args) => build_args,
            other => panic!("Expected 'build' subcommand, got {other:?}"),
        }
    }

    #[test]
    fn no_file_and_no_flags_gives_defaults() {
        let config = build_config(&build_args(&[])).unwrap();
        assert_eq!(config.graph.distance_cutoff, 8.0);
        assert_eq!(config.graph.k_neighbors, 10);
        assert_eq!(config.graph.neighbor_mode, NeighborMode::Cutoff);
        assert_eq!(config.graph.search, SearchStrategy::BruteForce);
        assert_eq!(config.input_format, InputFormat::Pdb);
        assert_eq!(config.output_dir, PathBuf::from("out"));
    }

    #[test]
    fn file_values_override_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config_file(
            &dir,
            r#"
            [graph]
            distance-cutoff = 6.0
            neighbor-mode = "k-nearest"
            k-neighbors = 5
            "#,
        );
        let config = build_config(&build_args(&["-c", path.to_str().unwrap()])).unwrap();
        assert_eq!(config.graph.distance_cutoff, 6.0);
        assert_eq!(config.graph.neighbor_mode, NeighborMode::KNearest);
        assert_eq!(config.graph.k_neighbors, 5);
    }

    #[test]
    fn set_values_override_file_and_flags_override_set_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config_file(
            &dir,
            "[graph]\ndistance-cutoff = 6.0\nsearch = \"brute-force\"\n",
        );
        let config = build_config(&build_args(&[
            "-c",
            path.to_str().unwrap(),
            "-S",
            "graph.distance-cutoff=7.0",
            "-S",
            "graph.search=cell-list",
        ]))
        .unwrap();
        assert_eq!(config.graph.distance_cutoff, 7.0);
        assert_eq!(config.graph.search, SearchStrategy::CellList);

        let config = build_config(&build_args(&[
            "-c",
            path.to_str().unwrap(),
            "-S",
            "graph.distance-cutoff=7.0",
            "--cutoff",
            "9.5",
        ]))
        .unwrap();
        assert_eq!(config.graph.distance_cutoff, 9.5);
    }

    #[test]
    fn invalid_cutoff_is_a_config_error() {
        let result = build_config(&build_args(&["--cutoff=-2"]));
        match result {
            Err(CliError::Config(msg)) => assert!(msg.contains("distance_cutoff")),
            other => panic!("expected a config error, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn unknown_neighbor_mode_is_a_config_error() {
        let result = build_config(&build_args(&["--neighbor-mode", "radius"]));
        assert!(matches!(result, Err(CliError::Config(_))));
    }

    #[test]
    fn malformed_or_unknown_set_values_are_rejected() {
        assert!(matches!(
            build_config(&build_args(&["-S", "graph.distance-cutoff"])),
            Err(CliError::Config(_))
        ));
        assert!(matches!(
            build_config(&build_args(&["-S", "graph.width=7"])),
            Err(CliError::Config(_))
        ));
        assert!(matches!(
            build_config(&build_args(&["-S", "graph.k-neighbors=many"])),
            Err(CliError::Config(_))
        ));
    }

    #[test]
    fn residue_feature_names_can_be_set_as_a_list() {
        let config = build_config(&build_args(&[
            "-S",
            "graph.residue-feature-names=type, q, h, p",
        ]))
        .unwrap();
        assert_eq!(config.graph.residue_feature_names, vec!["type", "q", "h", "p"]);
    }

    #[test]
    fn input_format_is_inferred_or_explicit() {
        assert_eq!(
            resolve_input_format(None, Path::new("a/b/residues.CSV")).unwrap(),
            InputFormat::Csv
        );
        assert_eq!(
            resolve_input_format(Some(InputFormat::Csv), Path::new("model.pdb")).unwrap(),
            InputFormat::Csv
        );
        assert!(matches!(
            resolve_input_format(None, Path::new("structure.cif")),
            Err(CliError::Argument(_))
        ));
    }
}
