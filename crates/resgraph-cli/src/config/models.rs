use crate::cli::InputFormat;
use resgraph::engine::config::GraphConfig;
use std::path::PathBuf;

pub struct AppConfig {
    pub input_path: PathBuf,
    pub input_format: InputFormat,
    pub output_dir: PathBuf,
    pub graph: GraphConfig,
}
