use crate::cli::ReplayArgs;
use crate::error::{CliError, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use stepscore::engine::config::{ReplayConfig, ReplayConfigBuilder};
use tracing::debug;

/// Run configuration as written in a TOML file; every key is optional and
/// command-line arguments take precedence.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct PartialRunConfig {
    pub detector: Option<PathBuf>,
    pub trace: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub table_name: Option<String>,
}

/// Fully resolved settings for the `replay` command.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSettings {
    pub replay: ReplayConfig,
    pub output: PathBuf,
}

impl PartialRunConfig {
    /// Reads a run configuration file.
    ///
    /// Relative paths in the file are resolved against the file's directory.
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Reading run configuration from {:?}", path);
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e,
        })?;

        let base = path.parent().unwrap_or_else(|| Path::new(""));
        config.detector = config.detector.map(|p| resolve_relative(base, p));
        config.trace = config.trace.map(|p| resolve_relative(base, p));
        config.output = config.output.map(|p| resolve_relative(base, p));
        Ok(config)
    }

    pub fn merge_with_cli(self, args: &ReplayArgs) -> Result<RunSettings> {
        let detector = args
            .detector
            .clone()
            .or(self.detector)
            .ok_or_else(|| missing("detector"))?;
        let trace = args
            .trace
            .clone()
            .or(self.trace)
            .ok_or_else(|| missing("trace"))?;
        let output = args
            .output
            .clone()
            .or(self.output)
            .ok_or_else(|| missing("output"))?;

        let mut builder = ReplayConfigBuilder::new()
            .detector_path(detector)
            .trace_path(trace);
        if let Some(name) = args.table_name.as_deref().or(self.table_name.as_deref()) {
            builder = builder.table_name(name);
        }
        let replay = builder
            .build()
            .map_err(|e| CliError::Config(e.to_string()))?;

        debug!("Resolved replay settings: {:?}, output {:?}", replay, output);
        Ok(RunSettings { replay, output })
    }
}

fn missing(key: &str) -> CliError {
    CliError::Argument(format!(
        "'{}' must be given on the command line or in the config file",
        key
    ))
}

fn resolve_relative(base: &Path, path: PathBuf) -> PathBuf {
    if path.is_absolute() {
        path
    } else {
        base.join(path)
    }
}
