use std::path::PathBuf;
use thiserror::Error;

pub const DEFAULT_STEP_TABLE_NAME: &str = "steps";

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
    #[error("Table name must not be empty")]
    EmptyTableName,
}

/// Inputs of a step-trace replay.
#[derive(Debug, Clone, PartialEq)]
pub struct ReplayConfig {
    pub detector_path: PathBuf,
    pub trace_path: PathBuf,
    pub table_name: String,
}

#[derive(Default)]
pub struct ReplayConfigBuilder {
    detector_path: Option<PathBuf>,
    trace_path: Option<PathBuf>,
    table_name: Option<String>,
}

impl ReplayConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn detector_path(mut self, path: PathBuf) -> Self {
        self.detector_path = Some(path);
        self
    }
    pub fn trace_path(mut self, path: PathBuf) -> Self {
        self.trace_path = Some(path);
        self
    }
    pub fn table_name(mut self, name: &str) -> Self {
        self.table_name = Some(name.to_string());
        self
    }

    pub fn build(self) -> Result<ReplayConfig, ConfigError> {
        let table_name = self
            .table_name
            .unwrap_or_else(|| DEFAULT_STEP_TABLE_NAME.to_string());
        if table_name.trim().is_empty() {
            return Err(ConfigError::EmptyTableName);
        }
        Ok(ReplayConfig {
            detector_path: self
                .detector_path
                .ok_or(ConfigError::MissingParameter("detector_path"))?,
            trace_path: self
                .trace_path
                .ok_or(ConfigError::MissingParameter("trace_path"))?,
            table_name,
        })
    }
}
