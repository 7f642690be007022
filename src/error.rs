use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("i/o error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to read table {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("invalid json in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("column `{0}` not found in table")]
    MissingColumn(String),
    #[error("language resource `{name}` unavailable: {message}")]
    Resource { name: &'static str, message: String },
    #[error("failed to render chart {path}: {message}")]
    Chart { path: PathBuf, message: String },
    #[error("no publication years left to plot")]
    EmptySeries,
}

impl PipelineError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PipelineError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn resource(name: &'static str, err: impl std::fmt::Display) -> Self {
        PipelineError::Resource {
            name,
            message: format!("{err:#}"),
        }
    }
}

pub type Result<T, E = PipelineError> = std::result::Result<T, E>;
