use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SweepError {
    #[error("I/O error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize scene {id}: {message}")]
    Serialize { id: String, message: String },

    /// The template names a parameter that its material does not have.
    /// Unlike the other per-template problems, this one aborts the run.
    #[error("Template {template:?} has no <float name=\"{parameter}\"> in its bsdf")]
    ParameterNotFound { template: PathBuf, parameter: String },

    #[error("Invalid config file {path:?}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl SweepError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
