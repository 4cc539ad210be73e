pub use anyhow::*;
use thiserror::*;

#[derive(Error, Debug)]
pub enum BindleError {
    #[error("I/O Error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Manifest type '{0}' is invalid")]
    InvalidManifestType(String),

    #[error("required option '{0}' is missing")]
    MissingOption(&'static str),

    #[error("'manifestOptions' with type '{kind}': {source}")]
    Manifest {
        kind: String,
        #[source]
        source: Box<BindleError>,
    },

    #[error("JSON Error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Build error: {0}")]
    Build(#[from] anyhow::Error),
}

pub type BindleResult<T = ()> = Result<T, BindleError>;

impl BindleError {
    /// Wraps a renderer or configuration error with the manifest kind it
    /// came from, so the user sees which configuration block is at fault.
    pub fn for_manifest(self, kind: &str) -> Self {
        BindleError::Manifest {
            kind: kind.to_string(),
            source: Box::new(self),
        }
    }
}
