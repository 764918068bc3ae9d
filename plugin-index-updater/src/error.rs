use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum UpdaterError {
    #[error("failed to read index {}: {source}", path.display())]
    ReadIndex {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("could not load index {}: document is empty", path.display())]
    EmptyIndex { path: PathBuf },

    #[error("failed to parse index {}: {source}", path.display())]
    ParseIndex {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    #[error("failed to read artifact {}: {source}", path.display())]
    ReadArtifact {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    RenderIndex(#[from] serde_yaml::Error),

    #[error("failed to write index {}: {source}", path.display())]
    WriteIndex {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("plugin '{name}' not found in index")]
    PluginNotFound { name: String },

    #[error("plugin '{name}' has no binary for platform '{platform}'")]
    PlatformNotFound { name: String, platform: String },
}
