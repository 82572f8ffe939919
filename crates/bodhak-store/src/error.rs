use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io error at {path}: {source}")]
    Io {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed preferences file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unknown theme: {0}")]
    UnknownTheme(String),
}
