use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("input format: {0}")]
    InputFormat(String),
    #[error("record {index}: input format: {message}")]
    Record { index: usize, message: String },
    #[error("record {index}: malformed timestamp {value}")]
    MalformedTimestamp { index: usize, value: String },
}
