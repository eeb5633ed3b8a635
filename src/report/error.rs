use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("no errors to summarize")]
    EmptyErrorSet,
    #[error("chart render error: {0}")]
    Render(#[from] askama::Error),
    #[error("cannot write chart {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("JSON encode error: {0}")]
    Json(#[from] serde_json::Error),
}
