#[derive(Debug, thiserror::Error)]
pub enum HarvestError {
    #[error("browser error: {0}")]
    Browser(#[from] chromiumoxide::error::CdpError),

    #[error("failed to launch browser: {0}")]
    Launch(String),

    #[error("invalid selector {0:?}")]
    Selector(String),

    #[error("no listing appeared within {0:?}")]
    FeedNotFound(std::time::Duration),

    #[error("element is not scrollable")]
    NotScrollable,

    #[error("I/O error")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error")]
    Json(#[from] serde_json::Error),

    #[error("CSV error")]
    Csv(#[from] csv::Error),
}
