#[derive(Debug, thiserror::Error)]
pub enum ResponseError {
    /// Blob responses need a textual item.
    #[error("Result item must be a stringable")]
    NotStringable,

    #[error("failed to serialize response payload: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid HTTP response: {0}")]
    Http(#[from] http::Error),
}
