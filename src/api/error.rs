/// Failures that happen before an envelope could be interpreted.
///
/// Everything here is a transport-level failure: the server's own
/// `success: false` answers are reported through `Outcome::Failure` instead.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Request failed: {0}")]
    Network(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Unexpected payload: {0}")]
    UnexpectedPayload(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Network(err.to_string())
    }
}
