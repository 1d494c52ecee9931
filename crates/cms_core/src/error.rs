use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Every way an article fetch can fail.
///
/// Callers that only want something to render can ignore the variant and
/// show an empty listing; the kind is kept so logs and strict callers can
/// tell "CMS is down" apart from "CMS changed its response shape".
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("transport failure: {0}")]
    Transport(String),

    #[error("CMS responded with {status} {reason}")]
    Status { status: u16, reason: String },

    #[error("response body is not valid JSON: {0}")]
    Decode(String),

    #[error("response has no `data` field")]
    MissingData,

    #[error("record {index} does not match the article schema: {reason}")]
    InvalidRecord { index: usize, reason: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FetchErrorKind {
    Transport,
    Status,
    Decode,
    MissingData,
    InvalidRecord,
}

impl FetchError {
    pub fn kind(&self) -> FetchErrorKind {
        match self {
            FetchError::Transport(_) => FetchErrorKind::Transport,
            FetchError::Status { .. } => FetchErrorKind::Status,
            FetchError::Decode(_) => FetchErrorKind::Decode,
            FetchError::MissingData => FetchErrorKind::MissingData,
            FetchError::InvalidRecord { .. } => FetchErrorKind::InvalidRecord,
        }
    }
}

impl FetchErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FetchErrorKind::Transport => "transport",
            FetchErrorKind::Status => "status",
            FetchErrorKind::Decode => "decode",
            FetchErrorKind::MissingData => "missing-data",
            FetchErrorKind::InvalidRecord => "invalid-record",
        }
    }
}

impl std::fmt::Display for FetchErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_error_kind() {
        let err = FetchError::Status { status: 500, reason: "Internal Server Error".to_string() };
        assert_eq!(err.kind(), FetchErrorKind::Status);
        assert_eq!(err.to_string(), "CMS responded with 500 Internal Server Error");
        assert_eq!(FetchError::MissingData.kind().to_string(), "missing-data");
    }

    #[test]
    fn test_fetch_error_converts_into_error() {
        let err: Error = FetchError::Decode("expected value".to_string()).into();
        assert!(matches!(err, Error::Fetch(FetchError::Decode(_))));
    }
}
