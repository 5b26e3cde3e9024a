use thiserror::Error;

/// Why a refresh cycle was abandoned. Every variant is cycle-local: the page
/// keeps what it showed and the next tick tries again.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Network failure or a non-2xx status.
    #[error("transport error: {0}")]
    Transport(String),

    /// The body was not a snapshot document.
    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// The backend answered but flagged its own result as invalid.
    #[error("application error: {0}")]
    Application(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        FetchError::Transport(err.to_string())
    }
}

impl FetchError {
    pub fn is_application(&self) -> bool {
        matches!(self, FetchError::Application(_))
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum NavError {
    #[error("no page section with id {0:?}")]
    UnknownPage(String),

    #[error("unknown command: {0:?}")]
    UnknownCommand(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_errors_convert() {
        let json_err = serde_json::from_str::<i32>("invalid").unwrap_err();
        let err: FetchError = json_err.into();
        assert!(matches!(err, FetchError::Decode(_)));
        assert!(!err.is_application());
    }

    #[test]
    fn application_error_display() {
        let err = FetchError::Application("Sheet locked".into());
        assert_eq!(err.to_string(), "application error: Sheet locked");
        assert!(err.is_application());
    }
}
