pub mod http;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::FetchError;
use crate::types::{is_truthy, Snapshot};

/// Where refresh cycles get the auction state from.
#[async_trait]
pub trait SnapshotSource: Send + Sync {
    /// Fetch one full snapshot. Any error abandons the cycle.
    async fn fetch(&self) -> Result<Snapshot, FetchError>;
}

pub use http::HttpSource;

/// Decodes a response body. The backend's `error` flag is checked before the
/// shape, so an error-only document is reported as such rather than as a
/// malformed snapshot.
pub fn decode_snapshot(body: &str) -> Result<Snapshot, FetchError> {
    let v: Value = serde_json::from_str(body)?;
    if let Some(err) = v.get("error").filter(|e| is_truthy(e)) {
        let msg = match err {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        return Err(FetchError::Application(msg));
    }
    Ok(serde_json::from_value(v)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_document_is_application_error() {
        match decode_snapshot(r#"{"error": "Sheet locked"}"#) {
            Err(FetchError::Application(msg)) => assert_eq!(msg, "Sheet locked"),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn falsy_error_is_ignored() {
        let body = r#"{
            "landingPageData": {"topBuys": []},
            "fixturesData": [], "teamsData": [], "playersData": [],
            "error": ""
        }"#;
        let snap = decode_snapshot(body).unwrap();
        assert!(snap.error_message().is_none());
    }

    #[test]
    fn malformed_body_is_decode_error() {
        assert!(matches!(decode_snapshot("<html>"), Err(FetchError::Decode(_))));
        assert!(matches!(
            decode_snapshot(r#"{"teamsData": []}"#),
            Err(FetchError::Decode(_))
        ));
    }
}
