use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;

use super::{decode_snapshot, SnapshotSource};
use crate::error::FetchError;
use crate::types::Snapshot;

/// Snapshot endpoint reached with a plain GET: no query string, no auth.
#[derive(Clone)]
pub struct HttpSource {
    url: String,
    http: reqwest::Client,
}

impl HttpSource {
    pub fn new(url: String, timeout: Duration) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("build reqwest client")?;
        Ok(Self { url, http })
    }
}

#[async_trait]
impl SnapshotSource for HttpSource {
    async fn fetch(&self) -> Result<Snapshot, FetchError> {
        let resp = self.http.get(&self.url).send().await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Transport(format!("GET snapshot non-2xx: status={status}")));
        }

        let body = resp.text().await?;
        tracing::debug!(bytes = body.len(), "snapshot body received");
        decode_snapshot(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Answers a single request with the given status line and body.
    async fn serve_once(status: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut sock, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 4096];
            let _ = sock.read(&mut buf).await;
            let resp = format!(
                "HTTP/1.1 {status}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                body.len()
            );
            sock.write_all(resp.as_bytes()).await.unwrap();
            sock.shutdown().await.ok();
        });
        format!("http://{addr}/exec")
    }

    fn source(url: String) -> HttpSource {
        HttpSource::new(url, Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn fetches_snapshot() {
        let url = serve_once(
            "200 OK",
            r#"{"landingPageData":{"topBuys":[]},"fixturesData":[],"teamsData":[],"playersData":[{"name":"B. Khan","category":"Bowler","basePrice":80}]}"#,
        )
        .await;
        let snap = source(url).fetch().await.unwrap();
        assert_eq!(snap.players_data.len(), 1);
        assert_eq!(snap.players_data[0].name, "B. Khan");
    }

    #[tokio::test]
    async fn non_2xx_is_transport_error() {
        let url = serve_once("503 Service Unavailable", "{}").await;
        let err = source(url).fetch().await.unwrap_err();
        assert!(matches!(err, FetchError::Transport(ref m) if m.contains("503")));
    }

    #[tokio::test]
    async fn backend_error_field_is_application_error() {
        let url = serve_once("200 OK", r#"{"error":"Sheet locked"}"#).await;
        let err = source(url).fetch().await.unwrap_err();
        assert!(err.is_application());
    }

    #[tokio::test]
    async fn refused_connection_is_transport_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let err = source(format!("http://{addr}/exec")).fetch().await.unwrap_err();
        assert!(matches!(err, FetchError::Transport(_)));
    }
}
