mod app;
mod chart;
mod config;
mod error;
mod nav;
mod page;
mod render;
mod source;
mod stats;
mod types;

use anyhow::Result;
use tokio::io::AsyncBufReadExt;
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

use crate::app::App;
use crate::config::Settings;
use crate::nav::Command;
use crate::source::HttpSource;

/// Forwards parsed stdin lines to the board. Ends quietly on EOF.
fn spawn_stdin_commands() -> mpsc::Receiver<Command> {
    let (tx, rx) = mpsc::channel(16);
    tokio::spawn(async move {
        let mut lines = tokio::io::BufReader::new(tokio::io::stdin()).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            if line.trim().is_empty() {
                continue;
            }
            match line.parse::<Command>() {
                Ok(cmd) => {
                    if tx.send(cmd).await.is_err() {
                        break;
                    }
                }
                Err(e) => tracing::warn!(error = %e, "ignoring input"),
            }
        }
    });
    rx
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let s = Settings::from_env()?;
    tracing::info!(url = %s.api_url, variant = ?s.variant, "loaded settings");

    let source = HttpSource::new(s.api_url.clone(), s.http_timeout())?;
    let app = App::new(&s, source);

    app.run(spawn_stdin_commands()).await
}
