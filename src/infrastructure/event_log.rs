use std::path::{Path, PathBuf};

use chrono::{SecondsFormat, Utc};
use tokio::io::AsyncWriteExt;
use tokio::sync::mpsc;

/// Best-effort audit log. `record` stamps the message and hands it to a
/// background task over a channel, so a slow or failing log file never
/// blocks a response. Append failures only reach the tracing output.
#[derive(Clone)]
pub struct EventLog {
    tx: mpsc::UnboundedSender<String>,
}

impl EventLog {
    /// Start the background appender for `path`. The task ends when the last
    /// `EventLog` clone is dropped.
    pub fn spawn(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let (tx, mut rx) = mpsc::unbounded_channel::<String>();
        tokio::spawn(async move {
            while let Some(line) = rx.recv().await {
                if let Err(err) = append_line(&path, &line).await {
                    tracing::error!(%err, path = %path.display(), "event log append failed");
                }
            }
        });
        Self { tx }
    }

    /// Fire-and-forget. The timestamp is taken now, when the operation
    /// completed, not when the line reaches the file.
    pub fn record(&self, message: impl AsRef<str>) {
        let stamp = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
        let _ = self.tx.send(format_event(&stamp, message.as_ref()));
    }
}

fn format_event(stamp: &str, message: &str) -> String {
    format!("{stamp} - {message}\n")
}

async fn append_line(path: &Path, line: &str) -> std::io::Result<()> {
    let mut file = tokio::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .await?;
    file.write_all(line.as_bytes()).await
}
