//! JSON IPC client for the external media player
//!
//! Every call opens a fresh connection to the player socket, writes one
//! newline-terminated JSON command, optionally reads one reply line and closes.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::UnixStream;

use crate::error::PlayerError;
use super::status::{PlaybackStatus, TrackMetadata};

type Result<T> = std::result::Result<T, PlayerError>;

/// How long to wait for the player to answer a property read
const REPLY_TIMEOUT: Duration = Duration::from_secs(2);

#[derive(Serialize)]
struct Command<'a> {
    command: &'a [&'a str],
    request_id: u64,
}

#[derive(Debug, Deserialize)]
struct PropertyReply {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    data: Value,
    #[serde(default)]
    request_id: Option<u64>,
}

#[derive(Clone, Debug)]
pub struct PlayerClient {
    socket_path: PathBuf,
    /// Shared by clones so ids stay unique per client
    next_request_id: Arc<AtomicU64>,
}

impl PlayerClient {
    pub fn new(socket_path: impl Into<PathBuf>) -> Self {
        Self {
            socket_path: socket_path.into(),
            next_request_id: Arc::new(AtomicU64::new(1)),
        }
    }

    pub fn socket_path(&self) -> &Path {
        &self.socket_path
    }

    async fn connect(&self) -> Result<UnixStream> {
        UnixStream::connect(&self.socket_path)
            .await
            .map_err(|source| PlayerError::Connect {
                path: self.socket_path.clone(),
                source,
            })
    }

    /// Write one command and return the request id it was tagged with
    async fn write_command(&self, stream: &mut UnixStream, args: &[&str]) -> Result<u64> {
        let request_id = self.next_request_id.fetch_add(1, Ordering::Relaxed);
        let command = Command {
            command: args,
            request_id,
        };
        let mut line = serde_json::to_vec(&command).map_err(std::io::Error::from)?;
        line.push(b'\n');
        stream.write_all(&line).await?;
        stream.flush().await?;
        Ok(request_id)
    }

    /// Replace the current media with `url` and start playing it.
    ///
    /// No reply is read: a URL the player cannot open only shows up in the
    /// next status read.
    pub async fn play(&self, url: &str) -> Result<()> {
        let mut stream = self.connect().await?;
        self.write_command(&mut stream, &["loadfile", url, "replace"]).await?;
        tracing::debug!(socket = %self.socket_path.display(), "Sent loadfile");
        Ok(())
    }

    /// Read one property and convert its `data` into `T`.
    ///
    /// A `null` or absent `data` yields `T::default()`.
    pub async fn get_property<T>(&self, name: &str) -> Result<T>
    where
        T: DeserializeOwned + Default,
    {
        let mut stream = self.connect().await?;
        let request_id = self.write_command(&mut stream, &["get_property", name]).await?;

        let reply = tokio::time::timeout(REPLY_TIMEOUT, Self::read_reply(stream, name, request_id))
            .await
            .map_err(|_| {
                PlayerError::Io(std::io::Error::new(
                    std::io::ErrorKind::TimedOut,
                    format!("no reply for get_property {}", name),
                ))
            })??;

        if let Some(message) = reply.error.filter(|e| !e.is_empty() && e != "success") {
            tracing::debug!(property = name, error = %message, "Player reported an error");
            return Err(PlayerError::Protocol {
                property: name.to_string(),
                message,
            });
        }

        if reply.data.is_null() {
            return Ok(T::default());
        }

        serde_json::from_value(reply.data).map_err(|e| PlayerError::Decode {
            property: name.to_string(),
            reason: e.to_string(),
        })
    }

    /// First line answering `request_id`; events and replies to other
    /// requests are skipped
    async fn read_reply(stream: UnixStream, property: &str, request_id: u64) -> Result<PropertyReply> {
        let decode = |reason: String| PlayerError::Decode {
            property: property.to_string(),
            reason,
        };

        let mut lines = BufReader::new(stream).lines();
        while let Some(line) = lines.next_line().await? {
            if line.trim().is_empty() {
                continue;
            }
            let value: Value = serde_json::from_str(&line).map_err(|e| decode(e.to_string()))?;
            if value.get("event").is_some() {
                continue;
            }
            let reply: PropertyReply = serde_json::from_value(value).map_err(|e| decode(e.to_string()))?;
            match reply.request_id {
                Some(id) if id != request_id => {
                    tracing::trace!(expected = request_id, got = id, "Skipping reply to another request");
                }
                _ => return Ok(reply),
            }
        }

        Err(decode("connection closed before a reply was received".into()))
    }

    /// Compose position, duration, tags and pause state into one snapshot.
    ///
    /// Any failed read fails the whole snapshot.
    pub async fn get_status(&self) -> Result<PlaybackStatus> {
        let position: f64 = self.get_property("time-pos").await?;
        let duration: f64 = self.get_property("duration").await?;
        let tags: HashMap<String, String> = self.get_property("metadata").await?;
        let paused: bool = self.get_property("pause").await?;

        Ok(PlaybackStatus::compose(
            position,
            duration,
            paused,
            TrackMetadata::from_tags(&tags),
        ))
    }
}
