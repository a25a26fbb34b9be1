//! Scripted stand-in for the player's IPC socket, used by tests

use serde_json::{Value, json};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::UnixListener;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

const NOT_FOUND_REPLY: &str = "{\"error\":\"property not found\",\"data\":null,\"request_id\":0}\n";

/// Listens on a socket in a temporary directory and answers `get_property`
/// with a canned line per property. `"request_id":0` in a canned line is
/// rewritten to the id of the request being answered. Every received command
/// is forwarded to [`next_command`](Self::next_command).
pub(crate) struct FakePlayer {
    path: PathBuf,
    _dir: TempDir,
    commands: mpsc::UnboundedReceiver<Vec<String>>,
    task: JoinHandle<()>,
}

impl FakePlayer {
    /// Answer each property with a successful reply carrying `data`
    pub(crate) fn with_properties(properties: &[(&str, Value)]) -> Self {
        let replies = properties
            .iter()
            .map(|(name, data)| {
                let reply = json!({"error": "success", "data": data, "request_id": 0});
                (name.to_string(), format!("{}\n", reply))
            })
            .collect();
        Self::start(replies)
    }

    /// Answer each property with the raw text given (an empty string closes
    /// the connection without replying)
    pub(crate) fn with_replies(replies: &[(&str, &str)]) -> Self {
        let replies = replies
            .iter()
            .map(|(name, raw)| (name.to_string(), raw.to_string()))
            .collect();
        Self::start(replies)
    }

    fn start(replies: HashMap<String, String>) -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("player.sock");
        let listener = UnixListener::bind(&path).expect("bind fake player socket");
        let (tx, commands) = mpsc::unbounded_channel();

        let task = tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                let (read, mut write) = stream.into_split();
                let mut lines = BufReader::new(read).lines();
                let Ok(Some(line)) = lines.next_line().await else {
                    continue;
                };
                let Ok(request) = serde_json::from_str::<Value>(&line) else {
                    continue;
                };
                let args: Vec<String> = request["command"]
                    .as_array()
                    .map(|args| {
                        args.iter()
                            .filter_map(|a| a.as_str().map(str::to_owned))
                            .collect()
                    })
                    .unwrap_or_default();

                if args.first().map(String::as_str) == Some("get_property") {
                    let name = args.get(1).cloned().unwrap_or_default();
                    let request_id = request["request_id"].as_u64().unwrap_or(0);
                    let reply = replies
                        .get(&name)
                        .map(String::as_str)
                        .unwrap_or(NOT_FOUND_REPLY)
                        .replace("\"request_id\":0", &format!("\"request_id\":{}", request_id));
                    let _ = write.write_all(reply.as_bytes()).await;
                }
                let _ = tx.send(args);
            }
        });

        Self {
            path,
            _dir: dir,
            commands,
            task,
        }
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    pub(crate) async fn next_command(&mut self) -> Vec<String> {
        self.commands.recv().await.expect("fake player stopped")
    }
}

impl Drop for FakePlayer {
    fn drop(&mut self) {
        self.task.abort();
    }
}
