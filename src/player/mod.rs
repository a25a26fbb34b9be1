//! Player module - control plane for the external media player
//!
//! - `ipc`: Request/response client over the player's local socket
//! - `status`: Playback status snapshot
//! - `poller`: Periodic status polling

mod ipc;
mod status;
mod poller;

#[cfg(test)]
pub(crate) mod testing;

pub use ipc::PlayerClient;
pub use status::{PlaybackStatus, TrackMetadata};
pub use poller::{DEFAULT_POLL_INTERVAL, PollOutcome, StatusPoller};
