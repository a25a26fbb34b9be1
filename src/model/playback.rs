//! Now-playing state derived from the status poller

use std::time::Duration;

use crate::player::PollOutcome;

/// What the now-playing panel shows
#[derive(Clone, Debug, PartialEq)]
pub struct PlaybackInfo {
    pub title: String,
    pub artist: String,
    pub album: String,
    pub position: Duration,
    pub duration: Duration,
    pub is_playing: bool,
    pub paused: bool,
    /// Position as a fraction of the duration
    pub progress: f64,
    /// Set while the last poll failed
    pub player_error: Option<String>,
}

impl Default for PlaybackInfo {
    fn default() -> Self {
        Self {
            title: "Nothing playing".to_string(),
            artist: String::new(),
            album: String::new(),
            position: Duration::ZERO,
            duration: Duration::ZERO,
            is_playing: false,
            paused: false,
            progress: 0.0,
            player_error: None,
        }
    }
}

impl PlaybackInfo {
    pub fn from_outcome(outcome: &PollOutcome) -> Self {
        let status = match outcome {
            PollOutcome::Ready(status) => status,
            PollOutcome::Failed { reachable: false, message } => {
                return Self {
                    title: "Player not reachable".to_string(),
                    player_error: Some(message.clone()),
                    ..Self::default()
                };
            }
            // The player answered but has nothing to report, e.g. no file loaded
            PollOutcome::Failed { reachable: true, .. } | PollOutcome::Pending => {
                return Self::default();
            }
        };

        let title = if status.metadata.title.is_empty() && status.duration.is_zero() {
            Self::default().title
        } else {
            status.metadata.title.clone()
        };

        Self {
            title,
            artist: status.metadata.artist.clone(),
            album: status.metadata.album.clone(),
            position: status.position,
            duration: status.duration,
            is_playing: status.playing,
            paused: status.paused,
            progress: status.progress_ratio(),
            player_error: None,
        }
    }
}
