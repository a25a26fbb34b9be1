//! Playback status snapshot composed from player properties

use std::collections::HashMap;
use std::time::Duration;

/// Tags reported by the player for the loaded file.
///
/// These come from the player's own tag parsing and may differ from the
/// catalog's strings for the same track.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TrackMetadata {
    pub title: String,
    pub artist: String,
    pub album: String,
}

impl TrackMetadata {
    /// Project title/artist/album out of the player's tag map.
    ///
    /// The lowercase key wins; otherwise keys are matched case-insensitively,
    /// taking the smallest matching key so the choice does not depend on map
    /// order.
    pub fn from_tags(tags: &HashMap<String, String>) -> Self {
        let tag = |name: &str| {
            tags.get(name)
                .or_else(|| {
                    tags.iter()
                        .filter(|(key, _)| key.eq_ignore_ascii_case(name))
                        .min_by(|(a, _), (b, _)| a.cmp(b))
                        .map(|(_, value)| value)
                })
                .cloned()
                .unwrap_or_default()
        };

        Self {
            title: tag("title"),
            artist: tag("artist"),
            album: tag("album"),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct PlaybackStatus {
    pub position: Duration,
    pub duration: Duration,
    pub paused: bool,
    /// Not paused and something with a length is loaded
    pub playing: bool,
    pub metadata: TrackMetadata,
}

impl PlaybackStatus {
    pub fn compose(
        position_secs: f64,
        duration_secs: f64,
        paused: bool,
        metadata: TrackMetadata,
    ) -> Self {
        let duration = seconds(duration_secs);
        Self {
            position: seconds(position_secs),
            duration,
            paused,
            playing: !paused && !duration.is_zero(),
            metadata,
        }
    }

    /// Position as a fraction of the duration, clamped to 0..=1
    pub fn progress_ratio(&self) -> f64 {
        if self.duration.is_zero() {
            0.0
        } else {
            (self.position.as_secs_f64() / self.duration.as_secs_f64()).clamp(0.0, 1.0)
        }
    }
}

fn seconds(secs: f64) -> Duration {
    Duration::try_from_secs_f64(secs).unwrap_or_default()
}
