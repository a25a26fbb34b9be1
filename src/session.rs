//! Session orchestration: load the catalog once, then drive the player

use anyhow::{Context, Result, anyhow};
use std::collections::HashMap;

use crate::catalog::{CatalogClient, CatalogLoader, LOAD_DEADLINE, Library, Song};
use crate::config::Config;
use crate::error::PlayerError;
use crate::player::{PlaybackStatus, PlayerClient};

/// Everything the UI needs after startup: the flattened track list plus the
/// clients that play a track and report status.
pub struct Session {
    catalog: CatalogClient,
    player: PlayerClient,
    library: Library,
    positions: HashMap<String, usize>,
}

impl Session {
    /// Build the catalog client, load the whole catalog (bounded by
    /// [`LOAD_DEADLINE`]) and bind the player client.
    pub async fn start(config: &Config) -> Result<Self> {
        let catalog = CatalogClient::new(&config.server).context("invalid server configuration")?;

        tracing::info!(server = %config.server.base_url, "Loading catalog");
        let library = CatalogLoader::new(&catalog)
            .load_with_deadline(LOAD_DEADLINE)
            .await
            .context("music server not reachable")?;

        let player = PlayerClient::new(config.socket_path.clone());
        tracing::info!(
            socket = %player.socket_path().display(),
            songs = library.song_count,
            "Session ready"
        );

        Ok(Self::new(catalog, player, library))
    }

    pub fn new(catalog: CatalogClient, player: PlayerClient, library: Library) -> Self {
        let positions = library
            .tracks
            .iter()
            .enumerate()
            .map(|(i, song)| (song.id.clone(), i))
            .collect();

        Self {
            catalog,
            player,
            library,
            positions,
        }
    }

    pub fn tracks(&self) -> &[Song] {
        &self.library.tracks
    }

    pub fn library(&self) -> &Library {
        &self.library
    }

    pub fn track(&self, id: &str) -> Option<&Song> {
        self.positions.get(id).map(|&i| &self.library.tracks[i])
    }

    /// Hand the track's stream URL to the player
    pub async fn play_by_id(&self, id: &str) -> Result<()> {
        let song = self
            .track(id)
            .ok_or_else(|| anyhow!("track {} is not in the catalog", id))?;

        let url = self.catalog.build_stream_url(&song.id);
        self.player
            .play(&url)
            .await
            .with_context(|| format!("failed to play \"{}\"", song.title))?;

        tracing::info!(track = %song.title, artist = %song.artist, "Playback requested");
        Ok(())
    }

    pub async fn status(&self) -> Result<PlaybackStatus, PlayerError> {
        self.player.get_status().await
    }
}
