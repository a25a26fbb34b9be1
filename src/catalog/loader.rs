//! Bounded concurrent catalog loader
//!
//! Artists are listed once, then fanned out (at most [`ARTIST_CONCURRENCY`] in
//! flight). Each artist fans out again over its albums (at most
//! [`ALBUM_CONCURRENCY`] in flight per artist). Results are written back into
//! the slot they were spawned from, so the flattened track list keeps
//! artist → album → song order whatever order the requests complete in.
//!
//! The first failure at either level aborts the whole load: returning early
//! drops the in-flight stream, which cancels every sibling request.

use futures::{StreamExt, TryStreamExt, stream};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use crate::error::{CatalogError, LoadError};
use super::CatalogSource;
use super::types::{Album, Song};

/// Artists whose albums are being fetched at the same time
pub const ARTIST_CONCURRENCY: usize = 8;
/// Album song listings in flight per artist
pub const ALBUM_CONCURRENCY: usize = 32;
/// Upper bound for the whole startup load
pub const LOAD_DEADLINE: Duration = Duration::from_secs(60);

/// Fully resolved catalog, flattened for the UI
#[derive(Clone, Debug, Default)]
pub struct Library {
    pub tracks: Vec<Song>,
    pub artist_count: usize,
    pub album_count: usize,
    pub song_count: usize,
}

pub struct CatalogLoader<'a, S: ?Sized> {
    source: &'a S,
}

impl<'a, S> CatalogLoader<'a, S>
where
    S: CatalogSource + ?Sized,
{
    pub fn new(source: &'a S) -> Self {
        Self { source }
    }

    /// Run [`load`](Self::load), giving up once `deadline` has elapsed.
    pub async fn load_with_deadline(&self, deadline: Duration) -> Result<Library, LoadError> {
        tokio::time::timeout(deadline, self.load())
            .await
            .map_err(|_| LoadError::DeadlineExceeded(deadline))?
    }

    /// Fetch the whole artist → album → song tree and flatten it.
    ///
    /// All-or-nothing: any failed request fails the load.
    pub async fn load(&self) -> Result<Library, LoadError> {
        let mut artists = self
            .source
            .list_artists()
            .await
            .map_err(LoadError::Artists)?;
        tracing::debug!(artists = artists.len(), "Fetched artist list");

        let total = AtomicUsize::new(0);
        let running_total = &total;

        let jobs: Vec<(usize, String, String)> = artists
            .iter()
            .enumerate()
            .map(|(slot, artist)| (slot, artist.id.clone(), artist.name.clone()))
            .collect();

        let mut pending = stream::iter(jobs)
            .map(move |(slot, artist_id, artist_name)| async move {
                let result = self.load_artist(&artist_id, &artist_name, running_total).await;
                result
                    .map(|albums| (slot, albums))
                    .map_err(|source| {
                        tracing::warn!(
                            artist = %artist_name,
                            endpoint = source.endpoint(),
                            error = %source,
                            "Artist load failed"
                        );
                        LoadError::Artist {
                            artist: artist_name,
                            source,
                        }
                    })
            })
            .buffer_unordered(ARTIST_CONCURRENCY);

        while let Some((slot, albums)) = pending.try_next().await? {
            artists[slot].albums = albums;
        }

        let artist_count = artists.len();
        let album_count = artists.iter().map(|a| a.albums.len()).sum();
        let tracks: Vec<Song> = artists
            .into_iter()
            .flat_map(|artist| artist.albums)
            .flat_map(|album| album.songs)
            .collect();
        let song_count = total.load(Ordering::Acquire);
        debug_assert_eq!(song_count, tracks.len());

        tracing::info!(
            artists = artist_count,
            albums = album_count,
            songs = song_count,
            "Catalog loaded"
        );

        Ok(Library {
            tracks,
            artist_count,
            album_count,
            song_count,
        })
    }

    #[tracing::instrument(level = "debug", skip(self, total))]
    async fn load_artist(
        &self,
        artist_id: &str,
        artist_name: &str,
        total: &AtomicUsize,
    ) -> Result<Vec<Album>, CatalogError> {
        let mut albums = self.source.list_albums(artist_id).await?;

        let jobs: Vec<(usize, String)> = albums
            .iter()
            .map(|album| album.id.clone())
            .enumerate()
            .collect();

        let mut pending = stream::iter(jobs)
            .map(move |(slot, album_id)| async move {
                self.source
                    .list_songs(&album_id)
                    .await
                    .map(|songs| (slot, songs))
            })
            .buffer_unordered(ALBUM_CONCURRENCY);

        // Each slot is written by exactly one completed request.
        while let Some((slot, songs)) = pending.try_next().await? {
            total.fetch_add(songs.len(), Ordering::AcqRel);
            albums[slot].attach_songs(artist_name, songs);
        }

        Ok(albums)
    }
}
