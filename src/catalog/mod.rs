//! Catalog module - remote music library access
//!
//! - `types`: Artist/album/song hierarchy
//! - `client`: HTTP client for the server's REST API
//! - `loader`: Bounded concurrent materialization of the full catalog

mod types;
mod client;
mod loader;

use async_trait::async_trait;

use crate::error::CatalogError;

pub use types::{Album, Artist, Song};
pub use client::CatalogClient;
pub use loader::{CatalogLoader, Library, LOAD_DEADLINE};

/// One level of the catalog hierarchy at a time.
///
/// The loader only depends on this trait; `CatalogClient` is the production
/// implementation.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn list_artists(&self) -> Result<Vec<Artist>, CatalogError>;

    async fn list_albums(&self, artist_id: &str) -> Result<Vec<Album>, CatalogError>;

    async fn list_songs(&self, album_id: &str) -> Result<Vec<Song>, CatalogError>;
}
