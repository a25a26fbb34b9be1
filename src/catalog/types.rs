//! Catalog hierarchy types (artist → album → song)

use serde::{Deserialize, Deserializer};

/// Accept identifiers emitted either as JSON strings or numbers.
///
/// Numbers are kept in their textual form; identifiers are opaque and are
/// never interpreted beyond equality.
pub(crate) fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;
    use serde_json::Value;

    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        _ => Err(Error::custom("id must be a string or number")),
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct Artist {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    /// Filled by the loader, not by `getArtists`
    #[serde(default, rename = "album")]
    pub albums: Vec<Album>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Album {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    /// Back-reference to the owning artist
    #[serde(default, deserialize_with = "deserialize_optional_id")]
    pub artist_id: String,
    #[serde(default)]
    pub artist: String,
    #[serde(default)]
    pub genre: String,
    #[serde(default, rename = "song")]
    pub songs: Vec<Song>,
}

/// A single track; the unit handed to the terminal UI
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct Song {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub artist: String,
    #[serde(default)]
    pub album: String,
    #[serde(default)]
    pub genre: String,
}

fn deserialize_optional_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;
    use serde_json::Value;

    match Value::deserialize(deserializer)? {
        Value::Null => Ok(String::new()),
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        _ => Err(Error::custom("id must be a string or number")),
    }
}

impl Album {
    /// Attach fetched songs, filling display strings the server left out from
    /// this album and its owning artist.
    pub(crate) fn attach_songs(&mut self, artist_name: &str, songs: Vec<Song>) {
        let album_artist = if self.artist.is_empty() {
            artist_name
        } else {
            self.artist.as_str()
        };

        self.songs = songs
            .into_iter()
            .map(|mut song| {
                if song.artist.is_empty() {
                    song.artist = album_artist.to_string();
                }
                if song.album.is_empty() {
                    song.album = self.name.clone();
                }
                if song.genre.is_empty() {
                    song.genre = self.genre.clone();
                }
                song
            })
            .collect();
    }
}
