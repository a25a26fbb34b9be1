//! HTTP client for the music server's REST API

use async_trait::async_trait;
use reqwest::{StatusCode, Url};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;

use crate::config::ServerConfig;
use crate::error::CatalogError;
use super::CatalogSource;
use super::types::{Album, Artist, Song};

type Result<T> = std::result::Result<T, CatalogError>;

const API_VERSION: &str = "1.16.1";
const CLIENT_NAME: &str = "navitui";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const ALBUM_LIST_PAGE_SIZE: usize = 10;

/// `getArtists` payload: artists grouped under an index letter
#[derive(Debug, Deserialize)]
struct ArtistIndex {
    #[serde(default)]
    index: Vec<IndexGroup>,
}

#[derive(Debug, Deserialize)]
struct IndexGroup {
    #[serde(default, rename = "artist")]
    artists: Vec<Artist>,
}

/// `getAlbumList2` payload
#[derive(Debug, Deserialize)]
struct AlbumList {
    #[serde(default, rename = "album")]
    albums: Vec<Album>,
}

/// Stateless catalog client; every call carries the static credentials
#[derive(Clone, Debug)]
pub struct CatalogClient {
    http: reqwest::Client,
    base_url: Url,
    username: String,
    password: String,
}

impl CatalogClient {
    pub fn new(config: &ServerConfig) -> Result<Self> {
        if config.base_url.is_empty() {
            return Err(CatalogError::Config("server address is required".into()));
        }
        if config.username.is_empty() {
            return Err(CatalogError::Config("username is required".into()));
        }
        if config.password.is_empty() {
            return Err(CatalogError::Config("password is required".into()));
        }

        let base_url = Url::parse(&config.base_url).map_err(|e| {
            CatalogError::Config(format!("invalid server address {:?}: {}", config.base_url, e))
        })?;
        if !matches!(base_url.scheme(), "http" | "https") || base_url.cannot_be_a_base() {
            return Err(CatalogError::Config(format!(
                "server address must be an http(s) URL, got {:?}",
                config.base_url
            )));
        }

        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| CatalogError::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url,
            username: config.username.clone(),
            password: config.password.clone(),
        })
    }

    fn encode_url(&self, endpoint: &str, params: &[(&str, &str)]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .push("rest")
                .push(&format!("{}.view", endpoint));
        }

        url.query_pairs_mut()
            .append_pair("u", &self.username)
            .append_pair("p", &self.password)
            .append_pair("v", API_VERSION)
            .append_pair("c", CLIENT_NAME)
            .append_pair("f", "json")
            .extend_pairs(params);

        url
    }

    /// Issue a GET and return the inner `subsonic-response` object once its
    /// status reports success.
    async fn request(&self, endpoint: &'static str, params: &[(&str, &str)]) -> Result<Value> {
        crate::log_api_request!(endpoint, params = params.len());
        let result = self.send(endpoint, params).await;
        crate::log_api_result!(endpoint, result);
        result
    }

    async fn send(&self, endpoint: &'static str, params: &[(&str, &str)]) -> Result<Value> {
        let url = self.encode_url(endpoint, params);

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| CatalogError::from_reqwest(endpoint, e))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(CatalogError::Status { endpoint, status });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| CatalogError::from_reqwest(endpoint, e))?;

        let mut envelope: Value = serde_json::from_slice(&body).map_err(|e| CatalogError::Decode {
            endpoint,
            reason: e.to_string(),
        })?;

        let inner = envelope
            .get_mut("subsonic-response")
            .map(Value::take)
            .ok_or_else(|| CatalogError::Decode {
                endpoint,
                reason: "missing subsonic-response envelope".into(),
            })?;

        match inner.get("status").and_then(Value::as_str) {
            Some("ok") => Ok(inner),
            status => {
                let code = inner
                    .pointer("/error/code")
                    .and_then(Value::as_i64)
                    .unwrap_or_default();
                let message = inner
                    .pointer("/error/message")
                    .and_then(Value::as_str)
                    .filter(|m| !m.is_empty())
                    .map(str::to_owned)
                    .unwrap_or_else(|| format!("status={}", status.unwrap_or("missing")));
                Err(CatalogError::Api {
                    endpoint,
                    code,
                    message,
                })
            }
        }
    }

    fn payload<T: DeserializeOwned>(
        endpoint: &'static str,
        mut response: Value,
        key: &str,
    ) -> Result<T> {
        let value = response
            .get_mut(key)
            .map(Value::take)
            .ok_or_else(|| CatalogError::Decode {
                endpoint,
                reason: format!("missing `{}` in response", key),
            })?;

        serde_json::from_value(value).map_err(|e| CatalogError::Decode {
            endpoint,
            reason: e.to_string(),
        })
    }

    /// Check reachability and credentials
    pub async fn ping(&self) -> Result<()> {
        self.request("ping", &[]).await.map(|_| ())
    }

    /// Every artist, in server order, with the index-letter grouping dropped
    pub async fn list_artists(&self) -> Result<Vec<Artist>> {
        let response = self.request("getArtists", &[]).await?;
        let index: ArtistIndex = Self::payload("getArtists", response, "artists")?;

        Ok(index
            .index
            .into_iter()
            .flat_map(|group| group.artists)
            .collect())
    }

    /// Albums owned by one artist; songs are not populated
    pub async fn list_albums_for_artist(&self, artist_id: &str) -> Result<Vec<Album>> {
        let response = self.request("getArtist", &[("id", artist_id)]).await?;
        let artist: Artist = Self::payload("getArtist", response, "artist")?;

        Ok(artist
            .albums
            .into_iter()
            .map(|mut album| {
                if album.artist_id.is_empty() {
                    album.artist_id = artist_id.to_string();
                }
                album.songs.clear();
                album
            })
            .collect())
    }

    pub async fn list_songs_for_album(&self, album_id: &str) -> Result<Vec<Song>> {
        let response = self.request("getAlbum", &[("id", album_id)]).await?;
        let album: Album = Self::payload("getAlbum", response, "album")?;
        Ok(album.songs)
    }

    /// One page of the alphabetical-by-artist album list
    pub async fn album_list(&self, offset: usize) -> Result<Vec<Album>> {
        let size = ALBUM_LIST_PAGE_SIZE.to_string();
        let offset = offset.to_string();
        let response = self
            .request(
                "getAlbumList2",
                &[
                    ("size", size.as_str()),
                    ("type", "alphabeticalByArtist"),
                    ("offset", offset.as_str()),
                ],
            )
            .await?;
        let list: AlbumList = Self::payload("getAlbumList2", response, "albumList2")?;
        Ok(list.albums)
    }

    /// Authenticated URL the player can fetch directly. No request is made.
    pub fn build_stream_url(&self, song_id: &str) -> String {
        self.encode_url("stream", &[("id", song_id)]).into()
    }
}

#[async_trait]
impl CatalogSource for CatalogClient {
    async fn list_artists(&self) -> Result<Vec<Artist>> {
        CatalogClient::list_artists(self).await
    }

    async fn list_albums(&self, artist_id: &str) -> Result<Vec<Album>> {
        self.list_albums_for_artist(artist_id).await
    }

    async fn list_songs(&self, album_id: &str) -> Result<Vec<Song>> {
        self.list_songs_for_album(album_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    fn config(base_url: &str) -> ServerConfig {
        ServerConfig {
            base_url: base_url.to_string(),
            username: "alice".to_string(),
            password: "s3cret".to_string(),
        }
    }

    fn auth_query() -> Vec<Matcher> {
        vec![
            Matcher::UrlEncoded("u".into(), "alice".into()),
            Matcher::UrlEncoded("p".into(), "s3cret".into()),
            Matcher::UrlEncoded("v".into(), API_VERSION.into()),
            Matcher::UrlEncoded("c".into(), CLIENT_NAME.into()),
            Matcher::UrlEncoded("f".into(), "json".into()),
        ]
    }

    #[test]
    fn test_new_rejects_missing_fields() {
        for cfg in [
            ServerConfig { base_url: String::new(), ..config("") },
            ServerConfig { username: String::new(), ..config("http://localhost:4533") },
            ServerConfig { password: String::new(), ..config("http://localhost:4533") },
        ] {
            let err = CatalogClient::new(&cfg).unwrap_err();
            assert!(matches!(err, CatalogError::Config(_)), "got {:?}", err);
        }
    }

    #[test]
    fn test_new_rejects_unparseable_address() {
        for addr in ["not a url", "mailto:alice@example.com", "ftp://music.local"] {
            let err = CatalogClient::new(&config(addr)).unwrap_err();
            assert!(matches!(err, CatalogError::Config(_)), "{} gave {:?}", addr, err);
        }
    }

    #[test]
    fn test_build_stream_url_is_pure() {
        let client = CatalogClient::new(&config("https://music.example.com/navidrome/")).unwrap();

        let first = client.build_stream_url("tr-1");
        let second = client.build_stream_url("tr-1");
        assert_eq!(first, second);

        let url = Url::parse(&first).unwrap();
        assert_eq!(url.path(), "/navidrome/rest/stream.view");
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert!(pairs.contains(&("id".into(), "tr-1".into())));
        assert!(pairs.contains(&("u".into(), "alice".into())));
        assert!(pairs.contains(&("p".into(), "s3cret".into())));
        assert!(pairs.contains(&("f".into(), "json".into())));

        assert_ne!(first, client.build_stream_url("tr-2"));
    }

    #[tokio::test]
    async fn test_list_artists_flattens_index_in_order() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/rest/getArtists.view")
            .match_query(Matcher::AllOf(auth_query()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"subsonic-response": {"status": "ok", "version": "1.16.1",
                    "artists": {"index": [
                        {"name": "A", "artist": [{"id": "ar-2", "name": "ABBA"}, {"id": "ar-1", "name": "Air"}]},
                        {"name": "B", "artist": [{"id": 7, "name": "Björk"}]}
                    ]}}}"#,
            )
            .create_async()
            .await;

        let client = CatalogClient::new(&config(&server.url())).unwrap();
        let artists = client.list_artists().await.unwrap();

        let names: Vec<&str> = artists.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, ["ABBA", "Air", "Björk"]);
        assert_eq!(artists[2].id, "7");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_failure_envelope_becomes_api_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/rest/getArtists.view")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(
                r#"{"subsonic-response": {"status": "failed",
                    "error": {"code": 40, "message": "Wrong username or password"}}}"#,
            )
            .create_async()
            .await;

        let client = CatalogClient::new(&config(&server.url())).unwrap();
        match client.list_artists().await.unwrap_err() {
            CatalogError::Api { endpoint, code, message } => {
                assert_eq!(endpoint, "getArtists");
                assert_eq!(code, 40);
                assert_eq!(message, "Wrong username or password");
            }
            other => panic!("expected Api error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_non_200_status() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/rest/ping.view")
            .match_query(Matcher::Any)
            .with_status(503)
            .create_async()
            .await;

        let client = CatalogClient::new(&config(&server.url())).unwrap();
        let err = client.ping().await.unwrap_err();
        assert!(
            matches!(err, CatalogError::Status { endpoint: "ping", status } if status.as_u16() == 503),
            "got {:?}",
            err
        );
    }

    #[tokio::test]
    async fn test_malformed_body_is_decode_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/rest/getAlbum.view")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body("<html>nope</html>")
            .create_async()
            .await;

        let client = CatalogClient::new(&config(&server.url())).unwrap();
        let err = client.list_songs_for_album("al-1").await.unwrap_err();
        assert!(matches!(err, CatalogError::Decode { endpoint: "getAlbum", .. }));
    }

    #[tokio::test]
    async fn test_ok_envelope_without_payload_is_decode_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/rest/getArtist.view")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"subsonic-response": {"status": "ok"}}"#)
            .create_async()
            .await;

        let client = CatalogClient::new(&config(&server.url())).unwrap();
        let err = client.list_albums_for_artist("ar-1").await.unwrap_err();
        assert!(matches!(err, CatalogError::Decode { endpoint: "getArtist", .. }));
    }

    #[tokio::test]
    async fn test_list_albums_for_artist() {
        let mut server = mockito::Server::new_async().await;
        let mut query = auth_query();
        query.push(Matcher::UrlEncoded("id".into(), "ar-1".into()));
        server
            .mock("GET", "/rest/getArtist.view")
            .match_query(Matcher::AllOf(query))
            .with_status(200)
            .with_body(
                r#"{"subsonic-response": {"status": "ok", "artist": {"id": "ar-1", "name": "Air",
                    "album": [
                        {"id": "al-1", "name": "Moon Safari", "artistId": "ar-1", "genre": "Electronic"},
                        {"id": "al-2", "name": "Talkie Walkie", "genre": "Electronic"}
                    ]}}}"#,
            )
            .create_async()
            .await;

        let client = CatalogClient::new(&config(&server.url())).unwrap();
        let albums = client.list_albums_for_artist("ar-1").await.unwrap();

        assert_eq!(albums.len(), 2);
        assert_eq!(albums[0].name, "Moon Safari");
        assert_eq!(albums[1].artist_id, "ar-1");
        assert!(albums.iter().all(|a| a.songs.is_empty()));
    }

    #[tokio::test]
    async fn test_list_songs_for_album() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/rest/getAlbum.view")
            .match_query(Matcher::UrlEncoded("id".into(), "al-1".into()))
            .with_status(200)
            .with_body(
                r#"{"subsonic-response": {"status": "ok", "album": {"id": "al-1", "name": "Moon Safari",
                    "song": [
                        {"id": "tr-1", "title": "La Femme d'Argent", "artist": "Air", "album": "Moon Safari", "genre": "Electronic"},
                        {"id": "tr-2", "title": "Sexy Boy", "artist": "Air", "album": "Moon Safari"}
                    ]}}}"#,
            )
            .create_async()
            .await;

        let client = CatalogClient::new(&config(&server.url())).unwrap();
        let songs = client.list_songs_for_album("al-1").await.unwrap();

        let titles: Vec<&str> = songs.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, ["La Femme d'Argent", "Sexy Boy"]);
    }

    #[tokio::test]
    async fn test_album_list_page_parameters() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/rest/getAlbumList2.view")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("size".into(), "10".into()),
                Matcher::UrlEncoded("type".into(), "alphabeticalByArtist".into()),
                Matcher::UrlEncoded("offset".into(), "20".into()),
            ]))
            .with_status(200)
            .with_body(
                r#"{"subsonic-response": {"status": "ok",
                    "albumList2": {"album": [{"id": "al-9", "name": "Homogenic", "artist": "Björk"}]}}}"#,
            )
            .create_async()
            .await;

        let client = CatalogClient::new(&config(&server.url())).unwrap();
        let albums = client.album_list(20).await.unwrap();

        assert_eq!(albums.len(), 1);
        assert_eq!(albums[0].artist, "Björk");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_ping_ok() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/rest/ping.view")
            .match_query(Matcher::AllOf(auth_query()))
            .with_status(200)
            .with_body(r#"{"subsonic-response": {"status": "ok", "version": "1.16.1"}}"#)
            .create_async()
            .await;

        let client = CatalogClient::new(&config(&server.url())).unwrap();
        client.ping().await.unwrap();
    }

    #[tokio::test]
    async fn test_unreachable_server_is_transport_error() {
        let client = CatalogClient::new(&config("http://127.0.0.1:1")).unwrap();
        let err = client.ping().await.unwrap_err();
        assert!(
            matches!(err, CatalogError::Transport { endpoint: "ping", .. }),
            "got {:?}",
            err
        );
    }
}
