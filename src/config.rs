//! Connection settings read from the environment

use std::path::PathBuf;

pub const SERVER_URL_VAR: &str = "NAVIDROME_URL";
pub const USERNAME_VAR: &str = "NAVIDROME_USER";
pub const PASSWORD_VAR: &str = "NAVIDROME_PASSWORD";
pub const SOCKET_VAR: &str = "NAVITUI_MPV_SOCKET";

pub const DEFAULT_SOCKET_PATH: &str = "/tmp/navitui-mpv.sock";

/// Music server address and static credentials
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ServerConfig {
    pub base_url: String,
    pub username: String,
    pub password: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub server: ServerConfig,
    /// Player control socket
    pub socket_path: PathBuf,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup.
    ///
    /// Missing server values are left empty; `CatalogClient::new` rejects them.
    /// Only the address is trimmed: credentials are used exactly as given.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).unwrap_or_default();

        let socket_path = lookup(SOCKET_VAR)
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SOCKET_PATH));

        Self {
            server: ServerConfig {
                base_url: get(SERVER_URL_VAR).trim().to_string(),
                username: get(USERNAME_VAR),
                password: get(PASSWORD_VAR),
            },
            socket_path,
        }
    }

    pub fn with_socket_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.socket_path = path.into();
        self
    }
}
