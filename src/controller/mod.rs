//! Controller module - Application logic and event handling
//!
//! - `input`: Key event handling
//! - `playback`: Starting tracks and applying player status

mod input;
mod playback;

use std::sync::Arc;
use tokio::sync::Mutex;

use crate::error::{CatalogError, PlayerError};
use crate::model::AppModel;
use crate::session::Session;

#[derive(Clone)]
pub struct AppController {
    pub(crate) model: Arc<Mutex<AppModel>>,
    pub(crate) session: Arc<Session>,
}

impl AppController {
    pub fn new(model: Arc<Mutex<AppModel>>, session: Arc<Session>) -> Self {
        Self { model, session }
    }

    pub(crate) fn format_error(error: &anyhow::Error) -> String {
        if let Some(player_error) = error.downcast_ref::<PlayerError>() {
            if player_error.is_transport() {
                return "Player not reachable. Is mpv running with --input-ipc-server?".to_string();
            }
            if player_error.is_protocol() {
                return format!("Player rejected the request: {}", player_error);
            }
        }

        if let Some(catalog_error) = error.downcast_ref::<CatalogError>() {
            if catalog_error.is_timeout() {
                return "Music server timed out. Please try again.".to_string();
            }
        }
        format!("Error: {:#}", error)
    }
}
