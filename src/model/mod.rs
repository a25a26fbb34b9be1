//! Model module - UI state
//!
//! - `types`: Focus and UI state
//! - `playback`: Now-playing information
//! - `search`: Track filtering
//! - `app_model`: Main application model with state management methods

mod types;
mod playback;
mod search;
mod app_model;

pub use types::{ActiveSection, UiState};
pub use playback::PlaybackInfo;
pub use app_model::AppModel;
