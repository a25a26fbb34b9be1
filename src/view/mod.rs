//! View module - UI rendering
//!
//! - `utils`: Shared utility functions (formatting, scrollable lists)
//! - `layout`: Header and search bar
//! - `content`: Track table
//! - `progress`: Now-playing gauge
//! - `overlays`: Error notification

mod utils;
mod layout;
mod content;
mod progress;
mod overlays;

use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

use crate::model::AppModel;

pub struct AppView;

impl AppView {
    pub fn render(frame: &mut Frame, model: &AppModel) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Header
                Constraint::Length(3), // Search bar + match count
                Constraint::Min(0),    // Track table
                Constraint::Length(3), // Now playing
            ])
            .split(frame.area());

        layout::render_header(frame, chunks[0], model);
        layout::render_search_bar(frame, chunks[1], model);
        content::render_track_table(frame, chunks[2], model);
        progress::render_progress_bar(frame, chunks[3], model.playback());

        if model.has_error() {
            overlays::render_error_notification(frame, model.ui_state());
        }
    }
}
