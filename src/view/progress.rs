//! Now-playing gauge

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Gauge},
    Frame,
};

use crate::model::PlaybackInfo;
use super::utils::format_duration;

fn status_text(playback: &PlaybackInfo) -> String {
    if playback.player_error.is_some() {
        format!(" ✖ {}", playback.title)
    } else if playback.artist.is_empty() && playback.album.is_empty() {
        format!(" {}", playback.title)
    } else if playback.is_playing {
        format!(" ▶ {} | {} ({})", playback.title, playback.artist, playback.album)
    } else {
        format!(" ⏸ {} | {} ({})", playback.title, playback.artist, playback.album)
    }
}

pub fn render_progress_bar(frame: &mut Frame, area: Rect, playback: &PlaybackInfo) {
    let title_text = status_text(playback);

    let time_str = format!(
        "{} / {}",
        format_duration(playback.position),
        format_duration(playback.duration)
    );

    let state_info = if playback.player_error.is_some() {
        " mpv offline "
    } else if playback.paused {
        " Paused "
    } else if playback.is_playing {
        " Playing "
    } else {
        " Idle "
    };

    let gauge_color = if playback.player_error.is_some() { Color::Red } else { Color::Green };

    let gauge = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("{} ", title_text))
                .title_bottom(Line::from(state_info).right_aligned()),
        )
        .gauge_style(Style::default().fg(gauge_color))
        .ratio(playback.progress)
        .label(time_str);

    frame.render_widget(gauge, area);
}
