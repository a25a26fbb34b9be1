//! Utility functions for rendering UI components

use std::ops::Range;
use std::time::Duration;

use ratatui::{
    layout::Rect,
    style::Style,
    widgets::{Block, List, ListItem, ListState},
    Frame,
};

pub fn render_scrollable_list(
    frame: &mut Frame,
    area: Rect,
    items: Vec<ListItem>,
    selected_index: usize,
    block: Block,
) {
    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default()); // Highlight handled by item styles

    let mut list_state = ListState::default();
    list_state.select(Some(selected_index));

    frame.render_stateful_widget(list, area, &mut list_state);
}

pub fn format_duration(duration: Duration) -> String {
    let total_seconds = duration.as_secs();
    let minutes = total_seconds / 60;
    let seconds = total_seconds % 60;
    format!("{}:{:02}", minutes, seconds)
}

/// Rows of a `total`-row list that fit in `height` rows while keeping
/// `selected` visible (the selected row sits on the last line once the list
/// scrolls)
pub fn visible_window(selected: usize, total: usize, height: usize) -> Range<usize> {
    if height == 0 || total == 0 {
        return 0..0;
    }
    let selected = selected.min(total - 1);
    let start = (selected + 1).saturating_sub(height);
    start..(start + height).min(total)
}

/// Calculate width needed for index column (log10(n) + padding)
pub fn calculate_num_width(item_count: usize) -> usize {
    if item_count == 0 {
        2
    } else {
        let digits = (item_count as f64).log10().floor() as usize + 1;
        digits + 1
    }
}

pub fn truncate_string(s: &str, max_width: usize) -> String {
    if s.chars().count() > max_width {
        let truncated: String = s.chars().take(max_width.saturating_sub(3)).collect();
        format!("{:<width$}", format!("{}...", truncated), width = max_width)
    } else {
        format!("{:<width$}", s, width = max_width)
    }
}

/// Column widths for the track table
/// Returns (num_width, title_width, artist_width, album_width, genre_width)
pub fn calculate_track_column_widths(content_width: usize, item_count: usize) -> (usize, usize, usize, usize, usize) {
    // Format: " {num}   {title}   {artist}   {album}   {genre}"
    let num_width = calculate_num_width(item_count);
    let fixed_width = 1 + num_width + 3 * 4;
    let remaining_width = content_width.saturating_sub(fixed_width);
    let title_width = (remaining_width * 35) / 100;
    let artist_width = (remaining_width * 25) / 100;
    let album_width = (remaining_width * 25) / 100;
    let genre_width = remaining_width.saturating_sub(title_width + artist_width + album_width);

    (num_width, title_width, artist_width, album_width, genre_width)
}
