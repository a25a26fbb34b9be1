//! Track table rendering

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, ListItem, Paragraph},
    Frame,
};
use ratatui::widgets::Padding;

use crate::model::{ActiveSection, AppModel};
use super::utils::{calculate_track_column_widths, render_scrollable_list, truncate_string, visible_window};

pub fn render_track_table(frame: &mut Frame, area: Rect, model: &AppModel) {
    let ui_state = model.ui_state();
    let is_focused = ui_state.active_section == ActiveSection::Tracks;
    let border_style = if is_focused {
        Style::default().fg(Color::Green)
    } else {
        Style::default()
    };

    if model.filtered_len() == 0 {
        let message = if model.total_tracks() == 0 {
            "The library is empty"
        } else {
            "No tracks match the search"
        };
        let empty = Paragraph::new(message)
            .style(Style::default().fg(Color::DarkGray))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .padding(Padding::horizontal(1))
                    .border_style(border_style),
            );
        frame.render_widget(empty, area);
        return;
    }

    // Borders take two columns
    let content_width = area.width.saturating_sub(2) as usize;
    let (num_width, title_width, artist_width, album_width, genre_width) =
        calculate_track_column_widths(content_width, model.filtered_len());

    let header_style = Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD);
    let header = Line::from(Span::styled(
        format!(
            " {:>num_width$}   {}   {}   {}   {}",
            "#",
            truncate_string("Title", title_width),
            truncate_string("Artist", artist_width),
            truncate_string("Album", album_width),
            truncate_string("Genre", genre_width),
        ),
        header_style,
    ));

    // Only the rows that fit between the borders are built
    let window = visible_window(
        ui_state.selected,
        model.filtered_len(),
        area.height.saturating_sub(2) as usize,
    );
    let window_start = window.start;

    let items: Vec<ListItem> = model
        .filtered_window(window)
        .enumerate()
        .map(|(offset, song)| {
            let i = window_start + offset;
            let style = if i == ui_state.selected && is_focused {
                Style::default().fg(Color::Black).bg(Color::Green).add_modifier(Modifier::BOLD)
            } else if i == 0 && !is_focused && !ui_state.search_query.is_empty() {
                // First match is what Enter plays from the search box
                Style::default().fg(Color::Green)
            } else {
                Style::default().fg(Color::White)
            };
            ListItem::new(format!(
                " {:>num_width$}   {}   {}   {}   {}",
                i + 1,
                truncate_string(&song.title, title_width),
                truncate_string(&song.artist, artist_width),
                truncate_string(&song.album, album_width),
                truncate_string(&song.genre, genre_width),
            ))
            .style(style)
        })
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .title(header)
        .border_style(border_style);

    render_scrollable_list(frame, area, items, ui_state.selected.saturating_sub(window_start), block);
}
