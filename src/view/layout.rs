//! Layout rendering (header, search bar)

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use ratatui::widgets::Padding;

use crate::model::{ActiveSection, AppModel};

pub fn render_header(frame: &mut Frame, area: Rect, model: &AppModel) {
    let hint = match model.ui_state().active_section {
        ActiveSection::Search => "Enter play first match · Tab tracks · Esc tracks · Ctrl+C quit",
        ActiveSection::Tracks => "Enter play · ↑/↓ move · / search · q quit",
    };

    let library = model.library();
    let header = Line::from(vec![
        Span::styled(
            " navitui ",
            Style::default().fg(Color::Black).bg(Color::Green).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(
                " {} artists · {} albums · {} songs ",
                library.artist_count, library.album_count, library.song_count
            ),
            Style::default().fg(Color::Cyan),
        ),
        Span::styled(hint, Style::default().fg(Color::DarkGray)),
    ]);

    frame.render_widget(Paragraph::new(header), area);
}

pub fn render_search_bar(frame: &mut Frame, area: Rect, model: &AppModel) {
    let ui_state = model.ui_state();
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),     // Search input
            Constraint::Length(22), // Match count
        ])
        .split(area);

    let focused = ui_state.active_section == ActiveSection::Search;
    let search_style = if focused {
        Style::default().fg(Color::Green)
    } else {
        Style::default().fg(Color::White)
    };

    let search_text = if ui_state.search_query.is_empty() && !focused {
        "Press / to search...".to_string()
    } else if focused {
        format!("{}▏", ui_state.search_query)
    } else {
        ui_state.search_query.clone()
    };

    let search = Paragraph::new(search_text)
        .style(search_style)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Search ")
                .padding(Padding::horizontal(1))
                .border_style(if focused {
                    Style::default().fg(Color::Green)
                } else {
                    Style::default()
                }),
        );
    frame.render_widget(search, chunks[0]);

    let count = Paragraph::new(format!("{} / {}", model.filtered_len(), model.total_tracks()))
        .style(Style::default().fg(Color::Cyan))
        .block(Block::default().borders(Borders::ALL).title(" Tracks "));
    frame.render_widget(count, chunks[1]);
}
