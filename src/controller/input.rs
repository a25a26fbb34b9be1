//! Key event handling

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::model::ActiveSection;
use super::AppController;

impl AppController {
    pub async fn handle_key_event(&self, key: KeyEvent) -> Result<()> {
        if key.kind != KeyEventKind::Press {
            return Ok(());
        }

        let mut model = self.model.lock().await;

        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            model.set_should_quit(true);
            return Ok(());
        }

        // Handle error message first (blocks all other interactions)
        if model.has_error() {
            if matches!(key.code, KeyCode::Esc | KeyCode::Enter) {
                model.clear_error();
            }
            return Ok(());
        }

        let section = model.ui_state().active_section;
        match section {
            ActiveSection::Search => match key.code {
                KeyCode::Tab | KeyCode::Esc | KeyCode::Down => model.focus(ActiveSection::Tracks),
                KeyCode::Enter => {
                    drop(model);
                    self.play_selected().await;
                }
                KeyCode::Backspace => model.backspace_search(),
                KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                    model.append_to_search(c);
                }
                _ => {}
            },
            ActiveSection::Tracks => match key.code {
                KeyCode::Char('q') | KeyCode::Char('Q') => model.set_should_quit(true),
                KeyCode::Char('/') => model.focus(ActiveSection::Search),
                KeyCode::Tab => model.toggle_focus(),
                KeyCode::Up => model.move_up(),
                KeyCode::Down => model.move_down(),
                KeyCode::Enter => {
                    drop(model);
                    self.play_selected().await;
                }
                _ => {}
            },
        }

        Ok(())
    }
}
