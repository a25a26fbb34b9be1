//! Main application model with state management

use std::ops::Range;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::catalog::{Library, Song};
use crate::player::PollOutcome;
use crate::session::Session;

use super::playback::PlaybackInfo;
use super::search::track_matches;
use super::types::{ActiveSection, UiState};

const ERROR_DISPLAY_DURATION: Duration = Duration::from_secs(5);

pub struct AppModel {
    session: Arc<Session>,
    /// Indices into the session's track list that match the search query
    filtered: Vec<usize>,
    ui_state: UiState,
    playback: PlaybackInfo,
    should_quit: bool,
}

impl AppModel {
    pub fn new(session: Arc<Session>) -> Self {
        let filtered = (0..session.tracks().len()).collect();
        Self {
            session,
            filtered,
            ui_state: UiState::default(),
            playback: PlaybackInfo::default(),
            should_quit: false,
        }
    }

    // ========================================================================
    // Tracks & Search
    // ========================================================================

    pub fn library(&self) -> &Library {
        self.session.library()
    }

    pub fn total_tracks(&self) -> usize {
        self.session.tracks().len()
    }

    pub fn filtered_len(&self) -> usize {
        self.filtered.len()
    }

    /// Filtered tracks (in catalog order) at positions `range` of the filtered list (clamped)
    pub fn filtered_window(&self, range: Range<usize>) -> impl Iterator<Item = &Song> + '_ {
        let tracks = self.session.tracks();
        let end = range.end.min(self.filtered.len());
        let start = range.start.min(end);
        self.filtered[start..end].iter().map(move |&i| &tracks[i])
    }

    /// Track Enter should play: the highlighted row, or the best match while
    /// typing a query
    pub fn selected_track(&self) -> Option<&Song> {
        let index = match self.ui_state.active_section {
            ActiveSection::Search => self.filtered.first(),
            ActiveSection::Tracks => self.filtered.get(self.ui_state.selected),
        }?;
        self.session.tracks().get(*index)
    }

    fn refilter(&mut self) {
        let query = self.ui_state.search_query.as_str();
        self.filtered = self
            .session
            .tracks()
            .iter()
            .enumerate()
            .filter(|(_, song)| track_matches(song, query))
            .map(|(i, _)| i)
            .collect();
        self.ui_state.selected = 0;
    }

    pub fn append_to_search(&mut self, c: char) {
        self.ui_state.search_query.push(c);
        self.refilter();
    }

    pub fn backspace_search(&mut self) {
        if self.ui_state.search_query.pop().is_some() {
            self.refilter();
        }
    }

    pub fn clear_search(&mut self) {
        if !self.ui_state.search_query.is_empty() {
            self.ui_state.search_query.clear();
            self.refilter();
        }
    }

    pub fn move_up(&mut self) {
        self.ui_state.selected = self.ui_state.selected.saturating_sub(1);
    }

    pub fn move_down(&mut self) {
        if self.ui_state.selected + 1 < self.filtered.len() {
            self.ui_state.selected += 1;
        }
    }

    // ========================================================================
    // Focus
    // ========================================================================

    pub fn ui_state(&self) -> &UiState {
        &self.ui_state
    }

    pub fn focus(&mut self, section: ActiveSection) {
        self.ui_state.active_section = section;
    }

    pub fn toggle_focus(&mut self) {
        self.ui_state.active_section = self.ui_state.active_section.toggle();
    }

    // ========================================================================
    // Playback
    // ========================================================================

    pub fn playback(&self) -> &PlaybackInfo {
        &self.playback
    }

    pub fn update_playback(&mut self, outcome: &PollOutcome) {
        self.playback = PlaybackInfo::from_outcome(outcome);
    }

    // ========================================================================
    // Errors & Lifecycle
    // ========================================================================

    pub fn set_error(&mut self, message: String) {
        self.ui_state.error_message = Some(message);
        self.ui_state.error_timestamp = Some(Instant::now());
    }

    pub fn clear_error(&mut self) {
        self.ui_state.error_message = None;
        self.ui_state.error_timestamp = None;
    }

    pub fn has_error(&self) -> bool {
        self.ui_state.error_message.is_some()
    }

    pub fn auto_clear_old_errors(&mut self) {
        if let Some(at) = self.ui_state.error_timestamp {
            if at.elapsed() >= ERROR_DISPLAY_DURATION {
                self.clear_error();
            }
        }
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn set_should_quit(&mut self, quit: bool) {
        self.should_quit = quit;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogClient;
    use crate::config::ServerConfig;
    use crate::player::PlayerClient;

    fn session_with(titles: &[(&str, &str)]) -> Arc<Session> {
        let tracks: Vec<Song> = titles
            .iter()
            .enumerate()
            .map(|(i, (title, artist))| Song {
                id: format!("tr-{}", i),
                title: title.to_string(),
                artist: artist.to_string(),
                album: "Album".into(),
                genre: "Genre".into(),
            })
            .collect();
        let library = Library {
            song_count: tracks.len(),
            tracks,
            ..Default::default()
        };
        let catalog = CatalogClient::new(&ServerConfig {
            base_url: "http://music.local".into(),
            username: "alice".into(),
            password: "s3cret".into(),
        })
        .unwrap();
        Arc::new(Session::new(catalog, PlayerClient::new("/tmp/unused.sock"), library))
    }

    fn titles(model: &AppModel) -> Vec<String> {
        model.filtered_window(0..usize::MAX).map(|s| s.title.clone()).collect()
    }

    #[test]
    fn test_search_filters_and_resets_selection() {
        let mut model = AppModel::new(session_with(&[
            ("Angel", "Massive Attack"),
            ("Teardrop", "Massive Attack"),
            ("Glory Box", "Portishead"),
        ]));
        model.focus(ActiveSection::Tracks);
        model.move_down();
        assert_eq!(model.ui_state().selected, 1);

        for c in "portis".chars() {
            model.append_to_search(c);
        }
        assert_eq!(titles(&model), ["Glory Box"]);
        assert_eq!(model.ui_state().selected, 0);

        model.clear_search();
        assert_eq!(model.filtered_len(), 3);
    }

    #[test]
    fn test_selected_track_depends_on_focus() {
        let mut model = AppModel::new(session_with(&[("Angel", "A"), ("Teardrop", "A")]));

        assert_eq!(model.selected_track().map(|s| s.id.as_str()), Some("tr-0"));

        model.focus(ActiveSection::Tracks);
        model.move_down();
        model.move_down();
        assert_eq!(model.selected_track().map(|s| s.id.as_str()), Some("tr-1"));

        model.focus(ActiveSection::Search);
        assert_eq!(model.selected_track().map(|s| s.id.as_str()), Some("tr-0"));
    }

    #[test]
    fn test_filtered_window_is_clamped() {
        let model = AppModel::new(session_with(&[("Angel", "A"), ("Teardrop", "A"), ("Exchange", "A")]));

        let window: Vec<&str> = model.filtered_window(1..10).map(|s| s.title.as_str()).collect();
        assert_eq!(window, ["Teardrop", "Exchange"]);
        assert_eq!(model.filtered_window(5..9).count(), 0);
    }

    #[test]
    fn test_no_match_selects_nothing() {
        let mut model = AppModel::new(session_with(&[("Angel", "A")]));
        model.append_to_search('z');

        assert_eq!(model.filtered_len(), 0);
        assert!(model.selected_track().is_none());
        model.move_down();
        assert_eq!(model.ui_state().selected, 0);
    }

    #[test]
    fn test_errors_can_be_dismissed() {
        let mut model = AppModel::new(session_with(&[]));
        model.set_error("boom".into());
        assert!(model.has_error());

        model.auto_clear_old_errors();
        assert!(model.has_error());

        model.clear_error();
        assert!(!model.has_error());
    }
}
