//! Core type definitions for the UI state

use std::time::Instant;

/// Which part of the UI has keyboard focus
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActiveSection {
    Search,
    Tracks,
}

impl ActiveSection {
    pub fn toggle(self) -> Self {
        match self {
            ActiveSection::Search => ActiveSection::Tracks,
            ActiveSection::Tracks => ActiveSection::Search,
        }
    }
}

#[derive(Clone, Debug)]
pub struct UiState {
    pub active_section: ActiveSection,
    pub search_query: String,
    /// Index into the filtered track list
    pub selected: usize,
    pub error_message: Option<String>,
    pub error_timestamp: Option<Instant>,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            active_section: ActiveSection::Search,
            search_query: String::new(),
            selected: 0,
            error_message: None,
            error_timestamp: None,
        }
    }
}
