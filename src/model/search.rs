//! Track filtering for the search box

use crate::catalog::Song;

/// Case-insensitive subsequence match: every character of `query` appears in
/// `text` in order, not necessarily adjacent.
pub fn fuzzy_match(query: &str, text: &str) -> bool {
    let mut haystack = text.chars().flat_map(char::to_lowercase);
    query
        .chars()
        .flat_map(char::to_lowercase)
        .filter(|c| !c.is_whitespace())
        .all(|needle| haystack.any(|c| c == needle))
}

/// True if the query matches any of the track's searchable fields
pub fn track_matches(song: &Song, query: &str) -> bool {
    query.trim().is_empty()
        || [&song.title, &song.artist, &song.album, &song.genre]
            .iter()
            .any(|field| fuzzy_match(query, field))
}
