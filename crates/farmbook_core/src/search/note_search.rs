//! Case-insensitive substring search over notes.
//!
//! # Invariants
//! - Matching covers `title`, `farmer`, `content` and `tool` only.
//! - Results keep stored order; nothing is ranked or re-sorted.
//! - A blank term matches every note.

use crate::model::note::{Note, NoteId};
use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

const PREVIEW_MAX_CHARS: usize = 150;

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

/// Returns notes matching `term`, in stored order.
pub fn search_notes<'a>(notes: &'a [Note], term: &str) -> Vec<&'a Note> {
    if term.is_empty() {
        return notes.iter().collect();
    }

    let needle = term.to_lowercase();
    notes
        .iter()
        .filter(|note| note_matches(note, needle.as_str()))
        .collect()
}

fn note_matches(note: &Note, needle: &str) -> bool {
    [
        note.title.as_str(),
        note.farmer.as_str(),
        note.content.as_str(),
        note.tool.as_str(),
    ]
    .iter()
    .any(|field| field.to_lowercase().contains(needle))
}

/// Compact list projection of one note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteListItem {
    pub id: NoteId,
    pub title: String,
    pub farmer: Option<String>,
    pub land_size: Option<String>,
    pub tool: Option<String>,
    pub date: Option<String>,
    /// Whitespace-collapsed content, capped at 150 chars plus `...`.
    pub preview: String,
    pub updated: DateTime<Utc>,
    /// Whether this note is under edit.
    pub active: bool,
}

impl NoteListItem {
    pub fn from_note(note: &Note, current: Option<NoteId>) -> Self {
        Self {
            id: note.id,
            title: note.title.clone(),
            farmer: non_empty(&note.farmer),
            land_size: non_empty(&note.land_size),
            tool: non_empty(&note.tool),
            date: non_empty(&note.date),
            preview: derive_content_preview(&note.content),
            updated: note.updated,
            active: current == Some(note.id),
        }
    }
}

/// Collapses whitespace and truncates to the preview length.
pub fn derive_content_preview(content: &str) -> String {
    let normalized = WHITESPACE_RE.replace_all(content.trim(), " ");
    if normalized.chars().count() <= PREVIEW_MAX_CHARS {
        return normalized.into_owned();
    }
    let mut preview = normalized.chars().take(PREVIEW_MAX_CHARS).collect::<String>();
    preview.push_str("...");
    preview
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::{derive_content_preview, search_notes};
    use crate::model::note::{Note, NoteFields};
    use chrono::Utc;

    fn note(id: u64, title: &str, farmer: &str, tool: &str, content: &str) -> Note {
        let fields = NoteFields {
            farmer: farmer.to_string(),
            tool: tool.to_string(),
            ..NoteFields::new(title, content)
        };
        Note::create(id, fields, Utc::now())
    }

    #[test]
    fn search_matches_any_field_case_insensitively() {
        let notes = vec![
            note(3, "Wheat sowing", "", "", "north plot"),
            note(2, "Irrigation", "RAMESH", "", "canal"),
            note(1, "Tilling", "", "टिलर", "east plot"),
        ];
        let ids = |term: &str| {
            search_notes(&notes, term)
                .iter()
                .map(|n| n.id)
                .collect::<Vec<_>>()
        };
        assert_eq!(ids("WHEAT"), vec![3]);
        assert_eq!(ids("ramesh"), vec![2]);
        assert_eq!(ids("टिलर"), vec![1]);
        assert_eq!(ids("plot"), vec![3, 1]);
        assert_eq!(ids(""), vec![3, 2, 1]);
        assert!(ids("xyz").is_empty());
    }

    #[test]
    fn search_ignores_date_and_land_size() {
        let mut only = note(1, "t", "", "", "c");
        only.date = "2026-10-18".to_string();
        only.land_size = "42".to_string();
        let notes = vec![only];
        assert!(search_notes(&notes, "2026").is_empty());
        assert!(search_notes(&notes, "42").is_empty());
    }

    #[test]
    fn preview_collapses_whitespace_and_truncates() {
        assert_eq!(derive_content_preview(" a\n\n b\tc "), "a b c");
        let long = "क".repeat(200);
        let preview = derive_content_preview(&long);
        assert_eq!(preview.chars().count(), 153);
        assert!(preview.ends_with("..."));
    }
}
