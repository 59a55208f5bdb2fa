//! Field note model.
//!
//! # Responsibility
//! - Define the persisted note record and its editable field bundle.
//! - Validate required fields before any store mutation.
//!
//! # Invariants
//! - `id` never changes after creation.
//! - `created <= updated`.
//! - Serialized field names match the stored slot layout
//!   (`id, title, farmer, date, landSize, tool, content, created, updated`).

use crate::model::tool::default_tool_name;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Store-local note identifier. Monotonic, never reused within a store.
pub type NoteId = u64;

/// Persisted note record.
///
/// Optional metadata is kept as text; an empty string means "not provided".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: NoteId,
    pub title: String,
    #[serde(default)]
    pub farmer: String,
    /// Calendar date as entered (`YYYY-MM-DD`), or empty.
    #[serde(default)]
    pub date: String,
    /// Land size as entered. Older payloads may carry a JSON number.
    #[serde(default, deserialize_with = "deserialize_land_size")]
    pub land_size: String,
    #[serde(default)]
    pub tool: String,
    pub content: String,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
}

impl Note {
    /// Builds a new note whose `created` and `updated` are both `now`.
    pub(crate) fn create(id: NoteId, fields: NoteFields, now: DateTime<Utc>) -> Self {
        Self {
            id,
            title: fields.title,
            farmer: fields.farmer,
            date: fields.date,
            land_size: fields.land_size,
            tool: fields.tool,
            content: fields.content,
            created: now,
            updated: now,
        }
    }

    /// Replaces editable fields in place, keeping `id` and `created`.
    pub(crate) fn apply_edit(&mut self, fields: NoteFields, now: DateTime<Utc>) {
        self.title = fields.title;
        self.farmer = fields.farmer;
        self.date = fields.date;
        self.land_size = fields.land_size;
        self.tool = fields.tool;
        self.content = fields.content;
        self.updated = now.max(self.created);
    }

    /// Returns the editable fields for form population.
    pub fn fields(&self) -> NoteFields {
        NoteFields {
            title: self.title.clone(),
            farmer: self.farmer.clone(),
            date: self.date.clone(),
            land_size: self.land_size.clone(),
            tool: self.tool.clone(),
            content: self.content.clone(),
        }
    }
}

/// Editable note fields as submitted by the note form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteFields {
    pub title: String,
    pub farmer: String,
    pub date: String,
    pub land_size: String,
    pub tool: String,
    pub content: String,
}

impl NoteFields {
    /// Convenience constructor for the two required fields.
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            ..Self::default()
        }
    }

    /// Blank form state: today's date and the default tool preselected.
    pub fn blank(today: NaiveDate) -> Self {
        Self {
            date: today.format("%Y-%m-%d").to_string(),
            tool: default_tool_name().to_string(),
            ..Self::default()
        }
    }

    /// Trims title, farmer and content and checks required ones. Date, land
    /// size and tool are kept verbatim.
    ///
    /// # Errors
    /// - `MissingTitle` when the title is blank after trim.
    /// - `MissingContent` when the content is blank after trim.
    pub fn normalized(self) -> Result<Self, NoteValidationError> {
        let title = self.title.trim().to_string();
        if title.is_empty() {
            return Err(NoteValidationError::MissingTitle);
        }
        let content = self.content.trim().to_string();
        if content.is_empty() {
            return Err(NoteValidationError::MissingContent);
        }

        Ok(Self {
            title,
            farmer: self.farmer.trim().to_string(),
            date: self.date,
            land_size: self.land_size,
            tool: self.tool,
            content,
        })
    }
}

/// Required-field validation failure. Never a system error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteValidationError {
    MissingTitle,
    MissingContent,
}

impl Display for NoteValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingTitle => write!(f, "note title is required"),
            Self::MissingContent => write!(f, "note content is required"),
        }
    }
}

impl Error for NoteValidationError {}

fn deserialize_land_size<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum LandSize {
        Text(String),
        Number(serde_json::Number),
        Missing(()),
    }

    Ok(match LandSize::deserialize(deserializer)? {
        LandSize::Text(value) => value,
        LandSize::Number(value) => value.to_string(),
        LandSize::Missing(()) => String::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::{Note, NoteFields, NoteValidationError};
    use chrono::{NaiveDate, TimeZone, Utc};

    #[test]
    fn normalized_rejects_blank_title_before_content() {
        let err = NoteFields::new("   ", "").normalized().unwrap_err();
        assert_eq!(err, NoteValidationError::MissingTitle);

        let err = NoteFields::new("title", " \n ").normalized().unwrap_err();
        assert_eq!(err, NoteValidationError::MissingContent);
    }

    #[test]
    fn normalized_trims_only_title_farmer_and_content() {
        let fields = NoteFields {
            farmer: "  Ramesh ".to_string(),
            date: " 2026-10-18 ".to_string(),
            land_size: " 2.5 ".to_string(),
            tool: " टिलर".to_string(),
            ..NoteFields::new(" Sowing ", " wheat ")
        }
        .normalized()
        .unwrap();
        assert_eq!(fields.title, "Sowing");
        assert_eq!(fields.farmer, "Ramesh");
        assert_eq!(fields.content, "wheat");
        assert_eq!(fields.date, " 2026-10-18 ");
        assert_eq!(fields.land_size, " 2.5 ");
        assert_eq!(fields.tool, " टिलर");
    }

    #[test]
    fn blank_fields_preselect_today_and_default_tool() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
        let blank = NoteFields::blank(today);
        assert_eq!(blank.date, "2026-10-18");
        assert_eq!(blank.tool, "हैरो");
        assert!(blank.title.is_empty());
    }

    #[test]
    fn note_json_uses_camel_case_and_iso_timestamps() {
        let at = Utc.with_ymd_and_hms(2026, 10, 18, 6, 30, 0).unwrap();
        let note = Note::create(7, NoteFields::new("t", "c"), at);
        let json = serde_json::to_value(&note).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["landSize"], "");
        assert_eq!(json["created"], "2026-10-18T06:30:00Z");
        assert_eq!(json["updated"], json["created"]);
    }

    #[test]
    fn land_size_accepts_numbers_and_missing_metadata() {
        let payload = r#"{
            "id": 3,
            "title": "t",
            "landSize": 2.5,
            "content": "c",
            "created": "2026-01-01T00:00:00.000Z",
            "updated": "2026-01-02T00:00:00.000Z"
        }"#;
        let note: Note = serde_json::from_str(payload).unwrap();
        assert_eq!(note.land_size, "2.5");
        assert!(note.farmer.is_empty());
        assert!(note.created <= note.updated);
    }
}
