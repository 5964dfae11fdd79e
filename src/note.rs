//! Core data structures for the tagnotes application.
//!
//! This module contains the primary types used throughout the application,
//! including the Note and Tag structures and the in-memory audio clip.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{NoteError, Result};

/// A tag with a display label and a hex color.
///
/// Labels are unique keys, matched case-insensitively. Every note embeds a
/// full copy of its tag; the store maintains the palette of known tags as a
/// derived list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    /// Display label, unique within the palette (case-insensitive)
    pub label: String,
    /// Hex color string, e.g. `#34a853`
    pub color: String,
}

impl Tag {
    pub fn new(label: impl Into<String>, color: impl Into<String>) -> Self {
        Tag {
            label: label.into(),
            color: color.into(),
        }
    }

    /// Case-insensitive label comparison.
    pub fn matches_label(&self, label: &str) -> bool {
        self.label.eq_ignore_ascii_case(label)
    }
}

/// The four built-in tags seeded into the palette at first run.
pub fn default_palette() -> Vec<Tag> {
    vec![
        Tag::new("Work", "#34a853"),
        Tag::new("Personal", "#4285f4"),
        Tag::new("Urgent", "#ea4335"),
        Tag::new("Other", "#9e9e9e"),
    ]
}

/// An immutable captured audio blob.
///
/// Clips live in memory only; they are intentionally skipped during
/// serialization and do not survive a storage reload.
#[derive(Clone, PartialEq, Eq)]
pub struct AudioClip {
    data: Vec<u8>,
}

impl AudioClip {
    pub fn new(data: Vec<u8>) -> Self {
        AudioClip { data }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }
}

impl fmt::Debug for AudioClip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AudioClip({} bytes)", self.data.len())
    }
}

/// Represents a single note in our system
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Note {
    /// Unique identifier for the note
    pub id: String,
    /// Note title
    pub title: String,
    /// Note content in Markdown format
    pub content: String,
    /// Embedded copy of the note's tag
    pub tag: Tag,
    /// Whether the note is pinned in its group
    #[serde(default)]
    pub pinned: bool,
    /// Optional audio attachment, in-memory only
    #[serde(skip)]
    pub audio: Option<AudioClip>,
    /// When the note was created; immutable after creation
    pub created_at: DateTime<Utc>,
    /// When the note was last edited; None until the first edit
    pub updated_at: Option<DateTime<Utc>>,
}

impl Note {
    /// Creates a new note with the given title, content, and tag.
    ///
    /// Title and content are trimmed and must be non-empty; otherwise the
    /// creation is rejected with a validation error and nothing is stored.
    pub fn new(
        title: &str,
        content: &str,
        tag: Tag,
        audio: Option<AudioClip>,
    ) -> Result<Self> {
        let title = title.trim();
        let content = content.trim();

        if title.is_empty() {
            return Err(NoteError::Validation {
                message: "note title must not be empty".to_string(),
            });
        }
        if content.is_empty() {
            return Err(NoteError::Validation {
                message: "note content must not be empty".to_string(),
            });
        }

        Ok(Note {
            id: generate_id(),
            title: title.to_string(),
            content: content.to_string(),
            tag,
            pinned: false,
            audio,
            created_at: Utc::now(),
            updated_at: None,
        })
    }
}

/// Generates a unique note ID from the current time and a random suffix.
fn generate_id() -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!("{}-{}", Utc::now().timestamp_millis(), &suffix[..8])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_title() {
        let err = Note::new("   ", "body", Tag::new("Work", "#34a853"), None);
        assert!(matches!(err, Err(NoteError::Validation { .. })));
    }

    #[test]
    fn rejects_empty_content() {
        let err = Note::new("title", "\n\t ", Tag::new("Work", "#34a853"), None);
        assert!(matches!(err, Err(NoteError::Validation { .. })));
    }

    #[test]
    fn trims_title_and_content() {
        let note = Note::new("  Buy milk  ", " 2% please ", Tag::new("Other", "#9e9e9e"), None)
            .unwrap();
        assert_eq!(note.title, "Buy milk");
        assert_eq!(note.content, "2% please");
        assert!(!note.pinned);
        assert!(note.updated_at.is_none());
    }

    #[test]
    fn generated_ids_are_unique() {
        let a = generate_id();
        let b = generate_id();
        assert_ne!(a, b);
    }

    #[test]
    fn tag_labels_match_case_insensitively() {
        let tag = Tag::new("Urgent", "#ea4335");
        assert!(tag.matches_label("urgent"));
        assert!(tag.matches_label("URGENT"));
        assert!(!tag.matches_label("urgency"));
    }
}
