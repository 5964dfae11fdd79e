//! The note store: the single authoritative collection of notes.
//!
//! The store owns all mutation (create, update, delete, pin-toggle) and the
//! tag palette lifecycle (auto-create on use, auto-remove when unused). Every
//! mutation re-serializes the whole collection to durable storage; the store
//! restores itself from storage at startup.

use chrono::Utc;
use log::{debug, info, warn};

use crate::{default_palette, AudioClip, Note, NoteError, Result, Storage, Tag, Theme};

/// Authoritative mapping from note id to note record, ordered newest-first,
/// plus the derived tag palette and the persisted theme preference.
pub struct NoteStore {
    /// All notes, newest first
    notes: Vec<Note>,
    /// Known tags: defaults first, then custom tags in order of first use
    palette: Vec<Tag>,
    /// Persisted theme preference
    theme: Theme,
    /// Durable storage backend
    storage: Storage,
}

impl NoteStore {
    /// Restores the store from durable storage.
    ///
    /// An empty storage yields an empty collection and the default palette.
    /// Corrupt stored state is discarded with a logged warning rather than
    /// propagated; the store starts empty in that case.
    pub fn open(storage: Storage) -> Result<Self> {
        let notes = match storage.load_notes() {
            Ok(Some(notes)) => notes,
            Ok(None) => Vec::new(),
            Err(NoteError::CorruptState { message }) => {
                warn!("Discarding corrupt note collection: {}", message);
                Vec::new()
            }
            Err(e) => return Err(e),
        };

        let theme = match storage.load_theme() {
            Ok(Some(theme)) => theme,
            Ok(None) => Theme::default(),
            Err(NoteError::CorruptState { message }) => {
                warn!("Discarding corrupt theme preference: {}", message);
                Theme::default()
            }
            Err(e) => return Err(e),
        };

        let palette = rebuild_palette(&notes);
        info!(
            "Restored {} notes and {} tags from {}",
            notes.len(),
            palette.len(),
            storage.data_dir().display()
        );

        Ok(NoteStore {
            notes,
            palette,
            theme,
            storage,
        })
    }

    /// All notes, newest first.
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    /// The tag palette in display order.
    pub fn palette(&self) -> &[Tag] {
        &self.palette
    }

    pub fn get(&self, id: &str) -> Option<&Note> {
        self.notes.iter().find(|n| n.id == id)
    }

    /// Creates a note and prepends it to the collection.
    ///
    /// Rejects empty (after trimming) titles or contents with a validation
    /// error, leaving both the collection and the palette unchanged. When
    /// the tag label already
    /// exists in the palette the existing entry is embedded instead, so the
    /// established color wins; otherwise the tag is appended to the palette.
    pub fn create(
        &mut self,
        title: &str,
        content: &str,
        tag: Tag,
        audio: Option<AudioClip>,
    ) -> Result<&Note> {
        let tag = match self.palette.iter().find(|t| t.matches_label(&tag.label)) {
            Some(existing) => existing.clone(),
            None => {
                let label = tag.label.trim();
                if label.is_empty() {
                    return Err(NoteError::Validation {
                        message: "tag label must not be empty".to_string(),
                    });
                }
                Tag::new(label, tag.color)
            }
        };

        let note = Note::new(title, content, tag, audio)?;

        // A new tag is committed to the palette only once the note itself
        // has been accepted; a rejected creation leaves no trace.
        if !self.palette.iter().any(|t| t.matches_label(&note.tag.label)) {
            debug!("Adding new tag '{}' to palette", note.tag.label);
            self.palette.push(note.tag.clone());
        }

        info!("Created note {} ('{}')", note.id, note.title);
        self.notes.insert(0, note);
        self.persist()?;
        Ok(&self.notes[0])
    }

    /// Updates a note's title and content, stamping `updated_at`.
    ///
    /// The id, creation time, tag, and pin state are preserved. A missing id
    /// is a logged no-op. The same trimmed-non-empty rule as creation
    /// applies; an edit may not blank a note out.
    pub fn update(&mut self, id: &str, new_title: &str, new_content: &str) -> Result<()> {
        let new_title = new_title.trim();
        let new_content = new_content.trim();
        if new_title.is_empty() {
            return Err(NoteError::Validation {
                message: "note title must not be empty".to_string(),
            });
        }
        if new_content.is_empty() {
            return Err(NoteError::Validation {
                message: "note content must not be empty".to_string(),
            });
        }

        let Some(note) = self.notes.iter_mut().find(|n| n.id == id) else {
            warn!("Update targeted nonexistent note {}, ignoring", id);
            return Ok(());
        };

        note.title = new_title.to_string();
        note.content = new_content.to_string();
        note.updated_at = Some(Utc::now());
        info!("Updated note {}", id);
        self.persist()
    }

    /// Removes a note and re-derives palette membership.
    ///
    /// If no remaining note uses the deleted note's tag label, the tag is
    /// dropped from the palette even if it is a built-in default: the
    /// palette tracks usage, not configuration. A missing id is a logged
    /// no-op.
    pub fn delete(&mut self, id: &str) -> Result<()> {
        let Some(pos) = self.notes.iter().position(|n| n.id == id) else {
            warn!("Delete targeted nonexistent note {}, ignoring", id);
            return Ok(());
        };

        let removed = self.notes.remove(pos);
        let still_used = self
            .notes
            .iter()
            .any(|n| n.tag.matches_label(&removed.tag.label));
        if !still_used {
            debug!("Tag '{}' no longer used, removing from palette", removed.tag.label);
            self.palette.retain(|t| !t.matches_label(&removed.tag.label));
        }

        info!("Deleted note {}", id);
        self.persist()
    }

    /// Flips a note's pinned state. Pin state is not content, so
    /// `updated_at` is left untouched. A missing id is a logged no-op.
    pub fn toggle_pin(&mut self, id: &str) -> Result<()> {
        let Some(note) = self.notes.iter_mut().find(|n| n.id == id) else {
            warn!("Pin toggle targeted nonexistent note {}, ignoring", id);
            return Ok(());
        };

        note.pinned = !note.pinned;
        debug!("Note {} pinned = {}", id, note.pinned);
        self.persist()
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn set_theme(&mut self, theme: Theme) -> Result<()> {
        self.theme = theme;
        self.storage.store_theme(theme)
    }

    pub fn toggle_theme(&mut self) -> Result<Theme> {
        self.set_theme(self.theme.toggled())?;
        Ok(self.theme)
    }

    fn persist(&self) -> Result<()> {
        self.storage.store_notes(&self.notes)
    }
}

/// Rebuilds the palette from a restored note collection: the built-in
/// defaults first, then restored tags in order of first use (oldest note
/// first). The stored layout carries no palette entry of its own.
fn rebuild_palette(notes: &[Note]) -> Vec<Tag> {
    let mut palette = default_palette();
    for note in notes.iter().rev() {
        if !palette.iter().any(|t| t.matches_label(&note.tag.label)) {
            palette.push(note.tag.clone());
        }
    }
    palette
}
