//! Durable storage for the note collection and theme preference.
//!
//! The storage layout mirrors the two independent entries the application
//! persists: `notes.json` holds the full note collection as a JSON array and
//! `theme` holds the string `light` or `dark`. Absence of either entry is
//! default state, not an error. Writes replace the whole entry atomically.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use log::{debug, error, info, trace};
use tempfile::NamedTempFile;

use crate::{Note, NoteError, Result, Theme};

const NOTES_FILE: &str = "notes.json";
const THEME_FILE: &str = "theme";

/// File-backed key-value storage under the application data directory.
pub struct Storage {
    data_dir: PathBuf,
}

impl Storage {
    /// Opens storage rooted at `data_dir`, creating the directory if needed.
    pub fn open(data_dir: impl AsRef<Path>) -> Result<Self> {
        let data_dir = data_dir.as_ref().to_path_buf();
        if !data_dir.exists() {
            debug!("Data directory does not exist, creating: {}", data_dir.display());
            fs::create_dir_all(&data_dir)?;
        }
        Ok(Storage { data_dir })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Reads the full note collection.
    ///
    /// Returns `Ok(None)` when no collection has ever been stored. A stored
    /// entry that fails to parse is reported as `CorruptState`; the caller
    /// decides the recovery policy.
    pub fn load_notes(&self) -> Result<Option<Vec<Note>>> {
        let path = self.data_dir.join(NOTES_FILE);
        if !path.exists() {
            debug!("No stored notes at {}", path.display());
            return Ok(None);
        }

        let raw = fs::read_to_string(&path)?;
        let notes: Vec<Note> = serde_json::from_str(&raw).map_err(|e| {
            error!("Failed to parse stored notes at {}: {}", path.display(), e);
            NoteError::CorruptState {
                message: format!("{}: {}", path.display(), e),
            }
        })?;

        trace!("Loaded {} notes from {}", notes.len(), path.display());
        Ok(Some(notes))
    }

    /// Replaces the stored note collection with `notes`.
    ///
    /// The whole collection is re-serialized on every call; the write goes
    /// through a temp file in the same directory and an atomic rename.
    pub fn store_notes(&self, notes: &[Note]) -> Result<()> {
        let path = self.data_dir.join(NOTES_FILE);
        let json = serde_json::to_string_pretty(notes)?;
        self.write_atomic(&path, json.as_bytes())?;
        debug!("Persisted {} notes to {}", notes.len(), path.display());
        Ok(())
    }

    /// Reads the theme preference; absence means the default applies.
    pub fn load_theme(&self) -> Result<Option<Theme>> {
        let path = self.data_dir.join(THEME_FILE);
        if !path.exists() {
            return Ok(None);
        }
        let raw = fs::read_to_string(&path)?;
        match raw.trim().parse::<Theme>() {
            Ok(theme) => Ok(Some(theme)),
            Err(e) => Err(NoteError::CorruptState {
                message: format!("{}: {}", path.display(), e),
            }),
        }
    }

    pub fn store_theme(&self, theme: Theme) -> Result<()> {
        let path = self.data_dir.join(THEME_FILE);
        self.write_atomic(&path, theme.as_str().as_bytes())?;
        debug!("Persisted theme '{}'", theme);
        Ok(())
    }

    fn write_atomic(&self, path: &Path, bytes: &[u8]) -> Result<()> {
        let dir = path.parent().unwrap_or_else(|| Path::new("."));
        let mut temp_file = NamedTempFile::new_in(dir).map_err(|e| {
            error!("Failed to create temporary file in {}: {}", dir.display(), e);
            NoteError::Io(e)
        })?;

        temp_file.write_all(bytes)?;
        temp_file.flush()?;
        temp_file.persist(path).map_err(|e| {
            error!("Failed to persist {}: {}", path.display(), e.error);
            NoteError::Io(e.error)
        })?;

        info!("Wrote {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Tag;
    use tempfile::tempdir;

    fn sample_note() -> Note {
        Note::new("Test", "hello", Tag::new("Work", "#34a853"), None).unwrap()
    }

    #[test]
    fn absent_entries_are_default_state() {
        let dir = tempdir().unwrap();
        let storage = Storage::open(dir.path()).unwrap();
        assert!(storage.load_notes().unwrap().is_none());
        assert!(storage.load_theme().unwrap().is_none());
    }

    #[test]
    fn notes_round_trip_preserves_identity() {
        let dir = tempdir().unwrap();
        let storage = Storage::open(dir.path()).unwrap();
        let note = sample_note();
        storage.store_notes(std::slice::from_ref(&note)).unwrap();

        let restored = storage.load_notes().unwrap().unwrap();
        assert_eq!(restored.len(), 1);
        assert_eq!(restored[0].id, note.id);
        assert_eq!(restored[0].title, note.title);
        assert_eq!(restored[0].content, note.content);
        assert_eq!(restored[0].created_at, note.created_at);
    }

    #[test]
    fn audio_does_not_survive_reload() {
        let dir = tempdir().unwrap();
        let storage = Storage::open(dir.path()).unwrap();
        let mut note = sample_note();
        note.audio = Some(crate::AudioClip::new(vec![1, 2, 3]));
        storage.store_notes(std::slice::from_ref(&note)).unwrap();

        let restored = storage.load_notes().unwrap().unwrap();
        assert!(restored[0].audio.is_none());
    }

    #[test]
    fn corrupt_notes_entry_is_reported() {
        let dir = tempdir().unwrap();
        let storage = Storage::open(dir.path()).unwrap();
        fs::write(dir.path().join(NOTES_FILE), "{ not json").unwrap();

        let err = storage.load_notes();
        assert!(matches!(err, Err(NoteError::CorruptState { .. })));
    }

    #[test]
    fn theme_round_trips() {
        let dir = tempdir().unwrap();
        let storage = Storage::open(dir.path()).unwrap();
        storage.store_theme(Theme::Dark).unwrap();
        assert_eq!(storage.load_theme().unwrap(), Some(Theme::Dark));
    }
}
