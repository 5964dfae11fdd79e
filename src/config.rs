use std::path::PathBuf;

use directories::ProjectDirs;
use which::which;

use crate::{NoteError, Result};

/// Application configuration settings.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding the persisted note collection and theme entry
    pub data_dir: PathBuf,

    /// Default editor command
    pub editor_command: Option<String>,
}

impl Config {
    /// Resolves the configuration, preferring an explicit data directory
    /// over the platform default location.
    pub fn resolve(data_dir: Option<PathBuf>) -> Result<Self> {
        let data_dir = match data_dir {
            Some(dir) => dir,
            None => ProjectDirs::from("", "", "tagnotes")
                .map(|dirs| dirs.data_dir().to_path_buf())
                .ok_or_else(|| NoteError::Config {
                    message: "could not determine a data directory".to_string(),
                })?,
        };

        Ok(Config {
            data_dir,
            editor_command: None,
        })
    }

    // This method provides smart fallbacks when no editor is configured
    pub fn get_editor_command(&self) -> String {
        // First try the configured editor
        if let Some(editor) = &self.editor_command {
            return editor.clone();
        }

        // Then try environment variable
        if let Ok(editor) = std::env::var("EDITOR") {
            return editor;
        }

        // Fall back to platform defaults
        if cfg!(windows) {
            "notepad".to_string()
        } else if cfg!(target_os = "macos") {
            "open -t".to_string()
        } else {
            // Try common Linux editors
            for editor in &["nano", "vim", "vi", "emacs"] {
                if which(editor).is_ok() {
                    return editor.to_string();
                }
            }
            "nano".to_string()
        }
    }
}
