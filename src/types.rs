//! Shared types for the tagnotes application.
//!
//! This module contains the crate-wide Result alias and the CLI command
//! surface consumed by the application handler.

use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::NoteError;

/// A specialized Result type for tagnotes operations.
pub type Result<T> = std::result::Result<T, NoteError>;

/// Options for the `list` command.
#[derive(Args, Debug)]
pub struct ListOptions {
    /// Filter notes by a case-insensitive substring of title or content
    #[clap(short, long)]
    pub search: Option<String>,

    /// Only show notes created on this local calendar day (YYYY-MM-DD)
    #[clap(short, long)]
    pub date: Option<String>,

    /// Format output as JSON
    #[clap(short, long)]
    pub json: bool,

    /// Show full note content instead of a preview
    #[clap(long)]
    pub detailed: bool,
}

/// Available subcommands for the tagnotes application
#[derive(Subcommand)]
pub enum Commands {
    /// Create a new note
    Add {
        /// Title of the note
        #[clap(short = 'T', long)]
        title: String,

        /// Content of the note, can be markdown formatted
        #[clap(short, long)]
        content: Option<String>,

        /// Path to a file containing the note's content
        #[clap(short, long)]
        file: Option<PathBuf>,

        /// Open content in editor before saving
        #[clap(short, long)]
        edit: bool,

        /// Tag label for the note (picks an existing tag or creates one)
        #[clap(short = 't', long)]
        tag: Option<String>,

        /// Hex color used when the tag is new
        #[clap(long, default_value = "#888888")]
        color: String,

        /// Path to an audio file to attach to the note
        #[clap(short, long)]
        audio: Option<PathBuf>,
    },

    /// View a note by ID
    View {
        /// ID of the note to view
        id: String,

        /// Format output as raw JSON
        #[clap(short, long)]
        json: bool,
    },

    /// List notes grouped by tag, with optional filtering
    List(ListOptions),

    /// Edit an existing note's title or content
    Edit {
        /// ID of the note to edit
        id: String,

        /// New title for the note
        #[clap(short = 'T', long)]
        title: Option<String>,

        /// New content for the note
        #[clap(short, long)]
        content: Option<String>,

        /// Path to a file containing the new content
        #[clap(short, long)]
        file: Option<PathBuf>,

        /// Open content in editor before saving
        #[clap(short, long)]
        edit: bool,
    },

    /// Delete a note by ID
    Delete {
        /// ID of the note to delete
        id: String,

        /// Skip confirmation prompt
        #[clap(short, long)]
        force: bool,
    },

    /// Toggle a note's pinned state
    Pin {
        /// ID of the note to pin or unpin
        id: String,
    },

    /// Show the tag palette
    Tags,

    /// Show a month of notes grouped by local calendar day
    Calendar {
        /// Month to show (YYYY-MM, defaults to the current month)
        #[clap(short, long)]
        month: Option<String>,
    },

    /// Show or change the persisted theme preference
    Theme {
        /// Set the theme explicitly instead of toggling
        #[clap(value_parser = ["light", "dark"])]
        set: Option<String>,
    },
}
