//! Note-taking application library
//!
//! This library provides the data model and state management for a small
//! single-user note application: creating, tagging, searching, pinning, and
//! calendar-browsing markdown notes with optional audio attachments,
//! persisted to local storage.

mod cli;
mod config;
mod errors;
mod note;
mod recorder;
mod render;
mod resolver;
mod storage;
mod store;
mod theme;
mod types;
mod view;

// Re-export key components
pub use cli::*;
pub use config::*;
pub use errors::*;
pub use note::*;
pub use recorder::*;
pub use render::*;
pub use resolver::*;
pub use storage::*;
pub use store::*;
pub use theme::*;
pub use types::*;
pub use view::*;
