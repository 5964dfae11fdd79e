//! CLI module for the tagnotes application
//!
//! This module handles the command-line interface for interacting with the
//! note store: the command handlers, the grouped list display, and the
//! external editor round-trip.

use std::{
    fs::{read_to_string, File, OpenOptions},
    io::{stdin, stdout, Write},
    path::{Path, PathBuf},
    process::Command,
};

use chrono::{Datelike, Local, NaiveDate, Utc};
use log::info;
use shell_words::split;
use tempfile::Builder;

use crate::{
    compose_view, local_day, notes_by_day, resolve_tag_input, AudioRecorder, Commands, Config,
    ListOptions, Note, NoteError, NoteStore, Result, Tag, TagGroup, Theme, ViewFilter,
};

/// CLI application handler - dispatches parsed commands against the store.
pub struct App {
    /// The note store
    store: NoteStore,

    /// Application configuration
    config: Config,
}

impl App {
    pub fn new(store: NoteStore, config: Config) -> Self {
        Self { store, config }
    }

    /// Run the CLI application with the given command
    pub fn run(&mut self, command: Commands) -> Result<()> {
        match command {
            Commands::Add {
                title,
                content,
                file,
                edit,
                tag,
                color,
                audio,
            } => self.handle_add(title, content, file, edit, tag, color, audio),

            Commands::View { id, json } => self.handle_view(&id, json),

            Commands::List(options) => self.handle_list(options),

            Commands::Edit {
                id,
                title,
                content,
                file,
                edit,
            } => self.handle_edit(&id, title, content, file, edit),

            Commands::Delete { id, force } => self.handle_delete(&id, force),

            Commands::Pin { id } => self.handle_pin(&id),

            Commands::Tags => self.handle_tags(),

            Commands::Calendar { month } => self.handle_calendar(month),

            Commands::Theme { set } => self.handle_theme(set),
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn handle_add(
        &mut self,
        title: String,
        content: Option<String>,
        file: Option<PathBuf>,
        edit: bool,
        tag_input: Option<String>,
        color: String,
        audio: Option<PathBuf>,
    ) -> Result<()> {
        // Get content based on the provided options
        let note_content = match (content, file) {
            (Some(c), _) => c,
            (_, Some(file_path)) => self.read_content_from_file(&file_path)?,
            (None, None) => {
                if edit {
                    self.open_editor_for_content(&title)?
                } else {
                    return Err(NoteError::Validation {
                        message: "provide note content via --content, --file, or --edit"
                            .to_string(),
                    });
                }
            }
        };

        let tag = self.resolve_tag(tag_input.as_deref().unwrap_or(""), &color);

        let clip = match audio {
            Some(path) => {
                let source = File::open(&path).map_err(|e| NoteError::MediaAccess {
                    message: format!("cannot open audio source {}: {}", path.display(), e),
                })?;
                Some(AudioRecorder::new().capture(source)?)
            }
            None => None,
        };

        let note = self.store.create(&title, &note_content, tag, clip)?;
        println!("Note added with ID: {}", note.id);
        Ok(())
    }

    /// Resolves the typed tag text against the palette, falling back to the
    /// first palette entry when nothing is typed.
    fn resolve_tag(&self, input: &str, color: &str) -> Tag {
        let prior = self
            .store
            .palette()
            .first()
            .cloned()
            .unwrap_or_else(|| Tag::new("Other", "#9e9e9e"));
        resolve_tag_input(self.store.palette(), input, color, &prior).selected
    }

    fn handle_view(&self, id: &str, json: bool) -> Result<()> {
        let note = self.store.get(id).ok_or_else(|| NoteError::NotFound {
            id: id.to_string(),
        })?;

        if json {
            println!("{}", serde_json::to_string_pretty(note)?);
            return Ok(());
        }

        println!("{}", console::style(&note.title).bold());
        println!(
            "Tag: {} {}",
            console::style(&note.tag.label).cyan(),
            console::style(&note.tag.color).dim()
        );
        println!(
            "Created: {}",
            note.created_at.with_timezone(&Local).format("%Y-%m-%d %H:%M")
        );
        if let Some(updated) = note.updated_at {
            println!(
                "Updated: {}",
                updated.with_timezone(&Local).format("%Y-%m-%d %H:%M")
            );
        }
        if note.pinned {
            println!("Pinned: yes");
        }
        if let Some(clip) = &note.audio {
            println!("Audio attachment: {} bytes", clip.len());
        }
        println!("\n{}", crate::markdown_to_text(&note.content));
        Ok(())
    }

    fn handle_list(&self, options: ListOptions) -> Result<()> {
        let day = options.date.as_deref().map(parse_day).transpose()?;
        let filter = ViewFilter {
            search: options.search.unwrap_or_default(),
            day,
        };
        let groups = compose_view(self.store.notes(), self.store.palette(), &filter);

        if options.json {
            return self.display_groups_json(&groups, options.detailed);
        }

        if groups.is_empty() {
            println!("Empty...");
            return Ok(());
        }

        let note_count: usize = groups.iter().map(|g| g.pinned.len() + g.others.len()).sum();
        for group in &groups {
            self.display_group(group, options.detailed)?;
        }
        println!(
            "\n{} note{} in {} group{}",
            note_count,
            if note_count == 1 { "" } else { "s" },
            groups.len(),
            if groups.len() == 1 { "" } else { "s" }
        );
        Ok(())
    }

    fn display_group(&self, group: &TagGroup<'_>, detailed: bool) -> Result<()> {
        // Use terminal width for the separator if available
        let term_width = terminal_size::terminal_size()
            .map(|(w, _)| w.0 as usize)
            .unwrap_or(80);
        println!("{}", "-".repeat(term_width.min(50)));
        println!(
            "{} {}",
            console::style(&group.tag.label).bold().cyan(),
            console::style(&group.tag.color).dim()
        );

        if !group.pinned.is_empty() {
            println!("{}", console::style("Pinned").bold());
            for note in &group.pinned {
                self.display_note_line(note, detailed);
            }
        }
        if !group.others.is_empty() {
            if !group.pinned.is_empty() {
                println!("{}", console::style("Others").bold());
            }
            for note in &group.others {
                self.display_note_line(note, detailed);
            }
        }
        Ok(())
    }

    fn display_note_line(&self, note: &Note, detailed: bool) {
        let created = note.created_at.with_timezone(&Local).format("%Y-%m-%d %H:%M");
        println!(
            "  {} | {} | {}",
            console::style(&note.title).bold(),
            created,
            console::style(&note.id).dim()
        );
        if detailed {
            for line in crate::markdown_to_text(&note.content).lines() {
                println!("    {}", line);
            }
        } else {
            let preview = crate::content_preview(&note.content, 100);
            if !preview.is_empty() {
                println!("    {}", preview);
            }
        }
    }

    fn display_groups_json(&self, groups: &[TagGroup<'_>], detailed: bool) -> Result<()> {
        let value: Vec<serde_json::Value> = groups
            .iter()
            .map(|g| {
                let as_json = |notes: &[&Note]| -> Vec<serde_json::Value> {
                    notes
                        .iter()
                        .map(|n| {
                            if detailed {
                                serde_json::to_value(n).unwrap_or_default()
                            } else {
                                serde_json::json!({
                                    "id": n.id,
                                    "title": n.title,
                                    "created_at": n.created_at,
                                    "updated_at": n.updated_at,
                                    "pinned": n.pinned,
                                })
                            }
                        })
                        .collect()
                };
                serde_json::json!({
                    "tag": g.tag,
                    "pinned": as_json(&g.pinned),
                    "others": as_json(&g.others),
                })
            })
            .collect();

        println!("{}", serde_json::to_string_pretty(&value)?);
        Ok(())
    }

    fn handle_edit(
        &mut self,
        id: &str,
        title: Option<String>,
        content: Option<String>,
        file: Option<PathBuf>,
        open_editor: bool,
    ) -> Result<()> {
        if content.is_some() && file.is_some() {
            return Err(NoteError::Validation {
                message: "cannot specify both --content and --file".to_string(),
            });
        }
        if open_editor && (content.is_some() || file.is_some()) {
            return Err(NoteError::Validation {
                message: "--edit cannot be combined with --content or --file".to_string(),
            });
        }

        let existing = self
            .store
            .get(id)
            .ok_or_else(|| NoteError::NotFound { id: id.to_string() })?
            .clone();

        let new_title = title.unwrap_or_else(|| existing.title.clone());
        let new_content = if let Some(c) = content {
            c
        } else if let Some(path) = file {
            self.read_content_from_file(&path)?
        } else if open_editor {
            self.open_editor_with_content(&new_title, &existing.content)?
        } else {
            existing.content.clone()
        };

        self.store.update(id, &new_title, &new_content)?;
        println!("Note {} updated", id);
        Ok(())
    }

    fn handle_delete(&mut self, id: &str, force: bool) -> Result<()> {
        let note = self
            .store
            .get(id)
            .ok_or_else(|| NoteError::NotFound { id: id.to_string() })?
            .clone();

        // Show note details and prompt for confirmation unless forced
        if !force {
            println!("You are about to delete the following note:");
            println!("ID:      {}", note.id);
            println!("Title:   {}", note.title);
            println!("Tag:     {}", note.tag.label);
            println!(
                "Created: {}",
                note.created_at.with_timezone(&Local).format("%Y-%m-%d %H:%M")
            );

            print!("\nAre you sure you want to delete this note? [y/N]: ");
            stdout().flush()?;

            let mut input = String::new();
            stdin().read_line(&mut input)?;
            let input = input.trim().to_lowercase();
            if input != "y" && input != "yes" {
                println!("Deletion cancelled.");
                return Ok(());
            }
        }

        self.store.delete(id)?;
        println!("Note '{}' ({}) has been deleted.", note.title, note.id);
        Ok(())
    }

    fn handle_pin(&mut self, id: &str) -> Result<()> {
        if self.store.get(id).is_none() {
            return Err(NoteError::NotFound { id: id.to_string() });
        }
        self.store.toggle_pin(id)?;
        let pinned = self.store.get(id).map(|n| n.pinned).unwrap_or(false);
        println!("Note {} is now {}", id, if pinned { "pinned" } else { "unpinned" });
        Ok(())
    }

    fn handle_tags(&self) -> Result<()> {
        if self.store.palette().is_empty() {
            println!("No tags.");
            return Ok(());
        }
        for tag in self.store.palette() {
            let uses = self
                .store
                .notes()
                .iter()
                .filter(|n| n.tag.matches_label(&tag.label))
                .count();
            println!(
                "{} {} ({} note{})",
                console::style(&tag.label).bold().cyan(),
                console::style(&tag.color).dim(),
                uses,
                if uses == 1 { "" } else { "s" }
            );
        }
        Ok(())
    }

    fn handle_calendar(&self, month: Option<String>) -> Result<()> {
        let (year, month) = match month {
            Some(m) => parse_month(&m)?,
            None => {
                let today = local_day(Utc::now());
                (today.year(), today.month())
            }
        };

        let by_day = notes_by_day(self.store.notes());
        let mut shown = 0;
        for (day, notes) in &by_day {
            if day.year() != year || day.month() != month {
                continue;
            }
            shown += notes.len();
            let titles: Vec<&str> = notes.iter().map(|n| n.title.as_str()).collect();
            println!("{}  {}", console::style(day).bold(), titles.join(", "));
        }

        if shown == 0 {
            println!("No notes in {:04}-{:02}.", year, month);
        }
        Ok(())
    }

    fn handle_theme(&mut self, set: Option<String>) -> Result<()> {
        let theme = match set {
            Some(value) => {
                let theme: Theme = value.parse().map_err(|e| NoteError::Validation {
                    message: e,
                })?;
                self.store.set_theme(theme)?;
                theme
            }
            None => self.store.toggle_theme()?,
        };
        println!("Theme is now {}", theme);
        Ok(())
    }

    fn read_content_from_file(&self, path: &Path) -> Result<String> {
        if !path.is_file() {
            return Err(NoteError::Validation {
                message: format!("not a readable file: {}", path.display()),
            });
        }
        Ok(read_to_string(path)?)
    }

    fn open_editor_for_content(&self, title: &str) -> Result<String> {
        // Create a temporary file with .md extension
        let temp_file = Builder::new().suffix(".md").tempfile()?;
        let temp_path = temp_file.path().to_path_buf();

        let editor_cmd = self.config.get_editor_command();
        self.write_editor_template(&temp_path, title)?;

        info!("Opening editor to write note content. Save and exit when done...");
        self.launch_editor(&editor_cmd, &temp_path)?;

        let content = read_to_string(&temp_path)?;
        Ok(process_editor_content(content))
    }

    fn open_editor_with_content(&self, title: &str, existing: &str) -> Result<String> {
        let temp_file = Builder::new().suffix(".md").tempfile()?;
        let temp_path = temp_file.path().to_path_buf();

        {
            let mut file = OpenOptions::new().write(true).open(&temp_path)?;
            writeln!(file, "<!-- Editing '{}'. Save and exit when done. -->", title)?;
            writeln!(file, "{}", existing)?;
        }

        let editor_cmd = self.config.get_editor_command();
        self.launch_editor(&editor_cmd, &temp_path)?;

        let content = read_to_string(&temp_path)?;
        Ok(process_editor_content(content))
    }

    fn write_editor_template(&self, path: &Path, title: &str) -> Result<()> {
        let mut file = OpenOptions::new().write(true).open(path)?;

        writeln!(
            file,
            "<!-- Write the content for '{}' below. Markdown is supported. -->",
            title
        )?;
        writeln!(file, "<!-- Comment lines like these are ignored. -->")?;
        writeln!(file)?;

        Ok(())
    }

    fn launch_editor(&self, editor_cmd: &str, file_path: &Path) -> Result<()> {
        // Handle shell-like command parsing
        let args = split(editor_cmd).map_err(|e| NoteError::Editor {
            message: format!("failed to parse editor command: {}", e),
        })?;

        if args.is_empty() {
            return Err(NoteError::Editor {
                message: "empty editor command".to_string(),
            });
        }

        let mut command = Command::new(&args[0]);
        if args.len() > 1 {
            command.args(&args[1..]);
        }
        command.arg(file_path);

        let status = command.status()?;
        if !status.success() {
            return Err(NoteError::Editor {
                message: "editor exited with non-zero status".to_string(),
            });
        }

        Ok(())
    }
}

/// Strips editor comment lines from the returned content.
fn process_editor_content(content: String) -> String {
    content
        .lines()
        .filter(|line| {
            !line.trim_start().starts_with("<!--") && !line.trim_end().ends_with("-->")
        })
        .collect::<Vec<&str>>()
        .join("\n")
}

fn parse_day(input: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(input, "%Y-%m-%d").map_err(|_| NoteError::Validation {
        message: format!("invalid date '{}', expected YYYY-MM-DD", input),
    })
}

fn parse_month(input: &str) -> Result<(i32, u32)> {
    let day = NaiveDate::parse_from_str(&format!("{}-01", input), "%Y-%m-%d").map_err(|_| {
        NoteError::Validation {
            message: format!("invalid month '{}', expected YYYY-MM", input),
        }
    })?;
    Ok((day.year(), day.month()))
}
