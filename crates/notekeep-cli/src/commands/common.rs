use std::env;
use std::io::{self, IsTerminal, Write};
use std::path::{Path, PathBuf};
use std::process::Command;

use chrono::{DateTime, Utc};
use notekeep_core::config::NotekeepConfig;
use notekeep_core::search::{due_status, filter_notes, DueStatus, NoteFilter};
use notekeep_core::services::NoteService;
use notekeep_core::util::{is_color_token, parse_timestamp};
use notekeep_core::{Note, NoteId};
use serde::Serialize;

use crate::error::CliError;

/// Everything a command needs: the opened store plus resolved settings.
#[derive(Clone)]
pub struct AppContext {
    pub service: NoteService,
    pub default_color: String,
}

impl AppContext {
    /// Resolve configuration (file, then env, then flags) and open the store.
    pub fn open(db_path: Option<PathBuf>, store_key: Option<String>) -> Result<Self, CliError> {
        let config = NotekeepConfig::load()?
            .with_env_overrides()
            .with_overrides(db_path, store_key);

        let db_path = config.resolved_db_path()?;
        let service = NoteService::open_path(db_path, &config.resolved_store_key())?;
        Ok(Self {
            service,
            default_color: config.resolved_default_color(),
        })
    }

    /// Context over an existing service with the stock default color.
    #[cfg(test)]
    pub fn with_service(service: NoteService) -> Self {
        Self {
            service,
            default_color: notekeep_core::models::DEFAULT_NOTE_COLOR.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct NoteListItem {
    pub id: String,
    pub title: String,
    pub preview: String,
    pub content: String,
    pub created_at: String,
    pub updated_at: String,
    pub relative_time: String,
    pub pinned: bool,
    pub archived: bool,
    pub tags: Vec<String>,
    pub category: Option<String>,
    pub color: String,
    pub due_date: Option<String>,
    pub due_status: Option<DueStatus>,
}

pub async fn list_notes(
    service: &NoteService,
    filter: &NoteFilter,
    limit: Option<usize>,
) -> Result<Vec<Note>, CliError> {
    let notes = service.try_list_notes().await?;
    let mut visible = filter_notes(&notes, filter);
    if let Some(limit) = limit {
        visible.truncate(limit);
    }
    Ok(visible)
}

/// Find a note by exact id, falling back to a unique id prefix.
pub async fn resolve_note(note_query: &str, service: &NoteService) -> Result<Note, CliError> {
    let note_query = normalize_note_identifier(note_query)?;
    if let Some(note) = service.get_note(&NoteId::from(note_query.as_str())).await? {
        return Ok(note);
    }

    let mut matching = service
        .try_list_notes()
        .await?
        .into_iter()
        .filter(|note| note.id.as_str().starts_with(&note_query))
        .collect::<Vec<_>>();

    match matching.len() {
        0 => Err(CliError::NoteNotFound(note_query)),
        1 => Ok(matching.remove(0)),
        _ => {
            let options = matching
                .iter()
                .take(3)
                .map(|note| short_id(&note.id))
                .collect::<Vec<_>>()
                .join(", ");

            Err(CliError::AmbiguousNoteId(format!(
                "ID prefix '{note_query}' is ambiguous; matches: {options}"
            )))
        }
    }
}

pub fn short_id(id: &NoteId) -> String {
    id.as_str().chars().take(13).collect()
}

pub fn format_note_lines(notes: &[Note]) -> Vec<String> {
    let now = Utc::now();
    notes
        .iter()
        .map(|note| {
            let id = short_id(&note.id);
            let marker = if note.pinned { "*" } else { " " };
            let title = note_preview(&note.title, 24);
            let preview = note_preview(&note.content, 40);
            let relative_time = format_note_time(&note.updated_at, now);

            let mut line =
                format!("{id:<13} {marker} {title:<24}  {preview:<40}  {relative_time:<10}");
            let tags = render_tags(note);
            if !tags.is_empty() {
                line.push_str("  ");
                line.push_str(&tags);
            }
            if let Some(status) = due_status(note) {
                let flag = if status.is_soon() || status == DueStatus::Overdue {
                    "!"
                } else {
                    ""
                };
                line.push_str(&format!("  [{}{flag}]", status.label()));
            }
            line.trim_end().to_string()
        })
        .collect()
}

pub fn format_note_details(note: &Note) -> String {
    let mut lines = vec![
        format!("id:        {}", note.id),
        format!("title:     {}", note.title),
        format!("created:   {}", note.created_at),
        format!("updated:   {}", note.updated_at),
        format!("pinned:    {}", note.pinned),
        format!("archived:  {}", note.archived),
        format!("color:     {}", note.color),
    ];
    if let Some(category) = &note.category {
        lines.push(format!("category:  {category}"));
    }
    if !note.tags.is_empty() {
        lines.push(format!("tags:      {}", render_tags(note)));
    }
    if let Some(due_date) = &note.due_date {
        let status = due_status(note).map(DueStatus::label);
        match status {
            Some(status) => lines.push(format!("due:       {due_date} ({status})")),
            None => lines.push(format!("due:       {due_date}")),
        }
    }
    lines.push(String::new());
    lines.push(note.content.clone());
    lines.join("\n")
}

pub fn note_to_list_item(note: &Note) -> NoteListItem {
    let now = Utc::now();

    NoteListItem {
        id: note.id.to_string(),
        title: note.title.clone(),
        preview: note_preview(&note.content, 80),
        content: note.content.clone(),
        created_at: note.created_at.clone(),
        updated_at: note.updated_at.clone(),
        relative_time: format_note_time(&note.updated_at, now),
        pinned: note.pinned,
        archived: note.archived,
        tags: note.tags.clone(),
        category: note.category.clone(),
        color: note.color.clone(),
        due_date: note.due_date.clone(),
        due_status: due_status(note),
    }
}

/// First line of `text`, whitespace collapsed, truncated with an ellipsis.
pub fn note_preview(text: &str, max_chars: usize) -> String {
    let first_line = text.lines().next().unwrap_or("").trim();
    let collapsed = first_line.split_whitespace().collect::<Vec<_>>().join(" ");

    if collapsed.chars().count() <= max_chars {
        collapsed
    } else {
        let take_len = max_chars.saturating_sub(3);
        let mut truncated = collapsed.chars().take(take_len).collect::<String>();
        truncated.push_str("...");
        truncated
    }
}

pub fn render_tags(note: &Note) -> String {
    note.tags
        .iter()
        .map(|tag| format!("#{tag}"))
        .collect::<Vec<String>>()
        .join(" ")
}

fn format_note_time(timestamp: &str, now: DateTime<Utc>) -> String {
    parse_timestamp(timestamp).map_or_else(
        || timestamp.to_string(),
        |time| format_relative_time(time, now),
    )
}

const MINUTE_SECS: i64 = 60;
const HOUR_SECS: i64 = 60 * MINUTE_SECS;
const DAY_SECS: i64 = 24 * HOUR_SECS;

/// Largest unit first; anything under a minute reads "just now".
const RELATIVE_UNITS: [(i64, &str); 6] = [
    (365 * DAY_SECS, "y"),
    (30 * DAY_SECS, "mo"),
    (7 * DAY_SECS, "w"),
    (DAY_SECS, "d"),
    (HOUR_SECS, "h"),
    (MINUTE_SECS, "m"),
];

pub fn format_relative_time(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = (now - then).num_seconds();
    RELATIVE_UNITS
        .iter()
        .find(|(unit, _)| elapsed >= *unit)
        .map_or_else(
            || "just now".to_string(),
            |(unit, suffix)| format!("{}{suffix} ago", elapsed / unit),
        )
}

pub fn resolve_note_content(content_parts: &[String]) -> Result<String, CliError> {
    if let Some(content) = normalize_content(&content_parts.join(" ")) {
        return Ok(content);
    }

    if let Some(content) = read_piped_stdin()? {
        return Ok(content);
    }

    if let Some(content) = edit_in_editor("")? {
        return Ok(content);
    }

    Err(CliError::EmptyContent)
}

pub fn normalize_content(content: &str) -> Option<String> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

pub fn normalize_title(title: &str) -> Result<String, CliError> {
    normalize_content(title).ok_or(CliError::EmptyTitle)
}

pub fn normalize_note_identifier(id: &str) -> Result<String, CliError> {
    let trimmed = id.trim();
    if trimmed.is_empty() {
        Err(CliError::EmptyNoteId)
    } else {
        Ok(trimmed.to_string())
    }
}

pub fn normalize_color(color: &str) -> Result<String, CliError> {
    let trimmed = color.trim();
    if is_color_token(trimmed) {
        Ok(trimmed.to_ascii_lowercase())
    } else {
        Err(CliError::InvalidColor(color.to_string()))
    }
}

pub fn normalize_due_date(due: &str) -> Result<String, CliError> {
    let trimmed = due.trim();
    if parse_timestamp(trimmed).is_some() {
        Ok(trimmed.to_string())
    } else {
        Err(CliError::InvalidDueDate(due.to_string()))
    }
}

/// Piped stdin, or `None` when stdin is a terminal or blank.
pub fn read_piped_stdin() -> Result<Option<String>, CliError> {
    let stdin = io::stdin();
    if stdin.is_terminal() {
        return Ok(None);
    }
    Ok(normalize_content(&io::read_to_string(stdin)?))
}

/// Open `initial` in the user's editor and return the saved text.
pub fn edit_in_editor(initial: &str) -> Result<Option<String>, CliError> {
    let mut draft = tempfile::Builder::new()
        .prefix("notekeep-")
        .suffix(".md")
        .tempfile()?;
    draft.write_all(initial.as_bytes())?;
    draft.flush()?;

    run_editor(&editor_command(), draft.path())?;
    Ok(normalize_content(&std::fs::read_to_string(draft.path())?))
}

#[cfg(windows)]
const DEFAULT_EDITOR: &str = "notepad";
#[cfg(not(windows))]
const DEFAULT_EDITOR: &str = "vi";

/// `$VISUAL`, then `$EDITOR`, then the platform default.
pub fn editor_command() -> String {
    ["VISUAL", "EDITOR"]
        .into_iter()
        .find_map(|var| env::var(var).ok().filter(|value| !value.trim().is_empty()))
        .unwrap_or_else(|| DEFAULT_EDITOR.to_string())
}

/// Run `editor` (a program plus optional arguments) on `file`.
pub fn run_editor(editor: &str, file: &Path) -> Result<(), CliError> {
    let mut parts = editor.split_whitespace();
    let program = parts
        .next()
        .ok_or_else(|| CliError::EditorFailed("editor command is empty".into()))?;

    let status = Command::new(program).args(parts).arg(file).status()?;
    if status.success() {
        Ok(())
    } else {
        Err(CliError::EditorFailed(format!("`{editor}` exited with {status}")))
    }
}
