//! Note model

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::util::{normalize_text_option, parse_timestamp};

/// Color given to notes created without an explicit color.
pub const DEFAULT_NOTE_COLOR: &str = "#ffffff";

/// Suffix appended to the title of a duplicated note.
pub const COPY_TITLE_SUFFIX: &str = " (copy)";

/// An opaque note identifier.
///
/// New notes get a UUID v7 (time-sortable), but any string is a valid id:
/// imported collections keep whatever ids they were exported with.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteId(String);

impl NoteId {
    /// Create a new unique note ID using UUID v7
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    /// Get the string representation of this ID
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for NoteId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for NoteId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self(s.to_string()))
    }
}

impl From<&str> for NoteId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for NoteId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// A note in the system
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    /// Unique identifier
    pub id: NoteId,
    pub title: String,
    pub content: String,
    /// Creation timestamp (ISO-8601)
    pub created_at: String,
    /// Last update timestamp (ISO-8601)
    pub updated_at: String,
    #[serde(default)]
    pub pinned: bool,
    #[serde(default)]
    pub archived: bool,
    /// Free-form tags in the order they were entered
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default = "default_color")]
    pub color: String,
    /// Optional due date (ISO-8601)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
}

fn default_color() -> String {
    DEFAULT_NOTE_COLOR.to_string()
}

impl Note {
    /// Build a note from a draft with a fresh id, stamped at `now`.
    #[must_use]
    pub fn from_draft(draft: NoteDraft, now: &str) -> Self {
        Self {
            id: NoteId::new(),
            title: draft.title,
            content: draft.content,
            created_at: now.to_string(),
            updated_at: now.to_string(),
            pinned: draft.pinned.unwrap_or(false),
            archived: draft.archived.unwrap_or(false),
            tags: draft.tags.unwrap_or_default(),
            category: normalize_text_option(draft.category),
            color: normalize_text_option(draft.color).unwrap_or_else(default_color),
            due_date: normalize_text_option(draft.due_date),
        }
    }

    /// Merge a patch over this note and stamp it with `now`.
    ///
    /// `id` and `created_at` are never touched.
    pub fn apply(&mut self, patch: NotePatch, now: &str) {
        let NotePatch {
            title,
            content,
            tags,
            category,
            color,
            due_date,
            pinned,
            archived,
        } = patch;

        if let Some(title) = title {
            self.title = title;
        }
        if let Some(content) = content {
            self.content = content;
        }
        if let Some(tags) = tags {
            self.tags = tags;
        }
        if let Some(category) = category {
            self.category = normalize_text_option(category);
        }
        if let Some(color) = color {
            self.color = normalize_text_option(Some(color)).unwrap_or_else(default_color);
        }
        if let Some(due_date) = due_date {
            self.due_date = normalize_text_option(due_date);
        }
        if let Some(pinned) = pinned {
            self.pinned = pinned;
        }
        if let Some(archived) = archived {
            self.archived = archived;
        }
        self.touch(now);
    }

    /// Refresh `updated_at`, never letting it fall before `created_at`.
    pub fn touch(&mut self, now: &str) {
        let before_creation = matches!(
            (parse_timestamp(now), parse_timestamp(&self.created_at)),
            (Some(now), Some(created)) if now < created
        );
        self.updated_at = if before_creation {
            self.created_at.clone()
        } else {
            now.to_string()
        };
    }

    /// Copy this note under a new id, with `(copy)` appended to the title.
    ///
    /// Every other field, including `pinned`, carries over.
    #[must_use]
    pub fn duplicate(&self, now: &str) -> Self {
        Self {
            id: NoteId::new(),
            title: format!("{}{COPY_TITLE_SUFFIX}", self.title),
            created_at: now.to_string(),
            updated_at: now.to_string(),
            ..self.clone()
        }
    }
}

/// Caller-supplied fields for a new note.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteDraft {
    pub title: String,
    pub content: String,
    pub tags: Option<Vec<String>>,
    pub category: Option<String>,
    pub color: Option<String>,
    pub due_date: Option<String>,
    pub pinned: Option<bool>,
    pub archived: Option<bool>,
}

impl NoteDraft {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = Some(tags.into_iter().map(Into::into).collect());
        self
    }

    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    #[must_use]
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    #[must_use]
    pub fn with_due_date(mut self, due_date: impl Into<String>) -> Self {
        self.due_date = Some(due_date.into());
        self
    }

    #[must_use]
    pub const fn pinned(mut self, pinned: bool) -> Self {
        self.pinned = Some(pinned);
        self
    }

    #[must_use]
    pub const fn archived(mut self, archived: bool) -> Self {
        self.archived = Some(archived);
        self
    }
}

/// Partial update for an existing note.
///
/// `None` leaves a field unchanged. For clearable fields the inner option
/// distinguishes "clear" (`Some(None)`) from "set" (`Some(Some(_))`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotePatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub tags: Option<Vec<String>>,
    pub category: Option<Option<String>>,
    pub color: Option<String>,
    pub due_date: Option<Option<String>>,
    pub pinned: Option<bool>,
    pub archived: Option<bool>,
}

impl NotePatch {
    /// Whether the patch leaves every field unchanged.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    #[must_use]
    pub fn tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = Some(tags.into_iter().map(Into::into).collect());
        self
    }

    #[must_use]
    pub fn category(mut self, category: Option<String>) -> Self {
        self.category = Some(category);
        self
    }

    #[must_use]
    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    #[must_use]
    pub fn due_date(mut self, due_date: Option<String>) -> Self {
        self.due_date = Some(due_date);
        self
    }
}

/// Reject blank titles or contents.
///
/// The store accepts anything; front ends call this before create/update.
pub fn validate_note_text(title: &str, content: &str) -> Result<()> {
    if title.trim().is_empty() {
        return Err(Error::InvalidInput("note title cannot be empty".into()));
    }
    if content.trim().is_empty() {
        return Err(Error::InvalidInput("note content cannot be empty".into()));
    }
    Ok(())
}
