use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] notekeep_core::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
    #[error("No note content provided")]
    EmptyContent,
    #[error("Note title cannot be empty")]
    EmptyTitle,
    #[error("Edited note content cannot be empty")]
    EmptyEditedContent,
    #[error("Note ID cannot be empty")]
    EmptyNoteId,
    #[error("Note not found for id/prefix: {0}")]
    NoteNotFound(String),
    #[error("{0}")]
    AmbiguousNoteId(String),
    #[error("Invalid color '{0}': expected a hex token like #ffcc00")]
    InvalidColor(String),
    #[error("Invalid due date '{0}': expected YYYY-MM-DD or an RFC 3339 timestamp")]
    InvalidDueDate(String),
    #[error("Import rejected: input is not a JSON array of notes")]
    MalformedImport,
    #[error("Editor command failed: {0}")]
    EditorFailed(String),
}
