//! Data models for notekeep

mod note;

pub use note::{
    validate_note_text, Note, NoteDraft, NoteId, NotePatch, COPY_TITLE_SUFFIX, DEFAULT_NOTE_COLOR,
};
