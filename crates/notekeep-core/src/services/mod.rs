//! Async service wrappers shared by front ends

mod note_service;

pub use note_service::NoteService;
