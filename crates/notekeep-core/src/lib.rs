//! notekeep-core - Core library for notekeep
//!
//! This crate contains the note model, the blob storage backends, the
//! [`NoteStore`] that keeps the whole collection under one key, and the
//! list-view helpers shared by notekeep front ends.

pub mod clock;
pub mod config;
pub mod db;
pub mod error;
pub mod export;
pub mod models;
pub mod search;
pub mod services;
pub mod store;
pub mod util;

pub use error::{Error, Result};
pub use models::{Note, NoteDraft, NoteId, NotePatch};
pub use store::{ImportReport, NoteStore};
