//! Shared note service wrapper used by front ends.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::Mutex;

use crate::db::{MemoryBlobStore, SqliteBlobStore};
use crate::models::{Note, NoteDraft, NoteId, NotePatch};
use crate::store::{ImportReport, NoteStore};
use crate::Result;

/// Thread-safe handle to a [`NoteStore`].
///
/// The lock is held for a whole read-modify-write cycle, so concurrent
/// callers sharing one service never overwrite each other's changes.
#[derive(Clone)]
pub struct NoteService {
    store: Arc<Mutex<NoteStore>>,
    db_path: Option<PathBuf>,
}

impl NoteService {
    /// Wrap an existing store.
    pub fn new(store: NoteStore) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
            db_path: None,
        }
    }

    /// Open a service over the `SQLite` file at `db_path`, creating parent
    /// directories as needed.
    pub fn open_path(db_path: impl Into<PathBuf>, store_key: &str) -> Result<Self> {
        let db_path = db_path.into();
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        tracing::debug!("Opening note store at {}", db_path.display());
        let store = NoteStore::new(SqliteBlobStore::open(&db_path)?).with_key(store_key);
        Ok(Self {
            store: Arc::new(Mutex::new(store)),
            db_path: Some(db_path),
        })
    }

    /// Open an in-memory service (primarily for tests).
    pub fn open_in_memory() -> Self {
        Self::new(NoteStore::new(MemoryBlobStore::new()))
    }

    /// Database file backing this service, if any.
    pub fn db_path(&self) -> Option<&Path> {
        self.db_path.as_deref()
    }

    /// List every note; storage failures read as an empty list.
    pub async fn list_notes(&self) -> Vec<Note> {
        self.store.lock().await.list()
    }

    /// List every note, surfacing storage failures.
    pub async fn try_list_notes(&self) -> Result<Vec<Note>> {
        self.store.lock().await.try_list()
    }

    /// Fetch a note by id.
    pub async fn get_note(&self, id: &NoteId) -> Result<Option<Note>> {
        self.store.lock().await.get_by_id(id)
    }

    /// Create a new note.
    pub async fn create_note(&self, draft: NoteDraft) -> Result<Note> {
        self.store.lock().await.create(draft)
    }

    /// Update a note.
    pub async fn update_note(&self, id: &NoteId, patch: NotePatch) -> Result<Option<Note>> {
        self.store.lock().await.update(id, patch)
    }

    /// Delete a note.
    pub async fn delete_note(&self, id: &NoteId) -> Result<bool> {
        self.store.lock().await.delete(id)
    }

    /// Toggle the pinned flag.
    pub async fn toggle_pinned(&self, id: &NoteId) -> Result<Option<Note>> {
        self.store.lock().await.toggle_pinned(id)
    }

    /// Toggle the archived flag.
    pub async fn toggle_archived(&self, id: &NoteId) -> Result<Option<Note>> {
        self.store.lock().await.toggle_archived(id)
    }

    /// Duplicate a note.
    pub async fn duplicate_note(&self, id: &NoteId) -> Result<Option<Note>> {
        self.store.lock().await.duplicate(id)
    }

    /// Export every note as pretty JSON.
    pub async fn export_notes(&self) -> Result<String> {
        self.store.lock().await.export_all()
    }

    /// Replace every note with an imported JSON array.
    pub async fn import_notes(&self, payload: &str) -> Result<Option<ImportReport>> {
        self.store.lock().await.import_all(payload)
    }
}
