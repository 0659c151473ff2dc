//! The note collection kept as one JSON blob under a single store key.
//!
//! Every operation reads the whole collection, changes it in memory and writes
//! the whole collection back. There is no locking here: two stores writing the
//! same key race with last-write-wins semantics. Share one store through
//! [`crate::services::NoteService`] when several tasks need it.

mod sanitize;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::clock::{Clock, SystemClock};
use crate::db::BlobStore;
use crate::error::{Error, Result};
use crate::export::render_json_export;
use crate::models::{Note, NoteDraft, NoteId, NotePatch};
use crate::util::{compact_text, format_timestamp};

/// Key the collection is stored under unless configured otherwise.
pub const DEFAULT_STORE_KEY: &str = "NOTES_KEY";

/// Outcome of a successful import.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportReport {
    /// Number of notes now in the collection
    pub imported: usize,
}

/// Durable note collection over a [`BlobStore`].
pub struct NoteStore {
    backend: Box<dyn BlobStore + Send>,
    key: String,
    clock: Box<dyn Clock>,
}

impl NoteStore {
    /// Create a store over `backend` using the default key and system clock.
    pub fn new(backend: impl BlobStore + Send + 'static) -> Self {
        Self {
            backend: Box::new(backend),
            key: DEFAULT_STORE_KEY.to_string(),
            clock: Box::new(SystemClock),
        }
    }

    /// Use a different store key.
    #[must_use]
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    /// Use a different time source for timestamps.
    #[must_use]
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// The key this store reads and writes.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Every note in insertion order.
    ///
    /// Read or decode failures are logged and reported as an empty collection.
    /// Use [`Self::try_list`] to tell the two apart.
    pub fn list(&self) -> Vec<Note> {
        self.load().unwrap_or_else(|error| {
            tracing::warn!("Failed to load notes under '{}': {error}", self.key);
            Vec::new()
        })
    }

    /// Every note in insertion order, surfacing storage failures.
    pub fn try_list(&self) -> Result<Vec<Note>> {
        self.load()
    }

    /// Fetch a note by id.
    pub fn get_by_id(&self, id: &NoteId) -> Result<Option<Note>> {
        Ok(self.load()?.into_iter().find(|note| &note.id == id))
    }

    /// Create a note from a draft and append it to the collection.
    pub fn create(&self, draft: NoteDraft) -> Result<Note> {
        let mut notes = self.load()?;
        let mut note = Note::from_draft(draft, &self.now());
        while notes.iter().any(|existing| existing.id == note.id) {
            note.id = NoteId::new();
        }

        notes.push(note.clone());
        self.save(&notes)?;
        tracing::debug!("Created note {}", note.id);
        Ok(note)
    }

    /// Merge `patch` over the note with `id`; `None` if there is no such note.
    pub fn update(&self, id: &NoteId, patch: NotePatch) -> Result<Option<Note>> {
        self.mutate(id, |note, now| note.apply(patch, now))
    }

    /// Remove the note with `id`. Returns `false` if nothing matched.
    pub fn delete(&self, id: &NoteId) -> Result<bool> {
        let mut notes = self.load()?;
        let Some(index) = notes.iter().position(|note| &note.id == id) else {
            tracing::debug!("Delete skipped, note {id} not found");
            return Ok(false);
        };

        let removed = notes.remove(index);
        self.save(&notes)?;
        tracing::debug!("Deleted note {} ({} left)", removed.id, notes.len());
        Ok(true)
    }

    /// Flip the pinned flag.
    pub fn toggle_pinned(&self, id: &NoteId) -> Result<Option<Note>> {
        self.mutate(id, |note, now| {
            note.pinned = !note.pinned;
            note.touch(now);
        })
    }

    /// Flip the archived flag.
    pub fn toggle_archived(&self, id: &NoteId) -> Result<Option<Note>> {
        self.mutate(id, |note, now| {
            note.archived = !note.archived;
            note.touch(now);
        })
    }

    /// Append a copy of the note with `id` under a fresh id.
    pub fn duplicate(&self, id: &NoteId) -> Result<Option<Note>> {
        let mut notes = self.load()?;
        let Some(source) = notes.iter().find(|note| &note.id == id) else {
            return Ok(None);
        };

        let mut copy = source.duplicate(&self.now());
        while notes.iter().any(|existing| existing.id == copy.id) {
            copy.id = NoteId::new();
        }

        notes.push(copy.clone());
        self.save(&notes)?;
        tracing::debug!("Duplicated note {id} as {}", copy.id);
        Ok(Some(copy))
    }

    /// The whole collection as pretty-printed JSON.
    pub fn export_all(&self) -> Result<String> {
        let notes = self.load()?;
        Ok(render_json_export(&notes)?)
    }

    /// Replace the whole collection with the notes in `payload`.
    ///
    /// Returns `None`, leaving the store untouched, when `payload` is not a
    /// JSON array. Elements without a string `id` are skipped.
    pub fn import_all(&self, payload: &str) -> Result<Option<ImportReport>> {
        let items = match serde_json::from_str::<Value>(payload) {
            Ok(Value::Array(items)) => items,
            Ok(_) => {
                tracing::warn!("Import rejected: payload is not a JSON array");
                return Ok(None);
            }
            Err(error) => {
                tracing::warn!("Import rejected: {error}");
                return Ok(None);
            }
        };

        let received = items.len();
        let notes = sanitize::sanitize_collection(items, &self.now());
        self.save(&notes)?;

        tracing::info!(
            "Imported {} notes ({} elements skipped)",
            notes.len(),
            received - notes.len()
        );
        Ok(Some(ImportReport {
            imported: notes.len(),
        }))
    }

    fn mutate(
        &self,
        id: &NoteId,
        change: impl FnOnce(&mut Note, &str),
    ) -> Result<Option<Note>> {
        let mut notes = self.load()?;
        let Some(note) = notes.iter_mut().find(|note| &note.id == id) else {
            tracing::debug!("Note {id} not found");
            return Ok(None);
        };

        change(note, &self.now());
        let updated = note.clone();
        self.save(&notes)?;
        Ok(Some(updated))
    }

    fn now(&self) -> String {
        format_timestamp(self.clock.now())
    }

    fn load(&self) -> Result<Vec<Note>> {
        let Some(raw) = self.backend.read(&self.key)? else {
            return Ok(Vec::new());
        };

        let notes: Option<Vec<Note>> = serde_json::from_str(&raw).map_err(|error| {
            Error::Storage(format!(
                "note collection under '{}' is unreadable: {error} (starts with: {})",
                self.key,
                compact_text(&raw)
            ))
        })?;
        Ok(notes.unwrap_or_default())
    }

    fn save(&self, notes: &[Note]) -> Result<()> {
        let raw = serde_json::to_string(notes)?;
        self.backend.write(&self.key, &raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::SteppingClock;
    use crate::db::{MemoryBlobStore, SqliteBlobStore};
    use crate::models::DEFAULT_NOTE_COLOR;
    use crate::util::parse_timestamp;
    use chrono::{Duration, TimeZone, Utc};
    use pretty_assertions::assert_eq;

    fn setup() -> NoteStore {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 8, 0, 0).unwrap();
        NoteStore::new(MemoryBlobStore::new())
            .with_clock(SteppingClock::new(start, Duration::seconds(1)))
    }

    fn groceries() -> NoteDraft {
        NoteDraft::new("Groceries", "Milk, eggs")
    }

    #[test]
    fn test_list_empty_store() {
        let store = setup();
        assert!(store.list().is_empty());
        assert!(store.try_list().unwrap().is_empty());
    }

    #[test]
    fn test_create_defaults() {
        let store = setup();
        let note = store.create(groceries()).unwrap();

        assert!(!note.id.as_str().is_empty());
        assert!(!note.pinned);
        assert!(!note.archived);
        assert!(note.tags.is_empty());
        assert_eq!(note.color, DEFAULT_NOTE_COLOR);
        assert_eq!(note.created_at, note.updated_at);
        assert_eq!(note.created_at, "2024-01-01T08:00:00.000Z");
    }

    #[test]
    fn test_create_then_get_returns_equal_note() {
        let store = setup();
        let note = store
            .create(
                groceries()
                    .with_tags(["home", "home"])
                    .with_category("Errands")
                    .with_color("#ffcc00")
                    .with_due_date("2024-01-05"),
            )
            .unwrap();

        assert_eq!(store.get_by_id(&note.id).unwrap(), Some(note));
    }

    #[test]
    fn test_create_keeps_insertion_order_and_allows_duplicate_titles() {
        let store = setup();
        let first = store.create(groceries()).unwrap();
        let second = store.create(groceries()).unwrap();

        let ids = store.list().into_iter().map(|n| n.id).collect::<Vec<_>>();
        assert_eq!(ids, vec![first.id, second.id]);
    }

    #[test]
    fn test_get_missing_is_none() {
        let store = setup();
        assert_eq!(store.get_by_id(&NoteId::from("missing")).unwrap(), None);
    }

    #[test]
    fn test_update_empty_patch_only_changes_updated_at() {
        let store = setup();
        let note = store
            .create(groceries().with_tags(["a"]).with_category("Work"))
            .unwrap();

        let updated = store.update(&note.id, NotePatch::default()).unwrap().unwrap();

        assert_ne!(updated.updated_at, note.updated_at);
        assert_eq!(
            Note {
                updated_at: note.updated_at.clone(),
                ..updated
            },
            note
        );
    }

    #[test]
    fn test_update_tags_preserves_category() {
        let store = setup();
        let note = store.create(groceries().with_category("Work")).unwrap();

        let updated = store
            .update(&note.id, NotePatch::default().tags(["urgent"]))
            .unwrap()
            .unwrap();

        assert_eq!(updated.tags, vec!["urgent"]);
        assert_eq!(updated.category.as_deref(), Some("Work"));
        assert_eq!(store.get_by_id(&note.id).unwrap(), Some(updated));
    }

    #[test]
    fn test_update_never_changes_id_or_created_at() {
        let store = setup();
        let note = store.create(groceries()).unwrap();

        let updated = store
            .update(&note.id, NotePatch::default().title("Shopping").content("Bread"))
            .unwrap()
            .unwrap();

        assert_eq!(updated.id, note.id);
        assert_eq!(updated.created_at, note.created_at);
        assert_eq!(updated.title, "Shopping");
        assert!(updated.updated_at > updated.created_at);
    }

    #[test]
    fn test_update_missing_is_none() {
        let store = setup();
        let result = store
            .update(&NoteId::from("missing"), NotePatch::default().title("x"))
            .unwrap();
        assert_eq!(result, None);
    }

    #[test]
    fn test_delete_is_idempotent() {
        let store = setup();
        let note = store.create(groceries()).unwrap();

        assert!(store.delete(&note.id).unwrap());
        assert_eq!(store.get_by_id(&note.id).unwrap(), None);
        assert!(!store.delete(&note.id).unwrap());
    }

    #[test]
    fn test_toggle_pinned_twice_restores_flag() {
        let store = setup();
        let note = store.create(groceries()).unwrap();

        let once = store.toggle_pinned(&note.id).unwrap().unwrap();
        let twice = store.toggle_pinned(&note.id).unwrap().unwrap();

        assert!(once.pinned);
        assert!(!twice.pinned);
        assert!(once.updated_at > note.updated_at);
        assert!(twice.updated_at > once.updated_at);
    }

    #[test]
    fn test_pinned_and_archived_are_independent() {
        let store = setup();
        let note = store.create(groceries()).unwrap();

        store.toggle_pinned(&note.id).unwrap();
        let both = store.toggle_archived(&note.id).unwrap().unwrap();
        assert!(both.pinned);
        assert!(both.archived);

        let archived_only = store.toggle_pinned(&note.id).unwrap().unwrap();
        assert!(!archived_only.pinned);
        assert!(archived_only.archived);
    }

    #[test]
    fn test_toggle_missing_is_none() {
        let store = setup();
        let missing = NoteId::from("missing");
        assert_eq!(store.toggle_pinned(&missing).unwrap(), None);
        assert_eq!(store.toggle_archived(&missing).unwrap(), None);
    }

    #[test]
    fn test_duplicate_appends_copy() {
        let store = setup();
        let note = store
            .create(groceries().with_tags(["x"]).with_category("Home").pinned(true))
            .unwrap();

        let copy = store.duplicate(&note.id).unwrap().unwrap();

        assert_ne!(copy.id, note.id);
        assert_eq!(copy.title, "Groceries (copy)");
        assert_eq!(copy.tags, note.tags);
        assert_eq!(copy.category, note.category);
        assert!(copy.pinned);
        assert!(copy.created_at > note.created_at);
        assert_eq!(store.list().len(), 2);
        assert_eq!(store.list()[1], copy);
    }

    #[test]
    fn test_duplicate_missing_is_none() {
        let store = setup();
        assert_eq!(store.duplicate(&NoteId::from("missing")).unwrap(), None);
        assert!(store.list().is_empty());
    }

    #[test]
    fn test_export_is_pretty_json_array() {
        let store = setup();
        store.create(groceries()).unwrap();

        let exported = store.export_all().unwrap();
        assert!(exported.starts_with("[\n  {\n    \"id\": "));
    }

    #[test]
    fn test_export_then_import_roundtrip() {
        let source = setup();
        source.create(groceries().with_tags(["a"])).unwrap();
        source.create(NoteDraft::new("Call", "Mom").pinned(true)).unwrap();
        let exported = source.export_all().unwrap();

        let target = setup();
        let report = target.import_all(&exported).unwrap().unwrap();

        assert_eq!(report.imported, 2);
        assert_eq!(target.list(), source.list());
    }

    #[test]
    fn test_roundtrip_keeps_blank_color_note_equal() {
        let source = setup();
        let created = source
            .create(NoteDraft::new("Blank", "color").with_color(""))
            .unwrap();
        source
            .update(&created.id, NotePatch::default().color(""))
            .unwrap();

        let target = setup();
        target.import_all(&source.export_all().unwrap()).unwrap();

        assert_eq!(target.list(), source.list());
        assert_eq!(target.list()[0].color, DEFAULT_NOTE_COLOR);
    }

    #[test]
    fn test_future_created_at_keeps_updated_at_ordered() {
        let store = setup();
        store
            .import_all(
                r#"[{"id":"1","title":"t","content":"c",
                     "createdAt":"2999-01-01T00:00:00.000Z",
                     "updatedAt":"2999-01-01T00:00:00.000Z"}]"#,
            )
            .unwrap();

        let id = NoteId::from("1");
        let pinned = store.toggle_pinned(&id).unwrap().unwrap();
        let updated = store
            .update(&id, NotePatch::default().title("later"))
            .unwrap()
            .unwrap();

        for note in [pinned, updated] {
            let created = parse_timestamp(&note.created_at).unwrap();
            let touched = parse_timestamp(&note.updated_at).unwrap();
            assert!(created <= touched, "{} > {}", note.created_at, note.updated_at);
        }
    }

    #[test]
    fn test_import_replaces_existing_collection() {
        let store = setup();
        store.create(NoteDraft::new("Unrelated", "note")).unwrap();

        let report = store
            .import_all(r#"[{"id":"1","title":"A","content":"B"}]"#)
            .unwrap()
            .unwrap();

        assert_eq!(report.imported, 1);
        let notes = store.list();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].title, "A");
    }

    #[test]
    fn test_import_rejects_non_array() {
        let store = setup();
        let note = store.create(groceries()).unwrap();

        assert_eq!(store.import_all(r#"{"not":"an array"}"#).unwrap(), None);
        assert_eq!(store.import_all("not json at all").unwrap(), None);
        assert_eq!(store.list(), vec![note]);
    }

    #[test]
    fn test_import_counts_only_kept_elements() {
        let store = setup();
        let report = store
            .import_all(r#"[{"id":"1"},{"id":2},{"title":"x"},{"id":"1"}]"#)
            .unwrap()
            .unwrap();
        assert_eq!(report.imported, 1);
    }

    #[test]
    fn test_corrupt_blob_is_masked_by_list_only() {
        let backend = MemoryBlobStore::with_entry(DEFAULT_STORE_KEY, "{broken");
        let store = NoteStore::new(backend);

        assert!(store.list().is_empty());
        assert!(matches!(store.try_list(), Err(Error::Storage(_))));
        assert!(matches!(store.create(groceries()), Err(Error::Storage(_))));
        assert!(matches!(
            store.toggle_pinned(&NoteId::from("x")),
            Err(Error::Storage(_))
        ));
        assert_eq!(
            store.backend.read(DEFAULT_STORE_KEY).unwrap().as_deref(),
            Some("{broken")
        );
    }

    #[test]
    fn test_null_blob_reads_as_empty() {
        let store = NoteStore::new(MemoryBlobStore::with_entry(DEFAULT_STORE_KEY, "null"));
        assert!(store.try_list().unwrap().is_empty());
    }

    #[test]
    fn test_custom_key_isolates_collections() {
        let db = SqliteBlobStore::open_in_memory().unwrap();
        let store = NoteStore::new(db).with_key("WORK_NOTES");
        store.create(groceries()).unwrap();

        assert_eq!(store.key(), "WORK_NOTES");
        assert_eq!(store.list().len(), 1);
    }

    #[test]
    fn test_sqlite_backend_persists_collection() {
        let tmp = tempfile::tempdir().unwrap();
        let db_path = tmp.path().join("notes.db");

        let created = {
            let store = NoteStore::new(SqliteBlobStore::open(&db_path).unwrap());
            store.create(groceries()).unwrap()
        };

        let reopened = NoteStore::new(SqliteBlobStore::open(&db_path).unwrap());
        assert_eq!(reopened.list(), vec![created]);
    }
}
