//! List-view helpers: filtering, display ordering and facets.
//!
//! These never touch storage; they operate on the output of
//! [`crate::store::NoteStore::list`].

mod due;

use std::collections::BTreeSet;

use crate::models::Note;
use crate::util::parse_timestamp;

pub use due::{due_status, due_status_at, DueStatus};

/// Criteria for the note list view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteFilter {
    /// Case-insensitive substring matched against title or content
    pub text: Option<String>,
    /// Case-insensitive category equality
    pub category: Option<String>,
    /// Exact tag membership
    pub tag: Option<String>,
    /// Show archived notes instead of active ones
    pub show_archived: bool,
}

impl NoteFilter {
    pub fn matches(&self, note: &Note) -> bool {
        if note.archived != self.show_archived {
            return false;
        }

        if let Some(text) = normalized(self.text.as_deref()) {
            let in_title = note.title.to_lowercase().contains(&text);
            if !in_title && !note.content.to_lowercase().contains(&text) {
                return false;
            }
        }

        if let Some(category) = normalized(self.category.as_deref()) {
            let note_category = note.category.as_deref().unwrap_or("").to_lowercase();
            if note_category != category {
                return false;
            }
        }

        if let Some(tag) = self.tag.as_deref().filter(|tag| !tag.is_empty()) {
            if !note.tags.iter().any(|candidate| candidate == tag) {
                return false;
            }
        }

        true
    }
}

fn normalized(raw: Option<&str>) -> Option<String> {
    raw.map(|value| value.trim().to_lowercase())
        .filter(|value| !value.is_empty())
}

/// Apply `filter`, then order the survivors for display.
#[must_use]
pub fn filter_notes(notes: &[Note], filter: &NoteFilter) -> Vec<Note> {
    let filtered = notes
        .iter()
        .filter(|note| filter.matches(note))
        .cloned()
        .collect();
    sort_for_display(filtered)
}

/// Pinned notes first, each group most recently updated first.
///
/// Unparseable `updated_at` values sort after every parseable one.
#[must_use]
pub fn sort_for_display(mut notes: Vec<Note>) -> Vec<Note> {
    notes.sort_by(|a, b| {
        b.pinned.cmp(&a.pinned).then_with(|| {
            let a_time = parse_timestamp(&a.updated_at);
            let b_time = parse_timestamp(&b.updated_at);
            b_time.cmp(&a_time)
        })
    });
    notes
}

/// Distinct categories across `notes`, sorted.
#[must_use]
pub fn collect_categories(notes: &[Note]) -> Vec<String> {
    notes
        .iter()
        .filter_map(|note| note.category.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Distinct tags across `notes`, sorted.
#[must_use]
pub fn collect_tags(notes: &[Note]) -> Vec<String> {
    notes
        .iter()
        .flat_map(|note| note.tags.iter().cloned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NoteDraft;
    use pretty_assertions::assert_eq;

    fn note(title: &str, content: &str, updated_at: &str) -> Note {
        let mut note = Note::from_draft(NoteDraft::new(title, content), "2024-01-01T00:00:00.000Z");
        note.updated_at = updated_at.to_string();
        note
    }

    fn titles(notes: &[Note]) -> Vec<&str> {
        notes.iter().map(|note| note.title.as_str()).collect()
    }

    #[test]
    fn sorts_pinned_first_then_recent() {
        let old = note("old", "x", "2024-01-02T00:00:00.000Z");
        let new = note("new", "x", "2024-01-03T00:00:00.000Z");
        let mut pinned_old = note("pinned", "x", "2024-01-01T00:00:00.000Z");
        pinned_old.pinned = true;

        let sorted = sort_for_display(vec![old, pinned_old, new]);
        assert_eq!(titles(&sorted), vec!["pinned", "new", "old"]);
    }

    #[test]
    fn default_filter_hides_archived() {
        let active = note("active", "x", "2024-01-02T00:00:00.000Z");
        let mut archived = note("archived", "x", "2024-01-03T00:00:00.000Z");
        archived.archived = true;
        let notes = vec![active, archived];

        let visible = filter_notes(&notes, &NoteFilter::default());
        assert_eq!(titles(&visible), vec!["active"]);

        let archived_view = filter_notes(
            &notes,
            &NoteFilter {
                show_archived: true,
                ..NoteFilter::default()
            },
        );
        assert_eq!(titles(&archived_view), vec!["archived"]);
    }

    #[test]
    fn text_matches_title_or_content_case_insensitively() {
        let notes = vec![
            note("Project kickoff", "tomorrow", "2024-01-03T00:00:00.000Z"),
            note("Errands", "buy PROJECTOR bulb", "2024-01-02T00:00:00.000Z"),
            note("Other", "nothing", "2024-01-01T00:00:00.000Z"),
        ];
        let filter = NoteFilter {
            text: Some("  project ".to_string()),
            ..NoteFilter::default()
        };

        assert_eq!(
            titles(&filter_notes(&notes, &filter)),
            vec!["Project kickoff", "Errands"]
        );
    }

    #[test]
    fn category_and_tag_filters_combine() {
        let mut work_urgent = note("a", "x", "2024-01-03T00:00:00.000Z");
        work_urgent.category = Some("Work".to_string());
        work_urgent.tags = vec!["urgent".to_string()];
        let mut work_only = note("b", "x", "2024-01-02T00:00:00.000Z");
        work_only.category = Some("Work".to_string());
        let mut home_urgent = note("c", "x", "2024-01-01T00:00:00.000Z");
        home_urgent.category = Some("Home".to_string());
        home_urgent.tags = vec!["urgent".to_string()];
        let notes = vec![work_urgent, work_only, home_urgent];

        let filter = NoteFilter {
            category: Some("work".to_string()),
            tag: Some("urgent".to_string()),
            ..NoteFilter::default()
        };
        assert_eq!(titles(&filter_notes(&notes, &filter)), vec!["a"]);
    }

    #[test]
    fn tag_filter_is_exact() {
        let mut tagged = note("a", "x", "2024-01-01T00:00:00.000Z");
        tagged.tags = vec!["Urgent".to_string()];

        let filter = NoteFilter {
            tag: Some("urgent".to_string()),
            ..NoteFilter::default()
        };
        assert!(!filter.matches(&tagged));
    }

    #[test]
    fn collects_sorted_unique_facets() {
        let mut a = note("a", "x", "2024-01-01T00:00:00.000Z");
        a.category = Some("Work".to_string());
        a.tags = vec!["zeta".to_string(), "alpha".to_string()];
        let mut b = note("b", "x", "2024-01-01T00:00:00.000Z");
        b.category = Some("Home".to_string());
        b.tags = vec!["alpha".to_string()];
        let c = note("c", "x", "2024-01-01T00:00:00.000Z");
        let notes = vec![a, b, c];

        assert_eq!(collect_categories(&notes), vec!["Home", "Work"]);
        assert_eq!(collect_tags(&notes), vec!["alpha", "zeta"]);
    }
}
