//! Dual-list technology picker.
//!
//! The left list holds every technology in the catalog, the right list the
//! ids the user has moved across. Each side has its own highlight cursor;
//! the move operations act on whatever the cursor points at. After every
//! change the owner is handed the full ordered selection through the
//! `on_selection_change` callback.

use crate::api::Technology;
use crate::error::ApiResult;
use crate::loadable::Loadable;
use crate::log;

pub const ALREADY_SELECTED_NOTICE: &str = "This technology is already selected.";

/// One entry of the candidate list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TechOption {
    pub value: String,
    pub label: String,
}

impl TechOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }

    fn from_technology(tech: Technology) -> Option<Self> {
        use crate::api::Resource;
        let value = tech.key()?;
        Some(Self {
            value,
            label: tech.tech_description,
        })
    }
}

/// Receives the ordered selection after every change.
pub type SelectionCallback = Box<dyn FnMut(&[String]) + Send>;

/// Result of [`TechnologySelector::commit_selection`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    Committed,
    AlreadySelected,
    NothingHighlighted,
}

/// Result of [`TechnologySelector::remove_selection`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveOutcome {
    Removed,
    NothingHighlighted,
}

pub struct TechnologySelector {
    catalog: Loadable<Vec<TechOption>>,
    selected: Vec<String>,
    candidate: Option<String>,
    highlighted_selection: Option<String>,
    on_selection_change: SelectionCallback,
}

impl std::fmt::Debug for TechnologySelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TechnologySelector")
            .field("catalog", &self.catalog)
            .field("selected", &self.selected)
            .field("candidate", &self.candidate)
            .field("highlighted_selection", &self.highlighted_selection)
            .finish_non_exhaustive()
    }
}

impl TechnologySelector {
    pub fn new(on_selection_change: impl FnMut(&[String]) + Send + 'static) -> Self {
        Self {
            catalog: Loadable::Idle,
            selected: Vec::new(),
            candidate: None,
            highlighted_selection: None,
            on_selection_change: Box::new(on_selection_change),
        }
    }

    /// Mark the catalog fetch as in flight.
    pub fn begin_loading(&mut self) {
        if self.catalog.is_idle() {
            self.catalog = Loadable::Loading;
        }
    }

    /// Settle the catalog fetch. The catalog is populated at most once; a
    /// failure leaves the left list empty and is only logged.
    pub fn apply_catalog(&mut self, result: ApiResult<Vec<Technology>>) {
        if self.catalog.is_loaded() {
            return;
        }
        match result {
            Ok(techs) => {
                let options: Vec<TechOption> = techs
                    .into_iter()
                    .filter_map(TechOption::from_technology)
                    .collect();
                log::log(&format!("Loaded {} technologies", options.len()));
                self.catalog = Loadable::Loaded(options);
            }
            Err(e) => {
                log::log(&format!("Error fetching technologies: {}", e));
                self.catalog = Loadable::Failed(e.to_string());
            }
        }
    }

    pub fn catalog_state(&self) -> &Loadable<Vec<TechOption>> {
        &self.catalog
    }

    /// Candidate list (empty until the catalog has loaded).
    pub fn options(&self) -> &[TechOption] {
        self.catalog.items()
    }

    /// Ordered ids the user has chosen.
    pub fn selected(&self) -> &[String] {
        &self.selected
    }

    pub fn candidate(&self) -> Option<&str> {
        self.candidate.as_deref()
    }

    pub fn highlighted_selection(&self) -> Option<&str> {
        self.highlighted_selection.as_deref()
    }

    /// Row of the highlighted candidate in `options()`.
    pub fn candidate_index(&self) -> Option<usize> {
        let id = self.candidate()?;
        self.options().iter().position(|o| o.value == id)
    }

    /// Row of the highlighted id in `selected()`.
    pub fn selection_index(&self) -> Option<usize> {
        let id = self.highlighted_selection()?;
        self.selected.iter().position(|s| s == id)
    }

    pub fn label_for(&self, id: &str) -> Option<&str> {
        self.options()
            .iter()
            .find(|o| o.value == id)
            .map(|o| o.label.as_str())
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.iter().any(|s| s == id)
    }

    /// Shown while the highlighted candidate is already on the right.
    pub fn notice(&self) -> Option<&'static str> {
        self.candidate
            .as_deref()
            .filter(|id| self.is_selected(id))
            .map(|_| ALREADY_SELECTED_NOTICE)
    }

    /// Highlight `id` in the candidate list. Ids outside the catalog are
    /// ignored; returns whether the cursor moved.
    pub fn select_candidate(&mut self, id: &str) -> bool {
        if !self.options().iter().any(|o| o.value == id) {
            return false;
        }
        self.candidate = Some(id.to_string());
        true
    }

    /// Move the highlighted candidate to the end of the selection.
    pub fn commit_selection(&mut self) -> CommitOutcome {
        let Some(id) = self.candidate.as_deref() else {
            return CommitOutcome::NothingHighlighted;
        };
        if self.is_selected(id) {
            return CommitOutcome::AlreadySelected;
        }

        if let Some(id) = self.candidate.take() {
            self.selected.push(id);
        }
        self.notify();
        CommitOutcome::Committed
    }

    /// Highlight `id` in the selected list. Ids not currently selected are
    /// ignored; returns whether the cursor moved.
    pub fn select_selected(&mut self, id: &str) -> bool {
        if !self.is_selected(id) {
            return false;
        }
        self.highlighted_selection = Some(id.to_string());
        true
    }

    /// Drop the highlighted id from the selection.
    pub fn remove_selection(&mut self) -> RemoveOutcome {
        let Some(id) = self.highlighted_selection.take() else {
            return RemoveOutcome::NothingHighlighted;
        };
        self.selected.retain(|s| *s != id);
        self.notify();
        RemoveOutcome::Removed
    }

    /// Highlight the candidate after the current one (wraps around).
    pub fn candidate_next(&mut self) {
        if let Some(id) = step(self.options().iter().map(|o| &o.value), self.candidate(), 1) {
            self.select_candidate(&id);
        }
    }

    /// Highlight the candidate before the current one (wraps around).
    pub fn candidate_prev(&mut self) {
        if let Some(id) = step(self.options().iter().map(|o| &o.value), self.candidate(), -1) {
            self.select_candidate(&id);
        }
    }

    pub fn selected_next(&mut self) {
        if let Some(id) = step(self.selected.iter(), self.highlighted_selection(), 1) {
            self.select_selected(&id);
        }
    }

    pub fn selected_prev(&mut self) {
        if let Some(id) = step(self.selected.iter(), self.highlighted_selection(), -1) {
            self.select_selected(&id);
        }
    }

    fn notify(&mut self) {
        (self.on_selection_change)(&self.selected);
    }
}

/// Id next to `current` in `ids`; the first (or last) id when nothing is
/// highlighted.
fn step<'a>(
    ids: impl Iterator<Item = &'a String>,
    current: Option<&str>,
    direction: isize,
) -> Option<String> {
    let ids: Vec<&String> = ids.collect();
    if ids.is_empty() {
        return None;
    }
    let len = ids.len() as isize;
    let index = match current.and_then(|c| ids.iter().position(|id| *id == c)) {
        Some(pos) => (pos as isize + direction).rem_euclid(len),
        None if direction >= 0 => 0,
        None => len - 1,
    };
    Some(ids[index as usize].clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;
    use std::sync::{Arc, Mutex};

    type Calls = Arc<Mutex<Vec<Vec<String>>>>;

    fn tech(id: i64, label: &str) -> Technology {
        Technology {
            id: Some(id),
            tech_id: Some(id),
            tech_description: label.to_string(),
        }
    }

    fn selector_with(catalog: Vec<Technology>) -> (TechnologySelector, Calls) {
        let calls: Calls = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&calls);
        let mut selector = TechnologySelector::new(move |ids| {
            sink.lock().unwrap().push(ids.to_vec());
        });
        selector.begin_loading();
        selector.apply_catalog(Ok(catalog));
        (selector, calls)
    }

    fn ids(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_catalog_maps_to_options() {
        let (selector, _) = selector_with(vec![tech(1, "Java"), tech(2, "Go")]);
        assert_eq!(
            selector.options(),
            &[TechOption::new("1", "Java"), TechOption::new("2", "Go")]
        );
        assert_eq!(selector.label_for("2"), Some("Go"));
    }

    #[test]
    fn test_distinct_commits_keep_commit_order() {
        let (mut selector, calls) =
            selector_with(vec![tech(1, "Java"), tech(2, "Go"), tech(3, "Rust")]);

        for id in ["3", "1", "2"] {
            assert!(selector.select_candidate(id));
            assert_eq!(selector.commit_selection(), CommitOutcome::Committed);
        }

        assert_eq!(selector.selected(), ids(&["3", "1", "2"]).as_slice());
        assert_eq!(calls.lock().unwrap().len(), 3);
    }

    #[test]
    fn test_commit_clears_candidate() {
        let (mut selector, _) = selector_with(vec![tech(1, "Java")]);
        selector.select_candidate("1");
        selector.commit_selection();
        assert_eq!(selector.candidate(), None);
    }

    #[test]
    fn test_committing_same_id_twice_is_idempotent() {
        let (mut selector, calls) = selector_with(vec![tech(1, "Java")]);

        selector.select_candidate("1");
        assert_eq!(selector.commit_selection(), CommitOutcome::Committed);
        selector.select_candidate("1");
        assert_eq!(selector.notice(), Some(ALREADY_SELECTED_NOTICE));
        assert_eq!(selector.commit_selection(), CommitOutcome::AlreadySelected);

        assert_eq!(selector.selected(), ids(&["1"]).as_slice());
        assert_eq!(calls.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_commit_without_candidate_is_noop() {
        let (mut selector, calls) = selector_with(vec![tech(1, "Java")]);
        assert_eq!(selector.commit_selection(), CommitOutcome::NothingHighlighted);
        assert!(selector.selected().is_empty());
        assert!(calls.lock().unwrap().is_empty());
        assert_eq!(selector.notice(), None);
    }

    #[test]
    fn test_remove_without_highlight_is_noop() {
        let (mut selector, calls) = selector_with(vec![tech(1, "Java"), tech(2, "Go")]);
        selector.select_candidate("1");
        selector.commit_selection();

        assert_eq!(selector.remove_selection(), RemoveOutcome::NothingHighlighted);
        assert_eq!(selector.selected(), ids(&["1"]).as_slice());
        assert_eq!(calls.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_commit_then_remove_round_trips_to_empty() {
        let (mut selector, calls) = selector_with(vec![tech(1, "Java")]);
        selector.select_candidate("1");
        selector.commit_selection();
        assert!(selector.select_selected("1"));
        assert_eq!(selector.remove_selection(), RemoveOutcome::Removed);

        assert!(selector.selected().is_empty());
        assert_eq!(selector.highlighted_selection(), None);
        assert_eq!(calls.lock().unwrap().last().unwrap(), &Vec::<String>::new());
    }

    #[test]
    fn test_java_go_scenario() {
        let (mut selector, calls) = selector_with(vec![tech(1, "Java"), tech(2, "Go")]);

        selector.select_candidate("1");
        selector.commit_selection();
        assert_eq!(selector.selected(), ids(&["1"]).as_slice());
        assert_eq!(*calls.lock().unwrap(), vec![ids(&["1"])]);

        selector.select_candidate("2");
        selector.commit_selection();
        assert_eq!(selector.selected(), ids(&["1", "2"]).as_slice());
        assert_eq!(calls.lock().unwrap().last().unwrap(), &ids(&["1", "2"]));

        selector.select_selected("1");
        selector.remove_selection();
        assert_eq!(selector.selected(), ids(&["2"]).as_slice());
        assert_eq!(calls.lock().unwrap().last().unwrap(), &ids(&["2"]));
        assert_eq!(calls.lock().unwrap().len(), 3);
    }

    #[test]
    fn test_cursor_rejects_unknown_ids() {
        let (mut selector, _) = selector_with(vec![tech(1, "Java")]);
        assert!(!selector.select_candidate("99"));
        assert_eq!(selector.candidate(), None);
        assert!(!selector.select_selected("1"));
        assert_eq!(selector.highlighted_selection(), None);
    }

    #[test]
    fn test_failed_catalog_leaves_selector_usable() {
        let calls: Calls = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&calls);
        let mut selector = TechnologySelector::new(move |ids| {
            sink.lock().unwrap().push(ids.to_vec());
        });
        selector.begin_loading();
        selector.apply_catalog(Err(ApiError::Decode("connection reset".to_string())));

        assert!(selector.options().is_empty());
        assert!(selector.catalog_state().error().is_some());
        assert!(!selector.select_candidate("1"));
        assert_eq!(selector.commit_selection(), CommitOutcome::NothingHighlighted);
        assert_eq!(selector.remove_selection(), RemoveOutcome::NothingHighlighted);
        assert!(calls.lock().unwrap().is_empty());
    }

    #[test]
    fn test_catalog_populates_once() {
        let (mut selector, _) = selector_with(vec![tech(1, "Java")]);
        selector.apply_catalog(Ok(vec![tech(2, "Go")]));
        assert_eq!(selector.options(), &[TechOption::new("1", "Java")]);
    }

    #[test]
    fn test_cursor_indices_follow_highlight() {
        let (mut selector, _) = selector_with(vec![tech(1, "Java"), tech(2, "Go")]);
        assert_eq!(selector.candidate_index(), None);
        selector.select_candidate("2");
        assert_eq!(selector.candidate_index(), Some(1));

        selector.commit_selection();
        selector.select_selected("2");
        assert_eq!(selector.selection_index(), Some(0));
        selector.remove_selection();
        assert_eq!(selector.selection_index(), None);
    }

    #[test]
    fn test_keyboard_stepping_wraps() {
        let (mut selector, _) = selector_with(vec![tech(1, "Java"), tech(2, "Go")]);
        selector.candidate_next();
        assert_eq!(selector.candidate(), Some("1"));
        selector.candidate_next();
        assert_eq!(selector.candidate(), Some("2"));
        selector.candidate_next();
        assert_eq!(selector.candidate(), Some("1"));
        selector.candidate_prev();
        assert_eq!(selector.candidate(), Some("2"));

        selector.commit_selection();
        selector.selected_prev();
        assert_eq!(selector.highlighted_selection(), Some("2"));
    }
}
