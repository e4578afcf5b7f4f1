//! Taxon input and suggestion list state.
//!
//! Pure bookkeeping: timing lives in [`crate::debounce`] and the network in
//! [`crate::source`]. A suggestion set is applied only while the query it
//! answers still equals the current input and no submit, choice, or newer
//! keystroke has happened since its lookup started.

use std::time::Duration;

use serde::Serialize;
use whaletrack_core::{TaxonSuggestion, DEFAULT_TAXON_NAME};

/// Inputs shorter than this (after trimming) clear the list instead of
/// scheduling a lookup.
pub const MIN_QUERY_CHARS: usize = 2;

pub const SUGGESTION_DEBOUNCE: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AutocompleteState {
    input: String,
    suggestions: Vec<TaxonSuggestion>,
    visible: bool,
    loading: bool,
    #[serde(skip)]
    generation: u64,
}

impl Default for AutocompleteState {
    fn default() -> Self {
        Self::new(DEFAULT_TAXON_NAME)
    }
}

impl AutocompleteState {
    #[must_use]
    pub fn new(input: &str) -> Self {
        Self {
            input: input.to_string(),
            suggestions: Vec::new(),
            visible: false,
            loading: false,
            generation: 0,
        }
    }

    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }

    #[must_use]
    pub fn suggestions(&self) -> &[TaxonSuggestion] {
        &self.suggestions
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Records new input text. Returns the query to look up once the input
    /// settles, or `None` when the text is too short, in which case the
    /// list is cleared and hidden right away.
    pub fn on_input(&mut self, text: &str) -> Option<String> {
        self.generation += 1;
        text.clone_into(&mut self.input);
        if text.trim().chars().count() < MIN_QUERY_CHARS {
            self.suggestions.clear();
            self.visible = false;
            self.loading = false;
            return None;
        }
        Some(text.to_string())
    }

    /// Marks a lookup for `query` as in flight and returns the generation
    /// its answer must carry. `None` if the input has moved on and the
    /// lookup should not run.
    pub fn lookup_started(&mut self, query: &str) -> Option<u64> {
        if query != self.input {
            return None;
        }
        self.loading = true;
        Some(self.generation)
    }

    /// Applies suggestions for `query` looked up at `generation`. Returns
    /// `false` and changes nothing if the input no longer matches or the
    /// list has been dismissed since.
    pub fn apply(
        &mut self,
        generation: u64,
        query: &str,
        suggestions: Vec<TaxonSuggestion>,
    ) -> bool {
        if generation != self.generation || query != self.input {
            return false;
        }
        self.loading = false;
        self.visible = !suggestions.is_empty();
        self.suggestions = suggestions;
        true
    }

    /// Puts the chosen suggestion's label into the input and hides the
    /// list. Returns the label, or `None` if `id` is not on offer.
    pub fn choose(&mut self, id: i64) -> Option<String> {
        let label = self
            .suggestions
            .iter()
            .find(|s| s.id == id)?
            .display_label()
            .to_string();
        label.clone_into(&mut self.input);
        self.dismiss();
        Some(label)
    }

    /// Syncs the input with a submitted search and hides the list.
    pub fn on_submit(&mut self, taxon_name: &str) {
        taxon_name.clone_into(&mut self.input);
        self.dismiss();
    }

    fn dismiss(&mut self) {
        self.generation += 1;
        self.visible = false;
        self.loading = false;
    }
}
