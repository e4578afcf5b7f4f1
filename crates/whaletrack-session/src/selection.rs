//! The active sighting, held by id and resolved against the current result.

use whaletrack_core::{SearchResult, Sighting, SightingId};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    current: Option<SightingId>,
}

impl Selection {
    pub fn select(&mut self, sighting: &Sighting) {
        self.current = Some(sighting.id);
    }

    pub fn clear(&mut self) {
        self.current = None;
    }

    #[must_use]
    pub fn id(&self) -> Option<SightingId> {
        self.current
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.current.is_none()
    }

    /// The selected sighting within `result`, if it is still there.
    #[must_use]
    pub fn resolve<'a>(&self, result: &'a SearchResult) -> Option<&'a Sighting> {
        self.current.and_then(|id| result.find(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{result_of, sighting};

    #[test]
    fn starts_empty() {
        let selection = Selection::default();
        assert!(selection.is_empty());
        assert_eq!(selection.id(), None);
    }

    #[test]
    fn select_then_clear() {
        let mut selection = Selection::default();
        selection.select(&sighting(4));
        assert_eq!(selection.id(), Some(SightingId(4)));
        selection.clear();
        assert!(selection.is_empty());
    }

    #[test]
    fn resolve_finds_sighting_in_result() {
        let result = result_of(&[1, 2, 3], 3);
        let mut selection = Selection::default();
        selection.select(&sighting(2));
        assert_eq!(selection.resolve(&result).map(|s| s.id), Some(SightingId(2)));
    }

    #[test]
    fn resolve_misses_sighting_from_another_result() {
        let result = result_of(&[1, 2, 3], 3);
        let mut selection = Selection::default();
        selection.select(&sighting(99));
        assert!(selection.resolve(&result).is_none());
    }
}
