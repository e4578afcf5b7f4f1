//! Single-owner browsing session: search coordination, selection,
//! debounced taxon autocomplete, and the actor that serialises all of it.
//!
//! [`Session::spawn`] starts the actor and returns a cloneable
//! [`SessionHandle`]. Every mutation goes through the handle; readers see
//! immutable [`BrowserState`] snapshots.

pub mod autocomplete;
pub mod coordinator;
pub mod debounce;
pub mod present;
pub mod selection;
pub mod session;
pub mod source;

#[cfg(test)]
pub(crate) mod test_support;

pub use autocomplete::{AutocompleteState, MIN_QUERY_CHARS, SUGGESTION_DEBOUNCE};
pub use coordinator::{
    Completion, FetchTicket, SearchCoordinator, SearchStatus, FETCH_FAILED_MESSAGE,
};
pub use debounce::Debouncer;
pub use present::{ListPanel, MapPanel, Presentation};
pub use selection::Selection;
pub use session::{BrowserState, Session, SessionError, SessionHandle};
pub use source::SightingSource;
