//! The session actor.
//!
//! One task owns the coordinator and autocomplete state. Commands from
//! [`SessionHandle`]s and completion events from spawned network tasks are
//! handled one at a time, and after each the actor publishes a fresh
//! [`BrowserState`] on a watch channel.

use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;
use tokio::sync::{mpsc, oneshot, watch};
use whaletrack_core::{
    CriteriaError, SearchCriteria, SearchResult, SelectionError, Sighting, SightingId,
    TaxonSuggestion,
};

use crate::autocomplete::{AutocompleteState, SUGGESTION_DEBOUNCE};
use crate::coordinator::{FetchTicket, SearchCoordinator, SearchStatus};
use crate::debounce::Debouncer;
use crate::source::SightingSource;

const COMMAND_BUFFER: usize = 32;
const EVENT_BUFFER: usize = 32;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session is closed")]
    Closed,

    #[error(transparent)]
    Criteria(#[from] CriteriaError),

    #[error(transparent)]
    Selection(#[from] SelectionError),
}

/// Immutable snapshot of everything a presentation layer reads.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BrowserState {
    pub criteria: SearchCriteria,
    pub status: SearchStatus,
    pub result: SearchResult,
    pub selected: Option<Sighting>,
    pub autocomplete: AutocompleteState,
}

type Reply<T> = oneshot::Sender<T>;

enum Command {
    SubmitSearch {
        taxon_name: String,
        date_from: Option<NaiveDate>,
        date_to: Option<NaiveDate>,
        reply: Reply<Result<BrowserState, CriteriaError>>,
    },
    ChangePage {
        page_number: u32,
        reply: Reply<Result<BrowserState, CriteriaError>>,
    },
    Select {
        id: Option<SightingId>,
        reply: Reply<Result<BrowserState, SelectionError>>,
    },
    InputTaxon {
        text: String,
        reply: Reply<BrowserState>,
    },
    ChooseSuggestion {
        id: i64,
        reply: Reply<Option<String>>,
    },
    Suggest {
        query: String,
        reply: Reply<Vec<TaxonSuggestion>>,
    },
    Shutdown {
        reply: Reply<()>,
    },
}

enum Event {
    SearchFinished {
        seq: u64,
        outcome: Result<SearchResult, String>,
    },
    SuggestionDue {
        query: String,
    },
    SuggestionsFetched {
        generation: u64,
        query: String,
        suggestions: Vec<TaxonSuggestion>,
    },
}

pub struct Session<S: SightingSource> {
    source: Arc<S>,
    coordinator: SearchCoordinator,
    autocomplete: AutocompleteState,
    debouncer: Debouncer,
    events: mpsc::Sender<Event>,
    state: watch::Sender<BrowserState>,
}

impl<S: SightingSource> Session<S> {
    /// Starts a session on `criteria`, kicks off the initial fetch, and
    /// returns a handle to it. Must be called inside a tokio runtime.
    ///
    /// The actor stops once every handle has been dropped.
    pub fn spawn(source: Arc<S>, criteria: SearchCriteria) -> SessionHandle {
        let (command_tx, command_rx) = mpsc::channel(COMMAND_BUFFER);
        let (event_tx, event_rx) = mpsc::channel(EVENT_BUFFER);

        let coordinator = SearchCoordinator::new(criteria);
        let autocomplete = AutocompleteState::new(&coordinator.criteria().taxon_name);
        let initial = snapshot(&coordinator, &autocomplete);
        let (state_tx, state_rx) = watch::channel(initial);

        let mut session = Self {
            source,
            coordinator,
            autocomplete,
            debouncer: Debouncer::new(SUGGESTION_DEBOUNCE),
            events: event_tx,
            state: state_tx,
        };

        tracing::info!(
            taxon_name = %session.coordinator.criteria().taxon_name,
            "session started"
        );
        let ticket = session.coordinator.start();
        session.spawn_search(ticket);
        session.publish();

        tokio::spawn(session.run(command_rx, event_rx));

        SessionHandle {
            commands: command_tx,
            state: state_rx,
        }
    }

    async fn run(
        mut self,
        mut commands: mpsc::Receiver<Command>,
        mut events: mpsc::Receiver<Event>,
    ) {
        loop {
            tokio::select! {
                command = commands.recv() => match command {
                    Some(Command::Shutdown { reply }) => {
                        let _ = reply.send(());
                        break;
                    }
                    Some(command) => self.handle_command(command),
                    None => break,
                },
                Some(event) = events.recv() => {
                    self.handle_event(event);
                    self.publish();
                }
            }
        }
        tracing::info!("session closed");
    }

    fn handle_command(&mut self, command: Command) {
        match command {
            Command::SubmitSearch {
                taxon_name,
                date_from,
                date_to,
                reply,
            } => {
                let today = chrono::Local::now().date_naive();
                let outcome = match self
                    .coordinator
                    .submit_search(&taxon_name, date_from, date_to, today)
                {
                    Ok(ticket) => {
                        self.debouncer.cancel();
                        self.autocomplete.on_submit(&ticket.criteria.taxon_name);
                        self.spawn_search(ticket);
                        Ok(())
                    }
                    Err(e) => Err(e),
                };
                self.respond(reply, outcome);
            }
            Command::ChangePage { page_number, reply } => {
                let outcome = self
                    .coordinator
                    .change_page(page_number)
                    .map(|ticket| self.spawn_search(ticket));
                self.respond(reply, outcome);
            }
            Command::Select { id, reply } => {
                let outcome = self.coordinator.select(id);
                self.respond(reply, outcome);
            }
            Command::InputTaxon { text, reply } => {
                match self.autocomplete.on_input(&text) {
                    Some(query) => {
                        let events = self.events.clone();
                        self.debouncer.schedule(async move {
                            // The receiver only goes away with the session itself.
                            let _ = events.send(Event::SuggestionDue { query }).await;
                        });
                    }
                    None => self.debouncer.cancel(),
                }
                let state = self.publish();
                let _ = reply.send(state);
            }
            Command::ChooseSuggestion { id, reply } => {
                let label = self.autocomplete.choose(id);
                if label.is_some() {
                    self.debouncer.cancel();
                }
                self.publish();
                let _ = reply.send(label);
            }
            Command::Suggest { query, reply } => {
                let source = Arc::clone(&self.source);
                tokio::spawn(async move {
                    let suggestions = source.suggest(&query).await;
                    let _ = reply.send(suggestions);
                });
            }
            Command::Shutdown { reply } => {
                let _ = reply.send(());
            }
        }
    }

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::SearchFinished { seq, outcome } => {
                self.coordinator.complete(seq, outcome);
            }
            Event::SuggestionDue { query } => {
                if let Some(generation) = self.autocomplete.lookup_started(&query) {
                    self.spawn_suggest(generation, query);
                } else {
                    tracing::debug!(query, "input changed before suggestion lookup");
                }
            }
            Event::SuggestionsFetched {
                generation,
                query,
                suggestions,
            } => {
                let count = suggestions.len();
                if self.autocomplete.apply(generation, &query, suggestions) {
                    tracing::debug!(query, count, "suggestions applied");
                } else {
                    tracing::debug!(query, "discarding stale suggestions");
                }
            }
        }
    }

    fn spawn_search(&self, ticket: FetchTicket) {
        let source = Arc::clone(&self.source);
        let events = self.events.clone();
        tokio::spawn(async move {
            let outcome = source
                .search(&ticket.criteria)
                .await
                .map_err(|e| e.to_string());
            let finished = Event::SearchFinished {
                seq: ticket.seq,
                outcome,
            };
            if events.send(finished).await.is_err() {
                tracing::debug!(seq = ticket.seq, "session closed before search finished");
            }
        });
    }

    fn spawn_suggest(&self, generation: u64, query: String) {
        let source = Arc::clone(&self.source);
        let events = self.events.clone();
        tokio::spawn(async move {
            let suggestions = source.suggest(&query).await;
            let fetched = Event::SuggestionsFetched {
                generation,
                query,
                suggestions,
            };
            let _ = events.send(fetched).await;
        });
    }

    /// Publishes the current state, then answers the caller with it.
    fn respond<E>(&self, reply: Reply<Result<BrowserState, E>>, outcome: Result<(), E>) {
        let state = self.publish();
        let _ = reply.send(outcome.map(|()| state));
    }

    fn publish(&self) -> BrowserState {
        let state = snapshot(&self.coordinator, &self.autocomplete);
        self.state.send_replace(state.clone());
        state
    }
}

fn snapshot(coordinator: &SearchCoordinator, autocomplete: &AutocompleteState) -> BrowserState {
    BrowserState {
        criteria: coordinator.criteria().clone(),
        status: coordinator.status().clone(),
        result: coordinator.result().clone(),
        selected: coordinator.selected().cloned(),
        autocomplete: autocomplete.clone(),
    }
}

/// Cloneable front door to a running [`Session`].
#[derive(Debug, Clone)]
pub struct SessionHandle {
    commands: mpsc::Sender<Command>,
    state: watch::Receiver<BrowserState>,
}

impl SessionHandle {
    /// Starts a new search on page 1, clearing the selection.
    ///
    /// # Errors
    ///
    /// [`SessionError::Criteria`] if the input is rejected (nothing changes),
    /// [`SessionError::Closed`] if the session has stopped.
    pub async fn submit_search(
        &self,
        taxon_name: &str,
        date_from: Option<NaiveDate>,
        date_to: Option<NaiveDate>,
    ) -> Result<BrowserState, SessionError> {
        let taxon_name = taxon_name.to_string();
        Ok(self
            .request(|reply| Command::SubmitSearch {
                taxon_name,
                date_from,
                date_to,
                reply,
            })
            .await??)
    }

    /// Moves to `page_number` keeping taxon and dates, clearing the selection.
    ///
    /// # Errors
    ///
    /// [`SessionError::Criteria`] for page 0, [`SessionError::Closed`] if the
    /// session has stopped.
    pub async fn change_page(&self, page_number: u32) -> Result<BrowserState, SessionError> {
        Ok(self
            .request(|reply| Command::ChangePage { page_number, reply })
            .await??)
    }

    /// Sets (`Some`) or clears (`None`) the active sighting.
    ///
    /// # Errors
    ///
    /// [`SessionError::Selection`] if `id` is not in the current result,
    /// [`SessionError::Closed`] if the session has stopped.
    pub async fn select(&self, id: Option<SightingId>) -> Result<BrowserState, SessionError> {
        Ok(self.request(|reply| Command::Select { id, reply }).await??)
    }

    /// Records taxon input; a suggestion lookup follows once the input has
    /// been quiet for the debounce interval.
    ///
    /// # Errors
    ///
    /// [`SessionError::Closed`] if the session has stopped.
    pub async fn input_taxon(&self, text: &str) -> Result<BrowserState, SessionError> {
        let text = text.to_string();
        self.request(|reply| Command::InputTaxon { text, reply })
            .await
    }

    /// Picks a suggestion from the current list. Returns its label, or
    /// `None` if no suggestion has that id.
    ///
    /// # Errors
    ///
    /// [`SessionError::Closed`] if the session has stopped.
    pub async fn choose_suggestion(&self, id: i64) -> Result<Option<String>, SessionError> {
        self.request(|reply| Command::ChooseSuggestion { id, reply })
            .await
    }

    /// Immediate suggestion lookup, bypassing the debounce and the
    /// autocomplete state.
    ///
    /// # Errors
    ///
    /// [`SessionError::Closed`] if the session has stopped.
    pub async fn suggest(&self, query: &str) -> Result<Vec<TaxonSuggestion>, SessionError> {
        let query = query.to_string();
        self.request(|reply| Command::Suggest { query, reply })
            .await
    }

    /// The latest published snapshot.
    #[must_use]
    pub fn state(&self) -> BrowserState {
        self.state.borrow().clone()
    }

    /// A receiver that observes every published snapshot.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<BrowserState> {
        self.state.clone()
    }

    /// Stops the actor. Later calls on any handle fail with
    /// [`SessionError::Closed`].
    ///
    /// # Errors
    ///
    /// [`SessionError::Closed`] if the session had already stopped.
    pub async fn shutdown(&self) -> Result<(), SessionError> {
        self.request(|reply| Command::Shutdown { reply }).await
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.commands.is_closed()
    }

    async fn request<T>(
        &self,
        command: impl FnOnce(Reply<T>) -> Command,
    ) -> Result<T, SessionError> {
        let (reply, response) = oneshot::channel();
        self.commands
            .send(command(reply))
            .await
            .map_err(|_| SessionError::Closed)?;
        response.await.map_err(|_| SessionError::Closed)
    }
}
