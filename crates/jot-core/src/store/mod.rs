//! Shared in-memory notes store.
//!
//! The store is the single authority for the note list within a session.
//! Its state lives in a `watch` channel: every mutation notifies subscribers,
//! and readers get snapshots without holding anything across an await.
//!
//! Failure handling differs by action. `fetch_notes` and `delete_note` log
//! and swallow errors, while `create_note` and `update_note` return them to
//! the caller. Front ends rely on that split, so keep it.

mod filter;


use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use tokio::sync::watch;

use crate::api::{HttpNotesApi, NotesApi};
use crate::error::Result;
use crate::models::{Note, NoteCreateRequest, NoteId};

pub use filter::filter_notes;

/// Snapshot of everything the store tracks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreState {
    /// Notes in display order
    pub notes: Vec<Note>,
    /// A full-list fetch is in flight
    pub loading: bool,
    /// A create or update is in flight
    pub saving: bool,
    /// Raw search text as entered
    pub search: String,
}

impl StoreState {
    /// Notes matching the current search.
    pub fn filtered_notes(&self) -> Cow<'_, [Note]> {
        filter_notes(&self.notes, &self.search)
    }
}

/// Cloneable handle to the shared notes store.
#[derive(Clone)]
pub struct NotesStore {
    api: Arc<dyn NotesApi>,
    state: Arc<watch::Sender<StoreState>>,
}

impl fmt::Debug for NotesStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NotesStore")
            .field("state", &*self.state.borrow())
            .finish_non_exhaustive()
    }
}

impl NotesStore {
    pub fn new(api: impl NotesApi + 'static) -> Self {
        let (state, _) = watch::channel(StoreState::default());
        Self {
            api: Arc::new(api),
            state: Arc::new(state),
        }
    }

    /// Store backed by [`HttpNotesApi`] configured from the environment.
    pub fn from_env() -> Result<Self> {
        Ok(Self::new(HttpNotesApi::from_env()?))
    }

    pub fn notes(&self) -> Vec<Note> {
        self.state.borrow().notes.clone()
    }

    /// Look up a loaded note by id.
    pub fn note(&self, id: &NoteId) -> Option<Note> {
        self.state
            .borrow()
            .notes
            .iter()
            .find(|note| &note.id == id)
            .cloned()
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().loading
    }

    pub fn is_saving(&self) -> bool {
        self.state.borrow().saving
    }

    pub fn search(&self) -> String {
        self.state.borrow().search.clone()
    }

    pub fn snapshot(&self) -> StoreState {
        self.state.borrow().clone()
    }

    /// Receiver that is marked changed after every state mutation.
    pub fn subscribe(&self) -> watch::Receiver<StoreState> {
        self.state.subscribe()
    }

    /// Notes matching the current search, recomputed on each call.
    pub fn filtered_notes(&self) -> Vec<Note> {
        self.state.borrow().filtered_notes().into_owned()
    }

    /// Replace the local list with the service's list.
    ///
    /// Errors are logged and the current list is kept.
    pub async fn fetch_notes(&self) {
        let _loading = BusyGuard::acquire(&self.state, BusyFlag::Loading);

        match self.api.list().await {
            Ok(notes) => {
                tracing::debug!(count = notes.len(), "fetched notes");
                self.state.send_modify(|state| state.notes = notes);
            }
            Err(error) => tracing::error!(%error, "failed to fetch notes"),
        }
    }

    /// Create a note and put it at the top of the list.
    pub async fn create_note(&self, payload: &NoteCreateRequest) -> Result<Note> {
        let _saving = BusyGuard::acquire(&self.state, BusyFlag::Saving);

        let created = self.api.create(payload).await?;
        self.state.send_modify(|state| {
            // A repeated id would break one-entry-per-id; keep only the new copy.
            if let Some(index) = position_of(&state.notes, &created.id) {
                tracing::warn!(note_id = %created.id, "service returned an id already in the list");
                state.notes.remove(index);
            }
            state.notes.insert(0, created.clone());
        });
        Ok(created)
    }

    /// Update a note and replace the local copy in place.
    ///
    /// When `id` is not loaded locally the list is left alone until the next
    /// fetch.
    pub async fn update_note(&self, id: &NoteId, payload: &NoteCreateRequest) -> Result<Note> {
        let _saving = BusyGuard::acquire(&self.state, BusyFlag::Saving);

        let updated = self.api.update(id, payload).await?;
        self.state
            .send_if_modified(|state| match position_of(&state.notes, id) {
                Some(index) => {
                    state.notes[index] = updated.clone();
                    true
                }
                None => {
                    tracing::debug!(note_id = %id, "updated note is not loaded locally");
                    false
                }
            });
        Ok(updated)
    }

    /// Delete a note and drop it from the list.
    ///
    /// Errors are logged and the list is kept.
    pub async fn delete_note(&self, id: &NoteId) {
        match self.api.remove(id).await {
            Ok(()) => {
                self.state
                    .send_if_modified(|state| match position_of(&state.notes, id) {
                        Some(index) => {
                            state.notes.remove(index);
                            true
                        }
                        None => false,
                    });
            }
            Err(error) => tracing::error!(%error, note_id = %id, "failed to delete note"),
        }
    }

    pub fn set_search(&self, query: impl Into<String>) {
        let query = query.into();
        self.state.send_modify(|state| state.search = query);
    }
}

fn position_of(notes: &[Note], id: &NoteId) -> Option<usize> {
    notes.iter().position(|note| &note.id == id)
}

#[derive(Debug, Clone, Copy)]
enum BusyFlag {
    Loading,
    Saving,
}

impl BusyFlag {
    fn set(self, state: &mut StoreState, value: bool) {
        match self {
            Self::Loading => state.loading = value,
            Self::Saving => state.saving = value,
        }
    }
}

/// Raises a busy flag and lowers it again on drop, including early returns
/// through `?`.
struct BusyGuard<'a> {
    state: &'a watch::Sender<StoreState>,
    flag: BusyFlag,
}

impl<'a> BusyGuard<'a> {
    fn acquire(state: &'a watch::Sender<StoreState>, flag: BusyFlag) -> Self {
        state.send_modify(|current| flag.set(current, true));
        Self { state, flag }
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        let flag = self.flag;
        self.state.send_modify(|current| flag.set(current, false));
    }
}
