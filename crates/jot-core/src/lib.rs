//! jot-core - Core library for Jot
//!
//! This crate contains the note models, the REST client for the remote notes
//! service, and the shared in-memory notes store used by Jot front ends.

pub mod api;
pub mod config;
pub mod error;
pub mod layout;
pub mod models;
pub mod store;
pub mod util;

pub use api::{HttpNotesApi, NotesApi};
pub use error::{Error, Result};
pub use models::{Note, NoteCreateRequest, NoteId};
pub use store::{filter_notes, NotesStore};
