//! Data models for Jot

mod note;

pub use note::{Note, NoteCreateRequest, NoteId};
