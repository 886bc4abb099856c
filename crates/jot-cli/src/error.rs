use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] jot_core::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
    #[error("A note needs a title or some content")]
    EmptyNote,
    #[error("Note ID cannot be empty")]
    EmptyNoteId,
    #[error("Nothing to change; pass --title and/or --content")]
    NothingToUpdate,
    #[error("Note not found: {0}")]
    NoteNotFound(String),
    #[error("Note {0} was not deleted; see the log output above")]
    DeleteFailed(String),
}
