use jot_core::NotesStore;

use crate::commands::common::normalize_note_identifier;
use crate::error::CliError;

/// The store swallows delete failures, so success is judged by whether the
/// note is gone from the list afterwards.
pub async fn run_delete(store: &NotesStore, id: &str) -> Result<(), CliError> {
    let id = normalize_note_identifier(id)?;
    store.fetch_notes().await;
    if store.note(&id).is_none() {
        return Err(CliError::NoteNotFound(id.to_string()));
    }

    store.delete_note(&id).await;
    if store.note(&id).is_some() {
        return Err(CliError::DeleteFailed(id.to_string()));
    }
    println!("{id}");
    Ok(())
}
