use jot_core::{NoteCreateRequest, NotesStore};

use crate::commands::common::resolve_note_content;
use crate::error::CliError;

pub async fn run_add(
    store: &NotesStore,
    title: &str,
    content_parts: &[String],
) -> Result<(), CliError> {
    let content = resolve_note_content(content_parts)?;
    if title.trim().is_empty() && content.trim().is_empty() {
        return Err(CliError::EmptyNote);
    }

    let note = store
        .create_note(&NoteCreateRequest::new(title, content))
        .await?;
    println!("{}", note.id);
    Ok(())
}
