use jot_core::NotesStore;

use crate::commands::common::{merge_edit, normalize_note_identifier};
use crate::error::CliError;

pub async fn run_edit(
    store: &NotesStore,
    id: &str,
    title: Option<String>,
    content: Option<String>,
) -> Result<(), CliError> {
    let id = normalize_note_identifier(id)?;
    if title.is_none() || content.is_none() {
        store.fetch_notes().await;
    }
    let current = store.note(&id);
    let payload = merge_edit(&id, current.as_ref(), title, content)?;

    let note = store.update_note(&id, &payload).await?;
    println!("{}", note.id);
    Ok(())
}
