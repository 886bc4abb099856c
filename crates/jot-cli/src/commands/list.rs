use jot_core::NotesStore;

use crate::commands::common::print_notes;
use crate::error::CliError;

pub async fn run_list(store: &NotesStore, as_json: bool) -> Result<(), CliError> {
    store.fetch_notes().await;
    print_notes(&store.notes(), as_json)
}
