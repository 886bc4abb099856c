use jot_core::NotesStore;

use crate::commands::common::print_notes;
use crate::error::CliError;

pub async fn run_search(store: &NotesStore, query: &str, as_json: bool) -> Result<(), CliError> {
    store.fetch_notes().await;
    store.set_search(query);
    print_notes(&store.filtered_notes(), as_json)
}
