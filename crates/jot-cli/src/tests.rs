use clap::Parser;
use jot_core::config::{resolve_api_base, ConfigSource};
use jot_core::{Note, NoteId};
use pretty_assertions::assert_eq;

use crate::cli::{Cli, Commands};
use crate::commands::common::{
    cli_config, format_note_lines, merge_edit, normalize_note_identifier, note_preview,
    note_to_list_item,
};
use crate::error::CliError;

fn note(id: &str, title: &str, content: &str) -> Note {
    Note {
        id: NoteId::new(id),
        title: title.to_string(),
        content: content.to_string(),
        created_at: None,
        updated_at: Some("2024-06-01T08:00:00Z".to_string()),
    }
}

#[test]
fn normalize_note_identifier_trims_and_rejects_empty() {
    assert_eq!(
        normalize_note_identifier("  abc ").unwrap(),
        NoteId::new("abc")
    );
    assert!(matches!(
        normalize_note_identifier(" \t "),
        Err(CliError::EmptyNoteId)
    ));
}

#[test]
fn note_preview_truncates_with_ellipsis() {
    let note = note(
        "1",
        "t",
        "This is a very long sentence that should be shortened",
    );
    assert_eq!(note_preview(&note, 20), "This is a very lo...");
    assert_eq!(note_preview(&note, 200), note.content);
}

#[test]
fn format_note_lines_uses_content_for_untitled_notes() {
    let lines = format_note_lines(&[
        note("1", "Groceries", "milk\neggs"),
        note("2", "", "call the plumber"),
        note("3", "", ""),
    ]);
    assert_eq!(
        lines,
        vec![
            "1  Groceries  milk".to_string(),
            "2  call the plumber".to_string(),
            "3  (untitled)".to_string(),
        ]
    );
}

#[test]
fn list_item_serializes_optional_timestamps_sparsely() {
    let item = note_to_list_item(&note("1", "A", "B"));
    let json = serde_json::to_value(&item).unwrap();
    assert_eq!(json["updated_at"], "2024-06-01T08:00:00Z");
    assert!(json.get("created_at").is_none());
}

#[test]
fn merge_edit_requires_a_change() {
    let id = NoteId::new("1");
    assert!(matches!(
        merge_edit(&id, None, None, None),
        Err(CliError::NothingToUpdate)
    ));
}

#[test]
fn merge_edit_keeps_unchanged_fields() {
    let id = NoteId::new("1");
    let current = note("1", "Old title", "Old body");
    let payload = merge_edit(&id, Some(&current), Some("New title".to_string()), None).unwrap();
    assert_eq!(payload.title, "New title");
    assert_eq!(payload.content, "Old body");
}

#[test]
fn merge_edit_without_local_copy_needs_both_fields() {
    let id = NoteId::new("9");
    assert!(matches!(
        merge_edit(&id, None, None, Some("body".to_string())),
        Err(CliError::NoteNotFound(_))
    ));
    let payload = merge_edit(
        &id,
        None,
        Some("title".to_string()),
        Some("body".to_string()),
    )
    .unwrap();
    assert_eq!(payload.title, "title");
}

#[test]
fn api_base_flag_overrides_environment_layer() {
    let config = cli_config(Some("https://cli.example.com/api".to_string()));
    assert_eq!(resolve_api_base(&config), "https://cli.example.com/api");
    assert_eq!(
        config.get("JOT_NOTES_API_BASE").as_deref(),
        Some("https://cli.example.com/api")
    );
}

#[test]
fn parses_add_with_title_and_words() {
    let cli = Cli::try_parse_from(["jot", "add", "-t", "Shopping", "buy", "milk"]).unwrap();
    match cli.command {
        Commands::Add { title, content } => {
            assert_eq!(title, "Shopping");
            assert_eq!(content, vec!["buy".to_string(), "milk".to_string()]);
        }
        _ => panic!("expected add"),
    }
}

#[test]
fn parses_global_api_base_after_subcommand() {
    let cli = Cli::try_parse_from(["jot", "ls", "--json", "--api-base", "http://localhost:8000"])
        .unwrap();
    assert_eq!(cli.api_base.as_deref(), Some("http://localhost:8000"));
    assert!(matches!(cli.command, Commands::List { json: true }));
}

#[test]
fn parses_edit_with_optional_fields() {
    let cli = Cli::try_parse_from(["jot", "edit", "42", "--content", "new body"]).unwrap();
    match cli.command {
        Commands::Edit { id, title, content } => {
            assert_eq!(id, "42");
            assert_eq!(title, None);
            assert_eq!(content.as_deref(), Some("new body"));
        }
        _ => panic!("expected edit"),
    }
}
