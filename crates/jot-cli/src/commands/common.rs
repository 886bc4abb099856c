use std::io::{self, IsTerminal, Read};

use jot_core::config::{EnvConfig, LayeredConfig, StaticConfig, API_BASE_KEYS};
use jot_core::{HttpNotesApi, Note, NoteCreateRequest, NoteId, NotesStore};
use serde::Serialize;

use crate::error::CliError;

const PREVIEW_LEN: usize = 60;
const TITLE_LEN: usize = 40;

#[derive(Debug, Serialize)]
pub struct NoteListItem {
    pub id: String,
    pub title: String,
    pub preview: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// Configuration layers: `--api-base` first, then the environment.
pub fn cli_config(api_base: Option<String>) -> LayeredConfig {
    let overrides = StaticConfig::new();
    if let Some(base) = api_base {
        overrides.set(API_BASE_KEYS[0], base);
    }
    LayeredConfig::new()
        .with_layer(overrides)
        .with_layer(EnvConfig)
}

pub fn open_store(api_base: Option<String>) -> Result<NotesStore, CliError> {
    let has_override = api_base.is_some();
    let api = HttpNotesApi::new(cli_config(api_base))?;
    match api.collection_url() {
        Ok(url) => tracing::debug!(%url, has_override, "using notes service"),
        Err(error) => tracing::warn!(%error, "notes service URL is not usable"),
    }
    Ok(NotesStore::new(api))
}

pub fn normalize_note_identifier(raw: &str) -> Result<NoteId, CliError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(CliError::EmptyNoteId);
    }
    Ok(NoteId::new(trimmed))
}

/// Content from positional words, or from piped stdin when there are none.
pub fn resolve_note_content(parts: &[String]) -> Result<String, CliError> {
    if !parts.is_empty() {
        return Ok(parts.join(" "));
    }

    let mut stdin = io::stdin();
    if stdin.is_terminal() {
        return Ok(String::new());
    }
    let mut content = String::new();
    stdin.read_to_string(&mut content)?;
    Ok(content.trim_end().to_string())
}

/// Fill fields missing from an edit with the current note's values.
pub fn merge_edit(
    id: &NoteId,
    current: Option<&Note>,
    title: Option<String>,
    content: Option<String>,
) -> Result<NoteCreateRequest, CliError> {
    match (title, content) {
        (None, None) => Err(CliError::NothingToUpdate),
        (Some(title), Some(content)) => Ok(NoteCreateRequest { title, content }),
        (title, content) => {
            let current = current.ok_or_else(|| CliError::NoteNotFound(id.to_string()))?;
            Ok(NoteCreateRequest {
                title: title.unwrap_or_else(|| current.title.clone()),
                content: content.unwrap_or_else(|| current.content.clone()),
            })
        }
    }
}

pub fn note_preview(note: &Note, max_len: usize) -> String {
    let first_line = note.content.lines().next().unwrap_or("").trim();
    if first_line.chars().count() <= max_len {
        return first_line.to_string();
    }
    let truncated: String = first_line.chars().take(max_len.saturating_sub(3)).collect();
    format!("{truncated}...")
}

pub fn note_to_list_item(note: &Note) -> NoteListItem {
    NoteListItem {
        id: note.id.to_string(),
        title: note.title.clone(),
        preview: note_preview(note, PREVIEW_LEN),
        content: note.content.clone(),
        created_at: note.created_at.clone(),
        updated_at: note.updated_at.clone(),
    }
}

pub fn format_note_lines(notes: &[Note]) -> Vec<String> {
    notes
        .iter()
        .map(|note| {
            let title = note.display_title(TITLE_LEN);
            let title = if title.is_empty() {
                "(untitled)".to_string()
            } else {
                title
            };
            let preview = note_preview(note, PREVIEW_LEN);
            if preview.is_empty() || note.title.trim().is_empty() {
                format!("{}  {title}", note.id)
            } else {
                format!("{}  {title}  {preview}", note.id)
            }
        })
        .collect()
}

pub fn print_notes(notes: &[Note], as_json: bool) -> Result<(), CliError> {
    if as_json {
        let items = notes.iter().map(note_to_list_item).collect::<Vec<_>>();
        println!("{}", serde_json::to_string_pretty(&items)?);
    } else {
        for line in format_note_lines(notes) {
            println!("{line}");
        }
    }
    Ok(())
}
