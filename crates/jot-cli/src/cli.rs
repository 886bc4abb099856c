use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "jot")]
#[command(about = "Read and write notes on a Jot notes service")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Notes API base URL (overrides JOT_NOTES_API_BASE and NOTES_API_BASE)
    #[arg(long, global = true, value_name = "URL")]
    pub api_base: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List all notes
    #[command(alias = "ls")]
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Search notes by title or content
    Search {
        /// Case-insensitive search text
        query: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Create a new note
    #[command(alias = "new")]
    Add {
        /// Note title
        #[arg(short, long, default_value = "")]
        title: String,
        /// Note content (read from stdin when omitted and piped)
        content: Vec<String>,
    },
    /// Edit an existing note
    Edit {
        /// Note ID
        id: String,
        /// New title
        #[arg(short, long)]
        title: Option<String>,
        /// New content
        #[arg(short, long)]
        content: Option<String>,
    },
    /// Delete a note
    #[command(alias = "rm")]
    Delete {
        /// Note ID
        id: String,
    },
}
