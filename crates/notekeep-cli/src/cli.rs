use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "notekeep")]
#[command(about = "Keep, pin, tag and archive short notes from the command line")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Optional path to local database file
    #[arg(long, global = true, value_name = "PATH")]
    pub db_path: Option<PathBuf>,

    /// Key the note collection is stored under
    #[arg(long, global = true, value_name = "KEY")]
    pub store_key: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a new note
    #[command(alias = "new")]
    Add(AddArgs),
    /// List notes, pinned first then most recently updated
    #[command(alias = "ls")]
    List(ListArgs),
    /// Show a single note
    Show {
        /// Note ID or unique ID prefix
        id: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Edit an existing note
    Edit(EditArgs),
    /// Delete a note
    #[command(alias = "rm")]
    Delete {
        /// Note ID or unique ID prefix
        id: String,
    },
    /// Pin or unpin a note
    Pin {
        /// Note ID or unique ID prefix
        id: String,
    },
    /// Archive or unarchive a note
    Archive {
        /// Note ID or unique ID prefix
        id: String,
    },
    /// Create a copy of a note
    Duplicate {
        /// Note ID or unique ID prefix
        id: String,
    },
    /// Export all notes
    Export {
        /// Export format
        #[arg(long, value_enum, default_value_t = ExportFormat::Json)]
        format: ExportFormat,
        /// Optional output path (stdout when omitted)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
    /// Replace all notes with the contents of a JSON export
    Import {
        /// Path to a JSON export, or `-` for stdin
        #[arg(value_name = "PATH")]
        input: PathBuf,
    },
    /// List categories in use
    Categories,
    /// List tags in use
    Tags,
    /// Generate shell completion scripts
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: CompletionShell,
        /// Optional output path (stdout when omitted)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
}

#[derive(Args, Debug, Default)]
pub struct AddArgs {
    /// Note title
    #[arg(short, long)]
    pub title: String,
    /// Note content (read from stdin or $EDITOR when omitted)
    pub content: Vec<String>,
    /// Comma-separated tags
    #[arg(long, value_name = "TAGS")]
    pub tags: Option<String>,
    /// Category
    #[arg(long)]
    pub category: Option<String>,
    /// Hex color token, e.g. #ffcc00
    #[arg(long)]
    pub color: Option<String>,
    /// Due date (YYYY-MM-DD or RFC 3339)
    #[arg(long, value_name = "DATE")]
    pub due: Option<String>,
    /// Pin the note
    #[arg(long)]
    pub pin: bool,
    /// Create the note archived
    #[arg(long)]
    pub archive: bool,
}

#[derive(Args, Debug, Default)]
pub struct ListArgs {
    /// Show archived notes instead of active ones
    #[arg(long)]
    pub archived: bool,
    /// Filter by text in title or content
    #[arg(short, long)]
    pub query: Option<String>,
    /// Filter by category
    #[arg(long)]
    pub category: Option<String>,
    /// Filter by tag
    #[arg(long)]
    pub tag: Option<String>,
    /// Maximum number of notes to show
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug, Default)]
pub struct EditArgs {
    /// Note ID or unique ID prefix
    pub id: String,
    /// New title
    #[arg(short, long)]
    pub title: Option<String>,
    /// New content
    #[arg(short, long)]
    pub content: Option<String>,
    /// Replace tags (comma-separated, empty string clears)
    #[arg(long, value_name = "TAGS")]
    pub tags: Option<String>,
    /// Replace category (empty string clears)
    #[arg(long)]
    pub category: Option<String>,
    /// Replace color
    #[arg(long)]
    pub color: Option<String>,
    /// Replace due date
    #[arg(long, value_name = "DATE", conflicts_with = "clear_due")]
    pub due: Option<String>,
    /// Remove the due date
    #[arg(long)]
    pub clear_due: bool,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum ExportFormat {
    Json,
    Markdown,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum CompletionShell {
    Bash,
    Zsh,
    Fish,
}
