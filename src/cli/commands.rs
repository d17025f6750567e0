use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "np", about = concat!("np v", env!("CARGO_PKG_VERSION"), " - one note at a time, on ruled paper"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Use a different data directory
    #[arg(short = 'C', long = "data-dir", global = true)]
    pub data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a new note (the default)
    New,
    /// Open an existing note
    Edit(EditArgs),
    /// Start a new note from the clipboard
    Paste(PasteArgs),
    /// Open the editor with a raw action tag
    Open(OpenArgs),
    /// List notes, most recently modified first
    List(ListArgs),
    /// Print a note
    Show(ShowArgs),
    /// Set a note's category
    Category(CategoryArgs),
    /// Delete a note
    Delete(DeleteArgs),
    /// Show or clear content that could not be saved
    Recovery(RecoveryArgs),
}

#[derive(Args)]
pub struct EditArgs {
    /// Note reference or numeric id
    pub reference: String,
}

#[derive(Args)]
pub struct PasteArgs {
    /// Clipboard text (read from piped stdin when omitted)
    #[arg(long)]
    pub text: Option<String>,
}

#[derive(Args)]
pub struct OpenArgs {
    /// Action tag: edit, view, insert or paste
    pub action: String,
    /// Note reference or numeric id
    pub reference: Option<String>,
}

#[derive(Args)]
pub struct ListArgs {
    /// Only notes in this category
    #[arg(long)]
    pub category: Option<String>,
}

#[derive(Args)]
pub struct ShowArgs {
    /// Note reference or numeric id
    pub reference: String,
}

#[derive(Args)]
pub struct CategoryArgs {
    /// Note reference or numeric id
    pub reference: String,
    /// Personal, Work, Study, Life or Other
    pub label: String,
}

#[derive(Args)]
pub struct DeleteArgs {
    /// Note reference or numeric id
    pub reference: String,
}

#[derive(Args)]
pub struct RecoveryArgs {
    /// Show only the most recent N entries
    #[arg(long)]
    pub limit: Option<usize>,
    /// Remove the recovery log
    #[arg(long)]
    pub clear: bool,
}
