mod launch;
pub use launch::cmd_launch;

use std::path::Path;

use tracing::info;

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::editor::{Launch, LaunchAction};
use crate::io::clipboard::read_clipboard;
use crate::io::config_io;
use crate::io::file_store::FileStore;
use crate::io::recovery;
use crate::io::store::{NoteStore, StoreError, now_millis};
use crate::model::{Category, NoteRef, NoteUpdate, expand_user_input};

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli, data_dir: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let json = cli.json;
    let config = config_io::read_config(data_dir)?;

    match cli.command {
        None | Some(Commands::New) => cmd_launch(data_dir, &config, Launch::insert()),
        Some(Commands::Edit(args)) => cmd_launch(
            data_dir,
            &config,
            Launch::edit(expand_user_input(&args.reference)),
        ),
        Some(Commands::Paste(args)) => {
            let clip = read_clipboard(args.text)?;
            cmd_launch(data_dir, &config, Launch::paste(clip))
        }
        Some(Commands::Open(args)) => {
            let action = LaunchAction::from_tag(&args.action);
            let clip = if action == LaunchAction::Paste {
                read_clipboard(None)?
            } else {
                None
            };
            let launch = Launch {
                action,
                reference: args.reference.as_deref().map(expand_user_input),
                clip,
            };
            cmd_launch(data_dir, &config, launch)
        }
        Some(Commands::List(args)) => cmd_list(data_dir, args, json),
        Some(Commands::Show(args)) => cmd_show(data_dir, args, json),
        Some(Commands::Category(args)) => cmd_category(data_dir, args),
        Some(Commands::Delete(args)) => cmd_delete(data_dir, args),
        Some(Commands::Recovery(args)) => cmd_recovery(data_dir, args, json),
    }
}

fn parse_category(label: &str) -> Result<Category, String> {
    Category::parse_label(label).ok_or_else(|| {
        format!(
            "unknown category '{}' (expected Personal, Work, Study, Life or Other)",
            label
        )
    })
}

// ---------------------------------------------------------------------------
// Read commands
// ---------------------------------------------------------------------------

fn cmd_list(data_dir: &Path, args: ListArgs, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let filter = args.category.as_deref().map(parse_category).transpose()?;
    let notes: Vec<_> = FileStore::open(data_dir)
        .list()?
        .into_iter()
        .filter(|n| filter.is_none_or(|c| n.category == c))
        .collect();

    if json {
        let out: Vec<NoteSummaryJson> = notes.iter().map(NoteSummaryJson::from).collect();
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    if notes.is_empty() {
        println!("No notes.");
    }
    for note in &notes {
        println!("{}", format_note_line(note));
    }
    Ok(())
}

fn cmd_show(data_dir: &Path, args: ShowArgs, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let reference = NoteRef::parse_user_input(&args.reference)?;
    let note = FileStore::open(data_dir)
        .get(&reference)?
        .ok_or(StoreError::NotFound(reference))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&NoteJson::from(&note))?);
    } else {
        print!("{}", format_note(&note));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Write commands
// ---------------------------------------------------------------------------

fn cmd_category(data_dir: &Path, args: CategoryArgs) -> Result<(), Box<dyn std::error::Error>> {
    let reference = NoteRef::parse_user_input(&args.reference)?;
    let category = parse_category(&args.label)?;
    let update = NoteUpdate {
        category: Some(category),
        modified_at: Some(now_millis()),
        ..Default::default()
    };
    FileStore::open(data_dir).update(&reference, update)?;
    info!(reference = %reference, category = %category, "category set from command line");
    println!("{}: {}", reference, category);
    Ok(())
}

fn cmd_delete(data_dir: &Path, args: DeleteArgs) -> Result<(), Box<dyn std::error::Error>> {
    let reference = NoteRef::parse_user_input(&args.reference)?;
    FileStore::open(data_dir).delete(&reference)?;
    info!(reference = %reference, "note deleted from command line");
    println!("deleted {}", reference);
    Ok(())
}

// ---------------------------------------------------------------------------
// Recovery
// ---------------------------------------------------------------------------

fn cmd_recovery(
    data_dir: &Path,
    args: RecoveryArgs,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if args.clear {
        let count = recovery::clear_recovery(data_dir)?;
        println!("cleared {} recovery entries", count);
        return Ok(());
    }

    let entries = recovery::read_recovery_entries(data_dir, args.limit);
    if json {
        let out: Vec<RecoveryEntryJson> = entries.iter().map(RecoveryEntryJson::from).collect();
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    if entries.is_empty() {
        println!("No recovery entries.");
        return Ok(());
    }
    for (i, entry) in entries.iter().enumerate() {
        if i > 0 {
            println!();
        }
        print!("{}", format_recovery_entry(entry));
    }
    Ok(())
}
