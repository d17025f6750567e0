use std::path::Path;

use tracing::info;

use crate::cli::output;
use crate::editor::{Launch, NoteEditor};
use crate::io::file_store::FileStore;
use crate::model::AppConfig;
use crate::tui;

/// Open the editor screen for a launch request and report the exit contract.
///
/// Launch errors (invalid reference, missing note, unknown action) surface
/// before the terminal is touched.
pub fn cmd_launch(
    data_dir: &Path,
    config: &AppConfig,
    launch: Launch,
) -> Result<(), Box<dyn std::error::Error>> {
    info!(action = ?launch.action, reference = ?launch.reference, "opening editor");
    let store = FileStore::open(data_dir);
    let editor =
        NoteEditor::launch(store, launch, config.editor.clone())?.with_recovery_dir(data_dir);

    let result = tui::run(editor, &config.ui)?;
    info!(code = ?result.code, created = ?result.created, "editor closed");

    if let Some(line) = output::format_exit(&result) {
        println!("{}", line);
    }
    Ok(())
}
