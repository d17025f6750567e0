pub mod controller;
pub mod launch;
pub mod session;
pub mod title;

pub use controller::{EditorError, NoteEditor, Notice, NoticeLevel};
pub use launch::{ExitResult, Launch, LaunchAction, ResultCode};
pub use session::{EditMode, Session, Snapshot};
pub use title::{generate_title, is_blank_title, resolve_title};
