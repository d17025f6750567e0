pub mod category;
pub mod config;
pub mod note;
pub mod reference;

pub use category::*;
pub use config::*;
pub use note::*;
pub use reference::*;
