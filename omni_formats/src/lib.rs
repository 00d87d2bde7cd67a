pub mod action;
pub mod cursor;
pub mod error;
pub mod layout;
pub mod media_action;
pub mod record;

pub use action::Action;
pub use cursor::ByteCursor;
pub use error::RecordError;
pub use layout::LayoutVersion;
pub use media_action::{MediaAction, SourcePath};
pub use record::Streamable;
