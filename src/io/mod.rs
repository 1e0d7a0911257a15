//! File-level input and output operations.

pub mod reader;
pub mod writer;

pub use reader::{load_document, validate_input, validate_output};
pub use writer::{deliver, ensure_parent_dir, save_document};
