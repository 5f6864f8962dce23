//! Store - Settings and document persistence
//!
//! This crate handles the editor settings file and the JSON document
//! format: encoding shapes through their attribute maps and rebuilding
//! shapes and decorator chains when loading.

mod error;
mod format;
mod serializer;
mod file_io;
mod settings;

pub use error::*;
pub use format::*;
pub use serializer::*;
pub use file_io::*;
pub use settings::*;
