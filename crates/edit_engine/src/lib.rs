//! Edit Engine - Undoable commands, bounded history, and the editing session
//!
//! Commands implement [`Command`] and are executed through a [`History`],
//! which keeps bounded undo and redo stacks. [`EditingEngine`] owns the open
//! windows, each with its own document, surface and history, plus the
//! session-wide ordering strategy.

mod command;
mod error;
mod executor;
mod history;
mod layer_commands;
mod selection_commands;
mod shape_commands;

pub use command::*;
pub use error::*;
pub use executor::*;
pub use history::*;
pub use layer_commands::*;
pub use selection_commands::*;
pub use shape_commands::*;
