//! Error types for editing operations

use thiserror::Error;

/// Which history stack an operation used
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryKind {
    Undo,
    Redo,
}

impl std::fmt::Display for HistoryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HistoryKind::Undo => write!(f, "undo"),
            HistoryKind::Redo => write!(f, "redo"),
        }
    }
}

#[derive(Debug, Error)]
pub enum EditError {
    #[error("Invalid command: {0}")]
    InvalidCommand(String),

    #[error("Document model error: {0}")]
    DocModel(#[from] doc_model::DocModelError),

    #[error("Nothing to {0}")]
    EmptyHistory(HistoryKind),

    #[error("Command '{0}' has not been executed")]
    NotExecuted(String),

    #[error("Undo of '{command}' failed: {source}")]
    UndoFailed {
        command: String,
        #[source]
        source: Box<EditError>,
    },

    #[error("Redo of '{command}' failed: {source}")]
    RedoFailed {
        command: String,
        #[source]
        source: Box<EditError>,
    },

    #[error("Window not found: {0}")]
    WindowNotFound(String),

    #[error("A window named '{0}' is already open")]
    DuplicateWindow(String),

    #[error("Nothing is selected")]
    EmptySelection,
}

impl EditError {
    /// Whether this error is a user-facing warning rather than a failure
    pub fn is_warning(&self) -> bool {
        match self {
            EditError::DocModel(e) => e.is_warning(),
            EditError::EmptyHistory(_) | EditError::EmptySelection => true,
            EditError::UndoFailed { source, .. } | EditError::RedoFailed { source, .. } => {
                source.is_warning()
            }
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, EditError>;
