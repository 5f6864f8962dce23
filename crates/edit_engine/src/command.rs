//! The reversible command contract

use crate::Result;
use doc_model::Document;
use render_model::Surface;

/// What a command may touch while it runs
pub struct EditContext<'a> {
    pub document: &'a mut Document,
    pub surface: &'a mut dyn Surface,
}

impl<'a> EditContext<'a> {
    pub fn new(document: &'a mut Document, surface: &'a mut dyn Surface) -> Self {
        Self { document, surface }
    }
}

/// Trait for all editing commands
///
/// `execute` performs the action and records whatever it needs to reverse
/// it; `unexecute` restores the prior state from that record only. Both
/// leave the document unchanged when they fail.
pub trait Command: std::fmt::Debug + Send {
    /// Perform the command
    fn execute(&mut self, ctx: &mut EditContext<'_>) -> Result<()>;

    /// Reverse the last `execute`
    fn unexecute(&mut self, ctx: &mut EditContext<'_>) -> Result<()>;

    /// Get a display name for this command
    fn display_name(&self) -> String;
}
