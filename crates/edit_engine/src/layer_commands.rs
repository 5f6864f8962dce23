//! Z-order commands

use crate::{shape_commands::editable_shape, Command, EditContext, EditError, Result};
use doc_model::{DocModelError, Document, ZOrderOperation};
use serde::{Deserialize, Serialize};

/// Where a layer change moves a shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LayerTarget {
    /// One of the relative z-order operations
    Relative(ZOrderOperation),
    /// An explicit layer index
    Index(usize),
}

/// Change the z-order of a shape
#[derive(Debug, Clone)]
pub struct ChangeLayer {
    name: String,
    target: LayerTarget,
    previous: Option<usize>,
}

impl ChangeLayer {
    pub fn new(name: impl Into<String>, target: LayerTarget) -> Self {
        Self {
            name: name.into(),
            target,
            previous: None,
        }
    }

    pub fn relative(name: impl Into<String>, operation: ZOrderOperation) -> Self {
        Self::new(name, LayerTarget::Relative(operation))
    }

    pub fn to_index(name: impl Into<String>, index: usize) -> Self {
        Self::new(name, LayerTarget::Index(index))
    }

    /// Extreme to fall back to when the previous layer no longer exists
    fn fallback(&self, previous: usize) -> ZOrderOperation {
        let moved_forward = match self.target {
            LayerTarget::Relative(op) => matches!(
                op,
                ZOrderOperation::BringToFront | ZOrderOperation::BringForward
            ),
            LayerTarget::Index(index) => index > previous,
        };
        if moved_forward {
            ZOrderOperation::SendToBack
        } else {
            ZOrderOperation::BringToFront
        }
    }

    fn restore(&self, document: &mut Document, previous: usize) -> Result<()> {
        if previous < document.len() {
            document.move_to_layer(&self.name, previous)?;
            return Ok(());
        }

        let fallback = self.fallback(previous);
        tracing::warn!(
            "Layer {} no longer exists, undoing '{}' with {}",
            previous,
            self.display_name(),
            fallback.as_str()
        );
        match document.apply_z_order(&self.name, fallback) {
            Ok(_) | Err(DocModelError::AlreadyAtBoundary { .. }) => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

impl Command for ChangeLayer {
    fn execute(&mut self, ctx: &mut EditContext<'_>) -> Result<()> {
        editable_shape(ctx.document, &self.name)?;
        let previous = match self.target {
            LayerTarget::Relative(op) => ctx.document.apply_z_order(&self.name, op)?,
            LayerTarget::Index(index) => ctx.document.move_to_layer(&self.name, index)?,
        };
        self.previous = Some(previous);
        Ok(())
    }

    fn unexecute(&mut self, ctx: &mut EditContext<'_>) -> Result<()> {
        let previous = self
            .previous
            .ok_or_else(|| EditError::NotExecuted(self.display_name()))?;
        self.restore(ctx.document, previous)?;
        self.previous = None;
        Ok(())
    }

    fn display_name(&self) -> String {
        match self.target {
            LayerTarget::Relative(op) => format!("{} '{}'", op.as_str(), self.name),
            LayerTarget::Index(index) => format!("move '{}' to layer {}", self.name, index),
        }
    }
}
