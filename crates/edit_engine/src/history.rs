//! Bounded undo and redo history

use crate::{Command, EditContext, EditError, HistoryKind, Result};
use std::collections::VecDeque;
use thiserror::Error;

/// Depth used when none is configured
pub const DEFAULT_HISTORY_DEPTH: usize = 100;

/// Popped an empty [`BoundedStack`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("stack is empty")]
pub struct EmptyStack;

/// A stack that drops its oldest entry when pushed past capacity
#[derive(Debug, Clone)]
pub struct BoundedStack<T> {
    items: VecDeque<T>,
    capacity: usize,
}

impl<T> BoundedStack<T> {
    pub fn new(capacity: usize) -> Self {
        Self {
            items: VecDeque::new(),
            capacity,
        }
    }

    /// Push on top, returning the evicted bottom entry if the stack was full
    pub fn push(&mut self, item: T) -> Option<T> {
        if self.capacity == 0 {
            return Some(item);
        }
        let evicted = if self.items.len() >= self.capacity {
            self.items.pop_front()
        } else {
            None
        };
        self.items.push_back(item);
        evicted
    }

    pub fn pop_top(&mut self) -> std::result::Result<T, EmptyStack> {
        self.items.pop_back().ok_or(EmptyStack)
    }

    pub fn pop_bottom(&mut self) -> std::result::Result<T, EmptyStack> {
        self.items.pop_front().ok_or(EmptyStack)
    }

    pub fn peek_top(&self) -> Option<&T> {
        self.items.back()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Change the capacity, dropping the oldest entries that no longer fit
    pub fn set_capacity(&mut self, capacity: usize) -> usize {
        self.capacity = capacity;
        let excess = self.items.len().saturating_sub(capacity);
        self.items.drain(..excess);
        excess
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

/// Undo and redo stacks of executed commands
#[derive(Debug)]
pub struct History {
    undo_stack: BoundedStack<Box<dyn Command>>,
    redo_stack: BoundedStack<Box<dyn Command>>,
}

impl History {
    pub fn new(depth: usize) -> Self {
        Self {
            undo_stack: BoundedStack::new(depth),
            redo_stack: BoundedStack::new(depth),
        }
    }

    /// Execute a command and record it.
    ///
    /// On success the redo stack is cleared. On failure nothing is recorded
    /// and the redo stack is kept.
    pub fn do_command(
        &mut self,
        mut command: Box<dyn Command>,
        ctx: &mut EditContext<'_>,
    ) -> Result<()> {
        command.execute(ctx)?;
        tracing::info!("Executed {}", command.display_name());
        self.redo_stack.clear();
        if let Some(evicted) = self.undo_stack.push(command) {
            tracing::debug!("History full, dropped {}", evicted.display_name());
        }
        Ok(())
    }

    /// Reverse the most recent command.
    ///
    /// A command whose reversal fails goes back on the undo stack.
    pub fn undo(&mut self, ctx: &mut EditContext<'_>) -> Result<String> {
        let mut command = self
            .undo_stack
            .pop_top()
            .map_err(|_| EditError::EmptyHistory(HistoryKind::Undo))?;
        let name = command.display_name();
        if let Err(e) = command.unexecute(ctx) {
            tracing::warn!("Undo of {} failed: {}", name, e);
            self.undo_stack.push(command);
            return Err(EditError::UndoFailed {
                command: name,
                source: Box::new(e),
            });
        }
        tracing::info!("Undid {}", name);
        self.redo_stack.push(command);
        Ok(name)
    }

    /// Execute the most recently undone command again.
    ///
    /// A command that fails to execute goes back on the redo stack.
    pub fn redo(&mut self, ctx: &mut EditContext<'_>) -> Result<String> {
        let mut command = self
            .redo_stack
            .pop_top()
            .map_err(|_| EditError::EmptyHistory(HistoryKind::Redo))?;
        let name = command.display_name();
        if let Err(e) = command.execute(ctx) {
            tracing::warn!("Redo of {} failed: {}", name, e);
            self.redo_stack.push(command);
            return Err(EditError::RedoFailed {
                command: name,
                source: Box::new(e),
            });
        }
        tracing::info!("Redid {}", name);
        self.undo_stack.push(command);
        Ok(name)
    }

    /// Change the depth of both stacks, dropping the oldest entries
    pub fn set_depth(&mut self, depth: usize) {
        let dropped = self.undo_stack.set_capacity(depth) + self.redo_stack.set_capacity(depth);
        if dropped > 0 {
            tracing::debug!("History depth {} dropped {} entries", depth, dropped);
        }
    }

    pub fn depth(&self) -> usize {
        self.undo_stack.capacity()
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_count(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_count(&self) -> usize {
        self.redo_stack.len()
    }

    /// Name of the command `undo` would reverse
    pub fn undo_description(&self) -> Option<String> {
        self.undo_stack.peek_top().map(|c| c.display_name())
    }

    /// Name of the command `redo` would execute
    pub fn redo_description(&self) -> Option<String> {
        self.redo_stack.peek_top().map(|c| c.display_name())
    }

    /// Clear all undo/redo history
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_DEPTH)
    }
}
