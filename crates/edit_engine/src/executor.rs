//! Command execution engine

use crate::{
    Command, EditContext, EditError, History, PasteArea, Result, DEFAULT_HISTORY_DEPTH,
};
use doc_model::{
    AttributeDescriptor, Document, Drawable, OrderingStrategy, Point, SelectionMemento, Shape,
};
use render_model::Surface;
use std::collections::HashSet;

/// One open document with its own surface and history
#[derive(Debug)]
pub struct Window<S> {
    name: String,
    document: Document,
    surface: S,
    history: History,
    selection: Option<SelectionMemento>,
}

impl<S: Surface> Window<S> {
    fn new(name: String, surface: S, depth: usize) -> Self {
        Self {
            document: Document::new(name.clone()),
            name,
            surface,
            history: History::new(depth),
            selection: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn selection(&self) -> Option<&SelectionMemento> {
        self.selection.as_ref()
    }
}

/// The editing session: open windows, the current window and the
/// session-wide ordering and history settings
#[derive(Debug)]
pub struct EditingEngine<S> {
    windows: Vec<Window<S>>,
    current: usize,
    ordering: OrderingStrategy,
    history_depth: usize,
}

impl<S: Surface> EditingEngine<S> {
    /// Create an engine with one empty window
    pub fn new(window: impl Into<String>, surface: S) -> Self {
        Self {
            windows: vec![Window::new(window.into(), surface, DEFAULT_HISTORY_DEPTH)],
            current: 0,
            ordering: OrderingStrategy::default(),
            history_depth: DEFAULT_HISTORY_DEPTH,
        }
    }

    /// Apply history depth and ordering settings
    pub fn with_settings(mut self, history_depth: usize, ordering: OrderingStrategy) -> Self {
        self.set_history_depth(history_depth);
        self.ordering = ordering;
        self
    }

    fn window(&self) -> &Window<S> {
        &self.windows[self.current]
    }

    fn window_mut(&mut self) -> &mut Window<S> {
        &mut self.windows[self.current]
    }

    pub fn current_window(&self) -> &Window<S> {
        self.window()
    }

    pub fn document(&self) -> &Document {
        &self.window().document
    }

    pub fn surface(&self) -> &S {
        &self.window().surface
    }

    pub fn history(&self) -> &History {
        &self.window().history
    }

    pub fn window_names(&self) -> Vec<&str> {
        self.windows.iter().map(Window::name).collect()
    }

    /// Open a new empty window and make it current
    pub fn open_window(&mut self, name: impl Into<String>, surface: S) -> Result<()> {
        let name = name.into();
        if self.windows.iter().any(|w| w.name() == name) {
            return Err(EditError::DuplicateWindow(name));
        }
        tracing::info!("Opened window '{}'", name);
        self.windows
            .push(Window::new(name, surface, self.history_depth));
        self.current = self.windows.len() - 1;
        Ok(())
    }

    /// Make the named window current
    pub fn switch_window(&mut self, name: &str) -> Result<()> {
        let index = self
            .windows
            .iter()
            .position(|w| w.name() == name)
            .ok_or_else(|| EditError::WindowNotFound(name.to_string()))?;
        self.current = index;
        tracing::info!("Switched to window '{}'", name);
        Ok(())
    }

    /// Execute a command on the current window and record it
    pub fn execute(&mut self, command: Box<dyn Command>) -> Result<()> {
        let window = self.window_mut();
        let mut ctx = EditContext::new(&mut window.document, &mut window.surface);
        window.history.do_command(command, &mut ctx)
    }

    /// Undo the last command of the current window
    pub fn undo(&mut self) -> Result<String> {
        let window = self.window_mut();
        let mut ctx = EditContext::new(&mut window.document, &mut window.surface);
        window.history.undo(&mut ctx)
    }

    /// Redo the last undone command of the current window
    pub fn redo(&mut self) -> Result<String> {
        let window = self.window_mut();
        let mut ctx = EditContext::new(&mut window.document, &mut window.surface);
        window.history.redo(&mut ctx)
    }

    pub fn history_depth(&self) -> usize {
        self.history_depth
    }

    /// Change the history depth of every window
    pub fn set_history_depth(&mut self, depth: usize) {
        self.history_depth = depth;
        for window in &mut self.windows {
            window.history.set_depth(depth);
        }
        tracing::info!("History depth set to {}", depth);
    }

    pub fn ordering(&self) -> OrderingStrategy {
        self.ordering
    }

    pub fn set_ordering(&mut self, ordering: OrderingStrategy) {
        self.ordering = ordering;
        tracing::info!("Ordering set to {}", ordering);
    }

    /// Shapes of the current document in the session ordering
    pub fn ordered_shapes(&self) -> Vec<&Shape> {
        self.ordering.order(self.document())
    }

    /// Names of the current document's shapes in the session ordering
    pub fn list_shapes(&self) -> Vec<&str> {
        self.ordering.names(self.document())
    }

    /// Editable attributes of a shape
    pub fn shape_help(&self, name: &str) -> Result<Vec<AttributeDescriptor>> {
        Ok(self
            .document()
            .find_by_name(name)?
            .attributes_to_edit_with_names())
    }

    /// Select the shapes inside an area and mark it on the surface.
    ///
    /// Returns how many shapes were captured.
    pub fn select_area(&mut self, top_left: Point, bottom_right: Point) -> usize {
        let window = self.window_mut();
        let memento = SelectionMemento::save_area(&window.document, top_left, bottom_right);
        window
            .document
            .set_selection_marker(memento.area(), &mut window.surface);
        let count = memento.captured().len();
        window.selection = Some(memento);
        count
    }

    /// Forget the selection and remove its marker
    pub fn clear_selection(&mut self) {
        let window = self.window_mut();
        window.selection = None;
        window.document.clear_selection_marker(&mut window.surface);
    }

    /// Paste the current selection with its top-left corner at `top_left`.
    ///
    /// Returns the names of the pasted shapes.
    pub fn paste(&mut self, top_left: Point) -> Result<Vec<String>> {
        let memento = match self.window().selection.as_ref() {
            Some(memento) if !memento.is_empty() => memento.clone(),
            _ => return Err(EditError::EmptySelection),
        };
        let before: HashSet<String> = self
            .document()
            .shapes()
            .iter()
            .map(|s| s.unique_name().to_string())
            .collect();

        self.execute(Box::new(PasteArea::new(memento, top_left)))?;

        Ok(self
            .document()
            .shapes()
            .iter()
            .map(|s| s.unique_name())
            .filter(|name| !before.contains(*name))
            .map(str::to_string)
            .collect())
    }

    /// Replace the current document, clearing its history and selection.
    ///
    /// The window keeps its name.
    pub fn replace_document(&mut self, mut document: Document) {
        let window = self.window_mut();
        window.document.destroy_all(&mut window.surface);
        document.display_all(&mut window.surface);
        tracing::info!(
            "Window '{}' now shows '{}' with {} shapes",
            window.name,
            document.name(),
            document.len()
        );
        window.document = document;
        window.history.clear();
        window.selection = None;
    }
}
