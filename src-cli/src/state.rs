//! Editing session state behind the prompt

use crate::commands::{Request, USAGE};
use doc_model::Drawable;
use edit_engine::{
    AddDecoration, ChangeLayer, Command, CreateShape, DeleteShape, EditAttribute, EditError,
    EditingEngine, MoveShape, RemoveDecoration,
};
use render_model::RecordingSurface;
use store::SettingsManager;

/// What the prompt should do after a request
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Print a message and continue
    Reply(String),
    /// A recoverable problem worth mentioning
    Warning(String),
    /// The request failed; nothing changed
    Failed(String),
    Quit,
}

impl From<EditError> for Outcome {
    fn from(e: EditError) -> Self {
        if e.is_warning() {
            tracing::warn!("{}", e);
            Outcome::Warning(e.to_string())
        } else {
            tracing::error!("{}", e);
            Outcome::Failed(e.to_string())
        }
    }
}

/// The engine plus the settings it was configured from
pub struct Session {
    engine: EditingEngine<RecordingSurface>,
    settings: SettingsManager,
}

impl Session {
    pub fn new(settings: SettingsManager) -> Self {
        let current = settings.get();
        let engine = EditingEngine::new("untitled", RecordingSurface::new())
            .with_settings(current.history.depth, current.ordering.strategy);
        Self { engine, settings }
    }

    pub fn engine(&self) -> &EditingEngine<RecordingSurface> {
        &self.engine
    }

    /// Text shown before each line of input
    pub fn prompt(&self) -> String {
        let window = self.engine.current_window().name();
        match self.engine.history().undo_description() {
            Some(last) => format!("{} [{}]> ", window, last),
            None => format!("{}> ", window),
        }
    }

    fn run(&mut self, command: Box<dyn Command>) -> Outcome {
        let name = command.display_name();
        match self.engine.execute(command) {
            Ok(()) => Outcome::Reply(name),
            Err(e) => e.into(),
        }
    }

    fn persist(&mut self, result: store::Result<()>) {
        if let Err(e) = result {
            tracing::warn!(
                "Could not save settings to {}: {}",
                self.settings.settings_path().display(),
                e
            );
        }
    }

    fn list(&self) -> String {
        let engine = &self.engine;
        let shapes = engine.ordered_shapes();
        if shapes.is_empty() {
            return format!("'{}' is empty", engine.document().name());
        }
        let mut lines = vec![format!(
            "{} shapes in {} order, {} on screen",
            shapes.len(),
            engine.ordering(),
            engine.surface().visible_count()
        )];
        for shape in shapes {
            let layer = engine
                .document()
                .index_of(shape.unique_name())
                .map(|i| i.to_string())
                .unwrap_or_default();
            lines.push(format!(
                "  [{}] {} ({}) at {}",
                layer,
                shape.unique_name(),
                shape.type_name(),
                shape.center()
            ));
        }
        lines.join("\n")
    }

    fn show(&self, name: &str) -> Outcome {
        let shape = match self.engine.document().find_by_name(name) {
            Ok(shape) => shape,
            Err(e) => return EditError::from(e).into(),
        };
        let mut lines = vec![format!("{} ({})", shape.unique_name(), shape.type_name())];
        for (key, value) in shape.accept().iter() {
            lines.push(format!("  {} = {}", key, value));
        }
        Outcome::Reply(lines.join("\n"))
    }

    fn help(&self, name: Option<&str>) -> Outcome {
        let Some(name) = name else {
            return Outcome::Reply(USAGE.to_string());
        };
        match self.engine.shape_help(name) {
            Ok(descriptors) => Outcome::Reply(
                descriptors
                    .iter()
                    .map(|d| format!("  {}", d))
                    .collect::<Vec<_>>()
                    .join("\n"),
            ),
            Err(e) => e.into(),
        }
    }

    /// Carry out one request
    pub fn handle(&mut self, request: Request) -> Outcome {
        match request {
            Request::NewWindow(name) => {
                match self.engine.open_window(name.clone(), RecordingSurface::new()) {
                    Ok(()) => Outcome::Reply(format!("opened window '{}'", name)),
                    Err(e) => e.into(),
                }
            }
            Request::SwitchWindow(name) => match self.engine.switch_window(&name) {
                Ok(()) => Outcome::Reply(format!("switched to '{}'", name)),
                Err(e) => e.into(),
            },
            Request::ListWindows => {
                let current = self.engine.current_window().name();
                Outcome::Reply(
                    self.engine
                        .window_names()
                        .iter()
                        .map(|w| {
                            let marker = if *w == current { "*" } else { " " };
                            format!("{} {}", marker, w)
                        })
                        .collect::<Vec<_>>()
                        .join("\n"),
                )
            }
            Request::Create(shape) => self.run(Box::new(CreateShape::new(shape))),
            Request::Move { name, motion } => {
                let command = match motion {
                    edit_engine::Motion::By { dx, dy } => MoveShape::by(name, dx, dy),
                    edit_engine::Motion::To(center) => MoveShape::to(name, center),
                };
                self.run(Box::new(command))
            }
            Request::Edit {
                name,
                attribute,
                value,
            } => self.run(Box::new(EditAttribute::new(name, attribute, value))),
            Request::Decorate { name, decoration } => {
                self.run(Box::new(AddDecoration::new(name, decoration)))
            }
            Request::Undecorate(name) => self.run(Box::new(RemoveDecoration::new(name))),
            Request::Delete(name) => self.run(Box::new(DeleteShape::new(name))),
            Request::Layer { name, target } => self.run(Box::new(ChangeLayer::new(name, target))),
            Request::Select {
                top_left,
                bottom_right,
            } => {
                let count = self.engine.select_area(top_left, bottom_right);
                Outcome::Reply(format!("selected {} shapes", count))
            }
            Request::Deselect => {
                self.engine.clear_selection();
                Outcome::Reply("selection cleared".to_string())
            }
            Request::Paste(top_left) => match self.engine.paste(top_left) {
                Ok(names) => Outcome::Reply(format!("pasted {}", names.join(", "))),
                Err(e) => e.into(),
            },
            Request::Undo => match self.engine.undo() {
                Ok(name) => Outcome::Reply(format!("undid {}", name)),
                Err(e) => e.into(),
            },
            Request::Redo => match self.engine.redo() {
                Ok(name) => Outcome::Reply(format!("redid {}", name)),
                Err(e) => e.into(),
            },
            Request::Depth(depth) => {
                self.engine.set_history_depth(depth);
                let result = self.settings.set_history_depth(depth);
                self.persist(result);
                Outcome::Reply(format!("history depth is {}", depth))
            }
            Request::Order(strategy) => {
                self.engine.set_ordering(strategy);
                let result = self.settings.set_ordering(strategy);
                self.persist(result);
                Outcome::Reply(format!("ordering is {}", strategy))
            }
            Request::List => Outcome::Reply(self.list()),
            Request::Show(name) => self.show(&name),
            Request::Help(name) => self.help(name.as_deref()),
            Request::Save(mut path) => {
                if path.extension().is_none() {
                    path.set_extension(store::FILE_EXTENSION);
                }
                match store::save_document(self.engine.document(), self.engine.ordering(), &path) {
                    Ok(()) => Outcome::Reply(format!("saved to {}", path.display())),
                    Err(e) => {
                        tracing::error!("Save failed: {}", e);
                        Outcome::Failed(e.to_string())
                    }
                }
            }
            Request::Load(path) => match store::load_document(&path) {
                Ok(document) => {
                    let count = document.len();
                    self.engine.replace_document(document);
                    Outcome::Reply(format!("loaded {} shapes from {}", count, path.display()))
                }
                Err(e) => {
                    tracing::error!("Load failed: {}", e);
                    Outcome::Failed(e.to_string())
                }
            },
            Request::Quit => Outcome::Quit,
        }
    }
}
