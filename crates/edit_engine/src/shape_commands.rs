//! Shape commands for creating, deleting, moving, editing and decorating shapes

use crate::{Command, EditContext, EditError, Result};
use doc_model::{
    AttributeValue, Decoration, DeletionMemento, DocModelError, Document, Drawable, Point, Shape,
};
use serde::{Deserialize, Serialize};

/// Look up a shape that commands may act on
pub(crate) fn editable_shape<'d>(document: &'d mut Document, name: &str) -> Result<&'d mut Shape> {
    Ok(document.find_by_name_mut(name)?)
}

/// Add a new shape in front of all others
#[derive(Debug, Clone)]
pub struct CreateShape {
    shape: Shape,
    executed: bool,
}

impl CreateShape {
    pub fn new(shape: Shape) -> Self {
        Self {
            shape: shape.duplicate(),
            executed: false,
        }
    }
}

impl Command for CreateShape {
    fn execute(&mut self, ctx: &mut EditContext<'_>) -> Result<()> {
        self.shape.validate()?;
        ctx.document.check_base_name(self.shape.base_name())?;
        ctx.document
            .insert_displayed(self.shape.duplicate(), None, ctx.surface)?;
        self.executed = true;
        Ok(())
    }

    fn unexecute(&mut self, ctx: &mut EditContext<'_>) -> Result<()> {
        if !self.executed {
            return Err(EditError::NotExecuted(self.display_name()));
        }
        let (_, mut shape) = ctx.document.remove(self.shape.unique_name())?;
        shape.destroy(ctx.surface);
        self.executed = false;
        Ok(())
    }

    fn display_name(&self) -> String {
        format!("create {} '{}'", self.shape.type_name(), self.shape.unique_name())
    }
}

/// Delete a shape, remembering its layer
#[derive(Debug, Clone)]
pub struct DeleteShape {
    name: String,
    memento: Option<DeletionMemento>,
}

impl DeleteShape {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            memento: None,
        }
    }
}

impl Command for DeleteShape {
    fn execute(&mut self, ctx: &mut EditContext<'_>) -> Result<()> {
        editable_shape(ctx.document, &self.name)?;
        self.memento = Some(DeletionMemento::capture(
            ctx.document,
            &self.name,
            ctx.surface,
        )?);
        Ok(())
    }

    fn unexecute(&mut self, ctx: &mut EditContext<'_>) -> Result<()> {
        let memento = self
            .memento
            .as_ref()
            .ok_or_else(|| EditError::NotExecuted(self.display_name()))?;
        memento.restore(ctx.document, ctx.surface)?;
        self.memento = None;
        Ok(())
    }

    fn display_name(&self) -> String {
        format!("delete '{}'", self.name)
    }
}

/// How a move is specified
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Motion {
    /// Translate by an offset
    By { dx: f64, dy: f64 },
    /// Place the center at a point
    To(Point),
}

/// Move a shape
#[derive(Debug, Clone)]
pub struct MoveShape {
    name: String,
    motion: Motion,
    previous: Option<Point>,
}

impl MoveShape {
    pub fn by(name: impl Into<String>, dx: f64, dy: f64) -> Self {
        Self {
            name: name.into(),
            motion: Motion::By { dx, dy },
            previous: None,
        }
    }

    pub fn to(name: impl Into<String>, center: Point) -> Self {
        Self {
            name: name.into(),
            motion: Motion::To(center),
            previous: None,
        }
    }
}

impl Command for MoveShape {
    fn execute(&mut self, ctx: &mut EditContext<'_>) -> Result<()> {
        let shape = editable_shape(ctx.document, &self.name)?;
        let previous = shape.center();
        match self.motion {
            Motion::By { dx, dy } => shape.move_by(dx, dy, ctx.surface),
            Motion::To(center) => shape.move_to(center, ctx.surface),
        }
        self.previous = Some(previous);
        Ok(())
    }

    fn unexecute(&mut self, ctx: &mut EditContext<'_>) -> Result<()> {
        let previous = self
            .previous
            .ok_or_else(|| EditError::NotExecuted(self.display_name()))?;
        editable_shape(ctx.document, &self.name)?.move_to(previous, ctx.surface);
        self.previous = None;
        Ok(())
    }

    fn display_name(&self) -> String {
        match self.motion {
            Motion::By { dx, dy } => format!("move '{}' by ({}, {})", self.name, dx, dy),
            Motion::To(center) => format!("move '{}' to {}", self.name, center),
        }
    }
}

/// Set one attribute of a shape
#[derive(Debug, Clone)]
pub struct EditAttribute {
    name: String,
    attribute: String,
    value: AttributeValue,
    previous: Option<AttributeValue>,
}

impl EditAttribute {
    pub fn new(
        name: impl Into<String>,
        attribute: impl Into<String>,
        value: impl Into<AttributeValue>,
    ) -> Self {
        Self {
            name: name.into(),
            attribute: attribute.into(),
            value: value.into(),
            previous: None,
        }
    }
}

impl Command for EditAttribute {
    fn execute(&mut self, ctx: &mut EditContext<'_>) -> Result<()> {
        let shape = editable_shape(ctx.document, &self.name)?;
        let previous = shape.edit(&self.attribute, &self.value, ctx.surface)?;
        self.previous = Some(previous);
        Ok(())
    }

    fn unexecute(&mut self, ctx: &mut EditContext<'_>) -> Result<()> {
        let previous = self
            .previous
            .as_ref()
            .ok_or_else(|| EditError::NotExecuted(self.display_name()))?;
        editable_shape(ctx.document, &self.name)?.edit(&self.attribute, previous, ctx.surface)?;
        self.previous = None;
        Ok(())
    }

    fn display_name(&self) -> String {
        format!("set {} of '{}' to {}", self.attribute, self.name, self.value)
    }
}

/// Wrap a shape in a decorator
#[derive(Debug, Clone)]
pub struct AddDecoration {
    name: String,
    decoration: Decoration,
    decorated: Option<String>,
}

impl AddDecoration {
    pub fn new(name: impl Into<String>, decoration: Decoration) -> Self {
        Self {
            name: name.into(),
            decoration,
            decorated: None,
        }
    }
}

impl Command for AddDecoration {
    fn execute(&mut self, ctx: &mut EditContext<'_>) -> Result<()> {
        let decorated = ctx
            .document
            .decorate(&self.name, self.decoration.clone(), ctx.surface)?;
        self.decorated = Some(decorated);
        Ok(())
    }

    fn unexecute(&mut self, ctx: &mut EditContext<'_>) -> Result<()> {
        let decorated = self
            .decorated
            .as_deref()
            .ok_or_else(|| EditError::NotExecuted(self.display_name()))?;
        ctx.document.strip_decoration(decorated, ctx.surface)?;
        self.decorated = None;
        Ok(())
    }

    fn display_name(&self) -> String {
        format!("add {} to '{}'", self.decoration.type_name(), self.name)
    }
}

/// Remove the outermost decorator of a shape
#[derive(Debug, Clone)]
pub struct RemoveDecoration {
    name: String,
    removed: Option<(String, Decoration)>,
}

impl RemoveDecoration {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            removed: None,
        }
    }
}

impl Command for RemoveDecoration {
    fn execute(&mut self, ctx: &mut EditContext<'_>) -> Result<()> {
        let removed = ctx.document.strip_decoration(&self.name, ctx.surface)?;
        self.removed = Some(removed);
        Ok(())
    }

    fn unexecute(&mut self, ctx: &mut EditContext<'_>) -> Result<()> {
        let (inner, decoration) = self
            .removed
            .as_ref()
            .ok_or_else(|| EditError::NotExecuted(self.display_name()))?;
        ctx.document
            .decorate(inner, decoration.clone(), ctx.surface)
            .map_err(|e| match e {
                DocModelError::ShapeNotFound(_) => EditError::from(e),
                other => EditError::InvalidCommand(format!(
                    "cannot restore decoration on '{}': {}",
                    inner, other
                )),
            })?;
        self.removed = None;
        Ok(())
    }

    fn display_name(&self) -> String {
        format!("remove decoration from '{}'", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use doc_model::TexturePattern;
    use render_model::RecordingSurface;

    fn setup() -> (Document, RecordingSurface) {
        let mut doc = Document::new("test");
        let mut surface = RecordingSurface::new();
        for (i, name) in ["a", "b", "c", "d", "e"].iter().enumerate() {
            doc.insert_displayed(
                Shape::rectangle(*name, Point::new(i as f64 * 10.0, 0.0), 5.0, 5.0),
                None,
                &mut surface,
            )
            .unwrap();
        }
        (doc, surface)
    }

    fn names(doc: &Document) -> Vec<&str> {
        doc.shapes().iter().map(|s| s.unique_name()).collect()
    }

    #[test]
    fn test_create_and_undo() {
        let (mut doc, mut surface) = setup();
        let mut cmd = CreateShape::new(Shape::ellipse("z", Point::ORIGIN, 3.0, 3.0));
        let mut ctx = EditContext::new(&mut doc, &mut surface);
        assert!(matches!(cmd.unexecute(&mut ctx), Err(EditError::NotExecuted(_))));

        cmd.execute(&mut ctx).unwrap();
        assert_eq!(ctx.document.len(), 6);
        cmd.unexecute(&mut ctx).unwrap();
        assert_eq!(doc.len(), 5);
        assert!(surface.visible("z").is_none());
    }

    #[test]
    fn test_create_duplicate_fails_cleanly() {
        let (mut doc, mut surface) = setup();
        let mut cmd = CreateShape::new(Shape::ellipse("a", Point::ORIGIN, 3.0, 3.0));
        let err = cmd
            .execute(&mut EditContext::new(&mut doc, &mut surface))
            .unwrap_err();
        assert!(matches!(err, EditError::DocModel(DocModelError::DuplicateName(_))));
        assert_eq!(doc.len(), 5);
    }

    #[test]
    fn test_create_rejects_invalid_geometry() {
        let (mut doc, mut surface) = setup();
        let mut cmd = CreateShape::new(Shape::rectangle("bad", Point::ORIGIN, -5.0, 0.0));
        let err = cmd
            .execute(&mut EditContext::new(&mut doc, &mut surface))
            .unwrap_err();
        assert!(matches!(err, EditError::DocModel(DocModelError::AttributeCast { .. })));
        assert_eq!(doc.len(), 5);
        assert!(surface.visible("bad").is_none());
    }

    #[test]
    fn test_delete_undo_restores_layer() {
        let (mut doc, mut surface) = setup();
        let mut cmd = DeleteShape::new("c");
        let mut ctx = EditContext::new(&mut doc, &mut surface);
        cmd.execute(&mut ctx).unwrap();
        assert_eq!(names(ctx.document), vec!["a", "b", "d", "e"]);
        cmd.unexecute(&mut ctx).unwrap();
        assert_eq!(names(&doc), vec!["a", "b", "c", "d", "e"]);
        assert_eq!(surface.overdraws(), 0);
    }

    #[test]
    fn test_move_undo_is_exact() {
        let (mut doc, mut surface) = setup();
        let mut cmd = MoveShape::by("b", 0.1, 0.7);
        let mut ctx = EditContext::new(&mut doc, &mut surface);
        cmd.execute(&mut ctx).unwrap();
        cmd.unexecute(&mut ctx).unwrap();
        assert_eq!(doc.find_by_name("b").unwrap().center(), Point::new(10.0, 0.0));
    }

    #[test]
    fn test_edit_undo_restores_value() {
        let (mut doc, mut surface) = setup();
        let mut cmd = EditAttribute::new("a", "fill", "red");
        let mut ctx = EditContext::new(&mut doc, &mut surface);
        cmd.execute(&mut ctx).unwrap();
        assert_eq!(cmd.display_name(), "set fill of 'a' to red");
        cmd.unexecute(&mut ctx).unwrap();
        assert_eq!(
            doc.find_by_name("a").unwrap().attribute("fill").unwrap(),
            AttributeValue::Color(doc_model::ShapeColor::TRANSPARENT)
        );
    }

    #[test]
    fn test_edit_bad_value_records_nothing() {
        let (mut doc, mut surface) = setup();
        let mut cmd = EditAttribute::new("a", "width", "huge");
        let mut ctx = EditContext::new(&mut doc, &mut surface);
        assert!(cmd.execute(&mut ctx).is_err());
        assert!(matches!(cmd.unexecute(&mut ctx), Err(EditError::NotExecuted(_))));
    }

    #[test]
    fn test_decoration_round_trip() {
        let (mut doc, mut surface) = setup();
        let before = doc.snapshot();
        let mut add = AddDecoration::new("b", Decoration::texture(TexturePattern::Cross));
        let mut ctx = EditContext::new(&mut doc, &mut surface);
        add.execute(&mut ctx).unwrap();
        assert_eq!(ctx.document.index_of("b+texture").unwrap(), 1);

        let mut edit = EditAttribute::new("b", "spacing", 9.0);
        edit.execute(&mut ctx).unwrap();
        let mut remove = RemoveDecoration::new("b");
        remove.execute(&mut ctx).unwrap();
        assert!(ctx.document.find_by_name("b+texture").is_err());

        remove.unexecute(&mut ctx).unwrap();
        assert_eq!(
            ctx.document.find_by_name("b").unwrap().attribute("spacing").unwrap(),
            AttributeValue::Number(9.0)
        );
        edit.unexecute(&mut ctx).unwrap();
        add.unexecute(&mut ctx).unwrap();
        assert_eq!(doc.snapshot(), before);
        assert_eq!(surface.overdraws(), 0);
    }

    #[test]
    fn test_marker_cannot_be_targeted() {
        let (mut doc, mut surface) = setup();
        let area = doc_model::Area::from_corners(Point::ORIGIN, Point::new(1.0, 1.0));
        doc.set_selection_marker(&area, &mut surface);
        let mut cmd = DeleteShape::new(doc_model::SELECTION_MARKER_NAME);
        assert!(cmd
            .execute(&mut EditContext::new(&mut doc, &mut surface))
            .is_err());
        assert_eq!(doc.len(), 5);
        assert!(doc.has_selection_marker());
    }
}
