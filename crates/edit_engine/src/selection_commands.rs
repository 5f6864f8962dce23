//! Area paste command

use crate::{Command, EditContext, EditError, Result};
use doc_model::{Drawable, Point, SelectionMemento, Shape};

/// Paste clones of a selection with its top-left corner at a new point
#[derive(Debug, Clone)]
pub struct PasteArea {
    memento: SelectionMemento,
    top_left: Point,
    pasted: Vec<String>,
    /// Clones removed by undo with their layers, highest layer first
    removed: Vec<(usize, Shape)>,
    executed: bool,
}

impl PasteArea {
    pub fn new(memento: SelectionMemento, top_left: Point) -> Self {
        Self {
            memento,
            top_left,
            pasted: Vec::new(),
            removed: Vec::new(),
            executed: false,
        }
    }

    /// Names of the clones added by the last execution
    pub fn pasted(&self) -> &[String] {
        &self.pasted
    }

    fn reinsert(&mut self, ctx: &mut EditContext<'_>) -> Result<()> {
        for (_, shape) in &self.removed {
            ctx.document.check_insertable(shape)?;
        }
        while let Some((index, shape)) = self.removed.pop() {
            ctx.document
                .insert_displayed(shape, Some(index), ctx.surface)?;
        }
        Ok(())
    }
}

impl Command for PasteArea {
    fn execute(&mut self, ctx: &mut EditContext<'_>) -> Result<()> {
        if self.removed.is_empty() {
            let pasted = self
                .memento
                .paste_area(ctx.document, self.top_left, ctx.surface)?;
            if pasted.is_empty() {
                return Err(EditError::EmptySelection);
            }
            self.pasted = pasted;
        } else {
            self.reinsert(ctx)?;
        }
        self.executed = true;
        Ok(())
    }

    fn unexecute(&mut self, ctx: &mut EditContext<'_>) -> Result<()> {
        if !self.executed {
            return Err(EditError::NotExecuted(self.display_name()));
        }
        for name in &self.pasted {
            ctx.document.index_of(name)?;
        }
        for name in self.pasted.iter().rev() {
            let (index, mut shape) = ctx.document.remove(name)?;
            shape.destroy(ctx.surface);
            self.removed.push((index, shape));
        }
        self.executed = false;
        Ok(())
    }

    fn display_name(&self) -> String {
        format!(
            "paste {} shapes at {}",
            self.memento.captured().len(),
            self.top_left
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use doc_model::Document;
    use render_model::RecordingSurface;

    #[test]
    fn test_paste_undo_redo() {
        let mut surface = RecordingSurface::new();
        let mut doc = Document::new("paste");
        for (name, x) in [("a", 1.0), ("b", 2.0), ("far", 90.0)] {
            doc.insert_displayed(Shape::rectangle(name, Point::new(x, 1.0), 1.0, 1.0), None, &mut surface)
                .unwrap();
        }
        let memento = SelectionMemento::save_area(&doc, Point::ORIGIN, Point::new(5.0, 5.0));
        let before = doc.snapshot();

        let mut cmd = PasteArea::new(memento, Point::new(50.0, 50.0));
        let mut ctx = EditContext::new(&mut doc, &mut surface);
        cmd.execute(&mut ctx).unwrap();
        assert_eq!(cmd.pasted(), &["a_copy", "b_copy"]);
        let after = ctx.document.snapshot();

        cmd.unexecute(&mut ctx).unwrap();
        assert_eq!(ctx.document.snapshot(), before);

        cmd.execute(&mut ctx).unwrap();
        assert_eq!(ctx.document.snapshot(), after);
        assert_eq!(
            ctx.document.find_by_name("b_copy").unwrap().center(),
            Point::new(52.0, 51.0)
        );
        assert_eq!(surface.overdraws(), 0);
        assert!(surface.visible("a_copy").is_some());
    }

    #[test]
    fn test_empty_paste_is_rejected() {
        let mut doc = Document::new("empty");
        let memento = SelectionMemento::save_area(&doc, Point::ORIGIN, Point::new(5.0, 5.0));
        let mut cmd = PasteArea::new(memento, Point::ORIGIN);
        let err = cmd
            .execute(&mut EditContext::new(&mut doc, &mut render_model::NullSurface))
            .unwrap_err();
        assert!(matches!(err, EditError::EmptySelection));
    }
}
