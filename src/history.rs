use crate::drawable::Drawable;

/// Committed drawables plus the redo side-stack.
///
/// A drawable lives in exactly one of the two stacks. Empty-stack undo and
/// redo are ordinary no-ops and report `false`.
#[derive(Debug, Default, Clone)]
pub struct History {
    /// Render order, oldest first.
    committed: Vec<Drawable>,
    /// Most recently undone drawable last.
    redo_buffer: Vec<Drawable>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a new drawable. Redo history does not survive a new edit.
    pub fn commit(&mut self, drawable: Drawable) {
        log::debug!("commit {} ({} redo entries dropped)", drawable.kind(), self.redo_buffer.len());
        self.committed.push(drawable);
        self.redo_buffer.clear();
    }

    /// Move the newest committed drawable onto the redo stack.
    pub fn undo(&mut self) -> bool {
        let Some(drawable) = self.committed.pop() else {
            return false;
        };
        self.redo_buffer.push(drawable);
        true
    }

    /// Move the most recently undone drawable back onto the committed stack.
    pub fn redo(&mut self) -> bool {
        let Some(drawable) = self.redo_buffer.pop() else {
            return false;
        };
        self.committed.push(drawable);
        true
    }

    /// Drop everything, redo history included.
    pub fn clear_all(&mut self) {
        self.committed.clear();
        self.redo_buffer.clear();
    }

    pub fn clear_redo(&mut self) {
        self.redo_buffer.clear();
    }

    pub fn committed(&self) -> &[Drawable] {
        &self.committed
    }

    pub fn redo_buffer(&self) -> &[Drawable] {
        &self.redo_buffer
    }

    pub fn can_undo(&self) -> bool {
        !self.committed.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_buffer.is_empty()
    }

    /// The newest committed drawable, which is the one a live gesture grows.
    pub(crate) fn last_mut(&mut self) -> Option<&mut Drawable> {
        self.committed.last_mut()
    }

    /// Remove the newest committed drawable without making it redoable.
    pub(crate) fn discard_last(&mut self) -> Option<Drawable> {
        self.committed.pop()
    }
}
