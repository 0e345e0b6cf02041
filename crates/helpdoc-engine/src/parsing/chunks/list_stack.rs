use super::types::Line;

/// The ancestors of the innermost open list, outermost first.
///
/// Each entry is the item line that was current when a deeper list opened, so
/// the number of open lists is always `depth() + 1` while a list block runs.
#[derive(Debug, Default, Clone)]
pub struct ListStack(Vec<Line>);

impl ListStack {
    pub fn push(&mut self, parent: Line) {
        self.0.push(parent);
    }

    pub fn pop(&mut self) -> Option<Line> {
        self.0.pop()
    }

    pub fn depth(&self) -> usize {
        self.0.len()
    }

    /// Indents of the open ancestors, outermost first.
    pub fn columns(&self) -> Vec<usize> {
        self.0.iter().map(Line::column).collect()
    }
}
