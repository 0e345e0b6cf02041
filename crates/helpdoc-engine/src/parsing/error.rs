/// Structural problems found while recovering document structure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormatError {
    #[error(
        "list nesting inconsistent at line {line}: indent {indent} matches no open list (open: {open:?})"
    )]
    InconsistentListNesting {
        /// 1-based line number of the offending bullet.
        line: usize,
        /// Text column of the offending bullet.
        indent: usize,
        /// Text columns of the lists that were open, outermost first.
        open: Vec<usize>,
    },
}
