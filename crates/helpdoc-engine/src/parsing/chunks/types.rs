/// Column at which a TEXT line stops being prose and becomes verbatim code.
///
/// Table lines whose first column starts at or beyond this column are not
/// tables either.
pub const CODE_INDENT: usize = 8;

/// The kind of a classified comment line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineKind {
    BlankLine,
    /// `Text::` section heading.
    Header,
    /// Two columns separated by at least three spaces.
    Table,
    /// `- item` bullet.
    List,
    Text,
    /// `See also a, b, c.` cross-reference line.
    SeeAlso,
    /// Always the first line of a document.
    Summary,
    /// A run of dashes.
    TableSep,
    /// End of the comment block.
    End,
}

/// Indentation of a classified line, measured in columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indent {
    Column(usize),
    /// Table lines carry the start column of both cells.
    Columns { col1: usize, col2: usize },
}

impl Indent {
    /// The leading column: the only column for most lines, the first cell for tables.
    pub fn column(self) -> usize {
        match self {
            Indent::Column(c) => c,
            Indent::Columns { col1, .. } => col1,
        }
    }

    /// Start column of the second table cell, if this is a table indent.
    pub fn second_column(self) -> Option<usize> {
        match self {
            Indent::Column(_) => None,
            Indent::Columns { col2, .. } => Some(col2),
        }
    }
}

/// The text fields carried by a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    None,
    Single(String),
    Columns(String, String),
}

/// Classification of a single line containing only local facts.
///
/// Produced by [`CommentLineClassifier`](super::CommentLineClassifier) without
/// reference to the surrounding lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineClass {
    pub kind: LineKind,
    pub indent: Indent,
    pub payload: Payload,
}

impl LineClass {
    pub fn new(kind: LineKind, indent: usize, text: impl Into<String>) -> Self {
        Self {
            kind,
            indent: Indent::Column(indent),
            payload: Payload::Single(text.into()),
        }
    }

    pub fn blank() -> Self {
        Self::new(LineKind::BlankLine, 0, "")
    }

    pub fn end() -> Self {
        Self::new(LineKind::End, 0, "")
    }
}

/// A logical line: a classified line plus its position in the comment block,
/// after continuation lines have been merged in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    /// 1-based line number of the first raw line.
    pub number: usize,
    pub class: LineClass,
}

impl Line {
    pub fn kind(&self) -> LineKind {
        self.class.kind
    }

    pub fn indent(&self) -> Indent {
        self.class.indent
    }

    pub fn column(&self) -> usize {
        self.class.indent.column()
    }

    /// The single text field, or the first cell of a table line.
    pub fn text(&self) -> &str {
        match &self.class.payload {
            Payload::None => "",
            Payload::Single(t) => t.trim(),
            Payload::Columns(c1, _) => c1.trim(),
        }
    }

    pub fn col1(&self) -> &str {
        self.text()
    }

    pub fn col2(&self) -> &str {
        match &self.class.payload {
            Payload::Columns(_, c2) => c2.trim(),
            _ => "",
        }
    }

    /// Whether `other` continues the chunk started by `self`.
    ///
    /// Kinds must match and so must indents, except that two TEXT lines at
    /// or beyond `CODE_INDENT` are always in the same chunk whatever their
    /// exact indent.
    pub fn same_chunk(&self, other: &Line) -> bool {
        if self.kind() == LineKind::Text
            && other.kind() == LineKind::Text
            && self.column() >= CODE_INDENT
            && other.column() >= CODE_INDENT
        {
            return true;
        }
        self.kind() == other.kind() && self.indent() == other.indent()
    }

    /// Rebuilds the source text of a table line with its original cell spacing.
    pub fn table_text(&self) -> String {
        match self.indent() {
            Indent::Columns { col1, col2 } => {
                let c1 = self.col1();
                let gap = col2.saturating_sub(col1 + c1.chars().count()).max(3);
                format!("{c1}{}{}", " ".repeat(gap), self.col2())
            }
            Indent::Column(_) => self.text().to_string(),
        }
    }
}

/// Converts a byte offset in `s` into a column (character) offset.
pub fn column_of(s: &str, byte: usize) -> usize {
    s[..byte].chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(kind: LineKind, indent: usize) -> Line {
        Line {
            number: 2,
            class: LineClass::new(kind, indent, "x"),
        }
    }

    #[test]
    fn same_kind_and_indent_is_same_chunk() {
        assert!(line(LineKind::Text, 4).same_chunk(&line(LineKind::Text, 4)));
        assert!(!line(LineKind::Text, 4).same_chunk(&line(LineKind::Text, 5)));
        assert!(!line(LineKind::Text, 4).same_chunk(&line(LineKind::List, 4)));
    }

    #[test]
    fn deep_text_lines_tolerate_ragged_indent() {
        assert!(line(LineKind::Text, 9).same_chunk(&line(LineKind::Text, 14)));
        assert!(line(LineKind::Text, 8).same_chunk(&line(LineKind::Text, 12)));
        assert!(line(LineKind::Text, 10).same_chunk(&line(LineKind::Text, 8)));
    }

    #[test]
    fn prose_next_to_code_is_a_new_chunk() {
        assert!(!line(LineKind::Text, 7).same_chunk(&line(LineKind::Text, 8)));
        assert!(!line(LineKind::Text, 8).same_chunk(&line(LineKind::Text, 7)));
    }

    #[test]
    fn table_text_restores_spacing() {
        let l = Line {
            number: 3,
            class: LineClass {
                kind: LineKind::Table,
                indent: Indent::Columns { col1: 2, col2: 10 },
                payload: Payload::Columns("opt".into(), "an option".into()),
            },
        };
        assert_eq!(l.table_text(), "opt     an option");
    }

    #[test]
    fn column_counts_characters() {
        assert_eq!(column_of("ab\u{e9}cd", 4), 3);
    }
}
