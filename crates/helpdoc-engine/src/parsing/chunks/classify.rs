use super::{
    kinds::{Bullet, Header, SeeAlso, TableRow, TableSep},
    types::{Indent, LineClass, LineKind, Payload, column_of},
};

/// One entry of the classifier's priority table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    Blank,
    Header,
    Table,
    TableSep,
    Bullet,
    SeeAlso,
    /// Fallback: claims every line.
    Text,
}

impl Rule {
    /// Rules in priority order. Earlier rules shadow later ones, so a new line
    /// kind is added by inserting it at the right position here.
    pub const PRIORITY: [Rule; 7] = [
        Rule::Blank,
        Rule::Header,
        Rule::Table,
        Rule::TableSep,
        Rule::Bullet,
        Rule::SeeAlso,
        Rule::Text,
    ];

    /// Applies this rule to a leader-stripped line.
    pub fn apply(self, line: &str) -> Option<LineClass> {
        match self {
            Rule::Blank => line.trim().is_empty().then(LineClass::blank),
            Rule::Header => {
                Header::parse(line).map(|(col, text)| LineClass::new(LineKind::Header, col, text))
            }
            Rule::Table => TableRow::parse(line).map(|cells| LineClass {
                kind: LineKind::Table,
                indent: Indent::Columns {
                    col1: cells.col1_column,
                    col2: cells.col2_column,
                },
                payload: Payload::Columns(cells.col1.to_string(), cells.col2.to_string()),
            }),
            Rule::TableSep => TableSep::matches(line).then(|| LineClass {
                kind: LineKind::TableSep,
                indent: Indent::Column(0),
                payload: Payload::None,
            }),
            Rule::Bullet => {
                Bullet::parse(line).map(|(col, text)| LineClass::new(LineKind::List, col, text))
            }
            Rule::SeeAlso => {
                SeeAlso::parse(line).map(|(col, text)| LineClass::new(LineKind::SeeAlso, col, text))
            }
            Rule::Text => Some(text_class(line)),
        }
    }
}

fn text_class(line: &str) -> LineClass {
    let content = line.trim_start();
    let col = column_of(line, line.len() - content.len());
    LineClass::new(LineKind::Text, col, content.trim_end())
}

/// Classifies individual comment lines.
///
/// This is phase 1 of document recovery: each line is classified on its own,
/// without reference to its neighbours.
pub struct CommentLineClassifier;

impl CommentLineClassifier {
    /// Classifies a line whose comment leader has already been stripped.
    ///
    /// Never fails: a line no rule claims becomes TEXT at its first non-blank
    /// column.
    pub fn classify(&self, line: &str) -> LineClass {
        Rule::PRIORITY
            .iter()
            .find_map(|rule| rule.apply(line))
            .unwrap_or_else(|| text_class(line))
    }
}
