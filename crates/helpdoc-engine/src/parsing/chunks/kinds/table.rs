use std::sync::OnceLock;

use regex::Regex;

use crate::parsing::chunks::types::{CODE_INDENT, column_of};

/// A two-column row such as `'opt'      description of the option`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableCells<'a> {
    pub col1_column: usize,
    pub col1: &'a str,
    pub col2_column: usize,
    pub col2: &'a str,
}

/// Option/description table rows.
pub struct TableRow;

impl TableRow {
    /// Minimum run of spaces separating the two cells.
    pub const MIN_GAP: usize = 3;

    /// Matches two non-blank runs separated by at least [`Self::MIN_GAP`] spaces.
    ///
    /// Rows whose first cell starts at or past [`CODE_INDENT`] are rejected so
    /// that deeply indented tabular text stays verbatim.
    pub fn parse(line: &str) -> Option<TableCells<'_>> {
        static TABLE_REGEX: OnceLock<Regex> = OnceLock::new();
        let re = TABLE_REGEX.get_or_init(|| {
            let gap = Self::MIN_GAP;
            Regex::new(&format!(r"^\s*(?P<col1>\S(?:.*?\S)?)\s{{{gap},}}(?P<col2>\S.*)$"))
                .expect("Invalid table regex")
        });

        let caps = re.captures(line)?;
        let col1 = caps.name("col1")?;
        let col2 = caps.name("col2")?;
        let col1_column = column_of(line, col1.start());
        if col1_column >= CODE_INDENT {
            return None;
        }
        Some(TableCells {
            col1_column,
            col1: col1.as_str(),
            col2_column: column_of(line, col2.start()),
            col2: col2.as_str(),
        })
    }
}
