use serde::{Deserialize, Serialize};

use super::chunks::{
    CommentLineClassifier,
    types::{Indent, Line, LineClass, LineKind, Payload},
};

/// How raw lines relate to the comment block they belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeaderMode {
    /// Every line must start with [`LeaderMode::COMMENT_LEADER`]; the first
    /// line that doesn't ends the block. Leaders are stripped.
    #[default]
    Comment,
    /// Lines are already stripped of their leader.
    Plain,
}

impl LeaderMode {
    pub const COMMENT_LEADER: char = '%';

    /// Strips the leader and trailing whitespace, or returns `None` when the
    /// raw line is not part of the comment block.
    pub fn strip(self, raw: &str) -> Option<&str> {
        let raw = raw.trim_end_matches('\r');
        match self {
            LeaderMode::Plain => Some(raw.trim_end()),
            LeaderMode::Comment if raw.is_empty() => Some(raw),
            LeaderMode::Comment if raw.starts_with(Self::COMMENT_LEADER) => {
                Some(raw.trim_start_matches(Self::COMMENT_LEADER).trim_end())
            }
            LeaderMode::Comment => None,
        }
    }
}

/// Cursor over the raw lines of one document, handing out logical lines.
///
/// The first line is always SUMMARY. Table and list lines absorb a directly
/// following TEXT line aligned with their text, so callers only ever see
/// merged continuation lines.
pub struct LineReader<'a> {
    lines: Vec<&'a str>,
    pos: usize,
    mode: LeaderMode,
    finished: bool,
    classifier: CommentLineClassifier,
}

impl<'a> LineReader<'a> {
    pub fn new(doc: &'a str, mode: LeaderMode) -> Self {
        Self {
            lines: doc.split('\n').collect(),
            pos: 0,
            mode,
            finished: false,
            classifier: CommentLineClassifier,
        }
    }

    /// Reads the next logical line, consuming a continuation line if present.
    ///
    /// Once END has been returned every further call returns END again.
    pub fn next_line(&mut self) -> Line {
        let mut line = self.read_raw();

        let continuation_column = match (line.kind(), line.indent()) {
            (LineKind::Table, Indent::Columns { col2, .. }) => Some(col2),
            (LineKind::List, Indent::Column(col)) => Some(col),
            _ => None,
        };

        if let Some(col) = continuation_column {
            let next = self.peek();
            if next.kind == LineKind::Text && next.indent == Indent::Column(col) {
                if let Payload::Single(text) = &next.payload {
                    append_continuation(&mut line.class.payload, text);
                }
                self.read_raw();
            }
        }

        log::trace!(
            "line {}: {:?} indent={:?} {:?}",
            line.number,
            line.kind(),
            line.indent(),
            line.class.payload
        );
        line
    }

    fn read_raw(&mut self) -> Line {
        if self.finished {
            return Line {
                number: self.pos,
                class: LineClass::end(),
            };
        }
        let class = self.classify_at(self.pos);
        if class.kind == LineKind::End {
            self.finished = true;
        }
        self.pos += 1;
        Line {
            number: self.pos,
            class,
        }
    }

    fn peek(&self) -> LineClass {
        if self.finished {
            return LineClass::end();
        }
        self.classify_at(self.pos)
    }

    fn classify_at(&self, idx: usize) -> LineClass {
        let Some(raw) = self.lines.get(idx) else {
            return LineClass::end();
        };
        let Some(text) = self.mode.strip(raw) else {
            return LineClass::end();
        };
        if idx == 0 {
            return LineClass::new(LineKind::Summary, 0, text.trim());
        }
        self.classifier.classify(text)
    }
}

fn append_continuation(payload: &mut Payload, text: &str) {
    match payload {
        Payload::Single(t) | Payload::Columns(_, t) => {
            t.push(' ');
            t.push_str(text);
        }
        Payload::None => {}
    }
}
