use std::fmt;

use super::{DocContext, ModuleInfo, Renderer};

/// One recorded renderer call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    ModuleStart {
        name: String,
        summary: String,
        is_member: bool,
    },
    ModuleEnd,
    Heading(String),
    ParagraphStart,
    ParagraphLine {
        text: String,
        signature: String,
    },
    ParagraphEnd,
    CodeStart,
    CodeLine(String),
    CodeEnd,
    TableStart,
    TableRow(String, String),
    TableSeparator,
    TableEnd,
    ListStart,
    ListItem(String),
    ListEnd,
    SeeAlsoStart,
    SeeAlsoEntry(String),
    SeeAlsoEnd,
}

/// The bracketed block an event opens or closes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    Module,
    Paragraph,
    Code,
    Table,
    List,
    SeeAlso,
}

impl Event {
    pub fn opens(&self) -> Option<BlockKind> {
        match self {
            Event::ModuleStart { .. } => Some(BlockKind::Module),
            Event::ParagraphStart => Some(BlockKind::Paragraph),
            Event::CodeStart => Some(BlockKind::Code),
            Event::TableStart => Some(BlockKind::Table),
            Event::ListStart => Some(BlockKind::List),
            Event::SeeAlsoStart => Some(BlockKind::SeeAlso),
            _ => None,
        }
    }

    pub fn closes(&self) -> Option<BlockKind> {
        match self {
            Event::ModuleEnd => Some(BlockKind::Module),
            Event::ParagraphEnd => Some(BlockKind::Paragraph),
            Event::CodeEnd => Some(BlockKind::Code),
            Event::TableEnd => Some(BlockKind::Table),
            Event::ListEnd => Some(BlockKind::List),
            Event::SeeAlsoEnd => Some(BlockKind::SeeAlso),
            _ => None,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::ModuleStart {
                name,
                summary,
                is_member,
            } => {
                write!(f, "module {name} {summary:?}")?;
                if *is_member {
                    f.write_str(" member")?;
                }
                Ok(())
            }
            Event::ModuleEnd => f.write_str("end module"),
            Event::Heading(text) => write!(f, "heading {text:?}"),
            Event::ParagraphStart => f.write_str("paragraph"),
            Event::ParagraphLine { text, signature } if signature.is_empty() => {
                write!(f, "line {text:?}")
            }
            Event::ParagraphLine { text, signature } => {
                write!(f, "line [{signature}] {text:?}")
            }
            Event::ParagraphEnd => f.write_str("end paragraph"),
            Event::CodeStart => f.write_str("code"),
            Event::CodeLine(text) => write!(f, "| {text}"),
            Event::CodeEnd => f.write_str("end code"),
            Event::TableStart => f.write_str("table"),
            Event::TableRow(col1, col2) => write!(f, "row {col1:?} {col2:?}"),
            Event::TableSeparator => f.write_str("separator"),
            Event::TableEnd => f.write_str("end table"),
            Event::ListStart => f.write_str("list"),
            Event::ListItem(text) => write!(f, "item {text:?}"),
            Event::ListEnd => f.write_str("end list"),
            Event::SeeAlsoStart => f.write_str("see-also"),
            Event::SeeAlsoEntry(name) => write!(f, "ref {name}"),
            Event::SeeAlsoEnd => f.write_str("end see-also"),
        }
    }
}

/// Renderer that records every call.
#[derive(Debug, Default, Clone)]
pub struct EventLog {
    events: Vec<Event>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn into_events(self) -> Vec<Event> {
        self.events
    }

    /// One event per line, indented by block depth.
    pub fn dump(&self) -> String {
        let mut out = String::new();
        let mut depth = 0usize;
        for event in &self.events {
            if event.closes().is_some() {
                depth = depth.saturating_sub(1);
            }
            out.push_str(&"  ".repeat(depth));
            out.push_str(&event.to_string());
            out.push('\n');
            if event.opens().is_some() {
                depth += 1;
            }
        }
        out
    }

    fn push(&mut self, event: Event) {
        self.events.push(event);
    }
}

impl Renderer for EventLog {
    fn module_start(&mut self, _ctx: &DocContext, info: &ModuleInfo<'_>) {
        self.push(Event::ModuleStart {
            name: info.name.to_string(),
            summary: info.summary.to_string(),
            is_member: info.is_member,
        });
    }

    fn module_end(&mut self) {
        self.push(Event::ModuleEnd);
    }

    fn heading(&mut self, _ctx: &DocContext, text: &str) {
        self.push(Event::Heading(text.to_string()));
    }

    fn paragraph_start(&mut self) {
        self.push(Event::ParagraphStart);
    }

    fn paragraph_line(&mut self, _ctx: &DocContext, text: &str, signature: &str) {
        self.push(Event::ParagraphLine {
            text: text.to_string(),
            signature: signature.to_string(),
        });
    }

    fn paragraph_end(&mut self) {
        self.push(Event::ParagraphEnd);
    }

    fn code_start(&mut self) {
        self.push(Event::CodeStart);
    }

    fn code_line(&mut self, text: &str) {
        self.push(Event::CodeLine(text.to_string()));
    }

    fn code_end(&mut self) {
        self.push(Event::CodeEnd);
    }

    fn table_start(&mut self) {
        self.push(Event::TableStart);
    }

    fn table_row(&mut self, _ctx: &DocContext, col1: &str, col2: &str) {
        self.push(Event::TableRow(col1.to_string(), col2.to_string()));
    }

    fn table_separator(&mut self) {
        self.push(Event::TableSeparator);
    }

    fn table_end(&mut self) {
        self.push(Event::TableEnd);
    }

    fn list_start(&mut self) {
        self.push(Event::ListStart);
    }

    fn list_item(&mut self, _ctx: &DocContext, text: &str) {
        self.push(Event::ListItem(text.to_string()));
    }

    fn list_end(&mut self) {
        self.push(Event::ListEnd);
    }

    fn see_also_start(&mut self) {
        self.push(Event::SeeAlsoStart);
    }

    fn see_also_entry(&mut self, name: &str) {
        self.push(Event::SeeAlsoEntry(name.to_string()));
    }

    fn see_also_end(&mut self) {
        self.push(Event::SeeAlsoEnd);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BalanceError {
    #[error("event {index} closes {found:?} but {expected:?} is innermost")]
    Mismatched {
        index: usize,
        expected: Option<BlockKind>,
        found: BlockKind,
    },
    #[error("blocks still open at end of stream: {0:?}")]
    Unclosed(Vec<BlockKind>),
}

/// Checks that start and end events form a valid bracket sequence.
pub fn check_balanced(events: &[Event]) -> Result<(), BalanceError> {
    let mut open = Vec::new();
    for (index, event) in events.iter().enumerate() {
        if let Some(kind) = event.opens() {
            open.push(kind);
        } else if let Some(found) = event.closes() {
            let expected = open.pop();
            if expected != Some(found) {
                return Err(BalanceError::Mismatched {
                    index,
                    expected,
                    found,
                });
            }
        }
    }
    if open.is_empty() {
        Ok(())
    } else {
        Err(BalanceError::Unclosed(open))
    }
}
