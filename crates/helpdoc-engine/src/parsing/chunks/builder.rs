use crate::{
    parsing::{
        DocRequest, FormatError,
        reader::LineReader,
        signature::extract_signature,
        xref::{resolve_name, split_names},
    },
    registry::NameResolver,
    render::{DocContext, ModuleInfo, Renderer},
};

use super::{
    list_stack::ListStack,
    types::{CODE_INDENT, Line, LineKind},
};

/// Groups logical lines into chunks and replays them as renderer calls.
///
/// Each handler consumes the lines of its chunk and returns the first line
/// that did not belong to it, already read; the driving loop dispatches that
/// line next. No line is read twice.
pub struct ChunkAggregator<'a, N: ?Sized, R: ?Sized> {
    reader: LineReader<'a>,
    request: &'a DocRequest,
    resolver: &'a N,
    renderer: &'a mut R,
    ctx: DocContext,
    module_open: bool,
}

impl<'a, N, R> ChunkAggregator<'a, N, R>
where
    N: NameResolver + ?Sized,
    R: Renderer + ?Sized,
{
    pub fn new(
        doc: &'a str,
        request: &'a DocRequest,
        resolver: &'a N,
        renderer: &'a mut R,
    ) -> Self {
        Self {
            reader: LineReader::new(doc, request.mode),
            request,
            resolver,
            renderer,
            ctx: DocContext::new(request.function_name.as_str(), request.class_name.as_deref()),
            module_open: false,
        }
    }

    /// Runs the document to END.
    ///
    /// On a nesting error every open block and the module are closed before
    /// the error is returned, so the renderer always sees a balanced stream.
    pub fn run(mut self) -> Result<DocContext, FormatError> {
        let mut line = self.reader.next_line();
        loop {
            log::debug!("chunk at line {}: {:?}", line.number, line.kind());
            line = match line.kind() {
                LineKind::Text if line.column() < CODE_INDENT => self.paragraph(line),
                LineKind::Text => self.code(line),
                LineKind::Table => self.table(line),
                LineKind::List => self.list(line)?,
                LineKind::SeeAlso => {
                    self.see_also(&line);
                    self.reader.next_line()
                }
                LineKind::Header => {
                    self.renderer.heading(&self.ctx, line.text());
                    self.reader.next_line()
                }
                LineKind::Summary => {
                    self.module_start(&line);
                    self.reader.next_line()
                }
                LineKind::BlankLine | LineKind::TableSep => self.reader.next_line(),
                LineKind::End => {
                    self.module_end();
                    return Ok(self.ctx);
                }
            };
        }
    }

    fn module_start(&mut self, line: &Line) {
        let info = ModuleInfo {
            name: &self.request.function_name,
            summary: line.text(),
            tag: self.request.tag.as_deref(),
            titlebar: self.request.titlebar,
            is_member: self.request.is_member(),
        };
        self.renderer.module_start(&self.ctx, &info);
        self.module_open = true;
    }

    fn module_end(&mut self) {
        if self.module_open {
            self.renderer.module_end();
            self.module_open = false;
        }
    }

    fn paragraph(&mut self, first: Line) -> Line {
        self.renderer.paragraph_start();

        let signature = extract_signature(first.text());
        self.ctx.add_variables(signature.variables);
        self.renderer
            .paragraph_line(&self.ctx, signature.remainder, signature.text);

        let next = loop {
            let next = self.reader.next_line();
            if !first.same_chunk(&next) {
                break next;
            }
            self.renderer.paragraph_line(&self.ctx, next.text(), "");
        };

        self.renderer.paragraph_end();
        next
    }

    fn code(&mut self, first: Line) -> Line {
        self.renderer.code_start();
        self.renderer.code_line(&code_text(&first));

        let next = loop {
            let mut next = self.reader.next_line();
            if first.same_chunk(&next) {
                self.renderer.code_line(&code_text(&next));
                continue;
            }
            match next.kind() {
                LineKind::BlankLine => {
                    // a single blank only survives if the block resumes after it
                    next = self.reader.next_line();
                    if first.same_chunk(&next) {
                        self.renderer.code_line("");
                        self.renderer.code_line(&code_text(&next));
                        continue;
                    }
                }
                // table rows start before CODE_INDENT, so this only fires if
                // that limit on the first cell is ever lifted
                LineKind::Table if next.column() == first.column() => {
                    self.renderer.code_line(&next.table_text());
                    continue;
                }
                _ => {}
            }
            break next;
        };

        self.renderer.code_end();
        next
    }

    fn table(&mut self, first: Line) -> Line {
        self.renderer.table_start();
        self.renderer.table_row(&self.ctx, first.col1(), first.col2());
        let second_column = first.indent().second_column();

        let next = loop {
            let mut next = self.reader.next_line();
            if first.same_chunk(&next) {
                self.renderer.table_row(&self.ctx, next.col1(), next.col2());
                continue;
            }
            match next.kind() {
                LineKind::TableSep | LineKind::BlankLine => {
                    let separator = next.kind() == LineKind::TableSep;
                    next = self.reader.next_line();
                    if first.same_chunk(&next) {
                        if separator {
                            self.renderer.table_separator();
                        }
                        self.renderer.table_row(&self.ctx, "", "");
                        self.renderer.table_row(&self.ctx, next.col1(), next.col2());
                        continue;
                    }
                }
                LineKind::Text if Some(next.column()) == second_column => {
                    self.renderer.table_row(&self.ctx, "", next.text());
                    continue;
                }
                _ => {}
            }
            break next;
        };

        self.renderer.table_end();
        next
    }

    fn list(&mut self, first: Line) -> Result<Line, FormatError> {
        let mut stack = ListStack::default();
        let mut current = first;

        self.renderer.list_start();
        self.renderer.list_item(&self.ctx, current.text());

        let next = loop {
            let next = self.reader.next_line();
            if current.same_chunk(&next) {
                self.renderer.list_item(&self.ctx, next.text());
                continue;
            }
            match next.kind() {
                LineKind::List if next.column() > current.column() => {
                    self.renderer.list_start();
                    self.renderer.list_item(&self.ctx, next.text());
                    stack.push(std::mem::replace(&mut current, next));
                }
                LineKind::List => {
                    let Some(level) = stack.columns().iter().rposition(|&c| c == next.column())
                    else {
                        return Err(self.abort_list(&stack, &current, &next));
                    };
                    while stack.depth() > level {
                        self.renderer.list_end();
                        if let Some(parent) = stack.pop() {
                            current = parent;
                        }
                    }
                    // the parent's list is still open, no new list_start
                    self.renderer.list_item(&self.ctx, next.text());
                }
                LineKind::Text if next.column() == current.column() => {
                    self.renderer.list_item(&self.ctx, next.text());
                }
                _ => break next,
            }
        };

        for _ in 0..=stack.depth() {
            self.renderer.list_end();
        }
        Ok(next)
    }

    fn abort_list(&mut self, stack: &ListStack, current: &Line, offending: &Line) -> FormatError {
        let mut open = stack.columns();
        open.push(current.column());
        let err = FormatError::InconsistentListNesting {
            line: offending.number,
            indent: offending.column(),
            open,
        };
        log::warn!("{}: {err}", self.request.function_name);

        for _ in 0..=stack.depth() {
            self.renderer.list_end();
        }
        self.module_end();
        err
    }

    fn see_also(&mut self, line: &Line) {
        self.renderer.heading(&self.ctx, "See also");
        self.renderer.see_also_start();
        for name in split_names(line.text()) {
            self.renderer
                .see_also_entry(&resolve_name(self.resolver, name));
        }
        self.renderer.see_also_end();
    }
}

/// Code row text: the line keeps whatever indentation it has beyond the code threshold.
fn code_text(line: &Line) -> String {
    let pad = line.column().saturating_sub(CODE_INDENT);
    format!("{}{}", " ".repeat(pad), line.text())
}
