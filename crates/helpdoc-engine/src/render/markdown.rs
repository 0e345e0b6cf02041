use std::sync::OnceLock;

use regex::{Captures, Regex};

use super::{CodeListing, DocContext, Markup, ModuleInfo, RenderOptions, Renderer, TextRenderer};

/// GitHub-flavoured Markdown output.
#[derive(Debug, Default)]
pub struct MarkdownRenderer {
    options: RenderOptions,
    out: String,
    list_depth: usize,
    para_lines: usize,
    see_also_count: usize,
}

impl MarkdownRenderer {
    pub fn new(options: RenderOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    fn front_matter(&self) -> &'static str {
        if self.options.jekyll { "---\n---\n" } else { "" }
    }

    fn footer(&self) -> String {
        match &self.options.toolbox {
            Some(toolbox) => format!("\n---\n[{}]({})\n", toolbox.name, toolbox.url),
            None => String::new(),
        }
    }
}

impl CodeListing for MarkdownRenderer {
    fn code_listing(&self, name: &str, source: &str) -> String {
        let mut out = format!("{}# {name}\n```matlab\n", self.front_matter());
        for line in source.lines() {
            out.push_str(line);
            out.push('\n');
        }
        out.push_str("```\n");
        out.push_str(&self.footer());
        out
    }
}

fn dims3_regex() -> &'static Regex {
    static DIMS3: OnceLock<Regex> = OnceLock::new();
    DIMS3.get_or_init(|| {
        Regex::new(r"\b([0-9A-Z]+)x([0-9A-Z]+)x([0-9A-Z]+)\b").expect("Invalid dims regex")
    })
}

fn dims2_regex() -> &'static Regex {
    static DIMS2: OnceLock<Regex> = OnceLock::new();
    DIMS2.get_or_init(|| Regex::new(r"\b([0-9A-Z]+)x([0-9A-Z]+)\b").expect("Invalid dims regex"))
}

fn exponent_regex() -> &'static Regex {
    static EXP: OnceLock<Regex> = OnceLock::new();
    EXP.get_or_init(|| Regex::new(r"\^([0-9a-zA-Z-]+)").expect("Invalid exponent regex"))
}

impl Markup for MarkdownRenderer {
    fn escape(&self, text: &str) -> String {
        let s = text.replace('|', "&vert;").replace('\n', " ");
        let s = dims3_regex().replace_all(&s, |c: &Captures| {
            format!("{}&times;{}&times;{}", &c[1], &c[2], &c[3])
        });
        let s = dims2_regex().replace_all(&s, |c: &Captures| format!("{}&times;{}", &c[1], &c[2]));
        exponent_regex()
            .replace_all(&s, |c: &Captures| format!("<sup>{}</sup>", &c[1]))
            .into_owned()
    }

    fn emph_function(&self, word: &str) -> String {
        format!("**{word}**")
    }

    fn emph_variable(&self, word: &str) -> String {
        format!("`{word}`")
    }
}

impl Renderer for MarkdownRenderer {
    fn module_start(&mut self, _ctx: &DocContext, info: &ModuleInfo<'_>) {
        self.out.push_str(self.front_matter());
        self.out.push_str(&format!("# {}\n", info.name));
        self.out.push_str(&format!("_{}_\n", info.description()));
    }

    fn module_end(&mut self) {
        let footer = self.footer();
        self.out.push_str(&footer);
    }

    fn heading(&mut self, _ctx: &DocContext, text: &str) {
        self.out.push_str(&format!("\n### {text}\n"));
    }

    fn paragraph_start(&mut self) {
        self.out.push('\n');
        self.para_lines = 0;
    }

    fn paragraph_line(&mut self, ctx: &DocContext, text: &str, signature: &str) {
        if self.para_lines > 0 {
            self.out.push('\n');
        }
        if !signature.is_empty() {
            self.out.push_str(&format!("`{}`", signature.trim()));
        }
        let text = self.transform(ctx, text);
        self.out.push_str(&text);
        self.para_lines += 1;
    }

    fn paragraph_end(&mut self) {
        self.out.push('\n');
    }

    fn code_start(&mut self) {
        self.out.push_str("\n```matlab\n");
    }

    fn code_line(&mut self, text: &str) {
        self.out.push_str(text);
        self.out.push('\n');
    }

    fn code_end(&mut self) {
        self.out.push_str("```\n");
    }

    fn table_start(&mut self) {
        // GitHub needs a blank line and a header row before a table
        self.out.push_str("\n| | |\n|---|---|\n");
    }

    fn table_row(&mut self, ctx: &DocContext, col1: &str, col2: &str) {
        let col2 = self.transform(ctx, col2);
        if col1.is_empty() {
            self.out.push_str(&format!("| | {col2} |\n"));
        } else {
            let col1 = col1.replace('|', "&vert;");
            self.out.push_str(&format!("| `{col1}` | {col2} |\n"));
        }
    }

    fn table_separator(&mut self) {}

    fn table_end(&mut self) {}

    fn list_start(&mut self) {
        if self.list_depth == 0 {
            self.out.push('\n');
        }
        self.list_depth += 1;
    }

    fn list_item(&mut self, ctx: &DocContext, text: &str) {
        let indent = "  ".repeat(self.list_depth.saturating_sub(1));
        let text = self.transform(ctx, text);
        self.out.push_str(&format!("{indent}* {text}\n"));
    }

    fn list_end(&mut self) {
        self.list_depth = self.list_depth.saturating_sub(1);
    }

    fn see_also_start(&mut self) {
        self.out.push('\n');
        self.see_also_count = 0;
    }

    fn see_also_entry(&mut self, name: &str) {
        if self.see_also_count > 0 {
            self.out.push_str(", ");
        }
        self.out.push_str(&format!("[{name}]({name}.md)"));
        self.see_also_count += 1;
    }

    fn see_also_end(&mut self) {
        self.out.push('\n');
    }
}

impl TextRenderer for MarkdownRenderer {
    fn finish(self) -> String {
        self.out
    }
}
