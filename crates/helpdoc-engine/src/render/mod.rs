//! # Rendering
//!
//! The [`Renderer`] trait is the event sink driven by the chunk aggregator.
//! Three text renderers (Markdown, HTML, LaTeX) accumulate a document into a
//! string; [`EventLog`] records the calls for tests and debugging.

pub mod context;
pub mod events;
pub mod html;
pub mod latex;
pub mod markdown;

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

pub use context::DocContext;
pub use events::{BalanceError, BlockKind, Event, EventLog, check_balanced};
pub use html::HtmlRenderer;
pub use latex::LatexRenderer;
pub use markdown::MarkdownRenderer;

use crate::{
    parsing::{DocRequest, FormatError, format_document},
    registry::NameResolver,
};

/// Facts about the documented function handed to [`Renderer::module_start`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModuleInfo<'a> {
    pub name: &'a str,
    /// The whole first line of the comment.
    pub summary: &'a str,
    pub tag: Option<&'a str>,
    pub titlebar: bool,
    pub is_member: bool,
}

impl ModuleInfo<'_> {
    /// The summary without its first word, which by convention repeats the
    /// function name in capitals.
    pub fn description(&self) -> &str {
        match self.summary.split_once(' ') {
            Some((_, rest)) => rest.trim_start(),
            None => self.summary,
        }
    }
}

/// Receives the structure of a help comment in document order.
///
/// Every `*_start` is matched by exactly one `*_end`; lists may nest.
/// Methods carrying prose receive the document context so they can
/// emphasise function and variable names.
pub trait Renderer {
    fn module_start(&mut self, ctx: &DocContext, info: &ModuleInfo<'_>);
    fn module_end(&mut self);

    fn heading(&mut self, ctx: &DocContext, text: &str);

    fn paragraph_start(&mut self);
    /// `signature` is the call fragment split from the first line, empty otherwise.
    fn paragraph_line(&mut self, ctx: &DocContext, text: &str, signature: &str);
    fn paragraph_end(&mut self);

    fn code_start(&mut self);
    fn code_line(&mut self, text: &str);
    fn code_end(&mut self);

    fn table_start(&mut self);
    fn table_row(&mut self, ctx: &DocContext, col1: &str, col2: &str);
    fn table_separator(&mut self);
    fn table_end(&mut self);

    fn list_start(&mut self);
    fn list_item(&mut self, ctx: &DocContext, text: &str);
    fn list_end(&mut self);

    fn see_also_start(&mut self);
    fn see_also_entry(&mut self, name: &str);
    fn see_also_end(&mut self);
}

/// Format-specific text rules shared by the text renderers.
pub trait Markup {
    /// Makes raw help text safe for the output format.
    fn escape(&self, text: &str) -> String;
    fn emph_function(&self, word: &str) -> String;
    fn emph_variable(&self, word: &str) -> String;

    /// Escapes `text`, then emphasises function and variable names.
    fn transform(&self, ctx: &DocContext, text: &str) -> String {
        ctx.emphasize(
            &self.escape(text),
            |w| self.emph_function(w),
            |w| self.emph_variable(w),
        )
    }
}

/// A renderer that produces a finished text document.
pub trait TextRenderer: Renderer {
    fn finish(self) -> String;
}

/// Formats that can also publish a numbered listing of a whole source file.
pub trait CodeListing {
    fn code_listing(&self, name: &str, source: &str) -> String;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Markdown,
    Html,
    Latex,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 3] = [
        OutputFormat::Markdown,
        OutputFormat::Html,
        OutputFormat::Latex,
    ];

    pub fn name(self) -> &'static str {
        match self {
            OutputFormat::Markdown => "markdown",
            OutputFormat::Html => "html",
            OutputFormat::Latex => "latex",
        }
    }

    /// File extension of rendered output, without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Markdown => "md",
            OutputFormat::Html => "html",
            OutputFormat::Latex => "tex",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown output format '{0}' (expected markdown, html or latex)")]
pub struct UnknownFormat(pub String);

impl FromStr for OutputFormat {
    type Err = UnknownFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            "html" => Ok(OutputFormat::Html),
            "latex" | "tex" => Ok(OutputFormat::Latex),
            _ => Err(UnknownFormat(s.to_string())),
        }
    }
}

/// Link shown in page footers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Toolbox {
    pub name: String,
    pub url: String,
}

/// Output options that are not part of the document itself.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// Prefix Markdown output with empty Jekyll front matter.
    pub jekyll: bool,
    /// Wrap LaTeX output in a complete document.
    pub standalone: bool,
    pub toolbox: Option<Toolbox>,
}

/// Formats `doc` with the renderer for `format` and returns the output text.
pub fn render_document<N>(
    format: OutputFormat,
    options: &RenderOptions,
    doc: &str,
    request: &DocRequest,
    resolver: &N,
) -> Result<String, FormatError>
where
    N: NameResolver + ?Sized,
{
    match format {
        OutputFormat::Markdown => {
            render_with(MarkdownRenderer::new(options.clone()), doc, request, resolver)
        }
        OutputFormat::Html => {
            render_with(HtmlRenderer::new(options.clone()), doc, request, resolver)
        }
        OutputFormat::Latex => {
            render_with(LatexRenderer::new(options.clone()), doc, request, resolver)
        }
    }
}

/// Renders a listing of `source`, or `None` when `format` has no listing
/// layout (LaTeX).
pub fn render_listing(
    format: OutputFormat,
    options: &RenderOptions,
    name: &str,
    source: &str,
) -> Option<String> {
    match format {
        OutputFormat::Markdown => {
            Some(MarkdownRenderer::new(options.clone()).code_listing(name, source))
        }
        OutputFormat::Html => Some(HtmlRenderer::new(options.clone()).code_listing(name, source)),
        OutputFormat::Latex => None,
    }
}

fn render_with<R, N>(
    mut renderer: R,
    doc: &str,
    request: &DocRequest,
    resolver: &N,
) -> Result<String, FormatError>
where
    R: TextRenderer,
    N: NameResolver + ?Sized,
{
    format_document(doc, request, resolver, &mut renderer)?;
    Ok(renderer.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn info(summary: &str) -> ModuleInfo<'_> {
        ModuleInfo {
            name: "rotx",
            summary,
            tag: None,
            titlebar: false,
            is_member: false,
        }
    }

    #[rstest]
    #[case("ROTX Rotation about X axis", "Rotation about X axis")]
    #[case("ROTX   spaced out", "spaced out")]
    #[case("ROTX", "ROTX")]
    fn description_drops_first_word(#[case] summary: &str, #[case] expected: &str) {
        assert_eq!(info(summary).description(), expected);
    }

    #[rstest]
    #[case("markdown", OutputFormat::Markdown)]
    #[case("MD", OutputFormat::Markdown)]
    #[case("html", OutputFormat::Html)]
    #[case("tex", OutputFormat::Latex)]
    fn parses_format_names(#[case] name: &str, #[case] expected: OutputFormat) {
        assert_eq!(name.parse::<OutputFormat>(), Ok(expected));
    }

    #[test]
    fn rejects_unknown_format() {
        assert_eq!(
            "docx".parse::<OutputFormat>(),
            Err(UnknownFormat("docx".to_string()))
        );
    }

    #[test]
    fn format_names_round_trip_through_display() {
        for format in OutputFormat::ALL {
            assert_eq!(format.to_string().parse::<OutputFormat>(), Ok(format));
        }
    }

    #[test]
    fn listings_exist_for_markdown_and_html_only() {
        let options = RenderOptions::default();
        let source = "function y = f(x)\ny = x;\n";
        for format in [OutputFormat::Markdown, OutputFormat::Html] {
            assert!(render_listing(format, &options, "f", source).is_some());
        }
        assert_eq!(render_listing(OutputFormat::Latex, &options, "f", source), None);
    }
}
