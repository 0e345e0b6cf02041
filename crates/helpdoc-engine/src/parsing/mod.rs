//! # Help Comment Parsing
//!
//! Recovers the implicit structure of a plain-text help comment and replays
//! it as renderer calls.
//!
//! - **`reader`**: leader stripping, line classification and continuation merging
//! - **`chunks`**: line kinds, the classifier rule table and the chunk aggregator
//! - **`signature`**: call fragments at the start of paragraphs
//! - **`xref`**: see-also name splitting and casing recovery

pub mod chunks;
pub mod error;
pub mod reader;
pub mod signature;
pub mod xref;

#[cfg(test)]
mod tests;

pub use error::FormatError;
pub use reader::LeaderMode;

use chunks::ChunkAggregator;

use crate::{
    registry::NameResolver,
    render::{DocContext, Renderer},
};

/// What the caller knows about the document being formatted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocRequest {
    pub function_name: String,
    /// Enclosing class, for methods documented inside a class folder.
    pub class_name: Option<String>,
    /// Anchor name for renderers that support one.
    pub tag: Option<String>,
    pub titlebar: bool,
    pub mode: LeaderMode,
}

impl DocRequest {
    pub fn new(function_name: impl Into<String>) -> Self {
        Self {
            function_name: function_name.into(),
            class_name: None,
            tag: None,
            titlebar: true,
            mode: LeaderMode::default(),
        }
    }

    pub fn with_class(mut self, class_name: Option<String>) -> Self {
        self.class_name = class_name;
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    pub fn with_titlebar(mut self, titlebar: bool) -> Self {
        self.titlebar = titlebar;
        self
    }

    pub fn with_mode(mut self, mode: LeaderMode) -> Self {
        self.mode = mode;
        self
    }

    /// A method documented inside a class other than itself.
    pub fn is_member(&self) -> bool {
        self.class_name
            .as_deref()
            .is_some_and(|class| class != self.function_name)
    }
}

/// Formats one help comment into `renderer`.
///
/// Returns the document's final context (the variables collected from call
/// signatures). An empty or whitespace-only document produces no calls.
pub fn format_document<N, R>(
    doc: &str,
    request: &DocRequest,
    resolver: &N,
    renderer: &mut R,
) -> Result<DocContext, FormatError>
where
    N: NameResolver + ?Sized,
    R: Renderer + ?Sized,
{
    if doc.trim().is_empty() {
        log::debug!("{}: empty document", request.function_name);
        return Ok(DocContext::new(
            request.function_name.as_str(),
            request.class_name.as_deref(),
        ));
    }
    ChunkAggregator::new(doc, request, resolver, renderer).run()
}
