pub mod io;
pub mod parsing;
pub mod registry;
pub mod render;
pub mod source;

#[cfg(test)]
pub mod tests;

// Re-export key types for easier usage
pub use io::*;
pub use parsing::{DocRequest, FormatError, LeaderMode, format_document};
pub use registry::{NameRegistry, NameResolver};
pub use render::{
    CodeListing, DocContext, Event, EventLog, ModuleInfo, OutputFormat, RenderOptions, Renderer,
    Toolbox, check_balanced, render_document, render_listing,
};
pub use source::{SourceNames, extract_help_block};
