//! # Chunk Recovery
//!
//! Two-phase recovery of the block structure of a help comment.
//!
//! ## Phases
//!
//! 1. **Line Classification** (`classify`): each raw line is classified into a
//!    `LineClass` holding local facts only (kind, indent, payload). The
//!    [`LineReader`](super::reader::LineReader) wraps this with leader
//!    stripping and the two continuation rules.
//!
//! 2. **Chunk Aggregation** (`builder`): a `ChunkAggregator` groups runs of
//!    related lines into paragraphs, code blocks, tables, nested lists and
//!    see-also blocks, and drives a [`Renderer`](crate::render::Renderer).
//!
//! ## Modules
//!
//! - **`types`**: core types (`LineKind`, `Indent`, `LineClass`, `Line`)
//! - **`kinds`**: line recognisers owning their patterns (Header, TableRow, Bullet, ...)
//! - **`classify`**: `CommentLineClassifier` and its ordered rule table
//! - **`list_stack`**: `ListStack` of open list ancestors
//! - **`builder`**: `ChunkAggregator` state machine emitting renderer calls
//!
//! ## Key Invariants
//!
//! - Classification is total: anything no rule claims is TEXT
//! - Every line is classified exactly once and none is dropped
//! - Every opened block is closed, including all nested lists on error

pub mod builder;
pub mod classify;
pub mod kinds;
pub mod list_stack;
pub mod types;

pub use builder::ChunkAggregator;
pub use classify::{CommentLineClassifier, Rule};
pub use list_stack::ListStack;
pub use types::{CODE_INDENT, Indent, Line, LineClass, LineKind, Payload};
