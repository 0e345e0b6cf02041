//! Locating the help block inside a source file.

use std::path::Path;

use crate::parsing::LeaderMode;

/// Prefix of folders holding the methods of a class.
pub const CLASS_FOLDER_PREFIX: char = '@';

/// Names derived from a source file's location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceNames {
    /// File stem: the documented function or class.
    pub function_name: String,
    /// The class a method belongs to, from an enclosing `@Class` folder.
    pub class_name: Option<String>,
}

impl SourceNames {
    pub fn from_path(path: &Path) -> Option<Self> {
        let function_name = path.file_stem()?.to_string_lossy().into_owned();
        let class_name = path
            .parent()
            .and_then(Path::file_name)
            .map(|d| d.to_string_lossy())
            .and_then(|d| d.strip_prefix(CLASS_FOLDER_PREFIX).map(str::to_string));
        Some(Self {
            function_name,
            class_name,
        })
    }
}

/// Returns the first run of comment lines in `source`, each left-trimmed so
/// that it starts with the comment leader.
///
/// Lines before the run (the `function` line, blank lines) are skipped. The
/// run ends at the first line that is not a comment.
pub fn extract_help_block(source: &str) -> Option<String> {
    let is_comment = |l: &&str| l.trim_start().starts_with(LeaderMode::COMMENT_LEADER);

    let block: Vec<&str> = source
        .lines()
        .skip_while(|l| !is_comment(l))
        .take_while(|l| is_comment(l))
        .map(str::trim_start)
        .collect();

    if block.is_empty() {
        None
    } else {
        Some(block.join("\n"))
    }
}
