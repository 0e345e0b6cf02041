use std::sync::OnceLock;

use regex::Regex;

use crate::parsing::chunks::types::column_of;

/// Section heading line: `Properties::`, `Examples::`, ...
///
/// All heading syntax knowledge lives here rather than in the classifier.
pub struct Header;

impl Header {
    /// The suffix that marks a heading.
    pub const SUFFIX: &'static str = "::";

    /// Matches a heading, returning `(column, text)` with the suffix removed.
    ///
    /// The text must start with an uppercase letter and contain no other colon.
    pub fn parse(line: &str) -> Option<(usize, &str)> {
        static HEADER_REGEX: OnceLock<Regex> = OnceLock::new();
        let re = HEADER_REGEX.get_or_init(|| {
            let suffix = regex::escape(Self::SUFFIX);
            Regex::new(&format!(r"^\s*(?P<text>[A-Z][^:]+){suffix}$"))
                .expect("Invalid header regex")
        });

        let caps = re.captures(line)?;
        let text = caps.name("text")?;
        Some((column_of(line, text.start()), text.as_str().trim_end()))
    }
}
