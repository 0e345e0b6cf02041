use std::sync::OnceLock;

use regex::Regex;

use crate::parsing::chunks::types::column_of;

/// Bulleted list item: `- text`.
pub struct Bullet;

impl Bullet {
    pub const MARKER: char = '-';

    /// Matches a bullet line, returning `(column, text)` where the column is
    /// where the item text starts, after the marker.
    pub fn parse(line: &str) -> Option<(usize, &str)> {
        static BULLET_REGEX: OnceLock<Regex> = OnceLock::new();
        let re = BULLET_REGEX.get_or_init(|| {
            let marker = regex::escape(&Self::MARKER.to_string());
            Regex::new(&format!(r"^\s*{marker}\s*(?P<text>.*)$")).expect("Invalid bullet regex")
        });

        let caps = re.captures(line)?;
        let text = caps.name("text")?;
        Some((column_of(line, text.start()), text.as_str()))
    }
}
