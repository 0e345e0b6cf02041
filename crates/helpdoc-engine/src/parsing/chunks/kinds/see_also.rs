use std::sync::OnceLock;

use regex::Regex;

use crate::parsing::chunks::types::column_of;

/// Cross-reference line: `See also rotx, roty, SE3.plot.`
pub struct SeeAlso;

impl SeeAlso {
    pub const PREFIX: &'static str = "See also";

    /// Matches a see-also line, returning `(column, names)` where `names` is the
    /// comma separated list without the closing period.
    pub fn parse(line: &str) -> Option<(usize, &str)> {
        static SEE_ALSO_REGEX: OnceLock<Regex> = OnceLock::new();
        let re = SEE_ALSO_REGEX.get_or_init(|| {
            let prefix = regex::escape(Self::PREFIX);
            Regex::new(&format!(r"^\s*{prefix}\s*(?P<text>.*?)\.$"))
                .expect("Invalid see-also regex")
        });

        let caps = re.captures(line)?;
        let text = caps.name("text")?;
        Some((column_of(line, text.start()), text.as_str()))
    }
}
