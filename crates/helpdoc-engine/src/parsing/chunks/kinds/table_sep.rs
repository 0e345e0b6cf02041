/// A line made only of dashes, separating groups of table rows.
pub struct TableSep;

impl TableSep {
    pub const DASH: char = '-';

    pub fn matches(line: &str) -> bool {
        let t = line.trim();
        !t.is_empty() && t.chars().all(|c| c == Self::DASH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dashes_only() {
        assert!(TableSep::matches("-----"));
        assert!(TableSep::matches("  --"));
        assert!(TableSep::matches("-"));
    }

    #[test]
    fn dashes_with_text() {
        assert!(!TableSep::matches("--- options"));
        assert!(!TableSep::matches(""));
    }
}
