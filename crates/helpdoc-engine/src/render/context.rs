use std::collections::BTreeSet;
use std::sync::OnceLock;

use regex::Regex;

/// Per-document state shared with every text-bearing renderer call.
///
/// Holds the names that get emphasised in prose: the documented function,
/// its class, and the variables collected from call signatures so far. A
/// fresh context is created for each document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocContext {
    function_name: String,
    class_name: Option<String>,
    variables: BTreeSet<String>,
}

impl DocContext {
    pub fn new(function_name: impl Into<String>, class_name: Option<&str>) -> Self {
        Self {
            function_name: function_name.into(),
            class_name: class_name.map(str::to_string),
            variables: BTreeSet::new(),
        }
    }

    pub fn add_variables<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.variables.extend(names.into_iter().map(Into::into));
    }

    pub fn is_variable(&self, word: &str) -> bool {
        self.variables.contains(word)
    }

    /// Rewrites every emphasised word in `text` with `function` or `variable`.
    ///
    /// Words preceded by a letter, `\` or `{` are left alone so that markup
    /// already produced by escaping (`\pi`, `\texttt{x}`) survives.
    pub fn emphasize<F, V>(&self, text: &str, function: F, variable: V) -> String
    where
        F: Fn(&str) -> String,
        V: Fn(&str) -> String,
    {
        static WORD_REGEX: OnceLock<Regex> = OnceLock::new();
        let word_regex = WORD_REGEX
            .get_or_init(|| Regex::new(r"[a-zA-Z][a-zA-Z0-9_']*\b").expect("Invalid word regex"));

        let mut out = String::with_capacity(text.len());
        let mut copied = 0;
        let mut pos = 0;

        while let Some(m) = word_regex.find_at(text, pos) {
            let prev = text[..m.start()].chars().next_back();
            if matches!(prev, Some(c) if c == '\\' || c == '{' || c.is_ascii_alphabetic()) {
                // retry one character further on, the tail may still be a word
                pos = m.start() + text[m.start()..].chars().next().map_or(1, char::len_utf8);
                continue;
            }

            let word = m.as_str();
            if let Some(replacement) = self.emphasis_for(word, &function, &variable) {
                out.push_str(&text[copied..m.start()]);
                out.push_str(&replacement);
                copied = m.end();
            }
            pos = m.end();
        }

        out.push_str(&text[copied..]);
        out
    }

    fn emphasis_for<F, V>(&self, word: &str, function: &F, variable: &V) -> Option<String>
    where
        F: Fn(&str) -> String,
        V: Fn(&str) -> String,
    {
        match &self.class_name {
            Some(class) if word == self.function_name || word == class.as_str() => {
                return Some(function(word));
            }
            Some(_) => {}
            None => {
                let lower = word.to_lowercase();
                if lower == self.function_name {
                    return Some(function(&lower));
                }
            }
        }
        self.is_variable(word).then(|| variable(word))
    }
}
