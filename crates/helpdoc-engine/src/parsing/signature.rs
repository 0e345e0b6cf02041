//! # Call Signature Extraction
//!
//! Paragraphs in help text often open with a call fragment such as
//! `[R, t] = tr2rt(T)` before the prose. This module splits that fragment off
//! and reports the variable names it mentions, so renderers can show the
//! fragment as code and emphasise the variables wherever they reappear.
//!
//! The grammar is a small ordered set of patterns matched at the start of the
//! line (after optional whitespace):
//!
//! ```text
//! signature := [lhs "="] rhs
//! lhs       := ident | "[" ident ("," ident)* "]"
//! rhs       := call | field | binop          (first match wins)
//! call      := [ident "."] name "(" [args | "..." | "[" ... "]"] ")"
//! field     := ident "." ident
//! binop     := ident ["."] op ident          op in + * / | ^ -
//! ```
//!
//! When an `lhs` matches but no `rhs` follows it, matching restarts without
//! the `lhs`.

use std::sync::OnceLock;

use regex::{Captures, Regex};

/// A call fragment split from the start of a line.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Signature<'a> {
    /// The fragment itself, including leading whitespace. Empty if none.
    pub text: &'a str,
    /// Everything after the fragment.
    pub remainder: &'a str,
    /// Variable names the fragment mentions, in order of appearance.
    pub variables: Vec<String>,
}

/// The right-hand side alternatives, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RhsForm {
    Call,
    Field,
    BinaryOp,
}

impl RhsForm {
    const PRIORITY: [RhsForm; 3] = [RhsForm::Call, RhsForm::Field, RhsForm::BinaryOp];

    fn regex(self) -> &'static Regex {
        static CALL: OnceLock<Regex> = OnceLock::new();
        static FIELD: OnceLock<Regex> = OnceLock::new();
        static BINOP: OnceLock<Regex> = OnceLock::new();
        match self {
            RhsForm::Call => CALL.get_or_init(|| {
                Regex::new(concat!(
                    r"^\s*(?:(?P<subject>[a-zA-Z][a-zA-Z0-9]*)\.)?",
                    r"(?P<method>[a-zA-Z][a-zA-Z0-9._]*)",
                    r"\(",
                    r"(?:(?P<args>[a-zA-Z'][a-zA-Z0-9']*(?:\s*,\s*[a-zA-Z'][a-zA-Z0-9']*)*)",
                    r"|\.\.\.",
                    r"|\s*\[[^\]]+\])?",
                    r"\)",
                ))
                .expect("Invalid call signature regex")
            }),
            RhsForm::Field => FIELD.get_or_init(|| {
                Regex::new(r"^\s*(?P<a>[A-Za-z][A-Za-z0-9]*)\.(?P<b>[A-Za-z][A-Za-z0-9]*)")
                    .expect("Invalid field signature regex")
            }),
            RhsForm::BinaryOp => BINOP.get_or_init(|| {
                Regex::new(
                    r"^\s*(?P<a>[A-Za-z][A-Za-z0-9]*)\s*\.?[+*/|^-]\s*(?P<b>[A-Za-z][A-Za-z0-9]*)",
                )
                .expect("Invalid operator signature regex")
            }),
        }
    }

    fn variables(self, caps: &Captures<'_>, out: &mut Vec<String>) {
        match self {
            RhsForm::Call => {
                if let Some(subject) = caps.name("subject") {
                    out.push(subject.as_str().to_string());
                }
                if let Some(args) = caps.name("args") {
                    out.extend(split_names(args.as_str()));
                }
            }
            RhsForm::Field | RhsForm::BinaryOp => {
                out.extend(
                    ["a", "b"]
                        .iter()
                        .filter_map(|g| caps.name(g))
                        .map(|m| m.as_str().to_string()),
                );
            }
        }
    }
}

fn lhs_regex() -> &'static Regex {
    static LHS: OnceLock<Regex> = OnceLock::new();
    LHS.get_or_init(|| {
        Regex::new(concat!(
            r"^\s*(?:(?P<single>[a-zA-Z][a-zA-Z0-9]*)",
            r"|\[(?P<list>[a-zA-Z][a-zA-Z0-9]*(?:\s*,\s*[a-zA-Z][a-zA-Z0-9]*)*)\])",
            r"\s*=\s*",
        ))
        .expect("Invalid lhs signature regex")
    })
}

fn split_names(list: &str) -> impl Iterator<Item = String> + '_ {
    list.split(',').map(|s| s.trim().to_string())
}

/// Matches one of the right-hand side forms at the start of `s`, returning the
/// byte length matched.
fn match_rhs(s: &str, variables: &mut Vec<String>) -> Option<usize> {
    RhsForm::PRIORITY.iter().find_map(|form| {
        let caps = form.regex().captures(s)?;
        form.variables(&caps, variables);
        caps.get(0).map(|m| m.end())
    })
}

/// Splits a leading call signature off `line`.
///
/// Returns an empty signature and the whole line as remainder when the line
/// does not start with one.
pub fn extract_signature(line: &str) -> Signature<'_> {
    if let Some(lhs) = lhs_regex().captures(line) {
        let mut variables = Vec::new();
        if let Some(m) = lhs.name("single") {
            variables.push(m.as_str().to_string());
        }
        if let Some(m) = lhs.name("list") {
            variables.extend(split_names(m.as_str()));
        }
        let lhs_end = lhs.get(0).map_or(0, |m| m.end());
        if let Some(len) = match_rhs(&line[lhs_end..], &mut variables) {
            let end = lhs_end + len;
            return Signature {
                text: &line[..end],
                remainder: &line[end..],
                variables,
            };
        }
    }

    let mut variables = Vec::new();
    match match_rhs(line, &mut variables) {
        Some(end) => Signature {
            text: &line[..end],
            remainder: &line[end..],
            variables,
        },
        None => Signature {
            text: "",
            remainder: line,
            variables,
        },
    }
}
