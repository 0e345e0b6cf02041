use std::sync::OnceLock;

use regex::{Captures, Regex};

use super::{DocContext, Markup, ModuleInfo, RenderOptions, Renderer, TextRenderer};

const PREAMBLE: &str = r"\documentclass[a4paper]{article}
\setlength{\parindent}{0mm}
\usepackage{parskip}
\usepackage{color}
\usepackage{amsfonts}
\usepackage{hyperref}
\usepackage{longtable}
\usepackage{sectsty}
\usepackage{textcomp}
\allsectionsfont{\sffamily}
\usepackage{fancyvrb}
\DefineVerbatimEnvironment{Code}{Verbatim}{formatcom=\color{blue},fontseries=c,fontfamily=courier,fontsize=\footnotesize,xleftmargin=4mm,commentchar=!}

\begin{document}
";

/// Stands in for a literal caret while bare carets are escaped.
const CARET_MARK: char = '\u{1}';

/// LaTeX fragments for inclusion in a manual, or complete documents.
#[derive(Debug, Default)]
pub struct LatexRenderer {
    options: RenderOptions,
    out: String,
    see_also_count: usize,
}

impl LatexRenderer {
    pub fn new(options: RenderOptions) -> Self {
        let out = if options.standalone {
            PREAMBLE.to_string()
        } else {
            String::new()
        };
        Self {
            options,
            out,
            see_also_count: 0,
        }
    }
}

struct Patterns {
    dquote: Regex,
    dims3: Regex,
    dims2: Regex,
    set_power: Regex,
    power: Regex,
    url: Regex,
}

fn patterns() -> &'static Patterns {
    static PATTERNS: OnceLock<Patterns> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        let dim = r"[0-9A-Z]+(?:[+-][A-Z0-9]+)?";
        Patterns {
            dquote: Regex::new(r#""(.*?)""#).expect("Invalid quote regex"),
            dims3: Regex::new(&format!(r"\b({dim})x({dim})x({dim})\b"))
                .expect("Invalid dims regex"),
            dims2: Regex::new(&format!(r"\b({dim})x({dim})\b")).expect("Invalid dims regex"),
            set_power: Regex::new(r"([RP])\^([0-9a-zA-Z]+)").expect("Invalid power regex"),
            power: Regex::new(r"\^([0-9a-zA-Z]+)").expect("Invalid power regex"),
            url: Regex::new(r"(https?://[a-zA-Z0-9/._?=-]+)").expect("Invalid URL regex"),
        }
    })
}

/// Puts `pi` into math mode unless it is part of a longer word or already a command.
fn replace_pi(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut copied = 0;
    for (at, _) in s.match_indices("pi") {
        let before = s[..at].chars().next_back();
        let after = s[at + 2..].chars().next();
        let in_word = before.is_some_and(|c| c.is_ascii_alphabetic() || c == '\\')
            || after.is_some_and(|c| c.is_ascii_alphabetic());
        if !in_word {
            out.push_str(&s[copied..at]);
            out.push_str(r"$\pi$");
            copied = at + 2;
        }
    }
    out.push_str(&s[copied..]);
    out
}

fn escape_carets(s: &str) -> String {
    let p = patterns();
    let mark = CARET_MARK.to_string();
    let s = p.set_power.replace_all(s, |c: &Captures| {
        format!(r"$\mathbb{{{}}}{mark}{{{}}}$", &c[1], &c[2])
    });
    let s = p
        .power
        .replace_all(&s, |c: &Captures| format!(r"${{}}{mark}{{{}}}$", &c[1]));
    s.replace('^', r"\textasciicircum ")
        .replace(CARET_MARK, "^")
}

/// Escapes a table key, which is shown as written rather than as prose.
fn escape_key(col1: &str) -> String {
    col1.replace("~=", r"$\sim=$")
        .replace('*', r"\textasteriskcentered ")
        .replace('^', r"\textasciicircum ")
        .replace('_', r"\_")
        .replace('\'', r"\textquotesingle ")
}

impl Markup for LatexRenderer {
    fn escape(&self, text: &str) -> String {
        let p = patterns();

        let s = text.replace('{', r"$\{$").replace('}', r"$\}$");
        let s = s.replace("'th", r"${}^{\mbox{th}}$");
        let s = s.replace('\'', r"\textquotesingle ");
        let s = p.dquote.replace_all(&s, |c: &Captures| format!("``{}''", &c[1]));

        let s = p.dims3.replace_all(&s, |c: &Captures| {
            format!(r"${} \times {} \times {}$", &c[1], &c[2], &c[3])
        });
        let s = p
            .dims2
            .replace_all(&s, |c: &Captures| format!(r"${} \times {}$", &c[1], &c[2]));
        let mut s = escape_carets(&s);

        for group in ["SO(2)", "SE(2)", "SO(3)", "SE(3)"] {
            let (name, dim) = group.split_at(2);
            s = s.replace(group, &format!(r"$\mbox{{{name}}}{dim}$"));
        }

        let s = s
            .replace('%', r"\%")
            .replace('#', r"\#")
            .replace("~=", r"$\ne$")
            .replace('&', r"\&")
            .replace('<', "$<$")
            .replace('>', "$>$")
            .replace(" ~ ", r"$\approx$")
            .replace('_', r"\_")
            .replace("2pi", r"$2\pi$")
            .replace("pi/2", r"$\pi/2$")
            .replace("[-pi,pi)", r"$[-\pi, \pi)$");
        let s = replace_pi(&s);

        p.url
            .replace_all(&s, |c: &Captures| format!(r"\url{{{}}}", &c[1]))
            .into_owned()
    }

    fn emph_function(&self, word: &str) -> String {
        format!(r"\textbf{{\color{{red}} {word}}}")
    }

    fn emph_variable(&self, word: &str) -> String {
        format!(r"\texttt{{{word}}}")
    }
}

impl Renderer for LatexRenderer {
    fn module_start(&mut self, ctx: &DocContext, info: &ModuleInfo<'_>) {
        let title = info.name.replace('_', r"\_");
        let contents = if info.is_member { "tom" } else { "toc" };
        let description = self.transform(ctx, info.description());

        self.out.push_str(&format!("\n%---------------------- {title}\n"));
        self.out.push_str(&format!(
            "\\hypertarget{{{}}}{{\\section*{{{title}}}}}\n",
            info.name
        ));
        self.out
            .push_str(&format!("\\subsection*{{{description}}}\n"));
        self.out.push_str(&format!(
            "\\addcontentsline{{{contents}}}{{section}}{{{title}}}\n"
        ));
    }

    fn module_end(&mut self) {
        self.out.push_str("\\vspace{1.5ex}\\rule{\\textwidth}{1mm}\n");
    }

    fn heading(&mut self, ctx: &DocContext, text: &str) {
        let text = self.transform(ctx, text);
        self.out.push_str(&format!("\n\\subsection*{{{text}}}\n"));
    }

    fn paragraph_start(&mut self) {
        self.out.push('\n');
    }

    fn paragraph_line(&mut self, ctx: &DocContext, text: &str, signature: &str) {
        if !signature.is_empty() {
            let signature = signature
                .trim()
                .replace('_', r"\_")
                .replace('^', r"\textasciicircum ");
            self.out.push_str(&format!("\\texttt{{{signature}}}"));
        }
        let text = self.transform(ctx, text);
        self.out.push_str(&text);
        self.out.push('\n');
    }

    fn paragraph_end(&mut self) {
        self.out.push('\n');
    }

    fn code_start(&mut self) {
        self.out.push_str("\\begin{Code}\n");
    }

    fn code_line(&mut self, text: &str) {
        self.out.push_str(text);
        self.out.push('\n');
    }

    fn code_end(&mut self) {
        self.out.push_str("\\end{Code}\n");
    }

    fn table_start(&mut self) {
        self.out.push_str("\\begin{longtable}{lp{120mm}}\n");
    }

    fn table_row(&mut self, ctx: &DocContext, col1: &str, col2: &str) {
        let col2 = self.transform(ctx, col2);
        self.out
            .push_str(&format!("{} & {col2}\\\\ \n", escape_key(col1)));
    }

    fn table_separator(&mut self) {
        self.out.push_str("\\hline\n");
    }

    fn table_end(&mut self) {
        self.out.push_str("\\end{longtable}\\vspace{1ex}\n");
    }

    fn list_start(&mut self) {
        self.out.push_str("\\begin{itemize}\n");
    }

    fn list_item(&mut self, ctx: &DocContext, text: &str) {
        let text = self.transform(ctx, text);
        self.out.push_str(&format!("  \\item {text}\n"));
    }

    fn list_end(&mut self) {
        self.out.push_str("\\end{itemize}\n");
    }

    fn see_also_start(&mut self) {
        self.out.push('\n');
        self.see_also_count = 0;
    }

    fn see_also_entry(&mut self, name: &str) {
        if self.see_also_count > 0 {
            self.out.push_str(", ");
        }
        self.out.push_str(&format!(
            "\\hyperlink{{{name}}}{{\\color{{blue}} {}}}",
            name.replace('_', r"\_")
        ));
        self.see_also_count += 1;
    }

    fn see_also_end(&mut self) {
        self.out.push_str("\n\n");
    }
}

impl TextRenderer for LatexRenderer {
    fn finish(mut self) -> String {
        if self.options.standalone {
            self.out.push_str("\\end{document}\n");
        }
        self.out
    }
}
