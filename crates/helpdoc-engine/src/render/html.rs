use super::{CodeListing, DocContext, Markup, ModuleInfo, RenderOptions, Renderer, TextRenderer};

const STYLESHEET: &str = "http://www.petercorke.com/RVC/common/toolboxhelp.css";

/// Standalone or embeddable HTML help pages.
#[derive(Debug, Default)]
pub struct HtmlRenderer {
    options: RenderOptions,
    out: String,
    titlebar: bool,
    see_also_count: usize,
}

impl HtmlRenderer {
    pub fn new(options: RenderOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    fn footer(&self) -> String {
        let mut out = String::from("<hr>\n");
        if let Some(toolbox) = &self.options.toolbox {
            out.push_str(&format!(
                "<p class=\"copy\"><a href=\"{}\">{}</a></p>\n",
                html_escape::encode_double_quoted_attribute(&toolbox.url),
                html_escape::encode_text(&toolbox.name)
            ));
        }
        out
    }
}

fn page_header(name: &str) -> String {
    let name = html_escape::encode_text(name);
    format!(
        concat!(
            "<html>\n",
            "  <head>\n",
            "    <meta http-equiv=\"Content-Type\" content=\"text/html; charset=utf-8\">\n",
            "    <link rel=\"stylesheet\" href=\"{}\">\n",
            "    <title>{}</title>\n",
            "  </head>\n",
            "  <body>\n",
        ),
        STYLESHEET, name
    )
}

/// One listing line: spaces kept with `&nbsp;`, the trailing comment in blue.
fn listing_line(line: &str) -> String {
    let line = html_escape::encode_text(line);
    let (code, comment) = line.split_at(line.find('%').unwrap_or(line.len()));
    let mut out = code.replace(' ', "&nbsp;");
    if !comment.is_empty() {
        out.push_str(&format!(
            "<span style=\"color:blue\">{}</span>",
            comment.replace(' ', "&nbsp;")
        ));
    }
    out
}

impl CodeListing for HtmlRenderer {
    fn code_listing(&self, name: &str, source: &str) -> String {
        let mut out = page_header(name);
        out.push_str(&format!("<h1>{}</h1>\n", html_escape::encode_text(name)));
        out.push_str("<table class=\"codelistingtable\">\n");
        for (number, line) in source.lines().enumerate() {
            out.push_str(&format!(
                concat!(
                    "<tr><td class=\"codelistingnum\">{}</td>",
                    "<td><pre class=\"codelistingcode\">{}</pre></td></tr>\n"
                ),
                number + 1,
                listing_line(line)
            ));
        }
        out.push_str("</table>\n");
        out.push_str(&self.footer());
        out.push_str("</body></html>\n");
        out
    }
}

impl Markup for HtmlRenderer {
    fn escape(&self, text: &str) -> String {
        html_escape::encode_text(text).replace('^', "&circ;")
    }

    fn emph_function(&self, word: &str) -> String {
        format!("<span style=\"color:red\">{word}</span>")
    }

    fn emph_variable(&self, word: &str) -> String {
        format!("<strong>{word}</strong>")
    }
}

impl Renderer for HtmlRenderer {
    fn module_start(&mut self, _ctx: &DocContext, info: &ModuleInfo<'_>) {
        self.titlebar = info.titlebar;
        if info.titlebar {
            self.out.push_str(&page_header(info.name));
        }

        let name = html_escape::encode_text(info.name);
        match info.tag {
            Some(tag) => self.out.push_str(&format!(
                "<a name=\"{}\"><h1>{name}</h1></a>\n",
                html_escape::encode_double_quoted_attribute(tag)
            )),
            None => self.out.push_str(&format!("<h1>{name}</h1>\n")),
        }
        self.out.push_str(&format!(
            "<p><span class=\"helptopic\">{}</span></p>\n",
            html_escape::encode_text(info.description())
        ));
    }

    fn module_end(&mut self) {
        let footer = self.footer();
        self.out.push_str(&footer);
        if self.titlebar {
            self.out.push_str("</body></html>\n");
        }
    }

    fn heading(&mut self, _ctx: &DocContext, text: &str) {
        self.out
            .push_str(&format!("<h2>{}</h2>\n", html_escape::encode_text(text)));
    }

    fn paragraph_start(&mut self) {
        self.out.push_str("<p>\n");
    }

    fn paragraph_line(&mut self, ctx: &DocContext, text: &str, signature: &str) {
        if !signature.is_empty() {
            self.out.push_str(&format!(
                "<code>{}</code>",
                html_escape::encode_text(signature.trim())
            ));
        }
        let text = self.transform(ctx, text);
        self.out.push_str(&text);
        self.out.push('\n');
    }

    fn paragraph_end(&mut self) {
        self.out.push_str("</p>\n");
    }

    fn code_start(&mut self) {
        self.out
            .push_str("<pre style=\"width: 90%;\" class=\"examples\">\n");
    }

    fn code_line(&mut self, text: &str) {
        let text = html_escape::encode_text(text).replace(' ', "&nbsp;");
        self.out.push_str(&text);
        self.out.push('\n');
    }

    fn code_end(&mut self) {
        self.out.push_str("</pre>\n");
    }

    fn table_start(&mut self) {
        self.out.push_str("<table class=\"list\">\n");
    }

    fn table_row(&mut self, ctx: &DocContext, col1: &str, col2: &str) {
        let col2 = self.transform(ctx, col2);
        self.out.push_str(&format!(
            "  <tr><td style=\"white-space: nowrap;\" class=\"col1\">{}</td> <td>{col2}</td></tr>\n",
            html_escape::encode_text(col1)
        ));
    }

    fn table_separator(&mut self) {
        self.out.push_str("  <tr></tr>\n");
    }

    fn table_end(&mut self) {
        self.out.push_str("</table>\n");
    }

    fn list_start(&mut self) {
        self.out.push_str("<ul>\n");
    }

    fn list_item(&mut self, ctx: &DocContext, text: &str) {
        let text = self.transform(ctx, text);
        self.out.push_str(&format!("  <li>{text}</li>\n"));
    }

    fn list_end(&mut self) {
        self.out.push_str("</ul>\n");
    }

    fn see_also_start(&mut self) {
        self.out.push_str("<p>\n");
        self.see_also_count = 0;
    }

    fn see_also_entry(&mut self, name: &str) {
        if self.see_also_count > 0 {
            self.out.push_str(", ");
        }
        self.out.push_str(&format!(
            "<a href=\"{}.html\">{}</a>",
            html_escape::encode_double_quoted_attribute(name),
            html_escape::encode_text(name)
        ));
        self.see_also_count += 1;
    }

    fn see_also_end(&mut self) {
        self.out.push_str("\n</p>\n");
    }
}

impl TextRenderer for HtmlRenderer {
    fn finish(self) -> String {
        self.out
    }
}
