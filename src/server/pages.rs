//! HTML rendering for the form and results pages

use std::fmt::Write;

use crate::core::models::{Language, LanguageSelection, LlmResult};

const TITLE: &str = "AI Translator &amp; Critic";

/// Everything the results page shows for one submission
#[derive(Debug, Clone)]
pub struct ResultsView<'a> {
    pub original: &'a str,
    pub selection: LanguageSelection,
    pub translation: &'a LlmResult,
    /// `None` when translation failed and no critique was requested
    pub critique: Option<&'a LlmResult>,
}

/// Escape text for HTML element and attribute content
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn layout(body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{title}</title>\n</head>\n<body>\n<h1>{title}</h1>\n{body}</body>\n</html>\n",
        title = TITLE,
        body = body
    )
}

fn form(text: &str, selected: Language, error: Option<&str>) -> String {
    let mut html = String::new();

    if let Some(message) = error {
        let _ = writeln!(html, "<p class=\"error\">Error: {}</p>", escape_html(message));
    }

    html.push_str("<form method=\"post\" action=\"/\">\n");
    let _ = writeln!(
        html,
        "<textarea name=\"text\" rows=\"8\" cols=\"60\">{}</textarea>",
        escape_html(text)
    );
    html.push_str("<select name=\"language\">\n");
    for lang in Language::ALL {
        let _ = writeln!(
            html,
            "<option value=\"{}\"{}>{}</option>",
            lang.key(),
            if lang == selected { " selected" } else { "" },
            lang.display_name()
        );
    }
    html.push_str("</select>\n<button type=\"submit\">Translate</button>\n</form>\n");
    html
}

fn outcome_section(heading: &str, result: &LlmResult) -> String {
    match result {
        LlmResult::Success { text } => format!(
            "<section>\n<h2>{}</h2>\n<pre class=\"result\">{}</pre>\n</section>\n",
            heading,
            escape_html(text)
        ),
        LlmResult::Failure { kind, message } => format!(
            "<section>\n<h2>{}</h2>\n<p class=\"error\" data-kind=\"{}\">Error: {}</p>\n</section>\n",
            heading,
            kind,
            escape_html(message)
        ),
    }
}

/// The empty form, optionally with a validation error and the previous input
pub fn render_index(text: &str, selected: Language, error: Option<&str>) -> String {
    layout(&form(text, selected, error))
}

pub fn render_results(view: &ResultsView<'_>) -> String {
    let mut body = String::new();

    let _ = writeln!(
        body,
        "<section>\n<h2>Original</h2>\n<pre class=\"original\">{}</pre>\n</section>",
        escape_html(view.original)
    );

    let language = view.selection.language.display_name();
    if view.selection.defaulted {
        let _ = writeln!(
            body,
            "<p class=\"notice\">No language was selected; translated to the default language, {}.</p>",
            language
        );
    } else {
        let _ = writeln!(body, "<p>Target language: {}</p>", language);
    }

    body.push_str(&outcome_section("Translation", view.translation));
    match view.critique {
        Some(critique) => body.push_str(&outcome_section("Critique", critique)),
        None => body.push_str("<p class=\"notice\">Critique skipped because the translation failed.</p>\n"),
    }

    body.push_str(&form(view.original, view.selection.language, None));
    layout(&body)
}
