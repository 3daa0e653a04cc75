//! Inline emphasis: `*italic*`, `**bold**`, `_underline_` and their
//! combinations, inline `[[notes]]` and `\*`/`\_` escapes.

use std::sync::LazyLock;

use itertools::Itertools;
use regex::{Captures, Regex};

/// Rendered form of an embedded newline.
pub const LINE_BREAK: &str = "<br />";

// Private-use code points never produced by the substitutions below.
const NOTE_OPEN: char = '\u{E000}';
const NOTE_CLOSE: char = '\u{E001}';
const ESCAPED_STAR: char = '\u{E002}';
const ESCAPED_UNDERSCORE: char = '\u{E003}';

static INLINE_NOTE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[\[([^\[][\s\S]*?)\]\]").unwrap());

/// Marker-run styles, most specific first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emphasis {
    BoldItalicUnderline,
    BoldItalic,
    BoldUnderline,
    Bold,
    ItalicUnderline,
    Italic,
    Underline,
}

impl Emphasis {
    /// Substitution order. A combined style has to be consumed before any of
    /// its parts, otherwise `***x***` would come out as nested bold/italic.
    pub const PRECEDENCE: [Emphasis; 7] = [
        Emphasis::BoldItalicUnderline,
        Emphasis::BoldItalic,
        Emphasis::BoldUnderline,
        Emphasis::Bold,
        Emphasis::ItalicUnderline,
        Emphasis::Italic,
        Emphasis::Underline,
    ];

    pub fn classes(&self) -> &'static str {
        match self {
            Emphasis::BoldItalicUnderline => "bold italic underline",
            Emphasis::BoldItalic => "bold italic",
            Emphasis::BoldUnderline => "bold underline",
            Emphasis::Bold => "bold",
            Emphasis::ItalicUnderline => "italic underline",
            Emphasis::Italic => "italic",
            Emphasis::Underline => "underline",
        }
    }

    fn pattern(&self) -> &'static str {
        match self {
            Emphasis::BoldItalicUnderline => r"_\*{3}(.+?)\*{3}_|\*{3}_(.+?)_\*{3}",
            Emphasis::BoldItalic => r"\*{3}(.+?)\*{3}",
            Emphasis::BoldUnderline => r"_\*{2}(.+?)\*{2}_|\*{2}_(.+?)_\*{2}",
            Emphasis::Bold => r"\*{2}(.+?)\*{2}",
            Emphasis::ItalicUnderline => r"_\*(.+?)\*_|\*_(.+?)_\*",
            Emphasis::Italic => r"\*(.+?)\*",
            Emphasis::Underline => r"_(.+?)_",
        }
    }
}

static EMPHASIS_RULES: LazyLock<Vec<(Emphasis, Regex)>> = LazyLock::new(|| {
    Emphasis::PRECEDENCE
        .into_iter()
        .map(|style| (style, Regex::new(style.pattern()).unwrap()))
        .collect()
});

/// Converts a token's raw text into inline HTML.
///
/// Markers only pair up within a single line; an unmatched marker is left in
/// place as a literal character. The result is trimmed.
pub fn inline_to_html(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let mut notes: Vec<String> = Vec::new();
    let protected = INLINE_NOTE.replace_all(text, |caps: &Captures| {
        notes.push(caps[1].to_string());
        format!("{NOTE_OPEN}{}{NOTE_CLOSE}", notes.len() - 1)
    });
    let protected = protected
        .replace("\\*", &ESCAPED_STAR.to_string())
        .replace("\\_", &ESCAPED_UNDERSCORE.to_string());

    let mut html = protected.split('\n').map(emphasize_line).join(LINE_BREAK);

    for (index, note) in notes.iter().enumerate() {
        let placeholder = format!("{NOTE_OPEN}{index}{NOTE_CLOSE}");
        let note = note
            .replace("\\*", "*")
            .replace("\\_", "_")
            .replace('\n', LINE_BREAK);
        let comment = format!("<!-- {note} -->");
        html = html.replace(&placeholder, &comment);
    }

    html.replace(ESCAPED_STAR, "*")
        .replace(ESCAPED_UNDERSCORE, "_")
        .trim()
        .to_string()
}

fn emphasize_line(line: &str) -> String {
    let mut line = line.to_string();
    for (style, regex) in EMPHASIS_RULES.iter() {
        if !regex.is_match(&line) {
            continue;
        }
        line = regex
            .replace_all(&line, |caps: &Captures| {
                let inner = caps.get(1).or_else(|| caps.get(2)).map_or("", |m| m.as_str());
                format!("<span class=\"{}\">{}</span>", style.classes(), inner)
            })
            .into_owned();
    }
    line
}
