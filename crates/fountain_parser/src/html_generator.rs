use std::sync::LazyLock;

use itertools::Itertools;
use regex::Regex;

use crate::inline::{LINE_BREAK, inline_to_html};
use crate::theme::Theme;
use crate::token::{Document, DualPosition, TitleField, Token};

static MARKUP_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)<.*?>").unwrap());

/// Renders a parsed document into a standalone HTML page.
///
/// Returns an empty string when there is no document at all; an unknown or
/// missing theme name falls back to the default theme.
pub fn render(document: Option<&Document>, theme: Option<&str>) -> String {
    match document {
        Some(document) => HtmlGenerator::generate(document, Theme::resolve(theme)),
        None => String::new(),
    }
}

pub struct HtmlGenerator {
    title: String,
    title_page: Vec<String>,
    body: Vec<String>,
}

impl HtmlGenerator {
    pub fn new() -> Self {
        HtmlGenerator {
            title: String::new(),
            title_page: Vec::new(),
            body: Vec::new(),
        }
    }

    pub fn generate(document: &Document, theme: Theme) -> String {
        let mut generator = HtmlGenerator::new();
        for token in &document.tokens {
            generator.render_token(token);
        }
        generator.finish(theme)
    }

    fn render_token(&mut self, token: &Token) {
        let text = token.text().map(inline_to_html).unwrap_or_default();

        let fragment = match token {
            Token::TitlePage { field, .. } => {
                let fragment = title_page_fragment(*field, &text);
                if *field == TitleField::Title {
                    self.title = plain_title(&text);
                }
                self.title_page.push(fragment);
                return;
            }
            Token::SceneHeading { scene_number, .. } => match scene_number {
                Some(number) => format!("<h2 class=\"scene-heading\" id=\"{number}\">{text}</h2>"),
                None => format!("<h2 class=\"scene-heading\">{text}</h2>"),
            },
            Token::Transition { .. } => format!("<h2 class=\"transition\">{text}</h2>"),
            Token::Character { .. } => format!("<h3 class=\"character\">{text}</h3>"),
            Token::Parenthetical { .. } => format!("<p class=\"parenthetical\">{text}</p>"),
            Token::Dialogue { .. } => format!("<p class=\"dialogue\">{text}</p>"),
            Token::Action { .. } => format!("<p class=\"action\">{text}</p>"),
            Token::Centered { .. } => format!("<p class=\"centered\">{text}</p>"),
            Token::Synopsis { .. } => format!("<p class=\"synopsis\">{text}</p>"),
            Token::Section { depth, .. } => {
                format!("<p class=\"section section-{depth}\" depth=\"{depth}\">{text}</p>")
            }
            Token::Note { .. } => format!("<!-- {text} -->"),
            Token::DialogueBegin { dual } => match dual {
                DualPosition::Unknown => "<div class=\"dialogue-block\">".to_string(),
                side => format!("<div class=\"dialogue-block dual-{}\">", side.as_str()),
            },
            Token::DualDialogueBegin => "<div class=\"dual-dialogue-block\">".to_string(),
            Token::DialogueEnd | Token::DualDialogueEnd => "</div>".to_string(),
            Token::PageBreak => "<hr />".to_string(),
            Token::LineBreak => LINE_BREAK.to_string(),
        };
        self.body.push(fragment);
    }

    fn finish(self, theme: Theme) -> String {
        format!(
            r#"<!DOCTYPE html>
<html>
<head>
<meta charset="UTF-8">
<title>{}</title>
<meta name="viewport" content="width=device-width,initial-scale=1">
<link rel="stylesheet" href="{}">
</head>
<body>
<main>
<div class="title-page">
{}
</div>
{}
</main>
</body>
</html>
"#,
            self.title,
            theme.stylesheet_href(),
            self.title_page.iter().join("\n"),
            self.body.iter().join("\n"),
        )
    }
}

impl Default for HtmlGenerator {
    fn default() -> Self {
        Self::new()
    }
}

fn title_page_fragment(field: TitleField, text: &str) -> String {
    let class = match field {
        TitleField::Title => return format!("<h1 class=\"title-page-title\">{text}</h1>"),
        TitleField::Credit => "title-page-credit",
        TitleField::Author | TitleField::Authors => "title-page-authors",
        TitleField::Source => "title-page-source",
        TitleField::Notes => "title-page-notes",
        TitleField::DraftDate => "title-page-draft-date",
        TitleField::Date => "title-page-date",
        TitleField::Contact => "title-page-contact",
        TitleField::Copyright => "title-page-copyright",
    };
    format!("<p class=\"{class}\">{text}</p>")
}

/// Text for the `<title>` element: line breaks become spaces, other markup
/// is dropped.
fn plain_title(html: &str) -> String {
    MARKUP_TAG
        .replace_all(&html.replace(LINE_BREAK, " "), "")
        .into_owned()
}
