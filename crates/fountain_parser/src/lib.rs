//! # fountain_parser
//!
//! A library for parsing screenplays written in Fountain markup and
//! rendering them as HTML.
//!
//! ## Quick Start (Simple)
//!
//! ```
//! use fountain_parser::text_to_html;
//!
//! let html = text_to_html("INT. HOUSE - DAY #1#\n\nBrick enters.", Some("dark"));
//! assert!(html.contains(r#"<h2 class="scene-heading" id="1">INT. HOUSE - DAY</h2>"#));
//! ```
//!
//! ## Advanced Usage
//!
//! For more control over the conversion process:
//!
//! ```
//! use fountain_parser::{parse, render, Token};
//!
//! let doc = parse("!FADE IN:");
//! assert_eq!(doc.tokens, vec![Token::Action { text: "FADE IN:".to_string() }]);
//! let html = render(Some(&doc), None);
//! assert!(html.contains(r#"<p class="action">FADE IN:</p>"#));
//! ```

// Internal modules (implementation details)
mod classifier;
mod html_generator;
mod inline;
mod preprocess;
mod theme;
mod token;

// Re-export main entry point functions
pub use classifier::{classify_block, parse};
pub use html_generator::render;
pub use inline::inline_to_html;
pub use preprocess::{preprocess, split_blocks};

// Re-export primary types for working with documents
pub use classifier::{Classified, DialogueGroup, RULE_PRECEDENCE, Rule};
pub use inline::Emphasis;
pub use theme::Theme;
pub use token::{Document, DualPosition, TitleField, Token, TokenKind};

// Re-export generators
pub use html_generator::HtmlGenerator;

/// Converts Fountain text directly to a complete HTML page.
///
/// Runs the whole pipeline: preprocessing → block classification → inline
/// emphasis → HTML generation. Never fails; unrecognised markup degrades to
/// action paragraphs and an unknown theme falls back to the default one.
///
/// # Arguments
///
/// * `text` - The Fountain source
/// * `theme` - Theme name used for the stylesheet link
pub fn text_to_html(text: &str, theme: Option<&str>) -> String {
    let document = parse(text);
    render(Some(&document), theme)
}
