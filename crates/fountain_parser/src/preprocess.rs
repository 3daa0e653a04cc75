use std::sync::LazyLock;

use regex::Regex;

static BONEYARD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)/\*.*?\*/").unwrap());
static LINE_ENDINGS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\r\n|\r").unwrap());
static INDENTATION: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^(?:\t+| {3,})").unwrap());
static BLOCK_SEPARATOR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n{2,}").unwrap());

/// Normalises raw screenplay text before it is split into blocks.
///
/// Order matters: boneyards go first so that a comment spanning a `\r\n`
/// leaves nothing behind, and indentation is stripped last so that lines
/// freed up by the comment removal are handled too.
pub fn preprocess(text: &str) -> String {
    let text = BONEYARD.replace_all(text, "");
    let text = LINE_ENDINGS.replace_all(&text, "\n");
    let text = text.trim_matches('\n');
    // One or two leading spaces survive; the classifier relies on them.
    INDENTATION.replace_all(text, "").into_owned()
}

/// Splits normalised text into blocks on runs of blank lines.
///
/// Always yields at least one block; empty input gives a single empty block.
pub fn split_blocks(text: &str) -> Vec<&str> {
    BLOCK_SEPARATOR.split(text).collect()
}
