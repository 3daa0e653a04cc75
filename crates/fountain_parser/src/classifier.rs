use std::sync::LazyLock;

use itertools::Itertools;
use log::{debug, trace};
use regex::Regex;

use crate::preprocess::{preprocess, split_blocks};
use crate::token::{Document, DualPosition, TitleField, Token};

static TITLE_LABEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?im)^(title|credit|authors?|source|notes|draft date|date|contact|copyright):")
        .unwrap()
});
static SCENE_HEADING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:((?:\*{0,3}_?)?(?:int|ext|est|i/e)[. ].+)|\.([^.].*))$").unwrap()
});
static SCENE_NUMBER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r" *#([^#]+)# *$").unwrap());
static CHARACTER_CUE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(@[^\^\n]+|[A-Z*_]+[0-9A-Z (._\-')*]*)(\^?)\n([\s\S]+)$").unwrap()
});
static SECTION: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(#+) *(.*)$").unwrap());

const FIXED_TRANSITIONS: [&str; 3] = ["FADE TO BLACK.", "FADE OUT.", "CUT TO BLACK."];

/// Block patterns, tried in this order; the first one that matches wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    TitlePage,
    SceneHeading,
    Centered,
    Transition,
    Dialogue,
    Section,
    Synopsis,
    Note,
    PageBreak,
    LineBreak,
    Action,
}

/// `Centered` must stay ahead of `Transition`: both accept a leading `>`,
/// only `Centered` demands the closing `<`.
pub const RULE_PRECEDENCE: [Rule; 11] = [
    Rule::TitlePage,
    Rule::SceneHeading,
    Rule::Centered,
    Rule::Transition,
    Rule::Dialogue,
    Rule::Section,
    Rule::Synopsis,
    Rule::Note,
    Rule::PageBreak,
    Rule::LineBreak,
    Rule::Action,
];

impl Rule {
    fn apply(self, block: &str) -> Option<Classified> {
        match self {
            Rule::TitlePage => match_title_page(block).map(Classified::Tokens),
            Rule::SceneHeading => match_scene_heading(block).map(Classified::Tokens),
            Rule::Centered => match_centered(block).map(Classified::Tokens),
            Rule::Transition => match_transition(block).map(Classified::Tokens),
            Rule::Dialogue => match_dialogue(block).map(Classified::Dialogue),
            Rule::Section => match_section(block).map(Classified::Tokens),
            Rule::Synopsis => match_synopsis(block).map(Classified::Tokens),
            Rule::Note => match_note(block).map(Classified::Tokens),
            Rule::PageBreak => match_page_break(block).map(Classified::Tokens),
            Rule::LineBreak => match_line_break(block).map(Classified::Tokens),
            Rule::Action => Some(Classified::Tokens(match_action(block))),
        }
    }
}

/// A character cue with its body, before dual-dialogue pairing is known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogueGroup {
    pub character: String,
    /// `Parenthetical` and `Dialogue` tokens in body order.
    pub lines: Vec<Token>,
    /// The cue carried a trailing `^`.
    pub dual_right: bool,
}

impl DialogueGroup {
    fn into_tokens(self, dual: DualPosition) -> Vec<Token> {
        let mut tokens = Vec::with_capacity(self.lines.len() + 3);
        tokens.push(Token::DialogueBegin { dual });
        tokens.push(Token::Character { text: self.character });
        tokens.extend(self.lines);
        tokens.push(Token::DialogueEnd);
        tokens
    }
}

/// Result of classifying a single block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classified {
    Tokens(Vec<Token>),
    Dialogue(DialogueGroup),
}

/// Classifies one block on its own, without any cross-block state.
///
/// A block starting with `!` is forced action and skips every other rule.
pub fn classify_block(block: &str) -> (Rule, Classified) {
    if block.trim_start().starts_with('!') {
        return (Rule::Action, Classified::Tokens(match_action(block)));
    }
    RULE_PRECEDENCE
        .into_iter()
        .find_map(|rule| rule.apply(block).map(|classified| (rule, classified)))
        .unwrap_or_else(|| (Rule::Action, Classified::Tokens(match_action(block))))
}

/// Cross-block state for dual dialogue: the group that may still become the
/// left half of a pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum DualState {
    #[default]
    Idle,
    PendingLeft { group: usize },
}

/// Parses screenplay text into its token sequence.
pub fn parse(text: &str) -> Document {
    let text = preprocess(text);
    let mut groups: Vec<Vec<Token>> = Vec::new();
    let mut state = DualState::default();

    for (index, block) in split_blocks(&text).into_iter().enumerate() {
        let (rule, classified) = classify_block(block);
        trace!("block {index} classified as {rule:?}");

        match classified {
            Classified::Dialogue(group) => match (group.dual_right, state) {
                (true, DualState::PendingLeft { group: left }) => {
                    let left_tokens = &mut groups[left];
                    left_tokens[0] = Token::DialogueBegin { dual: DualPosition::Left };
                    left_tokens.insert(0, Token::DualDialogueBegin);

                    let mut right_tokens = group.into_tokens(DualPosition::Right);
                    right_tokens.push(Token::DualDialogueEnd);
                    groups.push(right_tokens);
                    state = DualState::Idle;
                }
                (dual_right, _) => {
                    if dual_right {
                        debug!("block {index}: dual dialogue cue without a left half");
                    }
                    groups.push(group.into_tokens(DualPosition::Unknown));
                    state = DualState::PendingLeft { group: groups.len() - 1 };
                }
            },
            Classified::Tokens(tokens) => {
                if tokens.is_empty() {
                    continue;
                }
                groups.push(tokens);
                state = DualState::Idle;
            }
        }
    }

    Document {
        tokens: groups.into_iter().flatten().collect(),
        ..Document::default()
    }
}

fn split_first_line(block: &str) -> (&str, Option<&str>) {
    match block.split_once('\n') {
        Some((first, rest)) => (first, Some(rest)),
        None => (block, None),
    }
}

/// Lines left under a one-line element are kept as action.
fn with_trailing_action(token: Token, rest: Option<&str>) -> Vec<Token> {
    let mut tokens = vec![token];
    if let Some(rest) = rest.map(str::trim).filter(|rest| !rest.is_empty()) {
        tokens.push(Token::Action { text: rest.to_string() });
    }
    tokens
}

fn match_title_page(block: &str) -> Option<Vec<Token>> {
    let labels: Vec<_> = TITLE_LABEL.captures_iter(block).collect();
    let first = labels.first()?.get(0)?;
    let mut tokens = Vec::with_capacity(labels.len() + 1);
    let leading = block[..first.start()].trim();
    if !leading.is_empty() {
        debug!("text before title page label kept as action: {leading:?}");
        tokens.push(Token::Action { text: leading.to_string() });
    }

    let fields = labels
        .iter()
        .enumerate()
        .filter_map(|(i, caps)| {
            let field = TitleField::from_label(&caps[1])?;
            let value_start = caps.get(0)?.end();
            let value_end = labels
                .get(i + 1)
                .and_then(|next| next.get(0))
                .map_or(block.len(), |next| next.start());
            let text = block[value_start..value_end]
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .join("\n");
            Some(Token::TitlePage { field, text })
        });
    tokens.extend(fields);
    Some(tokens)
}

fn match_scene_heading(block: &str) -> Option<Vec<Token>> {
    let (first, rest) = split_first_line(block);
    let caps = SCENE_HEADING.captures(first)?;
    let heading = caps.get(1).or_else(|| caps.get(2))?.as_str();
    if heading.ends_with("  ") {
        return None;
    }

    let (text, scene_number) = match SCENE_NUMBER.captures(heading) {
        Some(number) => {
            let start = number.get(0)?.start();
            (heading[..start].to_string(), Some(number[1].to_string()))
        }
        None => (heading.to_string(), None),
    };
    Some(with_trailing_action(Token::SceneHeading { text, scene_number }, rest))
}

fn match_centered(block: &str) -> Option<Vec<Token>> {
    let trimmed = block.trim();
    if trimmed.len() < 3 || !trimmed.starts_with('>') || !trimmed.ends_with('<') {
        return None;
    }
    let text = block.lines().map(strip_centering_marks).join("\n");
    Some(vec![Token::Centered { text }])
}

/// Removes a leading `>` and a trailing `<` from one line, keeping the
/// spaces around them.
fn strip_centering_marks(line: &str) -> String {
    let mut line = line.to_string();
    let open = line.find(|c: char| !c.is_whitespace());
    if let Some(pos) = open.filter(|&pos| line[pos..].starts_with('>')) {
        line.remove(pos);
    }
    let close = line.rfind(|c: char| !c.is_whitespace());
    if let Some(pos) = close.filter(|&pos| line[pos..].starts_with('<')) {
        line.remove(pos);
    }
    line
}

fn match_transition(block: &str) -> Option<Vec<Token>> {
    let (first, rest) = split_first_line(block);
    let text = if FIXED_TRANSITIONS.contains(&first) || (first.len() > 4 && first.ends_with(" TO:"))
    {
        first
    } else {
        first.strip_prefix('>')?.trim_start_matches(' ')
    };
    if text.is_empty() {
        return None;
    }
    Some(with_trailing_action(Token::Transition { text: text.to_string() }, rest))
}

fn match_dialogue(block: &str) -> Option<DialogueGroup> {
    let caps = CHARACTER_CUE.captures(block)?;
    let cue = &caps[1];
    if cue.ends_with("  ") {
        return None;
    }
    let character = cue.strip_prefix('@').unwrap_or(cue).trim().to_string();
    let dual_right = !caps[2].is_empty();

    let mut lines = Vec::new();
    let mut speech: Vec<&str> = Vec::new();
    for line in caps[3].lines() {
        if is_parenthetical(line) {
            flush_speech(&mut speech, &mut lines);
            lines.push(Token::Parenthetical { text: line.trim().to_string() });
        } else {
            speech.push(line);
        }
    }
    flush_speech(&mut speech, &mut lines);

    Some(DialogueGroup { character, lines, dual_right })
}

fn is_parenthetical(line: &str) -> bool {
    let line = line.trim();
    line.len() >= 3 && line.starts_with('(') && line.ends_with(')')
}

fn flush_speech(speech: &mut Vec<&str>, lines: &mut Vec<Token>) {
    let text = speech.drain(..).join("\n");
    let text = text.trim();
    if !text.is_empty() {
        lines.push(Token::Dialogue { text: text.to_string() });
    }
}

fn match_section(block: &str) -> Option<Vec<Token>> {
    let (first, rest) = split_first_line(block);
    let caps = SECTION.captures(first)?;
    let token = Token::Section {
        text: caps[2].trim().to_string(),
        depth: caps[1].len(),
    };
    Some(with_trailing_action(token, rest))
}

fn match_synopsis(block: &str) -> Option<Vec<Token>> {
    let (first, rest) = split_first_line(block);
    let text = first.strip_prefix('=')?;
    if text.starts_with('=') {
        return None;
    }
    Some(with_trailing_action(Token::Synopsis { text: text.trim().to_string() }, rest))
}

fn match_note(block: &str) -> Option<Vec<Token>> {
    let trimmed = block.trim();
    if trimmed.starts_with("[[[") {
        return None;
    }
    let inner = trimmed.strip_prefix("[[")?.strip_suffix("]]")?;
    if inner.contains("[[") || inner.contains("]]") {
        return None;
    }
    Some(vec![Token::Note { text: inner.trim().to_string() }])
}

fn match_page_break(block: &str) -> Option<Vec<Token>> {
    (block.len() >= 3 && block.chars().all(|c| c == '=')).then(|| vec![Token::PageBreak])
}

fn match_line_break(block: &str) -> Option<Vec<Token>> {
    (block == "  ").then(|| vec![Token::LineBreak])
}

fn match_action(block: &str) -> Vec<Token> {
    let text = block.trim();
    let text = text.strip_prefix('!').unwrap_or(text);
    if text.is_empty() {
        return Vec::new();
    }
    vec![Token::Action { text: text.to_string() }]
}

#[cfg(test)]
mod tests;
