use std::collections::BTreeMap;

/// Labels recognised at the start of a title-page line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TitleField {
    Title,
    Credit,
    Author,
    Authors,
    Source,
    Notes,
    DraftDate,
    Date,
    Contact,
    Copyright,
}

impl TitleField {
    pub const ALL: [TitleField; 10] = [
        TitleField::Title,
        TitleField::Credit,
        TitleField::Author,
        TitleField::Authors,
        TitleField::Source,
        TitleField::Notes,
        TitleField::DraftDate,
        TitleField::Date,
        TitleField::Contact,
        TitleField::Copyright,
    ];

    /// Looks a label up case-insensitively. Inner whitespace is matched as a
    /// single space, so `Draft  date` and `draft date` are the same label.
    pub fn from_label(label: &str) -> Option<Self> {
        let normalized = label
            .split_whitespace()
            .collect::<Vec<_>>()
            .join("_")
            .to_lowercase();
        Self::ALL
            .into_iter()
            .find(|field| field.as_str() == normalized)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TitleField::Title => "title",
            TitleField::Credit => "credit",
            TitleField::Author => "author",
            TitleField::Authors => "authors",
            TitleField::Source => "source",
            TitleField::Notes => "notes",
            TitleField::DraftDate => "draft_date",
            TitleField::Date => "date",
            TitleField::Contact => "contact",
            TitleField::Copyright => "copyright",
        }
    }
}

/// Which side of a dual-dialogue pair a dialogue group sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DualPosition {
    Left,
    Right,
    #[default]
    Unknown,
}

impl DualPosition {
    pub fn as_str(&self) -> &'static str {
        match self {
            DualPosition::Left => "left",
            DualPosition::Right => "right",
            DualPosition::Unknown => "unknown",
        }
    }
}

/// Flat, closed enumeration of every token kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Title,
    Credit,
    Author,
    Authors,
    Source,
    Notes,
    DraftDate,
    Date,
    Contact,
    Copyright,

    SceneHeading,
    Transition,
    Centered,
    Section,
    Synopsis,
    Note,
    Action,
    Character,
    DialogueBegin,
    Dialogue,
    Parenthetical,
    DialogueEnd,
    DualDialogueBegin,
    DualDialogueEnd,
    PageBreak,
    LineBreak,
}

impl TokenKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::Title => "title",
            TokenKind::Credit => "credit",
            TokenKind::Author => "author",
            TokenKind::Authors => "authors",
            TokenKind::Source => "source",
            TokenKind::Notes => "notes",
            TokenKind::DraftDate => "draft_date",
            TokenKind::Date => "date",
            TokenKind::Contact => "contact",
            TokenKind::Copyright => "copyright",
            TokenKind::SceneHeading => "scene_heading",
            TokenKind::Transition => "transition",
            TokenKind::Centered => "centered",
            TokenKind::Section => "section",
            TokenKind::Synopsis => "synopsis",
            TokenKind::Note => "note",
            TokenKind::Action => "action",
            TokenKind::Character => "character",
            TokenKind::DialogueBegin => "dialogue_begin",
            TokenKind::Dialogue => "dialogue",
            TokenKind::Parenthetical => "parenthetical",
            TokenKind::DialogueEnd => "dialogue_end",
            TokenKind::DualDialogueBegin => "dual_dialogue_begin",
            TokenKind::DualDialogueEnd => "dual_dialogue_end",
            TokenKind::PageBreak => "page_break",
            TokenKind::LineBreak => "line_break",
        }
    }
}

impl From<TitleField> for TokenKind {
    fn from(field: TitleField) -> Self {
        match field {
            TitleField::Title => TokenKind::Title,
            TitleField::Credit => TokenKind::Credit,
            TitleField::Author => TokenKind::Author,
            TitleField::Authors => TokenKind::Authors,
            TitleField::Source => TokenKind::Source,
            TitleField::Notes => TokenKind::Notes,
            TitleField::DraftDate => TokenKind::DraftDate,
            TitleField::Date => TokenKind::Date,
            TitleField::Contact => TokenKind::Contact,
            TitleField::Copyright => TokenKind::Copyright,
        }
    }
}

/// One structural element of a screenplay, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    TitlePage { field: TitleField, text: String },

    SceneHeading { text: String, scene_number: Option<String> },
    Transition { text: String },
    Centered { text: String },
    /// `depth` is the number of leading `#` characters, always at least 1.
    Section { text: String, depth: usize },
    Synopsis { text: String },
    Note { text: String },
    Action { text: String },

    DialogueBegin { dual: DualPosition },
    Character { text: String },
    Parenthetical { text: String },
    Dialogue { text: String },
    DialogueEnd,
    DualDialogueBegin,
    DualDialogueEnd,

    PageBreak,
    LineBreak,
}

impl Token {
    pub fn kind(&self) -> TokenKind {
        match self {
            Token::TitlePage { field, .. } => TokenKind::from(*field),
            Token::SceneHeading { .. } => TokenKind::SceneHeading,
            Token::Transition { .. } => TokenKind::Transition,
            Token::Centered { .. } => TokenKind::Centered,
            Token::Section { .. } => TokenKind::Section,
            Token::Synopsis { .. } => TokenKind::Synopsis,
            Token::Note { .. } => TokenKind::Note,
            Token::Action { .. } => TokenKind::Action,
            Token::DialogueBegin { .. } => TokenKind::DialogueBegin,
            Token::Character { .. } => TokenKind::Character,
            Token::Parenthetical { .. } => TokenKind::Parenthetical,
            Token::Dialogue { .. } => TokenKind::Dialogue,
            Token::DialogueEnd => TokenKind::DialogueEnd,
            Token::DualDialogueBegin => TokenKind::DualDialogueBegin,
            Token::DualDialogueEnd => TokenKind::DualDialogueEnd,
            Token::PageBreak => TokenKind::PageBreak,
            Token::LineBreak => TokenKind::LineBreak,
        }
    }

    /// Display text, absent for the structural begin/end/break tokens.
    pub fn text(&self) -> Option<&str> {
        match self {
            Token::TitlePage { text, .. }
            | Token::SceneHeading { text, .. }
            | Token::Transition { text }
            | Token::Centered { text }
            | Token::Section { text, .. }
            | Token::Synopsis { text }
            | Token::Note { text }
            | Token::Action { text }
            | Token::Character { text }
            | Token::Parenthetical { text }
            | Token::Dialogue { text } => Some(text),
            Token::DialogueBegin { .. }
            | Token::DialogueEnd
            | Token::DualDialogueBegin
            | Token::DualDialogueEnd
            | Token::PageBreak
            | Token::LineBreak => None,
        }
    }
}

/// Output of the classifier.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Document {
    pub tokens: Vec<Token>,
    /// Reserved for document-level metadata; the parser leaves it empty.
    pub metadata: BTreeMap<String, String>,
}
