use super::*;
use crate::token::TokenKind;
use pretty_assertions::assert_eq;
use rstest::rstest;

fn tokens(text: &str) -> Vec<Token> {
    parse(text).tokens
}

fn action(text: &str) -> Token {
    Token::Action { text: text.to_string() }
}

fn title_field(field: TitleField, text: &str) -> Token {
    Token::TitlePage { field, text: text.to_string() }
}

fn dialogue_group(dual: DualPosition, character: &str, speech: &str) -> Vec<Token> {
    vec![
        Token::DialogueBegin { dual },
        Token::Character { text: character.to_string() },
        Token::Dialogue { text: speech.to_string() },
        Token::DialogueEnd,
    ]
}

#[test]
fn test_empty_input_yields_no_tokens() {
    assert_eq!(tokens(""), vec![]);
    assert_eq!(tokens("\n\n\n"), vec![]);
    assert_eq!(tokens("/* only a boneyard */"), vec![]);
}

#[test]
fn test_title_page_fields_in_source_order() {
    let text = "Title:\n    _**BRICK & STEEL**_\n    _**FULL RETIRED**_\n\
                Credit: Written by\n\
                Author: Stu Maschwitz\n\
                Source: Story by KTM\n\
                Draft date: 1/20/2012\n\
                Contact:\n    Next Level Productions\n    1588 Mission Dr.\n    Solvang, CA 93463";
    assert_eq!(
        tokens(text),
        vec![
            title_field(TitleField::Title, "_**BRICK & STEEL**_\n_**FULL RETIRED**_"),
            title_field(TitleField::Credit, "Written by"),
            title_field(TitleField::Author, "Stu Maschwitz"),
            title_field(TitleField::Source, "Story by KTM"),
            title_field(TitleField::DraftDate, "1/20/2012"),
            title_field(
                TitleField::Contact,
                "Next Level Productions\n1588 Mission Dr.\nSolvang, CA 93463",
            ),
        ]
    );
}

#[test]
fn test_title_page_value_keeps_later_colons() {
    assert_eq!(
        tokens("Notes: Draft 3: the good one\nCopyright: (c) 2012"),
        vec![
            title_field(TitleField::Notes, "Draft 3: the good one"),
            title_field(TitleField::Copyright, "(c) 2012"),
        ]
    );
}

#[test]
fn test_title_page_labels_are_case_insensitive() {
    let kinds: Vec<_> = tokens("TITLE: Big Fish\nauthors: John August\nDATE: 2003")
        .iter()
        .map(Token::kind)
        .collect();
    assert_eq!(kinds, vec![TokenKind::Title, TokenKind::Authors, TokenKind::Date]);
}

#[test]
fn test_text_before_title_label_kept_as_action() {
    assert_eq!(
        tokens("FADE IN ON:\nTitle: the sign above the door"),
        vec![
            action("FADE IN ON:"),
            title_field(TitleField::Title, "the sign above the door"),
        ]
    );
    assert_eq!(
        tokens("Some action\nNotes: closed."),
        vec![
            action("Some action"),
            title_field(TitleField::Notes, "closed."),
        ]
    );
}

#[test]
fn test_scene_number_extracted() {
    assert_eq!(
        tokens("INT. HOUSE - DAY #1A#"),
        vec![Token::SceneHeading {
            text: "INT. HOUSE - DAY".to_string(),
            scene_number: Some("1A".to_string()),
        }]
    );
}

#[rstest]
#[case("INT. HOUSE - DAY", "INT. HOUSE - DAY")]
#[case("ext. brick's pool - day", "ext. brick's pool - day")]
#[case("EST. CITY SKYLINE", "EST. CITY SKYLINE")]
#[case("I/E CAR - MOVING", "I/E CAR - MOVING")]
#[case(".SNIPER SCOPE POV", "SNIPER SCOPE POV")]
fn test_scene_heading_forms(#[case] input: &str, #[case] expected: &str) {
    assert_eq!(
        tokens(input),
        vec![Token::SceneHeading { text: expected.to_string(), scene_number: None }]
    );
}

#[test]
fn test_ellipsis_is_not_a_forced_scene_heading() {
    assert_eq!(tokens("...and then nothing."), vec![action("...and then nothing.")]);
}

#[test]
fn test_scene_heading_with_two_trailing_spaces_is_action() {
    assert_eq!(tokens("INT. HOUSE - DAY  "), vec![action("INT. HOUSE - DAY")]);
}

#[test]
fn test_lines_under_scene_heading_become_action() {
    assert_eq!(
        tokens("INT. GARAGE - NIGHT\nThe door creaks open."),
        vec![
            Token::SceneHeading { text: "INT. GARAGE - NIGHT".to_string(), scene_number: None },
            action("The door creaks open."),
        ]
    );
}

#[test]
fn test_centered_keeps_inner_spaces() {
    assert_eq!(
        tokens("> THE END <"),
        vec![Token::Centered { text: " THE END ".to_string() }]
    );
    assert_eq!(
        tokens(">BRICK & STEEL<\n>FULL RETIRED<"),
        vec![Token::Centered { text: "BRICK & STEEL\nFULL RETIRED".to_string() }]
    );
}

#[test]
fn test_centered_block_with_outer_marks_only() {
    assert_eq!(tokens(">A\nB\nC<"), vec![Token::Centered { text: "A\nB\nC".to_string() }]);
}

#[rstest]
#[case("CUT TO:", "CUT TO:")]
#[case("SMASH CUT TO:", "SMASH CUT TO:")]
#[case("FADE OUT.", "FADE OUT.")]
#[case("FADE TO BLACK.", "FADE TO BLACK.")]
#[case("CUT TO BLACK.", "CUT TO BLACK.")]
#[case("> Burn to white.", "Burn to white.")]
fn test_transitions(#[case] input: &str, #[case] expected: &str) {
    assert_eq!(tokens(input), vec![Token::Transition { text: expected.to_string() }]);
}

#[test]
fn test_dialogue_with_parentheticals() {
    let text = "STEEL\n(starting the engine)\nSo much for retirement!\nSo much for retirement!\n\
                (continue)\nDamn it.";
    assert_eq!(
        tokens(text),
        vec![
            Token::DialogueBegin { dual: DualPosition::Unknown },
            Token::Character { text: "STEEL".to_string() },
            Token::Parenthetical { text: "(starting the engine)".to_string() },
            Token::Dialogue {
                text: "So much for retirement!\nSo much for retirement!".to_string(),
            },
            Token::Parenthetical { text: "(continue)".to_string() },
            Token::Dialogue { text: "Damn it.".to_string() },
            Token::DialogueEnd,
        ]
    );
}

#[test]
fn test_empty_parentheses_are_speech() {
    assert_eq!(
        tokens("BRICK\n()\nNothing."),
        dialogue_group(DualPosition::Unknown, "BRICK", "()\nNothing.")
    );
}

#[test]
fn test_forced_character() {
    assert_eq!(
        tokens("@non-capitalized character\nScrew retirement."),
        dialogue_group(DualPosition::Unknown, "non-capitalized character", "Screw retirement.")
    );
}

#[test]
fn test_character_extensions_allowed() {
    assert_eq!(
        tokens("HANS (V.O.)\nWhat was it you said?"),
        dialogue_group(DualPosition::Unknown, "HANS (V.O.)", "What was it you said?")
    );
}

#[test]
fn test_cue_with_two_trailing_spaces_is_action() {
    assert_eq!(
        tokens("BOOM GOES THE DYNAMITE  \nEverything shakes."),
        vec![action("BOOM GOES THE DYNAMITE  \nEverything shakes.")]
    );
}

#[test]
fn test_single_uppercase_line_is_action() {
    assert_eq!(tokens("SILENCE."), vec![action("SILENCE.")]);
}

#[test]
fn test_dual_dialogue_pair() {
    let text = "BRICK\nScrew retirement.\n\nSTEEL ^\nScrew retirement.";
    let mut expected = vec![Token::DualDialogueBegin];
    expected.extend(dialogue_group(DualPosition::Left, "BRICK", "Screw retirement."));
    expected.extend(dialogue_group(DualPosition::Right, "STEEL", "Screw retirement."));
    expected.push(Token::DualDialogueEnd);
    assert_eq!(tokens(text), expected);
}

#[test]
fn test_empty_block_between_halves_keeps_pairing() {
    let text = "BRICK\nScrew retirement.\n\n!\n\nSTEEL ^\nScrew retirement.";
    let mut expected = vec![Token::DualDialogueBegin];
    expected.extend(dialogue_group(DualPosition::Left, "BRICK", "Screw retirement."));
    expected.extend(dialogue_group(DualPosition::Right, "STEEL", "Screw retirement."));
    expected.push(Token::DualDialogueEnd);
    assert_eq!(tokens(text), expected);
}

#[test]
fn test_dual_cue_without_left_half_stays_plain() {
    let text = "He waits.\n\nSTEEL ^\nAnyone?";
    let mut expected = vec![action("He waits.")];
    expected.extend(dialogue_group(DualPosition::Unknown, "STEEL", "Anyone?"));
    assert_eq!(tokens(text), expected);
}

#[test]
fn test_dual_pairs_are_always_balanced() {
    let text = "A\nOne.\n\nB ^\nTwo.\n\nC ^\nThree.\n\nD\nFour.\n\nE ^\nFive.\n\nF ^\nSix.";
    let result = tokens(text);

    let count = |kind: TokenKind| result.iter().filter(|t| t.kind() == kind).count();
    assert_eq!(count(TokenKind::DualDialogueBegin), 2);
    assert_eq!(count(TokenKind::DualDialogueEnd), 2);
    assert_eq!(count(TokenKind::DialogueBegin), count(TokenKind::DialogueEnd));

    // Each pair wraps exactly a left group then a right group.
    let mut inside: Option<Vec<DualPosition>> = None;
    for token in &result {
        match token {
            Token::DualDialogueBegin => {
                assert!(inside.is_none());
                inside = Some(Vec::new());
            }
            Token::DialogueBegin { dual } => match inside.as_mut() {
                Some(sides) => sides.push(*dual),
                None => assert_eq!(*dual, DualPosition::Unknown),
            },
            Token::DualDialogueEnd => {
                assert_eq!(inside.take(), Some(vec![DualPosition::Left, DualPosition::Right]));
            }
            _ => {}
        }
    }
    assert!(inside.is_none());
}

#[test]
fn test_section_depth() {
    assert_eq!(
        tokens("### Act Three"),
        vec![Token::Section { text: "Act Three".to_string(), depth: 3 }]
    );
    assert_eq!(
        tokens("#Prologue"),
        vec![Token::Section { text: "Prologue".to_string(), depth: 1 }]
    );
}

#[test]
fn test_synopsis() {
    assert_eq!(
        tokens("= Set up the characters and the story."),
        vec![Token::Synopsis { text: "Set up the characters and the story.".to_string() }]
    );
}

#[test]
fn test_note_block() {
    assert_eq!(
        tokens("[[This section needs work.\nDefinitely coffee.]]"),
        vec![Token::Note { text: "This section needs work.\nDefinitely coffee.".to_string() }]
    );
}

#[test]
fn test_two_notes_in_one_block_are_action() {
    assert_eq!(tokens("[[one]] and [[two]]"), vec![action("[[one]] and [[two]]")]);
}

#[test]
fn test_page_break() {
    assert_eq!(tokens("==="), vec![Token::PageBreak]);
    assert_eq!(tokens("========"), vec![Token::PageBreak]);
}

#[test]
fn test_two_space_line_break() {
    assert_eq!(
        tokens("Line one.\n\n  \n\nLine two."),
        vec![action("Line one."), Token::LineBreak, action("Line two.")]
    );
}

#[test]
fn test_forced_action() {
    assert_eq!(tokens("!ACTION TEXT"), vec![action("ACTION TEXT")]);
    assert_eq!(tokens("!SMASH CUT TO:"), vec![action("SMASH CUT TO:")]);
    assert_eq!(tokens("!"), vec![]);
}

#[rstest]
#[case("Title: Big Fish", Rule::TitlePage)]
#[case("INT. HOUSE - DAY", Rule::SceneHeading)]
#[case("> THE END <", Rule::Centered)]
#[case("> THE END", Rule::Transition)]
#[case("DAN\nThen let's retire them.", Rule::Dialogue)]
#[case("## Act Two", Rule::Section)]
#[case("= Synopsis", Rule::Synopsis)]
#[case("[[note]]", Rule::Note)]
#[case("===", Rule::PageBreak)]
#[case("  ", Rule::LineBreak)]
#[case("He walks away.", Rule::Action)]
fn test_rule_selected_for_block(#[case] block: &str, #[case] expected: Rule) {
    assert_eq!(classify_block(block).0, expected);
}

#[test]
fn test_precedence_order() {
    assert_eq!(RULE_PRECEDENCE.first(), Some(&Rule::TitlePage));
    assert_eq!(RULE_PRECEDENCE.last(), Some(&Rule::Action));
    let position = |rule: Rule| RULE_PRECEDENCE.iter().position(|r| *r == rule);
    assert!(position(Rule::Centered) < position(Rule::Transition));
}

#[test]
fn test_parse_is_deterministic() {
    let text = "Title: Twice\n\nINT. ROOM #2#\n\nBRICK\nHi.\n\nSTEEL ^\nHi.\n\n===";
    assert_eq!(parse(text), parse(text));
}

#[test]
fn test_document_order_across_blocks() {
    let kinds: Vec<_> = tokens("EXT. POOL - DAY\n\nSteel dives in.\n\nCUT TO:")
        .iter()
        .map(Token::kind)
        .collect();
    assert_eq!(kinds, vec![TokenKind::SceneHeading, TokenKind::Action, TokenKind::Transition]);
}
