//! Behavioural tests for the parsing module.
//!
//! Documents are fed through `format_document` into an `EventLog` and the
//! recorded calls are compared against the expected block structure.

mod invariants;

use pretty_assertions::assert_eq;
use rstest::rstest;

use crate::{
    parsing::{DocRequest, FormatError, LeaderMode, chunks::CommentLineClassifier, format_document},
    registry::NameRegistry,
    render::{DocContext, Event, EventLog},
};

fn run_with(
    doc: &str,
    request: &DocRequest,
    registry: &NameRegistry,
) -> (Vec<Event>, Result<DocContext, FormatError>) {
    let mut log = EventLog::new();
    let result = format_document(doc, request, registry, &mut log);
    let events = log.into_events();
    invariants::check(&events);
    (events, result)
}

fn plain(doc: &str) -> Vec<Event> {
    let request = DocRequest::new("f").with_mode(LeaderMode::Plain);
    let (events, result) = run_with(doc, &request, &NameRegistry::default());
    assert!(result.is_ok(), "unexpected error: {result:?}");
    events
}

/// The events between the module start and end.
fn body(doc: &str) -> Vec<Event> {
    let events = plain(doc);
    events[1..events.len() - 1].to_vec()
}

fn row(col1: &str, col2: &str) -> Event {
    Event::TableRow(col1.to_string(), col2.to_string())
}

fn item(text: &str) -> Event {
    Event::ListItem(text.to_string())
}

fn code(text: &str) -> Event {
    Event::CodeLine(text.to_string())
}

fn line(text: &str) -> Event {
    Event::ParagraphLine {
        text: text.to_string(),
        signature: String::new(),
    }
}

#[test]
fn table_continuation_joins_second_column() {
    assert_eq!(
        body("F summary\nA   B\n    C"),
        vec![Event::TableStart, row("A", "B C"), Event::TableEnd]
    );
}

#[test]
fn aligned_text_after_a_merged_row_becomes_its_own_row() {
    assert_eq!(
        body("F summary\nA   one\n    more\n    again"),
        vec![
            Event::TableStart,
            row("A", "one more"),
            row("", "again"),
            Event::TableEnd
        ]
    );
}

#[rstest]
#[case::separator("---", true)]
#[case::blank("", false)]
fn table_gap_inserts_empty_row(#[case] gap: &str, #[case] separator: bool) {
    let doc = format!("F summary\nA   one\n{gap}\nB   two");
    let mut expected = vec![Event::TableStart, row("A", "one")];
    if separator {
        expected.push(Event::TableSeparator);
    }
    expected.extend([row("", ""), row("B", "two"), Event::TableEnd]);
    assert_eq!(body(&doc), expected);
}

#[test]
fn nested_list_reuses_outer_list() {
    assert_eq!(
        body("F summary\n- top\n  - nested\n- top2"),
        vec![
            Event::ListStart,
            item("top"),
            Event::ListStart,
            item("nested"),
            Event::ListEnd,
            item("top2"),
            Event::ListEnd,
        ]
    );
}

#[test]
fn unnesting_can_close_several_levels() {
    assert_eq!(
        body("F summary\n- a\n  - b\n    - c\n- d"),
        vec![
            Event::ListStart,
            item("a"),
            Event::ListStart,
            item("b"),
            Event::ListStart,
            item("c"),
            Event::ListEnd,
            Event::ListEnd,
            item("d"),
            Event::ListEnd,
        ]
    );
}

#[test]
fn lists_still_open_at_the_end_are_closed() {
    assert_eq!(
        body("F summary\n- a\n  - b\nafter"),
        vec![
            Event::ListStart,
            item("a"),
            Event::ListStart,
            item("b"),
            Event::ListEnd,
            Event::ListEnd,
            Event::ParagraphStart,
            line("after"),
            Event::ParagraphEnd,
        ]
    );
}

#[test]
fn aligned_text_after_a_merged_item_becomes_its_own_item() {
    assert_eq!(
        body("F summary\n- a\n  more\n  again\n- b"),
        vec![
            Event::ListStart,
            item("a more"),
            item("again"),
            item("b"),
            Event::ListEnd,
        ]
    );
}

#[test]
fn inconsistent_nesting_closes_everything_and_errors() {
    let request = DocRequest::new("f").with_mode(LeaderMode::Plain);
    let (events, result) = run_with(
        "F summary\n    - a\n      - b\n  - c",
        &request,
        &NameRegistry::default(),
    );

    assert_eq!(
        result,
        Err(FormatError::InconsistentListNesting {
            line: 4,
            indent: 4,
            open: vec![6, 8],
        })
    );
    assert_eq!(
        events[1..].to_vec(),
        vec![
            Event::ListStart,
            item("a"),
            Event::ListStart,
            item("b"),
            Event::ListEnd,
            Event::ListEnd,
            Event::ModuleEnd,
        ]
    );
}

#[test]
fn code_block_tolerates_one_blank_line() {
    assert_eq!(
        body("F summary\n        x = 1;\n\n        y = 2;"),
        vec![Event::CodeStart, code("x = 1;"), code(""), code("y = 2;"), Event::CodeEnd]
    );
}

#[test]
fn code_rows_keep_extra_indentation() {
    assert_eq!(
        body("F summary\n          for i=1:3\n            disp(i)\n          end"),
        vec![
            Event::CodeStart,
            code("  for i=1:3"),
            code("    disp(i)"),
            code("  end"),
            Event::CodeEnd
        ]
    );
}

#[test]
fn code_block_at_threshold_keeps_nested_lines() {
    assert_eq!(
        body("F summary\n        for i=1:3\n          disp(i)\n        end"),
        vec![
            Event::CodeStart,
            code("for i=1:3"),
            code("  disp(i)"),
            code("end"),
            Event::CodeEnd
        ]
    );
}

#[test]
fn blank_between_threshold_and_deeper_code_stays_in_block() {
    assert_eq!(
        body("F summary\n        x = 1;\n\n            y = 2;"),
        vec![Event::CodeStart, code("x = 1;"), code(""), code("    y = 2;"), Event::CodeEnd]
    );
}

#[test]
fn trailing_blank_does_not_extend_code_block() {
    assert_eq!(
        body("F summary\n        x = 1;\n\nProse."),
        vec![
            Event::CodeStart,
            code("x = 1;"),
            Event::CodeEnd,
            Event::ParagraphStart,
            line("Prose."),
            Event::ParagraphEnd,
        ]
    );
}

#[test]
fn see_also_recovers_casing() {
    let request = DocRequest::new("f").with_mode(LeaderMode::Plain);
    let registry = NameRegistry::from_names(["Quaternion"]);
    let doc = "F summary\nSee also quaternion, foo.bar.";
    let (events, result) = run_with(doc, &request, &registry);

    assert!(result.is_ok());
    assert_eq!(
        events[1..events.len() - 1].to_vec(),
        vec![
            Event::Heading("See also".to_string()),
            Event::SeeAlsoStart,
            Event::SeeAlsoEntry("Quaternion".to_string()),
            Event::SeeAlsoEntry("foo.bar".to_string()),
            Event::SeeAlsoEnd,
        ]
    );
}

#[test]
fn header_is_a_single_heading() {
    assert_eq!(
        body("F summary\nProperties::\nSome text"),
        vec![
            Event::Heading("Properties".to_string()),
            Event::ParagraphStart,
            line("Some text"),
            Event::ParagraphEnd,
        ]
    );
}

#[test]
fn paragraph_signature_feeds_variables() {
    let request = DocRequest::new("rotx").with_mode(LeaderMode::Plain);
    let (events, result) = run_with(
        "ROTX Rotation\nR = rotx(theta) is a rotation\nabout x.",
        &request,
        &NameRegistry::default(),
    );

    assert_eq!(
        events[1..events.len() - 1].to_vec(),
        vec![
            Event::ParagraphStart,
            Event::ParagraphLine {
                text: " is a rotation".to_string(),
                signature: "R = rotx(theta)".to_string(),
            },
            line("about x."),
            Event::ParagraphEnd,
        ]
    );
    let ctx = result.expect("document formats");
    assert!(ctx.is_variable("R"));
    assert!(ctx.is_variable("theta"));
}

#[rstest]
#[case::empty("")]
#[case::whitespace("  \n \n")]
fn empty_document_produces_no_events(#[case] doc: &str) {
    assert_eq!(plain(doc), vec![]);
}

#[test]
fn comment_block_ends_at_code() {
    let request = DocRequest::new("rotx");
    let doc = "%ROTX Rotation about X axis\n%\n% R = ROTX(T) rotates\nfunction R = rotx(t)\n% not help";
    let (events, result) = run_with(doc, &request, &NameRegistry::default());

    assert!(result.is_ok());
    assert_eq!(
        events,
        vec![
            Event::ModuleStart {
                name: "rotx".to_string(),
                summary: "ROTX Rotation about X axis".to_string(),
                is_member: false,
            },
            Event::ParagraphStart,
            Event::ParagraphLine {
                text: " rotates".to_string(),
                signature: "R = ROTX(T)".to_string(),
            },
            Event::ParagraphEnd,
            Event::ModuleEnd,
        ]
    );
}

#[test]
fn class_methods_are_members() {
    let request = DocRequest::new("plot")
        .with_class(Some("SE3".to_string()))
        .with_mode(LeaderMode::Plain);
    let (events, _) = run_with("PLOT Draw", &request, &NameRegistry::default());
    assert_eq!(
        events.first(),
        Some(&Event::ModuleStart {
            name: "plot".to_string(),
            summary: "PLOT Draw".to_string(),
            is_member: true,
        })
    );
}

#[rstest]
#[case("  Properties::")]
#[case("  A   the first option")]
#[case("  --------")]
#[case("  - bullet text")]
#[case("  See also rotx, roty.")]
#[case("          x = [1 2 3];")]
#[case("")]
fn classification_is_deterministic(#[case] raw: &str) {
    let classifier = CommentLineClassifier;
    assert_eq!(classifier.classify(raw), classifier.classify(raw));
}

#[test]
fn realistic_document_is_balanced() {
    let doc = "\
%TRANSL Create a translational transform
%
% T = TRANSL(X, Y, Z) is a homogeneous transform.
%
% Options::
%  'deg'     angles in degrees
%  'rad'     angles in radians
%            (the default)
% ---
%  'trace'   print progress
%
% Notes::
% - Works for
%   vectors too.
%   - nested point
% - Last point.
%
% Example::
%        T = transl(1, 2, 3)
%
%        disp(T)
%
% See also ROTX, SE3, Quaternion.plot.
";
    let request = DocRequest::new("transl");
    let (events, result) = run_with(doc, &request, &NameRegistry::from_names(["SE3", "rotx"]));
    assert!(result.is_ok(), "{result:?}");
    assert!(events.contains(&Event::ListItem("Works for vectors too.".to_string())));
    assert!(events.contains(&Event::TableRow(
        "'rad'".to_string(),
        "angles in radians (the default)".to_string()
    )));
    assert!(events.contains(&Event::SeeAlsoEntry("SE3".to_string())));
    assert!(events.contains(&Event::SeeAlsoEntry("rotx".to_string())));
    assert!(events.contains(&Event::SeeAlsoEntry("Quaternion.plot".to_string())));
}
