use rstest::rstest;

use crate::{parse, parse_slice};

/// Grammar violations, with the offending character (`None` = end of
/// input) and the absolute position it is reported at.
#[rstest]
#[case::missing_member_value("{\"a\":}", 5, Some('}'))]
#[case::unclosed_array("[1,2,", 5, None)]
#[case::unclosed_object("{\"a\":1,", 7, None)]
#[case::bare_word("xyz", 0, Some('x'))]
#[case::keyword_prefix_only("nul", 0, Some('n'))]
#[case::missing_colon("{\"a\" 1}", 5, Some('1'))]
#[case::unquoted_member_name("{a:1}", 1, Some('a'))]
#[case::bad_array_separator("[1;2]", 2, Some(';'))]
#[case::bad_object_separator("{\"a\":1;\"b\":2}", 6, Some(';'))]
#[case::unterminated_string("\"abc", 4, None)]
#[case::unknown_escape("\"a\\q\"", 3, Some('q'))]
#[case::short_unicode_escape("\"\\u12\"", 1, None)]
#[case::bad_hex_digit("\"\\u00g0\"", 5, Some('g'))]
#[case::lone_minus("-", 1, None)]
#[case::minus_without_digit("[-x]", 2, Some('x'))]
#[case::dot_without_digits("1.", 2, None)]
#[case::dot_bad_digit("1.x", 2, Some('x'))]
#[case::exponent_without_digits("1e", 2, None)]
#[case::exponent_sign_only("1e+", 3, None)]
fn grammar_errors(#[case] input: &str, #[case] position: usize, #[case] found: Option<char>) {
    let err = parse(input).unwrap_err();
    let grammar = err.as_grammar().expect("grammar error");
    assert_eq!(grammar.position, position, "position in {input:?}");
    assert_eq!(grammar.found, found, "found in {input:?}");
    assert_eq!(grammar.window, Some((0, input.len())));
    assert!(grammar.snippet.is_some());
}

#[test]
fn failed_parse_yields_no_partial_value() {
    // the error surfaces as Err, so there is nothing half-built to observe
    assert!(parse("[1,2,oops]").is_err());
    assert!(parse("{\"a\":1,\"b\":}").is_err());
}

#[test]
fn error_positions_are_window_absolute() {
    let buffer = "xx{\"a\":}yy";
    let err = parse_slice(buffer, 2, 8).unwrap_err();
    let grammar = err.as_grammar().expect("grammar error");
    assert_eq!(grammar.position, 7);
    assert_eq!(grammar.window, Some((2, 8)));
}

#[test]
fn snippet_is_bounded() {
    let input = format!("[{0}?{0}", " ".repeat(200));
    let err = parse(&input).unwrap_err();
    let grammar = err.as_grammar().expect("grammar error");
    let snippet = grammar.snippet.as_deref().unwrap();
    assert!(snippet.chars().count() <= 21, "snippet too wide: {snippet:?}");
    assert!(snippet.contains('?'));
}

#[test]
fn error_display_names_the_parts() {
    let err = parse("{\"a\":}").unwrap_err();
    let text = err.to_string();
    assert!(text.contains('}'), "{text}");
    assert!(text.contains("at 5"), "{text}");
    assert!(text.contains("[0,6)"), "{text}");
}
