use crate::{StreamParser, Value, parse, parse_slice};

const DOCUMENTS: &[&str] = &[
    "null",
    "true",
    "-0.50",
    "\"text with \\\"quotes\\\" and \\u2603\"",
    "[]",
    "{}",
    "[1,[2,[3]],null]",
    "{\"b\":[true,false],\"a\":{\"nested\":\"deep\"}}",
];

#[test]
fn stream_and_buffer_modes_agree() {
    for doc in DOCUMENTS {
        let buffered = parse(doc).unwrap();
        let streamed = StreamParser::new(doc.as_bytes())
            .next()
            .transpose()
            .unwrap();
        assert_eq!(buffered, streamed, "modes disagree on {doc:?}");
    }
}

#[test]
fn chained_window_parses_match_the_stream() {
    let payload = DOCUMENTS.join("\n");
    let streamed: Vec<Value> = StreamParser::new(payload.as_bytes())
        .map(Result::unwrap)
        .collect();

    let mut windowed = Vec::new();
    let mut pos = 0;
    while let (Some(value), next) = parse_slice(&payload, pos, payload.len()).unwrap() {
        windowed.push(value);
        pos = next;
    }

    assert_eq!(streamed.len(), DOCUMENTS.len());
    assert_eq!(windowed, streamed);
}

#[test]
fn pulls_are_lazy_and_ordered() {
    let mut parser = StreamParser::new("1 2 3".as_bytes());
    assert_eq!(parser.next_value().unwrap(), Some(Value::from(1i64)));
    assert_eq!(parser.next_value().unwrap(), Some(Value::from(2i64)));
    assert_eq!(parser.next_value().unwrap(), Some(Value::from(3i64)));
    assert_eq!(parser.next_value().unwrap(), None);
}

#[test]
fn error_in_late_document_preserves_earlier_values() {
    let mut parser = StreamParser::new("{\"ok\":1} [broken".as_bytes());
    let first = parser.next().unwrap().unwrap();
    assert_eq!(first.to_string(), "{\"ok\":1}");
    assert!(parser.next().unwrap().is_err());
    assert!(parser.next().is_none());
}
