use quickcheck::{Arbitrary, Gen};
use quickcheck_macros::quickcheck;

use crate::{Array, Number, Object, StreamParser, Value, escape, parse, unescape};

/// Wrapper so the crate-local `Value` can implement [`Arbitrary`].
#[derive(Clone, Debug)]
struct ArbitraryValue(Value);

impl Arbitrary for ArbitraryValue {
    fn arbitrary(g: &mut Gen) -> Self {
        ArbitraryValue(arbitrary_value(g, 3))
    }
}

fn arbitrary_value(g: &mut Gen, depth: usize) -> Value {
    let variants: u8 = if depth == 0 { 4 } else { 6 };
    match u8::arbitrary(g) % variants {
        0 => Value::NULL,
        1 => Value::Boolean(bool::arbitrary(g)),
        2 => Value::Number(arbitrary_number(g)),
        3 => Value::from(String::arbitrary(g)),
        4 => {
            let mut arr = Array::new();
            for _ in 0..usize::arbitrary(g) % 4 {
                arr.push(arbitrary_value(g, depth - 1));
            }
            Value::Array(arr)
        }
        _ => {
            let mut obj = Object::new();
            for _ in 0..usize::arbitrary(g) % 4 {
                obj.insert(String::arbitrary(g), arbitrary_value(g, depth - 1));
            }
            Value::Object(obj)
        }
    }
}

fn arbitrary_number(g: &mut Gen) -> Number {
    match u8::arbitrary(g) % 3 {
        0 => Number::from(i64::arbitrary(g)),
        1 => {
            let v = f64::arbitrary(g);
            Number::from_f64(if v.is_finite() { v } else { 0.0 })
                .unwrap_or_else(|| Number::from(0u8))
        }
        _ => {
            // a literal with explicit trailing scale
            let text = format!("{}.{:03}", i32::arbitrary(g), u16::arbitrary(g) % 1000);
            text.parse().unwrap()
        }
    }
}

#[quickcheck]
fn roundtrip_through_rendered_text(value: ArbitraryValue) -> bool {
    let text = value.0.to_string();
    parse(&text).unwrap() == Some(value.0)
}

#[quickcheck]
fn stream_roundtrip_of_multiple_roots(values: Vec<ArbitraryValue>) -> bool {
    let payload = values
        .iter()
        .map(|v| v.0.to_string())
        .collect::<Vec<_>>()
        .join(" ");
    let parsed: Vec<Value> = StreamParser::new(payload.as_bytes())
        .map(Result::unwrap)
        .collect();
    parsed == values.into_iter().map(|v| v.0).collect::<Vec<_>>()
}

#[quickcheck]
fn unescape_inverts_escape(s: String) -> bool {
    unescape(&escape(&s)).unwrap() == s
}

#[quickcheck]
fn escape_is_idempotent(s: String) -> bool {
    let escaped = escape(&s);
    escape(&unescape(&escaped).unwrap()) == escaped
}

#[quickcheck]
fn rendered_text_parses_in_both_modes(value: ArbitraryValue) -> bool {
    let text = value.0.to_string();
    let buffered = parse(&text).unwrap();
    let streamed = StreamParser::new(text.as_bytes())
        .next()
        .transpose()
        .unwrap();
    buffered == streamed
}
