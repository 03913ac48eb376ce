//! The windowed recursive-descent parser.
//!
//! Parses one JSON value out of an explicit `[from, to)` window into a text
//! buffer, so an embedded value can be parsed without extracting it first.
//! Scan positions are explicit values threaded through the recursion and
//! returned to the caller, which can detect trailing content or chain
//! further parses over the same buffer.

use crate::error::{GrammarError, ParseError};
use crate::escape::{self, EscapeError};
use crate::number::Number;
use crate::value::{Array, Object, Text, Value};

/// Radius of the diagnostic snippet around a fault, in characters.
const SNIPPET_RADIUS: usize = 10;

/// Parses the first JSON value in `text`.
///
/// Input that is empty or all whitespace holds no value and yields
/// `Ok(None)`, distinct from both an error and a parsed null. Content
/// after the first value is not inspected; use [`parse_slice`] when
/// trailing data matters.
///
/// # Examples
///
/// ```
/// use jsongraph::parse;
///
/// let value = parse(r#"{"a":1}"#).unwrap().unwrap();
/// assert_eq!(value.to_string(), r#"{"a":1}"#);
/// assert!(parse("   ").unwrap().is_none());
/// ```
pub fn parse(text: &str) -> Result<Option<Value>, ParseError> {
    let (value, _) = parse_slice(text, 0, text.len())?;
    Ok(value)
}

/// Parses one JSON value from the `[from, to)` window of `text`.
///
/// Returns the value (or `None` when the window holds only whitespace)
/// together with the advanced scan position.
///
/// # Panics
///
/// Panics, std-slicing style, if the window is out of bounds or its ends
/// are not char boundaries.
pub fn parse_slice(
    text: &str,
    from: usize,
    to: usize,
) -> Result<(Option<Value>, usize), ParseError> {
    assert!(from <= to && to <= text.len(), "window out of bounds");
    assert!(
        text.is_char_boundary(from) && text.is_char_boundary(to),
        "window ends must be char boundaries"
    );
    let scanner = Scanner { text, from, to };
    let pos = scanner.skip_whitespace(from);
    if pos == to {
        return Ok((None, pos));
    }
    let (value, pos) = scanner.value(pos)?;
    Ok((Some(value), pos))
}

struct Scanner<'a> {
    text: &'a str,
    from: usize,
    to: usize,
}

impl Scanner<'_> {
    fn bytes(&self) -> &[u8] {
        self.text.as_bytes()
    }

    fn skip_whitespace(&self, mut pos: usize) -> usize {
        let b = self.bytes();
        while pos < self.to && matches!(b[pos], b' ' | b'\t' | b'\n' | b'\r') {
            pos += 1;
        }
        pos
    }

    fn value(&self, pos: usize) -> Result<(Value, usize), ParseError> {
        let pos = self.skip_whitespace(pos);
        let rest = &self.text[pos..self.to];
        if rest.starts_with("null") {
            return Ok((Value::NULL, pos + 4));
        }
        if rest.starts_with("false") {
            return Ok((Value::FALSE, pos + 5));
        }
        if rest.starts_with("true") {
            return Ok((Value::TRUE, pos + 4));
        }
        if pos >= self.to {
            return Err(self.end_of_input("value", pos));
        }
        match self.bytes()[pos] {
            b'"' => {
                let (raw, next) = self.string(pos)?;
                Ok((Value::String(Text::new(raw)), next))
            }
            b'-' | b'0'..=b'9' => self.number(pos),
            b'{' => self.object(pos),
            b'[' => self.array(pos),
            _ => Err(self.unexpected("value", pos)),
        }
    }

    /// Scans a string literal at `pos` and returns its unescaped content.
    /// A backslash unconditionally consumes the following character, so an
    /// escaped quote never terminates the scan.
    fn string(&self, pos: usize) -> Result<(String, usize), ParseError> {
        let b = self.bytes();
        let mut end = pos + 1;
        while end < self.to && b[end] != b'"' {
            if b[end] == b'\\' {
                end += 1;
            }
            end += 1;
        }
        if end >= self.to {
            return Err(self.end_of_input("closing '\"'", self.to));
        }
        let raw = match escape::unescape(&self.text[pos + 1..end]) {
            Ok(cow) => cow.into_owned(),
            Err(e) => return Err(self.escape_error(&e, pos + 1)),
        };
        Ok((raw, end + 1))
    }

    fn number(&self, pos: usize) -> Result<(Value, usize), ParseError> {
        let b = self.bytes();
        let start = pos;
        let mut i = pos;
        if b[i] == b'-' {
            i += 1;
        }
        if i >= self.to {
            return Err(self.end_of_input("digit", i));
        }
        match b[i] {
            // A leading zero takes no further digits; anything after it is
            // trailing content unless a fraction follows.
            b'0' => i += 1,
            b'1'..=b'9' => {
                while i < self.to && b[i].is_ascii_digit() {
                    i += 1;
                }
            }
            _ => return Err(self.unexpected("digit", i)),
        }
        if i < self.to && b[i] == b'.' {
            i += 1;
            let digits = i;
            while i < self.to && b[i].is_ascii_digit() {
                i += 1;
            }
            if i == digits {
                return Err(self.expected_digit(i));
            }
        }
        if i < self.to && matches!(b[i], b'e' | b'E') {
            i += 1;
            if i < self.to && matches!(b[i], b'+' | b'-') {
                i += 1;
            }
            let digits = i;
            while i < self.to && b[i].is_ascii_digit() {
                i += 1;
            }
            if i == digits {
                return Err(self.expected_digit(i));
            }
        }
        let number: Number = self.text[start..i]
            .parse()
            .map_err(|_| self.unexpected("number", start))?;
        Ok((Value::Number(number), i))
    }

    fn array(&self, pos: usize) -> Result<(Value, usize), ParseError> {
        let mut arr = Array::new();
        let mut pos = pos + 1;
        loop {
            pos = self.skip_whitespace(pos);
            if pos >= self.to {
                return Err(self.end_of_input("value or ']'", pos));
            }
            if self.bytes()[pos] == b']' {
                pos += 1;
                break;
            }
            let (element, next) = self.value(pos)?;
            arr.push(element);
            pos = self.skip_whitespace(next);
            if pos >= self.to {
                return Err(self.end_of_input("',' or ']'", pos));
            }
            match self.bytes()[pos] {
                b',' => pos += 1,
                b']' => {
                    pos += 1;
                    break;
                }
                _ => return Err(self.unexpected("',' or ']'", pos)),
            }
        }
        Ok((Value::Array(arr), pos))
    }

    fn object(&self, pos: usize) -> Result<(Value, usize), ParseError> {
        let mut obj = Object::new();
        let mut pos = pos + 1;
        loop {
            pos = self.skip_whitespace(pos);
            if pos >= self.to {
                return Err(self.end_of_input("member name or '}'", pos));
            }
            if self.bytes()[pos] == b'}' {
                pos += 1;
                break;
            }
            if self.bytes()[pos] != b'"' {
                return Err(self.unexpected("member name", pos));
            }
            let (key, next) = self.string(pos)?;
            pos = self.skip_whitespace(next);
            if pos >= self.to {
                return Err(self.end_of_input("':'", pos));
            }
            if self.bytes()[pos] != b':' {
                return Err(self.unexpected("':'", pos));
            }
            let (member, next) = self.value(pos + 1)?;
            obj.insert(key, member);
            pos = self.skip_whitespace(next);
            if pos >= self.to {
                return Err(self.end_of_input("',' or '}'", pos));
            }
            match self.bytes()[pos] {
                b',' => pos += 1,
                b'}' => {
                    pos += 1;
                    break;
                }
                _ => return Err(self.unexpected("',' or '}'", pos)),
            }
        }
        Ok((Value::Object(obj), pos))
    }

    fn unexpected(&self, expected: &'static str, pos: usize) -> ParseError {
        GrammarError {
            expected,
            found: self.text[pos..self.to].chars().next(),
            position: pos,
            window: Some((self.from, self.to)),
            snippet: Some(self.snippet(pos)),
        }
        .into()
    }

    fn end_of_input(&self, expected: &'static str, pos: usize) -> ParseError {
        GrammarError {
            expected,
            found: None,
            position: pos,
            window: Some((self.from, self.to)),
            snippet: Some(self.snippet(pos)),
        }
        .into()
    }

    fn expected_digit(&self, pos: usize) -> ParseError {
        if pos >= self.to {
            self.end_of_input("digit", pos)
        } else {
            self.unexpected("digit", pos)
        }
    }

    fn escape_error(&self, err: &EscapeError, base: usize) -> ParseError {
        let position = base + err.offset();
        let (expected, found) = match err {
            EscapeError::Truncated { .. } => ("escape sequence", None),
            EscapeError::Unrecognized { found, .. } => ("escape character", Some(*found)),
            EscapeError::InvalidHex { found, .. } => ("hex digit", Some(*found)),
            EscapeError::UnpairedSurrogate { .. } => ("surrogate pair", Some('\\')),
        };
        GrammarError {
            expected,
            found,
            position,
            window: Some((self.from, self.to)),
            snippet: Some(self.snippet(position)),
        }
        .into()
    }

    /// Up to [`SNIPPET_RADIUS`] characters either side of `pos`, clamped to
    /// the window.
    fn snippet(&self, pos: usize) -> String {
        let pos = pos.clamp(self.from, self.to);
        let before = &self.text[self.from..pos];
        let after = &self.text[pos..self.to];
        let start = before
            .char_indices()
            .rev()
            .take(SNIPPET_RADIUS)
            .last()
            .map_or(pos, |(i, _)| self.from + i);
        let end = after
            .char_indices()
            .nth(SNIPPET_RADIUS)
            .map_or(self.to, |(i, _)| pos + i);
        self.text[start..end].to_owned()
    }
}
