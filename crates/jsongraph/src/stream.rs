//! The stream parser.
//!
//! [`StreamParser`] pulls a sequence of whitespace-separated top-level JSON
//! values off an open-ended byte stream, without knowing the stream's total
//! length up front. Each pull parses exactly one value on demand; reaching
//! end of stream at a value boundary yields the end sentinel, not an error.
//!
//! The parser owns a bounded pushback buffer sized to the longest keyword.
//! Keyword recognition reads speculatively and returns every unconsumed
//! character to the buffer, so a value that merely starts like a keyword is
//! dispatched correctly on the next character.

use std::io::{self, Read};

use crate::error::{GrammarError, ParseError};
use crate::escape::{self, EscapeError};
use crate::number::Number;
use crate::value::{Array, Object, Text, Value};

/// Length of the longest recognized keyword, `false`.
const KEYWORD_CAPACITY: usize = 5;

/// Refill granularity of the UTF-8 decoder.
const READ_CHUNK: usize = 8 * 1024;

/// Decodes characters incrementally off a byte source.
#[derive(Debug)]
struct CharReader<R> {
    source: R,
    buf: Vec<u8>,
    start: usize,
    end: usize,
    eof: bool,
}

impl<R: Read> CharReader<R> {
    fn new(source: R) -> Self {
        Self {
            source,
            buf: vec![0; READ_CHUNK],
            start: 0,
            end: 0,
            eof: false,
        }
    }

    fn next_char(&mut self) -> io::Result<Option<char>> {
        loop {
            let available = &self.buf[self.start..self.end];
            if available.is_empty() {
                if self.eof {
                    return Ok(None);
                }
            } else {
                let (decoded, size) = bstr::decode_utf8(available);
                if let Some(c) = decoded {
                    self.start += size;
                    return Ok(Some(c));
                }
                // Four bytes always hold a full code unit sequence; less
                // may just be a sequence truncated by the chunk edge.
                if self.eof || available.len() >= 4 {
                    return Err(io::Error::new(
                        io::ErrorKind::InvalidData,
                        "stream is not valid UTF-8",
                    ));
                }
            }
            self.fill()?;
        }
    }

    fn fill(&mut self) -> io::Result<()> {
        if self.start > 0 {
            self.buf.copy_within(self.start..self.end, 0);
            self.end -= self.start;
            self.start = 0;
        }
        loop {
            match self.source.read(&mut self.buf[self.end..]) {
                Ok(0) => {
                    self.eof = true;
                    return Ok(());
                }
                Ok(n) => {
                    self.end += n;
                    return Ok(());
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => return Err(e),
            }
        }
    }
}

/// Bounded pushback store. Characters go back last-in first-out; callers
/// unreading a sequence push it in reverse so it reads out in order.
#[derive(Debug)]
struct Pushback {
    buf: [char; KEYWORD_CAPACITY],
    len: usize,
}

impl Pushback {
    fn new() -> Self {
        Self {
            buf: ['\0'; KEYWORD_CAPACITY],
            len: 0,
        }
    }

    fn pop(&mut self) -> Option<char> {
        if self.len == 0 {
            None
        } else {
            self.len -= 1;
            Some(self.buf[self.len])
        }
    }

    fn push(&mut self, c: char) {
        debug_assert!(self.len < KEYWORD_CAPACITY, "pushback overflow");
        self.buf[self.len] = c;
        self.len += 1;
    }
}

/// A lazy, single-pass sequence of JSON values pulled off a byte stream.
///
/// The sequence is forward-only and not restartable; `&mut self` on every
/// pull keeps it single-consumer. After yielding an error the iterator is
/// exhausted. Positions carried in errors are approximate character
/// counts.
///
/// # Examples
///
/// ```
/// use jsongraph::StreamParser;
///
/// let mut values = StreamParser::new("{\"a\":1} 2 \"three\"".as_bytes());
/// assert_eq!(values.next().unwrap().unwrap().to_string(), r#"{"a":1}"#);
/// assert_eq!(values.next().unwrap().unwrap().to_string(), "2");
/// assert_eq!(values.next().unwrap().unwrap().to_string(), "\"three\"");
/// assert!(values.next().is_none());
/// ```
#[derive(Debug)]
pub struct StreamParser<R> {
    reader: CharReader<R>,
    pushback: Pushback,
    pos: usize,
    failed: bool,
}

impl<R: Read> StreamParser<R> {
    /// Wraps a byte source. The source's own blocking behavior governs the
    /// parser's; reads are issued sequentially as values are pulled.
    pub fn new(source: R) -> Self {
        Self {
            reader: CharReader::new(source),
            pushback: Pushback::new(),
            pos: 0,
            failed: false,
        }
    }

    /// Parses the next top-level value off the stream.
    ///
    /// `Ok(None)` signals end of stream at a value boundary, the sole
    /// termination signal, repeated on every later call. End of stream
    /// inside a value is a grammar error.
    pub fn next_value(&mut self) -> Result<Option<Value>, ParseError> {
        self.skip_whitespace()?;
        if self.peek_char()?.is_none() {
            return Ok(None);
        }
        self.value().map(Some)
    }

    fn read_char(&mut self) -> Result<Option<char>, ParseError> {
        if let Some(c) = self.pushback.pop() {
            self.pos += 1;
            return Ok(Some(c));
        }
        match self.reader.next_char() {
            Ok(Some(c)) => {
                self.pos += 1;
                Ok(Some(c))
            }
            Ok(None) => Ok(None),
            Err(source) => Err(ParseError::Io {
                position: self.pos,
                source,
            }),
        }
    }

    fn unread(&mut self, c: char) {
        self.pos -= 1;
        self.pushback.push(c);
    }

    fn peek_char(&mut self) -> Result<Option<char>, ParseError> {
        match self.read_char()? {
            Some(c) => {
                self.unread(c);
                Ok(Some(c))
            }
            None => Ok(None),
        }
    }

    fn skip_whitespace(&mut self) -> Result<(), ParseError> {
        loop {
            match self.read_char()? {
                Some(' ' | '\t' | '\n' | '\r') => {}
                Some(c) => {
                    self.unread(c);
                    return Ok(());
                }
                None => return Ok(()),
            }
        }
    }

    /// Speculatively reads up to the longest keyword. An exact prefix match
    /// consumes the keyword and pushes back the excess lookahead; a
    /// mismatch pushes back everything read.
    fn keyword(&mut self) -> Result<Option<Value>, ParseError> {
        let mut probe = ['\0'; KEYWORD_CAPACITY];
        let mut n = 0;
        while n < KEYWORD_CAPACITY {
            match self.read_char()? {
                Some(c) => {
                    probe[n] = c;
                    n += 1;
                }
                None => break,
            }
        }
        for (keyword, value) in [
            ("null", Value::NULL),
            ("false", Value::FALSE),
            ("true", Value::TRUE),
        ] {
            let k = keyword.len();
            if n >= k && probe[..k].iter().copied().eq(keyword.chars()) {
                for i in (k..n).rev() {
                    self.unread(probe[i]);
                }
                return Ok(Some(value));
            }
        }
        for i in (0..n).rev() {
            self.unread(probe[i]);
        }
        Ok(None)
    }

    fn value(&mut self) -> Result<Value, ParseError> {
        self.skip_whitespace()?;
        if let Some(keyword) = self.keyword()? {
            return Ok(keyword);
        }
        let Some(c) = self.peek_char()? else {
            return Err(self.end_of_input("value"));
        };
        match c {
            '"' => self.string().map(|raw| Value::String(Text::new(raw))),
            '-' | '0'..='9' => self.number(),
            '{' => self.object(),
            '[' => self.array(),
            _ => Err(self.unexpected("value", c)),
        }
    }

    /// Consumes a string literal, both quotes included, and returns the
    /// unescaped content.
    fn string(&mut self) -> Result<String, ParseError> {
        let start = self.pos;
        match self.read_char()? {
            Some('"') => {}
            Some(c) => return Err(self.grammar_at("string", Some(c), self.pos - 1)),
            None => return Err(self.end_of_input("string")),
        }
        let mut raw = String::new();
        loop {
            match self.read_char()? {
                None => return Err(self.end_of_input("closing '\"'")),
                Some('"') => break,
                Some('\\') => {
                    raw.push('\\');
                    match self.read_char()? {
                        Some(c) => raw.push(c),
                        None => return Err(self.end_of_input("closing '\"'")),
                    }
                }
                Some(c) => raw.push(c),
            }
        }
        match escape::unescape(&raw) {
            Ok(cow) => Ok(cow.into_owned()),
            Err(e) => Err(self.escape_error(&e, start + 1)),
        }
    }

    fn number(&mut self) -> Result<Value, ParseError> {
        let start = self.pos;
        let mut literal = String::new();
        let mut c = self.read_char()?;
        if c == Some('-') {
            literal.push('-');
            c = self.read_char()?;
        }
        match c {
            Some('0') => {
                literal.push('0');
                c = self.read_char()?;
            }
            Some(d @ '1'..='9') => {
                literal.push(d);
                c = self.read_char()?;
                while let Some(d @ '0'..='9') = c {
                    literal.push(d);
                    c = self.read_char()?;
                }
            }
            Some(other) => return Err(self.grammar_at("digit", Some(other), self.pos - 1)),
            None => return Err(self.end_of_input("digit")),
        }
        if c == Some('.') {
            literal.push('.');
            c = self.read_char()?;
            let mut digits = 0;
            while let Some(d @ '0'..='9') = c {
                literal.push(d);
                digits += 1;
                c = self.read_char()?;
            }
            if digits == 0 {
                return Err(self.expected_digit(c));
            }
        }
        if let Some(e @ ('e' | 'E')) = c {
            literal.push(e);
            c = self.read_char()?;
            if let Some(sign @ ('+' | '-')) = c {
                literal.push(sign);
                c = self.read_char()?;
            }
            let mut digits = 0;
            while let Some(d @ '0'..='9') = c {
                literal.push(d);
                digits += 1;
                c = self.read_char()?;
            }
            if digits == 0 {
                return Err(self.expected_digit(c));
            }
        }
        if let Some(terminator) = c {
            self.unread(terminator);
        }
        let number: Number = literal
            .parse()
            .map_err(|_| self.grammar_at("number", None, start))?;
        Ok(Value::Number(number))
    }

    fn array(&mut self) -> Result<Value, ParseError> {
        let _ = self.read_char()?; // the peeked '['
        let mut arr = Array::new();
        loop {
            self.skip_whitespace()?;
            match self.peek_char()? {
                Some(']') => {
                    let _ = self.read_char()?;
                    break;
                }
                None => return Err(self.end_of_input("value or ']'")),
                Some(_) => {}
            }
            let element = self.value()?;
            arr.push(element);
            self.skip_whitespace()?;
            match self.read_char()? {
                Some(',') => {}
                Some(']') => break,
                Some(c) => return Err(self.grammar_at("',' or ']'", Some(c), self.pos - 1)),
                None => return Err(self.end_of_input("',' or ']'")),
            }
        }
        Ok(Value::Array(arr))
    }

    fn object(&mut self) -> Result<Value, ParseError> {
        let _ = self.read_char()?; // the peeked '{'
        let mut obj = Object::new();
        loop {
            self.skip_whitespace()?;
            match self.peek_char()? {
                Some('}') => {
                    let _ = self.read_char()?;
                    break;
                }
                Some('"') => {}
                Some(c) => return Err(self.unexpected("member name", c)),
                None => return Err(self.end_of_input("member name or '}'")),
            }
            let key = self.string()?;
            self.skip_whitespace()?;
            match self.read_char()? {
                Some(':') => {}
                Some(c) => return Err(self.grammar_at("':'", Some(c), self.pos - 1)),
                None => return Err(self.end_of_input("':'")),
            }
            let member = self.value()?;
            obj.insert(key, member);
            self.skip_whitespace()?;
            match self.read_char()? {
                Some(',') => {}
                Some('}') => break,
                Some(c) => return Err(self.grammar_at("',' or '}'", Some(c), self.pos - 1)),
                None => return Err(self.end_of_input("',' or '}'")),
            }
        }
        Ok(Value::Object(obj))
    }

    fn grammar_at(&self, expected: &'static str, found: Option<char>, position: usize) -> ParseError {
        GrammarError {
            expected,
            found,
            position,
            window: None,
            snippet: None,
        }
        .into()
    }

    /// For a character observed by peeking: the position still points at it.
    fn unexpected(&self, expected: &'static str, found: char) -> ParseError {
        self.grammar_at(expected, Some(found), self.pos)
    }

    fn end_of_input(&self, expected: &'static str) -> ParseError {
        self.grammar_at(expected, None, self.pos)
    }

    fn expected_digit(&self, c: Option<char>) -> ParseError {
        match c {
            Some(found) => self.grammar_at("digit", Some(found), self.pos - 1),
            None => self.end_of_input("digit"),
        }
    }

    fn escape_error(&self, err: &EscapeError, base: usize) -> ParseError {
        let (expected, found) = match err {
            EscapeError::Truncated { .. } => ("escape sequence", None),
            EscapeError::Unrecognized { found, .. } => ("escape character", Some(*found)),
            EscapeError::InvalidHex { found, .. } => ("hex digit", Some(*found)),
            EscapeError::UnpairedSurrogate { .. } => ("surrogate pair", Some('\\')),
        };
        self.grammar_at(expected, found, base + err.offset())
    }
}

impl<R: Read> Iterator for StreamParser<R> {
    type Item = Result<Value, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        match self.next_value() {
            Ok(Some(value)) => Some(Ok(value)),
            Ok(None) => None,
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }
}

impl<R: Read> std::iter::FusedIterator for StreamParser<R> {}
