//! The JSON string-escape codec.
//!
//! [`escape`] and [`unescape`] convert between raw string content and the
//! escaped form that appears between the quotes of a JSON string literal.
//! Both parsers and the value model share this module: parsed string spans
//! are unescaped here, and [`crate::Text`] renders through [`escape`].

use std::borrow::Cow;

use thiserror::Error;

/// A failure while decoding escaped JSON string content.
///
/// Offsets are byte offsets into the slice given to [`unescape`]; the
/// parsers rebase them onto absolute input positions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EscapeError {
    /// A backslash (or a `\u` escape) ran past the end of the input.
    #[error("truncated escape sequence at offset {offset}")]
    Truncated {
        /// Byte offset of the backslash that began the escape.
        offset: usize,
    },
    /// The character after a backslash selects no known substitution.
    #[error("unrecognized escape character {found:?} at offset {offset}")]
    Unrecognized {
        /// The offending selector character.
        found: char,
        /// Byte offset of the selector.
        offset: usize,
    },
    /// A `\u` escape contained a non-hex digit.
    #[error("invalid hex digit {found:?} in unicode escape at offset {offset}")]
    InvalidHex {
        /// The offending digit.
        found: char,
        /// Byte offset of the digit.
        offset: usize,
    },
    /// A `\u` escape named a UTF-16 surrogate half with no matching pair.
    #[error("unpaired surrogate \\u{code:04X} at offset {offset}")]
    UnpairedSurrogate {
        /// The surrogate code unit.
        code: u16,
        /// Byte offset of the backslash that began the escape.
        offset: usize,
    },
}

impl EscapeError {
    /// Byte offset of the fault within the unescaped slice.
    pub fn offset(&self) -> usize {
        match self {
            Self::Truncated { offset }
            | Self::Unrecognized { offset, .. }
            | Self::InvalidHex { offset, .. }
            | Self::UnpairedSurrogate { offset, .. } => *offset,
        }
    }
}

const ESCAPED: [char; 7] = ['\\', '"', '\n', '\r', '\u{0008}', '\u{000C}', '\t'];

/// Escapes raw string content for inclusion in a JSON string literal.
///
/// Backslash, double quote, line feed, carriage return, backspace, form
/// feed, and tab become their two-character escapes. Everything else,
/// forward slash and non-ASCII included, passes through unchanged. Returns
/// the input borrowed when no character required escaping.
pub fn escape(raw: &str) -> Cow<'_, str> {
    let Some(first) = raw.find(ESCAPED) else {
        return Cow::Borrowed(raw);
    };
    let mut out = String::with_capacity(raw.len() + 2);
    out.push_str(&raw[..first]);
    for c in raw[first..].chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\u{0008}' => out.push_str("\\b"),
            '\u{000C}' => out.push_str("\\f"),
            '\t' => out.push_str("\\t"),
            _ => out.push(c),
        }
    }
    Cow::Owned(out)
}

/// Decodes escaped JSON string content back to its raw form.
///
/// Accepts the eight single-character escapes (`\b \f \n \r \t \" \\ \/`)
/// and `\u` followed by exactly four hex digits naming a UTF-16 code unit.
/// A high surrogate must be completed by an immediately following low
/// surrogate escape; the pair decodes to one scalar. Returns the input
/// borrowed when it contains no backslash.
///
/// Callers holding a larger buffer pass the sub-slice directly; no copy of
/// the range is required.
pub fn unescape(text: &str) -> Result<Cow<'_, str>, EscapeError> {
    let Some(first) = text.find('\\') else {
        return Ok(Cow::Borrowed(text));
    };
    let mut out = String::with_capacity(text.len());
    out.push_str(&text[..first]);
    let mut i = first;
    while i < text.len() {
        let Some(off) = text[i..].find('\\') else {
            out.push_str(&text[i..]);
            break;
        };
        out.push_str(&text[i..i + off]);
        let esc = i + off;
        let mut j = esc + 1;
        let Some(sel) = text[j..].chars().next() else {
            return Err(EscapeError::Truncated { offset: esc });
        };
        j += sel.len_utf8();
        match sel {
            '\\' => out.push('\\'),
            '/' => out.push('/'),
            '"' => out.push('"'),
            'n' => out.push('\n'),
            'r' => out.push('\r'),
            'b' => out.push('\u{0008}'),
            'f' => out.push('\u{000C}'),
            't' => out.push('\t'),
            'u' => {
                let unit = hex_unit(text, j, esc)?;
                j += 4;
                if let Some(c) = char::from_u32(u32::from(unit)) {
                    out.push(c);
                } else if (0xD800..0xDC00).contains(&unit) && text[j..].starts_with("\\u") {
                    let low = hex_unit(text, j + 2, j)?;
                    if !(0xDC00..0xE000).contains(&low) {
                        return Err(EscapeError::UnpairedSurrogate {
                            code: unit,
                            offset: esc,
                        });
                    }
                    j += 6;
                    let scalar =
                        0x1_0000 + ((u32::from(unit) - 0xD800) << 10) + (u32::from(low) - 0xDC00);
                    out.push(char::from_u32(scalar).expect("surrogate pair is a valid scalar"));
                } else {
                    return Err(EscapeError::UnpairedSurrogate {
                        code: unit,
                        offset: esc,
                    });
                }
            }
            other => {
                return Err(EscapeError::Unrecognized {
                    found: other,
                    offset: esc + 1,
                });
            }
        }
        i = j;
    }
    Ok(Cow::Owned(out))
}

/// Reads exactly four hex digits starting at byte offset `at`.
fn hex_unit(text: &str, at: usize, escape_at: usize) -> Result<u16, EscapeError> {
    let mut unit: u32 = 0;
    let mut digits = 0usize;
    for c in text[at..].chars().take(4) {
        let Some(d) = c.to_digit(16) else {
            return Err(EscapeError::InvalidHex {
                found: c,
                offset: at + digits,
            });
        };
        unit = unit * 16 + d;
        digits += 1;
    }
    if digits < 4 {
        return Err(EscapeError::Truncated { offset: escape_at });
    }
    // four hex digits never exceed 0xFFFF
    #[allow(clippy::cast_possible_truncation)]
    let unit = unit as u16;
    Ok(unit)
}
