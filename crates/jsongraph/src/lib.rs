//! JSON value graphs with windowed and streaming recursive-descent parsers.
//!
//! This crate parses JSON text into an in-memory [`Value`] graph and renders
//! a graph back to compact JSON text. Two input modes are supported:
//!
//! - [`parse`] / [`parse_slice`] scan a complete in-memory buffer, over an
//!   explicit `[from, to)` window when the value is embedded in a larger
//!   text;
//! - [`StreamParser`] pulls a lazy sequence of whitespace-separated
//!   top-level values off an open-ended byte stream.
//!
//! Numbers are exact decimals (`1.50` parses and renders as `1.50`, while
//! comparing equal to `1.5`), and objects serialize their members in
//! ascending key order regardless of insertion order.
//!
//! # Examples
//!
//! ```
//! use jsongraph::{Value, parse};
//!
//! let value = parse(r#"{"b":2,"a":[1.50,null,true]}"#).unwrap().unwrap();
//! assert_eq!(value.to_string(), r#"{"a":[1.50,null,true],"b":2}"#);
//! assert!(value.as_object().unwrap().contains_key("b"));
//! ```
//!
//! Streaming a sequence of documents:
//!
//! ```
//! use jsongraph::StreamParser;
//!
//! let values = StreamParser::new("1 {\"a\":2} [3]".as_bytes());
//! let rendered: Vec<String> = values
//!     .map(|v| v.unwrap().to_string())
//!     .collect();
//! assert_eq!(rendered, ["1", "{\"a\":2}", "[3]"]);
//! ```

mod error;
mod escape;
mod number;
mod parse;
mod shape;
mod stream;
mod value;

#[cfg(test)]
mod tests;

pub use error::{GrammarError, ParseError};
pub use escape::{EscapeError, escape, unescape};
pub use number::{Number, NumberError};
pub use parse::{parse, parse_slice};
pub use shape::{ArrayShape, array_shape};
pub use stream::StreamParser;
pub use value::{Array, Object, Text, Value, ValueType};
