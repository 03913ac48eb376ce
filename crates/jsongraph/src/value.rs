//! JSON value types and compact rendering.
//!
//! This module defines the [`Value`] enum, which represents any valid JSON
//! value, together with its container types [`Array`] and [`Object`] and the
//! string payload type [`Text`]. `Display` renders compact JSON text with
//! object members in ascending key order.

use std::borrow::Cow;
use std::cell::OnceCell;
use std::collections::BTreeMap;
use std::collections::btree_map;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Deref, Index};

use crate::escape;
use crate::number::Number;

/// The six JSON value kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    /// The `null` keyword.
    Null,
    /// `true` or `false`.
    Boolean,
    /// An exact decimal number.
    Number,
    /// A string.
    String,
    /// A key-sorted map of members.
    Object,
    /// An ordered sequence of elements.
    Array,
}

/// A JSON value as defined by [RFC 8259].
///
/// # Examples
///
/// ```
/// use jsongraph::{Object, Value};
///
/// let mut obj = Object::new();
/// obj.insert("key", "value");
/// let v = Value::Object(obj);
/// assert_eq!(v.to_string(), r#"{"key":"value"}"#);
/// ```
///
/// [RFC 8259]: https://datatracker.ietf.org/doc/html/rfc8259
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum Value {
    /// The null value.
    #[default]
    Null,
    /// A boolean.
    Boolean(bool),
    /// An exact decimal number.
    Number(Number),
    /// A string.
    String(Text),
    /// An ordered sequence of values.
    Array(Array),
    /// A key-sorted map of string keys to values.
    Object(Object),
}

impl Value {
    /// The canonical null value, shareable anywhere a null is needed.
    pub const NULL: Value = Value::Null;
    /// The canonical `true` value.
    pub const TRUE: Value = Value::Boolean(true);
    /// The canonical `false` value.
    pub const FALSE: Value = Value::Boolean(false);

    /// Returns the variant tag of this value.
    pub fn value_type(&self) -> ValueType {
        match self {
            Value::Null => ValueType::Null,
            Value::Boolean(_) => ValueType::Boolean,
            Value::Number(_) => ValueType::Number,
            Value::String(_) => ValueType::String,
            Value::Array(_) => ValueType::Array,
            Value::Object(_) => ValueType::Object,
        }
    }

    /// Returns `true` if the value is null.
    ///
    /// ```
    /// use jsongraph::Value;
    ///
    /// assert!(Value::NULL.is_null());
    /// assert!(!Value::FALSE.is_null());
    /// ```
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns `true` if the value is a boolean.
    pub fn is_boolean(&self) -> bool {
        matches!(self, Self::Boolean(..))
    }

    /// Returns `true` if the value is a number.
    pub fn is_number(&self) -> bool {
        matches!(self, Self::Number(..))
    }

    /// Returns `true` if the value is a string.
    pub fn is_string(&self) -> bool {
        matches!(self, Self::String(..))
    }

    /// Returns `true` if the value is an array.
    pub fn is_array(&self) -> bool {
        matches!(self, Self::Array(..))
    }

    /// Returns `true` if the value is an object.
    pub fn is_object(&self) -> bool {
        matches!(self, Self::Object(..))
    }

    /// The boolean payload, if this is a boolean.
    pub fn as_boolean(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// The number payload, if this is a number.
    pub fn as_number(&self) -> Option<&Number> {
        match self {
            Self::Number(n) => Some(n),
            _ => None,
        }
    }

    /// The string payload, if this is a string.
    pub fn as_text(&self) -> Option<&Text> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// The string payload as a `&str`, if this is a string.
    ///
    /// ```
    /// use jsongraph::Value;
    ///
    /// let v = Value::from("hi");
    /// assert_eq!(v.as_str(), Some("hi"));
    /// assert_eq!(Value::NULL.as_str(), None);
    /// ```
    pub fn as_str(&self) -> Option<&str> {
        self.as_text().map(Text::as_str)
    }

    /// The array payload, if this is an array.
    pub fn as_array(&self) -> Option<&Array> {
        match self {
            Self::Array(a) => Some(a),
            _ => None,
        }
    }

    /// The array payload, mutably.
    pub fn as_array_mut(&mut self) -> Option<&mut Array> {
        match self {
            Self::Array(a) => Some(a),
            _ => None,
        }
    }

    /// The object payload, if this is an object.
    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Self::Object(o) => Some(o),
            _ => None,
        }
    }

    /// The object payload, mutably.
    pub fn as_object_mut(&mut self) -> Option<&mut Object> {
        match self {
            Self::Object(o) => Some(o),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Boolean(b) => f.write_str(if *b { "true" } else { "false" }),
            Value::Number(n) => f.write_str(n.as_str()),
            Value::String(s) => write!(f, "\"{}\"", s.escaped()),
            Value::Array(arr) => {
                f.write_str("[")?;
                let mut first = true;
                for v in arr {
                    if !first {
                        f.write_str(",")?;
                    }
                    first = false;
                    write!(f, "{v}")?;
                }
                f.write_str("]")
            }
            Value::Object(obj) => {
                f.write_str("{")?;
                let mut first = true;
                for (k, v) in obj {
                    if !first {
                        f.write_str(",")?;
                    }
                    first = false;
                    write!(f, "\"{}\":{}", escape::escape(k), v)?;
                }
                f.write_str("}")
            }
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Boolean(v)
    }
}

impl From<Number> for Value {
    fn from(v: Number) -> Self {
        Self::Number(v)
    }
}

impl From<Text> for Value {
    fn from(v: Text) -> Self {
        Self::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(Text::new(v))
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(Text::new(v))
    }
}

impl From<Array> for Value {
    fn from(v: Array) -> Self {
        Self::Array(v)
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Self::Array(Array::from(v))
    }
}

impl From<Object> for Value {
    fn from(v: Object) -> Self {
        Self::Object(v)
    }
}

/// Absent options become null, mirroring the nullable convenience
/// constructors of the ancestral API.
impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

macro_rules! value_from_integer {
    ($($t:ty),*) => {$(
        impl From<$t> for Value {
            fn from(v: $t) -> Self {
                Self::Number(Number::from(v))
            }
        }
    )*};
}

value_from_integer!(i8, i16, i32, i64, u8, u16, u32, u64, usize, isize);

/// A JSON string payload.
///
/// Equality and hashing use the semantic (unescaped) content. The escaped
/// rendering is computed on first use and cached; content that needs no
/// escaping renders without a second allocation.
#[derive(Debug, Clone, Default)]
pub struct Text {
    raw: String,
    // `None` records that the escaped form equals the raw form.
    escaped: OnceCell<Option<String>>,
}

impl Text {
    /// Wraps raw (unescaped) string content.
    pub fn new(raw: impl Into<String>) -> Self {
        Self {
            raw: raw.into(),
            escaped: OnceCell::new(),
        }
    }

    /// The semantic content.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// The JSON-escaped rendering, without surrounding quotes. Computed
    /// once and cached.
    pub fn escaped(&self) -> &str {
        let cached = self.escaped.get_or_init(|| match escape::escape(&self.raw) {
            Cow::Borrowed(_) => None,
            Cow::Owned(s) => Some(s),
        });
        cached.as_deref().unwrap_or(&self.raw)
    }

    /// Unwraps the semantic content.
    pub fn into_string(self) -> String {
        self.raw
    }
}

impl PartialEq for Text {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl Eq for Text {}

impl Hash for Text {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.raw.hash(state);
    }
}

impl PartialEq<str> for Text {
    fn eq(&self, other: &str) -> bool {
        self.raw == other
    }
}

impl PartialEq<&str> for Text {
    fn eq(&self, other: &&str) -> bool {
        self.raw == *other
    }
}

impl Deref for Text {
    type Target = str;

    fn deref(&self) -> &str {
        &self.raw
    }
}

impl From<&str> for Text {
    fn from(v: &str) -> Self {
        Self::new(v)
    }
}

impl From<String> for Text {
    fn from(v: String) -> Self {
        Self::new(v)
    }
}

/// An ordered sequence of JSON values.
///
/// Indices are contiguous from zero; [`Array::set`] pads intervening slots
/// with explicit nulls. The array also carries a coarse homogeneity tag,
/// see [`Array::element_type`].
#[derive(Debug, Clone)]
pub struct Array {
    values: Vec<Value>,
    element_type: ValueType,
}

impl Array {
    /// Creates an empty array.
    pub fn new() -> Self {
        Self {
            values: Vec::new(),
            element_type: ValueType::Null,
        }
    }

    /// Number of elements, gap slots included.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if the array has no elements.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The homogeneity tag over the direct elements.
    ///
    /// Starts at [`ValueType::Null`], becomes the type of the first
    /// non-null element, and widens to [`ValueType::Object`] the first time
    /// a later non-null element's type differs. The `Object` tag therefore
    /// doubles as the "mixed" marker, a historical naming quirk that is
    /// preserved, not extended. Advisory only: nothing in the parsers reads
    /// it.
    pub fn element_type(&self) -> ValueType {
        self.element_type
    }

    /// The element at `index`, or `None` past the end.
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    /// The element at `index`, mutably.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Value> {
        self.values.get_mut(index)
    }

    /// Appends a value.
    pub fn push(&mut self, value: impl Into<Value>) {
        let value = value.into();
        self.note_element(&value);
        self.values.push(value);
    }

    /// Overwrites the slot at `index`, returning the prior occupant.
    ///
    /// When `index` is past the end, intervening slots are padded with
    /// explicit nulls, the value lands at `index`, and `None` is returned
    /// (the slot had no prior occupant).
    pub fn set(&mut self, index: usize, value: impl Into<Value>) -> Option<Value> {
        let value = value.into();
        self.note_element(&value);
        if index < self.values.len() {
            Some(std::mem::replace(&mut self.values[index], value))
        } else {
            self.values.resize(index, Value::Null);
            self.values.push(value);
            None
        }
    }

    /// Removes and returns the element at `index`, shifting the tail left.
    /// `None` past the end.
    pub fn remove(&mut self, index: usize) -> Option<Value> {
        if index < self.values.len() {
            Some(self.values.remove(index))
        } else {
            None
        }
    }

    /// Iterates the elements in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.values.iter()
    }

    fn note_element(&mut self, value: &Value) {
        if value.is_null() {
            return;
        }
        let t = value.value_type();
        if self.element_type == ValueType::Null {
            self.element_type = t;
        } else if self.element_type != t {
            self.element_type = ValueType::Object;
        }
    }
}

impl Default for Array {
    fn default() -> Self {
        Self::new()
    }
}

/// Equality compares elements only; the homogeneity tag is advisory and
/// does not participate.
impl PartialEq for Array {
    fn eq(&self, other: &Self) -> bool {
        self.values == other.values
    }
}

impl Eq for Array {}

impl Hash for Array {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.values.hash(state);
    }
}

impl Index<usize> for Array {
    type Output = Value;

    fn index(&self, index: usize) -> &Value {
        &self.values[index]
    }
}

impl From<Vec<Value>> for Array {
    fn from(values: Vec<Value>) -> Self {
        let mut arr = Self::new();
        for v in &values {
            arr.note_element(v);
        }
        arr.values = values;
        arr
    }
}

impl<V: Into<Value>> Extend<V> for Array {
    fn extend<I: IntoIterator<Item = V>>(&mut self, iter: I) {
        for v in iter {
            self.push(v);
        }
    }
}

impl<V: Into<Value>> FromIterator<V> for Array {
    fn from_iter<I: IntoIterator<Item = V>>(iter: I) -> Self {
        let mut arr = Self::new();
        arr.extend(iter);
        arr
    }
}

impl IntoIterator for Array {
    type Item = Value;
    type IntoIter = std::vec::IntoIter<Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}

impl<'a> IntoIterator for &'a Array {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

/// A map of string keys to JSON values.
///
/// Keys are unique; inserting over an existing key replaces its value.
/// Iteration and serialization follow ascending key order regardless of
/// insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Object {
    members: BTreeMap<String, Value>,
}

impl Object {
    /// Creates an empty object.
    pub fn new() -> Self {
        Self {
            members: BTreeMap::new(),
        }
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Returns `true` if the object has no members.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Upserts a member, returning the value it replaced.
    ///
    /// Storing an explicit null is legal and distinct from key absence.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.members.insert(key.into(), value.into())
    }

    /// The value under `key`, or `None` when the key is absent.
    ///
    /// A present-but-null member yields `Some(&Value::Null)`; distinguish
    /// absence with [`Object::contains_key`], never by inspecting this
    /// return value alone.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.members.get(key)
    }

    /// The value under `key`, mutably.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.members.get_mut(key)
    }

    /// Returns `true` if `key` has a member, null-valued or not.
    pub fn contains_key(&self, key: &str) -> bool {
        self.members.contains_key(key)
    }

    /// Removes the member under `key`, returning its value.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.members.remove(key)
    }

    /// The member keys in ascending order.
    pub fn keys(&self) -> btree_map::Keys<'_, String, Value> {
        self.members.keys()
    }

    /// Iterates members in ascending key order.
    pub fn iter(&self) -> btree_map::Iter<'_, String, Value> {
        self.members.iter()
    }
}

impl<K: Into<String>, V: Into<Value>> Extend<(K, V)> for Object {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Object {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut obj = Self::new();
        obj.extend(iter);
        obj
    }
}

impl IntoIterator for Object {
    type Item = (String, Value);
    type IntoIter = btree_map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.into_iter()
    }
}

impl<'a> IntoIterator for &'a Object {
    type Item = (&'a String, &'a Value);
    type IntoIter = btree_map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::{Array, Object, Text, Value, ValueType};
    use crate::number::Number;

    #[test]
    fn canonical_constants() {
        assert_eq!(Value::NULL, Value::Null);
        assert_eq!(Value::TRUE, Value::Boolean(true));
        assert_eq!(Value::FALSE, Value::Boolean(false));
        assert_eq!(Value::TRUE.as_boolean(), Some(true));
    }

    #[test]
    fn type_queries_and_downcasts() {
        let v = Value::from(3i64);
        assert_eq!(v.value_type(), ValueType::Number);
        assert!(v.is_number());
        assert_eq!(v.as_number().map(Number::as_str), Some("3"));
        assert!(v.as_str().is_none());
        assert!(v.as_array().is_none());
    }

    #[test]
    fn object_members_render_in_key_order() {
        let mut obj = Object::new();
        obj.insert("zebra", 1i64);
        obj.insert("apple", 2i64);
        obj.insert("mango", Value::NULL);
        assert_eq!(
            Value::Object(obj).to_string(),
            r#"{"apple":2,"mango":null,"zebra":1}"#
        );
    }

    #[test]
    fn object_upsert_keeps_one_member() {
        let mut obj = Object::new();
        assert_eq!(obj.insert("a", 1i64), None);
        assert_eq!(obj.insert("a", 2i64), Some(Value::from(1i64)));
        assert_eq!(obj.len(), 1);
        assert_eq!(obj.get("a"), Some(&Value::from(2i64)));
    }

    #[test]
    fn absent_and_null_members_are_distinct() {
        let mut obj = Object::new();
        obj.insert("present", Value::NULL);
        assert_eq!(obj.get("present"), Some(&Value::Null));
        assert!(obj.contains_key("present"));
        assert_eq!(obj.get("missing"), None);
        assert!(!obj.contains_key("missing"));
    }

    #[test]
    fn sparse_set_pads_with_nulls() {
        let mut arr = Array::new();
        assert_eq!(arr.set(0, "a"), None);
        assert_eq!(arr.set(2, "b"), None);
        assert_eq!(arr.len(), 3);
        assert_eq!(arr.get(1), Some(&Value::Null));
        assert_eq!(Value::Array(arr).to_string(), r#"["a",null,"b"]"#);
    }

    #[test]
    fn set_returns_prior_occupant() {
        let mut arr = Array::new();
        arr.push(1i64);
        assert_eq!(arr.set(0, 2i64), Some(Value::from(1i64)));
        assert_eq!(arr.len(), 1);
    }

    #[test]
    fn homogeneity_tag_transitions() {
        let mut arr = Array::new();
        assert_eq!(arr.element_type(), ValueType::Null);
        arr.push(Value::NULL);
        assert_eq!(arr.element_type(), ValueType::Null);
        arr.push(1i64);
        assert_eq!(arr.element_type(), ValueType::Number);
        arr.push(2i64);
        assert_eq!(arr.element_type(), ValueType::Number);
        arr.push("mixed");
        assert_eq!(arr.element_type(), ValueType::Object);
        // nulls never affect the tag
        arr.push(Value::NULL);
        assert_eq!(arr.element_type(), ValueType::Object);
    }

    #[test]
    fn equality_ignores_homogeneity_tag() {
        let homogeneous: Array = [Value::from(1i64)].into_iter().collect();
        let mut mixed = Array::new();
        mixed.push("tainted");
        mixed.remove(0);
        mixed.push(1i64);
        assert_ne!(homogeneous.element_type(), mixed.element_type());
        assert_eq!(homogeneous, mixed);
    }

    #[test]
    fn text_equality_by_content_with_cached_escape() {
        let t = Text::new("tab\there");
        assert_eq!(t.escaped(), "tab\\there");
        assert_eq!(t.escaped(), "tab\\there");
        assert_eq!(t, Text::new("tab\there"));
        assert_eq!(t.as_str(), "tab\there");
    }

    #[test]
    fn string_rendering_escapes() {
        let v = Value::from("say \"hi\"\n");
        assert_eq!(v.to_string(), r#""say \"hi\"\n""#);
    }

    #[test]
    fn nested_rendering_is_compact() {
        let mut inner = Object::new();
        inner.insert("b", Value::TRUE);
        let mut arr = Array::new();
        arr.push(Value::NULL);
        arr.push(inner);
        arr.push(Number::from(5i64));
        let mut root = Object::new();
        root.insert("a", arr);
        assert_eq!(
            Value::Object(root).to_string(),
            r#"{"a":[null,{"b":true},5]}"#
        );
    }

    #[test]
    fn option_conversions_make_nulls() {
        assert_eq!(Value::from(None::<i64>), Value::Null);
        assert_eq!(Value::from(Some("x")), Value::from("x"));
    }

    #[test]
    fn escaped_keys_render_escaped() {
        let mut obj = Object::new();
        obj.insert("a\"b", 1i64);
        assert_eq!(Value::Object(obj).to_string(), r#"{"a\"b":1}"#);
    }
}
