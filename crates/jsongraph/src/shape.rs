//! Nested-array shape inspection.
//!
//! A read-only walk over the public value surface; nothing here reaches
//! into parser or container internals.

use crate::value::{Value, ValueType};

/// The nesting profile of an array value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArrayShape {
    /// The size recorded at each nesting level, outermost first.
    pub dimensions: Vec<usize>,
    /// The type of the element that stopped the walk. Starts at the Object
    /// tag (the same "unknown/mixed" sentinel the homogeneity tag uses), so
    /// an empty array reports it unchanged.
    pub element_type: ValueType,
}

impl ArrayShape {
    /// Number of nesting levels recorded.
    pub fn depth(&self) -> usize {
        self.dimensions.len()
    }
}

/// Describes the nesting shape of `value` when it is an array.
///
/// Descends through index 0 while the element there is a non-empty array,
/// recording each level's size, and stops at the first non-array, null, or
/// empty array. Returns `None` for non-array input.
///
/// # Examples
///
/// ```
/// use jsongraph::{ValueType, array_shape, parse};
///
/// let v = parse("[[1,2],[3,4],[5,6]]").unwrap().unwrap();
/// let shape = array_shape(&v).unwrap();
/// assert_eq!(shape.dimensions, [3, 2]);
/// assert_eq!(shape.element_type, ValueType::Number);
/// ```
pub fn array_shape(value: &Value) -> Option<ArrayShape> {
    let mut current = value.as_array()?;
    let mut dimensions = Vec::new();
    let mut element_type = ValueType::Object;
    loop {
        dimensions.push(current.len());
        let Some(first) = current.get(0) else { break };
        element_type = first.value_type();
        match first.as_array() {
            Some(inner) => current = inner,
            None => break,
        }
    }
    Some(ArrayShape {
        dimensions,
        element_type,
    })
}

#[cfg(test)]
mod tests {
    use super::array_shape;
    use crate::parse::parse;
    use crate::value::{Value, ValueType};

    fn shape_of(json: &str) -> super::ArrayShape {
        let value = parse(json).unwrap().unwrap();
        array_shape(&value).unwrap()
    }

    #[test]
    fn non_array_has_no_shape() {
        assert!(array_shape(&Value::NULL).is_none());
        assert!(array_shape(&Value::from(1i64)).is_none());
        assert!(array_shape(&parse("{}").unwrap().unwrap()).is_none());
    }

    #[test]
    fn flat_array() {
        let shape = shape_of("[1,2,3]");
        assert_eq!(shape.dimensions, [3]);
        assert_eq!(shape.depth(), 1);
        assert_eq!(shape.element_type, ValueType::Number);
    }

    #[test]
    fn rectangular_nesting() {
        let shape = shape_of("[[\"a\",\"b\"],[\"c\",\"d\"]]");
        assert_eq!(shape.dimensions, [2, 2]);
        assert_eq!(shape.element_type, ValueType::String);
    }

    #[test]
    fn walk_follows_index_zero_only() {
        // ragged tails are not inspected
        let shape = shape_of("[[1,2,3],[4]]");
        assert_eq!(shape.dimensions, [2, 3]);
        assert_eq!(shape.element_type, ValueType::Number);
    }

    #[test]
    fn empty_array_keeps_the_sentinel_type() {
        let shape = shape_of("[]");
        assert_eq!(shape.dimensions, [0]);
        assert_eq!(shape.element_type, ValueType::Object);
    }

    #[test]
    fn empty_inner_array_is_recorded_then_stops() {
        let shape = shape_of("[[],[1]]");
        assert_eq!(shape.dimensions, [2, 0]);
        assert_eq!(shape.element_type, ValueType::Array);
    }

    #[test]
    fn null_leaf_stops_the_walk() {
        let shape = shape_of("[null,[1]]");
        assert_eq!(shape.dimensions, [2]);
        assert_eq!(shape.element_type, ValueType::Null);
    }
}
