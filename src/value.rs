//! Native value space for config entries
//!
//! Config files hold more than JSON can say natively: tuples, sets, and byte
//! strings all round-trip through the store. `Value` is the in-memory shape
//! of everything a [`crate::ConfigStore`] entry can hold, arbitrarily nested.

use std::collections::BTreeMap;

/// A single config value.
///
/// `List` and `Tuple` carry the same payload but are distinct kinds and
/// survive a save/load cycle as what they were. `Set` elements are unique;
/// build one with [`Value::set`] rather than the variant directly so
/// duplicates get dropped.
#[derive(Debug, Clone)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Bytes(Vec<u8>),
    List(Vec<Value>),
    Tuple(Vec<Value>),
    Set(Vec<Value>),
    Map(BTreeMap<String, Value>),
}

impl Value {
    /// Build a set value, dropping duplicate elements.
    pub fn set<I: IntoIterator<Item = Value>>(items: I) -> Value {
        let mut unique: Vec<Value> = Vec::new();
        for item in items {
            if !unique.contains(&item) {
                unique.push(item);
            }
        }
        Value::Set(unique)
    }

    /// Short name of this value's kind, for log lines and error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "string",
            Value::Bytes(_) => "bytes",
            Value::List(_) => "list",
            Value::Tuple(_) => "tuple",
            Value::Set(_) => "set",
            Value::Map(_) => "map",
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Float reader; whole-number ints coerce so callers reading a spinbox
    /// value don't care which way the literal was written.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Bytes(data) => Some(data),
            _ => None,
        }
    }

    /// Elements of a list, tuple, or set.
    pub fn as_items(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) | Value::Tuple(items) | Value::Set(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&BTreeMap<String, Value>> {
        match self {
            Value::Map(entries) => Some(entries),
            _ => None,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Bytes(a), Value::Bytes(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Tuple(a), Value::Tuple(b)) => a == b,
            // Sets compare by content irrespective of internal order
            (Value::Set(a), Value::Set(b)) => multiset_eq(a, b),
            (Value::Map(a), Value::Map(b)) => a == b,
            _ => false,
        }
    }
}

fn multiset_eq(a: &[Value], b: &[Value]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut used = vec![false; b.len()];
    'outer: for item in a {
        for (idx, candidate) in b.iter().enumerate() {
            if !used[idx] && item == candidate {
                used[idx] = true;
                continue 'outer;
            }
        }
        return false;
    }
    true
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<u32> for Value {
    fn from(i: u32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<&[u8]> for Value {
    fn from(data: &[u8]) -> Self {
        Value::Bytes(data.to_vec())
    }
}

impl From<Vec<u8>> for Value {
    fn from(data: Vec<u8>) -> Self {
        Value::Bytes(data)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}

impl From<BTreeMap<String, Value>> for Value {
    fn from(entries: BTreeMap<String, Value>) -> Self {
        Value::Map(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_constructor_drops_duplicates() {
        let set = Value::set([Value::Int(1), Value::Int(2), Value::Int(1)]);
        assert_eq!(set.as_items().unwrap().len(), 2);
    }

    #[test]
    fn test_set_equality_ignores_order() {
        let a = Value::Set(vec![Value::Int(1), Value::Int(2), Value::Int(3)]);
        let b = Value::Set(vec![Value::Int(3), Value::Int(1), Value::Int(2)]);
        assert_eq!(a, b);
    }

    #[test]
    fn test_set_equality_respects_content() {
        let a = Value::Set(vec![Value::Int(1), Value::Int(2)]);
        let b = Value::Set(vec![Value::Int(1), Value::Int(4)]);
        assert_ne!(a, b);

        let shorter = Value::Set(vec![Value::Int(1)]);
        assert_ne!(a, shorter);
    }

    #[test]
    fn test_list_and_tuple_are_distinct_kinds() {
        let list = Value::List(vec![Value::Int(1)]);
        let tuple = Value::Tuple(vec![Value::Int(1)]);
        assert_ne!(list, tuple);
    }

    #[test]
    fn test_nested_set_equality() {
        let a = Value::List(vec![Value::Set(vec![Value::Int(1), Value::Int(2)])]);
        let b = Value::List(vec![Value::Set(vec![Value::Int(2), Value::Int(1)])]);
        assert_eq!(a, b);
    }

    #[test]
    fn test_accessors() {
        assert_eq!(Value::from(true).as_bool(), Some(true));
        assert_eq!(Value::from(12).as_int(), Some(12));
        assert_eq!(Value::from(1.5).as_float(), Some(1.5));
        assert_eq!(Value::from(3).as_float(), Some(3.0));
        assert_eq!(Value::from("hi").as_str(), Some("hi"));
        assert_eq!(Value::from(b"ab".as_slice()).as_bytes(), Some(b"ab".as_slice()));
        assert_eq!(Value::from("hi").as_int(), None);
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(Value::Null.kind(), "null");
        assert_eq!(Value::set([]).kind(), "set");
        assert_eq!(Value::Map(BTreeMap::new()).kind(), "map");
    }
}
