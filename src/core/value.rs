//! Input data model shared by the XML serializer and the constant lookup.
//!
//! A [`Value`] is either an ordered [`Map`] or a [`Scalar`]. Maps keep their
//! insertion order, which is also the order attributes and children are
//! emitted in. Keys are either integer indexes or names; integer-looking
//! names such as `"3"` are stored as [`Key::Index`] so that `"3"` and `3`
//! address the same entry.
//!
//! ```
//! use support_rs::map;
//! use support_rs::core::value::{Key, Scalar, Value};
//!
//! let people = map! {
//!     "child" => vec![
//!         map! { "name" => "chopin", "age" => 11 },
//!         map! { "name" => "ngo", "age" => 10 },
//!     ],
//! };
//!
//! let children = people.get("child").and_then(Value::as_map).unwrap();
//! assert!(children.is_indexed_list());
//! assert_eq!(children.get(1).and_then(Value::as_map).unwrap().get("age"),
//!            Some(&Value::Scalar(Scalar::Int(10))));
//! assert_eq!(Key::from("0"), Key::Index(0));
//! ```

use std::fmt;

/// Builds a [`Map`] from `key => value` pairs, in order.
#[macro_export]
macro_rules! map {
    () => {
        $crate::core::value::Map::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut map = $crate::core::value::Map::new();
        $(map.insert($key, $value);)+
        map
    }};
}

/// A key inside a [`Map`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    Index(i64),
    Name(String),
}

impl Key {
    /// True when the key reads as a non-negative number, i.e. the entry is a
    /// list element.
    pub fn is_list_index(&self) -> bool {
        match self {
            Key::Index(index) => *index >= 0,
            Key::Name(name) => parse_numeric(name).is_some_and(|n| n >= 0.0),
        }
    }

    pub fn as_name(&self) -> Option<&str> {
        match self {
            Key::Name(name) => Some(name),
            Key::Index(_) => None,
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Index(index) => write!(f, "{}", index),
            Key::Name(name) => f.write_str(name),
        }
    }
}

impl From<&str> for Key {
    fn from(name: &str) -> Self {
        match canonical_index(name) {
            Some(index) => Key::Index(index),
            None => Key::Name(name.to_string()),
        }
    }
}

impl From<String> for Key {
    fn from(name: String) -> Self {
        match canonical_index(&name) {
            Some(index) => Key::Index(index),
            None => Key::Name(name),
        }
    }
}

impl From<&String> for Key {
    fn from(name: &String) -> Self {
        Key::from(name.as_str())
    }
}

impl From<i64> for Key {
    fn from(index: i64) -> Self {
        Key::Index(index)
    }
}

impl From<i32> for Key {
    fn from(index: i32) -> Self {
        Key::Index(index.into())
    }
}

impl From<usize> for Key {
    fn from(index: usize) -> Self {
        Key::Index(i64::try_from(index).unwrap_or(i64::MAX))
    }
}

/// `"42"` and `"-7"` are indexes; `"042"`, `"+1"`, `"-0"` and `" 1"` stay names.
fn canonical_index(name: &str) -> Option<i64> {
    let digits = name.strip_prefix('-').unwrap_or(name);
    let canonical = match digits.as_bytes() {
        [] => false,
        [b'0'] => digits.len() == name.len(),
        [first, rest @ ..] => {
            (b'1'..=b'9').contains(first) && rest.iter().all(u8::is_ascii_digit)
        }
    };
    if canonical { name.parse().ok() } else { None }
}

/// Parses a numeric string the way loose comparisons see it: surrounding
/// whitespace allowed, optional sign, decimal digits, optional fraction and
/// exponent. Hex, `inf` and `nan` are not numeric.
pub(crate) fn parse_numeric(raw: &str) -> Option<f64> {
    let trimmed =
        raw.trim_matches(|c| matches!(c, ' ' | '\t' | '\n' | '\r' | '\u{0B}' | '\u{0C}'));
    let well_formed = trimmed.bytes().any(|b| b.is_ascii_digit())
        && trimmed
            .bytes()
            .all(|b| b.is_ascii_digit() || matches!(b, b'+' | b'-' | b'.' | b'e' | b'E'));
    if well_formed { trimmed.parse().ok() } else { None }
}

/// A leaf value.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

impl Scalar {
    pub fn is_null(&self) -> bool {
        matches!(self, Scalar::Null)
    }

    /// Text form used for attribute values and element text.
    ///
    /// `true` renders as `"1"` and `false` as the empty string; floats keep
    /// 14 significant digits and drop trailing zeros.
    pub fn to_xml_string(&self) -> String {
        match self {
            Scalar::Null => String::new(),
            Scalar::Bool(true) => "1".to_string(),
            Scalar::Bool(false) => String::new(),
            Scalar::Int(value) => value.to_string(),
            Scalar::Float(value) => format_float(*value),
            Scalar::Str(value) => value.clone(),
        }
    }

    /// Same kind and same value.
    pub fn strict_eq(&self, other: &Scalar) -> bool {
        match (self, other) {
            (Scalar::Null, Scalar::Null) => true,
            (Scalar::Bool(a), Scalar::Bool(b)) => a == b,
            (Scalar::Int(a), Scalar::Int(b)) => a == b,
            (Scalar::Float(a), Scalar::Float(b)) => a == b,
            (Scalar::Str(a), Scalar::Str(b)) => a == b,
            _ => false,
        }
    }

    /// Type-juggling equality: booleans and null compare by truthiness,
    /// numbers and numeric strings compare numerically, anything else
    /// compares as text.
    pub fn loose_eq(&self, other: &Scalar) -> bool {
        use Scalar::*;

        match (self, other) {
            (Null, Null) => true,
            (Bool(a), b) | (b, Bool(a)) => *a == b.truthy(),
            (Null, Str(s)) | (Str(s), Null) => s.is_empty(),
            (Null, n) | (n, Null) => !n.truthy(),
            (Int(a), Int(b)) => a == b,
            (Int(_) | Float(_), Int(_) | Float(_)) => self.as_f64() == other.as_f64(),
            (n @ (Int(_) | Float(_)), Str(s)) | (Str(s), n @ (Int(_) | Float(_))) => {
                match parse_numeric(s) {
                    Some(parsed) => n.as_f64() == Some(parsed),
                    None => n.to_xml_string() == *s,
                }
            }
            (Str(a), Str(b)) => match (parse_numeric(a), parse_numeric(b)) {
                (Some(x), Some(y)) => x == y,
                _ => a == b,
            },
        }
    }

    fn truthy(&self) -> bool {
        match self {
            Scalar::Null => false,
            Scalar::Bool(value) => *value,
            Scalar::Int(value) => *value != 0,
            Scalar::Float(value) => *value != 0.0,
            Scalar::Str(value) => !(value.is_empty() || value == "0"),
        }
    }

    fn as_f64(&self) -> Option<f64> {
        match self {
            Scalar::Int(value) => Some(*value as f64),
            Scalar::Float(value) => Some(*value),
            _ => None,
        }
    }
}

/// Significant digits kept when a float is turned into text.
const FLOAT_PRECISION: i32 = 14;

/// `%.14G`-style: 14 significant digits, trailing zeros dropped, exponent
/// form below `1e-4` and from `1e14` up with at least one fractional digit
/// in the mantissa (`1.0E+20`).
fn format_float(value: f64) -> String {
    if value.is_nan() {
        return "NAN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "INF" } else { "-INF" }.to_string();
    }

    let scientific = format!("{:.*e}", (FLOAT_PRECISION - 1) as usize, value);
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return scientific;
    };
    let exponent: i32 = exponent.parse().unwrap_or(0);

    if exponent < -4 || exponent >= FLOAT_PRECISION {
        let mantissa = trim_fraction(mantissa);
        let mantissa = if mantissa.contains('.') {
            mantissa.to_string()
        } else {
            format!("{}.0", mantissa)
        };
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{}E{}{}", mantissa, sign, exponent.abs())
    } else {
        let decimals = (FLOAT_PRECISION - 1 - exponent).max(0) as usize;
        trim_fraction(&format!("{:.*}", decimals, value)).to_string()
    }
}

fn trim_fraction(number: &str) -> &str {
    if number.contains('.') {
        number.trim_end_matches('0').trim_end_matches('.')
    } else {
        number
    }
}

macro_rules! scalar_from {
    ($variant:ident as $target:ty: $($source:ty),+) => {
        $(
            impl From<$source> for Scalar {
                fn from(value: $source) -> Self {
                    Scalar::$variant(<$target>::from(value))
                }
            }
        )+
    };
}

scalar_from!(Int as i64: i8, i16, i32, i64, u8, u16, u32);
scalar_from!(Float as f64: f32, f64);
scalar_from!(Bool as bool: bool);
scalar_from!(Str as String: &str, String);

impl<T: Into<Scalar>> From<Option<T>> for Scalar {
    fn from(value: Option<T>) -> Self {
        value.map_or(Scalar::Null, Into::into)
    }
}

/// Ordered mapping with unique keys.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Map {
    entries: Vec<(Key, Value)>,
}

impl Map {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an entry. An existing key keeps its position and gets the new
    /// value; the previous value is returned.
    pub fn insert(&mut self, key: impl Into<Key>, value: impl Into<Value>) -> Option<Value> {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == key) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    pub fn get(&self, key: impl Into<Key>) -> Option<&Value> {
        let key = key.into();
        self.entries
            .iter()
            .find(|(existing, _)| *existing == key)
            .map(|(_, value)| value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Key, &Value)> {
        self.entries.iter().map(|(key, value)| (key, value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True when the entry at index `0` exists and is not null.
    ///
    /// This is the only check used to tell a list of maps from a plain map:
    /// a sparse list without index `0` counts as a plain map.
    pub fn is_indexed_list(&self) -> bool {
        self.get(0).is_some_and(|value| !value.is_null())
    }
}

impl<K: Into<Key>, V: Into<Value>> FromIterator<(K, V)> for Map {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Map::new();
        for (key, value) in iter {
            map.insert(key, value);
        }
        map
    }
}

/// A node of the input tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Map(Map),
    Scalar(Scalar),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Scalar(Scalar::Null))
    }

    pub fn as_map(&self) -> Option<&Map> {
        match self {
            Value::Map(map) => Some(map),
            Value::Scalar(_) => None,
        }
    }

    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            Value::Scalar(scalar) => Some(scalar),
            Value::Map(_) => None,
        }
    }
}

impl From<Map> for Value {
    fn from(map: Map) -> Self {
        Value::Map(map)
    }
}

impl From<Scalar> for Value {
    fn from(scalar: Scalar) -> Self {
        Value::Scalar(scalar)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::Map(items.into_iter().enumerate().collect())
    }
}

impl<T: Into<Scalar>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        Value::Scalar(value.into())
    }
}

macro_rules! value_from_scalar {
    ($($source:ty),+) => {
        $(
            impl From<$source> for Value {
                fn from(value: $source) -> Self {
                    Value::Scalar(Scalar::from(value))
                }
            }
        )+
    };
}

value_from_scalar!(i8, i16, i32, i64, u8, u16, u32, f32, f64, bool, &str, String);

#[cfg(feature = "json")]
mod json {
    use serde::Serialize;

    use super::{Map, Scalar, Value};
    use crate::error::Result;

    impl From<serde_json::Value> for Value {
        fn from(value: serde_json::Value) -> Self {
            match value {
                serde_json::Value::Null => Value::Scalar(Scalar::Null),
                serde_json::Value::Bool(b) => Value::Scalar(Scalar::Bool(b)),
                serde_json::Value::Number(n) => Value::Scalar(match n.as_i64() {
                    Some(i) => Scalar::Int(i),
                    None => Scalar::Float(n.as_f64().unwrap_or(f64::NAN)),
                }),
                serde_json::Value::String(s) => Value::Scalar(Scalar::Str(s)),
                serde_json::Value::Array(items) => Value::from(items),
                serde_json::Value::Object(object) => Value::Map(object.into_iter().collect()),
            }
        }
    }

    impl Value {
        /// Converts any serializable value (structs included) into the tree
        /// model. Struct fields become named entries in declaration order.
        pub fn from_serialize<T: Serialize + ?Sized>(value: &T) -> Result<Value> {
            Ok(Value::from(serde_json::to_value(value)?))
        }
    }

    impl Map {
        /// Like [`Value::from_serialize`] for values that serialize to a map
        /// or a sequence. Anything that serializes to a scalar yields an
        /// empty map.
        pub fn from_serialize<T: Serialize + ?Sized>(value: &T) -> Result<Map> {
            match Value::from_serialize(value)? {
                Value::Map(map) => Ok(map),
                Value::Scalar(_) => Ok(Map::new()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_like_names_become_indexes() {
        assert_eq!(Key::from("0"), Key::Index(0));
        assert_eq!(Key::from("42"), Key::Index(42));
        assert_eq!(Key::from("-7"), Key::Index(-7));
        assert_eq!(Key::from("042"), Key::Name("042".to_string()));
        assert_eq!(Key::from("-0"), Key::Name("-0".to_string()));
        assert_eq!(Key::from("+1"), Key::Name("+1".to_string()));
        assert_eq!(Key::from(""), Key::Name(String::new()));
        assert_eq!(Key::from("name"), Key::Name("name".to_string()));
    }

    #[test]
    fn list_index_detection() {
        assert!(Key::Index(0).is_list_index());
        assert!(!Key::Index(-1).is_list_index());
        assert!(Key::from("1.5").is_list_index());
        assert!(Key::from(" 3").is_list_index());
        assert!(!Key::from("-1.5").is_list_index());
        assert!(!Key::from("child").is_list_index());
    }

    #[test]
    fn insert_replaces_in_place() {
        let mut map = map! { "a" => 1, "b" => 2 };
        let previous = map.insert("a", 3);

        assert_eq!(previous, Some(Value::from(1)));
        let keys: Vec<String> = map.iter().map(|(k, _)| k.to_string()).collect();
        assert_eq!(keys, vec!["a", "b"]);
        assert_eq!(map.get("a"), Some(&Value::from(3)));
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn string_and_integer_zero_address_same_entry() {
        let mut map = Map::new();
        map.insert(0, "first");
        map.insert("0", "second");

        assert_eq!(map.len(), 1);
        assert_eq!(map.get(0), Some(&Value::from("second")));
    }

    #[test]
    fn indexed_list_needs_non_null_zero() {
        let list: Value = vec![1, 2].into();
        assert!(list.as_map().unwrap().is_indexed_list());

        let sparse = map! { 1 => "a", 2 => "b" };
        assert!(!sparse.is_indexed_list());

        let null_head = map! { 0 => Option::<i32>::None, 1 => "b" };
        assert!(!null_head.is_indexed_list());
    }

    #[test]
    fn xml_string_forms() {
        assert_eq!(Scalar::Bool(true).to_xml_string(), "1");
        assert_eq!(Scalar::Bool(false).to_xml_string(), "");
        assert_eq!(Scalar::Float(3.0).to_xml_string(), "3");
        assert_eq!(Scalar::Float(-0.25).to_xml_string(), "-0.25");
        assert_eq!(Scalar::Float(f64::INFINITY).to_xml_string(), "INF");
        assert_eq!(Scalar::Float(37.7749).to_xml_string(), "37.7749");
        assert_eq!(Scalar::Float(99_999_999_999_999.0).to_xml_string(), "99999999999999");
        assert_eq!(Scalar::Int(-12).to_xml_string(), "-12");
        assert_eq!(Scalar::Null.to_xml_string(), "");
    }

    #[test]
    fn floats_keep_fourteen_significant_digits() {
        assert_eq!(Scalar::Float(0.1 + 0.2).to_xml_string(), "0.3");
        assert_eq!(Scalar::Float(1.0 / 3.0).to_xml_string(), "0.33333333333333");
        assert_eq!(Scalar::Float(1e20).to_xml_string(), "1.0E+20");
        assert_eq!(Scalar::Float(1e14).to_xml_string(), "1.0E+14");
        assert_eq!(Scalar::Float(1.5e15).to_xml_string(), "1.5E+15");
        assert_eq!(Scalar::Float(-2.5e-7).to_xml_string(), "-2.5E-7");
        assert_eq!(Scalar::Float(0.0001).to_xml_string(), "0.0001");
        assert_eq!(Scalar::Float(0.0).to_xml_string(), "0");
    }

    #[test]
    fn strict_equality_requires_same_kind() {
        assert!(Scalar::Int(1).strict_eq(&Scalar::Int(1)));
        assert!(!Scalar::Int(1).strict_eq(&Scalar::Float(1.0)));
        assert!(!Scalar::Int(1).strict_eq(&Scalar::from("1")));
        assert!(!Scalar::Null.strict_eq(&Scalar::Bool(false)));
    }

    #[test]
    fn loose_equality_juggles_types() {
        assert!(Scalar::Int(1).loose_eq(&Scalar::from("1")));
        assert!(Scalar::Int(1).loose_eq(&Scalar::Float(1.0)));
        assert!(Scalar::from("1e1").loose_eq(&Scalar::from("10")));
        assert!(Scalar::from(" 2").loose_eq(&Scalar::Int(2)));
        assert!(Scalar::Bool(true).loose_eq(&Scalar::from("abc")));
        assert!(Scalar::Null.loose_eq(&Scalar::Int(0)));
        assert!(Scalar::Null.loose_eq(&Scalar::from("")));
        assert!(!Scalar::Null.loose_eq(&Scalar::from("0")));
        assert!(!Scalar::Int(0).loose_eq(&Scalar::from("abc")));
        assert!(!Scalar::from("abc").loose_eq(&Scalar::from("ABC")));
    }

    #[test]
    fn option_maps_to_null() {
        assert_eq!(Value::from(Option::<&str>::None), Value::Scalar(Scalar::Null));
        assert_eq!(Value::from(Some(5)), Value::Scalar(Scalar::Int(5)));
    }
}
