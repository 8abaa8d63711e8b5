//! Property value types.
//!
//! Every property slot has a [`ValueType`]: one of four scalar types, or a
//! list of one of them. Type names use the graph-tool vocabulary
//! (`string`, `int`, `double`, `bool`, `vector<string>`, ...) so schemas
//! written for that library parse unchanged.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// Scalar element type of a property slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarType {
    /// UTF-8 string
    String,
    /// 64-bit signed integer
    Int,
    /// 64-bit float
    Double,
    /// Boolean
    Bool,
}

impl ScalarType {
    fn name(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Int => "int",
            Self::Double => "double",
            Self::Bool => "bool",
        }
    }

    fn parse(name: &str) -> Option<Self> {
        match name {
            "string" | "str" => Some(Self::String),
            "int" | "int64_t" | "int32_t" | "int16_t" | "long" | "short" => Some(Self::Int),
            "double" | "float" | "long double" => Some(Self::Double),
            "bool" => Some(Self::Bool),
            _ => None,
        }
    }

    fn default_value(self) -> PropertyValue {
        match self {
            Self::String => PropertyValue::String(String::new()),
            Self::Int => PropertyValue::Int(0),
            Self::Double => PropertyValue::Double(0.0),
            Self::Bool => PropertyValue::Bool(false),
        }
    }

    fn coerce(self, value: PropertyValue) -> Result<PropertyValue> {
        match (self, value) {
            // JSON has no encoding for these
            (Self::Double, PropertyValue::Double(d)) if !d.is_finite() => Err(Error::Type(
                format!("non-finite value {d} does not fit a double slot"),
            )),
            (Self::String, v @ PropertyValue::String(_))
            | (Self::Int, v @ PropertyValue::Int(_))
            | (Self::Double, v @ PropertyValue::Double(_))
            | (Self::Bool, v @ PropertyValue::Bool(_)) => Ok(v),
            #[allow(clippy::cast_precision_loss)]
            (Self::Double, PropertyValue::Int(i)) => Ok(PropertyValue::Double(i as f64)),
            (ty, other) => Err(Error::Type(format!(
                "value {other} does not fit a {} slot",
                ty.name()
            ))),
        }
    }
}

/// Declared type of a property slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ValueType {
    /// A single value per object.
    Scalar(ScalarType),
    /// A list of values per object; the only kind that supports accumulation.
    List(ScalarType),
}

impl ValueType {
    /// Plain string slot, the type used for lazily declared properties.
    pub const STRING: Self = Self::Scalar(ScalarType::String);

    /// List-of-strings slot, used for lazily declared accumulating properties.
    pub const STRING_LIST: Self = Self::List(ScalarType::String);

    /// Returns `true` for list slots.
    #[must_use]
    pub fn is_list(self) -> bool {
        matches!(self, Self::List(_))
    }

    /// The value an unset slot reads as.
    #[must_use]
    pub fn default_value(self) -> PropertyValue {
        match self {
            Self::Scalar(scalar) => scalar.default_value(),
            Self::List(_) => PropertyValue::List(Vec::new()),
        }
    }

    /// Checks that `value` fits this type, widening integers into doubles.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Type`] when the value (or any list element) has a
    /// different type.
    pub fn coerce(self, value: PropertyValue) -> Result<PropertyValue> {
        match (self, value) {
            (Self::Scalar(scalar), value) => scalar.coerce(value),
            (Self::List(scalar), PropertyValue::List(items)) => items
                .into_iter()
                .map(|item| scalar.coerce(item))
                .collect::<Result<Vec<_>>>()
                .map(PropertyValue::List),
            (Self::List(_), other) => Err(Error::Type(format!(
                "value {other} does not fit a {self} slot"
            ))),
        }
    }

    /// Checks a single element destined for a list slot.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Type`] if this is a scalar slot or the element has the
    /// wrong type.
    pub fn coerce_element(self, value: PropertyValue) -> Result<PropertyValue> {
        match self {
            Self::List(scalar) => scalar.coerce(value),
            Self::Scalar(_) => Err(Error::Type(format!(
                "cannot accumulate into scalar {self} slot"
            ))),
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(scalar) => f.write_str(scalar.name()),
            Self::List(scalar) => write!(f, "vector<{}>", scalar.name()),
        }
    }
}

impl FromStr for ValueType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let name = s.trim();
        let parsed = match name
            .strip_prefix("vector<")
            .and_then(|rest| rest.strip_suffix('>'))
        {
            Some(inner) => ScalarType::parse(inner.trim()).map(Self::List),
            None => ScalarType::parse(name).map(Self::Scalar),
        };
        parsed.ok_or_else(|| Error::Schema(format!("unknown property type '{name}'")))
    }
}

impl TryFrom<String> for ValueType {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<ValueType> for String {
    fn from(value: ValueType) -> Self {
        value.to_string()
    }
}

/// A property value.
///
/// Equality and hashing compare doubles by bit pattern so values can serve
/// as identity keys: `0.0` differs from `-0.0`. Slots never hold `NaN` or
/// infinities; [`ValueType::coerce`] rejects them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    /// Boolean value
    Bool(bool),
    /// Integer value
    Int(i64),
    /// Floating point value
    Double(f64),
    /// String value
    String(String),
    /// List value
    List(Vec<PropertyValue>),
}

impl PropertyValue {
    /// Whether the value counts as "set" when used as an optional identity.
    ///
    /// Empty strings, zero, `false` and empty lists are falsy.
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Bool(b) => *b,
            Self::Int(i) => *i != 0,
            Self::Double(d) => *d != 0.0,
            Self::String(s) => !s.is_empty(),
            Self::List(items) => !items.is_empty(),
        }
    }

    /// Returns the string slice if this is a string value.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the list items if this is a list value.
    #[must_use]
    pub fn as_list(&self) -> Option<&[PropertyValue]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }
}

impl PartialEq for PropertyValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Double(a), Self::Double(b)) => a.to_bits() == b.to_bits(),
            (Self::String(a), Self::String(b)) => a == b,
            (Self::List(a), Self::List(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for PropertyValue {}

impl Hash for PropertyValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Self::Bool(b) => b.hash(state),
            Self::Int(i) => i.hash(state),
            Self::Double(d) => d.to_bits().hash(state),
            Self::String(s) => s.hash(state),
            Self::List(items) => items.hash(state),
        }
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Double(d) => write!(f, "{d}"),
            Self::String(s) => f.write_str(s),
            Self::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
        }
    }
}

impl From<&str> for PropertyValue {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<&String> for PropertyValue {
    fn from(s: &String) -> Self {
        Self::String(s.clone())
    }
}

impl From<i64> for PropertyValue {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<i32> for PropertyValue {
    fn from(i: i32) -> Self {
        Self::Int(i64::from(i))
    }
}

impl From<f64> for PropertyValue {
    fn from(d: f64) -> Self {
        Self::Double(d)
    }
}

impl From<bool> for PropertyValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl<T: Into<PropertyValue>> From<Vec<T>> for PropertyValue {
    fn from(items: Vec<T>) -> Self {
        Self::List(items.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("string", ValueType::Scalar(ScalarType::String))]
    #[case("int64_t", ValueType::Scalar(ScalarType::Int))]
    #[case("float", ValueType::Scalar(ScalarType::Double))]
    #[case("bool", ValueType::Scalar(ScalarType::Bool))]
    #[case("vector<string>", ValueType::List(ScalarType::String))]
    #[case(" vector< double > ", ValueType::List(ScalarType::Double))]
    fn test_parse_type_names(#[case] name: &str, #[case] expected: ValueType) {
        assert_eq!(name.parse::<ValueType>().unwrap(), expected);
    }

    #[rstest]
    #[case("object")]
    #[case("vector<object>")]
    #[case("")]
    fn test_parse_unknown_type_is_schema_error(#[case] name: &str) {
        let err = name.parse::<ValueType>().unwrap_err();
        assert!(matches!(err, Error::Schema(_)));
    }

    #[test]
    fn test_display_uses_canonical_names() {
        assert_eq!(ValueType::STRING_LIST.to_string(), "vector<string>");
        assert_eq!("long".parse::<ValueType>().unwrap().to_string(), "int");
    }

    #[test]
    fn test_coerce_widens_int_to_double() {
        let ty = ValueType::Scalar(ScalarType::Double);
        assert_eq!(ty.coerce(PropertyValue::Int(3)).unwrap(), PropertyValue::Double(3.0));
    }

    #[test]
    fn test_coerce_rejects_mismatch() {
        let err = ValueType::STRING.coerce(PropertyValue::Int(1)).unwrap_err();
        assert!(matches!(err, Error::Type(_)));

        let err = ValueType::STRING_LIST
            .coerce(PropertyValue::from(vec![PropertyValue::Bool(true)]))
            .unwrap_err();
        assert!(matches!(err, Error::Type(_)));
    }

    #[rstest]
    #[case(f64::NAN)]
    #[case(f64::INFINITY)]
    #[case(f64::NEG_INFINITY)]
    fn test_coerce_rejects_non_finite_double(#[case] d: f64) {
        let scalar = ValueType::Scalar(ScalarType::Double);
        assert!(matches!(
            scalar.coerce(PropertyValue::Double(d)),
            Err(Error::Type(_))
        ));
        let list = ValueType::List(ScalarType::Double);
        assert!(matches!(
            list.coerce_element(PropertyValue::Double(d)),
            Err(Error::Type(_))
        ));
    }

    #[test]
    fn test_coerce_element_requires_list_slot() {
        assert!(ValueType::STRING.coerce_element("x".into()).is_err());
        assert_eq!(
            ValueType::STRING_LIST.coerce_element("x".into()).unwrap(),
            PropertyValue::from("x")
        );
    }

    #[rstest]
    #[case(PropertyValue::from(""), false)]
    #[case(PropertyValue::from("a"), true)]
    #[case(PropertyValue::Int(0), false)]
    #[case(PropertyValue::Double(0.5), true)]
    #[case(PropertyValue::Bool(false), false)]
    #[case(PropertyValue::List(vec![]), false)]
    fn test_truthiness(#[case] value: PropertyValue, #[case] truthy: bool) {
        assert_eq!(value.is_truthy(), truthy);
    }

    #[test]
    fn test_doubles_compare_by_bits() {
        assert_eq!(PropertyValue::Double(f64::NAN), PropertyValue::Double(f64::NAN));
        assert_ne!(PropertyValue::Double(0.0), PropertyValue::Double(-0.0));
        assert_ne!(PropertyValue::Int(1), PropertyValue::Double(1.0));
    }

    #[test]
    fn test_untagged_json() {
        let value: PropertyValue = serde_json::from_str(r#"["a", "b"]"#).unwrap();
        assert_eq!(value, PropertyValue::from(vec!["a", "b"]));
        assert_eq!(serde_json::to_string(&PropertyValue::Int(7)).unwrap(), "7");

        let ty: ValueType = serde_json::from_str(r#""vector<int>""#).unwrap();
        assert_eq!(ty, ValueType::List(ScalarType::Int));
    }
}
