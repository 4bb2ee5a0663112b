//! Type descriptors for attribute values.
//!
//! Provider schemas carry attribute types as JSON values: a bare string for
//! primitives (`"string"`) and a tagged array for compound types
//! (`["list", "string"]`, `["object", {"a": "number"}]`). [`Type`] is the
//! parsed form of that encoding.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::error::SchemaError;

/// The type of an attribute value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Type {
    /// A string value.
    String,
    /// A number value.
    Number,
    /// A boolean value.
    Bool,
    /// Any type, decided by the configuration.
    Dynamic,
    /// A list of values of a single type.
    List(Box<Type>),
    /// A set of unique values of a single type.
    Set(Box<Type>),
    /// A map from string keys to values of a single type.
    Map(Box<Type>),
    /// An object with a fixed set of attributes.
    Object {
        /// Attribute types keyed by attribute name.
        attributes: BTreeMap<String, Type>,
        /// Names of attributes that may be omitted.
        optional: BTreeSet<String>,
    },
    /// A fixed-length sequence of values with individual types.
    Tuple(Vec<Type>),
}

impl Type {
    /// Create a list type.
    pub fn list(element_type: Type) -> Self {
        Self::List(Box::new(element_type))
    }

    /// Create a set type.
    pub fn set(element_type: Type) -> Self {
        Self::Set(Box::new(element_type))
    }

    /// Create a map type.
    pub fn map(element_type: Type) -> Self {
        Self::Map(Box::new(element_type))
    }

    /// Create an object type with no optional attributes.
    pub fn object<I, K>(attributes: I) -> Self
    where
        I: IntoIterator<Item = (K, Type)>,
        K: Into<String>,
    {
        Self::Object {
            attributes: attributes.into_iter().map(|(k, t)| (k.into(), t)).collect(),
            optional: BTreeSet::new(),
        }
    }

    /// Parse a type from its JSON encoding.
    ///
    /// Returns [`SchemaError::MalformedType`] when `value` (or any type
    /// nested inside it) is not a recognized encoding.
    pub fn from_value(value: &Value) -> Result<Self, SchemaError> {
        match value {
            Value::String(name) => match name.as_str() {
                "string" => Ok(Self::String),
                "number" => Ok(Self::Number),
                "bool" => Ok(Self::Bool),
                "dynamic" => Ok(Self::Dynamic),
                _ => Err(SchemaError::malformed_type(value)),
            },
            Value::Array(items) => Self::from_compound(value, items),
            _ => Err(SchemaError::malformed_type(value)),
        }
    }

    fn from_compound(value: &Value, items: &[Value]) -> Result<Self, SchemaError> {
        let malformed = || SchemaError::malformed_type(value);

        let (kind, rest) = match items.split_first() {
            Some((Value::String(kind), rest)) => (kind.as_str(), rest),
            _ => return Err(malformed()),
        };

        match (kind, rest) {
            ("list", [element]) => Ok(Self::list(Self::from_value(element)?)),
            ("set", [element]) => Ok(Self::set(Self::from_value(element)?)),
            ("map", [element]) => Ok(Self::map(Self::from_value(element)?)),
            ("tuple", [Value::Array(elements)]) => elements
                .iter()
                .map(Self::from_value)
                .collect::<Result<Vec<_>, _>>()
                .map(Self::Tuple),
            ("object", [Value::Object(fields)]) => Ok(Self::Object {
                attributes: parse_fields(fields)?,
                optional: BTreeSet::new(),
            }),
            ("object", [Value::Object(fields), Value::Array(optional)]) => {
                let attributes = parse_fields(fields)?;
                let optional = optional
                    .iter()
                    .map(|name| match name {
                        Value::String(name) if attributes.contains_key(name) => Ok(name.clone()),
                        _ => Err(malformed()),
                    })
                    .collect::<Result<BTreeSet<_>, _>>()?;
                Ok(Self::Object {
                    attributes,
                    optional,
                })
            },
            _ => Err(malformed()),
        }
    }

    /// Encode the type back into its JSON representation.
    pub fn to_value(&self) -> Value {
        match self {
            Self::String => Value::from("string"),
            Self::Number => Value::from("number"),
            Self::Bool => Value::from("bool"),
            Self::Dynamic => Value::from("dynamic"),
            Self::List(t) => Value::Array(vec![Value::from("list"), t.to_value()]),
            Self::Set(t) => Value::Array(vec![Value::from("set"), t.to_value()]),
            Self::Map(t) => Value::Array(vec![Value::from("map"), t.to_value()]),
            Self::Tuple(elements) => Value::Array(vec![
                Value::from("tuple"),
                Value::Array(elements.iter().map(Type::to_value).collect()),
            ]),
            Self::Object {
                attributes,
                optional,
            } => {
                let fields = attributes
                    .iter()
                    .map(|(name, t)| (name.clone(), t.to_value()))
                    .collect();
                let mut encoded = vec![Value::from("object"), Value::Object(fields)];
                if !optional.is_empty() {
                    encoded.push(optional.iter().map(|n| Value::from(n.as_str())).collect());
                }
                Value::Array(encoded)
            },
        }
    }

    /// The short human-readable name of the type, e.g. `list(string)`.
    pub fn name(&self) -> String {
        self.to_string()
    }
}

fn parse_fields(
    fields: &serde_json::Map<String, Value>,
) -> Result<BTreeMap<String, Type>, SchemaError> {
    fields
        .iter()
        .map(|(name, t)| Ok((name.clone(), Type::from_value(t)?)))
        .collect()
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String => f.write_str("string"),
            Self::Number => f.write_str("number"),
            Self::Bool => f.write_str("bool"),
            Self::Dynamic => f.write_str("dynamic"),
            Self::List(t) => write!(f, "list({})", t),
            Self::Set(t) => write!(f, "set({})", t),
            Self::Map(t) => write!(f, "map({})", t),
            Self::Tuple(elements) => {
                f.write_str("tuple([")?;
                for (i, t) in elements.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{}", t)?;
                }
                f.write_str("])")
            },
            Self::Object {
                attributes,
                optional,
            } => {
                f.write_str("object({")?;
                for (i, (name, t)) in attributes.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    if optional.contains(name) {
                        write!(f, "{}=optional({})", name, t)?;
                    } else {
                        write!(f, "{}={}", name, t)?;
                    }
                }
                f.write_str("})")
            },
        }
    }
}

impl Serialize for Type {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_value().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Type {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::from_value(&value).map_err(serde::de::Error::custom)
    }
}
