//! Intrinsic template expressions.
//!
//! A property value is either a literal string or a reference resolved by
//! the provisioning engine at deploy time. The JSON wire format uses plain
//! strings for literals and single-key objects like `{"Ref": "MyResource"}`
//! or `{"Fn::GetAtt": ["MyResource", "Arn"]}` for intrinsics.

use std::fmt;

use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A template expression: a literal or a deploy-time intrinsic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    /// Literal string value.
    Lit(String),
    /// `Ref` to another resource in the same template.
    Ref(String),
    /// `Fn::GetAtt` on another resource in the same template.
    GetAtt {
        /// Logical id of the referenced resource.
        logical_id: String,
        /// Attribute to read (e.g. `Arn`).
        attribute: String,
    },
    /// `Fn::Join` concatenating sub-expressions with a delimiter.
    Join {
        /// The delimiter inserted between parts.
        delimiter: String,
        /// The parts to concatenate.
        parts: Vec<Expr>,
    },
}

impl Expr {
    /// Create a literal expression.
    #[must_use]
    pub fn lit(value: impl Into<String>) -> Self {
        Self::Lit(value.into())
    }

    /// Create a `Ref` expression.
    #[must_use]
    pub fn reference(logical_id: impl Into<String>) -> Self {
        Self::Ref(logical_id.into())
    }

    /// Create an `Fn::GetAtt` expression.
    #[must_use]
    pub fn get_att(logical_id: impl Into<String>, attribute: impl Into<String>) -> Self {
        Self::GetAtt {
            logical_id: logical_id.into(),
            attribute: attribute.into(),
        }
    }

    /// Concatenate this expression with a literal suffix.
    ///
    /// Literals concatenate eagerly; intrinsics defer to `Fn::Join` so the
    /// provisioning engine resolves them at deploy time.
    #[must_use]
    pub fn concat(self, suffix: impl Into<String>) -> Self {
        match self {
            Self::Lit(s) => Self::Lit(s + &suffix.into()),
            other => Self::Join {
                delimiter: String::new(),
                parts: vec![other, Self::Lit(suffix.into())],
            },
        }
    }

    /// Returns the literal value if this is a `Lit` expression.
    #[must_use]
    pub fn as_lit(&self) -> Option<&str> {
        match self {
            Self::Lit(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the referenced logical id, for `Ref` and `Fn::GetAtt` alike.
    #[must_use]
    pub fn referenced_id(&self) -> Option<&str> {
        match self {
            Self::Lit(_) | Self::Join { .. } => None,
            Self::Ref(id) | Self::GetAtt { logical_id: id, .. } => Some(id),
        }
    }
}

impl From<&str> for Expr {
    fn from(value: &str) -> Self {
        Self::Lit(value.to_owned())
    }
}

impl From<String> for Expr {
    fn from(value: String) -> Self {
        Self::Lit(value)
    }
}

impl Serialize for Expr {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Lit(s) => serializer.serialize_str(s),
            Self::Ref(id) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("Ref", id)?;
                map.end()
            }
            Self::GetAtt {
                logical_id,
                attribute,
            } => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("Fn::GetAtt", &[logical_id, attribute])?;
                map.end()
            }
            Self::Join { delimiter, parts } => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("Fn::Join", &(delimiter, parts))?;
                map.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for Expr {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ExprVisitor)
    }
}

struct ExprVisitor;

impl<'de> Visitor<'de> for ExprVisitor {
    type Value = Expr;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a string or a single-key Ref / Fn::GetAtt object")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(Expr::Lit(v.to_owned()))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let Some(key) = map.next_key::<String>()? else {
            return Err(de::Error::custom("empty intrinsic object"));
        };
        let expr = match key.as_str() {
            "Ref" => Expr::Ref(map.next_value()?),
            "Fn::GetAtt" => {
                let parts: Vec<String> = map.next_value()?;
                let [logical_id, attribute] = <[String; 2]>::try_from(parts)
                    .map_err(|_| de::Error::custom("Fn::GetAtt expects [logical id, attribute]"))?;
                Expr::GetAtt {
                    logical_id,
                    attribute,
                }
            }
            "Fn::Join" => {
                let (delimiter, parts): (String, Vec<Expr>) = map.next_value()?;
                Expr::Join { delimiter, parts }
            }
            other => return Err(de::Error::custom(format!("unknown intrinsic: {other}"))),
        };
        if map.next_key::<String>()?.is_some() {
            return Err(de::Error::custom("intrinsic object must have one key"));
        }
        Ok(expr)
    }
}
