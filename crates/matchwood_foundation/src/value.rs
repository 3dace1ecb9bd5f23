//! Attribute value type for all Matchwood fact data.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::collections::{MwMap, MwVec};

/// Attribute value for facts and patterns.
///
/// Values are immutable and cheaply cloneable. Composite values use
/// persistent collections with structural sharing.
///
/// # Numeric equality
///
/// `Int` and `Float` compare numerically: `Int(a) == Float(b)` exactly when
/// `a as f64` is bit-identical to `b` and the cast roundtrips back to `a`.
/// Floats compare by bit pattern, so `NaN == NaN` (required for `Eq`
/// reflexivity and `Hash` consistency). Integers with magnitude above 2^53
/// have no `f64` counterpart and only ever equal other integers.
#[derive(Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Value {
    /// Boolean value.
    Bool(bool),
    /// 64-bit signed integer.
    Int(i64),
    /// 64-bit floating point.
    Float(f64),
    /// String value.
    String(Arc<str>),
    /// Ordered list of values.
    List(MwVec<Value>),
    /// Nested record of named values.
    Map(MwMap<String, Value>),
}

impl Value {
    /// Attempts to extract a boolean value.
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Attempts to extract an integer value.
    #[must_use]
    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Attempts to extract a float value.
    #[must_use]
    pub const fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(n) => Some(*n),
            _ => None,
        }
    }

    /// Attempts to extract a number as f64 (converts int to float).
    ///
    /// Note: Converting large i64 values to f64 may lose precision.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Int(n) => Some(*n as f64),
            Self::Float(n) => Some(*n),
            _ => None,
        }
    }

    /// Attempts to extract a string reference.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Attempts to extract a list reference.
    #[must_use]
    pub const fn as_list(&self) -> Option<&MwVec<Value>> {
        match self {
            Self::List(v) => Some(v),
            _ => None,
        }
    }

    /// Attempts to extract a map reference.
    #[must_use]
    pub const fn as_map(&self) -> Option<&MwMap<String, Value>> {
        match self {
            Self::Map(m) => Some(m),
            _ => None,
        }
    }

    /// Returns true if this is a numeric value (`Int` or `Float`).
    #[must_use]
    pub const fn is_number(&self) -> bool {
        matches!(self, Self::Int(_) | Self::Float(_))
    }
}

/// Numeric equality between an integer and a float.
///
/// True when the integer converts exactly to the float and the conversion
/// roundtrips. The roundtrip check rejects integers above 2^53 whose f64
/// conversion collapsed onto a neighboring value.
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
fn int_float_eq(a: i64, b: f64) -> bool {
    (a as f64).to_bits() == b.to_bits() && (a as f64) as i64 == a
}

/// True when the integer has an exact f64 counterpart.
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
fn int_roundtrips(n: i64) -> bool {
    (n as f64) as i64 == n
}

// Implement PartialEq manually so cross-type numeric comparison is pinned
// down rather than inherited from variant identity.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a.to_bits() == b.to_bits(),
            (Self::Int(a), Self::Float(b)) | (Self::Float(b), Self::Int(a)) => {
                int_float_eq(*a, *b)
            }
            (Self::String(a), Self::String(b)) => a == b,
            (Self::List(a), Self::List(b)) => a == b,
            (Self::Map(a), Self::Map(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    #[allow(clippy::cast_precision_loss)]
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Numbers share a hash domain: any Int with an exact f64 counterpart
        // hashes as that float's bit pattern, so Int(2) and Float(2.0) agree.
        // Integers without an f64 counterpart can never equal a float and
        // hash in their own domain.
        const TAG_NUMBER: u8 = 0;
        const TAG_BIG_INT: u8 = 1;
        const TAG_BOOL: u8 = 2;
        const TAG_STRING: u8 = 3;
        const TAG_LIST: u8 = 4;
        const TAG_MAP: u8 = 5;

        match self {
            Self::Bool(b) => {
                TAG_BOOL.hash(state);
                b.hash(state);
            }
            Self::Int(n) => {
                if int_roundtrips(*n) {
                    TAG_NUMBER.hash(state);
                    (*n as f64).to_bits().hash(state);
                } else {
                    TAG_BIG_INT.hash(state);
                    n.hash(state);
                }
            }
            Self::Float(f) => {
                TAG_NUMBER.hash(state);
                f.to_bits().hash(state);
            }
            Self::String(s) => {
                TAG_STRING.hash(state);
                s.hash(state);
            }
            Self::List(v) => {
                TAG_LIST.hash(state);
                v.hash(state);
            }
            Self::Map(m) => {
                TAG_MAP.hash(state);
                m.hash(state);
            }
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(n) => write!(f, "{n}"),
            Self::Float(n) => write!(f, "{n}"),
            Self::String(s) => write!(f, "{s:?}"),
            Self::List(v) => write!(f, "{v:?}"),
            Self::Map(m) => write!(f, "{m:?}"),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(n) => write!(f, "{n}"),
            Self::Float(n) => write!(f, "{n}"),
            Self::String(s) => write!(f, "{s}"),
            Self::List(v) => {
                write!(f, "[")?;
                for (i, item) in v.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            Self::Map(m) => {
                write!(f, "{{")?;
                for (i, (k, v)) in m.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{k}={v}")?;
                }
                write!(f, "}}")
            }
        }
    }
}

// Convenience From implementations

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Self::Int(i64::from(n))
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Float(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.into())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s.into())
    }
}

impl From<Arc<str>> for Value {
    fn from(s: Arc<str>) -> Self {
        Self::String(s)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Self::List(v.into_iter().map(Into::into).collect())
    }
}
