//! Typed expected values.

use std::fmt;

/// Where an attribute or group tag belongs: the session itself or one media
/// section, by position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaRef {
    Session,
    Media(usize),
}

impl fmt::Display for MediaRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaRef::Session => f.write_str("session"),
            MediaRef::Media(idx) => write!(f, "media[{}]", idx),
        }
    }
}

/// One expected field value.
///
/// Kinds never coerce into each other: an `Int(5)` checked against a text
/// field is a failure, not a match against `"5"`. [`TypedValue::Any`] is
/// the exception: it stands in for any parsed value and is never compared.
#[derive(Debug, Clone, PartialEq)]
pub enum TypedValue {
    Any,
    Absent,
    Int(i64),
    Float(f64),
    Text(String),
    Reference(MediaRef),
}

impl TypedValue {
    /// Name of the variant, for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            TypedValue::Any => "any",
            TypedValue::Absent => "absent",
            TypedValue::Int(_) => "integer",
            TypedValue::Float(_) => "float",
            TypedValue::Text(_) => "text",
            TypedValue::Reference(_) => "reference",
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, TypedValue::Absent)
    }

    pub fn is_any(&self) -> bool {
        matches!(self, TypedValue::Any)
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            TypedValue::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            TypedValue::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            TypedValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_reference(&self) -> Option<MediaRef> {
        match self {
            TypedValue::Reference(r) => Some(*r),
            _ => None,
        }
    }
}

impl fmt::Display for TypedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypedValue::Any => f.write_str("any"),
            TypedValue::Absent => f.write_str("absent"),
            TypedValue::Int(n) => write!(f, "integer({})", n),
            TypedValue::Float(v) => write!(f, "float({})", v),
            TypedValue::Text(s) => write!(f, "text({:?})", s),
            TypedValue::Reference(r) => write!(f, "reference({})", r),
        }
    }
}

macro_rules! from_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for TypedValue {
                fn from(value: $ty) -> Self {
                    TypedValue::Int(value as i64)
                }
            }
        )*
    };
}

from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<f64> for TypedValue {
    fn from(value: f64) -> Self {
        TypedValue::Float(value)
    }
}

impl From<&str> for TypedValue {
    fn from(value: &str) -> Self {
        TypedValue::Text(value.to_string())
    }
}

impl From<String> for TypedValue {
    fn from(value: String) -> Self {
        TypedValue::Text(value)
    }
}

impl From<MediaRef> for TypedValue {
    fn from(value: MediaRef) -> Self {
        TypedValue::Reference(value)
    }
}

impl<T: Into<TypedValue>> From<Option<T>> for TypedValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(TypedValue::Absent, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversions() {
        assert_eq!(TypedValue::from(96u32), TypedValue::Int(96));
        assert_eq!(TypedValue::from(29.97), TypedValue::Float(29.97));
        assert_eq!(TypedValue::from("raw"), TypedValue::Text("raw".to_string()));
        assert_eq!(TypedValue::from(None::<u32>), TypedValue::Absent);
        assert_eq!(TypedValue::from(Some(2u32)), TypedValue::Int(2));
        assert_eq!(
            TypedValue::from(MediaRef::Media(1)),
            TypedValue::Reference(MediaRef::Media(1))
        );
    }

    #[test]
    fn test_accessors_check_the_kind() {
        let five = TypedValue::Int(5);
        assert_eq!(five.as_int(), Some(5));
        assert_eq!(five.as_text(), None);
        assert_eq!(five.as_float(), None);
        assert_eq!(TypedValue::from("5").as_int(), None);
        assert!(TypedValue::Absent.is_absent());
        assert!(!TypedValue::Any.is_absent());
        assert!(TypedValue::Any.is_any());
        assert_eq!(TypedValue::Any.as_int(), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(TypedValue::Int(5).to_string(), "integer(5)");
        assert_eq!(TypedValue::Any.to_string(), "any");
        assert_eq!(TypedValue::from("5").to_string(), "text(\"5\")");
        assert_eq!(
            TypedValue::Reference(MediaRef::Session).to_string(),
            "reference(session)"
        );
    }
}
