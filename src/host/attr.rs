//! Tri-state attribute values
//!
//! The host distinguishes a value it does not know yet (computed during
//! apply), an explicit null, and a known value. Collections returned by the
//! server must always come back known, even when empty.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// One attribute as seen by the host
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Attr<T> {
    /// Not known until apply
    Unknown,
    /// Explicitly absent
    #[default]
    Null,
    /// Known value
    Known(T),
}

impl<T> Attr<T> {
    pub fn known(value: impl Into<T>) -> Self {
        Attr::Known(value.into())
    }

    pub fn from_option(value: Option<T>) -> Self {
        match value {
            Some(v) => Attr::Known(v),
            None => Attr::Null,
        }
    }

    pub fn is_known(&self) -> bool {
        matches!(self, Attr::Known(_))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Attr::Null)
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Attr::Unknown)
    }

    /// Borrow the value if known
    pub fn as_known(&self) -> Option<&T> {
        match self {
            Attr::Known(v) => Some(v),
            _ => None,
        }
    }

    /// Collapse to an option; unknown and null both become `None`
    pub fn into_option(self) -> Option<T> {
        match self {
            Attr::Known(v) => Some(v),
            _ => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Attr<U> {
        match self {
            Attr::Known(v) => Attr::Known(f(v)),
            Attr::Null => Attr::Null,
            Attr::Unknown => Attr::Unknown,
        }
    }

    /// Map a known value, turning a failed conversion into null
    pub fn and_then<U>(self, f: impl FnOnce(T) -> Option<U>) -> Attr<U> {
        match self {
            Attr::Known(v) => Attr::from_option(f(v)),
            Attr::Null => Attr::Null,
            Attr::Unknown => Attr::Unknown,
        }
    }

    /// Keep this value unless it is unknown, in which case use `prior`
    pub fn or_prior(self, prior: &Attr<T>) -> Attr<T>
    where
        T: Clone,
    {
        match self {
            Attr::Unknown => prior.clone(),
            other => other,
        }
    }
}

impl<T> From<T> for Attr<T> {
    fn from(value: T) -> Self {
        Attr::Known(value)
    }
}

impl From<&str> for Attr<String> {
    fn from(value: &str) -> Self {
        Attr::Known(value.to_string())
    }
}

// Unknown never reaches stored state; it serializes like null.
impl<T: Serialize> Serialize for Attr<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Attr::Known(v) => v.serialize(serializer),
            Attr::Null | Attr::Unknown => serializer.serialize_none(),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Attr<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Option::<T>::deserialize(deserializer).map(Attr::from_option)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_null() {
        let attr: Attr<i64> = Attr::default();
        assert!(attr.is_null());
    }

    #[test]
    fn test_or_prior_only_replaces_unknown() {
        let prior = Attr::Known(7);
        assert_eq!(Attr::Unknown.or_prior(&prior), Attr::Known(7));
        assert_eq!(Attr::Known(3).or_prior(&prior), Attr::Known(3));
        assert_eq!(Attr::<i64>::Null.or_prior(&prior), Attr::Null);
    }

    #[test]
    fn test_serde() {
        let json = serde_json::to_string(&Attr::Known("a".to_string())).unwrap();
        assert_eq!(json, "\"a\"");
        assert_eq!(serde_json::to_string(&Attr::<bool>::Unknown).unwrap(), "null");

        let parsed: Attr<i64> = serde_json::from_str("null").unwrap();
        assert!(parsed.is_null());
        let parsed: Attr<i64> = serde_json::from_str("42").unwrap();
        assert_eq!(parsed, Attr::Known(42));
    }
}
