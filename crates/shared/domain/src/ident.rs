//! Identifiers used to key the mapping registry.
//!
//! Identifiers accept both the plain (`user`) and the symbolic (`:user`) spelling;
//! the symbolic prefix is stripped on construction so both resolve to the same key.

use crate::constants::{NONE_TYPE, SYMBOL_PREFIX};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::borrow::{Borrow, Cow};
use std::fmt;

fn normalize(raw: Cow<'static, str>) -> Cow<'static, str> {
    match raw {
        Cow::Borrowed(s) => Cow::Borrowed(s.strip_prefix(SYMBOL_PREFIX).unwrap_or(s)),
        Cow::Owned(s) => match s.strip_prefix(SYMBOL_PREFIX) {
            Some(stripped) => Cow::Owned(stripped.to_owned()),
            None => Cow::Owned(s),
        },
    }
}

macro_rules! symbolic_ident {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(Cow<'static, str>);

        impl $name {
            #[must_use]
            pub fn new(raw: impl Into<Cow<'static, str>>) -> Self {
                Self(normalize(raw.into()))
            }

            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<&'static str> for $name {
            fn from(raw: &'static str) -> Self {
                Self::new(raw)
            }
        }

        impl From<String> for $name {
            fn from(raw: String) -> Self {
                Self::new(raw)
            }
        }

        impl From<&String> for $name {
            fn from(raw: &String) -> Self {
                Self::new(raw.clone())
            }
        }

        impl From<&$name> for $name {
            fn from(id: &$name) -> Self {
                id.clone()
            }
        }

        impl Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(&self.0)
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                String::deserialize(deserializer).map(Self::new)
            }
        }
    };
}

symbolic_ident! {
    /// Identifies a target domain model (e.g. `user`).
    ModelId
}

symbolic_ident! {
    /// Name of a mapped field on the target model.
    FieldName
}

/// Secondary registry key distinguishing mapping variants of the same model.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MappingType {
    /// The "no type" sentinel used when a definition or lookup omits the type.
    #[default]
    None,
    Named(Cow<'static, str>),
}

impl MappingType {
    /// Builds a type from its external name; `none` (or `:none`) yields the sentinel.
    #[must_use]
    pub fn new(raw: impl Into<Cow<'static, str>>) -> Self {
        let name = normalize(raw.into());
        if name.is_empty() || name == NONE_TYPE { Self::None } else { Self::Named(name) }
    }

    #[must_use]
    pub const fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::None => NONE_TYPE,
            Self::Named(name) => name,
        }
    }
}

impl From<&'static str> for MappingType {
    fn from(raw: &'static str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for MappingType {
    fn from(raw: String) -> Self {
        Self::new(raw)
    }
}

impl From<&MappingType> for MappingType {
    fn from(ty: &MappingType) -> Self {
        ty.clone()
    }
}

impl<T: Into<Self>> From<Option<T>> for MappingType {
    fn from(raw: Option<T>) -> Self {
        raw.map_or(Self::None, Into::into)
    }
}

impl fmt::Display for MappingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for MappingType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for MappingType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Option::<String>::deserialize(deserializer).map(Self::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbolic_and_plain_spellings_are_equal() {
        assert_eq!(ModelId::from(":user"), ModelId::from("user"));
        assert_eq!(FieldName::from(":email".to_owned()), FieldName::from("email"));
        assert_eq!(ModelId::from("::odd").as_str(), ":odd");
    }

    #[test]
    fn none_sentinel_is_default() {
        assert_eq!(MappingType::default(), MappingType::None);
        assert_eq!(MappingType::from("none"), MappingType::None);
        assert_eq!(MappingType::from(":none"), MappingType::None);
        assert_eq!(MappingType::from(None::<&'static str>), MappingType::None);
        assert!(!MappingType::from("github").is_none());
    }

    #[test]
    fn mapping_type_displays_external_name() {
        assert_eq!(MappingType::None.to_string(), "none");
        assert_eq!(MappingType::from(":github").to_string(), "github");
    }
}
