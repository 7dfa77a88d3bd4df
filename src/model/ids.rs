// SPDX-FileCopyrightText: © Siemens AG
// SPDX-License-Identifier: Apache-2.0

use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;

/// The stable identity of a model element.
///
/// Capella assigns every element a uuid string; this type does not enforce a
/// UUID format (Teamcenter extension ids are not RFC 4122), it only enforces
/// that the id is a non-empty segment without `/`, because ids appear in
/// image file references and manifest keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(String);

impl ElementId {
    pub fn new(value: impl Into<String>) -> Result<Self, IdError> {
        let value = value.into();
        if value.is_empty() {
            return Err(IdError::Empty);
        }
        if value.contains('/') {
            return Err(IdError::ContainsSlash);
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ElementId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl Borrow<str> for ElementId {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

impl FromStr for ElementId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.to_owned())
    }
}

impl TryFrom<String> for ElementId {
    type Error = IdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl serde::Serialize for ElementId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdError {
    Empty,
    ContainsSlash,
}

impl fmt::Display for IdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("element id must not be empty"),
            Self::ContainsSlash => f.write_str("element id must not contain '/'"),
        }
    }
}

impl std::error::Error for IdError {}

#[cfg(test)]
mod tests {
    use super::{ElementId, IdError};

    #[test]
    fn id_rejects_empty() {
        assert_eq!(ElementId::new(""), Err(IdError::Empty));
    }

    #[test]
    fn id_rejects_slash() {
        assert_eq!(ElementId::new("a/b"), Err(IdError::ContainsSlash));
    }

    #[test]
    fn id_accepts_non_uuid_segments() {
        let id = ElementId::new("smw-0001").expect("id");
        assert_eq!(id.as_str(), "smw-0001");
        assert_eq!(id.to_string(), "smw-0001");
    }
}
