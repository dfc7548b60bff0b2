use mongodb::bson::oid::ObjectId;
use serde::{de::Error as _, Deserialize, Deserializer, Serialize, Serializer};
use std::{fmt, str::FromStr};
use thiserror::Error;

/// Anything that is stored and looked up by an `ID`
pub trait Entity {
    fn id(&self) -> &ID;
}

/// Identifier of a stored record.
///
/// Wraps a 12 byte `ObjectId` so the same id scheme is used no matter
/// which store is backing the service. Newly generated ids are unique and
/// travel over the wire as 24 hex characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ID(ObjectId);

impl ID {
    pub fn new() -> Self {
        Self(ObjectId::new())
    }

    pub fn inner_ref(&self) -> &ObjectId {
        &self.0
    }
}

impl Default for ID {
    fn default() -> Self {
        Self::new()
    }
}

impl From<ObjectId> for ID {
    fn from(oid: ObjectId) -> Self {
        Self(oid)
    }
}

impl fmt::Display for ID {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.to_hex())
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum InvalidIDError {
    #[error("ID: {0} is malformed")]
    Malformed(String),
}

impl FromStr for ID {
    type Err = InvalidIDError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ObjectId::parse_str(s)
            .map(Self)
            .map_err(|_| InvalidIDError::Malformed(s.to_string()))
    }
}

impl Serialize for ID {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ID {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn it_parses_its_own_string_representation() {
        let id = ID::new();
        let parsed = id.to_string().parse::<ID>().expect("To parse id");
        assert_eq!(parsed, id);
        assert_eq!(id.to_string().len(), 24);
    }

    #[test]
    fn it_rejects_malformed_ids() {
        for raw in &["", "1", "not-an-id", "zzzzzzzzzzzzzzzzzzzzzzzz"] {
            assert_eq!(
                raw.parse::<ID>(),
                Err(InvalidIDError::Malformed(raw.to_string()))
            );
        }
    }

    #[test]
    fn generated_ids_are_unique() {
        let a = ID::new();
        let b = ID::new();
        assert_ne!(a, b);
    }

    #[test]
    fn it_serializes_as_hex_string() {
        let id = ID::new();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", id));
        let back: ID = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);

        let err = serde_json::from_str::<ID>("\"abc\"").unwrap_err();
        assert!(err.to_string().contains("ID: abc is malformed"));
        assert!(serde_json::from_str::<ID>("12").is_err());
    }
}
