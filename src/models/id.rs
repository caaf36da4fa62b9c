use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Identifier as sent by the backend.
///
/// The API mixes JSON strings and numbers for the same id fields, so every
/// id is held in one normalised textual form and compared only through it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(String);

impl EntityId {
    pub fn new(raw: impl AsRef<str>) -> Self {
        Self(Self::normalize(raw.as_ref()))
    }

    pub fn normalize(raw: &str) -> String {
        raw.trim().to_string()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Compares against any raw value after normalisation.
    pub fn matches(&self, raw: impl AsRef<str>) -> bool {
        self.0 == Self::normalize(raw.as_ref())
    }

    fn as_canonical_int(&self) -> Option<i64> {
        self.0
            .parse::<i64>()
            .ok()
            .filter(|n| n.to_string() == self.0)
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EntityId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for EntityId {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

macro_rules! id_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for EntityId {
                fn from(value: $t) -> Self {
                    Self(value.to_string())
                }
            }
        )*
    };
}

id_from_int!(i32, i64, u32, u64);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Int(i64),
    UInt(u64),
    Float(f64),
    Text(String),
}

impl<'de> Deserialize<'de> for EntityId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // null reads as the empty id, like a missing key under `default`
        let id = match Option::<RawId>::deserialize(deserializer)? {
            None => EntityId::default(),
            Some(RawId::Int(n)) => EntityId::from(n),
            Some(RawId::UInt(n)) => EntityId::from(n),
            Some(RawId::Float(f)) if f.fract() == 0.0 => EntityId(format!("{}", f as i64)),
            Some(RawId::Float(f)) => EntityId(f.to_string()),
            Some(RawId::Text(s)) => EntityId::new(s),
        };
        Ok(id)
    }
}

impl Serialize for EntityId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.as_canonical_int() {
            Some(n) => serializer.serialize_i64(n),
            None => serializer.serialize_str(&self.0),
        }
    }
}
