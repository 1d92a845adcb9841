use std::fmt;

use jiff::Timestamp;
use serde::de::{self, Deserializer, IgnoredAny, MapAccess, Visitor};
use serde::Deserialize;

/// Raw enumeration label as the backend sent it.
///
/// Anything that is not a string (null, numbers, tables) is kept as
/// [`RawLabel::Other`] so the caller can fall back instead of failing the
/// whole snapshot.
#[derive(Deserialize)]
#[serde(untagged)]
pub(crate) enum RawLabel {
    Text(String),
    Other(IgnoredAny),
}

impl RawLabel {
    pub(crate) fn as_str(&self) -> &str {
        match self {
            RawLabel::Text(label) => label,
            RawLabel::Other(_) => "",
        }
    }
}

/// Optional timestamp written either as an RFC 3339 string or as a native
/// TOML datetime.
pub(crate) fn optional_timestamp<'de, D>(deserializer: D) -> Result<Option<Timestamp>, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(TimestampVisitor)
}

struct TimestampVisitor;

impl<'de> Visitor<'de> for TimestampVisitor {
    type Value = Option<Timestamp>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an RFC 3339 timestamp")
    }

    fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        value.parse().map(Some).map_err(E::custom)
    }

    fn visit_none<E>(self) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(None)
    }

    fn visit_unit<E>(self) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(None)
    }

    fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(self)
    }

    // toml hands native datetimes over as a single-entry table.
    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        match map.next_entry::<IgnoredAny, String>()? {
            Some((_, value)) => self.visit_str(&value),
            None => Err(de::Error::invalid_length(0, &self)),
        }
    }
}
