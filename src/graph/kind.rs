use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// The data-type tag carried by a handle.
///
/// `Any` is the wildcard: it is compatible with every kind in either position.
/// Unknown wire strings decode to `Any`, so a document produced by a newer
/// editor (or one with missing kind metadata) never fails validation solely
/// because of the tag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum DataKind {
    Text,
    Image,
    Video,
    Audio,
    Model,
    #[default]
    Any,
}

impl DataKind {
    /// Decides whether an edge from a `source`-kinded output into a
    /// `target`-kinded input is legal. Pure and total: `any` matches
    /// everything, otherwise the kinds must match exactly.
    pub fn compatible(source: DataKind, target: DataKind) -> bool {
        source == DataKind::Any || target == DataKind::Any || source == target
    }

    /// Parses a wire tag. Unknown tags map to [`DataKind::Any`].
    pub fn parse(raw: &str) -> DataKind {
        match raw {
            "text" => DataKind::Text,
            "image" => DataKind::Image,
            "video" => DataKind::Video,
            "audio" => DataKind::Audio,
            "model" => DataKind::Model,
            _ => DataKind::Any,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DataKind::Text => "text",
            DataKind::Image => "image",
            DataKind::Video => "video",
            DataKind::Audio => "audio",
            DataKind::Model => "model",
            DataKind::Any => "any",
        }
    }
}

impl fmt::Display for DataKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for DataKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for DataKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(DataKind::parse(&raw))
    }
}
