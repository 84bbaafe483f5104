//! Per-match named capture mapping.

use serde::ser::{Serialize, SerializeMap, Serializer};

/// Named groups captured by one match, in the order the groups appear in the
/// pattern.
///
/// Only groups that participated in the match are present. Serializes as a
/// JSON object preserving that order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NamedCaptures(Vec<(String, String)>);

impl NamedCaptures {
    /// Builds the mapping for one match.
    ///
    /// `names` pairs each named group's index with its name; group 0 and
    /// unnamed groups are never in it.
    pub(crate) fn from_captures(caps: &regex::Captures<'_>, names: &[(usize, &str)]) -> Self {
        Self(
            names
                .iter()
                .filter_map(|&(index, name)| {
                    caps.get(index)
                        .map(|m| (name.to_string(), m.as_str().to_string()))
                })
                .collect(),
        )
    }

    /// Returns the text captured by `name`, if that group participated.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over `(name, value)` pairs in pattern order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for NamedCaptures {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl Serialize for NamedCaptures {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, value) in &self.0 {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}
