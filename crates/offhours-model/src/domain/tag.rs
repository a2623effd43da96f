use serde::{Deserialize, Serialize};

/// Key–value pair attached to a cluster or service by the platform.
///
/// Both fields are plain UTF-8 strings with no validation applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
    /// Tag key.
    key: String,
    /// Value associated with the key.
    value: String,
}

impl Tag {
    /// Create a new tag.
    pub fn new<K, V>(key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Get the key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Get the value.
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl From<(String, String)> for Tag {
    fn from((key, value): (String, String)) -> Self {
        Self { key, value }
    }
}

impl From<(&str, &str)> for Tag {
    fn from((key, value): (&str, &str)) -> Self {
        Self {
            key: key.to_string(),
            value: value.to_string(),
        }
    }
}

/// Ordered collection of tags as returned by the platform.
///
/// The platform does not guarantee unique keys; lookups treat the *first*
/// tag carrying a key as authoritative.
#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TagSet(pub Vec<Tag>);

impl TagSet {
    /// Create an empty tag set.
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Returns `true` if no tags are present.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Append a tag.
    ///
    /// Returns `self` for chaining.
    pub fn push<T>(&mut self, tag: T) -> &mut Self
    where
        T: Into<Tag>,
    {
        self.0.push(tag.into());
        self
    }

    /// Value of the first tag carrying `key`, if any.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.iter().find(|t| t.key() == key).map(|t| t.value())
    }

    /// Returns `true` if any tag carries `key`, regardless of value.
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.iter().any(|t| t.key() == key)
    }

    /// Iterate through all tags as `(&str, &str)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|t| (t.key(), t.value()))
    }
}

impl FromIterator<Tag> for TagSet {
    fn from_iter<I: IntoIterator<Item = Tag>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
