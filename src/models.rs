//! Stream record model.
//!
//! A stream record is an ordered set of named attributes describing one
//! stream source: its URL plus whatever metadata the library keeps for it
//! (nickname, credentials, last-played position, ...). The attribute set is
//! open-ended across schema versions, so records are modeled as an ordered
//! map rather than a fixed struct; a document written by a newer build with
//! extra attributes restores cleanly into an older store.

use indexmap::IndexMap;

use crate::config::URL_ATTRIBUTE;

/// One backed-up stream entry: an ordered attribute-name to attribute-value map.
///
/// Attribute order is preserved from first insertion, so serializing the same
/// logical record always produces the same document text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StreamRecord {
    attributes: IndexMap<String, Option<String>>,
}

impl StreamRecord {
    /// Creates an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets an attribute. A re-set key keeps its original position.
    pub fn set(&mut self, key: impl Into<String>, value: Option<String>) {
        self.attributes.insert(key.into(), value);
    }

    /// Returns the attribute value, if present and non-null.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).and_then(|v| v.as_deref())
    }

    /// The stream URL, used as the uniqueness key during restore.
    ///
    /// Returns `None` when the attribute is absent, null, or empty; such a
    /// record cannot be matched against the store and is never merged.
    pub fn url(&self) -> Option<&str> {
        self.get(URL_ATTRIBUTE).filter(|v| !v.is_empty())
    }

    /// Iterates attributes in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.attributes.iter().map(|(k, v)| (k.as_str(), v.as_deref()))
    }

    /// Number of attributes on this record.
    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    /// True when the record has no attributes.
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attributes_keep_insertion_order() {
        let mut record = StreamRecord::new();
        record.set("url", Some("http://example.com/a".to_string()));
        record.set("nickname", Some("morning show".to_string()));
        record.set("username", None);

        let keys: Vec<&str> = record.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["url", "nickname", "username"]);
    }

    #[test]
    fn reset_key_keeps_position() {
        let mut record = StreamRecord::new();
        record.set("url", Some("http://example.com/a".to_string()));
        record.set("nickname", Some("old".to_string()));
        record.set("url", Some("http://example.com/b".to_string()));

        let keys: Vec<&str> = record.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["url", "nickname"]);
        assert_eq!(record.url(), Some("http://example.com/b"));
    }

    #[test]
    fn url_rejects_missing_null_and_empty() {
        let mut record = StreamRecord::new();
        assert_eq!(record.url(), None);

        record.set("url", None);
        assert_eq!(record.url(), None);

        record.set("url", Some(String::new()));
        assert_eq!(record.url(), None);

        record.set("url", Some("http://example.com/a".to_string()));
        assert_eq!(record.url(), Some("http://example.com/a"));
    }

    #[test]
    fn get_distinguishes_null_from_missing_only_via_iter() {
        let mut record = StreamRecord::new();
        record.set("password", None);

        // get() collapses null to None, but the attribute still serializes
        assert_eq!(record.get("password"), None);
        assert_eq!(record.len(), 1);
        assert_eq!(record.iter().next(), Some(("password", None)));
    }
}
