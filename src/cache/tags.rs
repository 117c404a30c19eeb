//! Tag Index Module
//!
//! Non-owning many-to-many index between tags and cache keys, used for
//! bulk invalidation.

use std::collections::{HashMap, HashSet};

// == Tag Index ==
/// Bidirectional tag <-> key index.
///
/// `by_tag` answers "which keys does this tag cover" for invalidation,
/// `by_key` answers "which tags mention this key" so that deleting a key
/// only touches the tag sets it actually belongs to. Empty sets are dropped
/// from both maps.
#[derive(Debug, Default)]
pub struct TagIndex {
    by_tag: HashMap<String, HashSet<String>>,
    by_key: HashMap<String, HashSet<String>>,
}

impl TagIndex {
    pub fn new() -> Self {
        Self::default()
    }

    // == Attach ==
    /// Replaces the tag associations of `key` with `tags`.
    pub fn attach<I, S>(&mut self, key: &str, tags: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.detach(key);

        let tags: HashSet<String> = tags.into_iter().map(|t| t.as_ref().to_string()).collect();
        if tags.is_empty() {
            return;
        }

        for tag in &tags {
            self.by_tag
                .entry(tag.clone())
                .or_default()
                .insert(key.to_string());
        }
        self.by_key.insert(key.to_string(), tags);
    }

    // == Detach ==
    /// Removes `key` from every tag set it belongs to.
    pub fn detach(&mut self, key: &str) {
        let Some(tags) = self.by_key.remove(key) else {
            return;
        };

        for tag in tags {
            if let Some(keys) = self.by_tag.get_mut(&tag) {
                keys.remove(key);
                if keys.is_empty() {
                    self.by_tag.remove(&tag);
                }
            }
        }
    }

    // == Take Tag ==
    /// Removes `tag` and returns the keys it covered.
    ///
    /// The returned keys are also detached from any other tags they carried.
    pub fn take_tag(&mut self, tag: &str) -> Vec<String> {
        let Some(keys) = self.by_tag.remove(tag) else {
            return Vec::new();
        };

        let keys: Vec<String> = keys.into_iter().collect();
        for key in &keys {
            self.detach(key);
        }
        keys
    }

    /// Returns the keys currently linked to `tag`.
    pub fn keys_for(&self, tag: &str) -> Vec<String> {
        self.by_tag
            .get(tag)
            .map(|keys| keys.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Returns the tags currently linked to `key`.
    #[cfg(test)]
    pub(crate) fn tags_for(&self, key: &str) -> Vec<String> {
        self.by_key
            .get(key)
            .map(|tags| tags.iter().cloned().collect())
            .unwrap_or_default()
    }

    pub fn contains_tag(&self, tag: &str) -> bool {
        self.by_tag.contains_key(tag)
    }

    /// Number of tags with at least one key.
    pub fn tag_count(&self) -> usize {
        self.by_tag.len()
    }

    pub fn clear(&mut self) {
        self.by_tag.clear();
        self.by_key.clear();
    }
}
