//! Per-entry options for `set`.

use std::time::Duration;

/// Options accepted by [`ResponseCache::set`](crate::cache::ResponseCache::set).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SetOptions {
    /// Custom TTL (None = cache default)
    pub ttl: Option<Duration>,
    /// Tags for bulk invalidation
    pub tags: Vec<String>,
}

impl SetOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = Some(ttl);
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags.extend(tags.into_iter().map(Into::into));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = SetOptions::default();
        assert!(options.ttl.is_none());
        assert!(options.tags.is_empty());
    }

    #[test]
    fn test_builder() {
        let options = SetOptions::new()
            .with_ttl(Duration::from_secs(30))
            .with_tag("donations")
            .with_tags(["reports", "exports"]);

        assert_eq!(options.ttl, Some(Duration::from_secs(30)));
        assert_eq!(options.tags, vec!["donations", "reports", "exports"]);
    }
}
