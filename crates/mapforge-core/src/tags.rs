//! Country-tag conversion.

use ahash::AHashMap;

use crate::records::TagConversionRecord;

/// Old tag → new tag lookup. Unknown tags resolve to themselves.
#[derive(Debug, Clone, Default)]
pub struct TagResolver {
    map: AHashMap<String, String>,
}

impl TagResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from conversion rows. A row with a blank `new_tag` maps the old
    /// tag onto itself; a repeated `old_tag` takes the latest row.
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a TagConversionRecord>) -> Self {
        let mut resolver = Self::new();
        for record in records {
            let old = record.old_tag.trim();
            if old.is_empty() {
                continue;
            }
            let new = record.new_tag.trim();
            resolver.insert(old, if new.is_empty() { old } else { new });
        }
        resolver
    }

    pub fn insert(&mut self, old_tag: &str, new_tag: &str) {
        self.map.insert(old_tag.to_string(), new_tag.to_string());
    }

    pub fn resolve<'a>(&'a self, tag: &'a str) -> &'a str {
        self.map.get(tag).map(String::as_str).unwrap_or(tag)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn conversion(old: &str, new: &str) -> TagConversionRecord {
        TagConversionRecord {
            old_tag: old.to_string(),
            new_tag: new.to_string(),
        }
    }

    #[test]
    fn unknown_tags_resolve_to_themselves() {
        let resolver = TagResolver::from_records(&[conversion("A01", "LOR")]);
        assert_eq!(resolver.resolve("A01"), "LOR");
        assert_eq!(resolver.resolve("B02"), "B02");
        assert_eq!(resolver.resolve(""), "");
    }

    #[test]
    fn blank_new_tag_is_identity() {
        let resolver = TagResolver::from_records(&[conversion("A01", " "), conversion("", "X")]);
        assert_eq!(resolver.resolve("A01"), "A01");
        assert_eq!(resolver.len(), 1);
    }
}
