//! Two-level Group → Member trees for cultures, religions and languages.
//!
//! Same get-or-create construction as the geography, without numeric ids,
//! localization or second-order collision handling.

use crate::records::{CultureRecord, DialectRecord, LanguageRecord, ReligionRecord};
use crate::registry::{Node, NodeId, Registry};
use crate::table::KeyedTable;

pub const UNKNOWN_CULTURE_GROUP: &str = "unknown_culture_group";
pub const UNKNOWN_RELIGIOUS_GROUP: &str = "unknown_religious_group";
pub const UNKNOWN_LANGUAGE: &str = "unknown_language";

#[derive(Debug, Clone, Default)]
pub struct GroupTree {
    groups: Registry,
    members: Registry,
}

impl GroupTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_group(&mut self, name: &str) -> NodeId {
        self.groups.get_or_create(name, None).0
    }

    /// Attach `member` to `group`, creating either as needed. A member that
    /// already exists stays with its first group.
    pub fn add_member(&mut self, group: &str, member: &str) -> NodeId {
        let group = self.add_group(group);
        let (id, created) = self.members.get_or_create(member, Some(group));
        if created {
            self.groups.get_mut(group).children.push(id);
        }
        id
    }

    pub fn groups(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.groups.iter()
    }

    pub fn members_of(&self, group: NodeId) -> impl Iterator<Item = &Node> {
        self.groups
            .get(group)
            .children
            .iter()
            .map(|&id| self.members.get(id))
    }

    pub fn group_of(&self, member: &str) -> Option<&Node> {
        self.members
            .by_name(member)
            .and_then(|m| m.parent)
            .map(|g| self.groups.get(g))
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }
}

fn group_name<'a>(raw: &'a str, fallback: &'a str) -> &'a str {
    let raw = raw.trim();
    if raw.is_empty() {
        fallback
    } else {
        raw
    }
}

pub fn culture_tree(cultures: &KeyedTable<CultureRecord>) -> GroupTree {
    let mut tree = GroupTree::new();
    for record in cultures.iter().filter(|r| !r.culture.trim().is_empty()) {
        tree.add_member(
            group_name(&record.culture_groups, UNKNOWN_CULTURE_GROUP),
            record.culture.trim(),
        );
    }
    tree
}

pub fn religion_tree(religions: &KeyedTable<ReligionRecord>) -> GroupTree {
    let mut tree = GroupTree::new();
    for record in religions.iter().filter(|r| !r.religion.trim().is_empty()) {
        tree.add_member(
            group_name(&record.religious_group, UNKNOWN_RELIGIOUS_GROUP),
            record.religion.trim(),
        );
    }
    tree
}

/// Every declared language is a group, even without dialects. A dialect
/// naming an undeclared language creates it.
pub fn language_tree(
    languages: &KeyedTable<LanguageRecord>,
    dialects: &KeyedTable<DialectRecord>,
) -> GroupTree {
    let mut tree = GroupTree::new();
    for record in languages.iter().filter(|r| !r.language.trim().is_empty()) {
        tree.add_group(record.language.trim());
    }
    for record in dialects.iter().filter(|r| !r.dialect.trim().is_empty()) {
        tree.add_member(
            group_name(&record.language, UNKNOWN_LANGUAGE),
            record.dialect.trim(),
        );
    }
    tree
}
