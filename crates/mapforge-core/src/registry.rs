//! Identity registries.
//!
//! Every hierarchy level (and every auxiliary group/member level) owns one
//! [`Registry`]: an insertion-ordered arena of [`Node`]s plus a name index.
//! Registries are plain values passed through the build, so two builds in one
//! process never share state.

use ahash::AHashMap;

/// Index of a node inside one registry. Only meaningful for the registry
/// that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub name: String,
    pub parent: Option<NodeId>,
    /// Ids in the registry of the next level down, in first-seen order.
    pub children: Vec<NodeId>,
    pub loc: Option<String>,
    pub province_number: Option<u32>,
}

/// Name for a node whose identity is already taken at its level.
///
/// `level_count` is the number of nodes the level held before this one, so
/// the result depends on everything created at that level earlier in the run.
pub fn second_order_suffix(name: &str, level_count: usize) -> String {
    format!("{name}_{level_count}")
}

#[derive(Debug, Clone, Default)]
pub struct Registry {
    nodes: Vec<Node>,
    index: AHashMap<String, NodeId>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    pub fn get_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.index()]
    }

    pub fn id_of(&self, name: &str) -> Option<NodeId> {
        self.index.get(name).copied()
    }

    pub fn by_name(&self, name: &str) -> Option<&Node> {
        self.id_of(name).map(|id| self.get(id))
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (NodeId(i as u32), node))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Node> {
        self.nodes.iter_mut()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().map(|n| n.name.as_str())
    }

    /// Return the node called `name`, creating it under `parent` if absent.
    /// The flag is `true` when the node was created by this call.
    pub fn get_or_create(&mut self, name: &str, parent: Option<NodeId>) -> (NodeId, bool) {
        match self.id_of(name) {
            Some(id) => (id, false),
            None => (self.insert(name.to_string(), parent), true),
        }
    }

    /// Always create a new node. A taken `name` is renamed with
    /// [`second_order_suffix`]; if that is taken as well the count is probed
    /// upwards until a free name is found.
    pub fn create_unique(&mut self, name: &str, parent: Option<NodeId>) -> NodeId {
        if self.id_of(name).is_none() {
            return self.insert(name.to_string(), parent);
        }

        let mut count = self.nodes.len();
        let mut candidate = second_order_suffix(name, count);
        tracing::warn!(name, renamed = %candidate, "second-order identity collision");
        while self.index.contains_key(&candidate) {
            count += 1;
            let next = second_order_suffix(name, count);
            tracing::warn!(
                name,
                taken = %candidate,
                renamed = %next,
                "suffixed identity also taken; probing next count"
            );
            candidate = next;
        }
        self.insert(candidate, parent)
    }

    fn insert(&mut self, name: String, parent: Option<NodeId>) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.index.insert(name.clone(), id);
        self.nodes.push(Node {
            name,
            parent,
            children: Vec::new(),
            loc: None,
            province_number: None,
        });
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_or_create_reuses_existing_nodes() {
        let mut registry = Registry::new();
        let (a, created_a) = registry.get_or_create("a", None);
        let (b, created_b) = registry.get_or_create("b", None);
        let (a2, created_a2) = registry.get_or_create("a", Some(NodeId(9)));
        assert!(created_a && created_b && !created_a2);
        assert_eq!(a, a2);
        assert_ne!(a, b);
        assert_eq!(registry.get(a).parent, None);
        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[test]
    fn create_unique_suffixes_with_level_count() {
        let mut registry = Registry::new();
        registry.create_unique("x", None);
        registry.create_unique("y", None);
        let dup = registry.create_unique("x", None);
        assert_eq!(registry.get(dup).name, "x_2");
    }

    #[test]
    fn create_unique_skips_taken_suffixes() {
        let mut registry = Registry::new();
        registry.create_unique("x", None);
        registry.create_unique("x_2", None);
        // level count is 2, so `x_2` is the first candidate and is taken
        let dup = registry.create_unique("x", None);
        assert_eq!(registry.get(dup).name, "x_3");
        assert_eq!(registry.len(), 3);
    }
}
