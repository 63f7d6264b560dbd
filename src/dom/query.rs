//! DOM queries: by id, class, tag, attribute; subtree matching.

use super::node::{NodeData, NodeId};
use super::tree::Dom;

impl Dom {
    /// Find the first node whose `id` field matches the given string.
    ///
    /// Iterates all nodes in the arena (not just the tree rooted at `root`).
    pub fn query_by_id(&self, id: &str) -> Option<NodeId> {
        self.iter_nodes()
            .find(|(_, data)| data.id.as_deref() == Some(id))
            .map(|(node_id, _)| node_id)
    }

    /// Find all nodes that have the given CSS class.
    pub fn query_by_class(&self, class: &str) -> Vec<NodeId> {
        self.query_all(|data| data.has_class(class))
    }

    /// Find all elements with the given tag.
    pub fn query_by_tag(&self, tag: &str) -> Vec<NodeId> {
        self.query_all(|data| data.is(tag))
    }

    /// Find all nodes carrying the given attribute.
    pub fn query_by_attr(&self, name: &str) -> Vec<NodeId> {
        self.query_all(|data| data.has_attr(name))
    }

    /// Find all nodes matching an arbitrary predicate.
    ///
    /// Arena order: deterministic but not tree order. Use
    /// [`descendants_matching`](Self::descendants_matching) when document
    /// order matters.
    pub fn query_all(&self, predicate: impl Fn(&NodeData) -> bool) -> Vec<NodeId> {
        self.iter_nodes()
            .filter(|(_, data)| predicate(data))
            .map(|(node_id, _)| node_id)
            .collect()
    }

    /// Nodes under `start` (inclusive) matching `predicate`, in document order.
    pub fn descendants_matching(
        &self,
        start: NodeId,
        predicate: impl Fn(&NodeData) -> bool,
    ) -> Vec<NodeId> {
        self.walk_depth_first(start)
            .into_iter()
            .filter(|&n| self.get(n).is_some_and(&predicate))
            .collect()
    }

    /// First node under `start` (inclusive) matching `predicate`, in document order.
    pub fn first_descendant(
        &self,
        start: NodeId,
        predicate: impl Fn(&NodeData) -> bool,
    ) -> Option<NodeId> {
        self.walk_depth_first(start)
            .into_iter()
            .find(|&n| self.get(n).is_some_and(&predicate))
    }

    /// Iterate over all `(NodeId, &NodeData)` pairs in the arena.
    fn iter_nodes(&self) -> impl Iterator<Item = (NodeId, &NodeData)> {
        self.nodes.iter()
    }
}

#[cfg(test)]
mod tests {
    use crate::dom::node::NodeData;
    use crate::dom::tree::Dom;

    /// ```text
    ///   div#grid
    ///   ├── table.grid__table
    ///   │   └── thead > tr
    ///   │       ├── th[data-sortable] "Name"
    ///   │       └── th "Notes"
    ///   └── div[aria-live=polite]
    /// ```
    fn build_query_tree() -> Dom {
        let mut dom = Dom::new();
        let root = dom.insert(NodeData::new("div").with_id("grid"));
        let table = dom.insert_child(root, NodeData::new("table").with_class("grid__table"));
        let thead = dom.insert_child(table, NodeData::new("thead"));
        let tr = dom.insert_child(thead, NodeData::new("tr"));
        let name = dom.insert_child(tr, NodeData::new("th").with_attr("data-sortable", "true"));
        dom.insert_child(name, NodeData::text("Name"));
        let notes = dom.insert_child(tr, NodeData::new("th"));
        dom.insert_child(notes, NodeData::text("Notes"));
        dom.insert_child(root, NodeData::new("div").with_attr("aria-live", "polite"));
        dom
    }

    #[test]
    fn query_by_id() {
        let dom = build_query_tree();
        let grid = dom.query_by_id("grid").unwrap();
        assert_eq!(dom.get(grid).unwrap().tag, "div");
        assert!(dom.query_by_id("missing").is_none());
    }

    #[test]
    fn query_by_class_and_tag() {
        let dom = build_query_tree();
        assert_eq!(dom.query_by_class("grid__table").len(), 1);
        assert_eq!(dom.query_by_tag("th").len(), 2);
        assert_eq!(dom.query_by_tag("TH").len(), 2);
        assert!(dom.query_by_tag("tbody").is_empty());
    }

    #[test]
    fn query_by_attr() {
        let dom = build_query_tree();
        assert_eq!(dom.query_by_attr("data-sortable").len(), 1);
        assert_eq!(dom.query_by_attr("aria-live").len(), 1);
        assert!(dom.query_by_attr("aria-sort").is_empty());
    }

    #[test]
    fn descendants_in_document_order() {
        let dom = build_query_tree();
        let root = dom.root().unwrap();
        let headers = dom.descendants_matching(root, |d| d.is("th"));
        let labels: Vec<String> = headers.iter().map(|&h| dom.text_content(h)).collect();
        assert_eq!(labels, vec!["Name", "Notes"]);
    }

    #[test]
    fn first_descendant_inclusive() {
        let dom = build_query_tree();
        let root = dom.root().unwrap();
        assert_eq!(dom.first_descendant(root, |d| d.is("div")), Some(root));
        let live = dom.first_descendant(root, |d| d.has_attr("aria-live"));
        assert!(live.is_some());
    }

    #[test]
    fn query_on_empty_dom() {
        let dom = Dom::new();
        assert!(dom.query_by_id("x").is_none());
        assert!(dom.query_by_class("x").is_empty());
        assert!(dom.query_by_tag("x").is_empty());
        assert!(dom.query_all(|_| true).is_empty());
    }
}
