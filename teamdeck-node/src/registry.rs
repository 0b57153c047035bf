//! Node registry - Lists the nodes this crate provides.

use crate::connectors::teamdeck::TeamdeckNode;
use crate::Node;
use std::sync::Arc;

/// Returns all available nodes.
pub fn get_all_nodes() -> Vec<Arc<dyn Node>> {
    vec![Arc::new(TeamdeckNode::new())]
}

/// Looks a node up by its `name()`.
pub fn find_node(name: &str) -> Option<Arc<dyn Node>> {
    get_all_nodes().into_iter().find(|node| node.name() == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_all_nodes() {
        let nodes = get_all_nodes();
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].name(), "teamdeck");
    }

    #[test]
    fn test_find_node() {
        let node = find_node("teamdeck").unwrap();
        assert_eq!(node.description().display_name, "Teamdeck");
        assert!(find_node("github").is_none());
    }
}
