use crate::genealogy::GenealogyTracker;
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::HashMap;
use uuid::Uuid;

/// A node in the lineage graph.
pub struct LineageNode {
    pub id: Uuid,
    pub name: String,
    pub generation: u32,
    pub offspring_count: usize,
}

/// The genealogy forest materialized as a directed graph, for offline
/// visualization of lineage branching.
pub struct AncestryTree {
    pub graph: DiGraph<LineageNode, ()>,
    id_map: HashMap<Uuid, NodeIndex>,
}

impl Default for AncestryTree {
    fn default() -> Self {
        Self::new()
    }
}

impl AncestryTree {
    pub fn new() -> Self {
        Self {
            graph: DiGraph::new(),
            id_map: HashMap::new(),
        }
    }

    /// Builds the graph from the tracker: one node per genealogy record,
    /// one parent→child edge per known parent link.
    pub fn build(tracker: &GenealogyTracker) -> Self {
        let mut tree = Self::new();
        let export = tracker.export();

        for node in &export.family_tree {
            let idx = tree.graph.add_node(LineageNode {
                id: node.id,
                name: format!("P-{}", &node.id.to_string()[..4]),
                generation: node.generation,
                offspring_count: node.children.len(),
            });
            tree.id_map.insert(node.id, idx);
        }

        for node in &export.family_tree {
            if let Some(parent_id) = node.parent {
                if let (Some(&p_idx), Some(&c_idx)) =
                    (tree.id_map.get(&parent_id), tree.id_map.get(&node.id))
                {
                    tree.graph.add_edge(p_idx, c_idx, ());
                }
            }
        }

        tree
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Renders the forest in Graphviz DOT format. Roots are shaded
    /// differently from descendants.
    pub fn to_dot(&self) -> String {
        let mut dot = String::from("digraph Lineage {\n");
        dot.push_str("  node [shape=box, style=filled, fontname=\"Arial\"];\n");

        for idx in self.graph.node_indices() {
            let node = &self.graph[idx];
            let fill = if node.generation == 0 {
                "#e1f5fe"
            } else {
                "#eeeeee"
            };
            dot.push_str(&format!(
                "  \"{}\" [label=\"{} (Gen {})\\nOffspring: {}\", fillcolor=\"{}\"];\n",
                node.id, node.name, node.generation, node.offspring_count, fill
            ));
        }

        for edge in self.graph.edge_indices() {
            if let Some((from, to)) = self.graph.edge_endpoints(edge) {
                dot.push_str(&format!(
                    "  \"{}\" -> \"{}\";\n",
                    self.graph[from].id, self.graph[to].id
                ));
            }
        }

        dot.push_str("}\n");
        dot
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_node_per_record_one_edge_per_parent_link() {
        let mut tracker = GenealogyTracker::new();
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let c = Uuid::new_v4();
        tracker.register_birth(a, None).unwrap();
        tracker.register_birth(b, Some(a)).unwrap();
        tracker.register_birth(c, Some(b)).unwrap();

        let tree = AncestryTree::build(&tracker);
        assert_eq!(tree.node_count(), 3);
        assert_eq!(tree.edge_count(), 2);

        let dot = tree.to_dot();
        assert!(dot.starts_with("digraph Lineage {"));
        assert!(dot.contains(&a.to_string()));
        assert!(dot.contains("Gen 2"));
    }
}
