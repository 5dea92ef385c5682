use std::fmt::Display;

use crate::{scene::Primitive, util::Stats};

use super::{Bvh, NodeContent, NodeIdx};

/// Shape of a built tree
#[derive(Clone, Debug, PartialEq)]
pub struct BvhStatistics {
    pub node_count: usize,
    pub leaf_count: usize,
    /// Depth of each leaf, the root being at depth 1
    pub depth: Stats,
    /// Number of children of each inner node
    pub inner_fill: Stats,
    /// Number of primitives in each leaf
    pub leaf_fill: Stats,
}

impl Display for BvhStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Nodes: {} ({} leaves)", self.node_count, self.leaf_count)?;
        writeln!(f, "Depth: {}", self.depth)?;
        writeln!(f, "Inner node child count: {}", self.inner_fill)?;
        write!(f, "Leaf nodes fill: {}", self.leaf_fill)
    }
}

impl<P> Bvh<P> {
    pub fn statistics(&self) -> BvhStatistics {
        let mut depth = Stats::default();
        self.depth_statistics_recursive(self.root, 1, &mut depth);

        let inner_fill = self
            .nodes
            .iter()
            .filter_map(|node| match &node.content {
                NodeContent::Inner { children } => Some(children.len()),
                NodeContent::Leaf { .. } => None,
            })
            .collect();

        let leaf_fill: Stats = self
            .nodes
            .iter()
            .filter_map(|node| match &node.content {
                NodeContent::Leaf { primitives } => Some(primitives.len()),
                NodeContent::Inner { .. } => None,
            })
            .collect();

        BvhStatistics {
            node_count: self.nodes.len(),
            leaf_count: leaf_fill.count,
            depth,
            inner_fill,
            leaf_fill,
        }
    }

    pub fn print_statistics(&self) {
        println!("{}", self.statistics());
    }

    fn depth_statistics_recursive(&self, node: NodeIdx, depth: usize, stats: &mut Stats) {
        match &self.nodes[node].content {
            NodeContent::Leaf { .. } => stats.add_sample(depth),
            NodeContent::Inner { children } => {
                for child in children {
                    self.depth_statistics_recursive(*child, depth + 1, stats);
                }
            }
        }
    }
}

impl<P: Primitive> Bvh<P> {
    pub fn print_tree(&self) {
        print!("{}", self.tree_string());
    }

    /// One line per node, indented by depth, followed by the boxes of the primitives
    /// in each leaf.
    pub fn tree_string(&self) -> String {
        let mut output = String::new();
        self.print_recursive(&mut output, 0, self.root);
        output
    }

    fn print_recursive(&self, output: &mut String, indent: usize, node_index: NodeIdx) {
        let node = &self.nodes[node_index];
        let is_leaf = matches!(node.content, NodeContent::Leaf { .. });
        output.push_str(&format!(
            "{}- {}{}: {:?}-{:?}\n",
            "  ".repeat(indent),
            if is_leaf { "L" } else { "I" },
            node_index.index(),
            node.bounding_box.min,
            node.bounding_box.max,
        ));

        match &node.content {
            NodeContent::Leaf { primitives } => {
                let indent = "  ".repeat(indent + 1);
                for primitive in self.primitives[primitives.into_range()].iter() {
                    let bounding_box = primitive.bounding_box();
                    output.push_str(&format!(
                        "{}{:?}-{:?}\n",
                        indent, bounding_box.min, bounding_box.max
                    ));
                }
            }
            NodeContent::Inner { children } => {
                for child in children {
                    self.print_recursive(output, indent + 1, *child);
                }
            }
        }
    }
}
