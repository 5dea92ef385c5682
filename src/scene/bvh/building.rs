use arrayvec::ArrayVec;
use index_vec::IndexVec;
use ordered_float::OrderedFloat;

use crate::{geometry::Aabb, scene::Primitive};

use super::{
    BuildError, Bvh, BvhSettings, Node, NodeContent, NodeIdx, PrimitiveIdx, PrimitiveIdxRange,
};

impl<P: Primitive> Bvh<P> {
    pub fn build(
        primitives: impl IntoIterator<Item = P>,
        settings: BvhSettings,
    ) -> Result<Bvh<P>, BuildError> {
        let mut primitives: Vec<P> = primitives.into_iter().collect();
        if primitives.is_empty() {
            return Err(BuildError::NoPrimitives);
        }

        let mut bvh = Bvh {
            root: NodeIdx::new(0),
            nodes: IndexVec::new(),
            primitives: IndexVec::new(),
            settings,
        };

        bvh.root = bvh.build_recursive(&mut primitives, PrimitiveIdx::new(0));
        bvh.primitives = IndexVec::from_vec(primitives);

        Ok(bvh)
    }

    /// Builds a subtree over `primitives`, which start at index `first` in the final
    /// primitive array.
    fn build_recursive(&mut self, primitives: &mut [P], first: PrimitiveIdx) -> NodeIdx {
        let bounding_box = Aabb::from_boxes(primitives.iter().map(|p| p.bounding_box()))
            .expect("BVH nodes are never built empty");

        if primitives.len() <= self.settings.leaf_size.get() {
            return self.nodes.push(Node {
                bounding_box,
                content: NodeContent::Leaf {
                    primitives: PrimitiveIdxRange::new(first, primitives.len()),
                },
            });
        }

        let split_index = split_primitives(primitives, &bounding_box);

        // Create placeholder node that will be overwriten later
        let node_index = self.nodes.push(Node {
            bounding_box,
            content: NodeContent::Inner {
                children: ArrayVec::new(),
            },
        });

        let (left, right) = primitives.split_at_mut(split_index);
        let mut children = ArrayVec::new();
        if !left.is_empty() {
            children.push(self.build_recursive(left, first));
        }
        if !right.is_empty() {
            children.push(self.build_recursive(right, first + split_index));
        }

        self.nodes[node_index].content = NodeContent::Inner { children };

        node_index
    }
}

/// Sorts the primitives along the dominant axis of the enclosing box and returns
/// the index where the right half starts.
///
/// The split goes before the first primitive whose box center is not below the center
/// of the enclosing box. If that would leave the first or the last primitive alone
/// (typically because all the centers coincide), the primitives are halved instead.
fn split_primitives<P: Primitive>(primitives: &mut [P], enclosing_box: &Aabb) -> usize {
    let axis = enclosing_box.dominant_axis();
    let center_on_axis = |p: &P| p.bounding_box().center[axis.index()];
    let enclosing_center = enclosing_box.center[axis.index()];

    primitives.sort_by_key(|p| OrderedFloat(center_on_axis(p)));

    let split_index = primitives
        .iter()
        .position(|p| center_on_axis(p) >= enclosing_center)
        .unwrap_or(0);

    if split_index == 0 || split_index == primitives.len() - 1 {
        primitives.len() / 2
    } else {
        split_index
    }
}
