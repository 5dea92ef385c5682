mod building;
mod printing;
mod ray_bvh_intersection;

use std::num::NonZeroUsize;

use arrayvec::ArrayVec;
use index_vec::IndexVec;
use thiserror::Error;

use crate::geometry::Aabb;

pub use printing::BvhStatistics;

/// Maximal number of children of an inner node
const BRANCHING_FACTOR: usize = 2;

/// Bounding volume hierarchy over a static set of primitives.
///
/// Works as a broad phase filter only: `trace` returns the primitives whose
/// bounding boxes the ray crosses, resolving the nearest hit is up to the caller.
#[derive(Clone, Debug)]
pub struct Bvh<P> {
    root: NodeIdx,
    nodes: IndexVec<NodeIdx, Node>,
    /// Reordered during the build so that each leaf owns a contiguous range
    primitives: IndexVec<PrimitiveIdx, P>,
    settings: BvhSettings,
}

#[derive(Copy, Clone, Debug)]
pub struct BvhSettings {
    /// Nodes with at most this many primitives become leaves
    pub leaf_size: NonZeroUsize,
}

impl Default for BvhSettings {
    fn default() -> Self {
        BvhSettings {
            leaf_size: NonZeroUsize::new(2).expect("2 is non-zero"),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BuildError {
    #[error("Cannot build a BVH without any primitives")]
    NoPrimitives,
}

#[derive(Clone, Debug)]
struct Node {
    bounding_box: Aabb,
    content: NodeContent,
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum NodeContent {
    Leaf { primitives: PrimitiveIdxRange },
    Inner {
        children: ArrayVec<NodeIdx, BRANCHING_FACTOR>,
    },
}

index_vec::define_index_type! {
    struct NodeIdx = u32;
    IMPL_RAW_CONVERSIONS = true;
}

index_vec::define_index_type! {
    struct PrimitiveIdx = usize;
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
struct PrimitiveIdxRange {
    pub first: PrimitiveIdx,
    pub last: PrimitiveIdx,
}

impl PrimitiveIdxRange {
    pub fn new(first: PrimitiveIdx, count: usize) -> PrimitiveIdxRange {
        PrimitiveIdxRange {
            first,
            last: first + count,
        }
    }

    pub fn into_range(self) -> std::ops::Range<PrimitiveIdx> {
        self.first..self.last
    }

    pub fn len(&self) -> usize {
        self.last.index() - self.first.index()
    }
}

impl<P> Bvh<P> {
    /// All primitives, in leaf order
    pub fn primitives(&self) -> impl ExactSizeIterator<Item = &P> {
        self.primitives.iter()
    }

    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    /// Always false, the BVH cannot be built empty
    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    pub fn bounding_box(&self) -> &Aabb {
        &self.nodes[self.root].bounding_box
    }

    pub fn settings(&self) -> &BvhSettings {
        &self.settings
    }
}
