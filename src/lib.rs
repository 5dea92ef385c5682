pub mod geometry;
pub mod scene;
mod util;

pub use scene::{
    BuildError, Bvh, BvhSettings, BvhStatistics, Primitive, Shape, Sphere, Triangle, Vertex,
};
pub use util::Stats;
