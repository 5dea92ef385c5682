use std::ops::{Add, Index, IndexMut, Mul};

use super::{FloatType, WorldPoint, WorldVector};

/// Three of something, one per triangle corner.
#[derive(Clone, Debug, PartialEq)]
pub struct Triangle<T>([T; 3]);

impl<T> Triangle<T> {
    pub fn new(a: T, b: T, c: T) -> Triangle<T> {
        Triangle([a, b, c])
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.0.iter()
    }

    pub fn map<T2, F: FnMut(&T) -> T2>(&self, mut f: F) -> Triangle<T2> {
        Triangle([f(&self[0]), f(&self[1]), f(&self[2])])
    }

    /// Returns the three values only if all corners have one.
    pub fn transpose_option<T2>(
        &self,
        mut f: impl FnMut(&T) -> Option<T2>,
    ) -> Option<Triangle<T2>> {
        Some(Triangle([f(&self[0])?, f(&self[1])?, f(&self[2])?]))
    }
}

impl<T: Default> Default for Triangle<T> {
    fn default() -> Self {
        Triangle([Default::default(), Default::default(), Default::default()])
    }
}

impl<T> Index<usize> for Triangle<T> {
    type Output = T;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl<T> IndexMut<usize> for Triangle<T> {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.0[index]
    }
}

impl Triangle<WorldPoint> {
    /// Returns edge vectors, coming from self[0]
    pub fn edges(&self) -> [WorldVector; 2] {
        [self[1] - self[0], self[2] - self[0]]
    }

    /// Returns a normal vector of the triangle, not normalized.
    pub fn normal(&self) -> WorldVector {
        let [e1, e2] = self.edges();
        e1.cross(&e2)
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct BarycentricCoordinates {
    pub u: FloatType,
    pub v: FloatType,
}

impl BarycentricCoordinates {
    /// Blends the values with weights (1 - u - v, u, v)
    pub fn interpolate<T>(&self, a: &T, b: &T, c: &T) -> T
    where
        for<'a> &'a T: Mul<FloatType, Output = T>,
        T: Add<Output = T>,
    {
        let w = 1.0 - self.u - self.v;
        a * w + b * self.u + c * self.v
    }

    pub fn interpolate_triangle<T>(&self, triangle: &Triangle<T>) -> T
    where
        for<'a> &'a T: Mul<FloatType, Output = T>,
        T: Add<Output = T>,
    {
        self.interpolate(&triangle[0], &triangle[1], &triangle[2])
    }
}
