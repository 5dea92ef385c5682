use crate::{
    geometry::{
        self, Aabb, FaceCulling, HitRecord, Ray, TexturePoint, Transform, WorldPoint, WorldVector,
    },
    scene::Primitive,
};

/// Triangle corner. All attributes besides the coordinate are optional.
#[derive(Clone, Debug, PartialEq, bon::Builder)]
pub struct Vertex {
    pub coord: WorldPoint,
    pub normal: Option<WorldVector>,
    pub tangent: Option<WorldVector>,
    pub bitangent: Option<WorldVector>,
    pub uv: Option<TexturePoint>,
}

#[derive(Clone, Debug)]
pub struct Triangle {
    vertices: geometry::Triangle<Vertex>,
    culling: FaceCulling,
    /// Positioned at the center of the bounding box.
    /// The intersection works directly with the vertex coordinates and ignores it.
    transform: Transform,
    bounding_box: Aabb,
}

impl Triangle {
    /// Creates a triangle with back face culling.
    pub fn new(a: Vertex, b: Vertex, c: Vertex) -> Triangle {
        let vertices = geometry::Triangle::new(a, b, c);
        let bounding_box = Aabb::from_points(vertices.iter().map(|v| v.coord))
            .expect("Triangle always has three vertices");
        let transform = Transform::builder()
            .position(bounding_box.center.coords)
            .build();

        Triangle {
            vertices,
            culling: FaceCulling::default(),
            transform,
            bounding_box,
        }
    }

    pub fn with_culling(self, culling: FaceCulling) -> Triangle {
        Triangle { culling, ..self }
    }

    pub fn vertices(&self) -> &geometry::Triangle<Vertex> {
        &self.vertices
    }

    pub fn culling(&self) -> FaceCulling {
        self.culling
    }

    /// Only the transform moves, the vertices stay where they are.
    pub fn transform_mut(&mut self) -> &mut Transform {
        &mut self.transform
    }

    /// Face normal following the vertex winding, not normalized.
    /// Hits never fall back to it, they only use vertex normals.
    pub fn geometric_normal(&self) -> WorldVector {
        self.coords().normal()
    }

    fn coords(&self) -> geometry::Triangle<WorldPoint> {
        self.vertices.map(|v| v.coord)
    }
}

impl Primitive for Triangle {
    fn transform(&self) -> &Transform {
        &self.transform
    }

    fn bounding_box(&self) -> &Aabb {
        &self.bounding_box
    }

    fn intersect(&self, ray: &Ray) -> Option<HitRecord> {
        let (distance, uv) = self.coords().intersect(ray, self.culling)?;

        // Missing normals count as zero, the result is not renormalized
        let normals = self
            .vertices
            .map(|v| v.normal.unwrap_or_else(WorldVector::zeros));
        let normal = uv.interpolate_triangle(&normals);

        let texture_coordinates = self
            .vertices
            .transpose_option(|v| v.uv.map(|p| p.coords))
            .map(|tex| TexturePoint::from(uv.interpolate_triangle(&tex)));
        let tangent = self
            .vertices
            .transpose_option(|v| v.tangent)
            .map(|tangents| uv.interpolate_triangle(&tangents));

        Some(HitRecord {
            distance,
            point: ray.point_at(distance),
            normal,
            texture_coordinates,
            tangent,
        })
    }
}
