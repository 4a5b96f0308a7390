//! CPU-side geometry: vertices, indices, and named per-vertex attributes.
//!
//! Geometry lives on the CPU until a [`GpuMesh`](crate::mesh::GpuMesh) uploads it.
//! Besides the fixed [`Vertex3d`] layout, a geometry can carry extra scalar or
//! vector streams keyed by name (the custom material reads `offset` this way).
//!
//! # Box Layout
//!
//! [`Geometry::cube`] builds a box face by face in +X, −X, +Y, −Y, +Z, −Z order.
//! Every face is an independent `(segments + 1)²` vertex grid, so edges and
//! corners are duplicated per face and normals stay flat:
//!
//! | Segments | Vertices | Indices |
//! |----------|----------|---------|
//! | 1        | 24       | 36      |
//! | 2        | 54       | 144     |
//! | 4        | 150      | 576     |

use crate::mesh::Vertex3d;
use glam::Vec3;

/// A flat stream of per-vertex values, `item_size` floats per vertex.
#[derive(Clone, Debug, PartialEq)]
pub struct BufferAttribute {
    pub data: Vec<f32>,
    pub item_size: usize,
}

impl BufferAttribute {
    pub fn new(data: Vec<f32>, item_size: usize) -> Self {
        Self { data, item_size }
    }

    /// Number of vertices this attribute covers.
    pub fn count(&self) -> usize {
        if self.item_size == 0 {
            0
        } else {
            self.data.len() / self.item_size
        }
    }
}

/// Vertices, triangle indices, and any extra named attributes.
#[derive(Clone, Debug)]
pub struct Geometry {
    pub vertices: Vec<Vertex3d>,
    pub indices: Vec<u32>,
    attributes: Vec<(String, BufferAttribute)>,
}

impl Geometry {
    pub fn new(vertices: Vec<Vertex3d>, indices: Vec<u32>) -> Self {
        Self {
            vertices,
            indices,
            attributes: Vec::new(),
        }
    }

    /// Builds a `size`³ box centered at the origin with `segments` subdivisions
    /// along every axis.
    pub fn cube(size: f32, segments: u32) -> Self {
        Self::cuboid(Vec3::splat(size), [segments; 3])
    }

    /// Builds a box with independent extents and per-axis subdivisions.
    pub fn cuboid(size: Vec3, segments: [u32; 3]) -> Self {
        let [sx, sy, sz] = segments.map(|s| s.max(1));
        let mut builder = BoxBuilder::default();

        // (u, v, w, u_dir, v_dir, width, height, depth, grid_x, grid_y)
        builder.face(2, 1, 0, -1.0, -1.0, size.z, size.y, size.x, sz, sy);
        builder.face(2, 1, 0, 1.0, -1.0, size.z, size.y, -size.x, sz, sy);
        builder.face(0, 2, 1, 1.0, 1.0, size.x, size.z, size.y, sx, sz);
        builder.face(0, 2, 1, 1.0, -1.0, size.x, size.z, -size.y, sx, sz);
        builder.face(0, 1, 2, 1.0, -1.0, size.x, size.y, size.z, sx, sy);
        builder.face(0, 1, 2, -1.0, -1.0, size.x, size.y, -size.z, sx, sy);

        Self::new(builder.vertices, builder.indices)
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Attaches (or replaces) a named per-vertex attribute.
    pub fn set_attribute(&mut self, name: impl Into<String>, attribute: BufferAttribute) {
        let name = name.into();
        match self.attributes.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => *existing = attribute,
            None => self.attributes.push((name, attribute)),
        }
    }

    pub fn attribute(&self, name: &str) -> Option<&BufferAttribute> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, a)| a)
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.attribute(name).is_some()
    }
}

#[derive(Default)]
struct BoxBuilder {
    vertices: Vec<Vertex3d>,
    indices: Vec<u32>,
}

impl BoxBuilder {
    /// Emits one face as a grid in the (u, v) plane at `depth / 2` along w.
    #[allow(clippy::too_many_arguments)]
    fn face(
        &mut self,
        u: usize,
        v: usize,
        w: usize,
        u_dir: f32,
        v_dir: f32,
        width: f32,
        height: f32,
        depth: f32,
        grid_x: u32,
        grid_y: u32,
    ) {
        let segment_width = width / grid_x as f32;
        let segment_height = height / grid_y as f32;
        let half_width = width / 2.0;
        let half_height = height / 2.0;
        let half_depth = depth / 2.0;
        let row = grid_x + 1;
        let base = self.vertices.len() as u32;

        for iy in 0..=grid_y {
            let y = iy as f32 * segment_height - half_height;
            for ix in 0..=grid_x {
                let x = ix as f32 * segment_width - half_width;

                let mut position = [0.0; 3];
                position[u] = x * u_dir;
                position[v] = y * v_dir;
                position[w] = half_depth;

                let mut normal = [0.0; 3];
                normal[w] = if depth > 0.0 { 1.0 } else { -1.0 };

                let uv = [ix as f32 / grid_x as f32, 1.0 - iy as f32 / grid_y as f32];
                self.vertices.push(Vertex3d::new(position, normal, uv));
            }
        }

        for iy in 0..grid_y {
            for ix in 0..grid_x {
                let a = base + ix + row * iy;
                let b = base + ix + row * (iy + 1);
                let c = base + (ix + 1) + row * (iy + 1);
                let d = base + (ix + 1) + row * iy;
                self.indices.extend_from_slice(&[a, b, d, b, c, d]);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds(geom: &Geometry) -> (Vec3, Vec3) {
        geom.vertices.iter().fold(
            (Vec3::splat(f32::MAX), Vec3::splat(f32::MIN)),
            |(min, max), v| {
                let p = Vec3::from(v.position);
                (min.min(p), max.max(p))
            },
        )
    }

    #[test]
    fn subdivided_cube_counts() {
        let geom = Geometry::cube(3.0, 4);
        assert_eq!(geom.vertex_count(), 150);
        assert_eq!(geom.indices.len(), 576);
        assert!(geom.indices.iter().all(|&i| (i as usize) < geom.vertex_count()));
    }

    #[test]
    fn unit_subdivision_matches_plain_cube() {
        let geom = Geometry::cube(1.0, 1);
        assert_eq!(geom.vertex_count(), 24);
        assert_eq!(geom.indices.len(), 36);
    }

    #[test]
    fn cube_bounds_are_half_size() {
        let (min, max) = bounds(&Geometry::cube(3.0, 4));
        assert_eq!(min, Vec3::splat(-1.5));
        assert_eq!(max, Vec3::splat(1.5));
    }

    #[test]
    fn normals_point_out_of_each_face() {
        let geom = Geometry::cube(3.0, 4);
        for v in &geom.vertices {
            let n = Vec3::from(v.normal);
            let p = Vec3::from(v.position);
            assert!((n.length() - 1.0).abs() < 1e-6);
            // Face vertices sit on the plane their normal points away from.
            assert!((p.dot(n) - 1.5).abs() < 1e-5);
        }
    }

    #[test]
    fn triangles_wind_counter_clockwise_from_outside() {
        let geom = Geometry::cube(2.0, 2);
        for tri in geom.indices.chunks(3) {
            let [a, b, c] = [tri[0], tri[1], tri[2]].map(|i| &geom.vertices[i as usize]);
            let e1 = Vec3::from(b.position) - Vec3::from(a.position);
            let e2 = Vec3::from(c.position) - Vec3::from(a.position);
            let face_normal = e1.cross(e2);
            assert!(face_normal.dot(Vec3::from(a.normal)) > 0.0);
        }
    }

    #[test]
    fn attributes_are_named_and_replaceable() {
        let mut geom = Geometry::cube(1.0, 1);
        assert!(!geom.has_attribute("offset"));

        geom.set_attribute("offset", BufferAttribute::new(vec![0.5; 24], 1));
        assert_eq!(geom.attribute("offset").map(|a| a.count()), Some(24));

        geom.set_attribute("offset", BufferAttribute::new(vec![0.25; 24], 1));
        assert_eq!(geom.attribute("offset").map(|a| a.data[0]), Some(0.25));
        assert!(geom.attribute("missing").is_none());
    }
}
