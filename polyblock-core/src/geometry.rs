/// Triangle meshes tessellated from the scene graph
use nalgebra::{Isometry3, Point3, Vector3};

use crate::scene::{Node, Primitive, Shape};
use crate::style::Color;

/// A 3D vertex with position and normal
#[derive(Debug, Clone, Copy)]
pub struct Vertex {
    pub position: Point3<f32>,
    pub normal: Vector3<f32>,
}

impl Vertex {
    pub fn new(position: Point3<f32>, normal: Vector3<f32>) -> Self {
        Self { position, normal }
    }
}

/// A flat-colored triangle
#[derive(Debug, Clone)]
pub struct Triangle {
    pub vertices: [Vertex; 3],
    pub color: Color,
}

impl Triangle {
    pub fn new(v0: Vertex, v1: Vertex, v2: Vertex, color: Color) -> Self {
        Self {
            vertices: [v0, v1, v2],
            color,
        }
    }

    /// Calculate the face normal from the triangle's vertices
    pub fn calculate_normal(&self) -> Vector3<f32> {
        let v0 = self.vertices[0].position;
        let v1 = self.vertices[1].position;
        let v2 = self.vertices[2].position;

        let edge1 = v1 - v0;
        let edge2 = v2 - v0;

        edge1.cross(&edge2).normalize()
    }
}

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Point3<f32>,
    pub max: Point3<f32>,
}

impl Aabb {
    pub fn point(p: Point3<f32>) -> Self {
        Self { min: p, max: p }
    }

    pub fn expand(&mut self, p: &Point3<f32>) {
        self.min = self.min.inf(p);
        self.max = self.max.sup(p);
    }

    pub fn center(&self) -> Point3<f32> {
        nalgebra::center(&self.min, &self.max)
    }

    pub fn extent(&self) -> Vector3<f32> {
        self.max - self.min
    }
}

/// A 3D mesh composed of triangles
#[derive(Debug, Clone)]
pub struct Mesh {
    pub triangles: Vec<Triangle>,
}

impl Mesh {
    pub fn new() -> Self {
        Self {
            triangles: Vec::new(),
        }
    }

    pub fn add_triangle(&mut self, triangle: Triangle) {
        self.triangles.push(triangle);
    }

    /// Tessellate every primitive below `node` into world-space triangles.
    /// Bars give 12 triangles each, panels 4 (both sides).
    pub fn from_node(node: &Node) -> Self {
        let mut mesh = Self::new();
        node.visit_primitives(&Isometry3::identity(), &mut |world, primitive| {
            mesh.add_primitive(world, primitive);
        });
        mesh
    }

    fn add_primitive(&mut self, world: &Isometry3<f32>, primitive: &Primitive) {
        match primitive.shape {
            Shape::Bar { size } => {
                let half = size / 2.0;
                for axis in 0..3 {
                    for sign in [1.0f32, -1.0] {
                        let mut u = (axis + 1) % 3;
                        let mut v = (axis + 2) % 3;
                        if sign < 0.0 {
                            std::mem::swap(&mut u, &mut v);
                        }
                        let normal = Vector3::ith(axis, sign);
                        let center = normal * half[axis];
                        let du = Vector3::ith(u, half[u]);
                        let dv = Vector3::ith(v, half[v]);
                        let quad = [
                            Point3::from(center - du - dv),
                            Point3::from(center + du - dv),
                            Point3::from(center + du + dv),
                            Point3::from(center - du + dv),
                        ];
                        self.add_quad(world, quad, normal, primitive.color);
                    }
                }
            }
            Shape::Panel { .. } => {
                let corners = primitive.shape.corners();
                let front = [corners[0], corners[1], corners[2], corners[3]];
                let back = [corners[3], corners[2], corners[1], corners[0]];
                self.add_quad(world, front, Vector3::z(), primitive.color);
                self.add_quad(world, back, -Vector3::z(), primitive.color);
            }
        }
    }

    fn add_quad(
        &mut self,
        world: &Isometry3<f32>,
        quad: [Point3<f32>; 4],
        normal: Vector3<f32>,
        color: Color,
    ) {
        let n = world.rotation * normal;
        let [a, b, c, d] = quad.map(|p| Vertex::new(world * p, n));
        self.add_triangle(Triangle::new(a, b, c, color));
        self.add_triangle(Triangle::new(a, c, d, color));
    }

    pub fn bounds(&self) -> Option<Aabb> {
        let mut points = self
            .triangles
            .iter()
            .flat_map(|t| t.vertices.iter().map(|v| v.position));
        let mut bounds = Aabb::point(points.next()?);
        for p in points {
            bounds.expand(&p);
        }
        Some(bounds)
    }
}

impl Default for Mesh {
    fn default() -> Self {
        Self::new()
    }
}
