/// Minimal scene graph: groups, primitives, transforms and bounds
use nalgebra::{Isometry3, Point3, Translation3, UnitQuaternion, Vector3};

use crate::coord::{Axis, Face};
use crate::geometry::Aabb;
use crate::style::Color;

/// What a primitive represents in the piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    EdgeBar,
    FacePanel(Face),
    Partition(Axis),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    /// Axis-aligned box centered on the node origin.
    Bar { size: Vector3<f32> },
    /// Flat quad in the local XY plane facing +Z.
    Panel { width: f32, height: f32 },
}

impl Shape {
    /// Local-space corner points.
    pub fn corners(&self) -> Vec<Point3<f32>> {
        match *self {
            Shape::Bar { size } => {
                let h = size / 2.0;
                let mut corners = Vec::with_capacity(8);
                for sx in [-1.0, 1.0] {
                    for sy in [-1.0, 1.0] {
                        for sz in [-1.0, 1.0] {
                            corners.push(Point3::new(sx * h.x, sy * h.y, sz * h.z));
                        }
                    }
                }
                corners
            }
            Shape::Panel { width, height } => {
                let (hw, hh) = (width / 2.0, height / 2.0);
                vec![
                    Point3::new(-hw, -hh, 0.0),
                    Point3::new(hw, -hh, 0.0),
                    Point3::new(hw, hh, 0.0),
                    Point3::new(-hw, hh, 0.0),
                ]
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Primitive {
    pub shape: Shape,
    pub role: Role,
    pub color: Color,
}

#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Group,
    Primitive(Primitive),
}

/// A node owns its children; detaching a node drops the whole subtree.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub name: String,
    pub kind: NodeKind,
    pub position: Vector3<f32>,
    pub rotation: UnitQuaternion<f32>,
    pub children: Vec<Node>,
}

impl Node {
    pub fn group(name: impl Into<String>) -> Self {
        Self::with_kind(name, NodeKind::Group)
    }

    pub fn primitive(name: impl Into<String>, primitive: Primitive) -> Self {
        Self::with_kind(name, NodeKind::Primitive(primitive))
    }

    fn with_kind(name: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            position: Vector3::zeros(),
            rotation: UnitQuaternion::identity(),
            children: Vec::new(),
        }
    }

    pub fn at(mut self, position: Vector3<f32>) -> Self {
        self.position = position;
        self
    }

    pub fn rotated(mut self, rotation: UnitQuaternion<f32>) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn set_position(&mut self, position: Vector3<f32>) {
        self.position = position;
    }

    pub fn set_rotation(&mut self, rotation: UnitQuaternion<f32>) {
        self.rotation = rotation;
    }

    /// Append `child` and return it in place.
    pub fn attach(&mut self, child: Node) -> &mut Node {
        self.children.push(child);
        let last = self.children.len() - 1;
        &mut self.children[last]
    }

    /// Remove the first direct child called `name`.
    pub fn detach(&mut self, name: &str) -> Option<Node> {
        let idx = self.children.iter().position(|child| child.name == name)?;
        Some(self.children.remove(idx))
    }

    pub fn child(&self, name: &str) -> Option<&Node> {
        self.children.iter().find(|child| child.name == name)
    }

    pub fn child_mut(&mut self, name: &str) -> Option<&mut Node> {
        self.children.iter_mut().find(|child| child.name == name)
    }

    pub fn local_transform(&self) -> Isometry3<f32> {
        Isometry3::from_parts(Translation3::from(self.position), self.rotation)
    }

    /// Visit every primitive in the subtree with its accumulated transform,
    /// starting from `parent` (this node's own transform is applied).
    pub fn visit_primitives<F>(&self, parent: &Isometry3<f32>, visit: &mut F)
    where
        F: FnMut(&Isometry3<f32>, &Primitive),
    {
        let world = parent * self.local_transform();
        if let NodeKind::Primitive(primitive) = &self.kind {
            visit(&world, primitive);
        }
        for child in &self.children {
            child.visit_primitives(&world, visit);
        }
    }

    /// Bounds of the subtree in the parent's frame, `None` if it holds no
    /// primitives.
    pub fn bounding_box(&self) -> Option<Aabb> {
        let mut bounds: Option<Aabb> = None;
        self.visit_primitives(&Isometry3::identity(), &mut |world, primitive| {
            for corner in primitive.shape.corners() {
                let p = world * corner;
                bounds = Some(match bounds {
                    Some(mut b) => {
                        b.expand(&p);
                        b
                    }
                    None => Aabb::point(p),
                });
            }
        });
        bounds
    }

    pub fn count_primitives<P>(&self, mut predicate: P) -> usize
    where
        P: FnMut(Role) -> bool,
    {
        let mut count = 0;
        self.visit_primitives(&Isometry3::identity(), &mut |_, primitive| {
            if predicate(primitive.role) {
                count += 1;
            }
        });
        count
    }
}

/// Top-level container read by the render loop.
#[derive(Debug, Clone)]
pub struct Scene {
    root: Node,
}

impl Scene {
    pub fn new() -> Self {
        Self {
            root: Node::group("scene"),
        }
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    pub fn attach(&mut self, node: Node) -> &mut Node {
        self.root.attach(node)
    }

    pub fn detach(&mut self, name: &str) -> Option<Node> {
        self.root.detach(name)
    }

    pub fn find(&self, name: &str) -> Option<&Node> {
        self.root.child(name)
    }

    pub fn find_mut(&mut self, name: &str) -> Option<&mut Node> {
        self.root.child_mut(name)
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}
