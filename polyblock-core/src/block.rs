/// Boundary geometry for one unit cube: 12 edge bars plus exposed-side panels
use std::f32::consts::{FRAC_PI_2, PI};

use nalgebra::{UnitQuaternion, Vector3};

use crate::coord::{Face, FaceSet};
use crate::scene::{Node, Primitive, Role, Shape};
use crate::style::Style;

/// Gap between a face panel and the cube surface, keeps the panel from
/// z-fighting with the bars.
pub const PANEL_EPSILON: f32 = 0.002;

pub const EDGE_BAR_COUNT: usize = 12;

/// Position offset and rotation about the vertical axis turning a +Z facing
/// panel outwards on `face`.
pub fn face_placement(face: Face) -> (Vector3<f32>, f32) {
    let d = 0.5 + PANEL_EPSILON;
    match face {
        Face::Front => (Vector3::new(0.0, 0.0, d), 0.0),
        Face::Back => (Vector3::new(0.0, 0.0, -d), PI),
        Face::Left => (Vector3::new(-d, 0.0, 0.0), -FRAC_PI_2),
        Face::Right => (Vector3::new(d, 0.0, 0.0), FRAC_PI_2),
    }
}

fn edge_bars(thickness: f32) -> [(Vector3<f32>, Vector3<f32>); EDGE_BAR_COUNT] {
    let t = thickness;
    let len = 1.0 + t;
    let along_x = Vector3::new(len, t, t);
    let along_y = Vector3::new(t, 1.0, t);
    let along_z = Vector3::new(t, t, len);
    [
        // bottom ring
        (Vector3::new(0.0, -0.5, 0.5), along_x),
        (Vector3::new(0.0, -0.5, -0.5), along_x),
        (Vector3::new(-0.5, -0.5, 0.0), along_z),
        (Vector3::new(0.5, -0.5, 0.0), along_z),
        // top ring
        (Vector3::new(0.0, 0.5, 0.5), along_x),
        (Vector3::new(0.0, 0.5, -0.5), along_x),
        (Vector3::new(-0.5, 0.5, 0.0), along_z),
        (Vector3::new(0.5, 0.5, 0.0), along_z),
        // uprights
        (Vector3::new(-0.5, 0.0, -0.5), along_y),
        (Vector3::new(0.5, 0.0, -0.5), along_y),
        (Vector3::new(-0.5, 0.0, 0.5), along_y),
        (Vector3::new(0.5, 0.0, 0.5), along_y),
    ]
}

/// Build the cube-local group for one cube. The result is centered on the
/// cube center; the caller positions it.
pub fn build_block(exposed: FaceSet, style: &Style) -> Node {
    let mut block = Node::group("block");

    for (position, size) in edge_bars(style.bar_thickness) {
        let bar = Primitive {
            shape: Shape::Bar { size },
            role: Role::EdgeBar,
            color: style.bar_color,
        };
        block.attach(Node::primitive("edge-bar", bar).at(position));
    }

    for face in exposed.iter() {
        let (offset, yaw) = face_placement(face);
        let panel = Primitive {
            shape: Shape::Panel {
                width: 1.0,
                height: 1.0,
            },
            role: Role::FacePanel(face),
            color: style.panel_color,
        };
        block.attach(
            Node::primitive(format!("panel-{}", face.name()), panel)
                .at(offset)
                .rotated(UnitQuaternion::from_axis_angle(&Vector3::y_axis(), yaw)),
        );
    }

    block
}
