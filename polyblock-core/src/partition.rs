/// Divider panels between same-height neighbours
use std::f32::consts::FRAC_PI_2;

use nalgebra::{UnitQuaternion, Vector3};

use crate::coord::{Axis, CubeCoord};
use crate::occupancy::OccupancyIndex;
use crate::scene::{Node, Primitive, Role, Shape};
use crate::style::Style;

/// One panel per unordered pair of cubes touching along x or z.
///
/// Only the +x and +z neighbours of each cube are checked, so every pair is
/// seen exactly once. Vertically stacked cubes get no divider.
pub fn build_internal_walls(coords: &[CubeCoord], style: &Style) -> Vec<Node> {
    let index = OccupancyIndex::build(coords);
    let mut walls = Vec::new();

    // duplicates in `coords` must not double up walls
    let mut seen = std::collections::HashSet::with_capacity(coords.len());
    for &cube in coords.iter().filter(|c| seen.insert(**c)) {
        for (axis, neighbor) in [(Axis::X, cube.offset(1, 0, 0)), (Axis::Z, cube.offset(0, 1, 0))] {
            if let Some(neighbor) = neighbor.filter(|n| index.contains_coord(*n)) {
                walls.push(partition_panel(cube, neighbor, axis, style));
            }
        }
    }

    log::debug!("{} internal partitions for {} cubes", walls.len(), index.len());
    walls
}

fn partition_panel(a: CubeCoord, b: CubeCoord, axis: Axis, style: &Style) -> Node {
    let midpoint = (a.center() + b.center()) / 2.0;
    let rotation = match axis {
        Axis::X => UnitQuaternion::from_axis_angle(&Vector3::y_axis(), FRAC_PI_2),
        Axis::Z => UnitQuaternion::identity(),
    };
    let panel = Primitive {
        shape: Shape::Panel {
            width: 1.0,
            height: 1.0,
        },
        role: Role::Partition(axis),
        color: style.partition_color,
    };
    Node::primitive(format!("partition {a}-{b}"), panel)
        .at(midpoint)
        .rotated(rotation)
}
