/// Integer cube coordinates and lateral face bookkeeping
use nalgebra::Vector3;
use std::fmt;

/// Position of a unit cube inside a piece.
///
/// `x` is the lateral offset, `z` the depth offset and `h` the vertical
/// level (0 = table level). In world space `h` maps onto the y axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CubeCoord {
    pub x: i32,
    pub z: i32,
    pub h: i32,
}

impl CubeCoord {
    pub const fn new(x: i32, z: i32, h: i32) -> Self {
        Self { x, z, h }
    }

    /// A cube at table level.
    pub const fn flat(x: i32, z: i32) -> Self {
        Self { x, z, h: 0 }
    }

    /// The cube `(dx, dz, dh)` away, or `None` past the edge of the `i32`
    /// grid. Nothing can occupy such a cell.
    pub fn offset(self, dx: i32, dz: i32, dh: i32) -> Option<Self> {
        Some(Self {
            x: self.x.checked_add(dx)?,
            z: self.z.checked_add(dz)?,
            h: self.h.checked_add(dh)?,
        })
    }

    /// Center of the unit cube in piece-local world space (y up).
    pub fn center(self) -> Vector3<f32> {
        Vector3::new(self.x as f32, self.h as f32, self.z as f32)
    }
}

impl From<(i32, i32, i32)> for CubeCoord {
    fn from((x, z, h): (i32, i32, i32)) -> Self {
        Self::new(x, z, h)
    }
}

impl From<[i32; 3]> for CubeCoord {
    fn from([x, z, h]: [i32; 3]) -> Self {
        Self::new(x, z, h)
    }
}

impl fmt::Display for CubeCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.z, self.h)
    }
}

/// One of the four lateral faces of a cube. Top and bottom are deliberately
/// absent: pieces are always open above and below.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Face {
    Front,
    Back,
    Left,
    Right,
}

impl Face {
    pub const ALL: [Face; 4] = [Face::Front, Face::Back, Face::Left, Face::Right];

    /// `(dx, dz)` step towards the neighbor sharing this face.
    pub const fn neighbor_offset(self) -> (i32, i32) {
        match self {
            Face::Front => (0, 1),
            Face::Back => (0, -1),
            Face::Left => (-1, 0),
            Face::Right => (1, 0),
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Face::Front => "front",
            Face::Back => "back",
            Face::Left => "left",
            Face::Right => "right",
        }
    }

    const fn bit(self) -> u8 {
        match self {
            Face::Front => 1,
            Face::Back => 1 << 1,
            Face::Left => 1 << 2,
            Face::Right => 1 << 3,
        }
    }
}

impl fmt::Display for Face {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Set of exposed lateral faces for a single cube.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct FaceSet(u8);

impl FaceSet {
    pub const fn empty() -> Self {
        Self(0)
    }

    pub const fn all() -> Self {
        Self(0b1111)
    }

    pub fn insert(&mut self, face: Face) {
        self.0 |= face.bit();
    }

    pub fn contains(self, face: Face) -> bool {
        self.0 & face.bit() != 0
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Faces in the fixed order front, back, left, right.
    pub fn iter(self) -> impl Iterator<Item = Face> {
        Face::ALL.into_iter().filter(move |face| self.contains(*face))
    }
}

impl FromIterator<Face> for FaceSet {
    fn from_iter<I: IntoIterator<Item = Face>>(iter: I) -> Self {
        let mut set = FaceSet::empty();
        for face in iter {
            set.insert(face);
        }
        set
    }
}

/// Axis along which two same-height cubes touch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Z,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_face_set_membership() {
        let mut set = FaceSet::empty();
        assert!(set.is_empty());
        set.insert(Face::Left);
        set.insert(Face::Left);
        set.insert(Face::Front);
        assert_eq!(set.len(), 2);
        assert!(set.contains(Face::Front));
        assert!(!set.contains(Face::Right));
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![Face::Front, Face::Left]);
    }

    #[test]
    fn test_opposite_offsets_cancel() {
        let (fx, fz) = Face::Front.neighbor_offset();
        let (bx, bz) = Face::Back.neighbor_offset();
        assert_eq!((fx + bx, fz + bz), (0, 0));
        let (lx, lz) = Face::Left.neighbor_offset();
        let (rx, rz) = Face::Right.neighbor_offset();
        assert_eq!((lx + rx, lz + rz), (0, 0));
    }

    #[test]
    fn test_offset_stops_at_grid_edge() {
        let edge = CubeCoord::new(i32::MAX, i32::MIN, 0);
        assert_eq!(edge.offset(1, 0, 0), None);
        assert_eq!(edge.offset(0, -1, 0), None);
        assert_eq!(edge.offset(-1, 1, 0), Some(CubeCoord::new(i32::MAX - 1, i32::MIN + 1, 0)));
    }

    #[test]
    fn test_center_maps_height_to_y() {
        let c = CubeCoord::new(2, -1, 3).center();
        assert_eq!(c, Vector3::new(2.0, 3.0, -1.0));
    }
}
