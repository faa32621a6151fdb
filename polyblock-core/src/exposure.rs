/// Lateral face exposure for a single cube
use crate::coord::{CubeCoord, Face, FaceSet};
use crate::occupancy::OccupancyIndex;

/// A lateral face is exposed iff no cube sits next to it at the same height.
/// Top and bottom are never tested.
pub fn exposed_faces(cube: CubeCoord, index: &OccupancyIndex) -> FaceSet {
    Face::ALL
        .into_iter()
        .filter(|face| {
            let (dx, dz) = face.neighbor_offset();
            !cube
                .offset(dx, dz, 0)
                .is_some_and(|neighbor| index.contains_coord(neighbor))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domino_exposure() {
        let coords = [CubeCoord::flat(0, 0), CubeCoord::flat(1, 0)];
        let index = OccupancyIndex::build(&coords);

        let left = exposed_faces(coords[0], &index);
        assert_eq!(left, FaceSet::from_iter([Face::Front, Face::Back, Face::Left]));

        let right = exposed_faces(coords[1], &index);
        assert_eq!(right, FaceSet::from_iter([Face::Front, Face::Back, Face::Right]));
    }

    #[test]
    fn test_lone_cube_exposes_all_sides() {
        let coords = [CubeCoord::new(-4, 9, 2)];
        let index = OccupancyIndex::build(&coords);
        assert_eq!(exposed_faces(coords[0], &index), FaceSet::all());
    }

    #[test]
    fn test_vertical_neighbor_does_not_cover() {
        let coords = [CubeCoord::new(0, 0, 0), CubeCoord::new(0, 0, 1)];
        let index = OccupancyIndex::build(&coords);
        assert_eq!(exposed_faces(coords[0], &index), FaceSet::all());
        assert_eq!(exposed_faces(coords[1], &index), FaceSet::all());
    }

    #[test]
    fn test_surrounded_cube() {
        let center = CubeCoord::flat(0, 0);
        let coords = [
            center,
            CubeCoord::flat(1, 0),
            CubeCoord::flat(-1, 0),
            CubeCoord::flat(0, 1),
            CubeCoord::flat(0, -1),
        ];
        let index = OccupancyIndex::build(&coords);
        assert!(exposed_faces(center, &index).is_empty());
    }

    #[test]
    fn test_grid_edges_do_not_wrap() {
        let coords = [CubeCoord::flat(i32::MAX, 0), CubeCoord::flat(i32::MIN, 0)];
        let index = OccupancyIndex::build(&coords);
        assert_eq!(exposed_faces(coords[0], &index), FaceSet::all());
        assert_eq!(exposed_faces(coords[1], &index), FaceSet::all());

        let pair = [CubeCoord::flat(i32::MAX - 1, 0), CubeCoord::flat(i32::MAX, 0)];
        let index = OccupancyIndex::build(&pair);
        assert_eq!(
            exposed_faces(pair[1], &index),
            FaceSet::from_iter([Face::Front, Face::Back, Face::Right])
        );
    }
}
