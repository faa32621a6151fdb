/// Constant-time "is there a cube here?" lookups
use std::collections::HashSet;

use crate::coord::CubeCoord;

/// One entry per distinct coordinate of a piece.
#[derive(Debug, Clone, Default)]
pub struct OccupancyIndex {
    cells: HashSet<CubeCoord>,
}

impl OccupancyIndex {
    /// Duplicate coordinates collapse into a single entry.
    pub fn build<'a>(coords: impl IntoIterator<Item = &'a CubeCoord>) -> Self {
        Self {
            cells: coords.into_iter().copied().collect(),
        }
    }

    pub fn contains(&self, x: i32, z: i32, h: i32) -> bool {
        self.cells.contains(&CubeCoord::new(x, z, h))
    }

    pub fn contains_coord(&self, coord: CubeCoord) -> bool {
        self.cells.contains(&coord)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}
