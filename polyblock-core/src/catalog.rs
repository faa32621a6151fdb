/// Named polycube shapes and random selection
use rand::Rng;

use crate::coord::CubeCoord;
use crate::error::{Error, Result};

/// One polycube shape. Never mutated once defined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PieceDefinition {
    pub name: String,
    pub cubes: Vec<CubeCoord>,
}

impl PieceDefinition {
    pub fn new(name: impl Into<String>, cubes: impl IntoIterator<Item = CubeCoord>) -> Self {
        Self {
            name: name.into(),
            cubes: cubes.into_iter().collect(),
        }
    }

    fn from_triples(name: &str, cubes: &[(i32, i32, i32)]) -> Self {
        Self::new(name, cubes.iter().copied().map(CubeCoord::from))
    }
}

// (x, z, h)
const BUILTIN: &[(&str, &[(i32, i32, i32)])] = &[
    ("I", &[(0, 0, 0), (1, 0, 0), (2, 0, 0), (3, 0, 0)]),
    ("O", &[(0, 0, 0), (1, 0, 0), (0, 1, 0), (1, 1, 0)]),
    ("T", &[(0, 0, 0), (1, 0, 0), (2, 0, 0), (1, 1, 0)]),
    ("S", &[(1, 0, 0), (2, 0, 0), (0, 1, 0), (1, 1, 0)]),
    ("Z", &[(0, 0, 0), (1, 0, 0), (1, 1, 0), (2, 1, 0)]),
    ("L", &[(0, 0, 0), (0, 1, 0), (0, 2, 0), (1, 2, 0)]),
    ("J", &[(1, 0, 0), (1, 1, 0), (1, 2, 0), (0, 2, 0)]),
    ("tower", &[(0, 0, 0), (1, 0, 0), (0, 0, 1), (1, 0, 1)]),
    ("stair", &[(0, 0, 0), (1, 0, 0), (1, 0, 1), (2, 0, 1)]),
    ("branch", &[(0, 0, 0), (1, 0, 0), (0, 1, 0), (0, 0, 1)]),
];

/// Fixed, non-empty set of pieces to pick from.
#[derive(Debug, Clone)]
pub struct Catalog {
    pieces: Vec<PieceDefinition>,
}

impl Catalog {
    /// Validates that the catalog and every piece in it are non-empty.
    pub fn new(pieces: Vec<PieceDefinition>) -> Result<Self> {
        if pieces.is_empty() {
            return Err(Error::EmptyCatalog);
        }
        if let Some(empty) = pieces.iter().find(|piece| piece.cubes.is_empty()) {
            return Err(Error::EmptyPiece {
                name: empty.name.clone(),
            });
        }
        Ok(Self { pieces })
    }

    /// The seven planar tetrominoes plus three multi-level shapes.
    pub fn builtin() -> Self {
        Self {
            pieces: BUILTIN
                .iter()
                .map(|(name, cubes)| PieceDefinition::from_triples(name, cubes))
                .collect(),
        }
    }

    /// Uniform random pick.
    pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> &PieceDefinition {
        &self.pieces[rng.gen_range(0..self.pieces.len())]
    }

    pub fn get(&self, name: &str) -> Option<&PieceDefinition> {
        self.pieces.iter().find(|piece| piece.name == name)
    }

    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PieceDefinition> {
        self.pieces.iter()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn test_builtin_is_valid() {
        let builtin = Catalog::builtin();
        let validated = Catalog::new(builtin.pieces.clone()).unwrap();
        assert_eq!(validated.len(), 10);
        for piece in builtin.iter() {
            let unique: HashSet<_> = piece.cubes.iter().collect();
            assert_eq!(unique.len(), piece.cubes.len(), "duplicate cube in {}", piece.name);
        }
    }

    #[test]
    fn test_rejects_empty_catalog() {
        assert_eq!(Catalog::new(Vec::new()).unwrap_err(), Error::EmptyCatalog);
    }

    #[test]
    fn test_rejects_empty_piece() {
        let pieces = vec![
            PieceDefinition::new("ok", [CubeCoord::flat(0, 0)]),
            PieceDefinition::new("hollow", Vec::new()),
        ];
        assert_eq!(
            Catalog::new(pieces).unwrap_err(),
            Error::EmptyPiece {
                name: "hollow".to_string()
            }
        );
    }

    #[test]
    fn test_choose_reaches_every_piece() {
        let catalog = Catalog::builtin();
        let mut rng = StdRng::seed_from_u64(7);
        let seen: HashSet<_> = (0..500)
            .map(|_| catalog.choose(&mut rng).name.clone())
            .collect();
        assert_eq!(seen.len(), catalog.len());
    }

    #[test]
    fn test_lookup_by_name() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.get("tower").map(|p| p.cubes.len()), Some(4));
        assert!(catalog.get("pentomino").is_none());
    }
}
