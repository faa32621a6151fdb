use std::collections::HashSet;

use polyblock_core::block::EDGE_BAR_COUNT;
use polyblock_core::exposure::exposed_faces;
use polyblock_core::notation::parse_piece;
use polyblock_core::occupancy::OccupancyIndex;
use polyblock_core::partition::build_internal_walls;
use polyblock_core::{
    assemble_piece, Catalog, CubeCoord, Face, Mesh, Node, NodeKind, PieceDefinition, PieceStage,
    PieceStats, Primitive, Role, Style,
};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn arb_cubes() -> impl Strategy<Value = Vec<CubeCoord>> {
    prop::collection::vec((-3i32..3, -3i32..3, -1i32..3), 1..14)
        .prop_map(|v| v.into_iter().map(CubeCoord::from).collect())
}

fn arb_piece() -> impl Strategy<Value = PieceDefinition> {
    arb_cubes().prop_map(|cubes| PieceDefinition::new("random", cubes))
}

fn adjacent_pairs(cubes: &[CubeCoord]) -> usize {
    let unique: Vec<CubeCoord> = cubes.iter().copied().collect::<HashSet<_>>().into_iter().collect();
    let mut pairs = 0;
    for (i, a) in unique.iter().enumerate() {
        for b in &unique[i + 1..] {
            let dx = (a.x - b.x).abs();
            let dz = (a.z - b.z).abs();
            if a.h == b.h && dx + dz == 1 {
                pairs += 1;
            }
        }
    }
    pairs
}

fn block_panels(block: &Node) -> Vec<Face> {
    block
        .children
        .iter()
        .filter_map(|child| match &child.kind {
            NodeKind::Primitive(Primitive {
                role: Role::FacePanel(face),
                ..
            }) => Some(*face),
            _ => None,
        })
        .collect()
}

fn block_groups(piece: &Node) -> impl Iterator<Item = &Node> {
    piece.children.iter().filter(|c| c.kind == NodeKind::Group)
}

#[test]
fn domino_exposure_matches_reference() {
    let cubes = [CubeCoord::flat(0, 0), CubeCoord::flat(1, 0)];
    let index = OccupancyIndex::build(&cubes);

    let first: Vec<_> = exposed_faces(cubes[0], &index).iter().collect();
    assert_eq!(first, vec![Face::Front, Face::Back, Face::Left]);
    let second: Vec<_> = exposed_faces(cubes[1], &index).iter().collect();
    assert_eq!(second, vec![Face::Front, Face::Back, Face::Right]);
}

#[test]
fn catalog_pieces_are_open_top_and_bottom() {
    for def in Catalog::builtin().iter() {
        let piece = assemble_piece(def, &Style::default());
        let mesh = Mesh::from_node(&piece);
        for triangle in &mesh.triangles {
            let n = triangle.calculate_normal();
            let is_panel = triangle.color != Style::default().bar_color;
            if is_panel {
                assert!(n.y.abs() < 1e-4, "{} has a horizontal panel", def.name);
            }
        }
    }
}

#[test]
fn catalog_pieces_are_centered() {
    for def in Catalog::builtin().iter() {
        let piece = assemble_piece(def, &Style::default());
        let center = piece.bounding_box().unwrap().center();
        assert!(center.coords.norm() < 1e-4, "{} centered at {center:?}", def.name);
    }
}

#[test]
fn catalog_partition_counts() {
    let expected = [
        ("I", 3),
        ("O", 4),
        ("T", 3),
        ("S", 3),
        ("Z", 3),
        ("L", 3),
        ("J", 3),
        ("tower", 2),
        ("stair", 2),
        ("branch", 2),
    ];
    let catalog = Catalog::builtin();
    for (name, partitions) in expected {
        let def = catalog.get(name).unwrap();
        let stats = PieceStats::of(&assemble_piece(def, &Style::default()));
        assert_eq!(stats.partitions, partitions, "{name}");
        assert_eq!(stats.edge_bars, def.cubes.len() * EDGE_BAR_COUNT, "{name}");
    }
}

#[test]
fn pieces_at_the_grid_edge_do_not_wrap() {
    let def = parse_piece("edge: 2147483647,0 -2147483647,0 2147483647,2147483647").unwrap();
    let stats = PieceStats::of(&assemble_piece(&def, &Style::default()));
    assert_eq!(stats.cubes, 3);
    assert_eq!(stats.face_panels, 12);
    assert_eq!(stats.partitions, 0);

    let cubes = [CubeCoord::flat(i32::MAX, 0), CubeCoord::flat(i32::MIN, 0)];
    let index = OccupancyIndex::build(&cubes);
    let faces: usize = cubes.iter().map(|&c| exposed_faces(c, &index).len()).sum();
    assert_eq!(faces, 8);
    assert!(build_internal_walls(&cubes, &Style::default()).is_empty());
}

#[test]
fn repeated_generation_keeps_one_anchor() {
    let catalog = Catalog::builtin();
    let mut stage = PieceStage::default();
    let mut rng = StdRng::seed_from_u64(99);
    for n in 1..=25 {
        stage.generate_new_piece(&catalog, &mut rng);
        let root = stage.scene().root();
        assert_eq!(root.children.len(), 1, "after {n} generations");
        assert_eq!(root.children[0].children.len(), 1);
    }
}

proptest! {
    #[test]
    fn exposure_is_absence_of_same_height_neighbor(cubes in arb_cubes()) {
        let index = OccupancyIndex::build(&cubes);
        let occupied: HashSet<CubeCoord> = cubes.iter().copied().collect();
        for &cube in &cubes {
            let exposed = exposed_faces(cube, &index);
            for face in Face::ALL {
                let (dx, dz) = face.neighbor_offset();
                let covered = cube.offset(dx, dz, 0).is_some_and(|n| occupied.contains(&n));
                prop_assert_eq!(exposed.contains(face), !covered);
            }
        }
    }

    #[test]
    fn every_block_has_twelve_bars_and_matching_panels(def in arb_piece()) {
        let index = OccupancyIndex::build(&def.cubes);
        let piece = assemble_piece(&def, &Style::default());
        let blocks: Vec<&Node> = block_groups(&piece).collect();
        prop_assert_eq!(blocks.len(), def.cubes.len());
        for (block, &cube) in blocks.iter().zip(&def.cubes) {
            prop_assert_eq!(block.count_primitives(|r| r == Role::EdgeBar), EDGE_BAR_COUNT);
            let expected: Vec<Face> = exposed_faces(cube, &index).iter().collect();
            prop_assert_eq!(block_panels(block), expected);
        }
    }

    #[test]
    fn partitions_match_adjacent_pairs(cubes in arb_cubes()) {
        let walls = build_internal_walls(&cubes, &Style::default());
        prop_assert_eq!(walls.len(), adjacent_pairs(&cubes));
    }

    #[test]
    fn assembled_piece_is_centered(def in arb_piece()) {
        let piece = assemble_piece(&def, &Style::default());
        let center = piece.bounding_box().unwrap().center();
        prop_assert!(center.coords.norm() < 1e-4);
    }

    #[test]
    fn assembly_is_deterministic(def in arb_piece()) {
        let style = Style::default();
        let a = assemble_piece(&def, &style);
        let b = assemble_piece(&def, &style);
        prop_assert_eq!(PieceStats::of(&a), PieceStats::of(&b));
        prop_assert_eq!(a.bounding_box(), b.bounding_box());
        prop_assert!(a == b);
    }
}
