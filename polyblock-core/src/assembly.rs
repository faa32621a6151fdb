/// Piece assembly and the single "current piece" stage
use nalgebra::UnitQuaternion;
use rand::Rng;

use crate::block::build_block;
use crate::catalog::{Catalog, PieceDefinition};
use crate::exposure::exposed_faces;
use crate::occupancy::OccupancyIndex;
use crate::partition::build_internal_walls;
use crate::scene::{Node, NodeKind, Role, Scene};
use crate::style::Style;

pub const ANCHOR_NAME: &str = "piece-anchor";

/// Build the boundary geometry of `piece`, translated so its bounding box
/// is centered on the origin. Pure and deterministic.
pub fn assemble_piece(piece: &PieceDefinition, style: &Style) -> Node {
    let index = OccupancyIndex::build(&piece.cubes);
    let mut group = Node::group(piece.name.clone());

    for &cube in &piece.cubes {
        let exposed = exposed_faces(cube, &index);
        log::debug!("cube {cube} exposes {} faces", exposed.len());
        let mut block = build_block(exposed, style).at(cube.center());
        block.name = format!("block {cube}");
        group.attach(block);
    }

    for wall in build_internal_walls(&piece.cubes, style) {
        group.attach(wall);
    }

    if let Some(bounds) = group.bounding_box() {
        group.set_position(-bounds.center().coords);
    }
    group
}

/// Summary of an assembled piece, for logging and status lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieceStats {
    pub cubes: usize,
    pub edge_bars: usize,
    pub face_panels: usize,
    pub partitions: usize,
}

impl PieceStats {
    pub fn of(piece: &Node) -> Self {
        Self {
            cubes: piece
                .children
                .iter()
                .filter(|c| c.kind == NodeKind::Group)
                .count(),
            edge_bars: piece.count_primitives(|r| r == Role::EdgeBar),
            face_panels: piece.count_primitives(|r| matches!(r, Role::FacePanel(_))),
            partitions: piece.count_primitives(|r| matches!(r, Role::Partition(_))),
        }
    }
}

/// Owns the scene and the current piece/anchor pair.
///
/// Only `show_piece` (and `generate_new_piece` through it) replaces the
/// piece; everything else may only read it or change the anchor's
/// orientation. Each replacement is a whole-subtree swap.
#[derive(Debug, Clone)]
pub struct PieceStage {
    scene: Scene,
    style: Style,
    piece_name: Option<String>,
    generation: u64,
}

impl PieceStage {
    pub fn new(style: Style) -> Self {
        Self {
            scene: Scene::new(),
            style,
            piece_name: None,
            generation: 0,
        }
    }

    /// Pick a piece at random and show it.
    pub fn generate_new_piece<R: Rng + ?Sized>(&mut self, catalog: &Catalog, rng: &mut R) -> &Node {
        let piece = catalog.choose(rng);
        self.show_piece(piece)
    }

    /// Replace the current piece with `piece`, mounted under a fresh anchor.
    pub fn show_piece(&mut self, piece: &PieceDefinition) -> &Node {
        let assembled = assemble_piece(piece, &self.style);
        let stats = PieceStats::of(&assembled);

        while self.scene.detach(ANCHOR_NAME).is_some() {}
        self.piece_name = Some(piece.name.clone());
        self.generation += 1;

        log::info!(
            "piece #{} `{}`: {} cubes, {} face panels, {} partitions",
            self.generation,
            piece.name,
            stats.cubes,
            stats.face_panels,
            stats.partitions
        );

        let mut anchor = Node::group(ANCHOR_NAME);
        anchor.attach(assembled);
        self.scene.attach(anchor)
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn anchor(&self) -> Option<&Node> {
        self.scene.find(ANCHOR_NAME)
    }

    pub fn anchor_mut(&mut self) -> Option<&mut Node> {
        self.scene.find_mut(ANCHOR_NAME)
    }

    /// The centered piece group under the anchor.
    pub fn piece(&self) -> Option<&Node> {
        self.anchor()?.children.first()
    }

    pub fn set_orientation(&mut self, rotation: UnitQuaternion<f32>) {
        if let Some(anchor) = self.anchor_mut() {
            anchor.set_rotation(rotation);
        }
    }

    pub fn current_piece_name(&self) -> Option<&str> {
        self.piece_name.as_deref()
    }

    /// Number of pieces shown so far.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

impl Default for PieceStage {
    fn default() -> Self {
        Self::new(Style::default())
    }
}
