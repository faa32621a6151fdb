/// Polyblock Core Library - polycube boundary geometry
///
/// Turns a set of integer cube coordinates into an open-topped wireframe
/// and panel solid: edge bars on every cube, panels on exposed lateral
/// faces, dividers between touching cubes. Also carries the scene graph,
/// rotation control and projection shared by the front ends.

pub mod assembly;
pub mod block;
pub mod catalog;
pub mod coord;
pub mod error;
pub mod exposure;
pub mod geometry;
pub mod notation;
pub mod occupancy;
pub mod partition;
pub mod projection;
pub mod scene;
pub mod style;
pub mod transform;

// Re-export commonly used types
pub use assembly::{assemble_piece, PieceStage, PieceStats};
pub use catalog::{Catalog, PieceDefinition};
pub use coord::{Axis, CubeCoord, Face, FaceSet};
pub use error::{Error, Result};
pub use geometry::{Aabb, Mesh, Triangle, Vertex};
pub use projection::{Camera, ProjectionMode};
pub use scene::{Node, NodeKind, Primitive, Role, Scene, Shape};
pub use style::{Color, Style};
pub use transform::{RotationState, SpinController, SpinSettings, Transform};
