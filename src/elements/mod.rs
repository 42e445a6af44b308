//! Laminate building blocks

mod material;
mod ply;

pub use material::{MaterialProperties, DEGENERACY_TOLERANCE};
pub use ply::{ply_coordinates, Ply, PlyCoordinates};
