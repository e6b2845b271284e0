//! WebGPU rendering module
//!
//! `scene` builds a triangle list from the game state each frame;
//! `pipeline` uploads and draws it. Rendering never mutates the simulation.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::{RenderState, playfield_to_ndc};
pub use scene::build_scene;
pub use vertex::Vertex;
