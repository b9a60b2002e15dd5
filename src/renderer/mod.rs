//! WebGPU rendering module
//!
//! Builds flat-colored triangles from a `MatchSnapshot` and draws them.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::{RenderError, RenderState, playfield_to_ndc};
pub use vertex::Vertex;
