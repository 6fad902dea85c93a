//! WebGPU rendering module
//!
//! Scenes are built as flat-colored triangles in playfield pixels, then
//! mapped to clip space and drawn in a single pass.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod text;
pub mod vertex;

pub use pipeline::RenderState;
pub use scene::{Frame, SceneBuilder};
pub use vertex::Vertex;
