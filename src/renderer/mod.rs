//! WebGPU rendering module
//!
//! The scene is built as flat-colored triangles in canvas pixel space, then
//! mapped to NDC and drawn with a single pipeline.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use vertex::Vertex;
