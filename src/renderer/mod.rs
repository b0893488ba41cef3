//! Rendering module
//!
//! The frame painter speaks a small canvas vocabulary; the tessellator turns
//! it into triangles and the WebGPU pipeline puts them on screen.

pub mod canvas;
pub mod draw;
pub mod pipeline;
pub mod shapes;
pub mod tessellator;
pub mod vertex;

pub use canvas::{Canvas, Path, PathSegment};
pub use draw::draw_frame;
pub use pipeline::RenderState;
pub use tessellator::Tessellator;
pub use vertex::Vertex;
