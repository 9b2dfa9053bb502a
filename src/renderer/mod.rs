//! WebGPU rendering module
//!
//! Scene geometry is built on the CPU in viewport space (`shapes`) and drawn
//! as a single flat-shaded triangle list (`pipeline`).

pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use shapes::scene;
pub use vertex::{Vertex, colors};
