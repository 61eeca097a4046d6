//! Rendering module
//!
//! The world is turned into an ordered draw list (`scene`), tessellated into
//! colored triangles and drawn with a single WebGPU pipeline.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod sprite;
pub mod vertex;

pub use pipeline::RenderState;
pub use scene::{Layer, Scene};
pub use sprite::{SKATER, Sprite, SpriteError};
