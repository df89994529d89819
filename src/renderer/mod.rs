//! Rendering module
//!
//! `shapes` builds a frame as plain data; `canvas` draws it with the browser's
//! Canvas 2D API.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod shapes;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasRenderer;
pub use shapes::{SceneOptions, Shape, scene};
