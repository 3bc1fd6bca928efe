//! Canvas 2D rendering module
//!
//! Pure presentation: reads simulation snapshots, never mutates them.

pub mod canvas;

pub use canvas::CanvasRenderer;
