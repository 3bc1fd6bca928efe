//! Deterministic simulation module
//!
//! All physics lives here. This module must stay free of browser code:
//! - Seeded RNG only
//! - Stable iteration order (ball slot order, wall insertion order)
//! - Wall-clock time only feeds the cosmetic light source

pub mod ball;
pub mod geometry;
pub mod grid;
pub mod state;
pub mod tick;
pub mod wall;

pub use ball::{Ball, Color, Motion, PALETTE};
pub use geometry::{
    SegmentContact, closest_point_on_segment, distance, distance_to_segment, reflect_velocity,
    segment_circle_contact,
};
pub use grid::SpatialGrid;
pub use state::{PairPolicy, SimConfig, SimState};
pub use tick::{TickReport, tick};
pub use wall::{Wall, WallStore};
