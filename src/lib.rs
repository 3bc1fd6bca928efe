//! Bouncefield - a thousand balls bouncing on a canvas
//!
//! Core modules:
//! - `sim`: Deterministic simulation (motion, collisions, walls, spatial grid)
//! - `settings`: Persisted user preferences (speed, size, gravity)
//! - `ui`: Host-side tool mode and pointer drag tracking
//! - `renderer`: Canvas 2D drawing (wasm32 only)

pub mod settings;
pub mod sim;
pub mod ui;

#[cfg(target_arch = "wasm32")]
pub mod renderer;

pub use settings::Settings;
pub use sim::{SimConfig, SimState, TickReport};

/// Simulation tuning constants
pub mod consts {
    /// Number of balls in the pool (fixed for the lifetime of a simulation)
    pub const BALL_COUNT: usize = 1000;

    /// Default square canvas side before the host measures the window
    pub const DEFAULT_CANVAS_SIZE: f32 = 800.0;
    /// Canvas side as a fraction of the smaller window dimension
    pub const CANVAS_FRACTION: f32 = 0.8;

    /// Ball base radius range [min, min + span)
    pub const BALL_MIN_RADIUS: f32 = 2.0;
    pub const BALL_RADIUS_SPAN: f32 = 5.0;
    /// Ball opacity range [min, min + span)
    pub const BALL_MIN_OPACITY: f32 = 0.5;
    pub const BALL_OPACITY_SPAN: f32 = 0.5;

    /// Downward velocity added per tick while gravity is on
    pub const GRAVITY: f32 = 0.05;

    /// Walls shorter than this are never created
    pub const WALL_MIN_LENGTH: f32 = 10.0;
    /// Pointer distance under which an erase removes a wall
    pub const WALL_ERASE_THRESHOLD: f32 = 10.0;
    /// Max random velocity nudge per axis after a wall bounce
    pub const WALL_JITTER: f32 = 0.1;
    /// Rendered wall stroke width
    pub const WALL_WIDTH: f32 = 4.0;

    /// Spatial grid cell side
    pub const GRID_CELL_SIZE: f32 = 10.0;

    /// Radial impulse applied by an explosion
    pub const EXPLOSION_FORCE: f32 = 5.0;
    /// Ticks an explosion stays visible
    pub const EXPLOSION_DURATION: u32 = 30;
    /// Radius pulse amplitude while exploding
    pub const EXPLOSION_PULSE: f32 = 0.3;

    /// Highlight offset and size as a fraction of the radius
    pub const HIGHLIGHT_FRACTION: f32 = 0.3;

    /// Score awards
    pub const SCORE_BOUNDARY: u64 = 1;
    pub const SCORE_WALL: u64 = 5;
    pub const SCORE_BALL: u64 = 2;

    /// Light source drift periods (milliseconds, divided into wall-clock time)
    pub const LIGHT_PERIOD_X_MS: f64 = 5000.0;
    pub const LIGHT_PERIOD_Y_MS: f64 = 7000.0;
}

/// Side of the square canvas that fits in a window of the given size
#[inline]
pub fn fit_canvas_side(window_width: f32, window_height: f32) -> f32 {
    window_width.min(window_height) * consts::CANVAS_FRACTION
}
