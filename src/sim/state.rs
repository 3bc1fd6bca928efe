//! Simulation state and host-facing controls
//!
//! One `SimState` holds everything the tick touches: the ball pool, walls,
//! the spatial grid, the global toggles and the score. The host only mutates
//! it between ticks through the setters below.

use std::collections::HashSet;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::ball::{Ball, Motion};
use super::grid::SpatialGrid;
use super::wall::{Wall, WallStore};
use crate::consts::*;
use crate::settings::Settings;

/// How ball pairs found through the grid are tested each tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PairPolicy {
    /// Every ball scans its neighbourhood, so a pair may be tested twice
    #[default]
    PerBall,
    /// Each unordered pair is tested at most once
    Unique,
}

/// Parameters for building a simulation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub width: f32,
    pub height: f32,
    pub ball_count: usize,
    pub cell_size: f32,
    pub seed: u64,
    pub pair_policy: PairPolicy,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_CANVAS_SIZE,
            height: DEFAULT_CANVAS_SIZE,
            ball_count: BALL_COUNT,
            cell_size: GRID_CELL_SIZE,
            seed: 0,
            pair_policy: PairPolicy::PerBall,
        }
    }
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct SimState {
    pub(crate) bounds: Vec2,
    pub(crate) running: bool,
    pub(crate) gravity: bool,
    pub(crate) speed_multiplier: f32,
    pub(crate) size_multiplier: f32,
    pub(crate) score: u64,
    pub(crate) ticks: u64,
    pub(crate) pair_policy: PairPolicy,
    /// Cosmetic light position, drifts with wall-clock time
    pub(crate) light: Vec2,
    pub(crate) balls: Vec<Ball>,
    pub(crate) walls: WallStore,
    pub(crate) grid: SpatialGrid,
    pub(crate) rng: Pcg32,
    /// Start of the wall currently being dragged
    pub(crate) wall_draft: Option<Vec2>,
    // Scratch buffers reused across ticks
    pub(crate) neighbor_buf: Vec<usize>,
    pub(crate) tested_pairs: HashSet<(usize, usize)>,
}

impl SimState {
    /// Create a simulation and spawn its ball pool
    pub fn new(config: SimConfig) -> Self {
        let bounds = Vec2::new(config.width, config.height);
        let mut state = Self {
            bounds,
            running: true,
            gravity: false,
            speed_multiplier: 1.0,
            size_multiplier: 1.0,
            score: 0,
            ticks: 0,
            pair_policy: config.pair_policy,
            light: bounds / 2.0,
            balls: Vec::with_capacity(config.ball_count),
            walls: WallStore::new(),
            grid: SpatialGrid::new(config.cell_size, bounds),
            rng: Pcg32::seed_from_u64(config.seed),
            wall_draft: None,
            neighbor_buf: Vec::new(),
            tested_pairs: HashSet::new(),
        };

        for _ in 0..config.ball_count {
            let ball = Ball::spawn(
                &mut state.rng,
                bounds,
                state.speed_multiplier,
                state.size_multiplier,
            );
            state.balls.push(ball);
        }

        log::debug!(
            "Spawned {} balls in {}x{} (seed {})",
            state.balls.len(),
            bounds.x,
            bounds.y,
            config.seed
        );

        state
    }

    /// Add a ball to the pool, returning its slot
    pub fn insert_ball(&mut self, mut ball: Ball) -> usize {
        ball.sync_radius(self.size_multiplier);
        self.balls.push(ball);
        self.balls.len() - 1
    }

    /// Set the arena size; existing balls are left where they are
    pub fn configure(&mut self, width: f32, height: f32) {
        self.bounds = Vec2::new(width, height);
        self.grid.resize(self.bounds);
        log::debug!("Arena resized to {}x{}", width, height);
    }

    /// Apply slider/toggle preferences
    pub fn apply_settings(&mut self, settings: &Settings) {
        self.set_speed_multiplier(settings.speed_multiplier);
        self.set_size_multiplier(settings.size_multiplier);
        self.set_gravity(settings.gravity);
    }

    pub fn set_running(&mut self, running: bool) {
        self.running = running;
    }

    pub fn set_gravity(&mut self, gravity: bool) {
        self.gravity = gravity;
    }

    pub fn set_speed_multiplier(&mut self, multiplier: f32) {
        if !multiplier.is_finite() || multiplier < 0.0 {
            log::warn!("Ignoring speed multiplier {}", multiplier);
            return;
        }
        self.speed_multiplier = multiplier;
    }

    pub fn set_size_multiplier(&mut self, multiplier: f32) {
        if !multiplier.is_finite() || multiplier < 0.0 {
            log::warn!("Ignoring size multiplier {}", multiplier);
            return;
        }
        self.size_multiplier = multiplier;
        for ball in &mut self.balls {
            ball.sync_radius(multiplier);
        }
    }

    pub fn set_pair_policy(&mut self, policy: PairPolicy) {
        self.pair_policy = policy;
    }

    /// Remember where a wall drag started
    pub fn begin_wall_draw(&mut self, x: f32, y: f32) {
        self.wall_draft = Some(Vec2::new(x, y));
    }

    /// Finish a wall drag; returns true if a wall was created
    pub fn end_wall_draw(&mut self, x: f32, y: f32) -> bool {
        let Some(start) = self.wall_draft.take() else {
            return false;
        };
        let added = self.walls.add(start, Vec2::new(x, y));
        if added {
            log::debug!("Wall added ({} total)", self.walls.len());
        }
        added
    }

    /// Abandon a wall drag without creating anything
    pub fn cancel_wall_draw(&mut self) {
        self.wall_draft = None;
    }

    /// Start point of the drag in progress
    pub fn wall_draft(&self) -> Option<Vec2> {
        self.wall_draft
    }

    /// Remove every wall near the point; returns how many went
    pub fn erase_walls_near(&mut self, x: f32, y: f32) -> usize {
        let removed = self.walls.erase_near(Vec2::new(x, y));
        if removed > 0 {
            log::debug!("Erased {} wall(s), {} left", removed, self.walls.len());
        }
        removed
    }

    pub fn clear_walls(&mut self) {
        self.walls.clear();
    }

    /// Blow every ball away from the arena centre
    pub fn explode_all(&mut self) {
        let center = self.bounds / 2.0;
        for ball in &mut self.balls {
            ball.explode(center, &mut self.rng);
        }
        log::info!("Explosion!");
    }

    /// Motion parameters for the current tick
    pub fn motion(&self) -> Motion {
        Motion {
            running: self.running,
            gravity: self.gravity,
            speed_multiplier: self.speed_multiplier,
            bounds: self.bounds,
        }
    }

    /// Move the light source along its drift schedule
    pub fn update_light(&mut self, now_ms: f64) {
        let w = self.bounds.x as f64;
        let h = self.bounds.y as f64;
        let x = w / 2.0 + (now_ms / LIGHT_PERIOD_X_MS).sin() * w / 4.0;
        let y = h / 2.0 + (now_ms / LIGHT_PERIOD_Y_MS).cos() * h / 4.0;
        self.light = Vec2::new(x as f32, y as f32);
    }

    pub fn balls(&self) -> &[Ball] {
        &self.balls
    }

    pub fn walls(&self) -> &[Wall] {
        self.walls.as_slice()
    }

    pub fn wall_count(&self) -> usize {
        self.walls.len()
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn bounds(&self) -> Vec2 {
        self.bounds
    }

    pub fn light(&self) -> Vec2 {
        self.light
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn has_gravity(&self) -> bool {
        self.gravity
    }

    pub fn speed_multiplier(&self) -> f32 {
        self.speed_multiplier
    }

    pub fn size_multiplier(&self) -> f32 {
        self.size_multiplier
    }

    pub fn pair_policy(&self) -> PairPolicy {
        self.pair_policy
    }
}
