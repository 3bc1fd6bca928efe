//! User-drawn walls
//!
//! Walls are plain segments kept in insertion order. Balls bounce off them
//! and the pointer can erase them.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::{distance, distance_to_segment};
use crate::consts::{WALL_ERASE_THRESHOLD, WALL_MIN_LENGTH};

/// A reflective line segment
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Wall {
    pub start: Vec2,
    pub end: Vec2,
}

impl Wall {
    pub fn new(start: Vec2, end: Vec2) -> Self {
        Self { start, end }
    }

    #[inline]
    pub fn length(&self) -> f32 {
        distance(self.start, self.end)
    }

    /// Whether `point` lies closer than `threshold` to this wall
    pub fn is_near(&self, point: Vec2, threshold: f32) -> bool {
        distance_to_segment(point, self.start, self.end) < threshold
    }
}

/// Ordered collection of walls
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WallStore {
    walls: Vec<Wall>,
}

impl WallStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a wall if it is longer than the minimum length
    ///
    /// Returns true if the wall was stored.
    pub fn add(&mut self, start: Vec2, end: Vec2) -> bool {
        let wall = Wall::new(start, end);
        if wall.length() > WALL_MIN_LENGTH {
            self.walls.push(wall);
            true
        } else {
            false
        }
    }

    /// Remove every wall within `threshold` of `point`
    ///
    /// Returns the number of walls removed.
    pub fn remove_near(&mut self, point: Vec2, threshold: f32) -> usize {
        let before = self.walls.len();
        self.walls.retain(|w| !w.is_near(point, threshold));
        before - self.walls.len()
    }

    /// Remove walls near `point` using the default erase threshold
    pub fn erase_near(&mut self, point: Vec2) -> usize {
        self.remove_near(point, WALL_ERASE_THRESHOLD)
    }

    pub fn clear(&mut self) {
        self.walls.clear();
    }

    pub fn len(&self) -> usize {
        self.walls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.walls.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Wall> {
        self.walls.iter()
    }

    pub fn as_slice(&self) -> &[Wall] {
        &self.walls
    }
}

impl<'a> IntoIterator for &'a WallStore {
    type Item = &'a Wall;
    type IntoIter = std::slice::Iter<'a, Wall>;

    fn into_iter(self) -> Self::IntoIter {
        self.walls.iter()
    }
}
