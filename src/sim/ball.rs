//! Ball entity: motion, bounces, elastic collisions and explosions

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::geometry::{reflect_velocity, segment_circle_contact};
use super::wall::WallStore;
use crate::consts::*;

/// An sRGB colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(0xFF, 0xFF, 0xFF);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// CSS hex string, e.g. `#FF3B30`
    pub fn to_css(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// Colours balls are painted with
pub const PALETTE: [Color; 13] = [
    Color::rgb(0xFF, 0x3B, 0x30),
    Color::rgb(0xFF, 0x95, 0x00),
    Color::rgb(0xFF, 0xCC, 0x00),
    Color::rgb(0x4C, 0xD9, 0x64),
    Color::rgb(0x5A, 0xC8, 0xFA),
    Color::rgb(0x00, 0x7A, 0xFF),
    Color::rgb(0x58, 0x56, 0xD6),
    Color::rgb(0xFF, 0x2D, 0x55),
    Color::rgb(0xE6, 0xC2, 0x29),
    Color::rgb(0xF1, 0x71, 0x05),
    Color::rgb(0xD1, 0x11, 0x49),
    Color::rgb(0x66, 0x10, 0xF2),
    Color::rgb(0x1A, 0x8F, 0xE3),
];

/// Global motion parameters read by every ball during a tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Motion {
    /// Simulation is not frozen
    pub running: bool,
    pub gravity: bool,
    /// Scales base velocity into per-tick displacement
    pub speed_multiplier: f32,
    /// Arena size (balls live in [0, bounds])
    pub bounds: Vec2,
}

/// A ball
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    /// Base velocity (scaled by the speed multiplier when integrating)
    pub vel: Vec2,
    /// Radius before the size multiplier
    pub base_radius: f32,
    /// Current radius (base * size multiplier, pulsing while exploding)
    pub radius: f32,
    /// Collision weight, tracks radius
    pub mass: f32,
    /// Colour currently shown (white while exploding)
    pub color: Color,
    /// Colour restored after an explosion
    pub original_color: Color,
    pub opacity: f32,
    pub exploding: bool,
    /// Ticks since the explosion started
    pub explosion_time: u32,
}

impl Ball {
    pub fn new(pos: Vec2, vel: Vec2, base_radius: f32) -> Self {
        Self {
            pos,
            vel,
            base_radius,
            radius: base_radius,
            mass: base_radius,
            color: PALETTE[0],
            original_color: PALETTE[0],
            opacity: 1.0,
            exploding: false,
            explosion_time: 0,
        }
    }

    /// Random ball placed fully inside `bounds`
    pub fn spawn<R: Rng + ?Sized>(
        rng: &mut R,
        bounds: Vec2,
        speed_multiplier: f32,
        size_multiplier: f32,
    ) -> Self {
        let base_radius = rng.random::<f32>() * BALL_RADIUS_SPAN + BALL_MIN_RADIUS;
        let radius = base_radius * size_multiplier;

        let x = rng.random::<f32>() * (bounds.x - radius * 2.0) + radius;
        let y = rng.random::<f32>() * (bounds.y - radius * 2.0) + radius;
        let vx = (rng.random::<f32>() - 0.5) * 2.0 * speed_multiplier;
        let vy = (rng.random::<f32>() - 0.5) * 2.0 * speed_multiplier;

        let color = PALETTE[rng.random_range(0..PALETTE.len())];
        let opacity = rng.random::<f32>() * BALL_OPACITY_SPAN + BALL_MIN_OPACITY;

        Self {
            pos: Vec2::new(x, y),
            vel: Vec2::new(vx, vy),
            base_radius,
            radius,
            mass: radius,
            color,
            original_color: color,
            opacity,
            exploding: false,
            explosion_time: 0,
        }
    }

    /// Centre of the gradient highlight, up and to the left of the ball
    pub fn highlight_center(&self) -> Vec2 {
        self.pos - Vec2::splat(self.radius * HIGHLIGHT_FRACTION)
    }

    /// Radius scale from the explosion pulse (1.0 when calm)
    pub fn pulse_scale(&self) -> f32 {
        if self.exploding {
            1.0 + (self.explosion_time as f32 / 2.0).sin() * EXPLOSION_PULSE
        } else {
            1.0
        }
    }

    /// Recompute radius and mass from the base radius and size multiplier
    pub fn sync_radius(&mut self, size_multiplier: f32) {
        self.radius = self.base_radius * size_multiplier * self.pulse_scale();
        self.mass = self.radius;
    }

    /// Advance one tick: gravity, integration, arena bounds, then walls
    ///
    /// Returns the score earned. A frozen simulation leaves the ball alone.
    pub fn step<R: Rng + ?Sized>(&mut self, motion: &Motion, walls: &WallStore, rng: &mut R) -> u64 {
        if !motion.running {
            return 0;
        }

        if motion.gravity {
            self.vel.y += GRAVITY;
        }

        // Explicit Euler, one substep per tick
        self.pos += self.vel * motion.speed_multiplier;

        let mut points = self.bounce_off_bounds(motion.bounds);
        points += self.check_wall_collisions(walls, rng);
        points
    }

    /// Reflect off the arena edges, each axis on its own
    pub fn bounce_off_bounds(&mut self, bounds: Vec2) -> u64 {
        let mut points = 0;
        let r = self.radius;

        if self.pos.x - r < 0.0 || self.pos.x + r > bounds.x {
            self.vel.x = -self.vel.x;
            self.pos.x = if self.pos.x - r < 0.0 { r } else { bounds.x - r };
            points += SCORE_BOUNDARY;
        }

        if self.pos.y - r < 0.0 || self.pos.y + r > bounds.y {
            self.vel.y = -self.vel.y;
            self.pos.y = if self.pos.y - r < 0.0 { r } else { bounds.y - r };
            points += SCORE_BOUNDARY;
        }

        points
    }

    /// Bounce off every overlapping wall, in store order
    pub fn check_wall_collisions<R: Rng + ?Sized>(&mut self, walls: &WallStore, rng: &mut R) -> u64 {
        let mut points = 0;

        for wall in walls {
            let Some(contact) = segment_circle_contact(self.pos, self.radius, wall.start, wall.end)
            else {
                continue;
            };

            self.vel = reflect_velocity(self.vel, contact.perpendicular);
            self.pos += contact.push_dir * contact.penetration;
            points += SCORE_WALL;

            // Break up perfectly periodic bounces
            self.vel.x += rng.random_range(-WALL_JITTER..WALL_JITTER);
            self.vel.y += rng.random_range(-WALL_JITTER..WALL_JITTER);
        }

        points
    }

    /// Elastic collision with another ball
    ///
    /// Velocities are exchanged along the line between the centres, weighted
    /// by mass, and the balls are pushed apart by half the overlap each.
    /// Explosions spread from an exploding ball to a calm one. Returns the
    /// score earned.
    pub fn check_collision(&mut self, other: &mut Ball, motion: &Motion) -> u64 {
        if !motion.running {
            return 0;
        }

        let delta = self.pos - other.pos;
        let dist = delta.length();
        let reach = self.radius + other.radius;
        if dist >= reach {
            return 0;
        }

        // Coincident centres separate along +x
        let normal = delta.try_normalize().unwrap_or(Vec2::X);
        let tangent = normal.perp();

        let total_mass = self.mass + other.mass;
        if total_mass > f32::EPSILON {
            let (u1, w1) = (self.vel.dot(normal), self.vel.dot(tangent));
            let (u2, w2) = (other.vel.dot(normal), other.vel.dot(tangent));

            let f1 = ((self.mass - other.mass) * u1 + 2.0 * other.mass * u2) / total_mass;
            let f2 = ((other.mass - self.mass) * u2 + 2.0 * self.mass * u1) / total_mass;

            self.vel = normal * f1 + tangent * w1;
            other.vel = normal * f2 + tangent * w2;
        }

        let push = normal * ((reach - dist) / 2.0);
        self.pos += push;
        other.pos -= push;

        if self.exploding && !other.exploding {
            other.ignite();
        } else if other.exploding && !self.exploding {
            self.ignite();
        }

        SCORE_BALL
    }

    /// Start (or restart) the explosion animation without an impulse
    pub fn ignite(&mut self) {
        self.exploding = true;
        self.explosion_time = 0;
    }

    /// Explode away from `center`
    ///
    /// A ball sitting exactly on the centre is kicked in a random direction.
    pub fn explode<R: Rng + ?Sized>(&mut self, center: Vec2, rng: &mut R) {
        self.ignite();

        let dir = (self.pos - center).try_normalize().unwrap_or_else(|| {
            let angle = rng.random::<f32>() * std::f32::consts::TAU;
            Vec2::from_angle(angle)
        });
        self.vel += dir * EXPLOSION_FORCE;
    }

    /// Advance the explosion animation by one tick
    pub fn advance_explosion(&mut self, size_multiplier: f32) {
        if self.exploding {
            self.explosion_time += 1;
            if self.explosion_time > EXPLOSION_DURATION {
                self.exploding = false;
                self.explosion_time = 0;
                self.color = self.original_color;
            } else {
                self.color = Color::WHITE;
            }
        }
        self.sync_radius(size_multiplier);
    }
}
