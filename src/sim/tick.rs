//! Per-frame simulation tick
//!
//! Order within one tick:
//! 1. sync radii to the size multiplier and rebuild the grid
//! 2. move every ball (bounds and walls included)
//! 3. resolve ball-ball collisions through the grid
//! 4. advance explosion animations and the light source
//! 5. report score and wall count

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::ball::{Ball, Motion};
use super::grid::SpatialGrid;
use super::state::{PairPolicy, SimState};

/// What the host shows after each tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TickReport {
    pub score: u64,
    pub wall_count: usize,
}

/// Advance the simulation by one frame
///
/// `now_ms` is wall-clock time in milliseconds; only the cosmetic light
/// source depends on it.
pub fn tick(state: &mut SimState, now_ms: f64) -> TickReport {
    let size = state.size_multiplier;
    for ball in &mut state.balls {
        ball.sync_radius(size);
    }

    // Grid reflects positions from before this tick's motion
    state.grid.rebuild(state.balls.iter().map(|b| b.pos));

    let motion = state.motion();
    let mut points = 0;
    for ball in &mut state.balls {
        points += ball.step(&motion, &state.walls, &mut state.rng);
    }

    if motion.running {
        points += resolve_ball_collisions(state, &motion);
    }
    state.score += points;

    for ball in &mut state.balls {
        ball.advance_explosion(size);
    }
    state.update_light(now_ms);
    state.ticks += 1;

    TickReport {
        score: state.score,
        wall_count: state.walls.len(),
    }
}

/// Test every ball against its grid neighbourhood
fn resolve_ball_collisions(state: &mut SimState, motion: &Motion) -> u64 {
    let mut points = 0;
    let mut candidates = std::mem::take(&mut state.neighbor_buf);
    let unique = state.pair_policy == PairPolicy::Unique;

    for_each_candidate_pair(
        &mut state.balls,
        &state.grid,
        unique.then_some(&mut state.tested_pairs),
        &mut candidates,
        |a, b| points += a.check_collision(b, motion),
    );

    state.neighbor_buf = candidates;
    points
}

/// Visit each ball paired with every ball bucketed in its 3x3 neighbourhood
///
/// Without a `tested` set a pair is visited once from each side. With one,
/// each unordered pair is visited at most once.
fn for_each_candidate_pair<F>(
    balls: &mut [Ball],
    grid: &SpatialGrid,
    mut tested: Option<&mut HashSet<(usize, usize)>>,
    candidates: &mut Vec<usize>,
    mut visit: F,
) where
    F: FnMut(&mut Ball, &mut Ball),
{
    if let Some(set) = tested.as_deref_mut() {
        set.clear();
    }

    for i in 0..balls.len() {
        candidates.clear();
        grid.collect_neighbors(balls[i].pos, candidates);

        for &j in candidates.iter() {
            if let Some(set) = tested.as_deref_mut() {
                if i != j && !set.insert((i.min(j), i.max(j))) {
                    continue;
                }
            }
            if let Some((a, b)) = pair_mut(balls, i, j) {
                visit(a, b);
            }
        }
    }
}

/// Mutable references to two distinct balls
fn pair_mut(balls: &mut [Ball], i: usize, j: usize) -> Option<(&mut Ball, &mut Ball)> {
    if i == j || i >= balls.len() || j >= balls.len() {
        return None;
    }
    if i < j {
        let (head, tail) = balls.split_at_mut(j);
        Some((&mut head[i], &mut tail[0]))
    } else {
        let (head, tail) = balls.split_at_mut(i);
        Some((&mut tail[0], &mut head[j]))
    }
}
