//! Property tests over the public simulation API

use bouncefield::consts::*;
use bouncefield::sim::{Ball, PairPolicy, SimConfig, SimState, WallStore, tick};
use glam::Vec2;
use proptest::prelude::*;
use rand::SeedableRng;
use rand_pcg::Pcg32;

fn sim(seed: u64, ball_count: usize, policy: PairPolicy) -> SimState {
    SimState::new(SimConfig {
        width: 240.0,
        height: 240.0,
        ball_count,
        seed,
        pair_policy: policy,
        ..Default::default()
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn score_is_monotonic(
        seed in any::<u64>(),
        gravity in any::<bool>(),
        speed in 0.1f32..4.0,
        size in 0.5f32..3.0,
        unique in any::<bool>(),
    ) {
        let policy = if unique { PairPolicy::Unique } else { PairPolicy::PerBall };
        let mut state = sim(seed, 120, policy);
        state.set_gravity(gravity);
        state.set_speed_multiplier(speed);
        state.set_size_multiplier(size);
        state.begin_wall_draw(30.0, 60.0);
        state.end_wall_draw(210.0, 180.0);

        let mut last = 0;
        for t in 0..60u32 {
            if t == 20 {
                state.explode_all();
            }
            let report = tick(&mut state, t as f64 * 16.0);
            prop_assert!(report.score >= last);
            prop_assert_eq!(report.wall_count, 1);
            last = report.score;
        }
    }

    #[test]
    fn short_drags_never_create_walls(
        x in 0.0f32..200.0,
        y in 0.0f32..200.0,
        angle in 0.0f32..std::f32::consts::TAU,
        len in 0.0f32..WALL_MIN_LENGTH - 0.1,
    ) {
        let mut state = sim(0, 0, PairPolicy::PerBall);
        state.begin_wall_draw(x, y);
        let end = Vec2::new(x, y) + Vec2::from_angle(angle) * len;
        prop_assert!(!state.end_wall_draw(end.x, end.y));
        prop_assert_eq!(state.wall_count(), 0);
    }

    #[test]
    fn clear_walls_is_idempotent(count in 0usize..10) {
        let mut state = sim(0, 0, PairPolicy::PerBall);
        for i in 0..count {
            let y = 10.0 + i as f32 * 15.0;
            state.begin_wall_draw(10.0, y);
            state.end_wall_draw(100.0, y);
        }
        state.clear_walls();
        prop_assert_eq!(state.wall_count(), 0);
        state.clear_walls();
        prop_assert_eq!(state.wall_count(), 0);
        prop_assert_eq!(tick(&mut state, 0.0).wall_count, 0);
    }

    #[test]
    fn boundary_step_lands_inside(
        x in -20.0f32..260.0,
        y in -20.0f32..260.0,
        vx in -3.0f32..3.0,
        vy in -3.0f32..3.0,
        radius in 2.0f32..7.0,
    ) {
        let mut state = sim(0, 0, PairPolicy::PerBall);
        state.insert_ball(Ball::new(Vec2::new(x, y), Vec2::new(vx, vy), radius));
        tick(&mut state, 0.0);

        let ball = &state.balls()[0];
        prop_assert!(ball.pos.x >= ball.radius && ball.pos.x <= 240.0 - ball.radius);
        prop_assert!(ball.pos.y >= ball.radius && ball.pos.y <= 240.0 - ball.radius);
    }

    #[test]
    fn isolated_ball_keeps_its_speed(
        seed in any::<u64>(),
        x in 20.0f32..220.0,
        y in 20.0f32..220.0,
        vx in -3.0f32..3.0,
        vy in -3.0f32..3.0,
        speed in 0.1f32..3.0,
    ) {
        let mut state = sim(seed, 0, PairPolicy::PerBall);
        state.set_speed_multiplier(speed);
        state.insert_ball(Ball::new(Vec2::new(x, y), Vec2::new(vx, vy), 4.0));

        let before = Vec2::new(vx, vy).length_squared();
        for t in 0..40u32 {
            tick(&mut state, t as f64);
            let after = state.balls()[0].vel.length_squared();
            prop_assert!((after - before).abs() < 1e-3);
        }
    }

    #[test]
    fn wall_contact_pushes_ball_clear(
        seed in any::<u64>(),
        x in 20.0f32..180.0,
        offset in -3.5f32..3.5,
        vy in -2.0f32..2.0,
    ) {
        let mut rng = Pcg32::seed_from_u64(seed);
        let mut walls = WallStore::new();
        walls.add(Vec2::new(0.0, 100.0), Vec2::new(200.0, 100.0));

        let mut ball = Ball::new(Vec2::new(x, 100.0 + offset), Vec2::new(0.5, vy), 4.0);
        let points = ball.check_wall_collisions(&walls, &mut rng);

        prop_assert_eq!(points, SCORE_WALL);
        prop_assert!((ball.pos.y - 100.0).abs() >= 4.0 - 1e-3);
        prop_assert!(ball.vel.is_finite());
    }
}
