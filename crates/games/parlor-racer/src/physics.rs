use parlor_core::geom::Vec2;

use super::{RacerInput, RacerState};
use crate::config::RacerConfig;

/// Apply angular velocity from the turn flags.
pub fn apply_turning(state: &mut RacerState, input: &RacerInput, dt_ms: f32, config: &RacerConfig) {
    if input.turn_left {
        state.angle -= config.turn_rate * dt_ms;
    }
    if input.turn_right {
        state.angle += config.turn_rate * dt_ms;
    }
}

/// Accumulate linear acceleration from the throttle and brake flags along
/// the forward vector.
pub fn apply_throttle(state: &mut RacerState, input: &RacerInput, dt_ms: f32, config: &RacerConfig) {
    let fx = state.angle.cos();
    let fy = state.angle.sin();
    if input.accelerate {
        state.vx += fx * config.accel * dt_ms;
        state.vy += fy * config.accel * dt_ms;
    }
    if input.brake {
        state.vx -= fx * config.brake_accel * dt_ms;
        state.vy -= fy * config.brake_accel * dt_ms;
    }
}

/// Clamp velocity magnitude to the configured maximum, preserving direction.
pub fn clamp_speed(state: &mut RacerState, config: &RacerConfig) {
    let v = Vec2::new(state.vx, state.vy).clamp_length(config.max_speed);
    state.vx = v.x;
    state.vy = v.y;
}

/// Multiplicative frictional decay scaled to `dt`, so irregular tick sizes
/// decay identically to the equivalent run of small ticks.
pub fn apply_friction(state: &mut RacerState, dt_ms: f32, config: &RacerConfig) {
    let decay = config.friction.powf(dt_ms);
    state.vx *= decay;
    state.vy *= decay;
}

/// Integrate position by `velocity * dt`.
pub fn integrate(state: &mut RacerState, dt_ms: f32) {
    state.x += state.vx * dt_ms;
    state.y += state.vy * dt_ms;
}

/// Clamp position to the track bounds; wall contact is inelastic, zeroing
/// the violated velocity axis.
pub fn clamp_to_bounds(state: &mut RacerState, config: &RacerConfig) {
    if state.x < 0.0 {
        state.x = 0.0;
        state.vx = 0.0;
    } else if state.x > config.track_width {
        state.x = config.track_width;
        state.vx = 0.0;
    }
    if state.y < 0.0 {
        state.y = 0.0;
        state.vy = 0.0;
    } else if state.y > config.track_height {
        state.y = config.track_height;
        state.vy = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_at(x: f32, y: f32) -> RacerState {
        RacerState {
            x,
            y,
            angle: 0.0,
            vx: 0.0,
            vy: 0.0,
            laps: 0,
            last_crossing: None,
            elapsed_ms: 0.0,
            score: 0,
            game_over: false,
        }
    }

    fn no_input() -> RacerInput {
        RacerInput::default()
    }

    #[test]
    fn throttle_accelerates_along_heading() {
        let config = RacerConfig::default();
        let mut state = state_at(100.0, 100.0);
        let input = RacerInput {
            accelerate: true,
            ..no_input()
        };

        apply_throttle(&mut state, &input, 16.0, &config);

        assert!(state.vx > 0.0, "heading 0 accelerates along +X");
        assert!(state.vy.abs() < 1e-6);
    }

    #[test]
    fn brake_opposes_heading() {
        let config = RacerConfig::default();
        let mut state = state_at(100.0, 100.0);
        state.vx = 0.1;
        let input = RacerInput {
            brake: true,
            ..no_input()
        };

        apply_throttle(&mut state, &input, 16.0, &config);

        assert!(state.vx < 0.1, "brake decelerates along heading");
    }

    #[test]
    fn turning_changes_angle_both_ways() {
        let config = RacerConfig::default();
        let mut state = state_at(100.0, 100.0);

        apply_turning(
            &mut state,
            &RacerInput {
                turn_left: true,
                ..no_input()
            },
            16.0,
            &config,
        );
        assert!(state.angle < 0.0);

        apply_turning(
            &mut state,
            &RacerInput {
                turn_right: true,
                ..no_input()
            },
            32.0,
            &config,
        );
        assert!(state.angle > 0.0);
    }

    #[test]
    fn speed_clamped_preserving_direction() {
        let config = RacerConfig::default();
        let mut state = state_at(100.0, 100.0);
        state.vx = 3.0;
        state.vy = 4.0;

        clamp_speed(&mut state, &config);

        let speed = (state.vx * state.vx + state.vy * state.vy).sqrt();
        assert!((speed - config.max_speed).abs() < 1e-4);
        assert!((state.vy / state.vx - 4.0 / 3.0).abs() < 1e-3);
    }

    #[test]
    fn friction_composes_over_dt() {
        let config = RacerConfig::default();

        let mut one_big = state_at(0.0, 0.0);
        one_big.vx = 0.2;
        apply_friction(&mut one_big, 100.0, &config);

        let mut many_small = state_at(0.0, 0.0);
        many_small.vx = 0.2;
        for _ in 0..10 {
            apply_friction(&mut many_small, 10.0, &config);
        }

        assert!(
            (one_big.vx - many_small.vx).abs() < 1e-5,
            "one 100ms decay must equal ten 10ms decays"
        );
    }

    #[test]
    fn bounds_contact_zeroes_violated_axis_only() {
        let config = RacerConfig::default();
        let mut state = state_at(-5.0, 100.0);
        state.vx = -0.2;
        state.vy = 0.1;

        clamp_to_bounds(&mut state, &config);

        assert_eq!(state.x, 0.0);
        assert_eq!(state.vx, 0.0, "violated axis is zeroed");
        assert!((state.vy - 0.1).abs() < 1e-6, "other axis untouched");
    }

    #[test]
    fn bounds_contact_far_edge() {
        let config = RacerConfig::default();
        let mut state = state_at(100.0, config.track_height + 3.0);
        state.vy = 0.2;

        clamp_to_bounds(&mut state, &config);

        assert_eq!(state.y, config.track_height);
        assert_eq!(state.vy, 0.0);
    }

    // ================================================================
    // Property-based tests (proptest)
    // ================================================================

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn speed_never_exceeds_max(
                vx in -1.0f32..1.0,
                vy in -1.0f32..1.0,
                dt in 1.0f32..50.0,
                accelerate in proptest::bool::ANY,
                brake in proptest::bool::ANY,
            ) {
                let config = RacerConfig::default();
                let mut state = state_at(400.0, 300.0);
                state.vx = vx;
                state.vy = vy;
                let input = RacerInput { accelerate, brake, ..RacerInput::default() };

                apply_throttle(&mut state, &input, dt, &config);
                clamp_speed(&mut state, &config);

                let speed = (state.vx * state.vx + state.vy * state.vy).sqrt();
                prop_assert!(speed <= config.max_speed + 1e-4);
            }

            #[test]
            fn position_stays_in_bounds_after_clamp(
                x in -100.0f32..900.0,
                y in -100.0f32..700.0,
            ) {
                let config = RacerConfig::default();
                let mut state = state_at(x, y);
                state.vx = 0.1;
                state.vy = -0.1;

                clamp_to_bounds(&mut state, &config);

                prop_assert!(state.x >= 0.0 && state.x <= config.track_width);
                prop_assert!(state.y >= 0.0 && state.y <= config.track_height);
            }
        }
    }
}
