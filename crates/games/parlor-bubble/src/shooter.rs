use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use parlor_core::geom::{Vec2, approach};

use crate::board::BubbleColor;

/// An in-flight projectile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub pos: Vec2,
    /// Velocity in units/ms.
    pub vel: Vec2,
    pub color: BubbleColor,
}

/// The bottom-center launcher. Angles are radians from straight up;
/// positive leans toward +X.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shooter {
    /// Smoothed aim angle, chasing `target_angle`.
    pub angle: f32,
    pub target_angle: f32,
    /// Color launched by the next shot.
    pub loaded: BubbleColor,
    /// Color promoted after the next shot.
    pub queued: BubbleColor,
    /// At most one projectile is in flight.
    pub projectile: Option<Projectile>,
}

impl Shooter {
    pub fn new(rng: &mut StdRng, color_count: usize) -> Self {
        Self {
            angle: 0.0,
            target_angle: 0.0,
            loaded: BubbleColor::sample(rng, color_count),
            queued: BubbleColor::sample(rng, color_count),
            projectile: None,
        }
    }

    /// Point the target angle toward `target`, clamped to the forward
    /// arc. Aiming at or below the launcher clamps to the nearest arc
    /// edge rather than turning backward.
    pub fn aim_at(&mut self, target: Vec2, origin: Vec2, max_arc: f32) {
        let dx = target.x - origin.x;
        let up = origin.y - target.y;
        self.target_angle = dx.atan2(up).clamp(-max_arc, max_arc);
    }

    /// Advance the smoothed angle toward the target.
    pub fn smooth(&mut self, dt_ms: f32, aim_rate: f32) {
        self.angle = approach(self.angle, self.target_angle, aim_rate * dt_ms);
    }

    /// Unit direction of the current aim. Up is -Y.
    pub fn direction(&self) -> Vec2 {
        Vec2::new(self.angle.sin(), -self.angle.cos())
    }

    /// Launch the loaded color at the current smoothed angle and promote
    /// the queue. The caller guarantees no projectile is in flight.
    pub fn launch(&mut self, origin: Vec2, speed: f32, rng: &mut StdRng, color_count: usize) {
        self.projectile = Some(Projectile {
            pos: origin,
            vel: self.direction().scale(speed),
            color: self.loaded,
        });
        self.loaded = self.queued;
        self.queued = BubbleColor::sample(rng, color_count);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    const ARC: f32 = 1.2;

    fn shooter() -> Shooter {
        let mut rng = StdRng::seed_from_u64(5);
        Shooter::new(&mut rng, 4)
    }

    fn origin() -> Vec2 {
        Vec2::new(192.0, 448.0)
    }

    #[test]
    fn aim_straight_up_is_zero() {
        let mut s = shooter();
        s.aim_at(Vec2::new(192.0, 100.0), origin(), ARC);
        assert!(s.target_angle.abs() < 1e-6);
    }

    #[test]
    fn aim_right_is_positive() {
        let mut s = shooter();
        s.aim_at(Vec2::new(300.0, 300.0), origin(), ARC);
        assert!(s.target_angle > 0.0);

        s.aim_at(Vec2::new(100.0, 300.0), origin(), ARC);
        assert!(s.target_angle < 0.0);
    }

    #[test]
    fn aim_clamped_to_arc() {
        let mut s = shooter();
        // Nearly horizontal right
        s.aim_at(Vec2::new(10_000.0, 447.0), origin(), ARC);
        assert!((s.target_angle - ARC).abs() < 1e-6);
    }

    #[test]
    fn aim_below_clamps_to_arc_edge() {
        let mut s = shooter();
        s.aim_at(Vec2::new(250.0, 600.0), origin(), ARC);
        assert_eq!(s.target_angle, ARC, "downward aim pins to the arc edge");

        s.aim_at(Vec2::new(100.0, 600.0), origin(), ARC);
        assert_eq!(s.target_angle, -ARC);
    }

    #[test]
    fn smoothing_converges_to_target() {
        let mut s = shooter();
        s.target_angle = 0.5;
        for _ in 0..100 {
            s.smooth(16.0, 0.012);
        }
        assert!((s.angle - 0.5).abs() < 1e-6);
    }

    #[test]
    fn smoothing_is_rate_limited() {
        let mut s = shooter();
        s.target_angle = 1.0;
        s.smooth(10.0, 0.012);
        assert!((s.angle - 0.12).abs() < 1e-6);
    }

    #[test]
    fn direction_points_up_at_zero() {
        let s = shooter();
        let d = s.direction();
        assert!(d.x.abs() < 1e-6);
        assert!((d.y + 1.0).abs() < 1e-6);
    }

    #[test]
    fn launch_promotes_queue_and_spawns_projectile() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut s = Shooter::new(&mut rng, 4);
        let loaded = s.loaded;
        let queued = s.queued;

        s.launch(origin(), 0.6, &mut rng, 4);

        let p = s.projectile.as_ref().expect("projectile in flight");
        assert_eq!(p.color, loaded);
        assert_eq!(s.loaded, queued);
        assert!((p.vel.length() - 0.6).abs() < 1e-4);
        assert!(p.vel.y < 0.0, "projectile travels upward");
    }
}
