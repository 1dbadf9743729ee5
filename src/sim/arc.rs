//! Jump-arc and drop-in interpolation
//!
//! A hop between cubes is a parametric arc over normalized time
//! `t ∈ [0, 1]`: linear interpolation between the endpoints with a
//! sine-shaped rise subtracted from y (screen y grows downward). The
//! derivative at `t = 1` seeds the fall velocity when a jump leaves the
//! pyramid, so the jump-to-fall handoff is velocity-continuous.

use glam::Vec2;

use crate::consts::ARC_HEIGHT;
use crate::lerp_vec;

/// A single hop between two screen positions
#[derive(Debug, Clone, Copy)]
pub struct JumpArc {
    pub from: Vec2,
    pub to: Vec2,
    /// Duration of the hop in seconds
    pub duration: f32,
}

impl JumpArc {
    pub fn new(from: Vec2, to: Vec2, duration: f32) -> Self {
        Self { from, to, duration }
    }

    /// Position at normalized time `t ∈ [0, 1]`
    pub fn position(&self, t: f32) -> Vec2 {
        let t = t.clamp(0.0, 1.0);
        let mut p = lerp_vec(self.from, self.to, t);
        p.y -= ARC_HEIGHT * (std::f32::consts::PI * t).sin();
        p
    }

    /// Instantaneous velocity (px/s) at normalized time `t`
    ///
    /// d/dτ of the arc with τ = t·duration:
    /// vx = Δx/T, vy = Δy/T − ARC_HEIGHT·π·cos(π·t)/T
    pub fn velocity(&self, t: f32) -> Vec2 {
        let t = t.clamp(0.0, 1.0);
        let delta = self.to - self.from;
        Vec2::new(
            delta.x / self.duration,
            (delta.y - ARC_HEIGHT * std::f32::consts::PI * (std::f32::consts::PI * t).cos())
                / self.duration,
        )
    }

    /// Velocity at the end of the arc, handed to the falling phase
    pub fn exit_velocity(&self) -> Vec2 {
        self.velocity(1.0)
    }
}

/// Vertical drop-in position: interpolates from above the playfield down
/// to the target, x pinned to the target's x
pub fn drop_position(target: Vec2, start_y: f32, t: f32) -> Vec2 {
    let t = t.clamp(0.0, 1.0);
    Vec2::new(target.x, start_y + (target.y - start_y) * t)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_arc_endpoints() {
        let arc = JumpArc::new(Vec2::new(0.0, 0.0), Vec2::new(100.0, 75.0), 0.3);
        assert!(arc.position(0.0).distance(Vec2::new(0.0, 0.0)) < 1e-3);
        assert!(arc.position(1.0).distance(Vec2::new(100.0, 75.0)) < 1e-3);
    }

    #[test]
    fn test_arc_rises_at_midpoint() {
        let arc = JumpArc::new(Vec2::new(0.0, 0.0), Vec2::new(100.0, 0.0), 0.3);
        let mid = arc.position(0.5);
        assert!((mid.y + ARC_HEIGHT).abs() < 1e-3);
    }

    #[test]
    fn test_exit_velocity_points_downward() {
        // cos(π) = -1, so the sine term adds downward (positive y) speed
        let arc = JumpArc::new(Vec2::new(0.0, 0.0), Vec2::new(100.0, 75.0), 0.3);
        let v = arc.exit_velocity();
        assert!(v.y > 0.0);
        assert!((v.x - 100.0 / 0.3).abs() < 1e-3);
    }

    #[test]
    fn test_drop_position_interpolates() {
        let target = Vec2::new(448.0, 300.0);
        assert_eq!(drop_position(target, -100.0, 0.0).y, -100.0);
        assert!((drop_position(target, -100.0, 1.0) - target).length() < 1e-3);
        assert_eq!(drop_position(target, -100.0, 0.5).x, target.x);
    }

    proptest! {
        /// Integrating the exit velocity one small step past t=1 stays
        /// arbitrarily close to extrapolating the analytic arc, i.e. no
        /// positional jump at the jump-to-fall boundary.
        #[test]
        fn prop_exit_velocity_continuous(
            dx in -300.0f32..300.0,
            dy in -150.0f32..150.0,
            duration in 0.2f32..0.5,
        ) {
            let from = Vec2::new(400.0, 500.0);
            let arc = JumpArc::new(from, from + Vec2::new(dx, dy), duration);
            let eps = 1e-4f32;

            // Analytic displacement over the last eps seconds of the arc
            let t_before = 1.0 - eps / duration;
            let analytic_step = arc.position(1.0) - arc.position(t_before);

            // One explicit-Euler step with the exit velocity
            let euler_step = arc.exit_velocity() * eps;

            prop_assert!((analytic_step - euler_step).length() < 0.01);
        }
    }
}
