//! Ballistic trajectory evaluation for ranged attacks.
//!
//! The evaluator works in a vertical plane: x is horizontal distance along
//! the firing line, y is height above the launch point. Ranged attack
//! actions consume it as a pure function; they never own the math.

use glam::Vec2;

/// Pure trajectory oracle.
pub trait TrajectoryOracle: Send + Sync {
    /// Projectile offset from the launch point after `t` seconds, given a
    /// launch velocity in the firing plane.
    fn evaluate(&self, gravity: f32, launch: Vec2, t: f32) -> Vec2;

    /// Minimum launch speed that can reach horizontal `distance` with a
    /// total height difference of `height_delta`.
    fn min_launch_speed(&self, gravity: f32, distance: f32, height_delta: f32) -> f32;

    /// Launch velocity (horizontal, vertical) reaching `distance` and
    /// `height_delta` at the minimum-speed angle.
    fn launch_velocity(&self, gravity: f32, distance: f32, height_delta: f32) -> Vec2;
}

/// Stock constant-gravity implementation.
#[derive(Clone, Copy, Debug, Default)]
pub struct Ballistics;

impl TrajectoryOracle for Ballistics {
    fn evaluate(&self, gravity: f32, launch: Vec2, t: f32) -> Vec2 {
        Vec2::new(launch.x * t, launch.y * t - 0.5 * gravity * t * t)
    }

    fn min_launch_speed(&self, gravity: f32, distance: f32, height_delta: f32) -> f32 {
        // v² = g·(h + √(h² + d²)), the classic minimum-energy solution.
        let reach = height_delta + (height_delta * height_delta + distance * distance).sqrt();
        (gravity * reach.max(0.0)).sqrt()
    }

    fn launch_velocity(&self, gravity: f32, distance: f32, height_delta: f32) -> Vec2 {
        let speed = self.min_launch_speed(gravity, distance, height_delta);
        if distance <= f32::EPSILON {
            // Straight up (or a drop): all speed vertical.
            return Vec2::new(0.0, speed);
        }
        // Minimum-speed launch angle: tan θ = (h + √(h² + d²)) / d
        let reach = height_delta + (height_delta * height_delta + distance * distance).sqrt();
        let angle = (reach / distance).atan();
        Vec2::new(speed * angle.cos(), speed * angle.sin())
    }
}
