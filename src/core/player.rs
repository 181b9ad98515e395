use glam::Vec2;

use crate::core::angle::normalize_angle;

#[derive(Clone, Debug)]
pub struct Player {
    pub pos: Vec2,
    pub a: f32,          // heading (radians from +x, y grows downward)
    pub fov: f32,        // horizontal field of view
    pub speed_walk: f32, // map units per second
    pub speed_turn: f32, // radians per second
    pub radius: f32,
}

/// Per-frame controller intent, each axis in `[-1, 1]`.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct MoveInput {
    pub forward: f32,
    pub strafe: f32,
    pub turn: f32,
}

impl Player {
    pub fn new(x: f32, y: f32, angle: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            a: angle,
            fov: std::f32::consts::FRAC_PI_3, // 60°
            speed_walk: 2.5,
            speed_turn: 2.0,
            radius: 0.2,
        }
    }

    pub fn with_fov(mut self, fov: f32) -> Self {
        self.fov = fov;
        self
    }

    pub fn direction(&self) -> Vec2 {
        Vec2::new(self.a.cos(), self.a.sin())
    }

    /// Turns, then moves with axis-separated sliding: each axis is only applied
    /// when `is_free` accepts the resulting position.
    pub fn update(&mut self, input: MoveInput, dt: f32, is_free: impl Fn(f32, f32) -> bool) {
        self.a = normalize_angle(self.a + input.turn * self.speed_turn * dt);

        let fwd = self.direction();
        let right = Vec2::new(-fwd.y, fwd.x);
        let step = (fwd * input.forward + right * input.strafe) * self.speed_walk * dt;

        let nx = self.pos.x + step.x;
        if is_free(nx, self.pos.y) {
            self.pos.x = nx;
        }
        let ny = self.pos.y + step.y;
        if is_free(self.pos.x, ny) {
            self.pos.y = ny;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    #[test]
    fn turning_keeps_heading_normalized() {
        let mut p = Player::new(0.0, 0.0, PI - 0.01);
        p.update(MoveInput { turn: 1.0, ..Default::default() }, 0.5, |_, _| true);
        assert!(p.a > -PI && p.a <= PI);
        assert!(p.a < 0.0);
    }

    #[test]
    fn blocked_axis_slides_along_the_other() {
        let mut p = Player::new(1.0, 1.0, PI / 4.0);
        p.update(MoveInput { forward: 1.0, ..Default::default() }, 0.1, |x, _| x <= 1.0);
        assert_eq!(p.pos.x, 1.0);
        assert!(p.pos.y > 1.0);
    }

    #[test]
    fn strafe_is_perpendicular_to_heading() {
        let mut p = Player::new(0.0, 0.0, 0.0);
        p.update(MoveInput { strafe: 1.0, ..Default::default() }, 1.0, |_, _| true);
        assert!(p.pos.x.abs() < 1e-5);
        assert!((p.pos.y - p.speed_walk).abs() < 1e-5);
    }
}
