use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Which quantity a step updates first.
///
/// Ribbons turn before moving, point chains move before turning. The two
/// orders give different paths for the same parameters and both are kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StepOrder {
    /// `angle`, then `position`, then `speed`.
    HeadingFirst,
    /// `position`, then `speed`, then `angle`.
    PositionFirst,
}

/// Head pose plus the constant rates that drive it, one step per frame.
///
/// Integrated in double precision; values are only narrowed to `f32` when
/// they reach a renderer buffer, so long runs do not drift.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Kinematics {
    pub position: DVec2,
    pub speed: f64,
    /// Heading in radians.
    pub angle: f64,
    /// Radians per frame.
    pub angle_speed: f64,
    /// Added to `speed` after every step.
    pub speed_accel: f64,
}

impl Kinematics {
    pub fn new(position: DVec2, angle: f64, speed: f64) -> Self {
        Self {
            position,
            speed,
            angle,
            angle_speed: 0.0,
            speed_accel: 0.0,
        }
    }

    pub fn with_angle_speed(mut self, angle_speed: f64) -> Self {
        self.angle_speed = angle_speed;
        self
    }

    pub fn with_speed_accel(mut self, speed_accel: f64) -> Self {
        self.speed_accel = speed_accel;
        self
    }

    /// Advances one frame and returns the new head position.
    pub fn step(&mut self, order: StepOrder) -> DVec2 {
        match order {
            StepOrder::HeadingFirst => {
                self.angle += self.angle_speed;
                self.translate();
                self.speed += self.speed_accel;
            }
            StepOrder::PositionFirst => {
                self.translate();
                self.speed += self.speed_accel;
                self.angle += self.angle_speed;
            }
        }
        self.position
    }

    fn translate(&mut self) {
        self.position += self.speed * DVec2::from_angle(self.angle);
    }
}
