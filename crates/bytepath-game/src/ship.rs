use std::f32::consts::TAU;

use bytepath_engine::coords::Vec2;
use bytepath_engine::input::{InputSnapshot, Key};

/// Held steering keys for one simulation step.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct ShipControls {
    pub forward: bool,
    pub backward: bool,
    pub turn_left: bool,
    pub turn_right: bool,
}

impl ShipControls {
    /// Reads the arrow keys.
    pub fn from_input(input: &InputSnapshot<'_>) -> Self {
        Self {
            forward: input.held(Key::ArrowUp),
            backward: input.held(Key::ArrowDown),
            turn_left: input.held(Key::ArrowLeft),
            turn_right: input.held(Key::ArrowRight),
        }
    }
}

/// The player circle: constant speed along its heading, no acceleration.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ship {
    pub position: Vec2,

    /// Heading in radians, kept in `[0, 2π]`.
    pub heading: f32,

    /// Speed in logical pixels per second.
    pub speed: f32,
}

impl Ship {
    pub fn new(position: Vec2, speed: f32) -> Self {
        Self {
            position,
            heading: 0.0,
            speed,
        }
    }

    /// Advances one fixed step and returns the unit movement direction used.
    ///
    /// The direction comes from the heading before this step's turn. Backward
    /// wins when both forward and backward are held. Turning is one radian per
    /// second.
    pub fn step(&mut self, controls: ShipControls, dt: f32) -> Vec2 {
        let facing = Vec2::from_angle(self.heading);
        let direction = if controls.backward {
            -facing
        } else if controls.forward {
            facing
        } else {
            Vec2::zero()
        };

        if controls.turn_right {
            self.heading += dt;
        }
        if controls.turn_left {
            self.heading -= dt;
        }
        self.heading = wrap_heading(self.heading);

        // Constant speed: the direction is never rescaled.
        self.position += direction * (self.speed * dt);
        direction
    }
}

/// `θ ≥ 2π` snaps to 0 and `θ ≤ 0` snaps to 2π.
fn wrap_heading(theta: f32) -> f32 {
    if theta >= TAU {
        0.0
    } else if theta <= 0.0 {
        TAU
    } else {
        theta
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    fn approx(a: Vec2, b: Vec2) -> bool {
        (a.x - b.x).abs() < 1e-4 && (a.y - b.y).abs() < 1e-4
    }

    #[test]
    fn idle_ship_does_not_move() {
        let start = Vec2::new(240.0, 135.0);
        let mut ship = Ship::new(start, 40.0);
        for _ in 0..600 {
            let dir = ship.step(ShipControls::default(), DT);
            assert_eq!(dir, Vec2::zero());
        }
        assert_eq!(ship.position, start);
    }

    #[test]
    fn forward_one_frame_moves_along_heading() {
        let mut ship = Ship::new(Vec2::new(240.0, 135.0), 40.0);
        let controls = ShipControls {
            forward: true,
            ..ShipControls::default()
        };
        ship.step(controls, DT);
        assert!(approx(ship.position, Vec2::new(240.0 + 40.0 / 60.0, 135.0)));
    }

    #[test]
    fn backward_wins_over_forward() {
        let mut ship = Ship::new(Vec2::zero(), 40.0);
        let controls = ShipControls {
            forward: true,
            backward: true,
            ..ShipControls::default()
        };
        let dir = ship.step(controls, DT);
        assert!(approx(dir, Vec2::new(-1.0, 0.0)));
        assert!(ship.position.x < 0.0);
    }

    #[test]
    fn movement_uses_heading_before_turn() {
        let mut ship = Ship::new(Vec2::zero(), 40.0);
        ship.heading = 1.0;
        let controls = ShipControls {
            forward: true,
            turn_right: true,
            ..ShipControls::default()
        };
        let dir = ship.step(controls, 0.5);
        assert!(approx(dir, Vec2::from_angle(1.0)));
        assert!((ship.heading - 1.5).abs() < 1e-6);
    }

    #[test]
    fn turn_rate_is_one_radian_per_second() {
        let mut ship = Ship::new(Vec2::zero(), 40.0);
        ship.heading = 1.0;
        let left = ShipControls {
            turn_left: true,
            ..ShipControls::default()
        };
        for _ in 0..30 {
            ship.step(left, DT);
        }
        assert!((ship.heading - 0.5).abs() < 1e-4);
    }

    #[test]
    fn heading_wraps_at_both_ends() {
        assert_eq!(wrap_heading(TAU), 0.0);
        assert_eq!(wrap_heading(TAU + 0.1), 0.0);
        assert_eq!(wrap_heading(0.0), TAU);
        assert_eq!(wrap_heading(-0.1), TAU);
        assert_eq!(wrap_heading(1.0), 1.0);
    }

    #[test]
    fn turning_left_from_zero_wraps_to_tau() {
        let mut ship = Ship::new(Vec2::zero(), 40.0);
        let left = ShipControls {
            turn_left: true,
            ..ShipControls::default()
        };
        ship.step(left, DT);
        assert_eq!(ship.heading, TAU);
    }

    #[test]
    fn speed_is_unchanged_after_heading_wraps() {
        let start = Vec2::new(240.0, 135.0);
        let mut ship = Ship::new(start, 40.0);
        ship.step(ShipControls::default(), DT);
        assert_eq!(ship.heading, TAU);

        let forward = ShipControls {
            forward: true,
            ..ShipControls::default()
        };
        let dir = ship.step(forward, DT);
        assert!(approx(dir, Vec2::new(1.0, 0.0)));

        let moved = ship.position - start;
        assert!((moved.x.hypot(moved.y) - 40.0 / 60.0).abs() < 1e-4);
        assert!(approx(ship.position, Vec2::new(240.0 + 40.0 / 60.0, 135.0)));
    }
}
