// Mecanum inverse kinematics for a four-wheel base
// Maps teleop keys to body-frame intents and intents to wheel commands.
//
// A single scale is applied to the translational and rotational terms alike.
// Older versions of the keyboard script declared a separate angular scale
// (2.0) that never reached the formula; it is intentionally not carried here.

use crate::config::DEFAULT_LINEAR_SCALE;

/// Body-frame motion intent
///
/// Dimensionless direction coefficients, not velocities.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MotionIntent {
    pub x: f64,         // forward (+) / backward (-)
    pub y: f64,         // strafe left (+) / right (-)
    pub angular_z: f64, // counter-clockwise (+) / clockwise (-)
}

impl MotionIntent {
    pub const fn new(x: f64, y: f64, angular_z: f64) -> Self {
        Self { x, y, angular_z }
    }

    pub const fn stop() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }
}

/// Key bindings, laid out like the keyboard
///
/// ```text
///    q    w    e
///    a    s    d
///    z    x    c
/// ```
pub const MOVE_BINDINGS: [(char, MotionIntent); 9] = [
    ('w', MotionIntent::new(1.0, 0.0, 0.0)),  // forward
    ('x', MotionIntent::new(-1.0, 0.0, 0.0)), // backward
    ('a', MotionIntent::new(0.0, 1.0, 0.0)),  // strafe left
    ('d', MotionIntent::new(0.0, -1.0, 0.0)), // strafe right
    ('q', MotionIntent::new(0.0, 0.0, 1.0)),  // rotate counter-clockwise
    ('e', MotionIntent::new(0.0, 0.0, -1.0)), // rotate clockwise
    ('z', MotionIntent::new(0.7, 0.7, 0.0)),  // diagonal left-forward
    ('c', MotionIntent::new(0.7, -0.7, 0.0)), // diagonal right-forward
    ('s', MotionIntent::stop()),              // stop
];

/// Look up the intent bound to a key, `None` for anything unbound
pub fn motion_for(key: char) -> Option<MotionIntent> {
    MOVE_BINDINGS
        .iter()
        .find(|(bound, _)| *bound == key)
        .map(|&(_, intent)| intent)
}

/// Commands for the four wheel controllers
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WheelSpeeds {
    pub front_left: f64,
    pub front_right: f64,
    pub rear_left: f64,
    pub rear_right: f64,
}

impl WheelSpeeds {
    pub fn new(front_left: f64, front_right: f64, rear_left: f64, rear_right: f64) -> Self {
        Self {
            front_left,
            front_right,
            rear_left,
            rear_right,
        }
    }

    pub fn zero() -> Self {
        Self::default()
    }

    /// Returns speeds as array [front_left, front_right, rear_left, rear_right]
    pub fn as_array(&self) -> [f64; 4] {
        [
            self.front_left,
            self.front_right,
            self.rear_left,
            self.rear_right,
        ]
    }

    /// Console status line, two decimals per wheel
    pub fn status_line(&self) -> String {
        format!(
            "FL: {:.2}, FR: {:.2}, RL: {:.2}, RR: {:.2}",
            self.front_left, self.front_right, self.rear_left, self.rear_right
        )
    }
}

/// Convert an intent to wheel commands using the default scale
pub fn mecanum_control(intent: MotionIntent) -> WheelSpeeds {
    mecanum_control_with_scale(intent, DEFAULT_LINEAR_SCALE)
}

/// Convert an intent to wheel commands
///
/// ```text
/// front_left  = (x - y - w) * scale
/// front_right = (x + y + w) * scale
/// rear_left   = (x + y - w) * scale
/// rear_right  = (x - y + w) * scale
/// ```
pub fn mecanum_control_with_scale(intent: MotionIntent, scale: f64) -> WheelSpeeds {
    let MotionIntent { x, y, angular_z } = intent;

    WheelSpeeds {
        front_left: (x - y - angular_z) * scale,
        front_right: (x + y + angular_z) * scale,
        rear_left: (x + y - angular_z) * scale,
        rear_right: (x - y + angular_z) * scale,
    }
}
