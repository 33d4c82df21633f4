// Keyboard teleop for a four-wheel mecanum base
//
// Provides:
// - Key bindings and mecanum inverse kinematics
// - Raw-mode single-key terminal input
// - Zenoh publishers for the four wheel controllers
// - The teleop session loop with stop-on-exit

pub mod config;
pub mod error;
pub mod input;
pub mod kinematics;
pub mod messages;
pub mod publisher;
pub mod shutdown;
pub mod teleop;

pub use error::TeleopError;
pub use kinematics::{MotionIntent, WheelSpeeds, mecanum_control, motion_for};
