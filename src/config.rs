// Defaults, topic naming, CLI arguments
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::error::TeleopError;

// Robot namespace the wheel controllers live under
pub const DEFAULT_NAMESPACE: &str = "agv6";

// Uniform scale applied to every wheel command
pub const DEFAULT_LINEAR_SCALE: f64 = 5.0;

// How often a pending key read checks for an external shutdown
pub const KEY_POLL_INTERVAL: Duration = Duration::from_millis(100);

// Wheel controller topics: <namespace>/Wheel_<position>_jt_controller/command
pub const WHEEL_LEFT_FRONT: &str = "left_front";
pub const WHEEL_RIGHT_FRONT: &str = "right_front";
pub const WHEEL_LEFT_REAR: &str = "left_rear";
pub const WHEEL_RIGHT_REAR: &str = "right_rear";

pub const HELP_TEXT: &str = "
Control Your Mecanum Drive Robot!
---------------------------
Moving around:
   q    w    e
   a    s    d
   z    x    c

w/x : forward/backward
a/d : strafe left/right
q/e : rotate counter-clockwise/clockwise
z/c : diagonal left-forward/right-forward
s : stop

CTRL-C to quit
";

/// Keyboard teleop for a four-wheel mecanum base over Zenoh
#[derive(Debug, Clone, Parser)]
#[command(name = "mecanum-teleop-key", version)]
pub struct Args {
    /// Robot namespace prefixed to every wheel topic
    #[arg(long, default_value = DEFAULT_NAMESPACE)]
    pub namespace: String,

    /// Scale applied to the mecanum transform output
    #[arg(long, default_value_t = DEFAULT_LINEAR_SCALE)]
    pub linear_scale: f64,

    /// Zenoh configuration file (JSON5); defaults are used when omitted
    #[arg(long)]
    pub zenoh_config: Option<PathBuf>,
}

impl Args {
    pub fn validate(&self) -> Result<(), TeleopError> {
        let namespace = self.namespace.trim_matches('/');
        if namespace.is_empty() {
            return Err(TeleopError::Config("namespace must not be empty".into()));
        }
        if namespace.contains(['*', '$', '?', '#']) {
            return Err(TeleopError::Config(format!(
                "namespace '{}' contains key expression wildcards",
                self.namespace
            )));
        }
        if !self.linear_scale.is_finite() {
            return Err(TeleopError::Config(format!(
                "linear scale must be finite, got {}",
                self.linear_scale
            )));
        }
        Ok(())
    }

    /// Load the Zenoh session config, falling back to the default peer config
    pub fn load_zenoh_config(&self) -> Result<zenoh::Config, TeleopError> {
        match &self.zenoh_config {
            Some(path) => Ok(zenoh::Config::from_file(path)?),
            None => Ok(zenoh::Config::default()),
        }
    }
}

/// Topic for one wheel controller.
///
/// ROS names start with `/`, Zenoh key expressions may not, so leading and
/// trailing slashes on the namespace are stripped.
pub fn wheel_topic(namespace: &str, position: &str) -> String {
    format!(
        "{}/Wheel_{}_jt_controller/command",
        namespace.trim_matches('/'),
        position
    )
}

/// Wheel topics in publish order: front-left, front-right, rear-left, rear-right
pub fn wheel_topics(namespace: &str) -> [String; 4] {
    [
        WHEEL_LEFT_FRONT,
        WHEEL_RIGHT_FRONT,
        WHEEL_LEFT_REAR,
        WHEEL_RIGHT_REAR,
    ]
    .map(|position| wheel_topic(namespace, position))
}
