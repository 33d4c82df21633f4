// Wheel command publishers, one Zenoh publisher per wheel controller

use tracing::{debug, info};
use zenoh::pubsub::Publisher;

use crate::config::wheel_topics;
use crate::error::TeleopError;
use crate::kinematics::WheelSpeeds;
use crate::messages::Float64;

/// Where the session loop sends wheel commands
#[allow(async_fn_in_trait)]
pub trait WheelSink {
    async fn publish(&mut self, speeds: &WheelSpeeds) -> Result<(), TeleopError>;
}

pub struct WheelPublishers {
    // [front_left, front_right, rear_left, rear_right]
    wheels: [Publisher<'static>; 4],
}

impl WheelPublishers {
    /// Declare the four wheel publishers under `namespace`
    pub async fn declare(session: &zenoh::Session, namespace: &str) -> Result<Self, TeleopError> {
        let [fl, fr, rl, rr] = wheel_topics(namespace);
        info!("Publishing to: {}, {}, {}, {}", fl, fr, rl, rr);

        let wheels = [
            session.declare_publisher(fl).await?,
            session.declare_publisher(fr).await?,
            session.declare_publisher(rl).await?,
            session.declare_publisher(rr).await?,
        ];
        Ok(Self { wheels })
    }
}

impl WheelSink for WheelPublishers {
    async fn publish(&mut self, speeds: &WheelSpeeds) -> Result<(), TeleopError> {
        for (publisher, speed) in self.wheels.iter().zip(speeds.as_array()) {
            let payload = serde_json::to_string(&Float64::from(speed))?;
            debug!("{} <- {}", publisher.key_expr(), payload);
            publisher.put(payload).await?;
        }
        Ok(())
    }
}
