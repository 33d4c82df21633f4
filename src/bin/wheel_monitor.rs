// Wheel monitor: log every command sent to the wheel controllers
// Usage: cargo run --bin wheel_monitor -- --namespace agv6
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use mecanum_teleop_key::config::DEFAULT_NAMESPACE;
use mecanum_teleop_key::messages::Float64;

#[derive(Debug, Parser)]
#[command(name = "wheel_monitor", about = "Print wheel commands published by the teleop")]
struct Args {
    /// Robot namespace to watch
    #[arg(long, default_value = DEFAULT_NAMESPACE)]
    namespace: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    info!("Opening Zenoh session...");
    let session = zenoh::open(zenoh::Config::default()).await?;

    // Matches all four <ns>/Wheel_<position>_jt_controller/command topics
    let topic = format!("{}/*/command", args.namespace.trim_matches('/'));
    let subscriber = session.declare_subscriber(&topic).await?;
    info!("Subscribed to: {}", topic);

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            sample = subscriber.recv_async() => {
                let sample = sample?;
                let payload = sample.payload().to_bytes();
                match serde_json::from_slice::<Float64>(&payload) {
                    Ok(cmd) => info!("{}: {:.2}", sample.key_expr(), cmd.data),
                    Err(e) => warn!("Failed to parse wheel command on {}: {}", sample.key_expr(), e),
                }
            }
        }
    }

    session.close().await?;
    Ok(())
}
