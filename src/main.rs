use clap::Parser;
use tracing_subscriber::EnvFilter;

use mecanum_teleop_key::config::Args;

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Setup logging (set RUST_LOG=info or debug); stderr keeps stdout for status lines
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse().unwrap()))
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = mecanum_teleop_key::teleop::run(args).await {
        eprintln!("Teleop error: {}", e);
        std::process::exit(1);
    }
}
