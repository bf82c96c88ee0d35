//! Drives the vertical output lifecycle against the mock host.
//!
//! Run with:
//! `cargo run -p vertcast-ndi --example lifecycle --features mock-host`

use std::sync::Arc;

use vertcast_core::{event_channel, Config};
use vertcast_ndi::mock::{MockHost, MockVendor};
use vertcast_ndi::{is_supported, ConfigSync, VerticalOutput, VideoFeed};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "debug".into()),
        )
        .init();

    let mut host = MockHost::new();
    host.vendor = Arc::new(MockVendor::with_video(VideoFeed::new("aitum vertical")));

    println!("vertical output supported: {}", is_supported(host.outputs.as_ref()));

    let config = Config {
        vertical_output_enabled: true,
        vertical_output_name: "Vertical Demo".to_string(),
        vertical_output_groups: String::new(),
    }
    .into_shared();

    let (tx, rx) = event_channel();
    let sync = ConfigSync::new(rx, config.clone());
    let mut output = VerticalOutput::new(host.services(), config.clone(), tx);

    output.init();
    sync.pump();
    println!(
        "running: {}, enabled flag: {}",
        output.is_running(),
        config.read().vertical_output_enabled
    );

    output.stop();
    sync.pump();
    println!(
        "running: {}, enabled flag: {}",
        output.is_running(),
        config.read().vertical_output_enabled
    );

    output.deinit();
    println!("has output after deinit: {}", output.has_output());
}
