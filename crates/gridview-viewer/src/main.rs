//! Viewer entry point.
//!
//! Startup mirrors a page load: derive the view identity, fetch the
//! simulation settings (retrying until the server is up), then hand control
//! to the render/update scheduler for the lifetime of the process.
//! Human-agent views additionally forward stdin lines to the server as key
//! input.

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use tracing_subscriber::EnvFilter;

use gridview_types::ViewIdentity;
use gridview_viewer::api::ApiClient;
use gridview_viewer::config::ViewerConfig;
use gridview_viewer::render::TraceRenderer;
use gridview_viewer::scheduler::{Scheduler, initialize};
use gridview_viewer::sender::DataSender;

/// Application entry point.
///
/// Initializes logging, loads configuration from environment variables,
/// derives the view identity, performs the session handshake, then runs
/// the render/update loop indefinitely.
///
/// # Errors
///
/// Returns an error only for invalid configuration or an unrecognizable
/// view path; connectivity problems are retried forever, never fatal.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    info!("gridview-viewer starting");

    // Load configuration from environment
    let config = ViewerConfig::from_env()?;
    info!(
        api_url = config.api_url,
        view_path = config.view_path,
        frame_rate = config.frame_rate,
        retry_delay_ms = config.retry_delay.as_millis(),
        "configuration loaded"
    );

    // The identity is fixed before the first request goes out; every call
    // from here on is scoped to it.
    let identity = ViewIdentity::from_path(&config.view_path)?;
    info!(
        view = identity.kind(),
        agent_id = identity.agent_id(),
        "view identity derived"
    );

    let api = ApiClient::new(&config.api_url);

    // Human-agent views forward stdin lines as key input.
    if matches!(identity, ViewIdentity::HumanAgent(_)) {
        spawn_key_forwarder(DataSender::new(api.clone(), identity.clone()));
        info!("human-agent key forwarding enabled on stdin");
    }

    let session = initialize(&api, config.retry_delay).await;

    let mut scheduler = Scheduler::new(
        api,
        identity,
        session,
        TraceRenderer,
        config.frame_interval(),
        config.retry_delay,
    );
    scheduler.run().await;

    Ok(())
}

/// Read stdin lines and fire each one at the server as a key payload.
///
/// Delivery is fire-and-forget through [`DataSender`]; a closed stdin ends
/// the task without affecting the render loop.
fn spawn_key_forwarder(sender: DataSender) {
    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            let key = line.trim();
            if key.is_empty() {
                continue;
            }
            sender.send(serde_json::json!({ "key": key }));
        }
    });
}
