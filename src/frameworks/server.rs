// Framework bootstrap for the alert relay runtime.

use crate::frameworks::config::{NOTIFY_QUEUE_CAPACITY, RelayConfig};
use crate::interface_adapters::clients::WebhookClient;
use crate::interface_adapters::routes;
use crate::interface_adapters::state::{AppState, SystemClock};
use crate::use_cases::{AlertRelay, Inhibitor, daily_clear_task, notification_worker};
use std::io::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::mpsc;

// Accepts tracing directives as well as numeric levels (10 = trace .. 50 = error).
fn log_directive(level: &str) -> String {
    match level.trim() {
        "10" => "trace".to_string(),
        "20" => "debug".to_string(),
        "30" => "info".to_string(),
        "40" => "warn".to_string(),
        "50" | "60" => "error".to_string(),
        other => other.to_string(),
    }
}

fn init_runtime() {
    // Load .env locally; safe to ignore when not present.
    let _ = dotenvy::dotenv();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into());
        tracing_subscriber::EnvFilter::try_new(log_directive(&level))
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"))
    });

    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .json()
            .with_current_span(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .init();
    }

    std::panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::capture();
        tracing::error!(%info, ?backtrace, "panic");
    }));
}

pub async fn run(listener: tokio::net::TcpListener, config: RelayConfig) -> Result<()> {
    let address = listener.local_addr()?;
    let state = build_state(&config)?;

    // Start the web server with the HTTP routes wired up.
    let app = routes::app(state);

    tracing::info!(
        %address,
        version = env!("CARGO_PKG_VERSION"),
        inhibit_enabled = config.inhibit_enabled,
        notifications_enabled = config.notifications_enabled,
        "alert relay listening"
    );
    tracing::debug!("debug logging enabled.");

    // Serve app and report errors rather than panicking.
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .inspect_err(|e| {
        tracing::error!(error = %e, "server error");
    })
}

pub async fn run_with_config() -> Result<()> {
    init_runtime();

    let config = RelayConfig::from_env()
        .inspect_err(|e| {
            tracing::error!(error = %e, "refusing to start, configuration is incomplete");
        })
        .map_err(std::io::Error::other)?;

    let address = config.listen_addr;

    // Bind TCP listener with error handling.
    let listener = tokio::net::TcpListener::bind(address)
        .await
        .inspect_err(|e| {
            tracing::error!(%address, error = %e, "failed to bind");
        })?;

    run(listener, config).await
}

fn build_state(config: &RelayConfig) -> Result<Arc<AppState>> {
    let webhook = WebhookClient::new(config.webhook_url.clone(), config.webhook_timeout)
        .map_err(|e| std::io::Error::other(format!("failed to initialize webhook client: {e}")))?;
    tracing::debug!(
        webhook_url = %config.webhook_url,
        webhook_timeout_ms = config.webhook_timeout.as_millis(),
        "webhook client configured"
    );

    // Outbound calls run on their own task, after the alert has been answered.
    let (outbound_tx, outbound_rx) = mpsc::channel::<String>(NOTIFY_QUEUE_CAPACITY);
    tokio::spawn(notification_worker(outbound_rx, Arc::new(webhook)));

    let inhibitor = Arc::new(Inhibitor::new(Arc::new(SystemClock), config.inhibit_window));
    if config.inhibit_enabled {
        tracing::debug!(
            window_minutes = config.inhibit_window.as_secs() / 60,
            clear_at = %config.inhibit_clear_at,
            "inhibit table configured"
        );
        tokio::spawn(daily_clear_task(inhibitor.clone(), config.inhibit_clear_at));
    }

    let relay = AlertRelay::new(config.relay_settings(), inhibitor, outbound_tx);
    Ok(Arc::new(AppState {
        relay: Arc::new(relay),
    }))
}
