//! RSI Sentry Worker
//!
//! Evaluates the SOLUSDT hourly RSI on a schedule and alerts a Discord
//! channel when it turns overbought or oversold.

use dotenvy::dotenv;
use rsi_sentry::config::Settings;
use rsi_sentry::core::http::{start_server, AppState};
use rsi_sentry::core::runtime::{RuntimeConfig, SignalRuntime};
use rsi_sentry::core::scheduler::JobScheduler;
use rsi_sentry::jobs::context::{CycleSettings, JobContext};
use rsi_sentry::logging;
use rsi_sentry::metrics::Metrics;
use rsi_sentry::services::bybit::{BybitRestClient, RetryPolicy};
use rsi_sentry::services::discord::DiscordNotifier;
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env if present
    dotenv().ok();

    logging::init_logging();

    let env = rsi_sentry::config::get_environment();
    info!("Starting RSI Sentry worker");
    info!(environment = %env, "Environment");

    let settings = Settings::from_env().map_err(|e| {
        error!(error = %e, "invalid configuration");
        e
    })?;
    info!(
        symbol = %settings.symbol,
        interval = %settings.interval,
        period = settings.rsi_period,
        overbought = settings.thresholds.overbought,
        oversold = settings.thresholds.oversold,
        "Watching {} RSI({}) on {}m candles",
        settings.symbol,
        settings.rsi_period,
        settings.interval
    );

    let metrics = Arc::new(Metrics::new()?);

    let provider = BybitRestClient::new(settings.bybit_base_url.clone()).with_retry_policy(
        RetryPolicy {
            max_retries: settings.fetch_max_retries,
            delay: settings.fetch_retry_delay,
        },
    );

    let notifier = Arc::new(DiscordNotifier::new(
        settings.discord_api_url.clone(),
        settings.discord_token.clone(),
    ));
    info!("Connecting to Discord...");
    notifier.connect().await.map_err(|e| {
        error!(error = %e, "Discord login failed");
        e
    })?;

    let job_context = Arc::new(JobContext::new(
        Arc::new(provider),
        notifier.clone(),
        CycleSettings::from(&settings),
        Some(metrics.clone()),
    ));
    let runtime = Arc::new(SignalRuntime::new(
        RuntimeConfig::from(&settings),
        job_context,
    ));

    let scheduler = JobScheduler::new(runtime.clone())?;
    scheduler.start().await;

    let server_handle = settings.http_port.map(|port| {
        let state = AppState {
            metrics: metrics.clone(),
            start_time: Arc::new(Instant::now()),
            runtime: Some(runtime.clone()),
        };
        tokio::spawn(async move {
            if let Err(e) = start_server(port, state).await {
                error!(error = %e, "HTTP server error");
            }
        })
    });

    info!("Worker started, waiting for shutdown signal...");
    shutdown_signal().await;

    info!("Shutting down worker...");
    scheduler.stop().await;
    if let Some(handle) = server_handle {
        handle.abort();
    }
    notifier.disconnect().await;
    info!("Worker stopped");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
