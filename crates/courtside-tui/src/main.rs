// Courtside entry point.
//
// Startup sequence:
// 1. Initialize tracing (log to file, not terminal)
// 2. Load config
// 3. Load the player directory and build the stats provider
// 4. Create mpsc channels
// 5. Spawn app logic task
// 6. Run the TUI until the user quits
// 7. Cleanup on exit

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use courtside_core::chart::{ChartType, StatSelection};
use courtside_core::client::StatsClient;
use courtside_core::config;
use courtside_core::directory::PlayerDirectory;
use courtside_core::provider::NbaStatsProvider;
use courtside_tui::app;
use courtside_tui::tui;
use tokio::sync::mpsc;
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize tracing (log to file, not terminal)
    init_tracing()?;
    info!("Courtside starting up");

    // 2. Load config
    let config = config::load_config().context("failed to load configuration")?;
    info!(
        "Config loaded: provider={}, per_mode={}, timeout={}s",
        config.provider.base_url,
        config.provider.per_mode.as_query(),
        config.provider.timeout_secs
    );

    // 3. Player directory and stats provider
    let directory =
        PlayerDirectory::from_config(&config.directory).context("failed to load player directory")?;

    let provider =
        NbaStatsProvider::new(&config.provider).context("failed to build stats provider")?;
    let client = Arc::new(StatsClient::new(Arc::new(provider), Arc::new(directory)));

    // 4. Create mpsc channels
    let (cmd_tx, cmd_rx) = mpsc::channel(64);
    let (ui_tx, ui_rx) = mpsc::channel(64);
    let (result_tx, result_rx) = mpsc::channel(16);

    let app_state = app::AppState::new(client, result_tx);

    // 5. Spawn app logic task
    let app_handle = tokio::spawn(async move {
        if let Err(e) = app::run(cmd_rx, result_rx, ui_tx, app_state).await {
            error!("Application loop error: {}", e);
        }
    });

    // 6. Run the TUI event loop (blocking until user quits)
    let default_stat = config
        .ui
        .default_stat
        .parse()
        .unwrap_or(StatSelection::Points);
    let default_chart = config.ui.default_chart.parse().unwrap_or(ChartType::Line);
    let view_state = tui::ViewState::with_defaults(default_stat, default_chart);
    let tick_rate = Duration::from_millis(config.ui.tick_rate_ms);

    info!("Application ready");
    if let Err(e) = tui::run(ui_rx, cmd_tx, view_state, tick_rate).await {
        error!("TUI error: {}", e);
    }

    // 7. Cleanup: wait for app task to finish (with timeout)
    let _ = tokio::time::timeout(Duration::from_secs(5), async {
        let _ = app_handle.await;
    })
    .await;

    info!("Courtside shut down cleanly");
    Ok(())
}

/// Initialize tracing to log to a file (not the terminal, which is used by the TUI).
fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let log_dir = std::env::current_dir()?.join("logs");
    std::fs::create_dir_all(&log_dir)?;
    let log_file = std::fs::File::create(log_dir.join("courtside.log"))?;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new("courtside=info,courtside_tui=info,courtside_core=info,warn")
        }))
        .with_writer(log_file)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
