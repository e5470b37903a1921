//! PAROLI — Roulette Progression Betting Tracker
//!
//! Entry point. Loads configuration, initialises structured logging,
//! restores the session from disk (or creates fresh from config defaults),
//! serves the dashboard, and autosaves until graceful shutdown.

use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

use paroli::config;
use paroli::dashboard;
use paroli::dashboard::routes::DashboardState;
use paroli::session::Session;
use paroli::storage;

const BANNER: &str = r#"
 ____   _    ____   ___  _     ___
|  _ \ / \  |  _ \ / _ \| |   |_ _|
| |_) / _ \ | |_) | | | | |    | |
|  __/ ___ \|  _ <| |_| | |___ | |
|_| /_/   \_\_| \_\\___/|_____|___|

  Roulette Progression Betting Tracker
  v0.1.0
"#;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration from TOML
    let cfg = config::AppConfig::load("config.toml")?;

    // Initialise structured logging
    init_logging();

    // Print startup banner
    println!("{BANNER}");
    info!(
        base_stake = %cfg.session.base_stake,
        starting_capital = %cfg.session.starting_capital,
        active = ?cfg.session.active_chances,
        "PAROLI starting up"
    );

    // -- Restore or create session ----------------------------------------

    let state_file = cfg.storage.state_file.clone();
    let session = match storage::load_session(Some(&state_file))? {
        Some(s) => {
            info!(
                spins = s.spin_count(),
                balance = %s.balance(),
                "Resumed from saved session"
            );
            s
        }
        None => {
            let s = Session::new(
                cfg.session.base_stake,
                cfg.session.starting_capital,
                cfg.session.active_chances.iter().copied(),
            )?;
            info!(balance = %s.balance(), "Fresh session");
            s
        }
    };

    let state = Arc::new(DashboardState::new(session, Some(state_file.clone())));

    // -- Dashboard --------------------------------------------------------

    if cfg.dashboard.enabled {
        dashboard::spawn_dashboard(state.clone(), cfg.dashboard.port)?;
    } else {
        info!("Dashboard disabled — session is API-less this run");
    }

    // -- Autosave loop ----------------------------------------------------

    let autosave = Duration::from_secs(cfg.storage.autosave_interval_secs.max(1));
    let mut interval = tokio::time::interval(autosave);
    interval.tick().await; // first tick fires immediately; skip it
    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    info!(
        interval_secs = cfg.storage.autosave_interval_secs,
        "Running. Press Ctrl+C to stop."
    );

    loop {
        tokio::select! {
            _ = interval.tick() => {
                let session = state.session.read().await;
                if let Err(e) = storage::save_session(&session, Some(&state_file)) {
                    error!(error = %e, "Autosave failed");
                }
            }
            _ = &mut shutdown => {
                info!("Shutdown signal received.");
                break;
            }
        }
    }

    // Save final state
    let session = state.session.read().await;
    storage::save_session(&session, Some(&state_file))?;
    info!(
        spins = session.spin_count(),
        balance = %session.balance(),
        "PAROLI shut down cleanly."
    );

    Ok(())
}

/// Initialise the `tracing` subscriber.
fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("paroli=info"));

    let json_logging = std::env::var("PAROLI_LOG_JSON").is_ok();

    if json_logging {
        fmt()
            .json()
            .with_env_filter(env_filter)
            .with_target(true)
            .with_thread_ids(true)
            .init();
    } else {
        fmt()
            .with_env_filter(env_filter)
            .with_target(true)
            .init();
    }
}
