//! # homesimd: smart-home simulation daemon
//!
//! Composition root that wires all adapters together and starts the server.
//!
//! ## Responsibilities
//! - Load configuration (config file, env vars)
//! - Initialize logging
//! - Open the `SQLite` log store
//! - Build the simulated home with its random sources and feedback
//! - Start the three periodic tasks
//! - Bind to a TCP port and serve the API
//! - Shut down gracefully on Ctrl-C: stop the tasks, then close the store
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer; no domain logic belongs here.

mod config;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use homesim_adapter_http_axum::state::AppState;
use homesim_adapter_storage_sqlite_sqlx::SqliteLogStore;
use homesim_adapter_virtual::{SeededRandom, TerminalBell, ThreadRandom};
use homesim_app::alert_bus::AlertBus;
use homesim_app::home::Home;
use homesim_app::ports::{Feedback, RandomSource, Silent};
use homesim_app::scheduler::Scheduler;

use crate::config::Config;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.logging.filter))
        .init();

    // Database
    let db = homesim_adapter_storage_sqlite_sqlx::Config {
        database_url: config.database_url().to_string(),
    }
    .build()
    .await?;
    tracing::info!(url = config.database_url(), "database opened");
    let store = SqliteLogStore::new(db.pool().clone());

    // Simulated hardware
    let (sensor_random, log_random): (Arc<dyn RandomSource>, Arc<dyn RandomSource>) =
        match config.simulation.seed {
            Some(seed) => {
                tracing::info!(seed, "using seeded randomness");
                (
                    Arc::new(SeededRandom::stream(seed, 0)),
                    Arc::new(SeededRandom::stream(seed, 1)),
                )
            }
            None => (Arc::new(ThreadRandom), Arc::new(ThreadRandom)),
        };
    let feedback: Arc<dyn Feedback> = if config.simulation.feedback {
        Arc::new(TerminalBell)
    } else {
        Arc::new(Silent)
    };

    // Home
    let alerts = Arc::new(AlertBus::new(256));
    let home = Arc::new(
        Home::builder()
            .store(store)
            .sensor_random(sensor_random)
            .log_random(log_random)
            .feedback(feedback)
            .alerts(Arc::clone(&alerts) as _)
            .schedule(config.schedule.clone())
            .thresholds(config.alerts)
            .build()?,
    );
    for rule in home.schedule() {
        tracing::info!(%rule, "schedule rule loaded");
    }

    // Periodic tasks
    let mut scheduler = Scheduler::new();
    homesim_app::tasks::spawn_all(&mut scheduler, &home, config.periods());

    // HTTP
    let app = homesim_adapter_http_axum::router::build(AppState::new(Arc::clone(&home), alerts));

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(%bind_addr, "homesimd listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    scheduler.shutdown().await;
    home.shutdown().await;
    tracing::info!("homesimd stopped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(%err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown requested");
}
