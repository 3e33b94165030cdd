//! # Tutor Scheduler Bot Main Entry Point
//!
//! Initializes logging, loads configuration, sets up the database,
//! starts the agenda job and health server, and runs the Telegram bot.

use anyhow::Result;
use std::sync::Arc;
use teloxide::prelude::*;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tutor_scheduler_bot::bot::handlers::BotHandler;
use tutor_scheduler_bot::config::Config;
use tutor_scheduler_bot::database::connection::DatabaseManager;
use tutor_scheduler_bot::services::agenda::AgendaService;
use tutor_scheduler_bot::services::health::HealthService;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tutor_scheduler_bot=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Arc::new(Config::from_env()?);

    info!("Starting Tutor Scheduler Bot v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Configuration loaded - Database: {}, HTTP Port: {}, Teacher rate: {}, Week starts: {}",
        config.database_url, config.http_port, config.teacher_rate, config.week_start
    );

    // Initialize database
    info!("Initializing database connection...");
    let db_manager = DatabaseManager::new(&config.database_url).await?;
    info!("Running database migrations...");
    db_manager.run_migrations().await?;
    let db = Arc::new(db_manager);
    info!("Database initialized successfully");

    let bot = Bot::new(&config.telegram_bot_token);
    let handler = BotHandler::new(db.clone(), config.clone());

    let mut agenda = AgendaService::new(bot.clone(), db.clone(), config.clone())
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create agenda service: {}", e))?;

    if let Err(e) = agenda.start().await {
        tracing::error!("Failed to start agenda service: {}", e);
    }

    let health_service = HealthService::new(db.clone());
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.http_port))
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind to port {}: {}", config.http_port, e))?;

    info!("Health check server starting on port {}", config.http_port);

    let bot_task = tokio::spawn(async move {
        Dispatcher::builder(bot, handler.schema())
            .enable_ctrlc_handler()
            .build()
            .dispatch()
            .await;
    });

    let health_task = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, health_service.router).await {
            tracing::error!("Health server error: {}", e);
        }
    });

    // Either task finishing means shutdown
    tokio::select! {
        result = bot_task => {
            if let Err(e) = result {
                tracing::error!("Bot task error: {}", e);
            }
        }
        result = health_task => {
            if let Err(e) = result {
                tracing::error!("Health task error: {}", e);
            }
        }
    }

    if let Err(e) = agenda.stop().await {
        tracing::warn!("Error stopping agenda service: {}", e);
    }

    info!("Application stopped");
    Ok(())
}
