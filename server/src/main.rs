// artisan_market/src/main.rs

mod config;
mod errors;
mod models;
mod pipelines;
mod services;
mod state;
mod web;

use crate::config::{AppConfig, AuthMode, LogFormat};
use crate::errors::{AppError, Result as AppResult};
use crate::services::identity::{DevTokenVerifier, StaticTokenVerifier, TokenVerifier};
use crate::services::memory_store::InMemoryMarketStore;
use crate::services::pg_store::PgMarketStore;
use crate::services::store::MarketStore;
use crate::state::AppState;

use actix_web::{web as actix_data, App, HttpServer};
use anyhow::Context;
use artisan_core::{CompletionClient, ContentGenerator, DisabledCompletionClient, GeneratorSettings, HttpCompletionClient};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::EnvFilter;

fn init_tracing(format: LogFormat) {
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
  let builder = tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_span_events(FmtSpan::CLOSE);
  match format {
    LogFormat::Json => builder.json().init(),
    LogFormat::Pretty => builder.init(),
  }
}

async fn build_store(config: &AppConfig) -> AppResult<Arc<dyn MarketStore>> {
  let Some(database_url) = config.database_url.as_deref() else {
    warn!("DATABASE_URL is not set; products and users are kept in memory only.");
    return Ok(Arc::new(InMemoryMarketStore::new()));
  };

  let pool = PgPoolOptions::new().max_connections(10).connect(database_url).await?;
  info!("Successfully connected to the database.");
  sqlx::migrate!("./migrations")
    .run(&pool)
    .await
    .context("Database migration failed")?;
  Ok(Arc::new(PgMarketStore::new(pool)))
}

fn build_generator(config: &AppConfig) -> AppResult<ContentGenerator> {
  let client: Arc<dyn CompletionClient> = match config.ai_api_key.as_deref() {
    Some(api_key) => {
      let client = HttpCompletionClient::new(api_key, config.ai_timeout)
        .map_err(|e| AppError::Config(e.to_string()))?
        .with_base_url(config.ai_base_url.as_str())
        .with_model(config.ai_model.as_str());
      info!(model = client.model(), "AI completion client configured.");
      Arc::new(client)
    }
    None => {
      warn!("AI_API_KEY is not set; every AI request will use its fallback.");
      Arc::new(DisabledCompletionClient)
    }
  };

  let generator = ContentGenerator::new(
    client,
    GeneratorSettings {
      timeout: config.ai_timeout,
      max_retries: config.ai_max_retries,
      ..GeneratorSettings::default()
    },
  );
  info!(settings = ?generator.settings(), "Content generator ready.");
  Ok(generator)
}

fn build_verifier(config: &AppConfig) -> AppResult<Arc<dyn TokenVerifier>> {
  match config.auth_mode {
    AuthMode::Dev => {
      warn!("AUTH_MODE=dev: any bearer token is accepted as the development artisan.");
      Ok(Arc::new(DevTokenVerifier))
    }
    AuthMode::Static => {
      let verifier = StaticTokenVerifier::from_grants(&config.auth_tokens)?;
      if verifier.is_empty() {
        return Err(AppError::Config("AUTH_MODE=static requires AUTH_TOKENS".to_string()));
      }
      info!(grants = verifier.len(), "Static token verifier configured.");
      Ok(Arc::new(verifier))
    }
  }
}

async fn build_app_state(config: Arc<AppConfig>) -> AppResult<AppState> {
  let store = build_store(&config).await?;
  let generator = Arc::new(build_generator(&config)?);
  let verifier = build_verifier(&config)?;
  Ok(AppState::new(store, generator, verifier, config))
}

fn startup_error(e: AppError) -> std::io::Error {
  error!(error = %e, "Server start-up failed.");
  std::io::Error::new(std::io::ErrorKind::Other, e.to_string())
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
  dotenvy::dotenv().ok();
  init_tracing(LogFormat::from_env());

  info!("Starting artisan marketplace server...");

  let app_config = Arc::new(AppConfig::from_env().map_err(startup_error)?);
  info!(config = ?app_config, "Application configuration loaded.");

  let app_state = build_app_state(app_config.clone()).await.map_err(startup_error)?;

  let server_address = format!("{}:{}", app_config.server_host, app_config.server_port);
  info!("Attempting to bind server to {}...", server_address);

  let cors_origins = app_config.cors_origins.clone();
  HttpServer::new(move || {
    App::new()
      .app_data(actix_data::Data::new(app_state.clone()))
      .wrap(web::cors_policy(&cors_origins))
      .wrap(tracing_actix_web::TracingLogger::default())
      .configure(web::configure_app_routes)
  })
  .bind(&server_address)?
  .run()
  .await
}
