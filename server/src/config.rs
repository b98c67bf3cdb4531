// artisan_market/src/config.rs

use crate::errors::{AppError, Result};
use std::env;
use std::time::Duration;

pub const ANY_ORIGIN: &str = "*";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthMode {
  /// Any non-empty bearer token is the development artisan.
  #[default]
  Dev,
  /// Tokens must appear in `AUTH_TOKENS`.
  Static,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
  #[default]
  Pretty,
  Json,
}

impl LogFormat {
  /// Used before the full configuration is loaded, to set up logging.
  pub fn from_env() -> Self {
    match env::var("LOG_FORMAT").ok().as_deref().map(str::trim) {
      Some(v) if v.eq_ignore_ascii_case("json") => LogFormat::Json,
      _ => LogFormat::Pretty,
    }
  }
}

#[derive(Clone)]
pub struct AppConfig {
  pub server_host: String,
  pub server_port: u16,
  pub database_url: Option<String>,

  pub ai_api_key: Option<String>,
  pub ai_base_url: String,
  pub ai_model: String,
  pub ai_timeout: Duration,
  pub ai_max_retries: u32,

  pub auth_mode: AuthMode,
  /// Raw `token:user_id:name:role` list, parsed by the static verifier.
  pub auth_tokens: String,

  pub log_format: LogFormat,

  /// Allowed browser origins; `*` allows any.
  pub cors_origins: Vec<String>,
}

impl std::fmt::Debug for AppConfig {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("AppConfig")
      .field("server_host", &self.server_host)
      .field("server_port", &self.server_port)
      .field("database_configured", &self.database_url.is_some())
      .field("ai_enabled", &self.ai_api_key.is_some())
      .field("ai_base_url", &self.ai_base_url)
      .field("ai_model", &self.ai_model)
      .field("ai_timeout", &self.ai_timeout)
      .field("ai_max_retries", &self.ai_max_retries)
      .field("auth_mode", &self.auth_mode)
      .field("log_format", &self.log_format)
      .field("cors_origins", &self.cors_origins)
      .finish()
  }
}

impl Default for AppConfig {
  fn default() -> Self {
    Self {
      server_host: "127.0.0.1".to_string(),
      server_port: 8080,
      database_url: None,
      ai_api_key: None,
      ai_base_url: "https://api.openai.com/v1".to_string(),
      ai_model: "gpt-4o-mini".to_string(),
      ai_timeout: Duration::from_secs(30),
      ai_max_retries: 0,
      auth_mode: AuthMode::Dev,
      auth_tokens: String::new(),
      log_format: LogFormat::Pretty,
      cors_origins: vec![ANY_ORIGIN.to_string()],
    }
  }
}

impl AppConfig {
  pub fn from_env() -> Result<Self> {
    dotenvy::dotenv().ok();
    Self::from_lookup(|name| env::var(name).ok())
  }

  /// Builds the configuration from any variable source; blank values count as unset.
  pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
    let get_env = |var_name: &str| lookup(var_name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
    let defaults = Self::default();

    let server_host = get_env("SERVER_HOST").unwrap_or(defaults.server_host);
    let server_port = match get_env("SERVER_PORT") {
      Some(v) => v
        .parse::<u16>()
        .map_err(|e| AppError::Config(format!("Invalid SERVER_PORT '{}': {}", v, e)))?,
      None => defaults.server_port,
    };

    let ai_timeout = match get_env("AI_TIMEOUT_SECS") {
      Some(v) => match v.parse::<u64>() {
        Ok(secs) if secs > 0 => Duration::from_secs(secs),
        _ => return Err(AppError::Config(format!("Invalid AI_TIMEOUT_SECS '{}': expected a positive integer", v))),
      },
      None => defaults.ai_timeout,
    };
    let ai_max_retries = match get_env("AI_MAX_RETRIES") {
      Some(v) => v
        .parse::<u32>()
        .map_err(|e| AppError::Config(format!("Invalid AI_MAX_RETRIES '{}': {}", v, e)))?,
      None => defaults.ai_max_retries,
    };

    let auth_mode = match get_env("AUTH_MODE").as_deref() {
      None => AuthMode::Dev,
      Some(v) if v.eq_ignore_ascii_case("dev") => AuthMode::Dev,
      Some(v) if v.eq_ignore_ascii_case("static") => AuthMode::Static,
      Some(v) => return Err(AppError::Config(format!("Invalid AUTH_MODE '{}': expected dev or static", v))),
    };
    let log_format = match get_env("LOG_FORMAT").as_deref() {
      None => LogFormat::Pretty,
      Some(v) if v.eq_ignore_ascii_case("pretty") => LogFormat::Pretty,
      Some(v) if v.eq_ignore_ascii_case("json") => LogFormat::Json,
      Some(v) => return Err(AppError::Config(format!("Invalid LOG_FORMAT '{}': expected pretty or json", v))),
    };

    let cors_origins = match get_env("CORS_ORIGINS") {
      Some(v) => {
        let origins: Vec<String> = v
          .split(',')
          .map(str::trim)
          .filter(|o| !o.is_empty())
          .map(str::to_string)
          .collect();
        if origins.is_empty() {
          defaults.cors_origins
        } else {
          origins
        }
      }
      None => defaults.cors_origins,
    };

    Ok(Self {
      server_host,
      server_port,
      database_url: get_env("DATABASE_URL"),
      ai_api_key: get_env("AI_API_KEY"),
      ai_base_url: get_env("AI_BASE_URL").unwrap_or(defaults.ai_base_url),
      ai_model: get_env("AI_MODEL").unwrap_or(defaults.ai_model),
      ai_timeout,
      ai_max_retries,
      auth_mode,
      auth_tokens: get_env("AUTH_TOKENS").unwrap_or_default(),
      log_format,
      cors_origins,
    })
  }
}
