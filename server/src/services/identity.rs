// artisan_market/src/services/identity.rs

//! Token verification. Handlers only ever see a verified `Identity`; how the
//! token was issued is the verifier's business.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;
use tracing::{debug, instrument};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
  Artisan,
  Buyer,
}

impl Role {
  pub fn as_str(self) -> &'static str {
    match self {
      Role::Artisan => "artisan",
      Role::Buyer => "buyer",
    }
  }

  pub fn parse(value: &str) -> Option<Role> {
    match value.trim().to_ascii_lowercase().as_str() {
      "artisan" => Some(Role::Artisan),
      "buyer" => Some(Role::Buyer),
      _ => None,
    }
  }
}

/// An already-authenticated actor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Identity {
  pub id: String,
  pub name: String,
  pub role: Role,
  pub email: Option<String>,
}

#[derive(Debug, Error)]
pub enum AuthError {
  #[error("missing bearer token")]
  MissingToken,

  #[error("invalid or expired token")]
  InvalidToken,

  #[error("invalid token grant: {0}")]
  InvalidGrant(String),
}

#[async_trait]
pub trait TokenVerifier: Send + Sync {
  async fn verify(&self, token: &str) -> Result<Identity, AuthError>;
}

/// Development verifier: any non-empty token is the fixed test artisan.
#[derive(Debug, Clone, Default)]
pub struct DevTokenVerifier;

impl DevTokenVerifier {
  pub fn identity() -> Identity {
    Identity {
      id: "user_123".to_string(),
      name: "Test Artisan".to_string(),
      role: Role::Artisan,
      email: Some("artisan@example.com".to_string()),
    }
  }
}

#[async_trait]
impl TokenVerifier for DevTokenVerifier {
  async fn verify(&self, token: &str) -> Result<Identity, AuthError> {
    if token.trim().is_empty() {
      return Err(AuthError::MissingToken);
    }
    Ok(Self::identity())
  }
}

/// Verifies against a fixed table of `token -> identity` grants.
#[derive(Debug, Clone, Default)]
pub struct StaticTokenVerifier {
  grants: HashMap<String, Identity>,
}

impl StaticTokenVerifier {
  pub fn new(grants: HashMap<String, Identity>) -> Self {
    Self { grants }
  }

  /// Parses `token:user_id:display name:role` entries separated by commas.
  pub fn from_grants(entries: &str) -> Result<Self, AuthError> {
    let mut grants = HashMap::new();
    for entry in entries.split(',').map(str::trim).filter(|e| !e.is_empty()) {
      let parts: Vec<&str> = entry.splitn(4, ':').map(str::trim).collect();
      let [token, user_id, name, role] = parts[..] else {
        return Err(AuthError::InvalidGrant(format!(
          "expected token:user_id:name:role, got '{}'",
          entry
        )));
      };
      if token.is_empty() || user_id.is_empty() {
        return Err(AuthError::InvalidGrant(format!("empty token or user id in '{}'", entry)));
      }
      let role = Role::parse(role).ok_or_else(|| AuthError::InvalidGrant(format!("unknown role '{}'", role)))?;
      grants.insert(
        token.to_string(),
        Identity {
          id: user_id.to_string(),
          name: name.to_string(),
          role,
          email: None,
        },
      );
    }
    Ok(Self::new(grants))
  }

  pub fn len(&self) -> usize {
    self.grants.len()
  }

  pub fn is_empty(&self) -> bool {
    self.grants.is_empty()
  }
}

#[async_trait]
impl TokenVerifier for StaticTokenVerifier {
  #[instrument(name = "StaticTokenVerifier::verify", skip_all)]
  async fn verify(&self, token: &str) -> Result<Identity, AuthError> {
    if token.trim().is_empty() {
      return Err(AuthError::MissingToken);
    }
    let identity = self.grants.get(token).cloned().ok_or(AuthError::InvalidToken)?;
    debug!(user_id = %identity.id, "Token verified.");
    Ok(identity)
  }
}
