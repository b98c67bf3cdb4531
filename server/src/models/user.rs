// artisan_market/src/models/user.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::services::identity::{Identity, Role};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
  pub id: String,
  pub email: Option<String>,
  pub name: String,
  pub picture: Option<String>,
  pub role: Role,
  /// Free-form artisan profile, shown on product detail pages.
  #[serde(default = "empty_profile")]
  pub profile: serde_json::Value,
  pub created_at: DateTime<Utc>,
}

fn empty_profile() -> serde_json::Value {
  serde_json::Value::Object(Default::default())
}

impl User {
  /// A fresh record for a verified identity, as stored on first sign-in.
  pub fn from_identity(identity: &Identity, now: DateTime<Utc>) -> Self {
    Self {
      id: identity.id.clone(),
      email: identity.email.clone(),
      name: identity.name.clone(),
      picture: None,
      role: identity.role,
      profile: empty_profile(),
      created_at: now,
    }
  }
}
