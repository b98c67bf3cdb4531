// artisan_market/src/web/handlers/auth_handlers.rs

use actix_web::{web, HttpResponse};
use chrono::Utc;
use tracing::{info, instrument};

use crate::errors::AppError;
use crate::models::user::User;
use crate::state::AppState;
use crate::web::extractors::AuthenticatedUser;

/// Records the verified caller as a user and returns the stored record.
#[instrument(name = "handler::create_session", skip(app_state, auth_user), fields(user_id = %auth_user.0.id))]
pub async fn create_session_handler(
  app_state: web::Data<AppState>,
  auth_user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
  let user = app_state
    .store
    .upsert_user(&User::from_identity(&auth_user.0, Utc::now()))
    .await?;
  info!("Session established.");
  Ok(HttpResponse::Ok().json(user))
}

#[instrument(name = "handler::current_user", skip(app_state, auth_user), fields(user_id = %auth_user.0.id))]
pub async fn current_user_handler(
  app_state: web::Data<AppState>,
  auth_user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
  let user = match app_state.store.get_user(&auth_user.0.id).await? {
    Some(user) => user,
    // Not signed in through /auth/session yet: answer from the token alone.
    None => User::from_identity(&auth_user.0, Utc::now()),
  };
  Ok(HttpResponse::Ok().json(user))
}
