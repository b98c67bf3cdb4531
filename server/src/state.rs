// artisan_market/src/state.rs

use crate::config::AppConfig;
use crate::errors::AppError;
use crate::pipelines;
use crate::services::identity::TokenVerifier;
use crate::services::store::MarketStore;
use artisan_core::{ContentGenerator, FlowRegistry};
use std::sync::Arc;

/// Long-lived services, built once at start-up and handed to every request.
#[derive(Clone)]
pub struct AppState {
  pub store: Arc<dyn MarketStore>,
  pub flows: Arc<FlowRegistry<AppError>>,
  pub generator: Arc<ContentGenerator>,
  pub verifier: Arc<dyn TokenVerifier>,
  pub config: Arc<AppConfig>,
}

impl AppState {
  /// Wires the services together and registers every request pipeline.
  pub fn new(
    store: Arc<dyn MarketStore>,
    generator: Arc<ContentGenerator>,
    verifier: Arc<dyn TokenVerifier>,
    config: Arc<AppConfig>,
  ) -> Self {
    let flows = Arc::new(FlowRegistry::<AppError>::new());
    pipelines::register_all_pipelines(&flows);
    Self {
      store,
      flows,
      generator,
      verifier,
      config,
    }
  }
}
