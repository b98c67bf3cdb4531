// artisan_market/src/pipelines/mod.rs

//! Defines and registers the request pipelines of the marketplace.

use crate::errors::AppError;
use artisan_core::FlowRegistry;

pub mod contexts;

pub mod story_pipeline;
pub mod translate_pipeline;
pub mod upload_pipeline;

/// Registers every pipeline with `flows`. Called once at start-up.
pub fn register_all_pipelines(flows: &FlowRegistry<AppError>) {
  tracing::info!("Registering pipelines...");

  upload_pipeline::register_upload_pipeline(flows);
  story_pipeline::register_story_pipeline(flows);
  translate_pipeline::register_translate_pipeline(flows);

  tracing::info!(context_types = ?flows.registered_context_types(), "All application pipelines registered.");
}
