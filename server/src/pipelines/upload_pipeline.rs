// artisan_market/src/pipelines/upload_pipeline.rs

use crate::errors::AppError;
use crate::pipelines::contexts::UploadCtxData;
use artisan_core::catalog::merge_upload;
use artisan_core::{ContentRequest, ContextData, FlowRegistry, Pipeline, PipelineControl, Product, StepDef};
use chrono::Utc;
use tracing::{debug, event, info, instrument, Level};
use uuid::Uuid;

/// Description sent to the model when the artisan left theirs blank.
pub const DEFAULT_LISTING_DESCRIPTION: &str = "Beautiful handcrafted item";

/// Registers the product-upload pipeline: validate, ask the AI for listing
/// content, merge it with what the artisan typed, then persist.
pub fn register_upload_pipeline(flows: &FlowRegistry<AppError>) {
  let mut upload_p = Pipeline::<UploadCtxData, AppError>::new(vec![
    StepDef::required("validate_listing"),
    StepDef::optional("note_voice_input")
      .skip_if(|ctx: &ContextData<UploadCtxData>| !ctx.read().upload.has_voice_note()),
    StepDef::required("generate_listing_content"),
    StepDef::required("merge_listing_content"),
    StepDef::required("persist_product"),
  ]);

  upload_p.on("validate_listing", |ctx_data: ContextData<UploadCtxData>| {
    Box::pin(async move {
      let upload = ctx_data.with(|c| c.upload.clone());
      event!(Level::DEBUG, category = %upload.category, "Validating listing upload.");
      upload.validate()?;
      Ok::<_, AppError>(PipelineControl::Continue)
    })
  });

  upload_p.on("note_voice_input", |ctx_data: ContextData<UploadCtxData>| {
    Box::pin(async move {
      let actor_id = ctx_data.with(|c| c.actor.id.clone());
      // Transcription is not wired in; only the note's presence is recorded.
      debug!(%actor_id, "Listing upload carries a voice note.");
      Ok::<_, AppError>(PipelineControl::Continue)
    })
  });

  upload_p.on("generate_listing_content", |ctx_data: ContextData<UploadCtxData>| {
    Box::pin(async move {
      let (generator, request) = {
        let guard = ctx_data.read();
        let request = ContentRequest {
          description: guard
            .upload
            .user_description()
            .unwrap_or(DEFAULT_LISTING_DESCRIPTION)
            .to_string(),
          category: guard.upload.category.clone(),
          materials: guard.upload.materials.clone(),
          artisan_name: Some(guard.actor.name.clone()),
        };
        (guard.app_state.generator.clone(), request)
      };

      let suggestion = generator.generate_product_content(&request).await;
      ctx_data.write().suggestion = Some(suggestion);
      Ok::<_, AppError>(PipelineControl::Continue)
    })
  });

  upload_p.on("merge_listing_content", |ctx_data: ContextData<UploadCtxData>| {
    Box::pin(async move {
      ctx_data.update(|c| {
        let suggestion = c
          .suggestion
          .as_ref()
          .ok_or_else(|| AppError::Internal("merge ran without an AI suggestion".to_string()))?;
        let merged = merge_upload(&c.upload, suggestion);
        debug!(provenance = ?merged.provenance, "Listing content merged.");
        c.merged = Some(merged);
        Ok::<_, AppError>(PipelineControl::Continue)
      })
    })
  });

  upload_p.on("persist_product", |ctx_data: ContextData<UploadCtxData>| {
    Box::pin(persist_product(ctx_data))
  });

  flows.register(upload_p);
  info!("Product upload pipeline registered.");
}

#[instrument(name = "upload::persist_product", skip_all)]
async fn persist_product(ctx_data: ContextData<UploadCtxData>) -> Result<PipelineControl, AppError> {
  let (store, product) = {
    let guard = ctx_data.read();
    let merged = guard
      .merged
      .clone()
      .ok_or_else(|| AppError::Internal("persist ran without merged content".to_string()))?;
    let product = Product::from_listing(
      Uuid::new_v4().to_string(),
      guard.actor.id.clone(),
      &guard.upload,
      merged,
      Utc::now(),
    );
    (guard.app_state.store.clone(), product)
  };

  store.insert_product(&product).await?;
  info!(product_id = %product.id, artisan_id = %product.artisan_id, "Product created.");
  ctx_data.write().product = Some(product);
  Ok(PipelineControl::Continue)
}
