// artisan_market/src/pipelines/story_pipeline.rs

use crate::errors::AppError;
use crate::pipelines::contexts::StoryCtxData;
use artisan_core::{ContextData, FlowRegistry, Pipeline, PipelineControl, StepDef};
use tracing::{info, warn};

pub fn register_story_pipeline(flows: &FlowRegistry<AppError>) {
  let mut story_p = Pipeline::<StoryCtxData, AppError>::new(vec![
    StepDef::required("load_owned_product"),
    StepDef::required("generate_story"),
    StepDef::required("persist_story"),
  ]);

  // Only the owning artisan may attach a story; anyone else sees a 404.
  story_p.on("load_owned_product", |ctx_data: ContextData<StoryCtxData>| {
    Box::pin(async move {
      let (store, product_id, actor_id) = {
        let guard = ctx_data.read();
        (guard.app_state.store.clone(), guard.product_id.clone(), guard.actor.id.clone())
      };

      match store.get_product(&product_id).await? {
        Some(product) if product.artisan_id == actor_id => Ok::<_, AppError>(PipelineControl::Continue),
        Some(_) => {
          warn!(%product_id, %actor_id, "Story requested for a product owned by another artisan.");
          Err(AppError::NotFound("Product not found".to_string()))
        }
        None => Err(AppError::NotFound("Product not found".to_string())),
      }
    })
  });

  story_p.on("generate_story", |ctx_data: ContextData<StoryCtxData>| {
    Box::pin(async move {
      let (generator, request) = ctx_data.with(|c| (c.app_state.generator.clone(), c.request.clone()));
      let story = generator.generate_story(&request).await;
      ctx_data.write().story = Some(story);
      Ok::<_, AppError>(PipelineControl::Continue)
    })
  });

  story_p.on("persist_story", |ctx_data: ContextData<StoryCtxData>| {
    Box::pin(async move {
      let (store, product_id, actor_id, story) = {
        let guard = ctx_data.read();
        (
          guard.app_state.store.clone(),
          guard.product_id.clone(),
          guard.actor.id.clone(),
          guard.story.clone().unwrap_or_default(),
        )
      };

      if !store.set_story(&product_id, &actor_id, &story).await? {
        return Err(AppError::NotFound("Product not found".to_string()));
      }
      info!(%product_id, "Story stored.");
      Ok::<_, AppError>(PipelineControl::Continue)
    })
  });

  flows.register(story_p);
  info!("Product story pipeline registered.");
}
