// artisan_market/src/pipelines/translate_pipeline.rs

use crate::errors::AppError;
use crate::pipelines::contexts::TranslateCtxData;
use artisan_core::{ContextData, FlowRegistry, Pipeline, PipelineControl, StepDef};
use tracing::{event, info, Level};

pub fn register_translate_pipeline(flows: &FlowRegistry<AppError>) {
  let mut translate_p = Pipeline::<TranslateCtxData, AppError>::new(vec![
    StepDef::required("validate_translation"),
    StepDef::required("load_product"),
    StepDef::required("translate_text"),
    StepDef::required("store_translation"),
  ]);

  translate_p.on("validate_translation", |ctx_data: ContextData<TranslateCtxData>| {
    Box::pin(async move {
      let (text_blank, language_blank, label_blank) = ctx_data.with(|c| {
        (
          c.request.text.trim().is_empty(),
          c.request.target_language.trim().is_empty(),
          c.request.content_type.is_blank(),
        )
      });
      if text_blank {
        return Err(AppError::Validation("text must not be empty".to_string()));
      }
      if language_blank {
        return Err(AppError::Validation("target_language must not be empty".to_string()));
      }
      if label_blank {
        return Err(AppError::Validation("content_type must not be empty".to_string()));
      }
      Ok::<_, AppError>(PipelineControl::Continue)
    })
  });

  translate_p.on("load_product", |ctx_data: ContextData<TranslateCtxData>| {
    Box::pin(async move {
      let (store, product_id) = ctx_data.with(|c| (c.app_state.store.clone(), c.product_id.clone()));
      if store.get_product(&product_id).await?.is_none() {
        return Err(AppError::NotFound("Product not found".to_string()));
      }
      Ok::<_, AppError>(PipelineControl::Continue)
    })
  });

  translate_p.on("translate_text", |ctx_data: ContextData<TranslateCtxData>| {
    Box::pin(async move {
      let (generator, request) = ctx_data.with(|c| (c.app_state.generator.clone(), c.request.clone()));
      let result = generator.translate(&request).await;
      ctx_data.write().result = Some(result);
      Ok::<_, AppError>(PipelineControl::Continue)
    })
  });

  translate_p.on("store_translation", |ctx_data: ContextData<TranslateCtxData>| {
    Box::pin(async move {
      let (store, product_id, content_type, result) = {
        let guard = ctx_data.read();
        (
          guard.app_state.store.clone(),
          guard.product_id.clone(),
          guard.request.content_type.clone(),
          guard.result.clone(),
        )
      };
      let result = result.ok_or_else(|| AppError::Internal("no translation to store".to_string()))?;

      let stored = store
        .set_translation(&product_id, &result.target_language, content_type.as_str(), &result.translated_text)
        .await?;
      if !stored {
        return Err(AppError::NotFound("Product not found".to_string()));
      }
      event!(Level::INFO, %product_id, language = %result.target_language, %content_type, "Translation stored.");
      Ok::<_, AppError>(PipelineControl::Continue)
    })
  });

  flows.register(translate_p);
  info!("Product translation pipeline registered.");
}
