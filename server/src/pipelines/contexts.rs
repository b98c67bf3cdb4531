// artisan_market/src/pipelines/contexts.rs

//! Data carried through each pipeline. Handlers receive these wrapped in
//! `artisan_core::ContextData`.

use crate::services::identity::Identity;
use crate::state::AppState;
use artisan_core::catalog::MergedContent;
use artisan_core::{ContentSuggestion, Product, StoryRequest, TranslationRequest, TranslationResult, UploadFields};

#[derive(Clone)]
pub struct UploadCtxData {
  pub app_state: AppState,
  pub actor: Identity,
  pub upload: UploadFields,
  pub suggestion: Option<ContentSuggestion>,
  pub merged: Option<MergedContent>,
  pub product: Option<Product>,
}

impl UploadCtxData {
  pub fn new(app_state: AppState, actor: Identity, upload: UploadFields) -> Self {
    Self {
      app_state,
      actor,
      upload,
      suggestion: None,
      merged: None,
      product: None,
    }
  }
}

#[derive(Clone)]
pub struct StoryCtxData {
  pub app_state: AppState,
  pub actor: Identity,
  pub product_id: String,
  pub request: StoryRequest,
  pub story: Option<String>,
}

#[derive(Clone)]
pub struct TranslateCtxData {
  pub app_state: AppState,
  pub actor: Identity,
  pub product_id: String,
  pub request: TranslationRequest,
  pub result: Option<TranslationResult>,
}
