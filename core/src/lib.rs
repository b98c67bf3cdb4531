// artisan_core/src/lib.rs

//! Orchestration core for the artisan marketplace.
//!
//! The crate is split into three layers:
//!  - `flow`: a small asynchronous step-pipeline engine. Each request kind
//!    (listing upload, story, translation) is a `Pipeline` over its own context
//!    type, dispatched through a type-keyed `FlowRegistry`.
//!  - `ai`: prompt construction, the completion client seam, response parsing
//!    and the `ContentGenerator` that always answers with either the model's
//!    output or a deterministic fallback.
//!  - `catalog`: the product record, provenance tracking, the user/AI merge
//!    and the per-language translation map.

pub mod ai;
pub mod catalog;
pub mod error;
pub mod flow;

// --- Re-exports for the Public API ---

pub use crate::flow::context_data::ContextData;
pub use crate::flow::control::{PipelineControl, PipelineResult};
pub use crate::flow::pipeline::{Handler, Pipeline};
pub use crate::flow::registry::FlowRegistry;
pub use crate::flow::step::{SkipCondition, StepDef};

pub use crate::error::{FlowError, FlowResult};

pub use crate::ai::{
  CompletionClient, CompletionError, ContentGenerator, ContentRequest, ContentSuggestion, DisabledCompletionClient,
  GeneratorSettings, HttpCompletionClient, StoryRequest, TranslationRequest, TranslationResult,
};
pub use crate::catalog::{ContentField, ContentType, MergedContent, Product, Provenance, Translations, UploadFields};

/*
    Request flow:
    1. The server builds a context (e.g. upload fields + authenticated artisan).
    2. `FlowRegistry::run` finds the pipeline registered for that context type.
    3. Steps call `ContentGenerator`, which builds a prompt, asks the completion
       client once (or a bounded number of times), parses the completion and
       falls back deterministically on any failure.
    4. `catalog::merge_upload` combines user fields with the suggestion and
       records provenance; translation steps use `Translations::set`.
*/
