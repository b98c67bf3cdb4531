// artisan_core/src/ai/mod.rs

//! AI content orchestration: prompt building, the completion client, response
//! parsing with fallbacks, and the generator tying them together.

pub mod client;
pub mod generator;
pub mod parser;
pub mod prompts;
pub mod types;

pub use client::{CompletionClient, CompletionError, DisabledCompletionClient, HttpCompletionClient};
pub use generator::{ContentGenerator, GeneratorSettings};
pub use parser::ParseError;
pub use prompts::PromptIntent;
pub use types::{ContentRequest, ContentSuggestion, StoryRequest, TranslationRequest, TranslationResult};
