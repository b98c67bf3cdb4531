// tests/generator_tests.rs
mod common;

use artisan_core::{
  CompletionError, ContentGenerator, ContentRequest, GeneratorSettings, StoryRequest, TranslationRequest,
};
use artisan_core::catalog::ContentType;
use common::*;
use serial_test::serial;
use std::sync::Arc;
use std::time::Duration;

fn pottery_request() -> ContentRequest {
  ContentRequest {
    description: "Beautiful handmade terracotta pot".to_string(),
    category: "pottery".to_string(),
    materials: vec!["terracotta".to_string()],
    artisan_name: Some("Test Artisan".to_string()),
  }
}

fn story_request() -> StoryRequest {
  StoryRequest {
    product_title: "Terracotta Water Pot".to_string(),
    description: "Beautiful handmade terracotta pot".to_string(),
    category: "pottery".to_string(),
    materials: vec!["terracotta".to_string()],
    artisan_name: None,
    voice_input: None,
  }
}

fn generator(client: Arc<MockCompletionClient>, settings: GeneratorSettings) -> ContentGenerator {
  ContentGenerator::new(client, settings)
}

fn fast_settings(max_retries: u32) -> GeneratorSettings {
  GeneratorSettings {
    timeout: Duration::from_millis(200),
    max_retries,
    retry_base_delay: Duration::from_millis(1),
  }
}

#[tokio::test]
#[serial]
async fn test_fenced_json_completion_is_used() {
  setup_tracing();
  let client = Arc::new(MockCompletionClient::replying(
    "```json\n{\"title\":\"Terracotta Water Pot\",\"description\":\"Wheel thrown.\",\"price_suggestion\":850,\"cultural_context\":\"Kumhar tradition.\",\"keywords\":[\"pottery\"]}\n```",
  ));
  let gen = generator(client.clone(), fast_settings(0));

  let suggestion = gen.generate_product_content(&pottery_request()).await;

  assert_eq!(suggestion.title, "Terracotta Water Pot");
  assert_eq!(suggestion.price_suggestion, 850.0);
  assert_eq!(client.calls(), 1);
  assert!(client.prompts()[0].contains("Category: pottery"));
}

#[tokio::test]
#[serial]
async fn test_prose_completion_falls_back() {
  setup_tracing();
  let client = Arc::new(MockCompletionClient::replying("What a lovely pot! I'd call it the Sunset Pot."));
  let gen = generator(client, fast_settings(0));

  let suggestion = gen.generate_product_content(&pottery_request()).await;

  assert_eq!(suggestion.title, "Handcrafted pottery");
  assert_eq!(suggestion.description, "Beautiful handmade terracotta pot");
  assert_eq!(suggestion.price_suggestion, 500.0);
  assert_eq!(suggestion.keywords, vec!["pottery", "handmade", "traditional"]);
}

#[tokio::test]
#[serial]
async fn test_disabled_generator_always_falls_back() {
  setup_tracing();
  let gen = ContentGenerator::disabled();

  let suggestion = gen.generate_product_content(&pottery_request()).await;
  assert_eq!(suggestion.title, "Handcrafted pottery");

  let story = gen.generate_story(&story_request()).await;
  assert!(story.starts_with("This beautiful pottery represents the timeless artistry"));

  let translation = gen
    .translate(&TranslationRequest {
      text: "Handwoven silk scarf".to_string(),
      target_language: "ta".to_string(),
      content_type: ContentType::new(ContentType::TITLE),
    })
    .await;
  assert_eq!(translation.translated_text, "Handwoven silk scarf");
  assert_eq!(translation.target_language, "ta");
}

#[tokio::test]
#[serial]
async fn test_slow_completion_times_out_to_fallback() {
  setup_tracing();
  let client = Arc::new(MockCompletionClient::new(vec![Scripted::Slow(
    Duration::from_secs(2),
    "A story that arrives too late.".to_string(),
  )]));
  let gen = generator(client.clone(), fast_settings(0));

  let story = gen.generate_story(&story_request()).await;

  assert!(story.starts_with("This beautiful pottery"));
  assert_eq!(client.calls(), 1);
}

#[tokio::test]
#[serial]
async fn test_retryable_failure_is_retried() {
  setup_tracing();
  let client = Arc::new(MockCompletionClient::new(vec![
    Scripted::Fail(CompletionError::Service {
      status: 503,
      body: "overloaded".to_string(),
    }),
    Scripted::Reply("மென்மையான பட்டு".to_string()),
  ]));
  let gen = generator(client.clone(), fast_settings(2));

  let translation = gen
    .translate(&TranslationRequest {
      text: "Soft silk".to_string(),
      target_language: "ta".to_string(),
      content_type: ContentType::default(),
    })
    .await;

  assert_eq!(translation.translated_text, "மென்மையான பட்டு");
  assert_eq!(client.calls(), 2);
}

#[tokio::test]
#[serial]
async fn test_non_retryable_failure_is_not_retried() {
  setup_tracing();
  let client = Arc::new(MockCompletionClient::new(vec![
    Scripted::Fail(CompletionError::Service {
      status: 401,
      body: "bad key".to_string(),
    }),
    Scripted::Reply("never used".to_string()),
  ]));
  let gen = generator(client.clone(), fast_settings(3));

  let story = gen.generate_story(&story_request()).await;

  assert!(story.starts_with("This beautiful pottery"));
  assert_eq!(client.calls(), 1);
}

#[tokio::test]
#[serial]
async fn test_default_settings_make_a_single_attempt() {
  setup_tracing();
  let client = Arc::new(MockCompletionClient::new(vec![Scripted::Fail(CompletionError::Transport(
    "connection refused".to_string(),
  ))]));
  let gen = ContentGenerator::new(client.clone(), GeneratorSettings::default());

  let suggestion = gen.generate_product_content(&pottery_request()).await;

  assert_eq!(suggestion.price_suggestion, 500.0);
  assert_eq!(client.calls(), 1);
  assert_eq!(gen.settings().max_retries, 0);
  assert_eq!(gen.settings().timeout, Duration::from_secs(30));
}
