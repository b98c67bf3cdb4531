// tests/common/mod.rs
#![allow(dead_code)]

use artisan_core::{CompletionClient, CompletionError, ContextData, FlowError, PipelineControl};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tracing::Level;

// --- Context used by the flow tests ---
#[derive(Clone, Debug, Default)]
pub struct TestContext {
  pub counter: i32,
  pub steps_executed: Vec<String>,
  pub should_stop_at: Option<String>,
  pub skip_enrichment: bool,
}

#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum TestError {
  #[error("Flow error: {0}")]
  Flow(String),

  #[error("Test handler failed: {0}")]
  Handler(String),
}

impl From<FlowError> for TestError {
  fn from(fe: FlowError) -> Self {
    TestError::Flow(format!("{:?}", fe))
  }
}

pub fn create_recording_handler(step_name: &'static str) -> artisan_core::Handler<TestContext, TestError> {
  Box::new(move |ctx: ContextData<TestContext>| {
    Box::pin(async move {
      let mut guard = ctx.write();
      guard.counter += 1;
      guard.steps_executed.push(step_name.to_string());
      if guard.should_stop_at.as_deref() == Some(step_name) {
        return Ok(PipelineControl::Stop);
      }
      Ok(PipelineControl::Continue)
    })
  })
}

pub fn create_failing_handler(
  step_name: &'static str,
  error_message: &'static str,
) -> artisan_core::Handler<TestContext, TestError> {
  Box::new(move |ctx: ContextData<TestContext>| {
    Box::pin(async move {
      ctx.write().steps_executed.push(step_name.to_string());
      Err(TestError::Handler(error_message.to_string()))
    })
  })
}

// --- Scripted completion client ---

pub enum Scripted {
  Reply(String),
  Fail(CompletionError),
  /// Sleeps before replying; used to trip the generator's timeout.
  Slow(Duration, String),
}

/// Answers each `complete` call with the next scripted response and records
/// every prompt it receives. An exhausted script fails with `Disabled`.
#[derive(Default)]
pub struct MockCompletionClient {
  script: Mutex<VecDeque<Scripted>>,
  prompts: Mutex<Vec<String>>,
  calls: AtomicUsize,
}

impl MockCompletionClient {
  pub fn new(script: Vec<Scripted>) -> Self {
    Self {
      script: Mutex::new(script.into()),
      ..Default::default()
    }
  }

  pub fn replying(text: impl Into<String>) -> Self {
    Self::new(vec![Scripted::Reply(text.into())])
  }

  pub fn calls(&self) -> usize {
    self.calls.load(Ordering::SeqCst)
  }

  pub fn prompts(&self) -> Vec<String> {
    self.prompts.lock().clone()
  }
}

#[async_trait]
impl CompletionClient for MockCompletionClient {
  async fn complete(&self, prompt: &str) -> Result<String, CompletionError> {
    self.calls.fetch_add(1, Ordering::SeqCst);
    self.prompts.lock().push(prompt.to_string());
    let next = self.script.lock().pop_front();
    match next {
      Some(Scripted::Reply(text)) => Ok(text),
      Some(Scripted::Fail(e)) => Err(e),
      Some(Scripted::Slow(delay, text)) => {
        tokio::time::sleep(delay).await;
        Ok(text)
      }
      None => Err(CompletionError::Disabled),
    }
  }
}

// --- Tracing ---
use once_cell::sync::Lazy;
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer()
    .try_init()
    .ok();
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}
