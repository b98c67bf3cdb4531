// artisan_core/src/flow/execution.rs

//! `Pipeline::run`: walks the steps in order and drives their handlers.

use crate::error::FlowError;
use crate::flow::context_data::ContextData;
use crate::flow::control::{PipelineControl, PipelineResult};
use crate::flow::pipeline::{Phase, Pipeline};
use tracing::{event, info_span, instrument, Instrument, Level};

enum StepOutcome {
  Finished,
  Stopped,
}

impl<TData, Err> Pipeline<TData, Err>
where
  TData: 'static + Send + Sync,
  Err: std::error::Error + From<FlowError> + Send + Sync + 'static,
{
  /// Runs every step against `ctx_data`.
  ///
  /// A step is skipped when its `skip_if` condition holds, or when it is
  /// optional and has no handlers. A required step without handlers fails with
  /// `FlowError::HandlerMissing`. The first handler error aborts the run.
  #[instrument(
    name = "Pipeline::run",
    skip_all,
    fields(
      context_type = %std::any::type_name::<TData>(),
      num_steps = self.steps.len(),
    ),
    err(Display)
  )]
  pub async fn run(&self, ctx_data: ContextData<TData>) -> Result<PipelineResult, Err> {
    event!(Level::DEBUG, "Pipeline execution starting.");

    for (step_index, step_def) in self.steps.iter().enumerate() {
      let step_span = info_span!(
        "pipeline_step",
        step_name = step_def.name.as_str(),
        step_index,
        optional = step_def.optional
      );

      if let Some(skip_condition) = &step_def.skip_if {
        if skip_condition(&ctx_data) {
          step_span.in_scope(|| event!(Level::INFO, "Step skipped by its condition."));
          continue;
        }
      }

      let handlers = match self.handlers.get(&step_def.name) {
        Some(h) if !h.is_empty() => h,
        _ if step_def.optional => {
          step_span.in_scope(|| event!(Level::DEBUG, "Optional step has no handlers, skipping."));
          continue;
        }
        _ => {
          step_span.in_scope(|| event!(Level::ERROR, "Required step has no handlers."));
          return Err(Err::from(FlowError::HandlerMissing {
            step_name: step_def.name.clone(),
          }));
        }
      };

      let outcome = async {
        for phase in Phase::ORDER {
          for (handler_index, handler_fn) in handlers.phase(phase).iter().enumerate() {
            let handler_span = tracing::debug_span!("handler", phase = phase.label(), handler_index);
            match handler_fn(ctx_data.clone()).instrument(handler_span).await {
              Ok(PipelineControl::Continue) => {}
              Ok(PipelineControl::Stop) => {
                event!(Level::INFO, phase = phase.label(), "Pipeline stopped by a handler.");
                return Ok(StepOutcome::Stopped);
              }
              Err(e) => {
                event!(Level::ERROR, phase = phase.label(), error = %e, "Handler failed.");
                return Err(e);
              }
            }
          }
        }
        Ok(StepOutcome::Finished)
      }
      .instrument(step_span)
      .await?;

      if let StepOutcome::Stopped = outcome {
        return Ok(PipelineResult::Stopped);
      }
    }

    event!(Level::DEBUG, "Pipeline execution completed.");
    Ok(PipelineResult::Completed)
  }
}
