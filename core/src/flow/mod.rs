// artisan_core/src/flow/mod.rs

//! Step pipelines used to orchestrate each marketplace request.

pub mod context_data;
pub mod control;
pub mod execution;
pub mod pipeline;
pub mod registry;
pub mod step;

pub use context_data::ContextData;
pub use control::{PipelineControl, PipelineResult};
pub use pipeline::{Handler, Pipeline};
pub use registry::FlowRegistry;
pub use step::{SkipCondition, StepDef};
