//! Per-request orchestration for AI Writer.
//!
//! A [`RequestHandler`] turns a validated [`writer_primitives::GenerationRequest`]
//! into a cleaned [`writer_primitives::GenerationResult`] by building the
//! content-type prompt, calling the shared generation gateway, and cleaning
//! the raw output. Each request walks a small [`RequestPipeline`] state machine
//! so stage transitions show up in traces.

#![warn(missing_docs, clippy::pedantic)]

mod handler;
mod pipeline;

pub use handler::RequestHandler;
pub use pipeline::{PipelineEvent, PipelineStage, RequestPipeline};
