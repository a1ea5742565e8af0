//! The cartoonize request flow.
//!
//! Validate the inbound image, run a prediction, then re-host the result in
//! object storage. Every stage is fatal: a failure anywhere discards what
//! was produced so far and fails the whole request.

pub mod cartoonize;
pub mod error;

pub use cartoonize::{CartoonizePipeline, CartoonizeRequest, PipelineOptions};
pub use error::PipelineError;
