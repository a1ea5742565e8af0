//! Replicate prediction client.
//!
//! Submits a generation job to the Replicate HTTP API, polls it at a fixed
//! interval until it reaches a terminal state, and extracts the primary
//! output URL. Wire types live in [`prediction`], raw HTTP calls in
//! [`api`], and the submit/await flow in [`client`].

pub mod api;
pub mod client;
pub mod error;
pub mod poll;
pub mod prediction;

pub use client::{PredictionHandle, ReplicateClient, ReplicateConfig};
pub use error::ReplicateError;
pub use poll::PollPolicy;
pub use prediction::{Prediction, PredictionInput, PredictionState};
