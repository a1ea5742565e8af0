//! Shared domain types for the cartoonizer service.
//!
//! Holds the pieces every other crate agrees on: the domain error type,
//! normalization of inbound image payloads, and artifact file naming.

pub mod error;
pub mod naming;
pub mod payload;
