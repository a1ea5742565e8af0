//! Supabase Storage client.
//!
//! Uploads raw image bytes to a public bucket and builds the public URL
//! under which the object is served. Also fetches generated artifacts by
//! URL so they can be re-hosted.

pub mod client;
pub mod error;

pub use client::{StorageClient, StorageConfig};
pub use error::StorageError;
