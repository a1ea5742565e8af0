use cartoonizer_core::error::CoreError;
use cartoonizer_replicate::ReplicateError;
use cartoonizer_storage::StorageError;

/// Any failure of the cartoonize flow, tagged by the stage that raised it.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Replicate(#[from] ReplicateError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}
