use crate::interface::{CloudError, IngestError, StoreError};
use thiserror::Error;

///
/// Error
///
/// Top-level error for the core crate. Core transformations never produce
/// one; only controller construction (schema validation) and the external
/// boundaries do.
///

#[derive(Debug, Error)]
#[remain::sorted]
pub enum Error {
    #[error(transparent)]
    Cloud(#[from] CloudError),

    #[error(transparent)]
    Ingest(#[from] IngestError),

    #[error(transparent)]
    Schema(#[from] shiplog_schema::Error),

    #[error(transparent)]
    Store(#[from] StoreError),
}
