//! Declarative schema model for the shiplog engine-room form: section and
//! field descriptors, key-path syntax, label normalization tables, and the
//! fail-fast document validator consumed by the renderer.

pub mod error;
pub mod naming;
pub mod node;
pub mod path;
pub mod shipped;
pub mod types;
pub mod validate;

use thiserror::Error as ThisError;

///
/// CONSTANTS
///

/// Maximum length for section identifiers.
pub const MAX_SECTION_ID_LEN: usize = 64;

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        err,
        error::ErrorTree,
        node::*,
        path::KeyPath,
        types::{GenId, InputKind},
    };
    pub use serde::{Deserialize, Serialize};
}

///
/// Error
///

#[derive(Debug, ThisError)]
#[remain::sorted]
pub enum Error {
    #[error(transparent)]
    Path(#[from] path::PathError),

    #[error(transparent)]
    Validate(#[from] validate::ValidateError),
}
