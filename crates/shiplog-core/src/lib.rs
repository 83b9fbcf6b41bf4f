//! Core runtime for the shiplog form engine: the entry value tree and
//! key-path codec, the generator selection state machine, the schema-driven
//! renderer and its surface, entry serialization, range checking, and the
//! external-interface contracts.

pub mod check;
pub mod codec;
pub mod entry;
pub mod error;
pub mod form;
pub mod interface;
pub mod obs;
pub mod render;
pub mod selection;
pub mod value;

pub use error::Error;

///
/// Prelude
///
/// Domain vocabulary only; stores, backends, and helpers are imported from
/// their modules.
///

pub mod prelude {
    pub use crate::{
        form::FormController,
        render::{Input, Surface},
        selection::{Selection, SelectionChange},
        value::Value,
    };
    pub use shiplog_schema::{
        node::Document,
        path::KeyPath,
        types::{GenId, InputKind},
    };
}
