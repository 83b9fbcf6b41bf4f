//! shiplog — schema-driven engine-room log form engine
//!
//! This is the public meta-crate. Downstream users depend on **shiplog**
//! only.
//!
//! It re-exports the stable public API from:
//!   - `shiplog-schema`  (form document model, key-paths, naming tables)
//!   - `shiplog-core`    (renderer, selection state machine, codec,
//!     serializer, range checker, external-interface contracts)

pub use shiplog_core as core;
pub use shiplog_schema as schema;

pub use core::Error;

/// The shipped production form document.
#[must_use]
pub fn engine_room_log() -> schema::node::Document {
    schema::shipped::engine_room_log()
}

//
// Prelude
//

pub mod prelude {
    pub use shiplog_core::prelude::*;
}
