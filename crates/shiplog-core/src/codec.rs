//! Key-path codec: walks and mutates the nested entry tree addressed by a
//! [`KeyPath`].
//!
//! Both operations are total. `read` never fails on a missing path; `write`
//! creates intermediate maps on demand. Writing through an existing scalar
//! replaces it with a fresh map — that silent-coercion policy is deliberate
//! (last write wins, like the historical form) and each occurrence is logged
//! and counted rather than raised.

use crate::{obs, value::Value};
use shiplog_schema::path::KeyPath;

/// Write `value` at `path`, creating intermediate map levels as needed.
/// Repeated writes at the same path are idempotent; the last write wins.
pub fn write(root: &mut Value, path: &KeyPath, value: Value) {
    let (last, intermediates) = match path.segments() {
        [] => return, // unreachable: parse guarantees at least one segment
        [intermediates @ .., last] => (last, intermediates),
    };

    let mut node = root;
    let mut walked = Vec::with_capacity(intermediates.len());

    for segment in intermediates {
        walked.push(segment.as_str());
        node = coerce_map(node, &walked)
            .entry(segment.clone())
            .or_insert_with(Value::map);
    }

    coerce_map(node, &walked).insert(last.clone(), value);
}

/// View `node` as a mutable map, replacing any scalar found there. The
/// replacement is the codec's documented silent-coercion policy; it is
/// logged and counted, never raised.
fn coerce_map<'a>(
    node: &'a mut Value,
    at: &[&str],
) -> &'a mut std::collections::BTreeMap<String, Value> {
    if !node.is_map() {
        log::warn!(
            "key-path write through scalar at '{}'; replacing with a map",
            at.join(".")
        );
        obs::record_codec_coercion();
        *node = Value::map();
    }

    let Value::Map(map) = node else {
        unreachable!("node was just coerced to a map")
    };
    map
}

/// Read the value at `path`, or `None` if any level is missing. Never fails.
#[must_use]
pub fn read<'a>(root: &'a Value, path: &KeyPath) -> Option<&'a Value> {
    let mut node = root;
    for segment in path.segments() {
        node = node.as_map()?.get(segment)?;
    }
    Some(node)
}

/// Convenience for static rule tables: parse-and-read in one step. Invalid
/// paths read as absent.
#[must_use]
pub fn read_at<'a>(root: &'a Value, path: &str) -> Option<&'a Value> {
    let path = KeyPath::parse(path).ok()?;
    read(root, &path)
}
