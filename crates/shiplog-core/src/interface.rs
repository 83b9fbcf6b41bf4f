//! External-boundary contracts: local persistence, cloud sync, photo
//! ingestion, and export.
//!
//! Only these boundaries have a failure channel. Core transformations stay
//! total; everything here reports failure through explicit results or
//! completion callbacks, never by leaving core state inconsistent. Local
//! persistence is the durability anchor — draft and log writes succeed or
//! fail independently of any cloud outcome.

use crate::value::Value;
use serde::{Deserialize, Serialize};
use shiplog_schema::types::GenId;
use std::collections::BTreeMap;
use thiserror::Error;

///
/// Scope
///
/// Named slot in the local store. Key strings are part of the persisted
/// format and must not change.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Scope {
    Draft,
    LastSubmit,
}

impl Scope {
    #[must_use]
    pub const fn storage_key(self) -> &'static str {
        match self {
            Self::Draft => "erlog:draft",
            Self::LastSubmit => "erlog:lastSubmit",
        }
    }
}

///
/// StoreError
///

#[derive(Debug, Error)]
#[remain::sorted]
pub enum StoreError {
    #[error("store backend failed: {0}")]
    Backend(String),

    #[error("store serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

///
/// LocalStore
///
/// Durable key-value persistence plus an append-only submission log. A
/// corrupt stored entry is recovered as absent (with a logged notice), never
/// raised — loading degrades to "no draft found".
///

pub trait LocalStore {
    fn save(&mut self, scope: Scope, entry: &Value) -> Result<(), StoreError>;
    fn load(&mut self, scope: Scope) -> Option<Value>;
    fn append_log(&mut self, entry: &Value) -> Result<(), StoreError>;
    fn read_log(&mut self) -> Vec<Value>;
}

///
/// MemoryStore
///
/// In-memory [`LocalStore`] holding entries as JSON strings, the same shape
/// a durable string store would hold. Backs tests and cloudless sessions.
///

#[derive(Debug, Default)]
pub struct MemoryStore {
    slots: BTreeMap<&'static str, String>,
    log: Vec<String>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a slot with raw text, bypassing serialization. Lets tests model
    /// a corrupted store.
    pub fn seed_raw(&mut self, scope: Scope, raw: &str) {
        self.slots.insert(scope.storage_key(), raw.to_string());
    }
}

impl LocalStore for MemoryStore {
    fn save(&mut self, scope: Scope, entry: &Value) -> Result<(), StoreError> {
        let json = serde_json::to_string(entry)?;
        self.slots.insert(scope.storage_key(), json);
        Ok(())
    }

    fn load(&mut self, scope: Scope) -> Option<Value> {
        let raw = self.slots.get(scope.storage_key())?;
        match serde_json::from_str(raw) {
            Ok(entry) => Some(entry),
            Err(e) => {
                log::warn!("discarding corrupt entry at '{}': {e}", scope.storage_key());
                None
            }
        }
    }

    fn append_log(&mut self, entry: &Value) -> Result<(), StoreError> {
        self.log.push(serde_json::to_string(entry)?);
        Ok(())
    }

    fn read_log(&mut self) -> Vec<Value> {
        self.log
            .iter()
            .filter_map(|raw| match serde_json::from_str(raw) {
                Ok(entry) => Some(entry),
                Err(e) => {
                    log::warn!("skipping corrupt log record: {e}");
                    None
                }
            })
            .collect()
    }
}

///
/// CloudError
///

#[derive(Debug, Error)]
#[remain::sorted]
pub enum CloudError {
    #[error("cloud backend is not configured")]
    Disabled,

    #[error("cloud request failed: {0}")]
    Request(String),
}

/// Completion callback for a one-shot cloud call.
pub type CloudCallback<T> = Box<dyn FnOnce(Result<T, CloudError>)>;

///
/// Subscription
///
/// Handle for a remote-change subscription; dropping or cancelling it stops
/// notifications.
///

pub struct Subscription {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    #[must_use]
    pub fn new(cancel: Box<dyn FnOnce()>) -> Self {
        Self {
            cancel: Some(cancel),
        }
    }

    pub fn cancel(mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

///
/// CloudBackend
///
/// Remote persistence triplet. All calls complete asynchronously through
/// their callback; a call never blocks form interactivity and never reports
/// synchronously. `fetch_entries` delivers entries ordered by creation time
/// ascending.
///

pub trait CloudBackend {
    fn enabled(&self) -> bool;
    fn save_entry(&self, entry: &Value, done: CloudCallback<()>);
    fn fetch_entries(&self, done: CloudCallback<Vec<Value>>);
    fn subscribe(&self, on_change: Box<dyn Fn(Value)>) -> Subscription;
}

///
/// DisabledCloud
///
/// Stand-in backend for local-only sessions: every call completes
/// immediately with [`CloudError::Disabled`].
///

#[derive(Clone, Copy, Debug, Default)]
pub struct DisabledCloud;

impl CloudBackend for DisabledCloud {
    fn enabled(&self) -> bool {
        false
    }

    fn save_entry(&self, _entry: &Value, done: CloudCallback<()>) {
        done(Err(CloudError::Disabled));
    }

    fn fetch_entries(&self, done: CloudCallback<Vec<Value>>) {
        done(Err(CloudError::Disabled));
    }

    fn subscribe(&self, _on_change: Box<dyn Fn(Value)>) -> Subscription {
        Subscription::new(Box::new(|| {}))
    }
}

/// Upper bound on one uploaded image.
pub const MAX_IMAGE_BYTES: usize = 10 * 1024 * 1024;

/// Image formats the scan pipeline accepts.
pub const ALLOWED_IMAGE_TYPES: &[&str] = &[
    "image/png",
    "image/jpeg",
    "image/jpg",
    "image/gif",
    "image/webp",
];

///
/// IngestError
///
/// Pre-flight rejections carry the actionable message shown to the
/// operator; nothing is processed or retried after a rejection.
///

#[derive(Debug, Error)]
#[remain::sorted]
pub enum IngestError {
    #[error("no images provided")]
    EmptyRequest,

    #[error(
        "HEIC/HEIF format not supported; convert iPhone photos to JPEG before uploading \
         (Photos app: select the photo, Share, Save to Files, choose JPEG)"
    )]
    HeicUnsupported,

    #[error("file too large; maximum size is 10MB")]
    Oversized,

    #[error("scan request failed: {0}")]
    Request(String),

    #[error("unsupported file type '{0}'; supported types: png, jpeg, jpg, gif, webp")]
    UnsupportedFormat(String),
}

///
/// ImagePayload
///

#[derive(Clone, Debug)]
pub struct ImagePayload {
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl ImagePayload {
    #[must_use]
    pub fn new(content_type: &str, bytes: Vec<u8>) -> Self {
        Self {
            content_type: content_type.to_string(),
            bytes,
        }
    }
}

/// Pre-flight validation of a scan request, applied before any upload.
pub fn validate_scan_request(images: &[ImagePayload]) -> Result<(), IngestError> {
    if images.is_empty() {
        return Err(IngestError::EmptyRequest);
    }

    for image in images {
        if !ALLOWED_IMAGE_TYPES.contains(&image.content_type.as_str()) {
            if image.content_type == "image/heic" || image.content_type == "image/heif" {
                return Err(IngestError::HeicUnsupported);
            }
            return Err(IngestError::UnsupportedFormat(image.content_type.clone()));
        }
        if image.bytes.len() > MAX_IMAGE_BYTES {
            return Err(IngestError::Oversized);
        }
    }

    Ok(())
}

///
/// ScanEntry
///
/// One extracted reading: a key-path plus its scalar value. Paths are still
/// untrusted here; the form controller applies the allow-list and the
/// rendered-surface gate.
///

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScanEntry {
    pub path: String,
    pub value: Value,
}

///
/// ScanOutcome
///

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanOutcome {
    #[serde(default)]
    pub active_generators: Vec<GenId>,
    pub entries: Vec<ScanEntry>,
}

///
/// PhotoIngestBackend
///
/// Asynchronous extraction of readings from photographed log sheets. The
/// request must pass [`validate_scan_request`] first; completion is
/// delivered through the callback.
///

pub trait PhotoIngestBackend {
    fn scan(&self, images: &[ImagePayload], done: Box<dyn FnOnce(Result<ScanOutcome, IngestError>)>);
}

///
/// ExportError
///

#[derive(Debug, Error)]
#[remain::sorted]
pub enum ExportError {
    #[error("export failed: {0}")]
    Failed(String),
}

///
/// Exporter
///
/// Consumes one full serialized entry; layout and destination are entirely
/// the exporter's concern.
///

pub trait Exporter {
    fn export_entry(&mut self, entry: &Value) -> Result<(), ExportError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(content_type: &str, len: usize) -> ImagePayload {
        ImagePayload::new(content_type, vec![0; len])
    }

    #[test]
    fn scope_keys_match_the_persisted_format() {
        assert_eq!(Scope::Draft.storage_key(), "erlog:draft");
        assert_eq!(Scope::LastSubmit.storage_key(), "erlog:lastSubmit");
    }

    #[test]
    fn store_round_trips_entries_per_scope() {
        let mut store = MemoryStore::new();
        let entry: Value = serde_json::from_str(r#"{"port":{"rpm":"900"}}"#).unwrap();

        store.save(Scope::Draft, &entry).unwrap();
        assert_eq!(store.load(Scope::Draft), Some(entry));
        assert_eq!(store.load(Scope::LastSubmit), None);
    }

    #[test]
    fn corrupt_slot_loads_as_absent() {
        let mut store = MemoryStore::new();
        store.seed_raw(Scope::Draft, "{not json");
        assert_eq!(store.load(Scope::Draft), None);
    }

    #[test]
    fn log_preserves_append_order() {
        let mut store = MemoryStore::new();
        for rpm in ["800", "900"] {
            let entry: Value =
                serde_json::from_str(&format!(r#"{{"port":{{"rpm":"{rpm}"}}}}"#)).unwrap();
            store.append_log(&entry).unwrap();
        }

        let log = store.read_log();
        assert_eq!(log.len(), 2);
        assert_eq!(
            crate::codec::read_at(&log[0], "port.rpm"),
            Some(&Value::from("800"))
        );
    }

    #[test]
    fn empty_scan_request_is_rejected() {
        assert!(matches!(
            validate_scan_request(&[]),
            Err(IngestError::EmptyRequest)
        ));
    }

    #[test]
    fn oversized_image_is_rejected() {
        let images = [image("image/jpeg", MAX_IMAGE_BYTES + 1)];
        assert!(matches!(
            validate_scan_request(&images),
            Err(IngestError::Oversized)
        ));
    }

    #[test]
    fn heic_gets_the_conversion_message() {
        let err = validate_scan_request(&[image("image/heic", 10)]).unwrap_err();
        assert!(err.to_string().contains("JPEG"));
    }

    #[test]
    fn supported_formats_pass() {
        let images = [image("image/png", 10), image("image/webp", MAX_IMAGE_BYTES)];
        assert!(validate_scan_request(&images).is_ok());
    }

    #[test]
    fn scan_outcome_parses_the_wire_shape() {
        let outcome: ScanOutcome = serde_json::from_str(
            r#"{"activeGenerators":[1,3],"entries":[{"path":"gen1.kw","value":"120"}]}"#,
        )
        .unwrap();

        assert_eq!(outcome.active_generators, [GenId::new(1), GenId::new(3)]);
        assert_eq!(outcome.entries[0].path, "gen1.kw");
        assert_eq!(outcome.entries[0].value, Value::from("120"));
    }

    #[test]
    fn disabled_cloud_completes_every_call_with_disabled() {
        use std::{cell::Cell, rc::Rc};

        let cloud = DisabledCloud;
        assert!(!cloud.enabled());

        let seen = Rc::new(Cell::new(false));
        let flag = Rc::clone(&seen);
        cloud.save_entry(
            &Value::map(),
            Box::new(move |result| {
                assert!(matches!(result, Err(CloudError::Disabled)));
                flag.set(true);
            }),
        );
        assert!(seen.get());
    }
}
