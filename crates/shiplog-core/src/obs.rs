//! Observability: ephemeral in-memory counters for diagnostic surfaces.
//!
//! Silently-recovered events (codec coercions, populate misses, dropped scan
//! paths) are counted here so they stay visible without becoming errors.

use serde::Serialize;
use std::cell::RefCell;

///
/// EventState
///

#[derive(Clone, Debug, Default, Serialize)]
pub struct EventState {
    /// Scalar-to-map replacements performed by the key-path codec.
    pub codec_coercions: u64,

    /// Entry paths with no matching rendered input during populate.
    pub populate_misses: u64,

    /// Photo-scan entries dropped by the allow-list or the rendered surface.
    pub scan_paths_dropped: u64,

    /// Section (re-)renders performed.
    pub section_renders: u64,
}

thread_local! {
    static EVENT_STATE: RefCell<EventState> = RefCell::new(EventState::default());
}

/// Borrow counters immutably.
pub(crate) fn with_state<R>(f: impl FnOnce(&EventState) -> R) -> R {
    EVENT_STATE.with(|m| f(&m.borrow()))
}

/// Borrow counters mutably.
pub(crate) fn with_state_mut<R>(f: impl FnOnce(&mut EventState) -> R) -> R {
    EVENT_STATE.with(|m| f(&mut m.borrow_mut()))
}

/// Point-in-time snapshot of all counters.
#[must_use]
pub fn snapshot() -> EventState {
    with_state(Clone::clone)
}

/// Reset all counters (useful in tests).
pub fn reset() {
    with_state_mut(|m| *m = EventState::default());
}

pub(crate) fn record_codec_coercion() {
    with_state_mut(|m| m.codec_coercions += 1);
}

pub(crate) fn record_populate_misses(count: u64) {
    with_state_mut(|m| m.populate_misses += count);
}

pub(crate) fn record_scan_drop() {
    with_state_mut(|m| m.scan_paths_dropped += 1);
}

pub(crate) fn record_section_render() {
    with_state_mut(|m| m.section_renders += 1);
}
