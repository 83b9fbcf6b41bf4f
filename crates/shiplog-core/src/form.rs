//! Form controller: owns the document, the generator selection, and the
//! rendered surface, and keeps the three consistent.
//!
//! The controller is the selection's single writer. Every transition and its
//! dependent re-render happen synchronously inside the transition call, so
//! callers observe the updated surface as soon as the call returns. Loading
//! an entry is two-phase for the same reason: selection inference (which
//! reshapes the surface) settles before value population, or population
//! would miss inputs that do not exist yet.

use crate::{
    Error, check,
    check::Warning,
    entry,
    entry::{PopulateStats, Stamp},
    interface::{CloudBackend, CloudCallback, CloudError, LocalStore, ScanOutcome, Scope, StoreError},
    obs, render,
    render::Surface,
    selection::{Selection, SelectionChange},
    value::Value,
};
use shiplog_schema::{naming::scan_path_allowed, node::Document, path::KeyPath, types::GenId};

///
/// Submission
///
/// Result of a locally-successful submit: the annotated entry and the
/// advisory warnings that were attached to it.
///

#[derive(Clone, Debug)]
pub struct Submission {
    pub entry: Value,
    pub warnings: Vec<Warning>,
}

///
/// ScanApplied
///
/// Accounting for one applied scan outcome. Dropped entries failed either
/// the allow-list or the rendered-surface gate; both are silent by contract.
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ScanApplied {
    pub generators_activated: bool,
    pub applied: u64,
    pub dropped: u64,
}

///
/// FormController
///

pub struct FormController {
    doc: Document,
    selection: Selection,
    surface: Surface,
    on_change: Option<Box<dyn FnMut(&SelectionChange)>>,
}

impl FormController {
    /// Validate the document, derive the selection universe from its
    /// generator control, and render the initial surface.
    pub fn new(doc: Document) -> Result<Self, Error> {
        doc.validate().map_err(shiplog_schema::Error::from)?;

        let universe = doc
            .generator_control()
            .map(|control| control.ids.clone())
            .unwrap_or_default();
        let selection = Selection::new(universe);
        let surface = render::render(&doc, &selection);

        Ok(Self {
            doc,
            selection,
            surface,
            on_change: None,
        })
    }

    #[must_use]
    pub const fn document(&self) -> &Document {
        &self.doc
    }

    #[must_use]
    pub const fn selection(&self) -> &Selection {
        &self.selection
    }

    #[must_use]
    pub const fn surface(&self) -> &Surface {
        &self.surface
    }

    /// Observer for settled selection changes. Called after the re-render,
    /// never mid-transition.
    pub fn set_change_observer(&mut self, observer: Box<dyn FnMut(&SelectionChange)>) {
        self.on_change = Some(observer);
    }

    /// Set the value of the rendered input at `path`; false when no such
    /// input currently exists.
    pub fn set_value(&mut self, path: &KeyPath, value: Value) -> bool {
        self.surface.set_value(path, value)
    }

    /// Change the generator target count. Re-renders before returning.
    pub fn set_target(&mut self, target: usize, preferred: Option<GenId>) -> SelectionChange {
        let change = self.selection.set_target(target, preferred);
        self.settle(&change);
        change
    }

    /// Toggle one generator. Re-renders before returning.
    pub fn toggle(&mut self, id: GenId) -> SelectionChange {
        let change = self.selection.toggle(id);
        self.settle(&change);
        change
    }

    /// Load a saved entry: infer the generator selection from it, let the
    /// dependent re-render settle, then populate the (now correctly shaped)
    /// surface.
    pub fn load_entry(&mut self, entry: &Value) -> PopulateStats {
        let change = self.selection.infer_from_entry(entry);
        self.settle(&change);
        entry::populate(&mut self.surface, entry)
    }

    /// Serialize the current surface, stamping blank date/time inputs with
    /// the current date and time.
    #[must_use]
    pub fn serialize(&self) -> Value {
        entry::serialize(&self.surface, &Stamp::now())
    }

    #[must_use]
    pub fn serialize_with(&self, stamp: &Stamp) -> Value {
        entry::serialize(&self.surface, stamp)
    }

    /// Persist the current surface as the draft.
    pub fn save_draft(&self, store: &mut dyn LocalStore) -> Result<(), StoreError> {
        store.save(Scope::Draft, &self.serialize())
    }

    /// Restore the draft, if one exists and parses. A corrupt or missing
    /// draft is absence, not an error.
    pub fn load_draft(&mut self, store: &mut dyn LocalStore) -> Option<PopulateStats> {
        let draft = store.load(Scope::Draft)?;
        Some(self.load_entry(&draft))
    }

    /// Submit: serialize, evaluate the range rules, annotate the entry, and
    /// persist it locally (log append plus last-submit slot). Local
    /// durability is unconditional; warnings never block.
    pub fn submit(&mut self, store: &mut dyn LocalStore) -> Result<Submission, StoreError> {
        self.submit_at(store, &Stamp::now(), entry::now_millis(), &entry::now_iso())
    }

    /// [`submit`](Self::submit) with an explicit clock, for deterministic
    /// callers.
    pub fn submit_at(
        &mut self,
        store: &mut dyn LocalStore,
        stamp: &Stamp,
        ts_millis: i64,
        iso: &str,
    ) -> Result<Submission, StoreError> {
        let mut entry = entry::serialize(&self.surface, stamp);
        let warnings = check::evaluate(&entry);
        entry::annotate_submit(&mut entry, &warnings, ts_millis, iso);

        store.append_log(&entry)?;
        store.save(Scope::LastSubmit, &entry)?;

        if !warnings.is_empty() {
            log::info!("submission recorded with {} advisory warning(s)", warnings.len());
        }

        Ok(Submission { entry, warnings })
    }

    /// Submit locally, then forward to the cloud when it is enabled. The
    /// local outcome is returned synchronously; the cloud outcome arrives
    /// through `done` and never affects local durability.
    pub fn submit_with_cloud(
        &mut self,
        store: &mut dyn LocalStore,
        cloud: &dyn CloudBackend,
        done: CloudCallback<()>,
    ) -> Result<Submission, StoreError> {
        let submission = self.submit(store)?;

        if cloud.enabled() {
            cloud.save_entry(&submission.entry, done);
        } else {
            done(Err(CloudError::Disabled));
        }

        Ok(submission)
    }

    /// Apply a photo-scan outcome: activate exactly the detected generators
    /// (when any were detected), then write each extracted reading that
    /// passes both the allow-list and the rendered-surface gate.
    pub fn apply_scan(&mut self, outcome: &ScanOutcome) -> ScanApplied {
        let mut applied = ScanApplied::default();

        if !outcome.active_generators.is_empty() {
            let change = self.selection.activate_exactly(&outcome.active_generators);
            self.settle(&change);
            applied.generators_activated = true;
        }

        for scan in &outcome.entries {
            if !scan_path_allowed(&scan.path) {
                log::debug!("scan path '{}' rejected by allow-list", scan.path);
                obs::record_scan_drop();
                applied.dropped += 1;
                continue;
            }

            let Ok(path) = KeyPath::parse(&scan.path) else {
                obs::record_scan_drop();
                applied.dropped += 1;
                continue;
            };

            if self.surface.set_value(&path, scan.value.clone()) {
                applied.applied += 1;
            } else {
                log::debug!("scan path '{}' has no rendered input", scan.path);
                obs::record_scan_drop();
                applied.dropped += 1;
            }
        }

        applied
    }

    // Transition epilogue: re-render if the shape changed, then notify.
    fn settle(&mut self, change: &SelectionChange) {
        if change.affects_layout() {
            render::apply_selection_change(&mut self.surface, &self.doc, &self.selection);
        }
        if !change.is_noop()
            && let Some(observer) = self.on_change.as_mut()
        {
            observer(change);
        }
    }
}
