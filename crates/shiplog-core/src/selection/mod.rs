//! Generator selection state machine.
//!
//! Observable state is the pair (target count, active set). The `|active| ≤
//! target` invariant holds after every transition settles, and `active` is
//! kept in activation order so eviction can be oldest-first.
//!
//! One eviction rule is used everywhere (target shrink and toggle at
//! capacity): remove the least-recently-activated member first, retaining a
//! caller-supplied preferred member while any other candidate remains.
//!
//! Transitions return a [`SelectionChange`] delta; the form controller
//! applies the dependent re-render synchronously before its caller resumes,
//! so a transition and its render are one atomic unit.

#[cfg(test)]
mod tests;

use crate::{codec, value::Value};
use shiplog_schema::types::GenId;

///
/// SelectionChange
///
/// Delta produced by one transition. `activated`/`deactivated` drive which
/// gen-tagged sections must be rebuilt; `target_changed` alone only affects
/// the control widget.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SelectionChange {
    pub activated: Vec<GenId>,
    pub deactivated: Vec<GenId>,
    pub target_changed: bool,
}

impl SelectionChange {
    /// True when nothing observable changed.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.activated.is_empty() && self.deactivated.is_empty() && !self.target_changed
    }

    /// True when the rendered surface must change shape.
    #[must_use]
    pub fn affects_layout(&self) -> bool {
        !self.activated.is_empty() || !self.deactivated.is_empty()
    }

    fn merge(mut self, other: Self) -> Self {
        self.activated.extend(other.activated);
        self.deactivated.extend(other.deactivated);
        self.target_changed |= other.target_changed;
        self
    }
}

///
/// Selection
///

#[derive(Clone, Debug)]
pub struct Selection {
    universe: Vec<GenId>,
    target: usize,
    /// Activation order, oldest first.
    active: Vec<GenId>,
}

impl Selection {
    /// Initial state: target 0, nothing active.
    #[must_use]
    pub fn new(mut universe: Vec<GenId>) -> Self {
        universe.sort_unstable();
        universe.dedup();
        Self {
            universe,
            target: 0,
            active: Vec::new(),
        }
    }

    #[must_use]
    pub fn universe(&self) -> &[GenId] {
        &self.universe
    }

    #[must_use]
    pub const fn target(&self) -> usize {
        self.target
    }

    /// Active members in activation order, oldest first.
    #[must_use]
    pub fn active(&self) -> &[GenId] {
        &self.active
    }

    /// Active members in ascending id order (gen-matrix column order).
    #[must_use]
    pub fn active_sorted(&self) -> Vec<GenId> {
        let mut ids = self.active.clone();
        ids.sort_unstable();
        ids
    }

    #[must_use]
    pub fn is_active(&self, id: GenId) -> bool {
        self.active.contains(&id)
    }

    /// Set the target count, trimming the active set if it now exceeds the
    /// target. Growth never happens here — only explicit toggles add members.
    pub fn set_target(&mut self, target: usize, preferred: Option<GenId>) -> SelectionChange {
        let target = target.min(self.universe.len());
        let target_changed = target != self.target;
        self.target = target;

        let mut deactivated = Vec::new();
        while self.active.len() > self.target {
            let victim = self.pick_victim(preferred);
            self.active.retain(|&id| id != victim);
            deactivated.push(victim);
        }

        SelectionChange {
            activated: Vec::new(),
            deactivated,
            target_changed,
        }
    }

    /// Toggle one generator. Removal always succeeds; activation at capacity
    /// evicts the oldest-activated member(s) until room exists. With a zero
    /// target, activation is a no-op.
    pub fn toggle(&mut self, id: GenId) -> SelectionChange {
        if !self.universe.contains(&id) {
            return SelectionChange::default();
        }

        if self.is_active(id) {
            self.active.retain(|&a| a != id);
            return SelectionChange {
                deactivated: vec![id],
                ..SelectionChange::default()
            };
        }

        if self.target == 0 {
            return SelectionChange::default();
        }

        let mut deactivated = Vec::new();
        while self.active.len() >= self.target {
            let victim = self.pick_victim(None);
            self.active.retain(|&a| a != victim);
            deactivated.push(victim);
        }

        self.active.push(id);
        SelectionChange {
            activated: vec![id],
            deactivated,
            target_changed: false,
        }
    }

    /// Reconstruct selection state from a saved entry: the target becomes
    /// the number of `gen{N}` sub-maps present and the active set becomes
    /// exactly those ids, in ascending activation order. A sub-map counts
    /// only when it is non-empty; `"gen1": {}` carries no readings and does
    /// not activate the generator.
    pub fn infer_from_entry(&mut self, entry: &Value) -> SelectionChange {
        let ids: Vec<GenId> = self
            .universe
            .iter()
            .copied()
            .filter(|id| {
                codec::read_at(entry, &id.map_key()).is_some_and(|v| {
                    v.as_map().is_some_and(|m| !m.is_empty())
                })
            })
            .collect();

        self.activate_exactly(&ids)
    }

    /// Force the selection to exactly `ids` (ascending activation order),
    /// with the target matching. Used by entry inference and by photo-scan
    /// generator detection.
    pub fn activate_exactly(&mut self, ids: &[GenId]) -> SelectionChange {
        let mut ids: Vec<GenId> = ids
            .iter()
            .copied()
            .filter(|id| self.universe.contains(id))
            .collect();
        ids.sort_unstable();
        ids.dedup();

        let target_change = SelectionChange {
            target_changed: ids.len() != self.target,
            ..SelectionChange::default()
        };
        self.target = ids.len();

        let deactivated: Vec<GenId> = self
            .active
            .iter()
            .copied()
            .filter(|id| !ids.contains(id))
            .collect();
        let activated: Vec<GenId> = ids
            .iter()
            .copied()
            .filter(|id| !self.active.contains(id))
            .collect();

        self.active = ids;

        target_change.merge(SelectionChange {
            activated,
            deactivated,
            target_changed: false,
        })
    }

    /// Oldest-activated member, skipping `preferred` while another candidate
    /// exists. Callers only invoke this while the active set is non-empty.
    fn pick_victim(&self, preferred: Option<GenId>) -> GenId {
        self.active
            .iter()
            .copied()
            .find(|&id| Some(id) != preferred)
            .unwrap_or(self.active[0])
    }
}
