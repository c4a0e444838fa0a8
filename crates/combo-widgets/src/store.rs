//! The authoritative option list behind a combobox.
//!
//! While the user filters, the dropdown only shows a subset of the options.
//! [`OptionStore`] keeps the full list captured at the start of a search
//! session together with the index of the logically selected option, so
//! narrowing the view never loses the selection.

use crate::option::{position_of, Item};

/// Persistent options, persistent value, and the search-session flag.
#[derive(Debug, Clone)]
pub struct OptionStore<I: Item> {
    persistent: Vec<I>,
    value: usize,
    active: bool,
}

impl<I: Item> OptionStore<I> {
    /// A store over `options` with the first option selected and no session.
    pub fn new(options: Vec<I>) -> Self {
        Self {
            persistent: options,
            value: 0,
            active: false,
        }
    }

    /// Replace the persistent list and start over: value 0, no session.
    pub fn reset(&mut self, options: Vec<I>) {
        self.persistent = options;
        self.value = 0;
        self.active = false;
    }

    /// Drop everything.
    pub fn clear(&mut self) {
        self.reset(Vec::new());
    }

    /// Start a search session by snapshotting `visible` as the persistent
    /// list. The value goes back to 0.
    ///
    /// Does nothing while a session is already active. Returns whether a
    /// snapshot was taken.
    pub fn capture_session(&mut self, visible: &[I]) -> bool {
        if self.active {
            return false;
        }
        self.persistent = visible.to_vec();
        self.value = 0;
        self.active = true;
        true
    }

    /// Select the first persistent option whose term equals `wanted`, or the
    /// first option when none does.
    pub fn commit_selection(&mut self, wanted: &str) -> usize {
        self.value = position_of(&self.persistent, wanted).unwrap_or(0);
        self.value
    }

    /// Mark the session over. The caller restores the visible list.
    pub fn end_session(&mut self) {
        self.active = false;
    }

    /// Replace the persistent list without touching the session flag. The value
    /// is clamped to the new list.
    pub fn replace(&mut self, options: Vec<I>) {
        self.persistent = options;
        self.value = self.clamp(self.value);
    }

    /// Point the value at `index`, clamped to the list.
    pub fn set_value(&mut self, index: usize) {
        self.value = self.clamp(index);
    }

    /// Whether a search session is running.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// The full, unfiltered option list.
    pub fn persistent(&self) -> &[I] {
        &self.persistent
    }

    /// Index of the logically selected option.
    pub fn value(&self) -> usize {
        self.value
    }

    /// The logically selected option; `None` only for an empty list.
    pub fn persistent_selection(&self) -> Option<&I> {
        self.persistent.get(self.value)
    }

    fn clamp(&self, index: usize) -> usize {
        index.min(self.persistent.len().saturating_sub(1))
    }
}

impl<I: Item> Default for OptionStore<I> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}
