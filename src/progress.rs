//! Step completion tracking for one roadmap viewing session.
//!
//! State lives only as long as the view that owns it; nothing here is
//! persisted.

use std::collections::BTreeSet;

/// Completion percentage for `total_steps` steps, rounded to the nearest
/// integer (halves round up).
///
/// Indices outside `[0, total_steps)` are not counted, and zero steps
/// yields 0.
///
/// # Examples
///
/// ```
/// use nextstep::progress::compute_progress;
/// use std::collections::BTreeSet;
///
/// assert_eq!(compute_progress(0, &BTreeSet::new()), 0);
/// assert_eq!(compute_progress(5, &BTreeSet::from([0, 1])), 40);
/// ```
#[must_use]
pub fn compute_progress(total_steps: usize, completed: &BTreeSet<usize>) -> u8 {
    if total_steps == 0 {
        return 0;
    }
    let done = completed.range(..total_steps).count() as u128;
    let total = total_steps as u128;
    // round(100 * done / total) in integer arithmetic, wide enough for any usize
    let percent = (200 * done + total) / (2 * total);
    u8::try_from(percent.min(100)).unwrap_or(100)
}

/// Per-session progress through a roadmap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressTracker {
    total_steps: usize,
    completed: BTreeSet<usize>,
    /// Step cards currently expanded in the view
    expanded: BTreeSet<usize>,
}

impl ProgressTracker {
    /// Creates a tracker with nothing completed and the first step expanded.
    #[must_use]
    pub fn new(total_steps: usize) -> Self {
        let mut expanded = BTreeSet::new();
        if total_steps > 0 {
            expanded.insert(0);
        }
        Self {
            total_steps,
            completed: BTreeSet::new(),
            expanded,
        }
    }

    /// Creates a tracker with the given steps already completed.
    ///
    /// Out-of-range indices are dropped.
    #[must_use]
    pub fn with_completed(total_steps: usize, completed: impl IntoIterator<Item = usize>) -> Self {
        let mut tracker = Self::new(total_steps);
        tracker.completed = completed
            .into_iter()
            .filter(|&idx| idx < total_steps)
            .collect();
        tracker
    }

    /// Flips completion of `index` and returns the resulting set.
    ///
    /// Indices outside the roadmap are ignored.
    pub fn toggle_step(&mut self, index: usize) -> &BTreeSet<usize> {
        if index < self.total_steps && !self.completed.remove(&index) {
            self.completed.insert(index);
        }
        &self.completed
    }

    /// Flips whether the card for `index` is expanded.
    pub fn toggle_expanded(&mut self, index: usize) {
        if index < self.total_steps && !self.expanded.remove(&index) {
            self.expanded.insert(index);
        }
    }

    /// Returns true if step `index` is completed.
    #[must_use]
    pub fn is_completed(&self, index: usize) -> bool {
        self.completed.contains(&index)
    }

    /// Returns true if the card for `index` is expanded.
    #[must_use]
    pub fn is_expanded(&self, index: usize) -> bool {
        self.expanded.contains(&index)
    }

    /// Completed step indices in ascending order.
    #[must_use]
    pub const fn completed(&self) -> &BTreeSet<usize> {
        &self.completed
    }

    /// Number of completed steps.
    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.completed.len()
    }

    /// Number of steps in the roadmap.
    #[must_use]
    pub const fn total_steps(&self) -> usize {
        self.total_steps
    }

    /// Current completion percentage.
    #[must_use]
    pub fn percentage(&self) -> u8 {
        compute_progress(self.total_steps, &self.completed)
    }
}
