//! Which selection steps are shown.
//!
//! The steps form a strict chain: step `n + 1` is shown only if step `n` is
//! shown and has a value. Step 1 is always shown.

use crate::selection::{SelectionField, SelectionState};

/// Visibility of the five steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibleSteps {
    shown: [bool; 5],
}

impl VisibleSteps {
    /// Whether the step for `field` is shown.
    pub fn is_visible(&self, field: SelectionField) -> bool {
        self.shown[usize::from(field.step() - 1)]
    }

    /// Shown step numbers, ascending.
    pub fn steps(&self) -> Vec<u8> {
        SelectionField::ALL
            .into_iter()
            .filter(|&f| self.is_visible(f))
            .map(SelectionField::step)
            .collect()
    }

    /// Every field paired with its visibility, in step order.
    pub fn iter(&self) -> impl Iterator<Item = (SelectionField, bool)> + '_ {
        SelectionField::ALL.into_iter().map(|f| (f, self.is_visible(f)))
    }
}

/// Recompute step visibility from scratch.
pub fn visible_steps(selection: &SelectionState) -> VisibleSteps {
    let mut shown = [true, false, false, false, false];
    for i in 1..shown.len() {
        shown[i] = shown[i - 1] && selection.is_set(SelectionField::ALL[i - 1]);
    }
    VisibleSteps { shown }
}
