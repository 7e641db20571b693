//! Focus containment for modal overlays.
//!
//! A [`FocusTrap`] owns an ordered list of focus targets. While it is active,
//! Tab and Shift+Tab cycle through that list and never leave it.

/// Unique identifier for focusable controls.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FocusId(pub(crate) usize);

impl FocusId {
    pub fn new(id: usize) -> Self {
        Self(id)
    }

    pub fn as_usize(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, Default)]
pub struct FocusTrap {
    order: Vec<FocusId>,
    active: Option<FocusId>,
}

impl FocusTrap {
    pub fn new(order: Vec<FocusId>) -> Self {
        Self {
            order,
            active: None,
        }
    }

    pub fn targets(&self) -> &[FocusId] {
        &self.order
    }

    /// Returns the currently focused target.
    pub fn active(&self) -> Option<FocusId> {
        self.active
    }

    pub fn is_focused(&self, id: FocusId) -> bool {
        self.active == Some(id)
    }

    /// Focuses the first target. Called when the overlay opens.
    pub fn focus_first(&mut self) -> Option<FocusId> {
        self.active = self.order.first().copied();
        self.active
    }

    /// Requests focus for a target. Targets outside the trap are refused.
    pub fn request_focus(&mut self, id: FocusId) -> bool {
        if self.order.contains(&id) {
            self.active = Some(id);
            true
        } else {
            false
        }
    }

    /// Moves focus one step, wrapping at both ends.
    pub fn cycle(&mut self, backwards: bool) -> Option<FocusId> {
        let len = self.order.len();
        if len == 0 {
            return None;
        }
        let current = self
            .active
            .and_then(|id| self.order.iter().position(|candidate| *candidate == id));
        let next = match (current, backwards) {
            (None, false) => 0,
            (None, true) => len - 1,
            (Some(index), false) => (index + 1) % len,
            (Some(index), true) => (index + len - 1) % len,
        };
        self.active = Some(self.order[next]);
        self.active
    }

    /// Drops focus, e.g. when the overlay closes.
    pub fn release(&mut self) {
        self.active = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trap(count: usize) -> FocusTrap {
        FocusTrap::new((0..count).map(FocusId::new).collect())
    }

    #[test]
    fn tab_from_last_wraps_to_first() {
        let mut trap = trap(3);
        trap.request_focus(FocusId::new(2));
        assert_eq!(trap.cycle(false), Some(FocusId::new(0)));
    }

    #[test]
    fn shift_tab_from_first_wraps_to_last() {
        let mut trap = trap(3);
        trap.focus_first();
        assert_eq!(trap.cycle(true), Some(FocusId::new(2)));
    }

    #[test]
    fn foreign_targets_are_refused() {
        let mut trap = trap(2);
        trap.focus_first();
        assert!(!trap.request_focus(FocusId::new(7)));
        assert!(trap.is_focused(FocusId::new(0)));
    }

    #[test]
    fn empty_trap_never_focuses() {
        let mut trap = FocusTrap::default();
        assert_eq!(trap.focus_first(), None);
        assert_eq!(trap.cycle(false), None);
    }
}
