//! Index model: an integer slot into a translated track.

use super::event::{Reanchor, Transition};
use super::loop_window::LoopWindow;
use super::navigator::Direction;

/// Slot position on a track rendered by [`LoopWindow`].
///
/// The slot is the first visible track slot. Logical navigation moves it one
/// slot per step and the surface animates the translation; once the animation
/// ends on a clone the slot silently jumps to the real item it duplicates.
#[derive(Clone, Copy, Debug)]
pub struct IndexTrack {
    window: LoopWindow,
    slot: usize,
}

impl IndexTrack {
    /// `initial` is a logical index.
    pub fn new(len: usize, visible: usize, looped: bool, initial: usize) -> Self {
        let window = LoopWindow::new(len, visible, looped);
        let slot = if window.is_repeating() {
            window.slot_for_logical(initial)
        } else {
            initial.min(window.max_slot())
        };
        Self { window, slot }
    }

    pub fn window(&self) -> LoopWindow {
        self.window
    }

    pub fn slot(&self) -> usize {
        self.slot
    }

    pub fn current_index(&self) -> usize {
        self.window.logical_for_slot(self.slot)
    }

    pub fn placement(&self) -> Transition {
        Transition::Track {
            slot: self.slot,
            animated: false,
        }
    }

    pub fn can_step(&self, direction: Direction) -> bool {
        if self.window.len() < 2 {
            return false;
        }
        if self.window.is_repeating() {
            return true;
        }
        match direction {
            Direction::Forward => self.slot < self.window.max_slot(),
            Direction::Backward => self.slot > 0,
        }
    }

    pub fn step(&mut self, direction: Direction) -> Option<Transition> {
        if !self.can_step(direction) {
            return None;
        }
        self.slot = match direction {
            Direction::Forward => self.slot + 1,
            Direction::Backward => self.slot - 1,
        };
        Some(Transition::Track {
            slot: self.slot,
            animated: true,
        })
    }

    /// Animates to the slot showing `logical` first. Clamped tracks stop at
    /// their last full page.
    pub fn go_to(&mut self, logical: usize) -> Option<Transition> {
        if logical >= self.window.len() {
            return None;
        }
        let target = if self.window.is_repeating() {
            self.window.slot_for_logical(logical)
        } else {
            logical.min(self.window.max_slot())
        };
        if target == self.slot {
            return None;
        }
        self.slot = target;
        Some(Transition::Track {
            slot: target,
            animated: true,
        })
    }

    /// Called when an animated transition has ended.
    pub fn finish(&mut self) -> Option<Reanchor> {
        let to = self.window.reanchor_target(self.slot)?;
        let from = self.slot;
        self.slot = to;
        Some(Reanchor {
            from,
            to,
            transition: Transition::Track {
                slot: to,
                animated: false,
            },
        })
    }

    /// Track translation, as a percentage of the viewport width.
    pub fn offset_percent(&self) -> f32 {
        self.slot as f32 * 100.0 / self.window.visible() as f32
    }

    /// Active dot and dot count. Clamped tracks show one dot per page.
    pub fn page(&self) -> (usize, usize) {
        if self.window.is_repeating() {
            return (self.current_index(), self.window.len());
        }
        let visible = self.window.visible();
        let count = self.window.len().div_ceil(visible).max(1);
        (self.slot.div_ceil(visible).min(count - 1), count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeating_track_starts_after_leading_clones() {
        let track = IndexTrack::new(5, 2, true, 0);
        assert_eq!(track.slot(), 2);
        assert_eq!(track.current_index(), 0);
        assert_eq!(track.offset_percent(), 100.0);
    }

    #[test]
    fn forward_past_last_reanchors_to_first() {
        let mut track = IndexTrack::new(3, 1, true, 2);
        assert_eq!(
            track.step(Direction::Forward),
            Some(Transition::Track {
                slot: 4,
                animated: true
            })
        );
        assert_eq!(track.current_index(), 0);
        let reanchor = track.finish().map(|r| (r.from, r.to));
        assert_eq!(reanchor, Some((4, 1)));
        assert_eq!(track.current_index(), 0);
    }

    #[test]
    fn backward_past_first_reanchors_to_last() {
        let mut track = IndexTrack::new(3, 1, true, 0);
        track.step(Direction::Backward);
        assert_eq!(track.slot(), 0);
        let reanchor = track.finish().map(|r| r.transition);
        assert_eq!(
            reanchor,
            Some(Transition::Track {
                slot: 3,
                animated: false
            })
        );
        assert_eq!(track.current_index(), 2);
    }

    #[test]
    fn clamped_track_stops_at_last_page() {
        let mut track = IndexTrack::new(5, 2, false, 0);
        for _ in 0..10 {
            track.step(Direction::Forward);
        }
        assert_eq!(track.slot(), 3);
        assert!(!track.can_step(Direction::Forward));
        assert!(track.can_step(Direction::Backward));
        assert_eq!(track.page(), (2, 3));
    }

    #[test]
    fn short_looped_sequence_behaves_clamped() {
        let mut track = IndexTrack::new(2, 3, true, 0);
        assert!(!track.can_step(Direction::Forward));
        assert_eq!(track.step(Direction::Backward), None);
    }

    #[test]
    fn go_to_same_slot_is_noop() {
        let mut track = IndexTrack::new(4, 1, true, 1);
        assert_eq!(track.go_to(1), None);
        assert_eq!(track.go_to(9), None);
        assert!(track.go_to(3).is_some());
        assert_eq!(track.current_index(), 3);
    }
}
