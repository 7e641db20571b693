//! Rendering-only duplication that hides the wrap seam.
//!
//! Nothing here owns state. Both layouts are recomputed from the sequence
//! length and visible count whenever either changes.

use smallvec::SmallVec;

use super::navigator::wrap;

/// Copies of the sequence rendered by a looping scroll strip.
pub const DEFAULT_SCROLL_COPIES: usize = 5;

/// Fewest copies a looping scroll strip can wrap with: one on each side of
/// the home copy.
pub const MIN_LOOP_COPIES: usize = 3;

/// Logical indices visible when `visible_count` items are shown starting at
/// `position`, wrapping past the end.
pub fn visible_window(len: usize, position: usize, visible_count: usize) -> SmallVec<[usize; 8]> {
    if len == 0 {
        return SmallVec::new();
    }
    (0..visible_count.min(len))
        .map(|offset| (position + offset) % len)
        .collect()
}

/// Track layout for the index model.
///
/// When repeating, the track is `[last V items] ++ items ++ [first V items]`
/// and slot `s` shows logical item `(s - V) mod N`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoopWindow {
    len: usize,
    visible: usize,
    repeating: bool,
}

impl LoopWindow {
    pub fn new(len: usize, visible: usize, looped: bool) -> Self {
        let visible = visible.max(1);
        Self {
            len,
            visible,
            repeating: looped && len > visible,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn visible(&self) -> usize {
        self.visible
    }

    pub fn is_repeating(&self) -> bool {
        self.repeating
    }

    /// Number of clones rendered on each side of the real items.
    pub fn clones(&self) -> usize {
        if self.repeating {
            self.visible
        } else {
            0
        }
    }

    pub fn slot_count(&self) -> usize {
        self.len + 2 * self.clones()
    }

    /// Highest slot the track may rest on with a full page in view.
    pub fn max_slot(&self) -> usize {
        self.slot_count().saturating_sub(self.visible)
    }

    pub fn slot_for_logical(&self, logical: usize) -> usize {
        logical.min(self.len.saturating_sub(1)) + self.clones()
    }

    pub fn logical_for_slot(&self, slot: usize) -> usize {
        if self.repeating {
            wrap(slot as i64 - self.visible as i64, self.len)
        } else {
            slot.min(self.len.saturating_sub(1))
        }
    }

    /// Logical item for every rendered slot, in track order.
    pub fn slots(&self) -> Vec<usize> {
        (0..self.slot_count())
            .map(|slot| self.logical_for_slot(slot))
            .collect()
    }

    /// Where an animated transition that ended on `slot` must silently jump.
    pub fn reanchor_target(&self, slot: usize) -> Option<usize> {
        if !self.repeating {
            return None;
        }
        if slot == 0 {
            Some(self.len)
        } else if slot == self.len + self.visible {
            Some(self.visible)
        } else {
            None
        }
    }
}

/// Strip layout for the scroll model: `copies` back-to-back copies of the
/// sequence. Rendered position `r` shows logical item `r mod N`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RepeatedStrip {
    len: usize,
    copies: usize,
}

impl RepeatedStrip {
    pub fn new(len: usize, copies: usize) -> Self {
        Self {
            len,
            copies: copies.max(1),
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn copies(&self) -> usize {
        self.copies
    }

    pub fn rendered_count(&self) -> usize {
        self.len * self.copies
    }

    pub fn middle_copy(&self) -> usize {
        self.copies / 2
    }

    pub fn copy_of(&self, rendered: usize) -> usize {
        if self.len == 0 {
            0
        } else {
            (rendered / self.len).min(self.copies - 1)
        }
    }

    pub fn logical_for(&self, rendered: usize) -> usize {
        if self.len == 0 {
            0
        } else {
            rendered % self.len
        }
    }

    /// Rendered position of `logical` inside the middle copy.
    pub fn home_of(&self, logical: usize) -> usize {
        self.middle_copy() * self.len + logical.min(self.len.saturating_sub(1))
    }

    /// Rendered positions in the first or last copy run out of duplicated
    /// content in one direction.
    pub fn is_edge(&self, rendered: usize) -> bool {
        if self.copies < 3 {
            return false;
        }
        let copy = self.copy_of(rendered);
        copy == 0 || copy == self.copies - 1
    }

    /// The copy of `logical` closest to `from`.
    pub fn nearest_copy(&self, logical: usize, from: usize) -> usize {
        let logical = logical.min(self.len.saturating_sub(1));
        (0..self.copies)
            .map(|copy| copy * self.len + logical)
            .min_by_key(|rendered| rendered.abs_diff(from))
            .unwrap_or(logical)
    }

    /// Logical item for every rendered position, in strip order.
    pub fn rendered(&self) -> Vec<usize> {
        (0..self.rendered_count())
            .map(|rendered| self.logical_for(rendered))
            .collect()
    }
}
