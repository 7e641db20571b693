//! In-memory carousel surface with simulated strip geometry.

use std::cell::{Cell, RefCell};

use folio_foundation::carousel::{CarouselEvent, CarouselSnapshot, CarouselSurface, StripMeasurement, Transition};
use folio_ui_graphics::Rect;

/// A surface that records everything it is asked to do.
///
/// For the scroll model it also keeps a scroll offset over `rendered_count`
/// equally sized items, so measurements behave like a laid-out strip. Items
/// are as wide as the viewport divided by the visible count.
pub struct FakeStrip {
    viewport: Rect,
    item_width: f32,
    rendered_count: Cell<usize>,
    scroll_left: Cell<f32>,
    laid_out: Cell<bool>,
    track_slot: Cell<Option<usize>>,
    transitions: RefCell<Vec<Transition>>,
    events: RefCell<Vec<CarouselEvent>>,
    snapshots: RefCell<Vec<CarouselSnapshot>>,
    pending_animation: Cell<bool>,
}

impl FakeStrip {
    pub fn new(viewport_width: f32, visible: usize) -> Self {
        Self {
            viewport: Rect::new(0.0, 0.0, viewport_width, viewport_width * 0.75),
            item_width: viewport_width / visible.max(1) as f32,
            rendered_count: Cell::new(0),
            scroll_left: Cell::new(0.0),
            laid_out: Cell::new(true),
            track_slot: Cell::new(None),
            transitions: RefCell::new(Vec::new()),
            events: RefCell::new(Vec::new()),
            snapshots: RefCell::new(Vec::new()),
            pending_animation: Cell::new(false),
        }
    }

    pub fn set_rendered_count(&self, count: usize) {
        self.rendered_count.set(count);
    }

    pub fn item_width(&self) -> f32 {
        self.item_width
    }

    pub fn scroll_left(&self) -> f32 {
        self.scroll_left.get()
    }

    /// Moves the strip as a user's free scroll would.
    pub fn scroll_by(&self, dx: f32) {
        let max = (self.rendered_count.get() as f32 * self.item_width - self.viewport.width).max(0.0);
        self.scroll_left
            .set((self.scroll_left.get() + dx).clamp(0.0, max));
    }

    /// Simulates a strip whose children have not been laid out yet.
    pub fn set_laid_out(&self, laid_out: bool) {
        self.laid_out.set(laid_out);
    }

    /// Rendered item whose center sits at the viewport center right now.
    pub fn centred_item(&self) -> usize {
        let center = self.scroll_left.get() + self.viewport.width / 2.0;
        (center / self.item_width).floor().max(0.0) as usize
    }

    pub fn track_slot(&self) -> Option<usize> {
        self.track_slot.get()
    }

    /// True between an animated transition and its completion.
    pub fn has_pending_animation(&self) -> bool {
        self.pending_animation.get()
    }

    /// Marks the in-flight animation as finished. Returns whether one was
    /// pending.
    pub fn complete_animation(&self) -> bool {
        self.pending_animation.replace(false)
    }

    pub fn transitions(&self) -> Vec<Transition> {
        self.transitions.borrow().clone()
    }

    pub fn events(&self) -> Vec<CarouselEvent> {
        self.events.borrow().clone()
    }

    pub fn take_events(&self) -> Vec<CarouselEvent> {
        std::mem::take(&mut *self.events.borrow_mut())
    }

    pub fn last_snapshot(&self) -> Option<CarouselSnapshot> {
        self.snapshots.borrow().last().cloned()
    }

    fn scroll_to_item(&self, rendered: usize) {
        let offset = rendered as f32 * self.item_width + self.item_width / 2.0 - self.viewport.width / 2.0;
        self.scroll_left.set(offset.max(0.0));
    }
}

impl CarouselSurface for FakeStrip {
    fn apply(&self, transition: &Transition) {
        log::trace!("fake strip applying {transition:?}");
        match *transition {
            Transition::Track { slot, .. } => self.track_slot.set(Some(slot)),
            Transition::ScrollToItem { rendered, .. } => self.scroll_to_item(rendered),
            Transition::ScrollBy { dx, .. } => self.scroll_by(dx),
        }
        if transition.is_animated() {
            self.pending_animation.set(true);
        }
        self.transitions.borrow_mut().push(*transition);
    }

    fn measure(&self) -> StripMeasurement {
        let items = (0..self.rendered_count.get())
            .map(|index| {
                if self.laid_out.get() {
                    Rect::new(
                        index as f32 * self.item_width - self.scroll_left.get(),
                        0.0,
                        self.item_width,
                        self.viewport.height,
                    )
                } else {
                    Rect::default()
                }
            })
            .collect();
        StripMeasurement::new(self.viewport, items)
    }

    fn emit(&self, event: &CarouselEvent) {
        self.events.borrow_mut().push(*event);
    }

    fn render(&self, snapshot: &CarouselSnapshot) {
        self.snapshots.borrow_mut().push(snapshot.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scroll_to_item_centres_it() {
        let strip = FakeStrip::new(400.0, 1);
        strip.set_rendered_count(10);
        strip.apply(&Transition::ScrollToItem {
            rendered: 6,
            animated: false,
        });
        assert_eq!(strip.scroll_left(), 2400.0);
        assert_eq!(strip.centred_item(), 6);
        assert!(!strip.has_pending_animation());
    }

    #[test]
    fn measurement_follows_scroll() {
        let strip = FakeStrip::new(400.0, 1);
        strip.set_rendered_count(4);
        strip.scroll_by(400.0);
        let measurement = strip.measure();
        assert_eq!(measurement.nearest_to_center(), Some(1));
        strip.set_laid_out(false);
        assert_eq!(strip.measure().nearest_to_center(), None);
    }

    #[test]
    fn scroll_is_clamped_to_content() {
        let strip = FakeStrip::new(100.0, 1);
        strip.set_rendered_count(3);
        strip.scroll_by(-50.0);
        assert_eq!(strip.scroll_left(), 0.0);
        strip.scroll_by(1_000.0);
        assert_eq!(strip.scroll_left(), 200.0);
    }
}
