//! Fullscreen viewer overlay.
//!
//! Shows one item at a time over the page. Navigation always wraps. While
//! open, keyboard focus is trapped among the overlay's own controls.

use crate::carousel::{Navigator, WrapPolicy};
use crate::input::{FocusId, FocusTrap, KeyCode, KeyEvent};

/// Focusable controls inside the overlay, in tab order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ViewerControl {
    Close,
    Previous,
    Next,
    Thumbnail(usize),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewerEvent {
    Opened { index: usize },
    Navigated { index: usize },
    Closed,
}

#[derive(Debug)]
pub struct FullscreenViewer {
    navigator: Navigator,
    controls: Vec<ViewerControl>,
    focus: FocusTrap,
    open: bool,
    events: Vec<ViewerEvent>,
}

impl FullscreenViewer {
    pub fn new(len: usize) -> Self {
        let mut controls = vec![ViewerControl::Close];
        if len > 1 {
            controls.push(ViewerControl::Previous);
            controls.push(ViewerControl::Next);
            controls.extend((0..len).map(ViewerControl::Thumbnail));
        }
        let focus = FocusTrap::new((0..controls.len()).map(FocusId::new).collect());
        Self {
            navigator: Navigator::new(len, WrapPolicy::Looped),
            controls,
            focus,
            open: false,
            events: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.navigator.len()
    }

    pub fn is_empty(&self) -> bool {
        self.navigator.is_empty()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn index(&self) -> usize {
        self.navigator.index()
    }

    /// Previous/next controls and thumbnails only exist for two or more items.
    pub fn has_navigation(&self) -> bool {
        self.len() > 1
    }

    pub fn controls(&self) -> &[ViewerControl] {
        &self.controls
    }

    pub fn focused(&self) -> Option<ViewerControl> {
        self.focus
            .active()
            .and_then(|id| self.controls.get(id.as_usize()).copied())
    }

    /// "k / N" counter label.
    pub fn counter(&self) -> String {
        format!("{} / {}", self.index() + 1, self.len())
    }

    /// Opens at `index` and focuses the first control. Inert for an empty
    /// sequence or an out-of-range index.
    pub fn open(&mut self, index: usize) -> bool {
        if index >= self.len() {
            log::debug!("ignoring viewer open at {index} of {}", self.len());
            return false;
        }
        self.navigator = self.navigator.with_index(index);
        self.open = true;
        self.focus.focus_first();
        self.events.push(ViewerEvent::Opened { index });
        true
    }

    /// Closes the overlay. Closing an already closed viewer does nothing.
    pub fn close(&mut self) -> bool {
        if !self.open {
            return false;
        }
        self.open = false;
        self.focus.release();
        self.events.push(ViewerEvent::Closed);
        true
    }

    pub fn next(&mut self) -> bool {
        self.navigate(|navigator| navigator.advance())
    }

    pub fn previous(&mut self) -> bool {
        self.navigate(|navigator| navigator.retreat())
    }

    /// Jumps to a thumbnail. Out-of-range selections are ignored.
    pub fn select(&mut self, index: usize) -> bool {
        self.navigate(|navigator| navigator.go_to(index))
    }

    /// Returns true when the key was consumed.
    pub fn handle_key(&mut self, event: &KeyEvent) -> bool {
        if !self.open || !event.is_key_down() {
            return false;
        }
        match event.key_code {
            KeyCode::Escape => self.close(),
            KeyCode::ArrowLeft => self.previous(),
            KeyCode::ArrowRight => self.next(),
            KeyCode::Tab => self.focus.cycle(event.modifiers.shift).is_some(),
            _ => false,
        }
    }

    /// A click on the dimmed area around the item.
    pub fn click_backdrop(&mut self) -> bool {
        self.close()
    }

    /// Activates a control, as a click or Enter on it would.
    pub fn activate(&mut self, control: ViewerControl) -> bool {
        if !self.open {
            return false;
        }
        if let Some(position) = self.controls.iter().position(|c| *c == control) {
            self.focus.request_focus(FocusId::new(position));
        }
        match control {
            ViewerControl::Close => self.close(),
            ViewerControl::Previous => self.previous(),
            ViewerControl::Next => self.next(),
            ViewerControl::Thumbnail(index) => self.select(index),
        }
    }

    pub fn drain_events(&mut self) -> Vec<ViewerEvent> {
        std::mem::take(&mut self.events)
    }

    fn navigate(&mut self, action: impl FnOnce(&mut Navigator) -> bool) -> bool {
        if !self.open || !action(&mut self.navigator) {
            return false;
        }
        self.events.push(ViewerEvent::Navigated {
            index: self.navigator.index(),
        });
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Modifiers;

    fn open_viewer(len: usize, index: usize) -> FullscreenViewer {
        let mut viewer = FullscreenViewer::new(len);
        assert!(viewer.open(index));
        viewer.drain_events();
        viewer
    }

    #[test]
    fn arrows_wrap_in_both_directions() {
        let mut viewer = open_viewer(3, 0);
        viewer.handle_key(&KeyEvent::key_down(KeyCode::ArrowLeft));
        assert_eq!(viewer.index(), 2);
        viewer.handle_key(&KeyEvent::key_down(KeyCode::ArrowRight));
        assert_eq!(viewer.index(), 0);
    }

    #[test]
    fn tab_cycles_inside_overlay() {
        let mut viewer = open_viewer(2, 0);
        assert_eq!(viewer.focused(), Some(ViewerControl::Close));
        let shift_tab = KeyEvent::key_down_with_modifiers(KeyCode::Tab, Modifiers::SHIFT);
        viewer.handle_key(&shift_tab);
        assert_eq!(viewer.focused(), Some(ViewerControl::Thumbnail(1)));
        viewer.handle_key(&KeyEvent::key_down(KeyCode::Tab));
        assert_eq!(viewer.focused(), Some(ViewerControl::Close));
    }

    #[test]
    fn single_item_has_only_close_control() {
        let mut viewer = open_viewer(1, 0);
        assert!(!viewer.has_navigation());
        assert_eq!(viewer.controls(), &[ViewerControl::Close]);
        assert!(!viewer.next());
        assert!(viewer.drain_events().is_empty());
    }

    #[test]
    fn empty_viewer_never_opens() {
        let mut viewer = FullscreenViewer::new(0);
        assert!(!viewer.open(0));
        assert!(!viewer.is_open());
        assert!(viewer.drain_events().is_empty());
    }

    #[test]
    fn thumbnail_selection_ignores_out_of_range() {
        let mut viewer = open_viewer(4, 0);
        assert!(!viewer.select(4));
        assert!(viewer.activate(ViewerControl::Thumbnail(3)));
        assert_eq!(viewer.index(), 3);
        assert_eq!(viewer.focused(), Some(ViewerControl::Thumbnail(3)));
        assert_eq!(viewer.counter(), "4 / 4");
    }

    #[test]
    fn backdrop_click_closes_once() {
        let mut viewer = open_viewer(2, 1);
        assert!(viewer.click_backdrop());
        assert!(!viewer.click_backdrop());
        assert_eq!(viewer.drain_events(), vec![ViewerEvent::Closed]);
        assert_eq!(viewer.focused(), None);
    }

    #[test]
    fn keys_are_ignored_while_closed() {
        let mut viewer = FullscreenViewer::new(3);
        assert!(!viewer.handle_key(&KeyEvent::key_down(KeyCode::ArrowRight)));
        assert_eq!(viewer.index(), 0);
    }
}
