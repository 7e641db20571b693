//! Browser bindings for Folio widgets.
//!
//! [`WebPlatform`] converts DOM input into Folio input events,
//! [`WindowScheduler`] backs timers with `setTimeout`/`setInterval`,
//! [`DomStrip`] is the carousel surface over real elements, and the bindings
//! wire DOM listeners to a mounted widget for as long as they are alive.

mod binding;
mod dom_strip;
mod listener;
mod scheduler;
mod viewer_binding;

pub use binding::CarouselBinding;
pub use dom_strip::{DomStrip, StripChrome};
pub use listener::EventListener;
pub use scheduler::WindowScheduler;
pub use viewer_binding::ViewerBinding;

use folio_foundation::input::{KeyCode, KeyEvent, KeyEventType, Modifiers};
use folio_foundation::{PointerEvent, PointerEventKind};
use folio_ui_graphics::Point;
use web_sys::{KeyboardEvent, MouseEvent, TouchEvent};

pub struct WebPlatform {
    scale_factor: f64,
}

impl WebPlatform {
    pub fn new(scale_factor: f64) -> Self {
        Self { scale_factor }
    }

    pub fn scale_factor(&self) -> f64 {
        self.scale_factor
    }

    pub fn set_scale_factor(&mut self, factor: f64) {
        self.scale_factor = factor;
    }

    pub fn pointer_position(&self, x: f64, y: f64) -> Point {
        // client_x/client_y are already CSS pixels
        Point {
            x: x as f32,
            y: y as f32,
        }
    }

    pub fn pointer_event(&self, kind: PointerEventKind, x: f64, y: f64) -> PointerEvent {
        PointerEvent::new(kind, self.pointer_position(x, y))
    }

    pub fn mouse_event(&self, kind: PointerEventKind, event: &MouseEvent) -> PointerEvent {
        self.pointer_event(kind, event.client_x() as f64, event.client_y() as f64)
    }

    /// Maps the first changed touch of `event`. Returns `None` for touch
    /// events that carry no touches.
    pub fn touch_event(&self, kind: PointerEventKind, event: &TouchEvent) -> Option<PointerEvent> {
        if kind == PointerEventKind::Cancel {
            return Some(PointerEvent::cancel());
        }
        let touch = event.changed_touches().get(0)?;
        let pointer = self
            .pointer_event(kind, touch.client_x() as f64, touch.client_y() as f64)
            .with_id(touch.identifier() as u64);
        Some(pointer)
    }

    pub fn key_event(&self, event_type: KeyEventType, event: &KeyboardEvent) -> KeyEvent {
        let modifiers = Modifiers {
            shift: event.shift_key(),
            ctrl: event.ctrl_key(),
            alt: event.alt_key(),
            meta: event.meta_key(),
        };
        KeyEvent::new(KeyCode::from_dom_key(&event.key()), modifiers, event_type)
    }
}

impl Default for WebPlatform {
    fn default() -> Self {
        Self::new(1.0)
    }
}

pub mod prelude {
    pub use crate::{CarouselBinding, DomStrip, StripChrome, ViewerBinding, WebPlatform, WindowScheduler};
}
