pub mod focus;
pub mod key_event;
pub mod types;

pub use focus::{FocusId, FocusTrap};
pub use key_event::{KeyCode, KeyEvent, KeyEventType, Modifiers};
pub use types::{PointerEvent, PointerEventKind, PointerId};

pub mod prelude {
    pub use super::focus::{FocusId, FocusTrap};
    pub use super::key_event::{KeyCode, KeyEvent, KeyEventType, Modifiers};
    pub use super::types::{PointerEvent, PointerEventKind, PointerId};
}
