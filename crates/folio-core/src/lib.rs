//! Core runtime pieces for Folio widgets.
//!
//! Widgets never talk to `setTimeout`/`setInterval` directly. They ask a
//! [`Scheduler`] for work and keep the returned [`TaskHandle`]; dropping the
//! handle cancels the work, so unmounting a widget tears down every timer it
//! owns without any framework-specific cleanup hooks.

mod scheduler;

pub use scheduler::{ManualScheduler, Scheduler, TaskHandle, TaskId};
pub use web_time::{Duration, Instant};

pub mod prelude {
    pub use crate::scheduler::{ManualScheduler, Scheduler, TaskHandle, TaskId};
    pub use web_time::{Duration, Instant};
}
