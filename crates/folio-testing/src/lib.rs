//! Testing utilities and harness for Folio widgets

pub mod fake_strip;
pub mod robot;
pub mod robot_assertions;

// Re-export testing utilities
pub use fake_strip::FakeStrip;
pub use robot::*;

pub mod prelude {
    pub use crate::fake_strip::FakeStrip;
    pub use crate::robot::*;
    pub use crate::robot_assertions;
    pub use folio_core::ManualScheduler;
}
