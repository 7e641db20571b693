//! Pure geometry for Folio
//!
//! Points, sizes and rectangles shared by the measurement code in
//! `folio-foundation` and the platform adapters.

mod geometry;

pub use geometry::*;

pub mod prelude {
    pub use crate::geometry::{Point, Rect, Size};
}
