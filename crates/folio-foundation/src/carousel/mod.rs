//! The carousel family.
//!
//! Two position models present the same contract: a logically circular
//! sequence of items shown through a finite viewport, advanced by gesture or
//! timer, with no visible seam at the wrap boundary.
//!
//! * The index model ([`IndexTrack`]) keeps an integer slot into a track that
//!   carries one page of clones at each end.
//! * The scroll model ([`ScrollStrip`]) scrolls natively over several copies
//!   of the sequence and reconciles with layout measurements once scrolling
//!   settles.
//!
//! [`Carousel`] composes either model with gestures and autoplay, and
//! [`MountedCarousel`] binds it to a surface and a scheduler.

pub mod autoplay;
pub mod config;
pub mod event;
pub mod gesture;
pub mod host;
pub mod index_track;
pub mod indicator;
pub mod loop_window;
pub mod navigator;
pub mod proximity;
pub mod scroll_strip;
mod widget;

pub use autoplay::{segments, AutoplayTick, AutoplayTimer, AUTOPLAY_TICK, DEFAULT_AUTOPLAY_DURATION};
pub use config::{CarouselConfig, ConfigError, Item, ResolutionStrategy};
pub use event::{CarouselEvent, Reanchor, Transition};
pub use gesture::{SwipeConfig, SwipeDetector, SwipeTrigger};
pub use host::{CarouselHandle, CarouselSurface, MountedCarousel};
pub use index_track::IndexTrack;
pub use indicator::{indicator_dots, indicator_scroll_offset, IndicatorDot};
pub use loop_window::{visible_window, LoopWindow, RepeatedStrip, DEFAULT_SCROLL_COPIES, MIN_LOOP_COPIES};
pub use navigator::{neighbors, step, wrap, Direction, Navigator, WrapPolicy};
pub use proximity::{
    centering_delta, reanchor_offset, resolve, Resolution, StripMeasurement, REANCHOR_GUARD,
    SETTLE_DEBOUNCE,
};
pub use scroll_strip::{ScrollStrip, Settled};
pub use widget::{Carousel, CarouselSnapshot, Controls, Indicator, Phase};
