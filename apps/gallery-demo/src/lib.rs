//! Folio gallery demo.
//!
//! Natively, [`session::Session`] drives a carousel on virtual time and logs
//! what happens. Built for the browser with the `web` feature, [`Gallery`]
//! mounts every `[data-carousel]` element on the page and the fullscreen
//! viewer.

#[cfg(not(target_arch = "wasm32"))]
pub mod session;

#[cfg(all(target_arch = "wasm32", feature = "web"))]
mod web;

#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub use web::Gallery;

use folio_core::Duration;
use folio_foundation::carousel::ResolutionStrategy;
use folio_foundation::{CarouselConfig, Item};

/// Config used when no JSON file is given.
pub fn demo_config() -> CarouselConfig {
    let items = (1..=5)
        .map(|n| Item::new(format!("images/photo-{n}.jpg")).with_caption(format!("Photo {n}")))
        .collect();
    CarouselConfig {
        items,
        ..CarouselConfig::default()
    }
    .looped(true)
    .with_indicator(true)
    .autoplay(Duration::from_millis(3_000))
    .resolution(ResolutionStrategy::Index)
}
