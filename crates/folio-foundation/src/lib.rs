//! Foundation widgets for Folio: the carousel family, the fullscreen viewer
//! and the input types they consume.

pub mod carousel;
pub mod gesture_constants;
pub mod input;
pub mod viewer;

// Re-export commonly used items
pub use carousel::{
    Carousel, CarouselConfig, CarouselEvent, CarouselHandle, CarouselSnapshot, CarouselSurface,
    ConfigError, Controls, Direction, Item, MountedCarousel, Phase, ResolutionStrategy,
    StripMeasurement, Transition, WrapPolicy,
};
pub use input::{KeyCode, KeyEvent, PointerEvent, PointerEventKind};
pub use viewer::{FullscreenViewer, ViewerControl, ViewerEvent};

pub mod prelude {
    pub use crate::carousel::{
        Carousel, CarouselConfig, CarouselEvent, CarouselHandle, CarouselSnapshot,
        CarouselSurface, Controls, Direction, Indicator, IndicatorDot, Item, MountedCarousel,
        Phase, ResolutionStrategy, StripMeasurement, SwipeConfig, SwipeTrigger, Transition,
        WrapPolicy,
    };
    pub use crate::input::prelude::*;
    pub use crate::viewer::{FullscreenViewer, ViewerControl, ViewerEvent};
}
