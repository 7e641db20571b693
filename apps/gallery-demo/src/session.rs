//! Scripted carousel session on virtual time.
//!
//! Runs a carousel without a browser: a [`ManualScheduler`] stands in for
//! the window timers and [`LoggingSurface`] logs what a real surface would
//! draw, completing each animation when asked.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use anyhow::{anyhow, Context};
use folio_core::{ManualScheduler, Scheduler};
use folio_foundation::carousel::{CarouselSnapshot, CarouselSurface};
use folio_foundation::{CarouselConfig, CarouselEvent, MountedCarousel, StripMeasurement, Transition};
use folio_ui_graphics::Rect;

#[derive(Default)]
pub struct LoggingSurface {
    animating: Cell<bool>,
    events: RefCell<Vec<CarouselEvent>>,
}

impl LoggingSurface {
    pub fn events(&self) -> Vec<CarouselEvent> {
        self.events.borrow().clone()
    }

    fn finish_animation(&self) -> bool {
        self.animating.replace(false)
    }
}

impl CarouselSurface for LoggingSurface {
    fn apply(&self, transition: &Transition) {
        log::info!("surface: {transition:?}");
        if transition.is_animated() {
            self.animating.set(true);
        }
    }

    // Nothing is laid out, so the scroll model always falls back.
    fn measure(&self) -> StripMeasurement {
        StripMeasurement::new(Rect::default(), Vec::new())
    }

    fn emit(&self, event: &CarouselEvent) {
        log::info!("event: {event:?}");
        self.events.borrow_mut().push(*event);
    }

    fn render(&self, snapshot: &CarouselSnapshot) {
        log::debug!(
            "render: {} / {} progress {:.2} autoplay {}",
            snapshot.index + 1,
            snapshot.len,
            snapshot.progress,
            snapshot.autoplay
        );
    }
}

pub struct Session {
    scheduler: Rc<ManualScheduler>,
    surface: Rc<LoggingSurface>,
    carousel: MountedCarousel,
}

impl Session {
    pub fn start(config: &CarouselConfig) -> anyhow::Result<Self> {
        let scheduler = Rc::new(ManualScheduler::new());
        let surface = Rc::new(LoggingSurface::default());
        let dyn_scheduler: Rc<dyn Scheduler> = scheduler.clone();
        let dyn_surface: Rc<dyn CarouselSurface> = surface.clone();
        let carousel = MountedCarousel::mount(config, dyn_scheduler, dyn_surface)
            .context("cannot mount carousel")?
            .ok_or_else(|| anyhow!("carousel has no items"))?;
        Ok(Self {
            scheduler,
            surface,
            carousel,
        })
    }

    pub fn carousel(&self) -> &MountedCarousel {
        &self.carousel
    }

    pub fn index(&self) -> usize {
        self.carousel.current_index()
    }

    pub fn events(&self) -> Vec<CarouselEvent> {
        self.surface.events()
    }

    pub fn next(&self) {
        self.carousel.advance();
        self.settle();
    }

    pub fn previous(&self) {
        self.carousel.retreat();
        self.settle();
    }

    pub fn go_to(&self, index: usize) {
        self.carousel.go_to(index);
        self.settle();
    }

    pub fn toggle_autoplay(&self) {
        self.carousel.toggle_autoplay();
    }

    /// Lets `millis` of virtual time pass in 10ms frames.
    pub fn wait(&self, millis: u64) {
        for _ in 0..millis.div_ceil(10) {
            self.scheduler.advance_millis(10);
            self.settle();
        }
    }

    fn settle(&self) {
        if self.surface.finish_animation() {
            self.carousel.transition_finished();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::Duration;

    #[test]
    fn empty_config_is_an_error() {
        let config = CarouselConfig::new(Vec::<String>::new());
        assert!(Session::start(&config).is_err());
    }

    #[test]
    fn scripted_session_wraps_and_autoplays() {
        let config = CarouselConfig::new(["a", "b", "c"])
            .looped(true)
            .autoplay(Duration::from_millis(1_000));
        let session = Session::start(&config).expect("mounts");
        session.previous();
        assert_eq!(session.index(), 2);
        session.wait(1_100);
        assert_eq!(session.index(), 0);
        assert!(session
            .events()
            .iter()
            .any(|event| matches!(event, CarouselEvent::Reanchored { .. })));
    }
}
