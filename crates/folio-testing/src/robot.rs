//! Robot-style driver for carousel tests
//!
//! A [`CarouselRobot`] mounts a carousel on a [`FakeStrip`] with a
//! [`ManualScheduler`], then lets a test press controls, swipe, scroll and
//! move virtual time forward.
//!
//! ```
//! use folio_foundation::CarouselConfig;
//! use folio_testing::CarouselRobot;
//!
//! let config = CarouselConfig::new(["a.jpg", "b.jpg", "c.jpg"]).looped(true);
//! let mut robot = CarouselRobot::launch(&config).expect("non-empty");
//! robot.next();
//! assert_eq!(robot.index(), 1);
//! ```

use std::rc::Rc;

use folio_core::{Duration, ManualScheduler, Scheduler};
use folio_foundation::carousel::{
    CarouselConfig, CarouselEvent, CarouselSnapshot, CarouselSurface, MountedCarousel, Phase,
    Transition,
};
use folio_foundation::input::PointerEvent;

use crate::fake_strip::FakeStrip;

pub const ROBOT_VIEWPORT_WIDTH: f32 = 400.0;

/// Vertical coordinate used for synthesized swipes.
const SWIPE_Y: f32 = 100.0;

pub struct CarouselRobot {
    scheduler: Rc<ManualScheduler>,
    strip: Rc<FakeStrip>,
    carousel: MountedCarousel,
}

impl CarouselRobot {
    /// Mounts `config`. Returns `None` when nothing mounts (an empty item
    /// list) and panics on an invalid config.
    pub fn launch(config: &CarouselConfig) -> Option<Self> {
        let scheduler = Rc::new(ManualScheduler::new());
        let strip = Rc::new(FakeStrip::new(ROBOT_VIEWPORT_WIDTH, config.visible_count));
        Self::launch_with(config, scheduler, strip)
    }

    pub fn launch_with(
        config: &CarouselConfig,
        scheduler: Rc<ManualScheduler>,
        strip: Rc<FakeStrip>,
    ) -> Option<Self> {
        let dyn_scheduler: Rc<dyn Scheduler> = scheduler.clone();
        let surface: Rc<dyn CarouselSurface> = strip.clone();
        let carousel = match MountedCarousel::mount(config, dyn_scheduler, surface) {
            Ok(mounted) => mounted?,
            Err(err) => panic!("robot launched with invalid config: {err}"),
        };
        strip.set_rendered_count(carousel.rendered_items().len());
        Some(Self {
            scheduler,
            strip,
            carousel,
        })
    }

    pub fn carousel(&self) -> &MountedCarousel {
        &self.carousel
    }

    pub fn strip(&self) -> &FakeStrip {
        &self.strip
    }

    pub fn scheduler(&self) -> &ManualScheduler {
        &self.scheduler
    }

    pub fn index(&self) -> usize {
        self.carousel.current_index()
    }

    pub fn phase(&self) -> Phase {
        self.carousel.phase()
    }

    pub fn snapshot(&self) -> CarouselSnapshot {
        self.carousel.snapshot()
    }

    pub fn events(&self) -> Vec<CarouselEvent> {
        self.strip.events()
    }

    pub fn take_events(&self) -> Vec<CarouselEvent> {
        self.strip.take_events()
    }

    pub fn transitions(&self) -> Vec<Transition> {
        self.strip.transitions()
    }

    /// Presses "next" without completing the animation.
    pub fn press_next(&mut self) {
        self.carousel.advance();
    }

    pub fn press_previous(&mut self) {
        self.carousel.retreat();
    }

    /// Presses "next" and lets the animation run to completion.
    pub fn next(&mut self) {
        self.press_next();
        self.finish_transition();
    }

    pub fn previous(&mut self) {
        self.press_previous();
        self.finish_transition();
    }

    pub fn go_to(&mut self, index: usize) {
        self.carousel.go_to(index);
        self.finish_transition();
    }

    /// Delivers the surface's transition-end signal if an animation is in
    /// flight.
    pub fn finish_transition(&mut self) -> bool {
        if !self.strip.complete_animation() {
            return false;
        }
        self.carousel.transition_finished();
        true
    }

    /// Horizontal drag from `from_x` to `to_x` in `steps` move samples.
    pub fn swipe(&mut self, from_x: f32, to_x: f32, steps: usize) {
        self.carousel.pointer(&PointerEvent::down(from_x, SWIPE_Y));
        let steps = steps.max(1);
        for step in 1..=steps {
            let x = from_x + (to_x - from_x) * step as f32 / steps as f32;
            self.carousel.pointer(&PointerEvent::moved(x, SWIPE_Y));
        }
        self.carousel.pointer(&PointerEvent::up(to_x, SWIPE_Y));
    }

    /// Free-scrolls the strip by `dx` pixels in one scroll event.
    pub fn user_scroll(&mut self, dx: f32) {
        self.strip.scroll_by(dx);
        self.carousel.scroll_moved();
    }

    pub fn toggle_autoplay(&mut self) {
        self.carousel.toggle_autoplay();
    }

    /// Moves virtual time forward, completing any animation a timer starts
    /// as soon as it starts.
    pub fn advance_time(&mut self, duration: Duration) {
        let mut remaining = duration;
        let slice = Duration::from_millis(1);
        while !remaining.is_zero() {
            let step = remaining.min(slice);
            self.scheduler.advance_by(step);
            self.finish_transition();
            remaining -= step;
        }
    }

    pub fn advance_millis(&mut self, millis: u64) {
        self.advance_time(Duration::from_millis(millis));
    }

    /// Unmounts the carousel, returning the strip and scheduler so a test can
    /// check that nothing fires afterwards.
    pub fn unmount(self) -> (Rc<ManualScheduler>, Rc<FakeStrip>) {
        let Self {
            scheduler,
            strip,
            carousel,
        } = self;
        drop(carousel);
        (scheduler, strip)
    }
}

#[cfg(test)]
#[path = "tests/robot_tests.rs"]
mod tests;
