//! Mounting a [`Carousel`] onto a surface and a scheduler.
//!
//! [`MountedCarousel`] owns every timer the widget needs. Scheduled
//! callbacks only hold a weak reference, so once the mount is dropped they
//! find nothing to act on even if a platform delivers them late.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use folio_core::{Instant, Scheduler, TaskHandle};

use super::autoplay::AUTOPLAY_TICK;
use super::config::{CarouselConfig, ConfigError};
use super::event::{CarouselEvent, Transition};
use super::proximity::{StripMeasurement, REANCHOR_GUARD, SETTLE_DEBOUNCE};
use super::widget::{Carousel, CarouselSnapshot, Controls, Phase};
use crate::input::PointerEvent;

/// The rendering side of a mounted carousel.
///
/// Calls arrive with no internal borrow held, so a surface may call back into
/// the carousel (for instance to report an instant transition end).
pub trait CarouselSurface {
    fn apply(&self, transition: &Transition);

    /// Current strip layout. Only the scroll model asks for it.
    fn measure(&self) -> StripMeasurement;

    fn emit(&self, event: &CarouselEvent);

    /// Redraws controls, indicator and progress.
    fn render(&self, _snapshot: &CarouselSnapshot) {}
}

#[derive(Default)]
struct HostTasks {
    autoplay: Option<TaskHandle>,
    settle: Option<TaskHandle>,
    reanchor_guard: Option<TaskHandle>,
}

struct Shared {
    carousel: RefCell<Carousel>,
    scheduler: Rc<dyn Scheduler>,
    surface: Rc<dyn CarouselSurface>,
    tasks: RefCell<HostTasks>,
}

impl Shared {
    fn run(self: &Rc<Self>, action: impl FnOnce(&mut Carousel, Instant) -> Option<Transition>) {
        let now = self.scheduler.now();
        let (transition, events, phase) = {
            let mut carousel = self.carousel.borrow_mut();
            let transition = action(&mut carousel, now);
            (transition, carousel.drain_events(), carousel.phase())
        };
        self.flush(transition, events, phase);
    }

    fn flush(self: &Rc<Self>, transition: Option<Transition>, events: Vec<CarouselEvent>, phase: Phase) {
        if let Some(transition) = transition {
            self.surface.apply(&transition);
        }
        let reanchored = events
            .iter()
            .any(|event| matches!(event, CarouselEvent::Reanchored { .. }));
        if reanchored && phase == Phase::Recentering {
            self.arm_reanchor_guard();
        }
        let mut autoplay_changed = false;
        for event in &events {
            autoplay_changed |= matches!(event, CarouselEvent::AutoplayToggled { .. });
            self.surface.emit(event);
        }
        if autoplay_changed {
            self.sync_autoplay();
        }
        self.render();
    }

    fn render(&self) {
        let snapshot = self.carousel.borrow().snapshot();
        self.surface.render(&snapshot);
    }

    fn sync_autoplay(self: &Rc<Self>) {
        let enabled = self.carousel.borrow().is_autoplay_enabled();
        let replaced = {
            let mut tasks = self.tasks.borrow_mut();
            match (enabled, tasks.autoplay.is_some()) {
                (true, false) => {
                    let weak = Rc::downgrade(self);
                    tasks.autoplay = Some(TaskHandle::repeating(&self.scheduler, AUTOPLAY_TICK, move || {
                        if let Some(shared) = weak.upgrade() {
                            shared.run(|carousel, now| carousel.autoplay_tick(now));
                        }
                    }));
                    None
                }
                (false, true) => tasks.autoplay.take(),
                _ => None,
            }
        };
        drop(replaced);
    }

    fn arm_reanchor_guard(self: &Rc<Self>) {
        let weak = Rc::downgrade(self);
        let handle = TaskHandle::once(&self.scheduler, REANCHOR_GUARD, move || {
            let Some(shared) = weak.upgrade() else {
                return;
            };
            shared.carousel.borrow_mut().reanchor_guard_elapsed();
            shared.render();
        });
        let previous = self.tasks.borrow_mut().reanchor_guard.replace(handle);
        drop(previous);
    }

    fn scroll_moved(self: &Rc<Self>) {
        if !self.carousel.borrow_mut().scroll_moved() {
            return;
        }
        let weak = Rc::downgrade(self);
        let handle = TaskHandle::once(&self.scheduler, SETTLE_DEBOUNCE, move || {
            if let Some(shared) = weak.upgrade() {
                let measurement = shared.surface.measure();
                shared.run(|carousel, now| carousel.settle(&measurement, now));
            }
        });
        let previous = self.tasks.borrow_mut().settle.replace(handle);
        drop(previous);
    }
}

/// A carousel attached to a surface. Dropping it cancels autoplay, the
/// settle debounce and any pending reanchor guard.
pub struct MountedCarousel {
    shared: Rc<Shared>,
}

impl MountedCarousel {
    /// Validates `config` and mounts it. An empty item list mounts nothing
    /// and returns `Ok(None)`.
    pub fn mount(
        config: &CarouselConfig,
        scheduler: Rc<dyn Scheduler>,
        surface: Rc<dyn CarouselSurface>,
    ) -> Result<Option<Self>, ConfigError> {
        config.validate()?;
        let Some(carousel) = Carousel::new(config, scheduler.now()) else {
            return Ok(None);
        };
        let placement = carousel.initial_placement();
        log::debug!(
            "mounting carousel with {} items at index {}",
            carousel.len(),
            carousel.current_index()
        );
        let shared = Rc::new(Shared {
            carousel: RefCell::new(carousel),
            scheduler,
            surface,
            tasks: RefCell::new(HostTasks::default()),
        });
        shared.surface.apply(&placement);
        shared.sync_autoplay();
        shared.render();
        Ok(Some(Self { shared }))
    }

    /// A weak handle for event listeners.
    pub fn handle(&self) -> CarouselHandle {
        CarouselHandle {
            shared: Rc::downgrade(&self.shared),
        }
    }

    pub fn current_index(&self) -> usize {
        self.shared.carousel.borrow().current_index()
    }

    pub fn len(&self) -> usize {
        self.shared.carousel.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn phase(&self) -> Phase {
        self.shared.carousel.borrow().phase()
    }

    pub fn progress(&self) -> f32 {
        self.shared.carousel.borrow().progress()
    }

    pub fn controls(&self) -> Controls {
        self.shared.carousel.borrow().controls()
    }

    pub fn is_autoplay_enabled(&self) -> bool {
        self.shared.carousel.borrow().is_autoplay_enabled()
    }

    pub fn rendered_items(&self) -> Vec<usize> {
        self.shared.carousel.borrow().rendered_items()
    }

    pub fn snapshot(&self) -> CarouselSnapshot {
        self.shared.carousel.borrow().snapshot()
    }

    pub fn is_autoplay_scheduled(&self) -> bool {
        self.shared
            .tasks
            .borrow()
            .autoplay
            .as_ref()
            .is_some_and(TaskHandle::is_pending)
    }

    pub fn advance(&self) {
        self.ops().advance();
    }

    pub fn retreat(&self) {
        self.ops().retreat();
    }

    pub fn go_to(&self, index: usize) {
        self.ops().go_to(index);
    }

    pub fn pointer(&self, event: &PointerEvent) {
        self.ops().pointer(event);
    }

    pub fn transition_finished(&self) {
        self.ops().transition_finished();
    }

    pub fn scroll_moved(&self) {
        self.ops().scroll_moved();
    }

    pub fn set_autoplay(&self, enabled: bool) {
        self.ops().set_autoplay(enabled);
    }

    pub fn toggle_autoplay(&self) {
        self.ops().toggle_autoplay();
    }

    fn ops(&self) -> Ops<'_> {
        Ops(&self.shared)
    }
}

impl Drop for MountedCarousel {
    fn drop(&mut self) {
        let tasks = std::mem::take(&mut *self.shared.tasks.borrow_mut());
        drop(tasks);
        log::debug!("carousel unmounted");
    }
}

/// Weak reference to a mounted carousel. Every call is a no-op once the
/// mount has been dropped.
#[derive(Clone)]
pub struct CarouselHandle {
    shared: Weak<Shared>,
}

impl CarouselHandle {
    pub fn is_mounted(&self) -> bool {
        self.shared.strong_count() > 0
    }

    pub fn advance(&self) {
        self.with(|ops| ops.advance());
    }

    pub fn retreat(&self) {
        self.with(|ops| ops.retreat());
    }

    pub fn go_to(&self, index: usize) {
        self.with(|ops| ops.go_to(index));
    }

    pub fn pointer(&self, event: &PointerEvent) {
        self.with(|ops| ops.pointer(event));
    }

    pub fn transition_finished(&self) {
        self.with(|ops| ops.transition_finished());
    }

    pub fn scroll_moved(&self) {
        self.with(|ops| ops.scroll_moved());
    }

    pub fn set_autoplay(&self, enabled: bool) {
        self.with(|ops| ops.set_autoplay(enabled));
    }

    pub fn toggle_autoplay(&self) {
        self.with(|ops| ops.toggle_autoplay());
    }

    fn with(&self, f: impl FnOnce(Ops<'_>)) {
        if let Some(shared) = self.shared.upgrade() {
            f(Ops(&shared));
        }
    }
}

struct Ops<'a>(&'a Rc<Shared>);

impl Ops<'_> {
    fn advance(&self) {
        self.0.run(|carousel, now| carousel.advance(now));
    }

    fn retreat(&self) {
        self.0.run(|carousel, now| carousel.retreat(now));
    }

    fn go_to(&self, index: usize) {
        self.0.run(|carousel, now| carousel.go_to(index, now));
    }

    fn pointer(&self, event: &PointerEvent) {
        self.0.run(|carousel, now| carousel.pointer(event, now));
    }

    fn transition_finished(&self) {
        self.0.run(|carousel, _| carousel.transition_finished());
    }

    fn scroll_moved(&self) {
        self.0.scroll_moved();
    }

    fn set_autoplay(&self, enabled: bool) {
        self.0.run(|carousel, now| {
            carousel.set_autoplay(enabled, now);
            None
        });
    }

    fn toggle_autoplay(&self) {
        self.0.run(|carousel, now| {
            carousel.toggle_autoplay(now);
            None
        });
    }
}
