use folio_core::Instant;
use smallvec::SmallVec;

use super::autoplay::{self, AutoplayTimer};
use super::config::{CarouselConfig, ResolutionStrategy};
use super::event::{CarouselEvent, Reanchor, Transition};
use super::gesture::SwipeDetector;
use super::index_track::IndexTrack;
use super::indicator::{indicator_dots, indicator_scroll_offset, IndicatorDot};
use super::loop_window::visible_window;
use super::navigator::{self, Direction};
use super::proximity::StripMeasurement;
use super::scroll_strip::ScrollStrip;
use crate::input::{PointerEvent, PointerEventKind};

/// Interaction phase. Autoplay runs independently of it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Phase {
    #[default]
    Idle,
    Dragging,
    /// An animated transition is in flight.
    Navigating,
    /// Free scrolling is waiting for quiescence.
    Settling,
    /// An unanimated reanchor jump is in flight.
    Recentering,
}

impl Phase {
    pub fn accepts_navigation(self) -> bool {
        matches!(self, Phase::Idle | Phase::Dragging)
    }
}

/// Whether each navigation control is actionable right now.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Controls {
    pub previous: bool,
    pub next: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Indicator {
    pub active: usize,
    pub dots: Vec<IndicatorDot>,
    pub scroll_offset: f32,
}

/// Everything a surface needs to redraw chrome around the strip.
#[derive(Clone, Debug, PartialEq)]
pub struct CarouselSnapshot {
    pub index: usize,
    pub len: usize,
    pub phase: Phase,
    pub progress: f32,
    pub autoplay: bool,
    pub controls: Controls,
    pub indicator: Option<Indicator>,
    pub track_offset_percent: Option<f32>,
}

#[derive(Clone, Copy, Debug)]
enum Model {
    Index(IndexTrack),
    Scroll(ScrollStrip),
}

impl Model {
    fn current_index(&self) -> usize {
        match self {
            Model::Index(track) => track.current_index(),
            Model::Scroll(strip) => strip.current_index(),
        }
    }

    fn can_step(&self, direction: Direction) -> bool {
        match self {
            Model::Index(track) => track.can_step(direction),
            Model::Scroll(strip) => strip.can_step(direction),
        }
    }

    fn step(&mut self, direction: Direction) -> Option<Transition> {
        match self {
            Model::Index(track) => track.step(direction),
            Model::Scroll(strip) => strip.step(direction),
        }
    }

    fn go_to(&mut self, index: usize) -> Option<Transition> {
        match self {
            Model::Index(track) => track.go_to(index),
            Model::Scroll(strip) => strip.scroll_to(index),
        }
    }

    fn finish(&mut self) -> Option<Reanchor> {
        match self {
            Model::Index(track) => track.finish(),
            Model::Scroll(strip) => strip.finish(),
        }
    }
}

/// One carousel instance: navigation policy, gestures, autoplay and
/// whichever position model the configuration selects.
///
/// The carousel never touches a clock or a surface itself. Methods that
/// change what is on screen return the [`Transition`] to apply, and
/// notifications queue up until [`Carousel::drain_events`].
#[derive(Debug)]
pub struct Carousel {
    len: usize,
    visible: usize,
    with_indicator: bool,
    model: Model,
    phase: Phase,
    swipe: SwipeDetector,
    autoplay: AutoplayTimer,
    events: Vec<CarouselEvent>,
}

impl Carousel {
    /// Returns `None` for an empty item list; such a carousel renders
    /// nothing and takes no input.
    pub fn new(config: &CarouselConfig, now: Instant) -> Option<Self> {
        let len = config.len();
        if len == 0 {
            log::debug!("carousel has no items; not mounting");
            return None;
        }
        let visible = config.visible_count.max(1);
        let initial = config.start_index().min(len - 1);
        let model = match config.resolution {
            ResolutionStrategy::Index => {
                Model::Index(IndexTrack::new(len, visible, config.looped, initial))
            }
            ResolutionStrategy::ScrollProximity => Model::Scroll(ScrollStrip::new(
                len,
                config.copies,
                config.looped,
                initial,
            )),
        };
        Some(Self {
            len,
            visible,
            with_indicator: config.with_indicator,
            model,
            phase: Phase::Idle,
            swipe: SwipeDetector::new(config.swipe),
            autoplay: AutoplayTimer::new(
                config.autoplay_duration(),
                config.autoplay_enabled(),
                now,
            ),
            events: Vec::new(),
        })
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn current_index(&self) -> usize {
        self.model.current_index()
    }

    pub fn is_scroll_model(&self) -> bool {
        matches!(self.model, Model::Scroll(_))
    }

    /// Unanimated placement applied once when the surface is first shown.
    pub fn initial_placement(&self) -> Transition {
        match &self.model {
            Model::Index(track) => track.placement(),
            Model::Scroll(strip) => strip.placement(),
        }
    }

    /// Logical item shown by every rendered slot, in render order.
    pub fn rendered_items(&self) -> Vec<usize> {
        match &self.model {
            Model::Index(track) => track.window().slots(),
            Model::Scroll(strip) => strip.strip().rendered(),
        }
    }

    /// Logical items currently in the viewport.
    pub fn visible_items(&self) -> SmallVec<[usize; 8]> {
        visible_window(self.len, self.current_index(), self.visible)
    }

    pub fn advance(&mut self, now: Instant) -> Option<Transition> {
        self.navigate(Direction::Forward, now)
    }

    pub fn retreat(&mut self, now: Instant) -> Option<Transition> {
        self.navigate(Direction::Backward, now)
    }

    pub fn go_to(&mut self, index: usize, now: Instant) -> Option<Transition> {
        if !self.phase.accepts_navigation() {
            log::debug!("dropping go_to({index}) while {:?}", self.phase);
            return None;
        }
        let previous = self.current_index();
        let transition = self.model.go_to(index)?;
        self.accept(previous, transition, now);
        Some(transition)
    }

    pub fn navigate(&mut self, direction: Direction, now: Instant) -> Option<Transition> {
        if !self.phase.accepts_navigation() {
            log::debug!("dropping {direction:?} navigation while {:?}", self.phase);
            return None;
        }
        let previous = self.current_index();
        let transition = self.model.step(direction)?;
        self.accept(previous, transition, now);
        Some(transition)
    }

    fn accept(&mut self, previous: usize, transition: Transition, now: Instant) {
        self.set_phase(if transition.is_animated() {
            Phase::Navigating
        } else {
            Phase::Idle
        });
        self.autoplay.restart(now);
        let index = self.current_index();
        if index != previous {
            self.events
                .push(CarouselEvent::IndexChanged { index, previous });
        }
    }

    /// Completion signal for the last animated transition. Returns the
    /// unanimated reanchor to apply, if the transition ended on a duplicate.
    pub fn transition_finished(&mut self) -> Option<Transition> {
        if self.phase != Phase::Navigating {
            log::debug!("ignoring transition end while {:?}", self.phase);
            return None;
        }
        self.events.push(CarouselEvent::TransitionCompleted {
            index: self.current_index(),
        });
        match self.model.finish() {
            Some(reanchor) => {
                self.events.push(CarouselEvent::Reanchored {
                    from: reanchor.from,
                    to: reanchor.to,
                });
                self.set_phase(if self.is_scroll_model() {
                    Phase::Recentering
                } else {
                    Phase::Idle
                });
                Some(reanchor.transition)
            }
            None => {
                self.set_phase(Phase::Idle);
                None
            }
        }
    }

    pub fn pointer_down(&mut self, event: &PointerEvent) {
        self.swipe.begin(event.position.x);
        if self.phase == Phase::Idle {
            self.set_phase(Phase::Dragging);
        }
    }

    /// Feeds a move sample. A swipe only navigates the index model; the
    /// scroll model is moved by native scrolling.
    pub fn pointer_move(&mut self, event: &PointerEvent, now: Instant) -> Option<Transition> {
        let direction = self.swipe.update(event.position.x)?;
        if self.is_scroll_model() {
            return None;
        }
        self.navigate(direction, now)
    }

    pub fn pointer_up(&mut self, event: &PointerEvent, now: Instant) -> Option<Transition> {
        let direction = self.swipe.release(event.position.x);
        if self.phase == Phase::Dragging {
            self.set_phase(Phase::Idle);
        }
        if self.is_scroll_model() {
            return None;
        }
        self.navigate(direction?, now)
    }

    pub fn pointer_cancel(&mut self) {
        self.swipe.cancel();
        if self.phase == Phase::Dragging {
            self.set_phase(Phase::Idle);
        }
    }

    /// Routes a raw pointer event to the matching handler.
    pub fn pointer(&mut self, event: &PointerEvent, now: Instant) -> Option<Transition> {
        match event.kind {
            PointerEventKind::Down => {
                self.pointer_down(event);
                None
            }
            PointerEventKind::Move => self.pointer_move(event, now),
            PointerEventKind::Up => self.pointer_up(event, now),
            PointerEventKind::Cancel => {
                self.pointer_cancel();
                None
            }
        }
    }

    /// Records raw scroll movement. Returns true when the settle debounce
    /// should (re)start; scrolls caused by our own transitions are ignored.
    pub fn scroll_moved(&mut self) -> bool {
        let Model::Scroll(strip) = &self.model else {
            return false;
        };
        if strip.is_suppressed() || matches!(self.phase, Phase::Navigating | Phase::Recentering) {
            return false;
        }
        if self.phase == Phase::Idle {
            self.set_phase(Phase::Settling);
        }
        true
    }

    /// Resolves where free scrolling left the strip. Returns the reanchor
    /// jump to apply when it settled in an edge copy.
    pub fn settle(&mut self, measurement: &StripMeasurement, now: Instant) -> Option<Transition> {
        if matches!(self.phase, Phase::Navigating | Phase::Recentering) {
            return None;
        }
        let previous = self.current_index();
        let Model::Scroll(strip) = &mut self.model else {
            return None;
        };
        let settled = strip.settle(measurement);
        let index = strip.current_index();
        if index != previous {
            self.autoplay.restart(now);
            self.events
                .push(CarouselEvent::IndexChanged { index, previous });
        }
        match settled.reanchor {
            Some(reanchor) => {
                self.events.push(CarouselEvent::Reanchored {
                    from: reanchor.from,
                    to: reanchor.to,
                });
                self.set_phase(Phase::Recentering);
                Some(reanchor.transition)
            }
            None => {
                if self.phase == Phase::Settling {
                    self.set_phase(Phase::Idle);
                }
                None
            }
        }
    }

    /// Lifts the resolution guard once a reanchor jump has landed.
    pub fn reanchor_guard_elapsed(&mut self) {
        if let Model::Scroll(strip) = &mut self.model {
            strip.end_reanchor();
        }
        if self.phase == Phase::Recentering {
            self.set_phase(Phase::Idle);
        }
    }

    /// Polls autoplay. When the current item has been shown long enough and
    /// the carousel is idle, navigates forward; a clamped carousel at its
    /// end rewinds to the first item. While busy, progress holds at 1 and
    /// the next tick retries.
    pub fn autoplay_tick(&mut self, now: Instant) -> Option<Transition> {
        let tick = self.autoplay.tick(now);
        log::trace!("autoplay progress {:.2}", tick.progress);
        if !tick.due {
            return None;
        }
        if self.phase != Phase::Idle {
            log::debug!("autoplay due while {:?}; deferring", self.phase);
            return None;
        }
        if self.model.can_step(Direction::Forward) {
            self.advance(now)
        } else if self.len > 1 {
            self.go_to(0, now)
        } else {
            self.autoplay.restart(now);
            None
        }
    }

    pub fn set_autoplay(&mut self, enabled: bool, now: Instant) {
        if self.autoplay.set_enabled(enabled, now) {
            self.events.push(CarouselEvent::AutoplayToggled { enabled });
        }
    }

    pub fn toggle_autoplay(&mut self, now: Instant) {
        let enabled = !self.autoplay.is_enabled();
        self.set_autoplay(enabled, now);
    }

    pub fn is_autoplay_enabled(&self) -> bool {
        self.autoplay.is_enabled()
    }

    pub fn progress(&self) -> f32 {
        self.autoplay.progress()
    }

    /// Story-bar fills, one per item.
    pub fn segments(&self) -> Vec<f32> {
        autoplay::segments(self.current_index(), self.len, self.progress()).collect()
    }

    pub fn controls(&self) -> Controls {
        let idle = self.phase.accepts_navigation();
        Controls {
            previous: idle && self.model.can_step(Direction::Backward),
            next: idle && self.model.can_step(Direction::Forward),
        }
    }

    pub fn indicator(&self) -> Option<Indicator> {
        if !self.with_indicator {
            return None;
        }
        let (active, count) = match &self.model {
            Model::Index(track) => track.page(),
            Model::Scroll(strip) => (strip.current_index(), self.len),
        };
        Some(Indicator {
            active,
            dots: indicator_dots(active, count),
            scroll_offset: indicator_scroll_offset(active),
        })
    }

    /// Track translation in percent of the viewport; index model only.
    pub fn track_offset_percent(&self) -> Option<f32> {
        match &self.model {
            Model::Index(track) => Some(track.offset_percent()),
            Model::Scroll(_) => None,
        }
    }

    /// Previous and next logical items, for peek thumbnails.
    pub fn neighbors(&self) -> Option<(usize, usize)> {
        navigator::neighbors(self.current_index(), self.len)
    }

    /// "k / N" counter label.
    pub fn counter(&self) -> String {
        format!("{} / {}", self.current_index() + 1, self.len)
    }

    pub fn snapshot(&self) -> CarouselSnapshot {
        CarouselSnapshot {
            index: self.current_index(),
            len: self.len,
            phase: self.phase,
            progress: self.progress(),
            autoplay: self.is_autoplay_enabled(),
            controls: self.controls(),
            indicator: self.indicator(),
            track_offset_percent: self.track_offset_percent(),
        }
    }

    pub fn drain_events(&mut self) -> Vec<CarouselEvent> {
        std::mem::take(&mut self.events)
    }

    fn set_phase(&mut self, phase: Phase) {
        if self.phase != phase {
            log::debug!("carousel phase {:?} -> {:?}", self.phase, phase);
            self.phase = phase;
        }
    }
}

#[cfg(test)]
#[path = "tests/carousel_tests.rs"]
mod tests;
