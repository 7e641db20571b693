//! Scroll model: a natively scrolled strip of repeated copies.

use super::event::{Reanchor, Transition};
use super::loop_window::{RepeatedStrip, MIN_LOOP_COPIES};
use super::navigator::Direction;
use super::proximity::{self, Resolution, StripMeasurement};

/// Result of reconciling a settled strip with its measurement.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Settled {
    pub resolution: Resolution,
    /// Present when the settled position landed in an edge copy, or when
    /// the fallback had to move the strip back to the first item.
    pub reanchor: Option<Reanchor>,
}

/// Authoritative rendered position plus the resolution guard.
///
/// Navigation updates `rendered` directly. Measurements are only read back
/// after free scrolling settles.
#[derive(Clone, Copy, Debug)]
pub struct ScrollStrip {
    strip: RepeatedStrip,
    looped: bool,
    rendered: usize,
    suppressed: bool,
}

impl ScrollStrip {
    /// Non-looping strips render a single copy regardless of `copies`;
    /// looping ones render at least [`MIN_LOOP_COPIES`].
    pub fn new(len: usize, copies: usize, looped: bool, initial: usize) -> Self {
        let looped = looped && len > 1;
        let copies = if looped { copies.max(MIN_LOOP_COPIES) } else { 1 };
        let strip = RepeatedStrip::new(len, copies);
        Self {
            strip,
            looped,
            rendered: strip.home_of(initial),
            suppressed: false,
        }
    }

    pub fn strip(&self) -> RepeatedStrip {
        self.strip
    }

    pub fn rendered(&self) -> usize {
        self.rendered
    }

    pub fn current_index(&self) -> usize {
        self.strip.logical_for(self.rendered)
    }

    /// True while an unanimated jump is in flight; scroll events it causes
    /// must not be resolved.
    pub fn is_suppressed(&self) -> bool {
        self.suppressed
    }

    pub fn placement(&self) -> Transition {
        Transition::ScrollToItem {
            rendered: self.rendered,
            animated: false,
        }
    }

    pub fn can_step(&self, direction: Direction) -> bool {
        if self.strip.len() < 2 {
            return false;
        }
        match direction {
            Direction::Forward => self.rendered + 1 < self.strip.rendered_count(),
            Direction::Backward => self.rendered > 0,
        }
    }

    pub fn step(&mut self, direction: Direction) -> Option<Transition> {
        if !self.can_step(direction) {
            return None;
        }
        self.rendered = match direction {
            Direction::Forward => self.rendered + 1,
            Direction::Backward => self.rendered - 1,
        };
        Some(Transition::ScrollToItem {
            rendered: self.rendered,
            animated: true,
        })
    }

    /// Scrolls to the copy of `logical` nearest the current position.
    pub fn scroll_to(&mut self, logical: usize) -> Option<Transition> {
        if logical >= self.strip.len() {
            return None;
        }
        let target = self.strip.nearest_copy(logical, self.rendered);
        if target == self.rendered {
            return None;
        }
        self.rendered = target;
        Some(Transition::ScrollToItem {
            rendered: target,
            animated: true,
        })
    }

    /// Called when an animated scroll has ended. Recentres out of edge copies.
    pub fn finish(&mut self) -> Option<Reanchor> {
        if !self.looped || !self.strip.is_edge(self.rendered) {
            return None;
        }
        let from = self.rendered;
        let to = self.strip.home_of(self.strip.logical_for(from));
        self.rendered = to;
        self.suppressed = true;
        Some(Reanchor {
            from,
            to,
            transition: Transition::ScrollToItem {
                rendered: to,
                animated: false,
            },
        })
    }

    /// Reconciles the tracked position with where free scrolling left the
    /// strip.
    pub fn settle(&mut self, measurement: &StripMeasurement) -> Settled {
        let resolution = proximity::resolve(measurement, self.strip.len());
        let reanchor = match resolution {
            Resolution::Measured { rendered, .. } => {
                self.rendered = rendered.min(self.strip.rendered_count().saturating_sub(1));
                self.recentre(measurement)
            }
            Resolution::Fallback => {
                let from = self.rendered;
                let to = self.strip.home_of(0);
                self.rendered = to;
                self.suppressed = true;
                Some(Reanchor {
                    from,
                    to,
                    transition: Transition::ScrollToItem {
                        rendered: to,
                        animated: false,
                    },
                })
            }
        };
        Settled {
            resolution,
            reanchor,
        }
    }

    /// Clears the guard raised by a reanchor jump.
    pub fn end_reanchor(&mut self) {
        self.suppressed = false;
    }

    fn recentre(&mut self, measurement: &StripMeasurement) -> Option<Reanchor> {
        if !self.looped || !self.strip.is_edge(self.rendered) {
            return None;
        }
        let from = self.rendered;
        let to = self.strip.home_of(self.strip.logical_for(from));
        let transition = match proximity::reanchor_offset(measurement, from, to) {
            Some(dx) => Transition::ScrollBy {
                dx,
                animated: false,
            },
            None => Transition::ScrollToItem {
                rendered: to,
                animated: false,
            },
        };
        self.rendered = to;
        self.suppressed = true;
        Some(Reanchor {
            from,
            to,
            transition,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_ui_graphics::Rect;

    const WIDTH: f32 = 100.0;

    fn measurement(count: usize, centred_on: usize) -> StripMeasurement {
        let scroll = centred_on as f32 * WIDTH;
        let items = (0..count)
            .map(|index| Rect::new(index as f32 * WIDTH - scroll, 0.0, WIDTH, 80.0))
            .collect();
        StripMeasurement::new(Rect::new(0.0, 0.0, WIDTH, 80.0), items)
    }

    #[test]
    fn starts_in_middle_copy() {
        let strip = ScrollStrip::new(4, 5, true, 1);
        assert_eq!(strip.rendered(), 9);
        assert_eq!(strip.current_index(), 1);
    }

    #[test]
    fn scroll_to_picks_nearest_copy() {
        let mut strip = ScrollStrip::new(4, 5, true, 3);
        assert_eq!(
            strip.scroll_to(0),
            Some(Transition::ScrollToItem {
                rendered: 12,
                animated: true
            })
        );
        assert_eq!(strip.current_index(), 0);
    }

    #[test]
    fn settling_in_edge_copy_recentres_by_measured_distance() {
        let mut strip = ScrollStrip::new(4, 5, true, 0);
        let settled = strip.settle(&measurement(20, 18));
        assert_eq!(settled.resolution.logical(), 2);
        let reanchor = settled.reanchor.expect("edge copy recentres");
        assert_eq!((reanchor.from, reanchor.to), (18, 10));
        assert_eq!(
            reanchor.transition,
            Transition::ScrollBy {
                dx: -800.0,
                animated: false
            }
        );
        assert!(strip.is_suppressed());
        strip.end_reanchor();
        assert!(!strip.is_suppressed());
        assert_eq!(strip.current_index(), 2);
    }

    #[test]
    fn settling_in_middle_copy_keeps_position() {
        let mut strip = ScrollStrip::new(4, 5, true, 0);
        let settled = strip.settle(&measurement(20, 11));
        assert_eq!(settled.reanchor, None);
        assert_eq!(strip.rendered(), 11);
        assert!(!strip.is_suppressed());
    }

    #[test]
    fn fallback_returns_to_first_item() {
        let mut strip = ScrollStrip::new(4, 5, true, 2);
        let settled = strip.settle(&StripMeasurement::default());
        assert!(settled.resolution.is_fallback());
        assert_eq!(strip.current_index(), 0);
        assert_eq!(strip.rendered(), 8);
    }

    #[test]
    fn clamped_strip_has_one_copy() {
        let mut strip = ScrollStrip::new(3, 5, false, 2);
        assert_eq!(strip.strip().rendered_count(), 3);
        assert_eq!(strip.step(Direction::Forward), None);
        assert!(strip.step(Direction::Backward).is_some());
        assert_eq!(strip.finish(), None);
    }

    #[test]
    fn animated_step_into_edge_copy_recentres_on_finish() {
        let mut strip = ScrollStrip::new(2, 3, true, 0);
        assert_eq!(strip.rendered(), 2);
        strip.step(Direction::Backward);
        let reanchor = strip.finish().map(|r| (r.from, r.to));
        assert_eq!(reanchor, Some((1, 3)));
        assert_eq!(strip.current_index(), 1);
    }

    #[test]
    fn looped_strip_with_one_copy_still_wraps() {
        let mut strip = ScrollStrip::new(3, 1, true, 0);
        assert_eq!(strip.strip().rendered_count(), 9);
        assert!(strip.scroll_to(2).is_some());
        assert_eq!(strip.finish().map(|r| r.to), Some(5));
        assert!(strip.step(Direction::Forward).is_some());
        assert_eq!(strip.current_index(), 0);
        let reanchor = strip.finish().map(|r| (r.from, r.to));
        assert_eq!(reanchor, Some((6, 3)));
        assert_eq!(strip.current_index(), 0);
    }
}
