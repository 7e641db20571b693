//! Commands for the rendering surface and notifications for the page.

/// A visual change the surface must perform.
///
/// Animated transitions report completion through
/// [`Carousel::transition_finished`](super::Carousel::transition_finished);
/// unanimated ones are considered applied immediately.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Transition {
    /// Index model: translate the track so `slot` is the first visible slot.
    Track { slot: usize, animated: bool },
    /// Scroll model: scroll rendered item `rendered` to the viewport center.
    ScrollToItem { rendered: usize, animated: bool },
    /// Scroll model: scroll by a measured pixel distance.
    ScrollBy { dx: f32, animated: bool },
}

impl Transition {
    pub fn is_animated(&self) -> bool {
        match *self {
            Transition::Track { animated, .. }
            | Transition::ScrollToItem { animated, .. }
            | Transition::ScrollBy { animated, .. } => animated,
        }
    }
}

/// Observable carousel notifications.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CarouselEvent {
    IndexChanged { index: usize, previous: usize },
    /// An animated navigation finished on `index`.
    TransitionCompleted { index: usize },
    /// The rendered position jumped to an equivalent one without animation.
    Reanchored { from: usize, to: usize },
    AutoplayToggled { enabled: bool },
}

/// An unanimated jump between equivalent rendered positions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Reanchor {
    pub from: usize,
    pub to: usize,
    pub transition: Transition,
}
