use std::cell::RefCell;

use folio_foundation::carousel::{centering_delta, CarouselSnapshot, CarouselSurface, IndicatorDot};
use folio_foundation::{CarouselEvent, StripMeasurement, Transition};
use folio_ui_graphics::Rect;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, HtmlElement, ScrollBehavior, ScrollToOptions};

/// Event the strip dispatches on its viewport when an animated scroll had
/// nowhere to go, standing in for the browser's `scrollend`.
pub(crate) const SCROLL_END: &str = "scrollend";

/// Event the track fires when its transform transition completes. The strip
/// dispatches it itself when the track has no running transition.
pub(crate) const TRANSITION_END: &str = "transitionend";

/// Scroll distances below this are treated as no movement.
const MIN_SCROLL_DELTA: f32 = 0.5;

/// Optional elements around the strip that mirror carousel state.
#[derive(Default)]
pub struct StripChrome {
    pub previous: Option<HtmlElement>,
    pub next: Option<HtmlElement>,
    pub indicator: Option<HtmlElement>,
    pub progress: Option<HtmlElement>,
    pub counter: Option<HtmlElement>,
}

impl StripChrome {
    /// Looks up `[data-carousel-prev]`, `[data-carousel-next]`,
    /// `[data-carousel-dots]`, `[data-carousel-progress]` and
    /// `[data-carousel-counter]` under `root`.
    pub fn query(root: &Element) -> Result<Self, JsValue> {
        Ok(Self {
            previous: query_html(root, "[data-carousel-prev]")?,
            next: query_html(root, "[data-carousel-next]")?,
            indicator: query_html(root, "[data-carousel-dots]")?,
            progress: query_html(root, "[data-carousel-progress]")?,
            counter: query_html(root, "[data-carousel-counter]")?,
        })
    }
}

pub(crate) fn query_html(root: &Element, selector: &str) -> Result<Option<HtmlElement>, JsValue> {
    Ok(root
        .query_selector(selector)?
        .and_then(|element| element.dyn_into::<HtmlElement>().ok()))
}

/// Whether a computed `transition-duration` list holds any positive
/// duration. `"0s"`, an empty value and unparseable entries do not.
fn runs_transition(durations: &str) -> bool {
    durations.split(',').map(str::trim).any(|duration| {
        let seconds = match duration.strip_suffix("ms") {
            Some(millis) => millis.parse::<f64>().map(|millis| millis / 1000.0),
            None => duration.strip_suffix('s').unwrap_or(duration).parse::<f64>(),
        };
        seconds.is_ok_and(|seconds| seconds > 0.0)
    })
}

fn rect_of(element: &Element) -> Rect {
    let rect = element.get_bounding_client_rect();
    Rect::new(
        rect.x() as f32,
        rect.y() as f32,
        rect.width() as f32,
        rect.height() as f32,
    )
}

/// Carousel surface over a viewport element and the track inside it.
///
/// The track's element children are the rendered items, in order. The index
/// model moves the track with a CSS transform; the scroll model scrolls the
/// viewport.
pub struct DomStrip {
    viewport: HtmlElement,
    track: HtmlElement,
    visible: usize,
    chrome: StripChrome,
    listener: RefCell<Option<Box<dyn Fn(&CarouselEvent)>>>,
}

impl DomStrip {
    pub fn new(viewport: HtmlElement, track: HtmlElement, visible: usize, chrome: StripChrome) -> Self {
        Self {
            viewport,
            track,
            visible: visible.max(1),
            chrome,
            listener: RefCell::new(None),
        }
    }

    pub fn viewport(&self) -> &HtmlElement {
        &self.viewport
    }

    pub fn track(&self) -> &HtmlElement {
        &self.track
    }

    pub fn chrome(&self) -> &StripChrome {
        &self.chrome
    }

    /// Registers the page callback that receives carousel events.
    pub fn set_listener(&self, listener: impl Fn(&CarouselEvent) + 'static) {
        *self.listener.borrow_mut() = Some(Box::new(listener));
    }

    fn set_style(element: &HtmlElement, property: &str, value: &str) {
        if let Err(err) = element.style().set_property(property, value) {
            log::warn!("failed to set {property}: {err:?}");
        }
    }

    fn place_track(&self, slot: usize, animated: bool) {
        let offset = slot as f32 * 100.0 / self.visible as f32;
        if animated {
            if let Err(err) = self.track.style().remove_property("transition") {
                log::warn!("failed to restore track transition: {err:?}");
            }
        } else {
            Self::set_style(&self.track, "transition", "none");
        }
        Self::set_style(&self.track, "transform", &format!("translateX(-{offset}%)"));
        // Without a transition (no stylesheet rule, reduced motion) the
        // browser never fires transitionend.
        if animated && !self.track_transitions() {
            log::debug!("track has no transition; completing move immediately");
            self.finish_later(&self.track, TRANSITION_END);
        }
    }

    fn track_transitions(&self) -> bool {
        let Some(window) = web_sys::window() else {
            return false;
        };
        match window.get_computed_style(&self.track) {
            Ok(Some(style)) => style
                .get_property_value("transition-duration")
                .is_ok_and(|durations| runs_transition(&durations)),
            Ok(None) => false,
            Err(err) => {
                log::warn!("failed to read track style: {err:?}");
                false
            }
        }
    }

    fn scroll_viewport(&self, dx: f32, animated: bool) {
        if dx.abs() < MIN_SCROLL_DELTA {
            if animated {
                self.finish_later(&self.viewport, SCROLL_END);
            }
            return;
        }
        let options = ScrollToOptions::new();
        options.set_left(dx as f64);
        options.set_behavior(if animated {
            ScrollBehavior::Smooth
        } else {
            ScrollBehavior::Instant
        });
        self.viewport.scroll_by_with_scroll_to_options(&options);
    }

    /// Dispatches the completion event `kind` on `target` from a fresh task,
    /// so the carousel is not re-entered while it is still applying a
    /// transition.
    fn finish_later(&self, target: &HtmlElement, kind: &'static str) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let target = target.clone();
        let dispatch = Closure::once_into_js(move || match Event::new(kind) {
            Ok(event) => {
                if let Err(err) = target.dispatch_event(&event) {
                    log::warn!("failed to dispatch {kind}: {err:?}");
                }
            }
            Err(err) => log::warn!("failed to create {kind}: {err:?}"),
        });
        if let Err(err) =
            window.set_timeout_with_callback_and_timeout_and_arguments_0(dispatch.unchecked_ref(), 0)
        {
            log::warn!("failed to defer {kind}: {err:?}");
        }
    }

    fn render_indicator(&self, snapshot: &CarouselSnapshot) {
        let Some(container) = &self.chrome.indicator else {
            return;
        };
        let Some(indicator) = &snapshot.indicator else {
            container.set_hidden(true);
            return;
        };
        container.set_hidden(false);
        let dots = container.children();
        for (index, dot) in indicator.dots.iter().enumerate() {
            if let Some(element) = dots.item(index as u32) {
                element.set_class_name(dot.class_name());
                let current = if *dot == IndicatorDot::Active { "true" } else { "false" };
                if let Err(err) = element.set_attribute("aria-current", current) {
                    log::trace!("aria-current not set: {err:?}");
                }
            }
        }
        Self::set_style(
            container,
            "transform",
            &format!("translateX(-{}px)", indicator.scroll_offset),
        );
    }
}

impl CarouselSurface for DomStrip {
    fn apply(&self, transition: &Transition) {
        log::trace!("dom strip applying {transition:?}");
        match *transition {
            Transition::Track { slot, animated } => self.place_track(slot, animated),
            Transition::ScrollToItem { rendered, animated } => {
                match centering_delta(&self.measure(), rendered) {
                    Some(dx) => self.scroll_viewport(dx, animated),
                    None => {
                        log::warn!("rendered item {rendered} has no layout; scroll skipped");
                        if animated {
                            self.finish_later(&self.viewport, SCROLL_END);
                        }
                    }
                }
            }
            Transition::ScrollBy { dx, animated } => self.scroll_viewport(dx, animated),
        }
    }

    fn measure(&self) -> StripMeasurement {
        let children = self.track.children();
        let items = (0..children.length())
            .filter_map(|index| children.item(index))
            .map(|element| rect_of(&element))
            .collect();
        StripMeasurement::new(rect_of(&self.viewport), items)
    }

    fn emit(&self, event: &CarouselEvent) {
        log::debug!("carousel event {event:?}");
        if let Some(listener) = self.listener.borrow().as_ref() {
            listener(event);
        }
    }

    fn render(&self, snapshot: &CarouselSnapshot) {
        for (button, enabled) in [
            (&self.chrome.previous, snapshot.controls.previous),
            (&self.chrome.next, snapshot.controls.next),
        ] {
            if let Some(button) = button {
                if let Err(err) = button.toggle_attribute_with_force("disabled", !enabled) {
                    log::warn!("failed to toggle control: {err:?}");
                }
            }
        }
        if let Some(progress) = &self.chrome.progress {
            Self::set_style(progress, "width", &format!("{}%", snapshot.progress * 100.0));
            if let Err(err) = progress
                .class_list()
                .toggle_with_force("paused", !snapshot.autoplay)
            {
                log::warn!("failed to toggle progress state: {err:?}");
            }
        }
        if let Some(counter) = &self.chrome.counter {
            counter.set_text_content(Some(&format!("{} / {}", snapshot.index + 1, snapshot.len)));
        }
        self.render_indicator(snapshot);
    }
}

#[cfg(test)]
mod tests {
    use super::runs_transition;

    #[test]
    fn zero_durations_do_not_run() {
        assert!(!runs_transition("0s"));
        assert!(!runs_transition("0s, 0ms"));
        assert!(!runs_transition(""));
        assert!(!runs_transition("auto"));
    }

    #[test]
    fn any_positive_duration_runs() {
        assert!(runs_transition("0.3s"));
        assert!(runs_transition("0s, 250ms"));
    }
}
