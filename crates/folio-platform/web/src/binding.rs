use std::rc::Rc;

use folio_core::Scheduler;
use folio_foundation::carousel::{Carousel, CarouselHandle, CarouselSurface, ResolutionStrategy};
use folio_foundation::{CarouselConfig, CarouselEvent, MountedCarousel, PointerEventKind};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, HtmlElement, MouseEvent, TouchEvent};

use crate::dom_strip::{query_html, DomStrip, StripChrome, SCROLL_END, TRANSITION_END};
use crate::listener::EventListener;
use crate::WebPlatform;

/// A carousel mounted on DOM elements.
///
/// The root element must contain `[data-carousel-viewport]` with a
/// `[data-carousel-track]` inside it. An empty track is filled with one
/// `div.carousel-item` per rendered slot; each item carries the logical index
/// in `data-index`. Dropping the binding removes every listener and cancels
/// every timer.
pub struct CarouselBinding {
    listeners: Vec<EventListener>,
    strip: Rc<DomStrip>,
    carousel: MountedCarousel,
}

impl CarouselBinding {
    /// Reads the config from the root's `data-carousel` JSON attribute.
    pub fn from_attribute(root: &Element, scheduler: Rc<dyn Scheduler>) -> Result<Option<Self>, JsValue> {
        let json = root
            .get_attribute("data-carousel")
            .ok_or("carousel root has no data-carousel attribute")?;
        let config = CarouselConfig::from_json(&json).map_err(|err| JsValue::from_str(&err.to_string()))?;
        Self::mount(root, &config, scheduler)
    }

    /// Returns `Ok(None)` when the config has no items.
    pub fn mount(
        root: &Element,
        config: &CarouselConfig,
        scheduler: Rc<dyn Scheduler>,
    ) -> Result<Option<Self>, JsValue> {
        config.validate().map_err(|err| JsValue::from_str(&err.to_string()))?;
        let Some(preview) = Carousel::new(config, scheduler.now()) else {
            log::info!("carousel has no items; nothing mounted");
            return Ok(None);
        };
        let viewport = query_html(root, "[data-carousel-viewport]")?.ok_or("carousel has no viewport element")?;
        let track = query_html(root, "[data-carousel-track]")?.ok_or("carousel has no track element")?;
        if track.child_element_count() == 0 {
            let document = root.owner_document().ok_or("carousel root is detached")?;
            populate_track(&document, &track, config, &preview.rendered_items())?;
        }

        let strip = Rc::new(DomStrip::new(
            viewport,
            track,
            config.visible_count,
            StripChrome::query(root)?,
        ));
        let surface: Rc<dyn CarouselSurface> = strip.clone();
        let carousel = match MountedCarousel::mount(config, scheduler, surface) {
            Ok(Some(carousel)) => carousel,
            Ok(None) => return Ok(None),
            Err(err) => return Err(JsValue::from_str(&err.to_string())),
        };

        let mut listeners = Vec::new();
        let handle = carousel.handle();
        wire_controls(root, &strip, &handle, &mut listeners)?;
        match config.resolution {
            ResolutionStrategy::Index => wire_swipes(&strip, &handle, &mut listeners)?,
            ResolutionStrategy::ScrollProximity => wire_scrolling(&strip, &handle, &mut listeners)?,
        }

        Ok(Some(Self {
            listeners,
            strip,
            carousel,
        }))
    }

    pub fn carousel(&self) -> &MountedCarousel {
        &self.carousel
    }

    pub fn handle(&self) -> CarouselHandle {
        self.carousel.handle()
    }

    /// Registers the page callback that receives carousel events.
    pub fn on_event(&self, listener: impl Fn(&CarouselEvent) + 'static) {
        self.strip.set_listener(listener);
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

fn populate_track(
    document: &Document,
    track: &HtmlElement,
    config: &CarouselConfig,
    rendered: &[usize],
) -> Result<(), JsValue> {
    for &logical in rendered {
        let Some(item) = config.items.get(logical) else {
            continue;
        };
        let slide = document.create_element("div")?;
        slide.set_class_name("carousel-item");
        slide.set_attribute("data-index", &logical.to_string())?;
        let image = document.create_element("img")?;
        image.set_attribute("src", &item.src)?;
        image.set_attribute("alt", item.caption.as_deref().unwrap_or(""))?;
        image.set_attribute("draggable", "false")?;
        slide.append_child(&image)?;
        track.append_child(&slide)?;
    }
    Ok(())
}

fn wire_controls(
    root: &Element,
    strip: &DomStrip,
    handle: &CarouselHandle,
    listeners: &mut Vec<EventListener>,
) -> Result<(), JsValue> {
    if let Some(previous) = &strip.chrome().previous {
        let handle = handle.clone();
        listeners.push(EventListener::new(previous, "click", move |_| handle.retreat())?);
    }
    if let Some(next) = &strip.chrome().next {
        let handle = handle.clone();
        listeners.push(EventListener::new(next, "click", move |_| handle.advance())?);
    }
    if let Some(toggle) = query_html(root, "[data-carousel-autoplay]")? {
        let handle = handle.clone();
        listeners.push(EventListener::new(&toggle, "click", move |_| handle.toggle_autoplay())?);
    }
    Ok(())
}

fn wire_swipes(strip: &DomStrip, handle: &CarouselHandle, listeners: &mut Vec<EventListener>) -> Result<(), JsValue> {
    let viewport = strip.viewport();
    let touches = [
        ("touchstart", PointerEventKind::Down),
        ("touchmove", PointerEventKind::Move),
        ("touchend", PointerEventKind::Up),
        ("touchcancel", PointerEventKind::Cancel),
    ];
    for (kind, pointer_kind) in touches {
        let handle = handle.clone();
        let platform = WebPlatform::default();
        listeners.push(EventListener::typed(viewport, kind, move |event: TouchEvent| {
            if let Some(pointer) = platform.touch_event(pointer_kind, &event) {
                handle.pointer(&pointer);
            }
        })?);
    }

    let mice = [
        ("mousedown", PointerEventKind::Down),
        ("mousemove", PointerEventKind::Move),
        ("mouseup", PointerEventKind::Up),
        ("mouseleave", PointerEventKind::Cancel),
    ];
    for (kind, pointer_kind) in mice {
        let handle = handle.clone();
        let platform = WebPlatform::default();
        listeners.push(EventListener::typed(viewport, kind, move |event: MouseEvent| {
            handle.pointer(&platform.mouse_event(pointer_kind, &event));
        })?);
    }

    let track: Element = strip.track().clone().into();
    let handle = handle.clone();
    listeners.push(EventListener::new(strip.track(), TRANSITION_END, move |event: Event| {
        // Item transitions bubble up too; only the track's own counts.
        let from_track = event
            .target()
            .and_then(|target| target.dyn_into::<Element>().ok())
            .is_some_and(|target| target == track);
        if from_track {
            handle.transition_finished();
        }
    })?);
    Ok(())
}

fn wire_scrolling(strip: &DomStrip, handle: &CarouselHandle, listeners: &mut Vec<EventListener>) -> Result<(), JsValue> {
    let viewport = strip.viewport();
    {
        let handle = handle.clone();
        listeners.push(EventListener::new(viewport, "scroll", move |_| handle.scroll_moved())?);
    }
    let handle = handle.clone();
    listeners.push(EventListener::new(viewport, SCROLL_END, move |_| {
        handle.transition_finished()
    })?);
    Ok(())
}
