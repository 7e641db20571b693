use std::cell::RefCell;
use std::rc::Rc;

use folio_foundation::input::KeyEventType;
use folio_foundation::{FullscreenViewer, Item, ViewerControl, ViewerEvent};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, HtmlElement, KeyboardEvent};

use crate::dom_strip::query_html;
use crate::listener::EventListener;
use crate::WebPlatform;

struct ViewerElements {
    overlay: HtmlElement,
    close: Option<HtmlElement>,
    previous: Option<HtmlElement>,
    next: Option<HtmlElement>,
    image: Option<HtmlElement>,
    caption: Option<HtmlElement>,
    counter: Option<HtmlElement>,
    thumbnails: Option<HtmlElement>,
}

impl ViewerElements {
    fn query(overlay: HtmlElement) -> Result<Self, JsValue> {
        Ok(Self {
            close: query_html(&overlay, "[data-viewer-close]")?,
            previous: query_html(&overlay, "[data-viewer-prev]")?,
            next: query_html(&overlay, "[data-viewer-next]")?,
            image: query_html(&overlay, "[data-viewer-image]")?,
            caption: query_html(&overlay, "[data-viewer-caption]")?,
            counter: query_html(&overlay, "[data-viewer-counter]")?,
            thumbnails: query_html(&overlay, "[data-viewer-thumbs]")?,
            overlay,
        })
    }

    fn control(&self, control: ViewerControl) -> Option<HtmlElement> {
        match control {
            ViewerControl::Close => self.close.clone(),
            ViewerControl::Previous => self.previous.clone(),
            ViewerControl::Next => self.next.clone(),
            ViewerControl::Thumbnail(index) => self
                .thumbnails
                .as_ref()?
                .children()
                .item(index as u32)?
                .dyn_into::<HtmlElement>()
                .ok(),
        }
    }
}

struct ViewerState {
    viewer: RefCell<FullscreenViewer>,
    items: Vec<Item>,
    elements: ViewerElements,
    listener: RefCell<Option<Box<dyn Fn(&ViewerEvent)>>>,
}

impl ViewerState {
    fn update(&self, action: impl FnOnce(&mut FullscreenViewer) -> bool) -> bool {
        let (changed, events, open, index, counter, focused) = {
            let mut viewer = self.viewer.borrow_mut();
            let changed = action(&mut viewer);
            (
                changed,
                viewer.drain_events(),
                viewer.is_open(),
                viewer.index(),
                viewer.counter(),
                viewer.focused(),
            )
        };
        self.render(open, index, &counter, focused);
        if let Some(listener) = self.listener.borrow().as_ref() {
            for event in &events {
                listener(event);
            }
        }
        changed
    }

    fn render(&self, open: bool, index: usize, counter: &str, focused: Option<ViewerControl>) {
        let elements = &self.elements;
        elements.overlay.set_hidden(!open);
        if !open {
            return;
        }
        if let (Some(image), Some(item)) = (&elements.image, self.items.get(index)) {
            set_attribute(image, "src", &item.src);
            set_attribute(image, "alt", item.caption.as_deref().unwrap_or(""));
        }
        if let Some(caption) = &elements.caption {
            let text = self.items.get(index).and_then(|item| item.caption.as_deref());
            caption.set_text_content(text);
            caption.set_hidden(text.is_none());
        }
        if let Some(counter_element) = &elements.counter {
            counter_element.set_text_content(Some(counter));
        }
        if let Some(thumbnails) = &elements.thumbnails {
            let children = thumbnails.children();
            for position in 0..children.length() {
                if let Some(thumbnail) = children.item(position) {
                    let active = position as usize == index;
                    if let Err(err) = thumbnail.class_list().toggle_with_force("active", active) {
                        log::warn!("failed to mark thumbnail: {err:?}");
                    }
                }
            }
        }
        if let Some(element) = focused.and_then(|control| elements.control(control)) {
            if let Err(err) = element.focus() {
                log::warn!("failed to move focus to {focused:?}: {err:?}");
            }
        }
    }
}

fn set_attribute(element: &Element, name: &str, value: &str) {
    if let Err(err) = element.set_attribute(name, value) {
        log::warn!("failed to set {name}: {err:?}");
    }
}

/// Index stored in `data-index` on the event target or its closest ancestor.
fn target_index(event: &Event) -> Option<usize> {
    let target = event.target()?.dyn_into::<Element>().ok()?;
    let holder = target.closest("[data-index]").ok()??;
    holder.get_attribute("data-index")?.parse().ok()
}

/// The fullscreen viewer mounted on an overlay element.
///
/// The overlay may contain `[data-viewer-close]`, `[data-viewer-prev]`,
/// `[data-viewer-next]`, `[data-viewer-image]`, `[data-viewer-caption]`,
/// `[data-viewer-counter]` and a `[data-viewer-thumbs]` container whose
/// children carry `data-index`. Clicks on the overlay itself count as
/// backdrop clicks.
pub struct ViewerBinding {
    listeners: Vec<EventListener>,
    state: Rc<ViewerState>,
}

impl ViewerBinding {
    pub fn mount(overlay: HtmlElement, items: Vec<Item>) -> Result<Self, JsValue> {
        let document = overlay.owner_document().ok_or("viewer overlay is detached")?;
        let state = Rc::new(ViewerState {
            viewer: RefCell::new(FullscreenViewer::new(items.len())),
            items,
            elements: ViewerElements::query(overlay)?,
            listener: RefCell::new(None),
        });
        state.elements.overlay.set_hidden(true);

        let mut listeners = Vec::new();
        let controls = [
            (state.elements.close.clone(), ViewerControl::Close),
            (state.elements.previous.clone(), ViewerControl::Previous),
            (state.elements.next.clone(), ViewerControl::Next),
        ];
        for (element, control) in controls {
            let Some(element) = element else {
                continue;
            };
            let weak = Rc::downgrade(&state);
            listeners.push(EventListener::new(&element, "click", move |event: Event| {
                event.stop_propagation();
                if let Some(state) = weak.upgrade() {
                    state.update(|viewer| viewer.activate(control));
                }
            })?);
        }

        if let Some(thumbnails) = state.elements.thumbnails.clone() {
            let weak = Rc::downgrade(&state);
            listeners.push(EventListener::new(&thumbnails, "click", move |event: Event| {
                event.stop_propagation();
                let (Some(state), Some(index)) = (weak.upgrade(), target_index(&event)) else {
                    return;
                };
                state.update(|viewer| viewer.activate(ViewerControl::Thumbnail(index)));
            })?);
        }

        {
            let weak = Rc::downgrade(&state);
            let overlay: Element = state.elements.overlay.clone().into();
            listeners.push(EventListener::new(&state.elements.overlay, "click", move |event: Event| {
                let on_backdrop = event
                    .target()
                    .and_then(|target| target.dyn_into::<Element>().ok())
                    .is_some_and(|target| target == overlay);
                if let (true, Some(state)) = (on_backdrop, weak.upgrade()) {
                    state.update(FullscreenViewer::click_backdrop);
                }
            })?);
        }

        let weak = Rc::downgrade(&state);
        let platform = WebPlatform::default();
        listeners.push(EventListener::typed(&document, "keydown", move |event: KeyboardEvent| {
            let Some(state) = weak.upgrade() else {
                return;
            };
            let key = platform.key_event(KeyEventType::KeyDown, &event);
            if state.update(|viewer| viewer.handle_key(&key)) {
                event.prevent_default();
            }
        })?);

        Ok(Self { listeners, state })
    }

    /// Opens the viewer when an element with `data-index` inside `target` is
    /// clicked.
    pub fn attach_opener(&mut self, target: &Element) -> Result<(), JsValue> {
        let weak = Rc::downgrade(&self.state);
        self.listeners.push(EventListener::new(target, "click", move |event: Event| {
            let (Some(state), Some(index)) = (weak.upgrade(), target_index(&event)) else {
                return;
            };
            state.update(|viewer| viewer.open(index));
        })?);
        Ok(())
    }

    pub fn on_event(&self, listener: impl Fn(&ViewerEvent) + 'static) {
        *self.state.listener.borrow_mut() = Some(Box::new(listener));
    }

    pub fn open(&self, index: usize) -> bool {
        self.state.update(|viewer| viewer.open(index))
    }

    pub fn close(&self) -> bool {
        self.state.update(FullscreenViewer::close)
    }

    pub fn is_open(&self) -> bool {
        self.state.viewer.borrow().is_open()
    }

    pub fn index(&self) -> usize {
        self.state.viewer.borrow().index()
    }
}
