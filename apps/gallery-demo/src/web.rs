//! Browser entry point.

use std::rc::Rc;

use folio_core::Scheduler;
use folio_foundation::{CarouselConfig, Item};
use folio_platform_web::{CarouselBinding, ViewerBinding, WindowScheduler};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement};

/// Everything mounted on the page. Calling `free()` from JavaScript
/// unmounts it.
#[wasm_bindgen]
pub struct Gallery {
    carousels: Vec<CarouselBinding>,
    viewer: Option<ViewerBinding>,
}

#[wasm_bindgen]
impl Gallery {
    /// Mounts every `[data-carousel]` element. When an element with id
    /// `viewer_id` exists, clicks on carousel items open it on the items of
    /// the first carousel.
    #[wasm_bindgen(constructor)]
    pub fn mount(viewer_id: &str) -> Result<Gallery, JsValue> {
        console_error_panic_hook::set_once();
        wasm_logger::init(wasm_logger::Config::new(log::Level::Info));

        let window = web_sys::window().ok_or("no global window exists")?;
        let document = window.document().ok_or("should have a document on window")?;
        let scheduler: Rc<dyn Scheduler> = Rc::new(WindowScheduler::with_window(window));

        let roots = document.query_selector_all("[data-carousel]")?;
        let mut carousels = Vec::new();
        let mut viewer_items: Option<Vec<Item>> = None;
        for position in 0..roots.length() {
            let Some(root) = roots.item(position).and_then(|node| node.dyn_into::<Element>().ok()) else {
                continue;
            };
            if viewer_items.is_none() {
                let json = root.get_attribute("data-carousel").unwrap_or_default();
                viewer_items = CarouselConfig::from_json(&json).ok().map(|config| config.items);
            }
            match CarouselBinding::from_attribute(&root, Rc::clone(&scheduler))? {
                Some(binding) => carousels.push(binding),
                None => log::info!("skipping empty carousel #{position}"),
            }
        }

        let viewer = match document.get_element_by_id(viewer_id) {
            Some(overlay) => {
                let overlay = overlay.dyn_into::<HtmlElement>()?;
                let mut viewer = ViewerBinding::mount(overlay, viewer_items.unwrap_or_default())?;
                if let Some(first) = roots.item(0).and_then(|node| node.dyn_into::<Element>().ok()) {
                    viewer.attach_opener(&first)?;
                }
                Some(viewer)
            }
            None => None,
        };

        log::info!("gallery mounted {} carousel(s)", carousels.len());
        Ok(Gallery { carousels, viewer })
    }

    pub fn carousel_count(&self) -> usize {
        self.carousels.len()
    }

    pub fn open_viewer(&self, index: usize) -> bool {
        self.viewer.as_ref().is_some_and(|viewer| viewer.open(index))
    }

    pub fn next(&self, carousel: usize) {
        if let Some(binding) = self.carousels.get(carousel) {
            binding.carousel().advance();
        }
    }

    pub fn previous(&self, carousel: usize) {
        if let Some(binding) = self.carousels.get(carousel) {
            binding.carousel().retreat();
        }
    }
}
