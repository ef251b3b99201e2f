//! Image lightbox over a fixed gallery.
//!
//! Items are collected once when the page binds; an item's index is its
//! position in document order. Navigation wraps in both directions.

#[cfg(test)]
#[path = "lightbox_test.rs"]
mod lightbox_test;

/// Keyboard commands understood while the overlay is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightboxKey {
    Close,
    Prev,
    Next,
}

impl LightboxKey {
    /// Map a `KeyboardEvent.key` value.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "Escape" => Some(Self::Close),
            "ArrowLeft" => Some(Self::Prev),
            "ArrowRight" => Some(Self::Next),
            _ => None,
        }
    }
}

/// Position in the gallery; `None` while the overlay is closed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Lightbox {
    len: usize,
    index: Option<usize>,
}

impl Lightbox {
    #[must_use]
    pub fn new(len: usize) -> Self {
        Self { len, index: None }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[must_use]
    pub fn index(&self) -> Option<usize> {
        self.index
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.index.is_some()
    }

    /// Show item `i`. Out-of-range indices are ignored.
    pub fn open_at(&mut self, i: usize) -> Option<usize> {
        if i >= self.len {
            return None;
        }
        self.index = Some(i);
        self.index
    }

    pub fn close(&mut self) {
        self.index = None;
    }

    /// Following item, wrapping to the first. No-op while closed.
    pub fn next(&mut self) -> Option<usize> {
        let current = self.index?;
        self.open_at((current + 1) % self.len)
    }

    /// Preceding item, wrapping to the last. No-op while closed.
    pub fn prev(&mut self) -> Option<usize> {
        let current = self.index?;
        self.open_at((current + self.len - 1) % self.len)
    }

    /// Apply a key press. Ignored while closed.
    pub fn handle_key(&mut self, key: &str) -> Option<LightboxKey> {
        if !self.is_open() {
            return None;
        }
        let command = LightboxKey::from_key(key)?;
        match command {
            LightboxKey::Close => self.close(),
            LightboxKey::Prev => {
                self.prev();
            }
            LightboxKey::Next => {
                self.next();
            }
        }
        Some(command)
    }
}

/// Everything the source resolution looks at on a gallery element.
#[derive(Debug, Clone, Default)]
pub struct SourceHints {
    pub is_img: bool,
    pub current_src: String,
    pub src: String,
    /// Computed `background-image`, e.g. `url("a.jpg")` or `none`.
    pub background_image: Option<String>,
    pub data_src: Option<String>,
    pub href: Option<String>,
}

/// Image URL for a gallery element: `<img>` source, then CSS background,
/// then `data-src`, then `href`.
#[must_use]
pub fn resolve_source(hints: &SourceHints) -> String {
    if hints.is_img {
        return if hints.current_src.is_empty() { hints.src.clone() } else { hints.current_src.clone() };
    }
    if let Some(background) = hints.background_image.as_deref().filter(|bg| !bg.is_empty() && *bg != "none") {
        return css_url(background).unwrap_or_default();
    }
    [&hints.data_src, &hints.href]
        .into_iter()
        .flatten()
        .find(|value| !value.is_empty())
        .cloned()
        .unwrap_or_default()
}

/// The target of the first `url(...)` in a CSS value, quotes stripped.
#[must_use]
pub fn css_url(value: &str) -> Option<String> {
    let start = value.find("url(")? + "url(".len();
    let rest = &value[start..];
    let end = rest.find(')')?;
    let inner = rest[..end].trim();
    let inner = inner.strip_prefix(['"', '\'']).unwrap_or(inner);
    let inner = inner.strip_suffix(['"', '\'']).unwrap_or(inner);
    Some(inner.to_owned())
}

/// Caption text: `alt`, else `data-caption`, else empty.
#[must_use]
pub fn caption(alt: Option<&str>, data_caption: Option<&str>) -> String {
    [alt, data_caption]
        .into_iter()
        .flatten()
        .find(|value| !value.is_empty())
        .unwrap_or_default()
        .to_owned()
}

#[cfg(feature = "hydrate")]
mod browser {
    use std::cell::RefCell;
    use std::rc::Rc;

    use wasm_bindgen::prelude::*;
    use web_sys::{Element, Event, HtmlImageElement, KeyboardEvent, MouseEvent};

    use super::{Lightbox, LightboxKey, SourceHints, caption, resolve_source};
    use crate::consts::{ACTIVE_CLASS, GALLERY_SELECTOR, LIGHTBOX_ID};
    use crate::dom;
    use crate::error::{FxError, FxResult};

    /// Overlay element plus the gallery it shows.
    struct Viewer {
        overlay: Element,
        image: Option<HtmlImageElement>,
        caption: Option<Element>,
        items: Vec<Element>,
        state: Lightbox,
    }

    impl Viewer {
        fn computed_background(element: &Element) -> Option<String> {
            let Ok(window) = dom::window() else {
                return None;
            };
            let Ok(Some(style)) = window.get_computed_style(element) else {
                return None;
            };
            match style.get_property_value("background-image") {
                Ok(value) => Some(value),
                Err(_) => None,
            }
        }

        fn hints(element: &Element) -> SourceHints {
            let background_image = Self::computed_background(element);
            let image = element.dyn_ref::<HtmlImageElement>();
            SourceHints {
                is_img: element.tag_name().eq_ignore_ascii_case("img"),
                current_src: image.map(HtmlImageElement::current_src).unwrap_or_default(),
                src: image.map(HtmlImageElement::src).unwrap_or_default(),
                background_image,
                data_src: element.get_attribute("data-src"),
                href: element.get_attribute("href"),
            }
        }

        /// Push the current item into the overlay.
        fn render(&self) -> FxResult<()> {
            let Some(element) = self.state.index().and_then(|i| self.items.get(i)) else {
                return dom::remove_classes(&self.overlay, &[ACTIVE_CLASS]);
            };
            if let Some(image) = &self.image {
                image.set_src(&resolve_source(&Self::hints(element)));
            }
            if let Some(text) = &self.caption {
                let alt = element.get_attribute("alt");
                let data_caption = element.get_attribute("data-caption");
                text.set_text_content(Some(&caption(alt.as_deref(), data_caption.as_deref())));
            }
            dom::add_classes(&self.overlay, &[ACTIVE_CLASS])
        }
    }

    fn update(viewer: &Rc<RefCell<Viewer>>, f: impl FnOnce(&mut Lightbox)) {
        let mut viewer = viewer.borrow_mut();
        f(&mut viewer.state);
        if let Err(err) = viewer.render() {
            log::warn!("lightbox: {err}");
        }
    }

    fn on_control(
        overlay: &Element,
        selector: &str,
        viewer: &Rc<RefCell<Viewer>>,
        f: fn(&mut Lightbox),
    ) -> FxResult<()> {
        let Some(control) = dom::query(overlay, selector) else {
            return Ok(());
        };
        let viewer = Rc::clone(viewer);
        let handler = Closure::<dyn FnMut(Event)>::new(move |_event: Event| update(&viewer, f));
        dom::listen(&control, "click", handler)
    }

    pub fn bind() -> FxResult<()> {
        let document = dom::document()?;
        let Some(overlay) = document.get_element_by_id(LIGHTBOX_ID) else {
            log::debug!("lightbox: no #{LIGHTBOX_ID} on this page");
            return Ok(());
        };

        let found = document
            .query_selector_all(GALLERY_SELECTOR)
            .map_err(|err| FxError::from_js("collect gallery", &err))?;
        let items: Vec<Element> = (0..found.length())
            .filter_map(|i| found.get(i))
            .filter_map(|node| node.dyn_ref::<Element>().cloned())
            .collect();
        log::debug!("lightbox: {} gallery items", items.len());

        let viewer = Rc::new(RefCell::new(Viewer {
            image: dom::query(&overlay, "img").and_then(|el| el.dyn_ref::<HtmlImageElement>().cloned()),
            caption: dom::query(&overlay, ".lightbox-caption"),
            overlay: overlay.clone(),
            state: Lightbox::new(items.len()),
            items,
        }));

        let open_viewer = Rc::clone(&viewer);
        let on_open = Closure::<dyn FnMut(MouseEvent)>::new(move |event: MouseEvent| {
            let Some(clicked) = dom::closest(event.target(), GALLERY_SELECTOR) else {
                return;
            };
            let position = open_viewer.borrow().items.iter().position(|item| *item == clicked);
            if let Some(i) = position {
                event.prevent_default();
                update(&open_viewer, |state| {
                    state.open_at(i);
                });
            }
        });
        dom::listen(&document, "click", on_open)?;

        let backdrop_viewer = Rc::clone(&viewer);
        let backdrop = overlay.clone();
        let on_backdrop = Closure::<dyn FnMut(MouseEvent)>::new(move |event: MouseEvent| {
            let on_overlay = event.target().is_some_and(|target| target.dyn_ref::<Element>() == Some(&backdrop));
            if on_overlay {
                update(&backdrop_viewer, Lightbox::close);
            }
        });
        dom::listen(&overlay, "click", on_backdrop)?;

        on_control(&overlay, ".lightbox-close", &viewer, Lightbox::close)?;
        on_control(&overlay, ".lightbox-prev", &viewer, |state| {
            state.prev();
        })?;
        on_control(&overlay, ".lightbox-next", &viewer, |state| {
            state.next();
        })?;

        let on_key = Closure::<dyn FnMut(KeyboardEvent)>::new(move |event: KeyboardEvent| {
            let key = event.key();
            if !viewer.borrow().state.is_open() || LightboxKey::from_key(&key).is_none() {
                return;
            }
            update(&viewer, |state| {
                state.handle_key(&key);
            });
        });
        dom::listen(&document, "keydown", on_key)
    }
}

#[cfg(feature = "hydrate")]
pub use browser::bind;
