//! Page transitions: hover prefetch, veil exit on click, veil enter on load.
//!
//! Navigation is scheduled by a fixed timer, never by animation completion,
//! so a skipped or failed veil animation cannot block leaving the page.

#[cfg(test)]
#[path = "transition_test.rs"]
mod transition_test;

use std::collections::HashSet;

use crate::consts::{NAVIGATION_DELAY_MS, PAGE_EXTENSION};

/// The attributes of an `<a>` that decide whether it is intercepted.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinkAttrs<'a> {
    /// `target` attribute.
    pub target: Option<&'a str>,
    /// Raw `href` attribute, as written in the markup.
    pub href: Option<&'a str>,
    /// Resolved `a.href` property; empty when the browser could not resolve it.
    pub resolved: &'a str,
}

impl LinkAttrs<'_> {
    /// Internal by its markup, and resolved (when the browser resolved it)
    /// to a URL on `origin`.
    #[must_use]
    pub fn is_internal(&self, origin: &str) -> bool {
        is_internal_navigable(self.target, self.href, origin)
            && (self.resolved.is_empty() || is_same_origin(self.resolved, origin))
    }

    /// URL to navigate to: the resolved href, else the raw attribute.
    #[must_use]
    pub fn url(&self) -> Option<String> {
        if !self.resolved.is_empty() {
            return Some(self.resolved.to_owned());
        }
        self.href.filter(|h| !h.is_empty()).map(str::to_owned)
    }
}

/// Whether a link points at another page of this site.
///
/// Rejects new-tab links, empty and fragment hrefs, and absolute or
/// protocol-relative URLs outside `origin`. What remains must end in `.html`
/// or be a bare path without `:`, `?` or `#`.
#[must_use]
pub fn is_internal_navigable(target: Option<&str>, href: Option<&str>, origin: &str) -> bool {
    if target == Some("_blank") {
        return false;
    }
    let href = href.unwrap_or_default().trim();
    if href.is_empty() || href.starts_with('#') {
        return false;
    }
    if let Some(rest) = href.strip_prefix("//") {
        let scheme = origin.split_once("//").map_or("", |(scheme, _)| scheme);
        if !is_same_origin(&format!("{scheme}//{rest}"), origin) {
            return false;
        }
    } else if has_http_scheme(href) && !is_same_origin(href, origin) {
        return false;
    }
    href.ends_with(PAGE_EXTENSION) || !href.contains([':', '?', '#'])
}

/// `url` is `origin` itself or a path, query or fragment beneath it.
///
/// Scheme and host compare case-insensitively. An empty origin matches
/// nothing.
#[must_use]
pub fn is_same_origin(url: &str, origin: &str) -> bool {
    if origin.is_empty() {
        return false;
    }
    let Some(head) = url.get(..origin.len()) else {
        return false;
    };
    head.eq_ignore_ascii_case(origin)
        && url[origin.len()..].chars().next().is_none_or(|c| matches!(c, '/' | '?' | '#'))
}

fn has_http_scheme(href: &str) -> bool {
    let lower = href.get(..6).unwrap_or(href).to_ascii_lowercase();
    lower.starts_with("http:") || lower.starts_with("https:")
}

/// URLs already hinted for prefetch during this page's life.
#[derive(Debug, Default, Clone)]
pub struct PrefetchSet {
    seen: HashSet<String>,
}

impl PrefetchSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// `true` the first time `url` is claimed, `false` ever after.
    pub fn claim(&mut self, url: &str) -> bool {
        if url.is_empty() || self.seen.contains(url) {
            return false;
        }
        self.seen.insert(url.to_owned())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.seen.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

/// Where the veil animation radiates from, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VeilOrigin {
    pub x: f64,
    pub y: f64,
}

impl VeilOrigin {
    /// `--fx-x` / `--fx-y` declarations for the veil.
    #[must_use]
    pub fn declarations(&self) -> Vec<(&'static str, String)> {
        vec![("--fx-x", format!("{}px", self.x)), ("--fx-y", format!("{}px", self.y))]
    }
}

/// Click point, falling back per axis to the viewport center when the
/// coordinate is missing or zero (keyboard-activated clicks report 0).
#[must_use]
pub fn veil_origin(pointer: Option<(f64, f64)>, viewport: (f64, f64)) -> VeilOrigin {
    let (px, py) = pointer.unwrap_or((0.0, 0.0));
    let pick = |coord: f64, extent: f64| if coord == 0.0 { extent / 2.0 } else { coord };
    VeilOrigin { x: pick(px, viewport.0), y: pick(py, viewport.1) }
}

/// Veil animation phase and the class edits that start it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VeilPhase {
    /// Leaving the page after an intercepted click.
    Exit,
    /// Revealing a freshly loaded page.
    Enter,
}

impl VeilPhase {
    /// Classes to drop before starting the phase.
    #[must_use]
    pub fn removes(self) -> &'static [&'static str] {
        match self {
            Self::Exit => &["enter"],
            Self::Enter => &["exit"],
        }
    }

    /// Classes to add to start the phase.
    #[must_use]
    pub fn adds(self) -> &'static [&'static str] {
        match self {
            Self::Exit => &["exit", "show"],
            Self::Enter => &["enter", "show"],
        }
    }
}

/// Classes cleared once the enter reveal has played.
pub const REVEAL_CLEARS: &[&str] = &["enter", "show"];

/// What to do for an intercepted click.
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionPlan {
    pub url: String,
    pub origin: VeilOrigin,
    pub delay_ms: u32,
}

/// Link interception state for one page load.
#[derive(Debug, Default)]
pub struct PageTransition {
    prefetched: PrefetchSet,
}

impl PageTransition {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// URL to prefetch for a hovered link, at most once per URL.
    pub fn hover(&mut self, link: &LinkAttrs<'_>, origin: &str) -> Option<String> {
        if !link.is_internal(origin) {
            return None;
        }
        let url = link.url()?;
        self.prefetched.claim(&url).then_some(url)
    }

    /// Plan for a clicked link; `None` leaves the click to the browser.
    #[must_use]
    pub fn click(
        &self,
        link: &LinkAttrs<'_>,
        origin: &str,
        pointer: Option<(f64, f64)>,
        viewport: (f64, f64),
    ) -> Option<TransitionPlan> {
        if !link.is_internal(origin) {
            return None;
        }
        Some(TransitionPlan {
            url: link.url()?,
            origin: veil_origin(pointer, viewport),
            delay_ms: NAVIGATION_DELAY_MS,
        })
    }

    #[must_use]
    pub fn prefetched(&self) -> &PrefetchSet {
        &self.prefetched
    }
}

#[cfg(feature = "hydrate")]
mod browser {
    use std::cell::RefCell;
    use std::rc::Rc;

    use gloo_timers::callback::Timeout;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, Element, Event, MouseEvent};

    use super::{LinkAttrs, PageTransition, REVEAL_CLEARS, TransitionPlan, VeilPhase};
    use crate::consts::{REVEAL_CLEAR_MS, VEIL_ID};
    use crate::dom;
    use crate::error::{FxError, FxResult};

    struct OwnedLink {
        target: Option<String>,
        href: Option<String>,
        resolved: String,
    }

    impl OwnedLink {
        fn read(anchor: &Element) -> Self {
            let resolved = match js_sys::Reflect::get(anchor, &JsValue::from_str("href")) {
                Ok(value) => value.as_string().unwrap_or_default(),
                Err(_) => String::new(),
            };
            Self { target: anchor.get_attribute("target"), href: anchor.get_attribute("href"), resolved }
        }

        fn attrs(&self) -> LinkAttrs<'_> {
            LinkAttrs { target: self.target.as_deref(), href: self.href.as_deref(), resolved: &self.resolved }
        }
    }

    fn origin() -> String {
        match dom::window().map(|w| w.location().origin()) {
            Ok(Ok(origin)) => origin,
            _ => String::new(),
        }
    }

    fn start_phase(veil: &Element, phase: VeilPhase) -> FxResult<()> {
        dom::remove_classes(veil, phase.removes())?;
        dom::add_classes(veil, phase.adds())
    }

    fn insert_prefetch_hint(document: &Document, url: &str) -> FxResult<()> {
        let head = document.head().ok_or(FxError::js("prefetch", "no <head>"))?;
        let link = document
            .create_element("link")
            .map_err(|err| FxError::from_js("create prefetch link", &err))?;
        for (name, value) in [("rel", "prefetch"), ("href", url), ("as", "document"), ("fetchpriority", "low")] {
            link.set_attribute(name, value)
                .map_err(|err| FxError::from_js("set prefetch attribute", &err))?;
        }
        head.append_child(&link)
            .map_err(|err| FxError::from_js("append prefetch link", &err))?;
        Ok(())
    }

    fn play_exit(document: &Document, plan: &TransitionPlan) -> FxResult<()> {
        let Some(veil) = dom::html_by_id(document, VEIL_ID) else {
            return Ok(());
        };
        dom::set_style(&veil, &plan.origin.declarations())?;
        start_phase(&veil, VeilPhase::Exit)
    }

    fn schedule_navigation(url: String, delay_ms: u32) {
        Timeout::new(delay_ms, move || {
            let assigned = dom::window().map(|w| w.location().set_href(&url));
            if !matches!(assigned, Ok(Ok(()))) {
                log::warn!("transition: navigation to {url} failed");
            }
        })
        .forget();
    }

    fn play_enter() -> FxResult<()> {
        let window = dom::window()?;
        let Some(veil) = window.document().and_then(|d| d.get_element_by_id(VEIL_ID)) else {
            return Ok(());
        };
        let frame = Closure::once_into_js(move || {
            if let Err(err) = start_phase(&veil, VeilPhase::Enter) {
                log::warn!("transition: {err}");
            }
            Timeout::new(REVEAL_CLEAR_MS, move || {
                if let Err(err) = dom::remove_classes(&veil, REVEAL_CLEARS) {
                    log::warn!("transition: {err}");
                }
            })
            .forget();
        });
        window
            .request_animation_frame(frame.unchecked_ref())
            .map_err(|err| FxError::from_js("request reveal frame", &err))?;
        Ok(())
    }

    pub fn bind() -> FxResult<()> {
        let document = dom::document()?;
        let state = Rc::new(RefCell::new(PageTransition::new()));

        let hover_state = Rc::clone(&state);
        let hover_document = document.clone();
        let on_hover = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            let Some(anchor) = dom::closest(event.target(), "a") else {
                return;
            };
            let link = OwnedLink::read(&anchor);
            let Some(url) = hover_state.borrow_mut().hover(&link.attrs(), &origin()) else {
                return;
            };
            if let Err(err) = insert_prefetch_hint(&hover_document, &url) {
                log::warn!("prefetch failed: {err}");
            }
        });
        dom::listen_passive(&document, "mouseover", on_hover)?;

        let click_document = document.clone();
        let on_click = Closure::<dyn FnMut(MouseEvent)>::new(move |event: MouseEvent| {
            let Some(anchor) = dom::closest(event.target(), "a") else {
                return;
            };
            let link = OwnedLink::read(&anchor);
            let viewport = match dom::window() {
                Ok(window) => dom::viewport(&window),
                Err(_) => (0.0, 0.0),
            };
            let pointer = Some((f64::from(event.client_x()), f64::from(event.client_y())));
            let Some(plan) = state.borrow().click(&link.attrs(), &origin(), pointer, viewport) else {
                return;
            };
            event.prevent_default();
            if let Err(err) = play_exit(&click_document, &plan) {
                log::warn!("transition: {err}");
            }
            schedule_navigation(plan.url, plan.delay_ms);
        });
        dom::listen_capture(&document, "click", on_click)?;

        dom::on_ready(|| {
            if let Err(err) = play_enter() {
                log::warn!("transition: {err}");
            }
        })
    }
}

#[cfg(feature = "hydrate")]
pub use browser::bind;
