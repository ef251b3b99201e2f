//! Document readiness, plus thin `web-sys` helpers shared by the bindings.
//!
//! Lookups of required globals return [`FxError`](crate::error::FxError);
//! lookups of optional page elements return `Option` so a missing element
//! just disables a feature.

#[cfg(test)]
#[path = "dom_test.rs"]
mod dom_test;

/// `document.readyState`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadyState {
    Loading,
    Interactive,
    Complete,
}

impl ReadyState {
    /// Unknown values are treated as still loading.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value {
            "interactive" => Self::Interactive,
            "complete" => Self::Complete,
            _ => Self::Loading,
        }
    }

    /// The document has been parsed; `DOMContentLoaded` has fired.
    #[must_use]
    pub fn is_parsed(self) -> bool {
        self != Self::Loading
    }

    /// Subresources have loaded too; window `load` has fired.
    #[must_use]
    pub fn is_loaded(self) -> bool {
        self == Self::Complete
    }
}

#[cfg(feature = "hydrate")]
mod browser {
    use wasm_bindgen::closure::WasmClosure;
    use wasm_bindgen::prelude::*;
    use web_sys::{AddEventListenerOptions, Document, Element, EventTarget, HtmlElement, Window};

    use super::ReadyState;
    use crate::error::{FxError, FxResult};

    pub fn window() -> FxResult<Window> {
        web_sys::window().ok_or(FxError::NoWindow)
    }

    pub fn document() -> FxResult<Document> {
        window()?.document().ok_or(FxError::NoDocument)
    }

    pub fn body() -> FxResult<HtmlElement> {
        document()?.body().ok_or(FxError::NoBody)
    }

    /// `document.getElementById`, as an `HtmlElement` when it is one.
    pub fn html_by_id(document: &Document, id: &str) -> Option<HtmlElement> {
        document.get_element_by_id(id)?.dyn_ref::<HtmlElement>().cloned()
    }

    /// First match of `selector` under `root`; a selector error counts as no match.
    pub fn query(root: &Element, selector: &str) -> Option<Element> {
        match root.query_selector(selector) {
            Ok(found) => found,
            Err(err) => {
                log::debug!("query_selector({selector}) failed: {err:?}");
                None
            }
        }
    }

    /// Closest ancestor-or-self of the event target matching `selector`.
    pub fn closest(target: Option<EventTarget>, selector: &str) -> Option<Element> {
        match target?.dyn_ref::<Element>()?.closest(selector) {
            Ok(found) => found,
            Err(err) => {
                log::debug!("closest({selector}) failed: {err:?}");
                None
            }
        }
    }

    /// Text content of the first `selector` match under `root`, or empty.
    pub fn text_of(root: &Element, selector: &str) -> String {
        query(root, selector).and_then(|el| el.text_content()).unwrap_or_default()
    }

    /// Apply `(property, value)` pairs through `style.setProperty`.
    pub fn set_style(element: &HtmlElement, declarations: &[(&str, String)]) -> FxResult<()> {
        let style = element.style();
        for (property, value) in declarations {
            style
                .set_property(property, value)
                .map_err(|err| FxError::from_js("set style property", &err))?;
        }
        Ok(())
    }

    pub fn add_classes(element: &Element, classes: &[&str]) -> FxResult<()> {
        let list = element.class_list();
        for class in classes {
            list.add_1(class).map_err(|err| FxError::from_js("add class", &err))?;
        }
        Ok(())
    }

    pub fn remove_classes(element: &Element, classes: &[&str]) -> FxResult<()> {
        let list = element.class_list();
        for class in classes {
            list.remove_1(class).map_err(|err| FxError::from_js("remove class", &err))?;
        }
        Ok(())
    }

    /// Inner viewport size in CSS pixels.
    pub fn viewport(window: &Window) -> (f64, f64) {
        let dimension = |value: Result<JsValue, JsValue>| match value {
            Ok(v) => v.as_f64().unwrap_or(0.0),
            Err(_) => 0.0,
        };
        (dimension(window.inner_width()), dimension(window.inner_height()))
    }

    /// Register `handler` for the page lifetime.
    pub fn listen<T>(target: &EventTarget, event: &str, handler: Closure<T>) -> FxResult<()>
    where
        T: ?Sized + WasmClosure,
    {
        target
            .add_event_listener_with_callback(event, handler.as_ref().unchecked_ref())
            .map_err(|err| FxError::from_js("add event listener", &err))?;
        handler.forget();
        Ok(())
    }

    /// Register a capture-phase `handler` for the page lifetime.
    pub fn listen_capture<T>(target: &EventTarget, event: &str, handler: Closure<T>) -> FxResult<()>
    where
        T: ?Sized + WasmClosure,
    {
        target
            .add_event_listener_with_callback_and_bool(event, handler.as_ref().unchecked_ref(), true)
            .map_err(|err| FxError::from_js("add capture listener", &err))?;
        handler.forget();
        Ok(())
    }

    /// Register a passive `handler` for the page lifetime.
    pub fn listen_passive<T>(target: &EventTarget, event: &str, handler: Closure<T>) -> FxResult<()>
    where
        T: ?Sized + WasmClosure,
    {
        let options = AddEventListenerOptions::new();
        options.set_passive(true);
        target
            .add_event_listener_with_callback_and_add_event_listener_options(
                event,
                handler.as_ref().unchecked_ref(),
                &options,
            )
            .map_err(|err| FxError::from_js("add passive listener", &err))?;
        handler.forget();
        Ok(())
    }

    /// Run `f` once the document has been parsed.
    pub fn on_ready(f: impl FnOnce() + 'static) -> FxResult<()> {
        let document = document()?;
        if ReadyState::parse(&document.ready_state()).is_parsed() {
            f();
            return Ok(());
        }
        let mut pending = Some(f);
        let handler = Closure::<dyn FnMut()>::new(move || {
            if let Some(f) = pending.take() {
                f();
            }
        });
        listen(&document, "DOMContentLoaded", handler)
    }

    /// Run `f` once the window `load` event has fired.
    pub fn on_load(f: impl FnOnce() + 'static) -> FxResult<()> {
        let window = window()?;
        if ReadyState::parse(&document()?.ready_state()).is_loaded() {
            f();
            return Ok(());
        }
        let mut pending = Some(f);
        let handler = Closure::<dyn FnMut()>::new(move || {
            if let Some(f) = pending.take() {
                f();
            }
        });
        listen(&window, "load", handler)
    }
}

#[cfg(feature = "hydrate")]
pub use browser::*;
