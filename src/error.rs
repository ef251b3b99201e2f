//! Error type for the browser bindings.
//!
//! Only binding code produces these. Missing optional page elements are not
//! errors: a feature whose markup is absent simply does not bind.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FxError {
    #[error("window unavailable")]
    NoWindow,
    #[error("document unavailable")]
    NoDocument,
    #[error("document body unavailable")]
    NoBody,
    /// A `web-sys` call threw; `message` is the debug rendering of the JS value.
    #[error("{context}: {message}")]
    Js { context: &'static str, message: String },
}

impl FxError {
    pub fn js(context: &'static str, message: impl Into<String>) -> Self {
        Self::Js { context, message: message.into() }
    }
}

#[cfg(feature = "hydrate")]
impl FxError {
    /// Capture a thrown JS value.
    pub fn from_js(context: &'static str, value: &wasm_bindgen::JsValue) -> Self {
        Self::js(context, format!("{value:?}"))
    }
}

pub type FxResult<T> = Result<T, FxError>;
