//! # nightveil
//!
//! Page effects for a static multi-page site, compiled to WebAssembly and
//! attached to the server-rendered HTML when the module starts.
//!
//! Every component keeps its state in plain Rust types that are tested
//! natively; the browser wiring sits behind the `hydrate` feature.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`theme`] | Persisted light/dark preference and the toggle control |
//! | [`ambient`] | Star and spirit layers that exist only in dark mode |
//! | [`transition`] | Link classification, hover prefetch, veil exit/enter |
//! | [`lightbox`] | Gallery overlay with cyclic navigation and keyboard |
//! | [`region_map`] | SVG map path travel and region descriptions |
//! | [`dom`] | Document readiness and the `web-sys` helpers the bindings share |
//! | [`consts`] | Counts, ranges, timings, selectors and ids |
//! | [`error`] | Error type for the browser bindings |

pub mod ambient;
#[cfg(feature = "hydrate")]
pub mod boot;
pub mod consts;
pub mod dom;
pub mod error;
pub mod lightbox;
pub mod region_map;
pub mod theme;
pub mod transition;
