//! WASM entry point: install logging and bind every component.
//!
//! A component that fails to bind is logged and skipped; the others still
//! run.

use wasm_bindgen::prelude::*;

use crate::error::FxResult;
use crate::{ambient, lightbox, region_map, theme, transition};

fn report(component: &str, result: FxResult<()>) {
    match result {
        Ok(()) => log::debug!("{component}: bound"),
        Err(err) => log::warn!("{component}: {err}"),
    }
}

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if let Err(err) = console_log::init_with_level(log::Level::Info) {
        web_sys::console::warn_1(&format!("logger already installed: {err}").into());
    }

    match theme::bind() {
        Ok(toggle) => report("ambient", ambient::bind(&toggle)),
        Err(err) => log::warn!("theme: {err}"),
    }
    report("transition", transition::bind());
    report("lightbox", lightbox::bind());
    report("region map", region_map::bind());
    log::info!("nightveil ready");
}
