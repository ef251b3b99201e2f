//! Interactive region map: path-travel animation and description panel.
//!
//! Selecting the north region draws the north path. Selecting the south
//! region draws only the south path when arriving straight from the north
//! region, otherwise the full route: north first, then south once it
//! finishes.

#[cfg(test)]
#[path = "region_map_test.rs"]
mod region_map_test;

use crate::consts::{
    NORTH_REGION, REGION_IMAGE_BASE, REGION_IMAGE_EXTENSION, SOUTH_REGION, TRAVEL_MIN_MS, TRAVEL_MS_PER_UNIT,
};

/// Which travel paths are present in the map markup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Paths {
    pub north: bool,
    pub south: bool,
}

impl Paths {
    pub const BOTH: Self = Self { north: true, south: true };
}

/// Path animation to run for an accepted selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Travel {
    /// No path animation; only the description changes.
    Stay,
    North,
    South,
    /// North path, then the south path when the first finishes.
    NorthThenSouth,
}

/// Map selection state for one page load.
#[derive(Debug, Clone, Default)]
pub struct RegionMap {
    last_region: Option<String>,
}

impl RegionMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn last_region(&self) -> Option<&str> {
        self.last_region.as_deref()
    }

    /// Accept a click on `label`.
    ///
    /// Returns `None` for an empty label or a repeat of the previous one;
    /// neither re-renders nor re-animates.
    pub fn select(&mut self, label: &str, paths: Paths) -> Option<Travel> {
        if label.is_empty() || self.last_region.as_deref() == Some(label) {
            return None;
        }
        let came_from_north = self.last_region.as_deref() == Some(NORTH_REGION);
        let travel = match label {
            NORTH_REGION if paths.north => Travel::North,
            SOUTH_REGION if paths.north && paths.south => {
                if came_from_north {
                    Travel::South
                } else {
                    Travel::NorthThenSouth
                }
            }
            _ => Travel::Stay,
        };
        self.last_region = Some(label.to_owned());
        Some(travel)
    }
}

/// Stroke animation length for a path, never shorter than 600 ms.
#[must_use]
pub fn travel_duration_ms(path_length: f64) -> f64 {
    (path_length * TRAVEL_MS_PER_UNIT).max(TRAVEL_MIN_MS)
}

/// One stroke-drawing animation: dash offset from the full length to zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeTravel {
    pub from_offset: f64,
    pub to_offset: f64,
    pub duration_ms: f64,
    /// CSS `animation-fill-mode`; the drawn path stays drawn.
    pub fill: &'static str,
}

impl StrokeTravel {
    #[must_use]
    pub fn for_length(path_length: f64) -> Self {
        Self {
            from_offset: path_length,
            to_offset: 0.0,
            duration_ms: travel_duration_ms(path_length),
            fill: "forwards",
        }
    }
}

/// Thumbnail URL: label up to the first `.`, lowercased.
#[must_use]
pub fn region_image_url(label: &str) -> String {
    let stem = label.split('.').next().unwrap_or_default().to_lowercase();
    format!("{REGION_IMAGE_BASE}{stem}{REGION_IMAGE_EXTENSION}")
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

/// Description panel markup for one region.
#[must_use]
pub fn describe(label: &str, description: &str) -> String {
    let image = escape_html(&region_image_url(label));
    format!(
        "<img src=\"{image}\" srcset=\"{image} 2x\" alt><h1>{}</h1><p>{}</p>",
        escape_html(label),
        escape_html(description)
    )
}

/// Every region's description, each in its own `<div>`, in map order.
#[must_use]
pub fn describe_all<'a>(regions: impl IntoIterator<Item = (&'a str, &'a str)>) -> String {
    regions
        .into_iter()
        .map(|(label, description)| format!("<div>{}</div>", describe(label, description)))
        .collect()
}

#[cfg(feature = "hydrate")]
mod browser {
    use std::cell::RefCell;
    use std::rc::Rc;

    use wasm_bindgen::prelude::*;
    use web_sys::{Animation, Element, MouseEvent, SvgGeometryElement};

    use super::{Paths, RegionMap, StrokeTravel, Travel, describe, describe_all};
    use crate::consts::{ACTIVE_CLASS, DESCRIPTION_ID, MAP_ID, NARROW_VIEWPORT_QUERY, NORTH_PATH_ID, SOUTH_PATH_ID};
    use crate::dom;
    use crate::error::{FxError, FxResult};

    struct Route {
        north: Option<SvgGeometryElement>,
        south: Option<SvgGeometryElement>,
    }

    impl Route {
        fn paths(&self) -> Paths {
            Paths { north: self.north.is_some(), south: self.south.is_some() }
        }
    }

    fn object(entries: &[(&str, JsValue)]) -> FxResult<js_sys::Object> {
        let object = js_sys::Object::new();
        for (key, value) in entries {
            js_sys::Reflect::set(&object, &JsValue::from_str(key), value)
                .map_err(|err| FxError::from_js("build animation options", &err))?;
        }
        Ok(object)
    }

    /// `path.animate(keyframes, timing)`, called through `Reflect` so a throw
    /// comes back as an error instead of unwinding the click handler.
    fn animate_stroke(path: &SvgGeometryElement, stroke: StrokeTravel) -> FxResult<Animation> {
        let frames = js_sys::Array::of2(
            &object(&[("strokeDashoffset", stroke.from_offset.into())])?.into(),
            &object(&[("strokeDashoffset", stroke.to_offset.into())])?.into(),
        );
        let timing = object(&[("duration", stroke.duration_ms.into()), ("fill", stroke.fill.into())])?;
        let animate = js_sys::Reflect::get(path, &JsValue::from_str("animate"))
            .map_err(|err| FxError::from_js("look up animate", &err))?
            .dyn_into::<js_sys::Function>()
            .map_err(|_| FxError::js("animate path", "Element.animate is unavailable"))?;
        animate
            .call2(path, &frames, &timing)
            .map_err(|err| FxError::from_js("animate path", &err))?
            .dyn_into::<Animation>()
            .map_err(|_| FxError::js("animate path", "animate returned no Animation"))
    }

    /// Draw `path`'s stroke; run `then` when the animation finishes.
    fn travel(path: &SvgGeometryElement, then: Option<SvgGeometryElement>) -> FxResult<()> {
        let stroke = StrokeTravel::for_length(f64::from(path.path_length().base_val()));
        let animation = animate_stroke(path, stroke)?;
        if let Some(next) = then {
            let on_finish = Closure::once_into_js(move || {
                if let Err(err) = travel(&next, None) {
                    log::debug!("map: chained travel skipped: {err}");
                }
            });
            animation.set_onfinish(Some(on_finish.unchecked_ref()));
        }
        Ok(())
    }

    fn animate(route: &Route, plan: Travel) {
        let result = match (plan, &route.north, &route.south) {
            (Travel::North, Some(north), _) => travel(north, None),
            (Travel::South, _, Some(south)) => travel(south, None),
            (Travel::NorthThenSouth, Some(north), south) => travel(north, south.clone()),
            _ => Ok(()),
        };
        if let Err(err) = result {
            log::debug!("map: travel skipped: {err}");
        }
    }

    fn show(panel: &Element, markup: &str) -> FxResult<()> {
        dom::remove_classes(panel, &[ACTIVE_CLASS])?;
        panel.set_inner_html("");
        panel
            .insert_adjacent_html("afterbegin", markup)
            .map_err(|err| FxError::from_js("insert description", &err))?;
        dom::add_classes(panel, &[ACTIVE_CLASS])
    }

    fn texts(map: &Element, tag: &str) -> Vec<String> {
        let found = map.get_elements_by_tag_name(tag);
        (0..found.length())
            .filter_map(|i| found.item(i))
            .map(|el| el.text_content().unwrap_or_default())
            .collect()
    }

    fn render_all(map: &Element, panel: &Element) -> FxResult<()> {
        let labels = texts(map, "text");
        let descriptions = texts(map, "desc");
        let markup = describe_all(labels.iter().map(String::as_str).zip(descriptions.iter().map(String::as_str)));
        panel.set_inner_html("");
        panel
            .insert_adjacent_html("beforeend", &markup)
            .map_err(|err| FxError::from_js("insert descriptions", &err))
    }

    fn geometry(document: &web_sys::Document, id: &str) -> Option<SvgGeometryElement> {
        document.get_element_by_id(id)?.dyn_ref::<SvgGeometryElement>().cloned()
    }

    pub fn bind() -> FxResult<()> {
        let window = dom::window()?;
        let document = dom::document()?;
        let (Some(map), Some(panel)) = (document.get_element_by_id(MAP_ID), document.get_element_by_id(DESCRIPTION_ID))
        else {
            log::debug!("map: not on this page");
            return Ok(());
        };

        let route = Route { north: geometry(&document, NORTH_PATH_ID), south: geometry(&document, SOUTH_PATH_ID) };
        let state = Rc::new(RefCell::new(RegionMap::new()));

        let click_panel = panel.clone();
        let on_click = Closure::<dyn FnMut(MouseEvent)>::new(move |event: MouseEvent| {
            let Some(link) = dom::closest(event.target(), "a") else {
                return;
            };
            event.prevent_default();
            let description = dom::text_of(&link, "desc");
            let label = dom::text_of(&link, "text");
            let Some(plan) = state.borrow_mut().select(&label, route.paths()) else {
                return;
            };
            animate(&route, plan);
            if let Err(err) = show(&click_panel, &describe(&label, &description)) {
                log::warn!("map: {err}");
            }
        });
        dom::listen(&map, "click", on_click)?;

        dom::on_load(move || {
            let narrow = match window.match_media(NARROW_VIEWPORT_QUERY) {
                Ok(Some(query)) => query.matches(),
                _ => false,
            };
            if !narrow {
                return;
            }
            if let Err(err) = render_all(&map, &panel) {
                log::warn!("map: {err}");
            }
        })
    }
}

#[cfg(feature = "hydrate")]
pub use browser::bind;
