//! Night sky layers: twinkling stars and drifting spirits.
//!
//! Both layers exist only while the dark theme is active. Each build draws
//! fresh random placements from the injected generator, so leaving and
//! re-entering dark mode never reuses a previous sky.

#[cfg(test)]
#[path = "ambient_test.rs"]
mod ambient_test;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::consts::{
    SPIRIT_COUNT, SPIRIT_FLOAT_MIN_VH, SPIRIT_FLOAT_SPAN_VH, SPIRIT_PERIOD_MIN_S, SPIRIT_PERIOD_SPAN_S,
    SPIRIT_SIZE_MIN_PX, SPIRIT_SIZE_SPAN_PX, STAR_COUNT, STAR_DELAY_MAX_S, STAR_DIM_OPACITY, STAR_DIM_PROBABILITY,
    STAR_TWINKLE_MIN_S, STAR_TWINKLE_SPAN_S,
};
use crate::theme::Theme;

/// Inline style declarations for one particle, applied via `setProperty`.
pub type Declarations = Vec<(&'static str, String)>;

/// Which decorative layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayerKind {
    Stars,
    Spirits,
}

impl LayerKind {
    pub const ALL: [Self; 2] = [Self::Stars, Self::Spirits];

    /// Class of the layer container.
    #[must_use]
    pub fn layer_class(self) -> &'static str {
        match self {
            Self::Stars => "stars-layer",
            Self::Spirits => "spirits-layer",
        }
    }

    /// Class of each particle inside the layer.
    #[must_use]
    pub fn particle_class(self) -> &'static str {
        match self {
            Self::Stars => "star",
            Self::Spirits => "spirit",
        }
    }

    #[must_use]
    pub fn count(self) -> usize {
        match self {
            Self::Stars => STAR_COUNT,
            Self::Spirits => SPIRIT_COUNT,
        }
    }

    /// Generate `count()` particles' declarations.
    pub fn generate<R: Rng + ?Sized>(self, rng: &mut R) -> Vec<Declarations> {
        match self {
            Self::Stars => (0..STAR_COUNT).map(|_| Star::random(rng).declarations()).collect(),
            Self::Spirits => (0..SPIRIT_COUNT).map(|_| Spirit::random(rng).declarations()).collect(),
        }
    }
}

/// A twinkling star. Position is in percent of the viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Star {
    pub x: f64,
    pub y: f64,
    pub twinkle_s: f64,
    pub delay_s: f64,
    pub dim: bool,
}

impl Star {
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            x: rng.random::<f64>() * 100.0,
            y: rng.random::<f64>() * 100.0,
            twinkle_s: STAR_TWINKLE_MIN_S + rng.random::<f64>() * STAR_TWINKLE_SPAN_S,
            delay_s: rng.random::<f64>() * STAR_DELAY_MAX_S,
            dim: rng.random::<f64>() < STAR_DIM_PROBABILITY,
        }
    }

    #[must_use]
    pub fn declarations(&self) -> Declarations {
        let mut out = vec![
            ("left", format!("{:.2}%", self.x)),
            ("top", format!("{:.2}%", self.y)),
            ("--tw", format!("{:.2}s", self.twinkle_s)),
            ("--delay", format!("{:.2}s", self.delay_s)),
        ];
        if self.dim {
            out.push(("opacity", STAR_DIM_OPACITY.to_owned()));
        }
        out
    }
}

/// A slow-floating spirit. `x`/`y` are unitless percentages read by the CSS.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spirit {
    pub x: f64,
    pub y: f64,
    pub size_px: f64,
    pub float_vh: f64,
    pub period_s: f64,
}

impl Spirit {
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            x: rng.random::<f64>() * 100.0,
            y: rng.random::<f64>() * 100.0,
            size_px: SPIRIT_SIZE_MIN_PX + rng.random::<f64>() * SPIRIT_SIZE_SPAN_PX,
            float_vh: SPIRIT_FLOAT_MIN_VH + rng.random::<f64>() * SPIRIT_FLOAT_SPAN_VH,
            period_s: SPIRIT_PERIOD_MIN_S + rng.random::<f64>() * SPIRIT_PERIOD_SPAN_S,
        }
    }

    #[must_use]
    pub fn declarations(&self) -> Declarations {
        vec![
            ("--x", format!("{:.2}", self.x)),
            ("--y", format!("{:.2}", self.y)),
            ("--s", format!("{:.0}px", self.size_px)),
            ("--float", format!("{:.0}vh", self.float_vh)),
            ("--t", format!("{:.2}s", self.period_s)),
        ]
    }
}

/// Where layers are mounted. The browser host appends to `<body>`.
pub trait LayerHost {
    fn has_layer(&self, kind: LayerKind) -> bool;
    fn mount_layer(&mut self, kind: LayerKind, particles: Vec<Declarations>);
    fn unmount_layer(&mut self, kind: LayerKind);
}

/// Keeps the particle layers in step with the theme.
#[derive(Debug)]
pub struct AmbientEffects<R = StdRng> {
    rng: R,
}

impl AmbientEffects<StdRng> {
    /// Reproducible placements.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    /// A different sky on every page load.
    #[must_use]
    pub fn from_os_rng() -> Self {
        Self::new(StdRng::from_os_rng())
    }
}

impl<R: Rng> AmbientEffects<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Dark: build each missing layer. Light: detach both.
    pub fn refresh(&mut self, theme: Theme, host: &mut dyn LayerHost) {
        for kind in LayerKind::ALL {
            if theme.is_dark() {
                if !host.has_layer(kind) {
                    log::debug!("ambient: building {}", kind.layer_class());
                    host.mount_layer(kind, kind.generate(&mut self.rng));
                }
            } else if host.has_layer(kind) {
                host.unmount_layer(kind);
            }
        }
    }
}

/// Layers as `<div class="…-layer">` of `<i>` particles on `<body>`.
#[cfg(feature = "hydrate")]
pub struct DomLayerHost {
    document: web_sys::Document,
}

#[cfg(feature = "hydrate")]
impl DomLayerHost {
    pub fn new(document: web_sys::Document) -> Self {
        Self { document }
    }

    fn layer(&self, kind: LayerKind) -> Option<web_sys::Element> {
        match self.document.query_selector(&format!(".{}", kind.layer_class())) {
            Ok(found) => found,
            Err(err) => {
                log::debug!("ambient: layer lookup failed: {err:?}");
                None
            }
        }
    }

    fn build(&self, kind: LayerKind, particles: &[Declarations]) -> crate::error::FxResult<()> {
        use wasm_bindgen::JsCast;

        use crate::error::FxError;

        let body = self.document.body().ok_or(FxError::NoBody)?;
        let layer = self
            .document
            .create_element("div")
            .map_err(|err| FxError::from_js("create layer", &err))?;
        layer.set_class_name(kind.layer_class());
        for declarations in particles {
            let particle = self
                .document
                .create_element("i")
                .map_err(|err| FxError::from_js("create particle", &err))?;
            particle.set_class_name(kind.particle_class());
            if let Some(html) = particle.dyn_ref::<web_sys::HtmlElement>() {
                crate::dom::set_style(html, declarations)?;
            }
            layer
                .append_child(&particle)
                .map_err(|err| FxError::from_js("append particle", &err))?;
        }
        body.append_child(&layer)
            .map_err(|err| FxError::from_js("append layer", &err))?;
        Ok(())
    }
}

#[cfg(feature = "hydrate")]
impl LayerHost for DomLayerHost {
    fn has_layer(&self, kind: LayerKind) -> bool {
        self.layer(kind).is_some()
    }

    fn mount_layer(&mut self, kind: LayerKind, particles: Vec<Declarations>) {
        if let Err(err) = self.build(kind, &particles) {
            log::warn!("ambient: {err}");
        }
    }

    fn unmount_layer(&mut self, kind: LayerKind) {
        if let Some(layer) = self.layer(kind) {
            layer.remove();
        }
    }
}

/// Build layers once the document is ready and on every theme change.
#[cfg(feature = "hydrate")]
pub fn bind(toggle: &std::rc::Rc<std::cell::RefCell<crate::theme::ThemeToggle>>) -> crate::error::FxResult<()> {
    use std::cell::RefCell;
    use std::rc::Rc;

    let document = crate::dom::document()?;
    let effects = Rc::new(RefCell::new(AmbientEffects::from_os_rng()));
    let host = Rc::new(RefCell::new(DomLayerHost::new(document)));

    let (ready_toggle, ready_effects, ready_host) = (Rc::clone(toggle), Rc::clone(&effects), Rc::clone(&host));
    crate::dom::on_ready(move || {
        let theme = ready_toggle.borrow().theme();
        ready_effects.borrow_mut().refresh(theme, &mut *ready_host.borrow_mut());
    })?;

    toggle.borrow_mut().subscribe(move |theme| {
        effects.borrow_mut().refresh(theme, &mut *host.borrow_mut());
    });
    Ok(())
}
