//! Fixed constants shared across the site effects.
//!
//! Every tunable lives here: particle counts and ranges, transition timings,
//! DOM ids/selectors the bindings expect, and the persisted preference key.

// ── Theme ───────────────────────────────────────────────────────

/// `localStorage` key holding `"dark"` or `"light"`.
pub const THEME_STORAGE_KEY: &str = "theme";

/// Class on `<body>` that marks dark mode.
pub const DARK_MODE_CLASS: &str = "dark-mode";

/// Id of the theme toggle control.
pub const THEME_TOGGLE_ID: &str = "toggle-theme";

// ── Ambient particles ───────────────────────────────────────────

/// Number of stars in the star layer.
pub const STAR_COUNT: usize = 140;

/// Twinkle period range in seconds: `[min, min + span)`.
pub const STAR_TWINKLE_MIN_S: f64 = 3.5;
pub const STAR_TWINKLE_SPAN_S: f64 = 4.0;

/// Upper bound for the twinkle start delay in seconds.
pub const STAR_DELAY_MAX_S: f64 = 6.0;

/// Probability that a star is rendered dimmed for depth.
pub const STAR_DIM_PROBABILITY: f64 = 1.0 / 12.0;

/// Opacity applied to dimmed stars.
pub const STAR_DIM_OPACITY: &str = ".45";

/// Number of spirits in the spirit layer.
pub const SPIRIT_COUNT: usize = 8;

/// Spirit size range in pixels.
pub const SPIRIT_SIZE_MIN_PX: f64 = 14.0;
pub const SPIRIT_SIZE_SPAN_PX: f64 = 12.0;

/// Vertical float distance range in viewport-height units.
pub const SPIRIT_FLOAT_MIN_VH: f64 = 8.0;
pub const SPIRIT_FLOAT_SPAN_VH: f64 = 10.0;

/// Float period range in seconds.
pub const SPIRIT_PERIOD_MIN_S: f64 = 12.0;
pub const SPIRIT_PERIOD_SPAN_S: f64 = 12.0;

// ── Page transition ─────────────────────────────────────────────

/// Delay between intercepting a click and assigning `location.href`.
pub const NAVIGATION_DELAY_MS: u32 = 420;

/// Delay before the enter-phase classes are cleared (exit duration + buffer).
pub const REVEAL_CLEAR_MS: u32 = NAVIGATION_DELAY_MS + 80;

/// Id of the full-viewport transition overlay.
pub const VEIL_ID: &str = "page-veil";

/// Extension that marks a link as a site page.
pub const PAGE_EXTENSION: &str = ".html";

// ── Lightbox ────────────────────────────────────────────────────

/// Id of the lightbox overlay.
pub const LIGHTBOX_ID: &str = "lb";

/// Elements collected into the gallery, in document order.
pub const GALLERY_SELECTOR: &str = ".card img, .festival-card img, .wrapper-images .line, [data-lightbox]";

/// Class marking an open overlay or a visible description panel.
pub const ACTIVE_CLASS: &str = "active";

// ── Region map ──────────────────────────────────────────────────

/// Id of the embedded SVG map.
pub const MAP_ID: &str = "nzmap";

/// Id of the description panel next to the map.
pub const DESCRIPTION_ID: &str = "description";

/// Ids of the north and south travel paths.
pub const NORTH_PATH_ID: &str = "ni";
pub const SOUTH_PATH_ID: &str = "si";

/// Region whose selection draws the north path.
pub const NORTH_REGION: &str = "Taranaki";

/// Region whose selection completes the route on the south path.
pub const SOUTH_REGION: &str = "Fiordland";

/// Lower bound for a path-travel animation.
pub const TRAVEL_MIN_MS: f64 = 600.0;

/// Milliseconds of travel per unit of path length.
pub const TRAVEL_MS_PER_UNIT: f64 = 5.0;

/// Base URL of the region thumbnails.
pub const REGION_IMAGE_BASE: &str = "https://s3-us-west-2.amazonaws.com/s.cdpn.io/4273/";

/// Extension appended to the derived thumbnail name.
pub const REGION_IMAGE_EXTENSION: &str = ".jpg";

/// Viewports matching this query get every description rendered up front.
pub const NARROW_VIEWPORT_QUERY: &str = "(max-width: 790px)";
