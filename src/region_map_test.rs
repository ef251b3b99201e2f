#![allow(clippy::float_cmp)]

use pretty_assertions::assert_eq;

use super::*;

// =============================================================
// Selection and travel
// =============================================================

#[test]
fn north_region_draws_north_path() {
    let mut map = RegionMap::new();
    assert_eq!(map.select("Taranaki", Paths::BOTH), Some(Travel::North));
    assert_eq!(map.last_region(), Some("Taranaki"));
}

#[test]
fn south_after_north_draws_only_south() {
    let mut map = RegionMap::new();
    map.select("Taranaki", Paths::BOTH);
    assert_eq!(map.select("Fiordland", Paths::BOTH), Some(Travel::South));
}

#[test]
fn south_without_north_draws_full_route() {
    let mut map = RegionMap::new();
    assert_eq!(map.select("Fiordland", Paths::BOTH), Some(Travel::NorthThenSouth));
}

#[test]
fn south_after_detour_draws_full_route() {
    let mut map = RegionMap::new();
    map.select("Taranaki", Paths::BOTH);
    map.select("Rotorua", Paths::BOTH);
    assert_eq!(map.select("Fiordland", Paths::BOTH), Some(Travel::NorthThenSouth));
}

#[test]
fn other_regions_only_update_description() {
    let mut map = RegionMap::new();
    assert_eq!(map.select("Rotorua", Paths::BOTH), Some(Travel::Stay));
    assert_eq!(map.select("Queenstown", Paths::BOTH), Some(Travel::Stay));
}

#[test]
fn repeated_label_is_ignored() {
    let mut map = RegionMap::new();
    assert_eq!(map.select("Rotorua", Paths::BOTH), Some(Travel::Stay));
    assert_eq!(map.select("Rotorua", Paths::BOTH), None);
    assert_eq!(map.select("Taranaki", Paths::BOTH), Some(Travel::North));
    assert_eq!(map.select("Taranaki", Paths::BOTH), None);
}

#[test]
fn empty_label_is_ignored_and_not_recorded() {
    let mut map = RegionMap::new();
    map.select("Taranaki", Paths::BOTH);
    assert_eq!(map.select("", Paths::BOTH), None);
    assert_eq!(map.last_region(), Some("Taranaki"));
    assert_eq!(map.select("Fiordland", Paths::BOTH), Some(Travel::South));
}

#[test]
fn missing_north_path_disables_north_travel() {
    let mut map = RegionMap::new();
    let south_only = Paths { north: false, south: true };
    assert_eq!(map.select("Taranaki", south_only), Some(Travel::Stay));
    assert_eq!(map.select("Fiordland", south_only), Some(Travel::Stay));
}

#[test]
fn missing_south_path_disables_south_travel() {
    let mut map = RegionMap::new();
    let north_only = Paths { north: true, south: false };
    assert_eq!(map.select("Fiordland", north_only), Some(Travel::Stay));
    assert_eq!(map.select("Taranaki", north_only), Some(Travel::North));
}

#[test]
fn travel_duration_has_floor() {
    assert_eq!(travel_duration_ms(0.0), 600.0);
    assert_eq!(travel_duration_ms(100.0), 600.0);
    assert_eq!(travel_duration_ms(120.0), 600.0);
    assert_eq!(travel_duration_ms(400.0), 2000.0);
}

#[test]
fn stroke_travel_draws_from_full_length_to_zero() {
    assert_eq!(
        StrokeTravel::for_length(400.0),
        StrokeTravel { from_offset: 400.0, to_offset: 0.0, duration_ms: 2000.0, fill: "forwards" }
    );
}

#[test]
fn short_stroke_travel_keeps_the_floor() {
    let stroke = StrokeTravel::for_length(30.0);
    assert_eq!(stroke.from_offset, 30.0);
    assert_eq!(stroke.duration_ms, 600.0);
}

// =============================================================
// Description markup
// =============================================================

#[test]
fn image_url_is_lowercased_stem() {
    assert_eq!(
        region_image_url("Fiordland"),
        "https://s3-us-west-2.amazonaws.com/s.cdpn.io/4273/fiordland.jpg"
    );
    assert_eq!(
        region_image_url("Bay.Of.Islands"),
        "https://s3-us-west-2.amazonaws.com/s.cdpn.io/4273/bay.jpg"
    );
}

#[test]
fn describe_renders_image_heading_and_body() {
    assert_eq!(
        describe("Taranaki", "A lone volcano."),
        "<img src=\"https://s3-us-west-2.amazonaws.com/s.cdpn.io/4273/taranaki.jpg\" \
         srcset=\"https://s3-us-west-2.amazonaws.com/s.cdpn.io/4273/taranaki.jpg 2x\" alt>\
         <h1>Taranaki</h1><p>A lone volcano.</p>"
    );
}

#[test]
fn describe_escapes_markup() {
    let html = describe("Milford <Sound>", "Fish & \"chips\"");
    assert!(html.contains("<h1>Milford &lt;Sound&gt;</h1>"));
    assert!(html.contains("<p>Fish &amp; &quot;chips&quot;</p>"));
}

#[test]
fn describe_all_wraps_each_region_in_order() {
    let html = describe_all([("Taranaki", "North."), ("Fiordland", "South.")]);
    let expected = format!(
        "<div>{}</div><div>{}</div>",
        describe("Taranaki", "North."),
        describe("Fiordland", "South.")
    );
    assert_eq!(html, expected);
    assert_eq!(html.matches("<div>").count(), 2);
}

#[test]
fn describe_all_of_nothing_is_empty() {
    assert_eq!(describe_all(std::iter::empty()), "");
}
