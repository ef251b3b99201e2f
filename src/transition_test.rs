#![allow(clippy::float_cmp)]

use super::*;

const ORIGIN: &str = "https://example.org";

fn link<'a>(href: &'a str, resolved: &'a str) -> LinkAttrs<'a> {
    LinkAttrs { target: None, href: Some(href), resolved }
}

// =============================================================
// Link classification
// =============================================================

#[test]
fn relative_page_links_are_internal() {
    assert!(is_internal_navigable(None, Some("about.html"), ORIGIN));
    assert!(is_internal_navigable(None, Some("places/north"), ORIGIN));
    assert!(is_internal_navigable(None, Some("  gallery.html  "), ORIGIN));
}

#[test]
fn blank_target_is_not_internal() {
    assert!(!is_internal_navigable(Some("_blank"), Some("about.html"), ORIGIN));
}

#[test]
fn other_targets_are_still_internal() {
    assert!(is_internal_navigable(Some("_self"), Some("about.html"), ORIGIN));
}

#[test]
fn empty_and_fragment_hrefs_are_not_internal() {
    assert!(!is_internal_navigable(None, None, ORIGIN));
    assert!(!is_internal_navigable(None, Some(""), ORIGIN));
    assert!(!is_internal_navigable(None, Some("   "), ORIGIN));
    assert!(!is_internal_navigable(None, Some("#top"), ORIGIN));
}

#[test]
fn external_absolute_urls_are_not_internal() {
    assert!(!is_internal_navigable(None, Some("https://other.net/page.html"), ORIGIN));
    assert!(!is_internal_navigable(None, Some("HTTP://other.net/"), ORIGIN));
}

#[test]
fn same_origin_absolute_page_is_internal() {
    assert!(is_internal_navigable(None, Some("https://example.org/food.html"), ORIGIN));
}

#[test]
fn same_origin_absolute_without_extension_is_not_internal() {
    assert!(!is_internal_navigable(None, Some("https://example.org/food"), ORIGIN));
}

#[test]
fn lookalike_host_is_not_same_origin() {
    assert!(!is_internal_navigable(None, Some("https://example.org.evil.net/x.html"), ORIGIN));
    assert!(!is_internal_navigable(None, Some("https://example.organic/x.html"), ORIGIN));
    assert!(is_internal_navigable(None, Some("HTTPS://EXAMPLE.ORG/x.html"), ORIGIN));
}

#[test]
fn protocol_relative_urls_follow_the_origin_check() {
    assert!(!is_internal_navigable(None, Some("//other.net/x.html"), ORIGIN));
    assert!(!is_internal_navigable(None, Some("//example.org.evil.net/x.html"), ORIGIN));
    assert!(is_internal_navigable(None, Some("//example.org/x.html"), ORIGIN));
}

#[test]
fn unknown_origin_rejects_absolute_urls() {
    assert!(!is_internal_navigable(None, Some("https://other.net/x.html"), ""));
    assert!(!is_internal_navigable(None, Some("//other.net/x.html"), ""));
}

#[test]
fn same_origin_matches_only_at_a_boundary() {
    assert!(is_same_origin("https://example.org", ORIGIN));
    assert!(is_same_origin("https://example.org/", ORIGIN));
    assert!(is_same_origin("https://example.org?x", ORIGIN));
    assert!(is_same_origin("https://example.org#top", ORIGIN));
    assert!(!is_same_origin("https://example.org:8080/", ORIGIN));
    assert!(!is_same_origin("https://example.org.evil.net/", ORIGIN));
    assert!(!is_same_origin("https://example.org/", ""));
    assert!(!is_same_origin("https://ex", ORIGIN));
}

#[test]
fn other_schemes_and_queries_are_not_internal() {
    assert!(!is_internal_navigable(None, Some("mailto:kia@ora.nz"), ORIGIN));
    assert!(!is_internal_navigable(None, Some("search?q=kiwi"), ORIGIN));
    assert!(!is_internal_navigable(None, Some("page#section"), ORIGIN));
}

#[test]
fn query_on_html_page_is_internal() {
    assert!(is_internal_navigable(None, Some("notes?x=1.html"), ORIGIN));
}

// =============================================================
// Prefetch
// =============================================================

#[test]
fn prefetch_set_claims_once() {
    let mut set = PrefetchSet::new();
    assert!(set.claim("https://example.org/a.html"));
    assert!(!set.claim("https://example.org/a.html"));
    assert!(set.claim("https://example.org/b.html"));
    assert_eq!(set.len(), 2);
}

#[test]
fn prefetch_set_ignores_empty_url() {
    let mut set = PrefetchSet::new();
    assert!(!set.claim(""));
    assert!(set.is_empty());
}

#[test]
fn repeated_hover_prefetches_once() {
    let mut transition = PageTransition::new();
    let attrs = link("a.html", "https://example.org/a.html");
    assert_eq!(transition.hover(&attrs, ORIGIN).as_deref(), Some("https://example.org/a.html"));
    for _ in 0..5 {
        assert_eq!(transition.hover(&attrs, ORIGIN), None);
    }
    assert_eq!(transition.prefetched().len(), 1);
}

#[test]
fn hover_on_external_link_never_prefetches() {
    let mut transition = PageTransition::new();
    let attrs = link("https://other.net/x.html", "https://other.net/x.html");
    assert_eq!(transition.hover(&attrs, ORIGIN), None);
    assert!(transition.prefetched().is_empty());
}

#[test]
fn hover_checks_the_resolved_url_too() {
    let mut transition = PageTransition::new();
    let attrs = link("x.html", "https://example.org.evil.net/x.html");
    assert_eq!(transition.hover(&attrs, ORIGIN), None);
    let attrs = link("//other.net/x.html", "https://other.net/x.html");
    assert_eq!(transition.hover(&attrs, ORIGIN), None);
    assert!(transition.prefetched().is_empty());
}

#[test]
fn hover_without_origin_never_prefetches() {
    let mut transition = PageTransition::new();
    let attrs = link("x.html", "https://example.org/x.html");
    assert_eq!(transition.hover(&attrs, ""), None);
}

#[test]
fn url_falls_back_to_raw_href() {
    assert_eq!(link("a.html", "").url().as_deref(), Some("a.html"));
    assert_eq!(link("", "").url(), None);
}

// =============================================================
// Click
// =============================================================

#[test]
fn click_plans_delayed_navigation_from_pointer() {
    let transition = PageTransition::new();
    let attrs = link("food.html", "https://example.org/food.html");
    let plan = transition.click(&attrs, ORIGIN, Some((120.0, 80.0)), (1000.0, 600.0));
    assert_eq!(
        plan,
        Some(TransitionPlan {
            url: "https://example.org/food.html".to_owned(),
            origin: VeilOrigin { x: 120.0, y: 80.0 },
            delay_ms: 420,
        })
    );
}

#[test]
fn click_on_external_link_is_left_alone() {
    let transition = PageTransition::new();
    let attrs = link("https://other.net/", "https://other.net/");
    assert_eq!(transition.click(&attrs, ORIGIN, Some((1.0, 1.0)), (100.0, 100.0)), None);
}

#[test]
fn click_on_lookalike_host_is_left_alone() {
    let transition = PageTransition::new();
    let attrs = link("https://example.org.evil.net/x.html", "https://example.org.evil.net/x.html");
    assert_eq!(transition.click(&attrs, ORIGIN, Some((1.0, 1.0)), (100.0, 100.0)), None);
}

#[test]
fn click_on_new_tab_link_is_left_alone() {
    let transition = PageTransition::new();
    let attrs = LinkAttrs { target: Some("_blank"), href: Some("a.html"), resolved: "https://example.org/a.html" };
    assert_eq!(transition.click(&attrs, ORIGIN, None, (100.0, 100.0)), None);
}

#[test]
fn veil_origin_falls_back_to_center() {
    assert_eq!(veil_origin(None, (800.0, 600.0)), VeilOrigin { x: 400.0, y: 300.0 });
    assert_eq!(veil_origin(Some((0.0, 0.0)), (800.0, 600.0)), VeilOrigin { x: 400.0, y: 300.0 });
    assert_eq!(veil_origin(Some((10.0, 0.0)), (800.0, 600.0)), VeilOrigin { x: 10.0, y: 300.0 });
}

#[test]
fn veil_origin_declarations_are_pixels() {
    let origin = VeilOrigin { x: 12.0, y: 34.5 };
    assert_eq!(
        origin.declarations(),
        vec![("--fx-x", "12px".to_owned()), ("--fx-y", "34.5px".to_owned())]
    );
}

// =============================================================
// Veil phases
// =============================================================

#[test]
fn exit_phase_class_edits() {
    assert_eq!(VeilPhase::Exit.removes(), &["enter"]);
    assert_eq!(VeilPhase::Exit.adds(), &["exit", "show"]);
}

#[test]
fn enter_phase_class_edits() {
    assert_eq!(VeilPhase::Enter.removes(), &["exit"]);
    assert_eq!(VeilPhase::Enter.adds(), &["enter", "show"]);
    assert_eq!(REVEAL_CLEARS, &["enter", "show"]);
}

#[test]
fn reveal_clear_outlasts_navigation_delay() {
    assert_eq!(crate::consts::REVEAL_CLEAR_MS, 500);
    assert!(crate::consts::REVEAL_CLEAR_MS > crate::consts::NAVIGATION_DELAY_MS);
}
