use std::time::Duration;

use pretty_assertions::assert_eq;

use super::*;
use crate::menu::Menu;
use crate::render::render_document;

const EXIT_MS: u64 = 400;
const SETTLE_MS: u64 = 100;

fn setup() -> (Document, NavigationController) {
    let doc = render_document(&Menu::builtin());
    let nav = NavigationController::from_document(
        &doc,
        TransitionTimings {
            exit: Duration::from_millis(EXIT_MS),
            settle: Duration::from_millis(SETTLE_MS),
        },
    );
    (doc, nav)
}

fn visible_sections(doc: &Document) -> Vec<String> {
    doc.find_by_class(doc.root(), markup::MENU_SECTION)
        .into_iter()
        .filter(|&s| doc.is_displayed(s))
        .filter_map(|s| doc.id(s).map(str::to_string))
        .collect()
}

fn home_visible(doc: &Document) -> bool {
    let grid = doc.get_element_by_id(markup::MAIN_BUTTONS_GRID).unwrap();
    doc.is_displayed(grid)
}

fn secondary_targets(doc: &Document) -> Vec<String> {
    let grid = doc.get_element_by_id(markup::SECONDARY_BUTTONS_GRID).unwrap();
    doc.children(grid)
        .iter()
        .filter_map(|&b| doc.attr(b, markup::DATA_TARGET).map(str::to_string))
        .collect()
}

#[test]
fn order_comes_from_document() {
    let (_, nav) = setup();
    assert_eq!(
        nav.sections(),
        &["gastronomia", "colazioni", "cucina", "dolci", "vini"]
    );
    assert_eq!(nav.state(), &NavigationState::Home);
}

#[test]
fn direction_follows_section_order() {
    let (mut doc, mut nav) = setup();
    assert_eq!(nav.direction_to("gastronomia"), Some(Direction::Forward));

    nav.navigate_to(&mut doc, "gastronomia", Language::It, 0);
    nav.tick(&mut doc, Language::It, 1_000);
    assert_eq!(nav.direction_to("cucina"), Some(Direction::Forward));

    nav.navigate_to(&mut doc, "cucina", Language::It, 1_000);
    nav.tick(&mut doc, Language::It, 2_000);
    assert_eq!(nav.direction_to("gastronomia"), Some(Direction::Backward));
    assert_eq!(nav.direction_to("nope"), None);
}

#[test]
fn entering_from_home_skips_exit_phase() {
    let (mut doc, mut nav) = setup();
    let outcome = nav.navigate_to(&mut doc, "colazioni", Language::En, 0);
    assert_eq!(outcome, NavigateOutcome::Started(Direction::Forward));
    assert!(matches!(nav.phase(), TransitionPhase::EnteringNew { .. }));
    assert_eq!(visible_sections(&doc), vec!["colazioni".to_string()]);
    assert!(!home_visible(&doc));

    let section = doc.get_element_by_id("colazioni").unwrap();
    assert!(doc.has_class(section, "enter-forward"));

    let secondary = doc.get_element_by_id(markup::SECONDARY_NAVIGATION).unwrap();
    assert!(doc.is_displayed(secondary));
    assert_eq!(
        secondary_targets(&doc),
        vec!["gastronomia", "cucina", "dolci", "vini"]
    );
    let container = doc.get_element_by_id(markup::MENU_CONTAINER).unwrap();
    assert_eq!(doc.last_scrolled(), Some(container));
}

#[test]
fn exit_runs_before_target_is_revealed() {
    let (mut doc, mut nav) = setup();
    nav.navigate_to(&mut doc, "dolci", Language::It, 0);
    nav.tick(&mut doc, Language::It, SETTLE_MS);
    assert_eq!(nav.phase(), &TransitionPhase::Idle);

    let outcome = nav.navigate_to(&mut doc, "colazioni", Language::It, 1_000);
    assert_eq!(outcome, NavigateOutcome::Started(Direction::Backward));
    let dolci = doc.get_element_by_id("dolci").unwrap();
    assert!(doc.has_class(dolci, "exit-backward"));
    assert_eq!(doc.style(dolci, "transform-origin"), Some("right center"));

    nav.tick(&mut doc, Language::It, 1_000 + EXIT_MS - 1);
    assert_eq!(visible_sections(&doc), vec!["dolci".to_string()]);

    nav.tick(&mut doc, Language::It, 1_000 + EXIT_MS);
    assert_eq!(visible_sections(&doc), vec!["colazioni".to_string()]);
    assert!(!doc.has_class(dolci, "exit-backward"));
    assert_eq!(
        nav.state(),
        &NavigationState::Viewing("colazioni".to_string())
    );
}

#[test]
fn only_one_section_visible_after_consecutive_requests() {
    let (mut doc, mut nav) = setup();
    nav.navigate_to(&mut doc, "gastronomia", Language::It, 0);
    nav.navigate_to(&mut doc, "vini", Language::It, 0);
    let visible = visible_sections(&doc);
    assert_eq!(visible.len(), 1);
    assert!(visible[0] == "gastronomia" || visible[0] == "vini");
    assert!(!home_visible(&doc));

    nav.tick(&mut doc, Language::It, 10_000);
    assert_eq!(visible_sections(&doc), vec!["vini".to_string()]);
    assert!(!home_visible(&doc));
}

#[test]
fn latest_request_replaces_queued_one() {
    let (mut doc, mut nav) = setup();
    nav.navigate_to(&mut doc, "gastronomia", Language::It, 0);
    assert_eq!(
        nav.navigate_to(&mut doc, "cucina", Language::It, 10),
        NavigateOutcome::Queued
    );
    assert_eq!(
        nav.navigate_to(&mut doc, "dolci", Language::It, 20),
        NavigateOutcome::Queued
    );
    assert_eq!(nav.queued(), Some("dolci"));

    // Settle of the first entry starts the queued exit at t=100.
    nav.tick(&mut doc, Language::It, SETTLE_MS);
    assert!(matches!(
        nav.phase(),
        TransitionPhase::ExitingOld { to, .. } if to == "dolci"
    ));
    nav.tick(&mut doc, Language::It, SETTLE_MS + EXIT_MS + SETTLE_MS);
    assert_eq!(nav.phase(), &TransitionPhase::Idle);
    assert_eq!(visible_sections(&doc), vec!["dolci".to_string()]);
    assert_eq!(nav.queued(), None);
}

#[test]
fn unknown_section_is_rejected() {
    let (mut doc, mut nav) = setup();
    let before = doc.outer_html(doc.root());
    assert_eq!(
        nav.navigate_to(&mut doc, "hours-section", Language::It, 0),
        NavigateOutcome::UnknownSection
    );
    assert_eq!(doc.outer_html(doc.root()), before);
    assert_eq!(nav.state(), &NavigationState::Home);
}

#[test]
fn show_home_cancels_pending_work() {
    let (mut doc, mut nav) = setup();
    nav.navigate_to(&mut doc, "gastronomia", Language::It, 0);
    nav.navigate_to(&mut doc, "vini", Language::It, 10);
    nav.show_home(&mut doc);

    assert_eq!(nav.state(), &NavigationState::Home);
    assert!(!nav.is_transitioning());
    assert!(visible_sections(&doc).is_empty());
    assert!(home_visible(&doc));
    let secondary = doc.get_element_by_id(markup::SECONDARY_NAVIGATION).unwrap();
    assert!(!doc.is_displayed(secondary));

    nav.tick(&mut doc, Language::It, 10_000);
    assert!(visible_sections(&doc).is_empty());
}

#[test]
fn pager_is_wired_after_settle_and_hides_edges() {
    let (mut doc, mut nav) = setup();
    nav.navigate_to(&mut doc, "gastronomia", Language::En, 0);

    let section = doc.get_element_by_id("gastronomia").unwrap();
    let prev = doc.first_by_class(section, markup::PAGER_PREV).unwrap();
    let next = doc.first_by_class(section, markup::PAGER_NEXT).unwrap();
    assert_eq!(doc.attr(next, markup::DATA_TARGET), None);

    nav.tick(&mut doc, Language::En, SETTLE_MS);
    assert!(doc.is_disabled(prev));
    assert!(!doc.is_displayed(prev));
    assert!(!doc.is_disabled(next));
    assert_eq!(doc.attr(next, markup::DATA_TARGET), Some("colazioni"));
    assert_eq!(doc.text_content(next), "Breakfast ›");

    nav.navigate_to(&mut doc, "vini", Language::En, 1_000);
    nav.tick(&mut doc, Language::En, 2_000);
    let vini = doc.get_element_by_id("vini").unwrap();
    let prev = doc.first_by_class(vini, markup::PAGER_PREV).unwrap();
    let next = doc.first_by_class(vini, markup::PAGER_NEXT).unwrap();
    assert_eq!(doc.attr(prev, markup::DATA_TARGET), Some("dolci"));
    assert_eq!(doc.text_content(prev), "‹ Desserts");
    assert!(doc.is_disabled(next));
}

#[test]
fn next_previous_and_swipe_walk_the_order() {
    let (mut doc, mut nav) = setup();
    assert_eq!(nav.next(&mut doc, Language::It, 0), None);

    nav.navigate_to(&mut doc, "cucina", Language::It, 0);
    nav.tick(&mut doc, Language::It, 1_000);

    assert_eq!(
        nav.swipe(&mut doc, SwipeDirection::Left, Language::It, 1_000),
        Some(NavigateOutcome::Started(Direction::Forward))
    );
    // Mid-transition, the next step is computed from the pending target.
    assert_eq!(
        nav.next(&mut doc, Language::It, 1_010),
        Some(NavigateOutcome::Queued)
    );
    assert_eq!(nav.queued(), Some("vini"));
    nav.tick(&mut doc, Language::It, 5_000);
    assert_eq!(nav.current_section(), Some("vini"));

    assert_eq!(nav.next(&mut doc, Language::It, 5_000), None);
    assert_eq!(
        nav.swipe(&mut doc, SwipeDirection::Right, Language::It, 5_000),
        Some(NavigateOutcome::Started(Direction::Backward))
    );
}

#[test]
fn secondary_navigation_labels_follow_language() {
    let (mut doc, nav) = setup();
    nav.build_secondary_navigation(&mut doc, "dolci", Language::De);
    let grid = doc.get_element_by_id(markup::SECONDARY_BUTTONS_GRID).unwrap();
    let labels: Vec<String> = doc
        .children(grid)
        .iter()
        .map(|&b| doc.text_content(b))
        .collect();
    assert_eq!(labels, vec!["Feinkost", "Frühstück", "Küche", "Weine"]);
    assert!(doc.children(grid).iter().all(|&b| doc.id(b).is_none()));

    // Rebuilding replaces, never accumulates.
    nav.build_secondary_navigation(&mut doc, "vini", Language::De);
    assert_eq!(doc.children(grid).len(), 4);
}

#[test]
fn missing_secondary_surface_is_a_no_op() {
    let (mut doc, mut nav) = setup();
    let secondary = doc.get_element_by_id(markup::SECONDARY_NAVIGATION).unwrap();
    doc.remove(secondary);
    nav.navigate_to(&mut doc, "vini", Language::It, 0);
    nav.tick(&mut doc, Language::It, 1_000);
    assert_eq!(visible_sections(&doc), vec!["vini".to_string()]);
}

#[test]
fn deadlines_saturate_near_the_end_of_the_clock() {
    let (mut doc, mut nav) = setup();
    nav.navigate_to(&mut doc, "dolci", Language::It, u64::MAX - 10);
    assert!(matches!(
        nav.phase(),
        TransitionPhase::EnteringNew { until_ms: u64::MAX, .. }
    ));
    nav.tick(&mut doc, Language::It, u64::MAX);
    assert_eq!(nav.phase(), &TransitionPhase::Idle);

    nav.navigate_to(&mut doc, "cucina", Language::It, u64::MAX - 1);
    assert!(matches!(
        nav.phase(),
        TransitionPhase::ExitingOld { until_ms: u64::MAX, .. }
    ));
    nav.tick(&mut doc, Language::It, u64::MAX);
    assert_eq!(nav.phase(), &TransitionPhase::Idle);
    assert_eq!(visible_sections(&doc), vec!["cucina".to_string()]);
}
