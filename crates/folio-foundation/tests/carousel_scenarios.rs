use folio_core::Duration;
use folio_foundation::carousel::{CarouselEvent, Phase, ResolutionStrategy, Transition};
use folio_foundation::CarouselConfig;
use folio_testing::robot_assertions::{
    assert_approx_eq, assert_count, assert_event_count, completed_transitions, index_changes,
};
use folio_testing::CarouselRobot;

fn items(len: usize) -> Vec<String> {
    (0..len).map(|i| format!("photos/{i}.jpg")).collect()
}

#[test]
fn looped_index_model_returns_home_after_full_cycle() {
    let config = CarouselConfig::new(items(5)).visible_count(1).looped(true);
    let mut robot = CarouselRobot::launch(&config).expect("non-empty");

    for _ in 0..5 {
        robot.next();
    }

    assert_eq!(robot.index(), 0);
    let events = robot.events();
    assert_eq!(completed_transitions(&events), 5);
    assert_eq!(index_changes(&events), vec![1, 2, 3, 4, 0]);
    assert_event_count(
        &events,
        1,
        |event| matches!(event, CarouselEvent::Reanchored { .. }),
        "wrap reanchors once",
    );
    assert_eq!(robot.strip().track_slot(), Some(1));
}

#[test]
fn looped_index_model_wraps_backwards() {
    let config = CarouselConfig::new(items(4)).looped(true);
    let mut robot = CarouselRobot::launch(&config).expect("non-empty");
    robot.previous();
    assert_eq!(robot.index(), 3);
    assert_eq!(robot.strip().track_slot(), Some(4));
    robot.next();
    assert_eq!(robot.index(), 0);
}

#[test]
fn clamped_model_ignores_navigation_past_ends() {
    let config = CarouselConfig::new(items(3));
    let mut robot = CarouselRobot::launch(&config).expect("non-empty");

    robot.previous();
    assert_eq!(robot.index(), 0);
    assert!(!robot.snapshot().controls.previous);

    robot.next();
    robot.next();
    robot.next();
    assert_eq!(robot.index(), 2);
    assert!(!robot.snapshot().controls.next);
    assert_eq!(index_changes(&robot.events()), vec![1, 2]);
}

#[test]
fn requests_during_a_transition_are_dropped() {
    let config = CarouselConfig::new(items(5)).looped(true);
    let mut robot = CarouselRobot::launch(&config).expect("non-empty");
    robot.press_next();
    robot.press_next();
    robot.press_previous();
    assert!(robot.finish_transition());
    assert_eq!(robot.index(), 1);
    assert_eq!(completed_transitions(&robot.events()), 1);
}

#[test]
fn multi_item_pages_translate_by_page_fraction() {
    let config = CarouselConfig::new(items(6)).visible_count(3).looped(true);
    let mut robot = CarouselRobot::launch(&config).expect("non-empty");
    assert_eq!(robot.carousel().rendered_items().len(), 12);
    robot.next();
    let offset = robot.snapshot().track_offset_percent.expect("index model");
    assert_approx_eq(offset, 400.0 / 3.0, 1e-3, "track offset");
}

#[test]
fn scroll_model_jump_resolves_to_requested_item() {
    let config = CarouselConfig::new(items(4))
        .looped(true)
        .resolution(ResolutionStrategy::ScrollProximity);
    let mut robot = CarouselRobot::launch(&config).expect("non-empty");

    robot.go_to(2);
    assert_eq!(robot.index(), 2);

    // A small nudge settles back onto the same item.
    robot.user_scroll(40.0);
    robot.advance_millis(200);
    assert_eq!(robot.index(), 2);
    assert_eq!(robot.phase(), Phase::Idle);
}

#[test]
fn scroll_model_reports_logical_index_from_any_copy() {
    let config = CarouselConfig::new(items(4))
        .looped(true)
        .resolution(ResolutionStrategy::ScrollProximity);
    let mut robot = CarouselRobot::launch(&config).expect("non-empty");
    robot.go_to(2);
    let width = robot.strip().item_width();

    // Three copies to the right lands in the last copy.
    robot.user_scroll(12.0 * width);
    robot.advance_millis(200);

    assert_eq!(robot.index(), 2);
    let events = robot.events();
    assert_event_count(
        &events,
        1,
        |event| matches!(event, CarouselEvent::Reanchored { from: 18, to: 10 }),
        "edge copy recentres to middle copy",
    );
    assert_eq!(robot.strip().centred_item(), 10);
}

#[test]
fn scroll_events_from_a_reanchor_jump_are_ignored() {
    let config = CarouselConfig::new(items(4))
        .looped(true)
        .resolution(ResolutionStrategy::ScrollProximity);
    let mut robot = CarouselRobot::launch(&config).expect("non-empty");
    let width = robot.strip().item_width();

    robot.user_scroll(-6.0 * width);
    robot.advance_millis(150);
    assert_eq!(robot.phase(), Phase::Recentering);

    // The jump's own scroll event must not start another settle.
    robot.carousel().scroll_moved();
    robot.advance_millis(50);
    assert_eq!(robot.phase(), Phase::Idle);
    assert_eq!(robot.scheduler().pending_count(), 0);
    assert_eq!(robot.index(), 2);
}

#[test]
fn scroll_model_falls_back_to_first_item_when_unmeasurable() {
    let config = CarouselConfig::new(items(4))
        .looped(true)
        .initial_index(3)
        .resolution(ResolutionStrategy::ScrollProximity);
    let mut robot = CarouselRobot::launch(&config).expect("non-empty");
    robot.strip().set_laid_out(false);
    robot.user_scroll(10.0);
    robot.advance_millis(200);
    assert_eq!(robot.index(), 0);
}

#[test]
fn autoplay_advances_exactly_once_per_duration() {
    let config = CarouselConfig::new(items(4))
        .looped(true)
        .autoplay(Duration::from_millis(5_000));
    let mut robot = CarouselRobot::launch(&config).expect("non-empty");

    robot.advance_millis(4_900);
    assert_eq!(robot.index(), 0);
    assert!(robot.snapshot().progress > 0.9);

    robot.advance_millis(150);
    assert_eq!(robot.index(), 1);
    assert_eq!(index_changes(&robot.events()), vec![1]);
    assert!(robot.snapshot().progress < 0.05);
}

#[test]
fn paused_autoplay_resumes_from_its_fraction() {
    let config = CarouselConfig::new(items(4))
        .looped(true)
        .autoplay(Duration::from_millis(5_000));
    let mut robot = CarouselRobot::launch(&config).expect("non-empty");

    robot.advance_millis(2_000);
    robot.toggle_autoplay();
    let paused = robot.snapshot().progress;
    assert_approx_eq(paused, 0.4, 1e-3, "paused progress");
    assert!(!robot.carousel().is_autoplay_scheduled());

    robot.advance_millis(10_000);
    assert_eq!(robot.index(), 0);
    assert_approx_eq(robot.snapshot().progress, paused, 1e-6, "frozen progress");

    robot.toggle_autoplay();
    robot.advance_millis(2_800);
    assert_eq!(robot.index(), 0);
    robot.advance_millis(300);
    assert_eq!(robot.index(), 1);

    let toggles: Vec<_> = robot
        .events()
        .into_iter()
        .filter(|event| matches!(event, CarouselEvent::AutoplayToggled { .. }))
        .collect();
    assert_count(&toggles, 2, "autoplay toggles");
}

#[test]
fn manual_navigation_restarts_autoplay_progress() {
    let config = CarouselConfig::new(items(4))
        .looped(true)
        .autoplay(Duration::from_millis(1_000));
    let mut robot = CarouselRobot::launch(&config).expect("non-empty");
    robot.advance_millis(800);
    robot.next();
    assert_eq!(robot.snapshot().progress, 0.0);
    robot.advance_millis(900);
    assert_eq!(robot.index(), 1);
}

#[test]
fn swipe_past_threshold_retreats_once() {
    let config = CarouselConfig::new(items(4)).looped(true);
    let mut robot = CarouselRobot::launch(&config).expect("non-empty");
    robot.swipe(200.0, 206.0, 1);
    robot.finish_transition();
    assert_eq!(robot.index(), 3);

    robot.swipe(200.0, 204.0, 1);
    robot.finish_transition();
    assert_eq!(robot.index(), 3);

    robot.swipe(200.0, -200.0, 20);
    robot.finish_transition();
    assert_eq!(robot.index(), 0);
    assert_eq!(completed_transitions(&robot.events()), 2);
}

#[test]
fn empty_sequence_mounts_nothing() {
    let config = CarouselConfig::new(Vec::<String>::new()).looped(true);
    assert!(CarouselRobot::launch(&config).is_none());
}

#[test]
fn single_item_is_inert() {
    let config = CarouselConfig::new(items(1))
        .looped(true)
        .with_indicator(true);
    let mut robot = CarouselRobot::launch(&config).expect("non-empty");
    robot.next();
    robot.previous();
    assert_eq!(robot.index(), 0);
    assert_eq!(
        robot.transitions(),
        vec![Transition::Track {
            slot: 0,
            animated: false
        }]
    );
    let snapshot = robot.snapshot();
    assert!(!snapshot.controls.previous && !snapshot.controls.next);
    assert_eq!(snapshot.indicator.map(|i| i.dots.len()), Some(1));
}
