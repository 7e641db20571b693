//! Assertion utilities for robot testing
//!
//! Helpers for validating carousel state and event streams in robot tests.

use folio_foundation::carousel::CarouselEvent;
use folio_ui_graphics::Rect;

/// Assert that a value is within an expected range.
pub fn assert_approx_eq(actual: f32, expected: f32, tolerance: f32, msg: &str) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= tolerance,
        "{}: expected {} (±{}), got {} (diff: {})",
        msg,
        expected,
        tolerance,
        actual,
        diff
    );
}

/// Assert that a rectangle is approximately equal to another.
pub fn assert_rect_approx_eq(actual: Rect, expected: Rect, tolerance: f32, msg: &str) {
    assert_approx_eq(actual.x, expected.x, tolerance, &format!("{} - x", msg));
    assert_approx_eq(actual.y, expected.y, tolerance, &format!("{} - y", msg));
    assert_approx_eq(
        actual.width,
        expected.width,
        tolerance,
        &format!("{} - width", msg),
    );
    assert_approx_eq(
        actual.height,
        expected.height,
        tolerance,
        &format!("{} - height", msg),
    );
}

/// Assert that a collection has an expected count.
pub fn assert_count<T: std::fmt::Debug>(items: &[T], expected: usize, msg: &str) {
    assert_eq!(
        items.len(),
        expected,
        "{}: expected {} items, got {}: {:?}",
        msg,
        expected,
        items.len(),
        items
    );
}

/// Number of transition-complete events.
pub fn completed_transitions(events: &[CarouselEvent]) -> usize {
    events
        .iter()
        .filter(|event| matches!(event, CarouselEvent::TransitionCompleted { .. }))
        .count()
}

/// Indices reported by index-change events, in order.
pub fn index_changes(events: &[CarouselEvent]) -> Vec<usize> {
    events
        .iter()
        .filter_map(|event| match event {
            CarouselEvent::IndexChanged { index, .. } => Some(*index),
            _ => None,
        })
        .collect()
}

/// Assert that exactly `expected` events match `predicate`.
pub fn assert_event_count(
    events: &[CarouselEvent],
    expected: usize,
    predicate: impl Fn(&CarouselEvent) -> bool,
    msg: &str,
) {
    let actual = events.iter().filter(|event| predicate(event)).count();
    assert_eq!(
        actual, expected,
        "{}: expected {} matching events, got {} in {:?}",
        msg, expected, actual, events
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_completed_transitions() {
        let events = [
            CarouselEvent::IndexChanged {
                index: 1,
                previous: 0,
            },
            CarouselEvent::TransitionCompleted { index: 1 },
            CarouselEvent::Reanchored { from: 0, to: 3 },
        ];
        assert_eq!(completed_transitions(&events), 1);
        assert_eq!(index_changes(&events), vec![1]);
        assert_event_count(
            &events,
            1,
            |event| matches!(event, CarouselEvent::Reanchored { .. }),
            "reanchors",
        );
    }

    #[test]
    #[should_panic(expected = "width")]
    fn rect_mismatch_names_the_field() {
        assert_rect_approx_eq(
            Rect::new(0.0, 0.0, 10.0, 10.0),
            Rect::new(0.0, 0.0, 12.0, 10.0),
            0.5,
            "rect",
        );
    }
}
