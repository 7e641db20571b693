//! Threshold-based swipe interpretation.
//!
//! There is no velocity tracking: a swipe is a horizontal displacement from
//! the press position, and it navigates at most once per gesture.

use serde::{Deserialize, Serialize};

use super::navigator::Direction;
use crate::gesture_constants::{SWIPE_THRESHOLD_ON_MOVE, SWIPE_THRESHOLD_ON_RELEASE};

/// When the displacement is evaluated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SwipeTrigger {
    /// On every move sample; navigation happens mid-gesture.
    #[default]
    OnMove,
    /// Once, when the pointer lifts.
    OnRelease,
}

impl SwipeTrigger {
    pub fn default_threshold(self) -> f32 {
        match self {
            SwipeTrigger::OnMove => SWIPE_THRESHOLD_ON_MOVE,
            SwipeTrigger::OnRelease => SWIPE_THRESHOLD_ON_RELEASE,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "SwipeRepr")]
pub struct SwipeConfig {
    pub trigger: SwipeTrigger,
    /// Displacement in logical pixels that must be exceeded.
    pub threshold: f32,
}

/// Wire form of [`SwipeConfig`]. A missing threshold follows the trigger.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SwipeRepr {
    #[serde(default)]
    trigger: SwipeTrigger,
    threshold: Option<f32>,
}

impl From<SwipeRepr> for SwipeConfig {
    fn from(repr: SwipeRepr) -> Self {
        Self {
            trigger: repr.trigger,
            threshold: repr
                .threshold
                .unwrap_or_else(|| repr.trigger.default_threshold()),
        }
    }
}

impl Default for SwipeConfig {
    fn default() -> Self {
        Self::on_move()
    }
}

impl SwipeConfig {
    pub fn on_move() -> Self {
        Self {
            trigger: SwipeTrigger::OnMove,
            threshold: SWIPE_THRESHOLD_ON_MOVE,
        }
    }

    pub fn on_release() -> Self {
        Self {
            trigger: SwipeTrigger::OnRelease,
            threshold: SWIPE_THRESHOLD_ON_RELEASE,
        }
    }

    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.threshold = threshold;
        self
    }
}

/// Turns a press/move/release sequence into at most one navigation.
///
/// A finger moving right (positive delta) pulls the previous item into view,
/// so it retreats; moving left advances.
#[derive(Clone, Copy, Debug)]
pub struct SwipeDetector {
    config: SwipeConfig,
    origin: Option<f32>,
}

impl SwipeDetector {
    pub fn new(config: SwipeConfig) -> Self {
        Self {
            config,
            origin: None,
        }
    }

    pub fn config(&self) -> SwipeConfig {
        self.config
    }

    pub fn is_tracking(&self) -> bool {
        self.origin.is_some()
    }

    /// Starts a gesture, discarding any unfinished one.
    pub fn begin(&mut self, x: f32) {
        self.origin = Some(x);
    }

    /// Feeds a move sample. Only [`SwipeTrigger::OnMove`] can fire here.
    pub fn update(&mut self, x: f32) -> Option<Direction> {
        if self.config.trigger != SwipeTrigger::OnMove {
            return None;
        }
        let origin = self.origin?;
        let direction = self.classify(x - origin);
        if direction.is_some() {
            self.origin = None;
        }
        direction
    }

    /// Ends the gesture. Only [`SwipeTrigger::OnRelease`] can fire here; the
    /// gesture state is cleared either way.
    pub fn release(&mut self, x: f32) -> Option<Direction> {
        let origin = self.origin.take()?;
        match self.config.trigger {
            SwipeTrigger::OnRelease => self.classify(x - origin),
            SwipeTrigger::OnMove => None,
        }
    }

    pub fn cancel(&mut self) {
        self.origin = None;
    }

    fn classify(&self, delta: f32) -> Option<Direction> {
        if delta > self.config.threshold {
            Some(Direction::Backward)
        } else if delta < -self.config.threshold {
            Some(Direction::Forward)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const THRESHOLD: f32 = SWIPE_THRESHOLD_ON_MOVE;

    fn drag(detector: &mut SwipeDetector, from: f32, samples: &[f32]) -> Vec<Direction> {
        detector.begin(from);
        let mut fired = Vec::new();
        for x in samples {
            fired.extend(detector.update(*x));
        }
        if let Some(last) = samples.last() {
            fired.extend(detector.release(*last));
        }
        fired
    }

    #[test]
    fn rightward_drag_past_threshold_retreats_once() {
        let mut detector = SwipeDetector::new(SwipeConfig::on_move());
        let fired = drag(&mut detector, 100.0, &[100.0 + THRESHOLD + 1.0]);
        assert_eq!(fired, vec![Direction::Backward]);
    }

    #[test]
    fn leftward_drag_past_threshold_advances_once() {
        let mut detector = SwipeDetector::new(SwipeConfig::on_move());
        let fired = drag(&mut detector, 100.0, &[100.0 - THRESHOLD - 1.0]);
        assert_eq!(fired, vec![Direction::Forward]);
    }

    #[test]
    fn drag_below_threshold_does_nothing() {
        let mut detector = SwipeDetector::new(SwipeConfig::on_move());
        let fired = drag(&mut detector, 100.0, &[100.0 + THRESHOLD - 1.0]);
        assert!(fired.is_empty());
        assert!(!detector.is_tracking());
    }

    #[test]
    fn long_swipe_fires_only_once() {
        let mut detector = SwipeDetector::new(SwipeConfig::on_move());
        let fired = drag(&mut detector, 0.0, &[-10.0, -40.0, -120.0, -300.0]);
        assert_eq!(fired, vec![Direction::Forward]);
    }

    #[test]
    fn release_trigger_ignores_moves() {
        let mut detector = SwipeDetector::new(SwipeConfig::on_release());
        detector.begin(200.0);
        assert_eq!(detector.update(0.0), None);
        assert_eq!(detector.release(100.0), Some(Direction::Forward));
        assert_eq!(detector.release(100.0), None);
    }

    #[test]
    fn release_trigger_requires_threshold() {
        let mut detector = SwipeDetector::new(SwipeConfig::on_release());
        detector.begin(0.0);
        assert_eq!(detector.release(SWIPE_THRESHOLD_ON_RELEASE), None);
    }

    #[test]
    fn missing_threshold_follows_trigger() {
        let release: SwipeConfig =
            serde_json::from_str(r#"{ "trigger": "onRelease" }"#).expect("valid swipe");
        assert_eq!(release, SwipeConfig::on_release());
        let moving: SwipeConfig = serde_json::from_str("{}").expect("valid swipe");
        assert_eq!(moving, SwipeConfig::on_move());
        let explicit: SwipeConfig =
            serde_json::from_str(r#"{ "trigger": "onRelease", "threshold": 12 }"#).expect("valid swipe");
        assert_eq!(explicit.threshold, 12.0);
    }

    #[test]
    fn cancel_discards_gesture() {
        let mut detector = SwipeDetector::new(SwipeConfig::on_move());
        detector.begin(0.0);
        detector.cancel();
        assert_eq!(detector.update(-100.0), None);
    }
}
