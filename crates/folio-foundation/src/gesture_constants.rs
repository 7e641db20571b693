//! Shared gesture constants for carousel touch/pointer handling.
//!
//! Values are in logical (CSS) pixels. They are not scaled by device pixel
//! ratio; browsers already report touch coordinates in CSS pixels.

/// Swipe distance that triggers navigation while the finger is still moving.
pub const SWIPE_THRESHOLD_ON_MOVE: f32 = 5.0;

/// Swipe distance that triggers navigation when the finger lifts.
///
/// Used by single-image galleries.
pub const SWIPE_THRESHOLD_ON_RELEASE: f32 = 40.0;
