//! Measurement-based reconciliation for the scroll model.
//!
//! The scroll strip tracks its position authoritatively. Measurements are only
//! consulted after free scrolling settles, to find out where the user left it.

use folio_core::Duration;
use folio_ui_graphics::Rect;

/// Scroll quiescence required before a settled position is resolved.
pub const SETTLE_DEBOUNCE: Duration = Duration::from_millis(150);

/// How long resolution stays suppressed after an unanimated reanchor jump.
pub const REANCHOR_GUARD: Duration = Duration::from_millis(50);

/// Snapshot of the strip layout in viewport coordinates.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StripMeasurement {
    pub viewport: Rect,
    /// One rect per rendered item, in strip order. Items that are not laid
    /// out yet report an empty rect.
    pub items: Vec<Rect>,
}

impl StripMeasurement {
    pub fn new(viewport: Rect, items: Vec<Rect>) -> Self {
        Self { viewport, items }
    }

    pub fn is_measurable(&self) -> bool {
        !self.viewport.is_empty() && self.items.iter().any(|rect| !rect.is_empty())
    }

    /// Rendered position whose horizontal center is nearest the viewport
    /// center. Ties go to the earlier item.
    pub fn nearest_to_center(&self) -> Option<usize> {
        if self.viewport.is_empty() {
            return None;
        }
        let center = self.viewport.center_x();
        let mut best: Option<(usize, f32)> = None;
        for (index, rect) in self.items.iter().enumerate() {
            if rect.is_empty() {
                continue;
            }
            let distance = (rect.center_x() - center).abs();
            if best.map_or(true, |(_, nearest)| distance < nearest) {
                best = Some((index, distance));
            }
        }
        best.map(|(index, _)| index)
    }

    /// Average horizontal distance between consecutive measured items.
    pub fn pitch(&self) -> Option<f32> {
        let measured: Vec<(usize, f32)> = self
            .items
            .iter()
            .enumerate()
            .filter(|(_, rect)| !rect.is_empty())
            .map(|(index, rect)| (index, rect.x))
            .collect();
        let (first_index, first_x) = *measured.first()?;
        let (last_index, last_x) = *measured.last()?;
        if last_index == first_index {
            return Some(self.items[first_index].width);
        }
        Some((last_x - first_x) / (last_index - first_index) as f32)
    }

    fn measured(&self, rendered: usize) -> Option<Rect> {
        self.items
            .get(rendered)
            .copied()
            .filter(|rect| !rect.is_empty())
    }
}

/// Outcome of resolving a settled strip.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resolution {
    Measured { rendered: usize, logical: usize },
    /// Nothing could be measured; the logical index falls back to 0.
    Fallback,
}

impl Resolution {
    pub fn logical(self) -> usize {
        match self {
            Resolution::Measured { logical, .. } => logical,
            Resolution::Fallback => 0,
        }
    }

    pub fn rendered(self) -> Option<usize> {
        match self {
            Resolution::Measured { rendered, .. } => Some(rendered),
            Resolution::Fallback => None,
        }
    }

    pub fn is_fallback(self) -> bool {
        matches!(self, Resolution::Fallback)
    }
}

/// Maps the item nearest the viewport center back to a logical index.
pub fn resolve(measurement: &StripMeasurement, len: usize) -> Resolution {
    if len == 0 {
        return Resolution::Fallback;
    }
    match measurement.nearest_to_center() {
        Some(rendered) => Resolution::Measured {
            rendered,
            logical: rendered % len,
        },
        None => {
            log::warn!(
                "strip has no measurable items ({} rendered); falling back to index 0",
                measurement.items.len()
            );
            Resolution::Fallback
        }
    }
}

/// Horizontal scroll distance that moves `from` to where `to` currently is.
///
/// Uses the two measured rects when both are laid out, otherwise estimates
/// from the average item pitch.
pub fn reanchor_offset(measurement: &StripMeasurement, from: usize, to: usize) -> Option<f32> {
    if let (Some(from_rect), Some(to_rect)) = (measurement.measured(from), measurement.measured(to)) {
        return Some(to_rect.x - from_rect.x);
    }
    let pitch = measurement.pitch()?;
    Some(pitch * (to as f32 - from as f32))
}

/// Scroll distance that brings `rendered` to the viewport center.
pub fn centering_delta(measurement: &StripMeasurement, rendered: usize) -> Option<f32> {
    let rect = measurement.measured(rendered)?;
    Some(rect.center_x() - measurement.viewport.center_x())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strip(count: usize, width: f32, scroll: f32) -> StripMeasurement {
        let items = (0..count)
            .map(|index| Rect::new(index as f32 * width - scroll, 0.0, width, 100.0))
            .collect();
        StripMeasurement::new(Rect::new(0.0, 0.0, width, 100.0), items)
    }

    #[test]
    fn nearest_item_maps_back_through_modulo() {
        // 4 items, 5 copies, scrolled to rendered position 14.
        let measurement = strip(20, 200.0, 14.0 * 200.0 + 30.0);
        assert_eq!(
            resolve(&measurement, 4),
            Resolution::Measured {
                rendered: 14,
                logical: 2
            }
        );
    }

    #[test]
    fn unmeasured_strip_falls_back_to_zero() {
        let mut measurement = strip(8, 200.0, 0.0);
        for rect in &mut measurement.items {
            *rect = Rect::default();
        }
        let resolution = resolve(&measurement, 4);
        assert!(resolution.is_fallback());
        assert_eq!(resolution.logical(), 0);
    }

    #[test]
    fn empty_rects_are_skipped() {
        let mut measurement = strip(6, 100.0, 200.0);
        measurement.items[2] = Rect::default();
        assert_eq!(measurement.nearest_to_center(), Some(1));
    }

    #[test]
    fn reanchor_offset_uses_measured_rects() {
        let measurement = strip(20, 150.0, 0.0);
        assert_eq!(reanchor_offset(&measurement, 17, 9), Some(-1200.0));
    }

    #[test]
    fn reanchor_offset_estimates_from_pitch() {
        let mut measurement = strip(20, 150.0, 0.0);
        measurement.items[17] = Rect::default();
        assert_eq!(reanchor_offset(&measurement, 17, 9), Some(-1200.0));
    }

    #[test]
    fn centering_delta_measures_from_viewport_center() {
        let measurement = strip(4, 100.0, 0.0);
        assert_eq!(centering_delta(&measurement, 2), Some(200.0));
    }
}
