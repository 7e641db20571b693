//! Page indicator dots.

/// Emphasis of one dot relative to the active page.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum IndicatorDot {
    Active,
    Close,
    Far,
}

impl IndicatorDot {
    /// CSS class used by the web surface.
    pub fn class_name(self) -> &'static str {
        match self {
            IndicatorDot::Active => "dots-active",
            IndicatorDot::Close => "dots-close",
            IndicatorDot::Far => "dots-far",
        }
    }
}

/// Width in pixels scrolled per five dots when the indicator overflows.
const DOT_SCROLL_STEP: f32 = 50.0;
const DOTS_PER_STEP: f32 = 5.0;

/// Classifies `count` dots around `active`.
///
/// At either end the two nearest neighbours are emphasised so the strip does
/// not look lopsided; elsewhere only the immediate neighbours are.
pub fn indicator_dots(active: usize, count: usize) -> Vec<IndicatorDot> {
    if count == 0 {
        return Vec::new();
    }
    let active = active.min(count - 1);
    let last = count - 1;
    (0..count)
        .map(|index| {
            let distance = index.abs_diff(active);
            let close = if active == 0 || active == last {
                distance <= 2
            } else {
                distance == 1
            };
            match distance {
                0 => IndicatorDot::Active,
                _ if close => IndicatorDot::Close,
                _ => IndicatorDot::Far,
            }
        })
        .collect()
}

/// Horizontal scroll offset that keeps the active dot in view. Never
/// negative: the first dots sit at the start of the strip.
pub fn indicator_scroll_offset(active: usize) -> f32 {
    ((active as f32 - 2.0) / DOTS_PER_STEP * DOT_SCROLL_STEP).max(0.0)
}
