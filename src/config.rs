//! Rendering parameters.

/// Scale factors and limits shared by the table and diagram renderers.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RenderConfig {
    /// Diagram characters per ns of hop delay.
    pub box_scale: f64,
    /// Table bar characters per ns of hop delay.
    pub bar_scale: f64,
    /// Longest module name shown in the table.
    pub name_limit: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        RenderConfig {
            box_scale: 60.0,
            bar_scale: 20.0,
            name_limit: 24,
        }
    }
}

/// `round(scale * delay)`, never negative.
#[inline]
pub fn scaled(delay: f64, scale: f64) -> usize {
    (scale * delay).round().max(0.0) as usize
}
