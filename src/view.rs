use serde::{Deserialize, Serialize};

/// Zoom bounds and step sizes.
///
/// Keyboard shortcuts and wheel zoom go through the same instance, so the two
/// input paths can never disagree about the allowed range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoomLimits {
    pub min: f32,
    pub max: f32,
    /// Scale change per zoom shortcut
    pub step: f32,
    /// Scale change per unit of wheel delta
    pub wheel_factor: f32,
}

impl Default for ZoomLimits {
    fn default() -> Self {
        Self {
            min: 0.25,
            max: 4.0,
            step: 0.1,
            wheel_factor: 0.001,
        }
    }
}

impl ZoomLimits {
    pub fn clamp(&self, scale: f32) -> f32 {
        scale.clamp(self.min, self.max)
    }
}

/// Page position, zoom and layout handed to the viewer.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    page: u32,
    page_count: Option<u32>,
    scale: f32,
    rotation: u16,
    continuous: bool,
    horizontal: bool,
    limits: ZoomLimits,
}

impl ViewState {
    pub fn new(limits: ZoomLimits) -> Self {
        Self {
            page: 1,
            page_count: None,
            scale: limits.clamp(1.0),
            rotation: 0,
            continuous: true,
            horizontal: false,
            limits,
        }
    }

    /// 1-based current page
    pub fn page(&self) -> u32 {
        self.page
    }

    /// Known once the viewer reports that the document finished loading
    pub fn page_count(&self) -> Option<u32> {
        self.page_count
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Clockwise rotation in degrees: 0, 90, 180 or 270
    pub fn rotation(&self) -> u16 {
        self.rotation
    }

    pub fn continuous(&self) -> bool {
        self.continuous
    }

    pub fn horizontal(&self) -> bool {
        self.horizontal
    }

    pub fn limits(&self) -> &ZoomLimits {
        &self.limits
    }

    /// Whether `page` exists in the document. Unknown page count only admits page 1.
    pub fn contains_page(&self, page: u32) -> bool {
        page >= 1 && page <= self.page_count.unwrap_or(1)
    }

    /// Fresh position for a newly loaded document. Layout preferences stay.
    pub(crate) fn reset_for_document(&mut self) {
        self.page = 1;
        self.page_count = None;
        self.scale = self.limits.clamp(1.0);
        self.rotation = 0;
    }

    pub(crate) fn set_page_count(&mut self, page_count: u32) {
        self.page_count = Some(page_count.max(1));
        self.page = self.page.min(page_count.max(1));
    }

    pub fn set_page(&mut self, page: u32) -> bool {
        let last = self.page_count.unwrap_or(1);
        let page = page.clamp(1, last);
        let changed = self.page != page;
        self.page = page;
        changed
    }

    pub fn next_page(&mut self) -> bool {
        self.set_page(self.page.saturating_add(1))
    }

    pub fn previous_page(&mut self) -> bool {
        self.set_page(self.page.saturating_sub(1))
    }

    pub fn set_scale(&mut self, scale: f32) -> bool {
        if !scale.is_finite() {
            return false;
        }
        let scale = self.limits.clamp(scale);
        let changed = self.scale != scale;
        self.scale = scale;
        changed
    }

    pub fn zoom_by(&mut self, delta: f32) -> bool {
        self.set_scale(self.scale + delta)
    }

    pub fn reset_zoom(&mut self) -> bool {
        self.set_scale(1.0)
    }

    pub fn rotate_clockwise(&mut self) {
        self.rotation = (self.rotation + 90) % 360;
    }

    pub fn rotate_counter_clockwise(&mut self) {
        self.rotation = (self.rotation + 270) % 360;
    }

    pub fn set_continuous(&mut self, continuous: bool) -> bool {
        let changed = self.continuous != continuous;
        self.continuous = continuous;
        changed
    }

    pub fn set_horizontal(&mut self, horizontal: bool) -> bool {
        let changed = self.horizontal != horizontal;
        self.horizontal = horizontal;
        changed
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new(ZoomLimits::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pages_clamp_to_known_count() {
        let mut view = ViewState::default();
        assert!(!view.next_page());
        view.set_page_count(3);
        view.set_page(10);
        assert_eq!(view.page(), 3);
        view.set_page(0);
        assert_eq!(view.page(), 1);
    }

    #[test]
    fn rotation_wraps() {
        let mut view = ViewState::default();
        view.rotate_counter_clockwise();
        assert_eq!(view.rotation(), 270);
        for _ in 0..2 {
            view.rotate_clockwise();
        }
        assert_eq!(view.rotation(), 90);
    }

    #[test]
    fn scale_rejects_nan() {
        let mut view = ViewState::default();
        assert!(!view.set_scale(f32::NAN));
        assert_eq!(view.scale(), 1.0);
    }
}
