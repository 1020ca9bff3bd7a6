//! Drag-to-resize state for the file explorer panel.
//!
//! Pointer moves are coalesced: [`PanelResize::drag_to`] only records the
//! latest target width, and the host applies it on its next animation frame
//! via [`PanelResize::on_animation_frame`]. Ending the drag drops whatever is
//! still pending.

use gh_pr_config::PanelConfig;

#[derive(Debug, Clone, Copy, PartialEq)]
struct DragOrigin {
    start_x: f64,
    start_width: f64,
    container_width: f64,
}

/// Width of a resizable panel, in percent of its container.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelResize {
    width: f64,
    min: f64,
    max: f64,
    drag: Option<DragOrigin>,
    pending: Option<f64>,
}

impl PanelResize {
    /// `initial` is clamped into `[min, max]`.
    pub fn new(initial: f64, min: f64, max: f64) -> Self {
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        Self {
            width: initial.clamp(min, max),
            min,
            max,
            drag: None,
            pending: None,
        }
    }

    pub fn from_config(config: &PanelConfig) -> Self {
        Self::new(config.initial, config.min, config.max)
    }

    /// Current width in percent.
    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn bounds(&self) -> (f64, f64) {
        (self.min, self.max)
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Whether a width is waiting for the next frame.
    pub fn has_pending_frame(&self) -> bool {
        self.pending.is_some()
    }

    /// Set the width directly (clamped), e.g. when restoring a saved layout.
    pub fn set_width(&mut self, width: f64) {
        if width.is_finite() {
            self.width = width.clamp(self.min, self.max);
        }
    }

    /// Start a drag at pointer `x` inside a container `container_width` px wide.
    pub fn begin_drag(&mut self, x: f64, container_width: f64) {
        self.drag = Some(DragOrigin {
            start_x: x,
            start_width: self.width,
            container_width,
        });
        self.pending = None;
    }

    /// Record a pointer move.
    ///
    /// Returns `true` when the caller must schedule an animation frame, which
    /// is only the case for the first pending move since the last frame.
    pub fn drag_to(&mut self, x: f64) -> bool {
        let Some(origin) = self.drag else {
            return false;
        };
        if origin.container_width <= 0.0 || !x.is_finite() {
            return false;
        }

        let delta = (x - origin.start_x) / origin.container_width * 100.0;
        let target = (origin.start_width + delta).clamp(self.min, self.max);
        self.pending.replace(target).is_none()
    }

    /// Apply the latest pending width. Returns it if one was applied.
    pub fn on_animation_frame(&mut self) -> Option<f64> {
        let width = self.pending.take()?;
        self.width = width;
        Some(width)
    }

    /// Finish the drag and drop any update not yet applied.
    pub fn end_drag(&mut self) {
        self.drag = None;
        self.pending = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn drag(start_x: f64, to_x: f64) -> f64 {
        let mut panel = PanelResize::new(25.0, 15.0, 60.0);
        panel.begin_drag(start_x, 200.0);
        panel.drag_to(to_x);
        panel.on_animation_frame();
        panel.end_drag();
        panel.width()
    }

    #[test]
    fn test_drag_right_by_fifty_px() {
        assert_eq!(drag(0.0, 50.0), 50.0);
    }

    #[test]
    fn test_drag_clamps_to_max() {
        assert_eq!(drag(0.0, 300.0), 60.0);
    }

    #[test]
    fn test_drag_clamps_to_min() {
        assert_eq!(drag(100.0, -200.0), 15.0);
    }

    #[test]
    fn test_moves_coalesce_per_frame() {
        let mut panel = PanelResize::new(25.0, 15.0, 60.0);
        panel.begin_drag(0.0, 200.0);

        assert!(panel.drag_to(10.0));
        assert!(!panel.drag_to(20.0));
        assert!(!panel.drag_to(30.0));
        assert_eq!(panel.width(), 25.0);

        assert_eq!(panel.on_animation_frame(), Some(40.0));
        assert_eq!(panel.on_animation_frame(), None);

        // next move after a frame schedules again
        assert!(panel.drag_to(40.0));
    }

    #[test]
    fn test_release_cancels_pending_update() {
        let mut panel = PanelResize::new(25.0, 15.0, 60.0);
        panel.begin_drag(0.0, 200.0);
        panel.drag_to(50.0);
        panel.end_drag();

        assert_eq!(panel.on_animation_frame(), None);
        assert_eq!(panel.width(), 25.0);
        assert!(!panel.drag_to(80.0));
    }

    #[test]
    fn test_zero_width_container_ignores_moves() {
        let mut panel = PanelResize::new(25.0, 15.0, 60.0);
        panel.begin_drag(0.0, 0.0);
        assert!(!panel.drag_to(100.0));
        assert_eq!(panel.on_animation_frame(), None);
    }

    #[test]
    fn test_initial_is_clamped() {
        assert_eq!(PanelResize::new(90.0, 15.0, 60.0).width(), 60.0);
        let mut panel = PanelResize::new(25.0, 15.0, 60.0);
        panel.set_width(5.0);
        assert_eq!(panel.width(), 15.0);
    }
}
