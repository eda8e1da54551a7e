use std::ops::RangeInclusive;

use glam::{Vec2, Vec4};

use crate::{
    abs::GlBackend,
    render::ui::{
        uirenderer::{DrawCommand, UIRenderer},
        widgets::{LayoutContext, UpdateContext, Widget},
    },
};

const HANDLE_WIDTH: f32 = 8.0;

/// A horizontal slider editing one float within a range.
///
/// Pressing the left button over the track starts a drag; the value then follows the mouse
/// until the button is released, even when the cursor leaves the track.
pub struct Slider {
    pub position: Vec2,
    pub size: Vec2,
    pub track_color: Vec4,
    pub fill_color: Vec4,
    pub handle_color: Vec4,
    range: RangeInclusive<f32>,
    value: f32,
    hovered: bool,
    dragging: bool,
}

impl Slider {
    pub fn new(range: RangeInclusive<f32>, value: f32, size: Vec2) -> Self {
        let mut slider = Self {
            position: Vec2::ZERO,
            size,
            track_color: Vec4::new(0.16, 0.29, 0.48, 0.54),
            fill_color: Vec4::new(0.26, 0.59, 0.98, 0.67),
            handle_color: Vec4::new(0.24, 0.52, 0.88, 1.0),
            range,
            value: 0.0,
            hovered: false,
            dragging: false,
        };
        slider.set_value(value);
        slider
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    /// Sets the value, clamped to the range.
    pub fn set_value(&mut self, value: f32) {
        self.value = value.clamp(*self.range.start(), *self.range.end());
    }

    pub fn set_range(&mut self, range: RangeInclusive<f32>) {
        self.range = range;
        self.set_value(self.value);
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Position of the value within the range, from 0 to 1.
    fn fraction(&self) -> f32 {
        let span = self.range.end() - self.range.start();
        if span <= 0.0 {
            return 0.0;
        }
        (self.value - self.range.start()) / span
    }
}

impl Widget for Slider {
    fn size_hint(&self) -> Vec2 {
        self.size
    }

    fn update(&mut self, ctx: &UpdateContext) {
        let mouse = ctx.mouse;
        self.hovered = mouse.position.x >= self.position.x
            && mouse.position.x <= self.position.x + self.size.x
            && mouse.position.y >= self.position.y
            && mouse.position.y <= self.position.y + self.size.y;

        if mouse.left_pressed && self.hovered {
            self.dragging = true;
        }

        // A press and release within one frame still moves the value once.
        if self.dragging && self.size.x > 0.0 {
            let t = ((mouse.position.x - self.position.x) / self.size.x).clamp(0.0, 1.0);
            let value = self.range.start() + t * (self.range.end() - self.range.start());
            self.set_value(value);
        }

        if !mouse.left_down {
            self.dragging = false;
        }
    }

    fn layout(&mut self, ctx: &LayoutContext) -> Vec2 {
        self.position = ctx.cursor;
        self.size_hint().min(ctx.max_size)
    }

    fn draw<G: GlBackend>(&self, ui_renderer: &mut UIRenderer<G>) {
        let fill = Vec2::new(self.size.x * self.fraction(), self.size.y);
        let handle_max = (self.size.x - HANDLE_WIDTH).max(0.0);
        let handle_x = (fill.x - HANDLE_WIDTH / 2.0).clamp(0.0, handle_max);
        let handle_color = if self.hovered || self.dragging {
            self.handle_color * Vec4::new(1.2, 1.2, 1.2, 1.0)
        } else {
            self.handle_color
        };

        ui_renderer.add_command(DrawCommand::solid(self.position, self.size, self.track_color));
        ui_renderer.add_command(DrawCommand::solid(self.position, fill, self.fill_color));
        ui_renderer.add_command(DrawCommand::solid(
            self.position + Vec2::new(handle_x, 0.0),
            Vec2::new(HANDLE_WIDTH, self.size.y),
            handle_color,
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::MouseState;

    fn slider() -> Slider {
        let mut slider = Slider::new(-0.3..=0.3, -0.1, Vec2::new(200.0, 20.0));
        slider.layout(&LayoutContext {
            max_size: Vec2::splat(1000.0),
            cursor: Vec2::new(100.0, 50.0),
        });
        slider
    }

    fn mouse(x: f32, y: f32, down: bool, pressed: bool) -> MouseState {
        MouseState {
            position: Vec2::new(x, y),
            left_down: down,
            left_pressed: pressed,
        }
    }

    #[test]
    fn value_is_clamped_to_the_range() {
        let mut slider = slider();
        assert_eq!(slider.value(), -0.1);
        slider.set_value(0.9);
        assert_eq!(slider.value(), 0.3);
        slider.set_range(-0.1..=0.1);
        assert_eq!(slider.value(), 0.1);
    }

    #[test]
    fn press_over_track_starts_a_drag() {
        let mut slider = slider();
        // Three quarters along the track.
        slider.update(&UpdateContext::new(&mouse(250.0, 60.0, true, true)));
        assert!(slider.is_dragging());
        assert!((slider.value() - 0.15).abs() < 1e-5);

        // Leaving the track keeps dragging and clamps at the end.
        slider.update(&UpdateContext::new(&mouse(900.0, 0.0, true, false)));
        assert_eq!(slider.value(), 0.3);

        // Releasing ends the drag where the cursor is.
        slider.update(&UpdateContext::new(&mouse(900.0, 0.0, false, false)));
        assert!(!slider.is_dragging());
        assert_eq!(slider.value(), 0.3);

        slider.update(&UpdateContext::new(&mouse(150.0, 60.0, false, false)));
        assert_eq!(slider.value(), 0.3);
    }

    #[test]
    fn press_outside_the_track_is_ignored() {
        let mut slider = slider();
        slider.update(&UpdateContext::new(&mouse(50.0, 60.0, true, true)));
        assert!(!slider.is_dragging());
        assert!(!slider.is_hovered());

        // Holding the button and moving onto the track does not start a drag.
        slider.update(&UpdateContext::new(&mouse(150.0, 60.0, true, false)));
        assert!(slider.is_hovered());
        assert!(!slider.is_dragging());
        assert_eq!(slider.value(), -0.1);
    }

    #[test]
    fn click_released_within_the_frame_sets_the_value() {
        let mut slider = slider();
        slider.update(&UpdateContext::new(&mouse(299.0, 60.0, false, true)));
        assert!(!slider.is_dragging());
        assert!((slider.value() - 0.297).abs() < 1e-5);
    }
}
