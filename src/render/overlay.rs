//! The debug overlay drawn on top of the scene.
//!
//! The overlay is immediate mode: each frame the loop hands it the values to show and gets
//! the edited value back.

use std::{ops::RangeInclusive, sync::Arc};

use glam::{Vec2, Vec4};

use super::ui::{
    uirenderer::{DrawCommand, UIRenderer},
    widgets::{Label, LayoutContext, Slider, UpdateContext, Widget},
};
use crate::{abs::GlBackend, error::Error, input::MouseState};

/// What the debug panel shows for one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct DebugPanel<'a> {
    pub label: &'a str,
    pub fps: f32,
    pub value_label: &'a str,
    pub value: f32,
    pub range: RangeInclusive<f32>,
}

/// An immediate-mode overlay.
pub trait Overlay {
    fn begin_frame(&mut self, mouse: &MouseState);

    /// Shows the panel and returns its possibly edited value.
    fn debug_panel(&mut self, panel: &DebugPanel) -> f32;

    fn end_frame(&mut self);

    fn resize(&mut self, width: u32, height: u32);
}

const FONT_SIZE: f32 = 16.0;
const PADDING: f32 = 8.0;
const SPACING: f32 = 4.0;
const PANEL_WIDTH: f32 = 260.0;
const PANEL_ORIGIN: Vec2 = Vec2::new(10.0, 10.0);

/// The overlay rendered with the in-engine UI toolkit.
pub struct DebugOverlay<G: GlBackend = glow::Context> {
    gl: Arc<G>,
    ui: UIRenderer<G>,
    title: Label,
    fps: Label,
    value_label: Label,
    slider: Slider,
    mouse: MouseState,
    background: Vec4,
}

impl<G: GlBackend> DebugOverlay<G> {
    pub fn new(gl: &Arc<G>, viewport: (u32, u32)) -> Result<Self, Error> {
        let ui = UIRenderer::new(gl, viewport)?;
        Ok(Self::with_renderer(gl, ui))
    }

    pub fn with_renderer(gl: &Arc<G>, ui: UIRenderer<G>) -> Self {
        let text_color = Vec4::ONE;
        Self {
            gl: Arc::clone(gl),
            ui,
            title: Label::new("", FONT_SIZE, text_color),
            fps: Label::new("", FONT_SIZE, text_color),
            value_label: Label::new("", FONT_SIZE, text_color),
            slider: Slider::new(0.0..=1.0, 0.0, Vec2::new(PANEL_WIDTH - 2.0 * PADDING, FONT_SIZE)),
            mouse: MouseState::default(),
            background: Vec4::new(0.06, 0.06, 0.06, 0.94),
        }
    }

    /// Places `widget` at `cursor` and moves the cursor below it.
    fn place(widget: &mut impl Widget, cursor: &mut Vec2) {
        let ctx = LayoutContext {
            max_size: Vec2::new(PANEL_WIDTH - 2.0 * PADDING, f32::INFINITY),
            cursor: *cursor,
        };
        let size = widget.layout(&ctx);
        cursor.y += size.y + SPACING;
    }
}

impl<G: GlBackend> Overlay for DebugOverlay<G> {
    fn begin_frame(&mut self, mouse: &MouseState) {
        self.mouse = *mouse;
    }

    fn debug_panel(&mut self, panel: &DebugPanel) -> f32 {
        self.title.set_text(panel.label);
        self.fps.set_text(&format!("{:.2} FPS", panel.fps));
        self.value_label.set_text(&format!("{} {:.3}", panel.value_label, panel.value));

        self.slider.set_range(panel.range.clone());
        if !self.slider.is_dragging() {
            self.slider.set_value(panel.value);
        }

        let mut cursor = PANEL_ORIGIN + Vec2::splat(PADDING);
        Self::place(&mut self.title, &mut cursor);
        Self::place(&mut self.fps, &mut cursor);
        Self::place(&mut self.value_label, &mut cursor);
        Self::place(&mut self.slider, &mut cursor);

        let ctx = UpdateContext::new(&self.mouse);
        self.slider.update(&ctx);

        // The scene is drawn without blending.
        self.gl.enable(glow::BLEND);
        self.gl.blend_func(glow::SRC_ALPHA, glow::ONE_MINUS_SRC_ALPHA);

        let height = cursor.y - SPACING + PADDING - PANEL_ORIGIN.y;
        self.ui.add_command(DrawCommand::solid(
            PANEL_ORIGIN,
            Vec2::new(PANEL_WIDTH, height),
            self.background,
        ));
        self.title.draw(&mut self.ui);
        self.fps.draw(&mut self.ui);
        self.value_label.draw(&mut self.ui);
        self.slider.draw(&mut self.ui);

        self.slider.value()
    }

    fn end_frame(&mut self) {
        self.ui.finish();
        self.gl.disable(glow::BLEND);
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.ui.resize(width, height);
    }
}
