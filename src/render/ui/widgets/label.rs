use glam::{Vec2, Vec4};

use crate::{
    abs::GlBackend,
    render::ui::{
        font::Font,
        uirenderer::UIRenderer,
        widgets::{LayoutContext, UpdateContext, Widget},
    },
};

pub struct Label {
    pub text: String,
    pub position: Vec2,
    pub font_size: f32,
    pub color: Vec4,
}

impl Label {
    pub fn new(text: &str, font_size: f32, color: Vec4) -> Self {
        Self {
            text: text.to_string(),
            position: Vec2::ZERO,
            font_size,
            color,
        }
    }

    /// Replaces the text, reusing the allocation.
    pub fn set_text(&mut self, text: &str) {
        if self.text != text {
            self.text.clear();
            self.text.push_str(text);
        }
    }
}

impl Widget for Label {
    fn size_hint(&self) -> Vec2 {
        Font.measure_text(&self.text, self.font_size)
    }

    fn update(&mut self, _ctx: &UpdateContext) {
        // Labels are static; no update logic needed.
    }

    fn layout(&mut self, ctx: &LayoutContext) -> Vec2 {
        let measured_size = self.size_hint();
        self.position = ctx.cursor;
        measured_size.min(ctx.max_size)
    }

    fn draw<G: GlBackend>(&self, ui_renderer: &mut UIRenderer<G>) {
        ui_renderer.add_commands(
            Font.text(&self.text, self.font_size, self.color)
                .into_iter()
                .map(|command| command.translated(self.position)),
        );
    }
}
