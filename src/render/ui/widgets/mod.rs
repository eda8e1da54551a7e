//! Contains all widgets and the `Widget` trait for building user interfaces.

use glam::Vec2;

use super::uirenderer::UIRenderer;
use crate::{abs::GlBackend, input::MouseState};

/// Context provided to widgets during the update phase.
pub struct UpdateContext<'a> {
    pub mouse: &'a MouseState,
}

impl<'a> UpdateContext<'a> {
    pub fn new(mouse: &'a MouseState) -> Self {
        Self { mouse }
    }
}

/// Context provided to widgets during the layout phase.
pub struct LayoutContext {
    pub max_size: Vec2,
    pub cursor: Vec2,
}

/// A widget trait for building user interfaces.
pub trait Widget {
    /// Gives a hint of the desired size of the widget.
    fn size_hint(&self) -> Vec2 {
        Vec2::ZERO
    }

    /// Updates the widget state.
    fn update(&mut self, ctx: &UpdateContext);

    /// Places the widget at the cursor and returns the size it takes.
    fn layout(&mut self, ctx: &LayoutContext) -> Vec2;

    /// Draws the widget with the given UI renderer.
    fn draw<G: GlBackend>(&self, ui_renderer: &mut UIRenderer<G>);
}

pub mod label;
pub mod slider;

pub use label::*;
pub use slider::*;
