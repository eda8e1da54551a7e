//! The frame loop.

use crate::{
    abs::{App, GlBackend},
    camera::Camera,
    config::Config,
    error::Error,
    frame::{FrameClock, FrameState, FrameTiming, OFFSET_RANGE},
    input::InputState,
    render::{Compositor, DebugOverlay, DebugPanel, Overlay},
};

/// Renders one frame. Only presentation is left to the caller.
pub fn render_frame<G: GlBackend, O: Overlay>(
    compositor: &Compositor<G>,
    overlay: &mut O,
    camera: &mut Camera,
    input: &InputState,
    timing: FrameTiming,
    fps: f32,
    state: &mut FrameState,
) {
    input.apply_to(camera, timing.delta);
    camera.update();

    compositor.clear();
    overlay.begin_frame(&input.mouse);
    compositor.draw(camera, timing.elapsed, state.user_offset());

    let edited = overlay.debug_panel(&DebugPanel {
        label: ":)",
        fps,
        value_label: "y_translate",
        value: state.user_offset(),
        range: OFFSET_RANGE,
    });
    state.set_user_offset(edited);

    overlay.end_frame();
}

/// The window, the scene and everything the loop carries between frames.
///
/// Fields drop in declaration order, so the scene resources go before the overlay and the
/// GL context goes last.
pub struct Viewer {
    compositor: Compositor,
    overlay: DebugOverlay,
    camera: Camera,
    input: InputState,
    clock: FrameClock,
    frame: FrameState,
    app: App,
}

impl Viewer {
    pub fn new(config: &Config) -> Result<Self, Error> {
        let app = App::new(&config.window)?;
        let viewport = app.drawable_size();

        let compositor =
            Compositor::new(&app.gl, &config.texture, config.background(), viewport)?;
        let overlay = DebugOverlay::new(&app.gl, viewport)?;

        Ok(Self {
            compositor,
            overlay,
            camera: Camera::default(),
            input: InputState::default(),
            clock: FrameClock::new(),
            frame: FrameState::default(),
            app,
        })
    }

    /// Runs until Escape is pressed or the window is closed.
    pub fn run(&mut self) {
        log::info!("entering frame loop");
        while !self.input.should_close() {
            self.input.begin_frame();
            for event in self.app.event_pump.poll_iter() {
                self.input.handle_event(&event);
            }
            if self.input.take_resize().is_some() {
                let (width, height) = self.app.drawable_size();
                self.compositor.resize(width, height);
                self.overlay.resize(width, height);
            }

            let timing = self.clock.tick();
            render_frame(
                &self.compositor,
                &mut self.overlay,
                &mut self.camera,
                &self.input,
                timing,
                self.clock.fps(),
                &mut self.frame,
            );
            self.app.window.gl_swap_window();
        }
        log::info!("frame loop finished");
    }
}
