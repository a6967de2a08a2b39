use crate::config::EngineConfig;
use crate::foundation::core::{Canvas, StrokePoint};
use crate::foundation::error::DoodleResult;
use crate::motion::behavior::{MotionCtx, advance_scene};
use crate::render::cpu::CpuSurface;
use crate::render::pipeline::render_scene;
use crate::render::surface::{FrameRGBA, Surface};
use crate::session::frame_loop::FrameLoop;
use crate::stroke::capture::StrokeCapture;
use crate::stroke::classify::ShapeClass;
use crate::stroke::model::{Scene, StrokeId, ToolState};

/// One drawing canvas: input capture, animation clock and pixels.
///
/// All mutation happens through `&mut self`, so a capture step always
/// completes before the next frame renders. The last rendered frame is kept
/// in a reused buffer and exposed through [`Session::frame`].
#[derive(Debug)]
pub struct Session {
    cfg: EngineConfig,
    canvas: Canvas,
    tool: ToolState,
    scene: Scene,
    capture: StrokeCapture,
    frame_loop: FrameLoop,
    surface: CpuSurface,
    frame: FrameRGBA,
}

impl Session {
    /// Build a session and render its first (empty) static frame.
    pub fn new(canvas: Canvas, cfg: EngineConfig) -> DoodleResult<Self> {
        cfg.validate()?;
        let surface = CpuSurface::new(canvas, cfg.background)?;
        let mut session = Self {
            capture: StrokeCapture::new(&cfg),
            cfg,
            canvas,
            tool: ToolState::default(),
            scene: Scene::new(),
            frame_loop: FrameLoop::new(),
            surface,
            frame: FrameRGBA::empty(canvas),
        };
        session.render_static();
        Ok(session)
    }

    pub fn config(&self) -> &EngineConfig {
        &self.cfg
    }

    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    pub fn tool(&self) -> &ToolState {
        &self.tool
    }

    /// Tool commands apply to the next stroke; rainbow also affects the current one.
    pub fn tool_mut(&mut self) -> &mut ToolState {
        &mut self.tool
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Hue the next rainbow sample will start from.
    pub fn hue(&self) -> f64 {
        self.capture.hue()
    }

    pub fn is_drawing(&self) -> bool {
        self.capture.is_active()
    }

    pub fn is_animating(&self) -> bool {
        self.frame_loop.is_running()
    }

    /// Last rendered frame, premultiplied.
    pub fn frame(&self) -> &FrameRGBA {
        &self.frame
    }

    /// Input began: start a stroke from the current tool state.
    pub fn pointer_down(&mut self, point: StrokePoint) -> StrokeId {
        let id = self
            .capture
            .begin(&mut self.scene, point, &self.tool, &self.cfg);
        self.redraw_if_static();
        id
    }

    /// Input moved; ignored when no stroke is active.
    pub fn pointer_move(&mut self, point: StrokePoint) -> bool {
        let appended = self.capture.append(&mut self.scene, point, &self.tool);
        if appended {
            self.redraw_if_static();
        }
        appended
    }

    /// Input ended: finish and classify the stroke; ignored when none is active.
    pub fn pointer_up(&mut self) -> Option<ShapeClass> {
        let (_, class) = self.capture.end(&mut self.scene, &self.cfg)?;
        self.redraw_if_static();
        Some(class)
    }

    /// A cancelled gesture keeps what was drawn and finishes like a release.
    pub fn pointer_cancel(&mut self) -> Option<ShapeClass> {
        self.pointer_up()
    }

    /// Switch the frame loop. Stopping renders one final frame at rest.
    pub fn set_animating(&mut self, on: bool) {
        if on {
            if self.frame_loop.start() {
                tracing::debug!("animation started");
            }
        } else if self.frame_loop.stop() {
            tracing::debug!("animation stopped");
            self.render_static();
        }
    }

    /// Flip the animation state and return the new one.
    pub fn toggle_animation(&mut self) -> bool {
        let on = !self.is_animating();
        self.set_animating(on);
        on
    }

    /// Scheduled frame callback at host time `now` (ms).
    ///
    /// Advances the behaviors and re-renders the whole scene. Returns `false`
    /// without touching anything while static.
    pub fn on_frame(&mut self, now: f64) -> bool {
        let Some(tick) = self.frame_loop.tick(now) else {
            return false;
        };
        let ctx = MotionCtx::running(self.canvas, tick.t, tick.dt);
        advance_scene(&mut self.scene, &ctx, &self.cfg);
        self.render(&ctx);
        true
    }

    /// Render every stroke at its captured position.
    pub fn render_static(&mut self) {
        self.render(&MotionCtx::at_rest(self.canvas));
    }

    /// Adopt a new canvas size. Bounce floors follow on the next frame.
    pub fn resize(&mut self, canvas: Canvas) -> DoodleResult<()> {
        self.surface.resize(canvas)?;
        self.canvas = canvas;
        tracing::debug!(width = canvas.width, height = canvas.height, "canvas resized");
        self.render_static();
        Ok(())
    }

    /// Drop every stroke, including one still being drawn.
    pub fn clear(&mut self) {
        self.scene.clear();
        self.capture.reset();
        tracing::debug!("scene cleared");
        self.render_static();
    }

    /// One static frame with straight alpha, ready for an image encoder.
    ///
    /// The animation state is left as it was; a running loop repaints on its
    /// next tick.
    pub fn export_frame(&mut self) -> FrameRGBA {
        self.render_static();
        self.frame.to_straight()
    }

    fn redraw_if_static(&mut self) {
        if !self.frame_loop.is_running() {
            self.render_static();
        }
    }

    fn render(&mut self, ctx: &MotionCtx) {
        render_scene(&mut self.surface, &self.scene, ctx, &self.cfg);
        self.surface.read_frame(&mut self.frame);
        tracing::trace!(t = ctx.t, animating = ctx.animating, "frame rendered");
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/doodle.rs"]
mod tests;
