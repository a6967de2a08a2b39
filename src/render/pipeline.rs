use crate::config::EngineConfig;
use crate::motion::behavior::{MotionCtx, pose};
use crate::render::brush::draw_stroke;
use crate::render::surface::Surface;
use crate::stroke::model::Scene;

/// Clear the surface and draw every stroke in insertion order.
///
/// Later strokes paint over earlier ones; erase strokes cut through whatever
/// was drawn before them. Reads the scene only, so two renders with the same
/// `ctx` draw the same calls.
#[tracing::instrument(level = "trace", skip_all, fields(strokes = scene.len(), t = ctx.t))]
pub fn render_scene<S: Surface + ?Sized>(
    surface: &mut S,
    scene: &Scene,
    ctx: &MotionCtx,
    cfg: &EngineConfig,
) {
    surface.clear();
    for stroke in scene.strokes() {
        draw_stroke(surface, stroke, pose(stroke, ctx, cfg), ctx.t, cfg);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/pipeline.rs"]
mod tests;
