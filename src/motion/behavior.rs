//! Per-frame procedural motion.
//!
//! Each frame runs in two steps: [`advance`] integrates the stateful behaviors
//! (`bounce` velocity, `rain` fall offset), then [`pose`] turns a stroke into
//! the geometry the brush draws. Time is elapsed milliseconds since animation
//! start; while not animating every stroke sits at its captured position.

use crate::config::EngineConfig;
use crate::foundation::core::{Affine, Canvas, Point, Vec2};
use crate::stroke::model::{Behavior, Scene, Stroke};

/// Rate of the `float`, `slide` and `zoom` clocks, per ms.
pub const SWAY_RATE: f64 = 0.003;
pub const FLOAT_AMPLITUDE: f64 = 6.0;
pub const SLIDE_AMPLITUDE: f64 = 10.0;
pub const ZOOM_AMPLITUDE: f64 = 0.12;
/// Upper bound on wiggle amplitude, px.
pub const JITTER_MAX: f64 = 10.0;
/// Period divisor of the ball "breathing" sinusoid, ms.
pub const BREATH_PERIOD: f64 = 140.0;
pub const MIN_BALL_RADIUS: f64 = 4.0;

/// Frame clock and surface extent seen by the behaviors.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MotionCtx {
    /// Elapsed ms since animation start; 0 when static.
    pub t: f64,
    /// Elapsed ms since the previous frame.
    pub dt: f64,
    pub animating: bool,
    pub canvas: Canvas,
}

impl MotionCtx {
    pub fn at_rest(canvas: Canvas) -> Self {
        Self {
            t: 0.0,
            dt: 0.0,
            animating: false,
            canvas,
        }
    }

    pub fn running(canvas: Canvas, t: f64, dt: f64) -> Self {
        Self {
            t,
            dt,
            animating: true,
            canvas,
        }
    }
}

/// What the brush should draw for a stroke this frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Pose {
    /// The captured points, mapped through `transform`, each jittered by up to `jitter_amp`.
    Path { transform: Affine, jitter_amp: f64 },
    /// A ring replacing the line entirely.
    Ball { center: Point, radius: f64 },
}

/// Shared vertical sway applied to every stroke while animating.
pub fn global_bob(ctx: &MotionCtx, cfg: &EngineConfig) -> f64 {
    if !ctx.animating {
        return 0.0;
    }
    (ctx.t * cfg.bob_rate).sin() * cfg.bob_amplitude
}

/// Lowest allowed ball center for a canvas of `height` px.
///
/// A floor that would lift the ball past the top edge is raised to its radius,
/// capped at `height` so the center always stays on the canvas.
pub fn bounce_floor(radius: f64, height: f64, margin: f64) -> f64 {
    (height - radius - margin).max(radius.min(height))
}

/// Per-point wiggle displacement for point index `i`.
pub fn jitter_offset(i: usize, t: f64, amp: f64) -> Vec2 {
    if amp == 0.0 {
        return Vec2::ZERO;
    }
    let i = i as f64;
    Vec2::new(
        (i * 0.35 + t * 0.008).sin() * amp * 0.6,
        (i * 0.33 + t * 0.009).cos() * amp * 0.6,
    )
}

/// Wiggle amplitude for a brush of `size`.
pub fn jitter_amplitude(size: f64, animating: bool) -> f64 {
    if animating {
        JITTER_MAX.min(size * 0.6)
    } else {
        0.0
    }
}

/// Result of one bounce integration step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BounceStep {
    pub floor: f64,
    /// Speed just before the floor reflected it, when the floor was hit.
    pub impact_speed: Option<f64>,
}

/// One gravity step for a closed stroke; the floor is recomputed from the
/// current canvas height every call.
pub fn step_bounce(stroke: &mut Stroke, height: f64, cfg: &EngineConfig) -> BounceStep {
    stroke.velocity_y += cfg.gravity;
    stroke.center.y += stroke.velocity_y;

    let floor = bounce_floor(stroke.radius, height, cfg.floor_margin);
    let mut impact_speed = None;
    if stroke.center.y > floor {
        impact_speed = Some(stroke.velocity_y);
        stroke.center.y = floor;
        stroke.velocity_y *= -cfg.restitution;
    }
    BounceStep {
        floor,
        impact_speed,
    }
}

/// Advance the time-dependent state of one stroke by one frame.
pub fn advance(stroke: &mut Stroke, ctx: &MotionCtx, cfg: &EngineConfig) {
    if !ctx.animating {
        return;
    }
    match stroke.behavior {
        Behavior::Bounce if stroke.closed => {
            step_bounce(stroke, ctx.canvas.height_f64(), cfg);
        }
        Behavior::Rain => {
            stroke.fall_offset += stroke.fall_speed * ctx.dt.max(0.0);
        }
        Behavior::Bounce
        | Behavior::Wiggle
        | Behavior::Float
        | Behavior::Slide
        | Behavior::Zoom => {}
    }
}

/// Single pass over the scene, in paint order.
pub fn advance_scene(scene: &mut Scene, ctx: &MotionCtx, cfg: &EngineConfig) {
    for stroke in scene.strokes_mut() {
        advance(stroke, ctx, cfg);
    }
}

/// Geometry for `stroke` at this frame; reads state, never mutates it.
pub fn pose(stroke: &Stroke, ctx: &MotionCtx, cfg: &EngineConfig) -> Pose {
    if !ctx.animating {
        return Pose::Path {
            transform: Affine::IDENTITY,
            jitter_amp: 0.0,
        };
    }

    let bob = global_bob(ctx, cfg);
    let phase = ctx.t * SWAY_RATE + stroke.seed;
    let local = match stroke.behavior {
        Behavior::Bounce if stroke.closed => {
            let breath = (ctx.t / BREATH_PERIOD).sin();
            return Pose::Ball {
                center: Point::new(stroke.center.x, stroke.center.y + bob),
                radius: MIN_BALL_RADIUS.max(stroke.radius - 1.0 + breath),
            };
        }
        Behavior::Wiggle => {
            return Pose::Path {
                transform: Affine::translate((0.0, bob)),
                jitter_amp: jitter_amplitude(stroke.size, true),
            };
        }
        // An open stroke drawn with the bounce tool has nothing to bounce.
        Behavior::Bounce => Affine::IDENTITY,
        Behavior::Float => Affine::translate((0.0, phase.sin() * FLOAT_AMPLITUDE)),
        Behavior::Rain => Affine::translate((
            0.0,
            stroke.rain_offset(ctx.canvas.height_f64(), cfg.rain_pad),
        )),
        Behavior::Slide => Affine::translate((phase.sin() * SLIDE_AMPLITUDE, 0.0)),
        Behavior::Zoom => {
            let k = 1.0 + ZOOM_AMPLITUDE * phase.sin();
            let c = stroke.center.to_vec2();
            Affine::translate(c) * Affine::scale(k) * Affine::translate(-c)
        }
    };

    Pose::Path {
        transform: Affine::translate((0.0, bob)) * local,
        jitter_amp: 0.0,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/motion/behavior.rs"]
mod tests;
