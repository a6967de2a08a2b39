//! Brush rendering: turns a posed stroke into surface draw calls.
//!
//! Behavior and brush mode compose orthogonally, with two exceptions: a
//! bouncing ball is always a plain ring, and erasing always draws one solid
//! destructive line whatever the mode or coloring.

use crate::config::EngineConfig;
use crate::foundation::color::StrokeColor;
use crate::foundation::core::{Affine, Point};
use crate::foundation::math::keyed_rng;
use crate::motion::behavior::{Pose, jitter_offset};
use crate::render::surface::{Composite, LineStyle, Surface, polyline};
use crate::stroke::model::{BrushMode, Stroke};

/// Scatter samples are taken every `FUZZY_STRIDE` points.
pub const FUZZY_STRIDE: usize = 2;
pub const FUZZY_DOTS_PER_SAMPLE: usize = 3;
/// Hue spread between dots of one fuzzy sample, degrees.
pub const FUZZY_DOT_HUE_SPREAD: f64 = 8.0;

/// Line style for a non-fuzzy brush mode.
pub fn line_style(mode: BrushMode, size: f64) -> LineStyle {
    match mode {
        BrushMode::Dashed => LineStyle::dashed(size, 2.0 * size, 1.4 * size),
        BrushMode::Dotted => LineStyle::dashed(size, 0.0, 1.6 * size),
        BrushMode::Normal | BrushMode::Fuzzy => LineStyle::solid(size),
    }
}

/// Rainbow color of segment `i`: hue grows along the stroke.
pub fn segment_color(stroke: &Stroke, i: usize, cfg: &EngineConfig) -> StrokeColor {
    StrokeColor::rainbow(stroke.hue_start + i as f64 * cfg.hue_step)
}

/// Color of a fuzzy dot `k` at sample index `i`.
pub fn fuzzy_dot_color(stroke: &Stroke, i: usize, k: usize, cfg: &EngineConfig) -> StrokeColor {
    if stroke.rainbow {
        StrokeColor::rainbow(
            stroke.hue_start + i as f64 * cfg.hue_step + k as f64 * FUZZY_DOT_HUE_SPREAD,
        )
    } else {
        stroke.color
    }
}

/// Color for whole-stroke draws (paths, outlines, balls).
fn base_color(stroke: &Stroke) -> StrokeColor {
    if stroke.rainbow {
        StrokeColor::rainbow(stroke.hue_start)
    } else {
        stroke.color
    }
}

/// Captured points with the wiggle displacement applied, in stroke space.
pub fn jittered_points(stroke: &Stroke, t: f64, jitter_amp: f64) -> Vec<Point> {
    stroke
        .points
        .iter()
        .enumerate()
        .map(|(i, p)| p.pos() + jitter_offset(i, t, jitter_amp))
        .collect()
}

/// Draw one stroke in its pose at animation time `t`.
pub fn draw_stroke<S: Surface + ?Sized>(
    surface: &mut S,
    stroke: &Stroke,
    pose: Pose,
    t: f64,
    cfg: &EngineConfig,
) {
    let composite = if stroke.erase {
        Composite::Erase
    } else {
        Composite::Paint
    };

    let (transform, jitter_amp) = match pose {
        Pose::Ball { center, radius } => {
            surface.stroke_path(
                &crate::render::surface::circle_path(center, radius),
                Affine::IDENTITY,
                &LineStyle::solid(stroke.size),
                base_color(stroke),
                composite,
            );
            return;
        }
        Pose::Path {
            transform,
            jitter_amp,
        } => (transform, jitter_amp),
    };

    if stroke.points.len() < 2 {
        return;
    }
    let pts = jittered_points(stroke, t, jitter_amp);

    if stroke.erase {
        surface.stroke_path(
            &polyline(pts),
            transform,
            &LineStyle::solid(stroke.size),
            stroke.color,
            Composite::Erase,
        );
        return;
    }

    match stroke.mode {
        BrushMode::Fuzzy => draw_fuzzy(surface, stroke, &pts, transform, cfg),
        BrushMode::Normal | BrushMode::Dashed | BrushMode::Dotted => {
            if stroke.rainbow {
                let mode = if cfg.force_solid_rainbow {
                    BrushMode::Normal
                } else {
                    stroke.mode
                };
                let style = line_style(mode, stroke.size);
                for i in 1..pts.len() {
                    surface.stroke_path(
                        &polyline([pts[i - 1], pts[i]]),
                        transform,
                        &style,
                        segment_color(stroke, i, cfg),
                        Composite::Paint,
                    );
                }
            } else {
                surface.stroke_path(
                    &polyline(pts),
                    transform,
                    &line_style(stroke.mode, stroke.size),
                    stroke.color,
                    Composite::Paint,
                );
            }
        }
    }
}

/// Faint outline plus a stable scatter of translucent dots.
fn draw_fuzzy<S: Surface + ?Sized>(
    surface: &mut S,
    stroke: &Stroke,
    pts: &[Point],
    transform: Affine,
    cfg: &EngineConfig,
) {
    let alpha = base_color(stroke).alpha();
    surface.stroke_path(
        &polyline(pts.iter().copied()),
        transform,
        &LineStyle::solid((stroke.size * 0.35).max(1.0)),
        base_color(stroke).with_alpha(alpha * cfg.fuzzy_outline_alpha),
        Composite::Paint,
    );

    let spread = stroke.size * 0.5;
    let seed = stroke.seed.to_bits();
    for (i, p) in pts.iter().enumerate().step_by(FUZZY_STRIDE) {
        for k in 0..FUZZY_DOTS_PER_SAMPLE {
            let mut rng = keyed_rng(seed, (i * FUZZY_DOTS_PER_SAMPLE + k) as u64);
            let c = Point::new(p.x + rng.signed() * spread, p.y + rng.signed() * spread);
            let r = (stroke.size * rng.range(0.12, 0.3)).max(0.5);
            let color = fuzzy_dot_color(stroke, i, k, cfg);
            surface.fill_circle(
                c,
                r,
                transform,
                color.with_alpha(color.alpha() * cfg.fuzzy_dot_alpha),
                Composite::Paint,
            );
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/brush.rs"]
mod tests;
