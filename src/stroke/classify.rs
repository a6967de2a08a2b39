use crate::config::EngineConfig;
use crate::stroke::model::{Behavior, Stroke};

/// Outcome of finishing a stroke.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShapeClass {
    /// Too few samples to judge.
    Unclassified,
    Open,
    /// Circle-like loop, promoted to a bouncing ball.
    Closed,
}

/// True when the endpoints nearly meet and the bounds are roughly square.
pub fn is_circle_like(stroke: &Stroke, cfg: &EngineConfig) -> bool {
    let (Some(a), Some(b)) = (stroke.points.first(), stroke.points.last()) else {
        return false;
    };
    let w = stroke.bbox.width();
    let h = stroke.bbox.height();
    let dist = a.distance(*b);
    if !(w.is_finite() && h.is_finite() && dist.is_finite()) {
        return false;
    }
    dist < w.min(h) * cfg.closure_ratio && (w - h).abs() < w.max(h) * cfg.squareness_ratio
}

/// Finalize a stroke once: record its pivot and promote closed loops to `bounce`.
///
/// Calling this again on a finished stroke is a no-op.
#[tracing::instrument(level = "debug", skip_all, fields(points = stroke.points.len()))]
pub fn finalize(stroke: &mut Stroke, cfg: &EngineConfig) -> ShapeClass {
    if stroke.finished {
        return if stroke.closed {
            ShapeClass::Closed
        } else {
            ShapeClass::Open
        };
    }
    stroke.finished = true;
    stroke.center = stroke.bbox.center();

    if stroke.points.len() <= cfg.min_classify_points {
        tracing::debug!("stroke too short to classify");
        return ShapeClass::Unclassified;
    }

    if !is_circle_like(stroke, cfg) {
        tracing::debug!(behavior = ?stroke.behavior, "open stroke");
        return ShapeClass::Open;
    }

    stroke.closed = true;
    stroke.radius = (stroke.bbox.width() + stroke.bbox.height()) / 4.0;
    stroke.velocity_y = 0.0;
    stroke.behavior = Behavior::Bounce;
    tracing::debug!(
        cx = stroke.center.x,
        cy = stroke.center.y,
        r = stroke.radius,
        "closed stroke promoted to bounce"
    );
    ShapeClass::Closed
}

#[cfg(test)]
#[path = "../../tests/unit/stroke/classify.rs"]
mod tests;
