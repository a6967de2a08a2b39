use crate::config::EngineConfig;
use crate::foundation::core::StrokePoint;
use crate::foundation::math::Rng64;
use crate::stroke::classify::{ShapeClass, finalize};
use crate::stroke::model::{Scene, Stroke, StrokeId, ToolState};

/// Rainbow hue counter, in degrees. Advances once per captured point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HueCounter {
    value: f64,
    step: f64,
}

impl HueCounter {
    pub fn new(step: f64) -> Self {
        Self { value: 0.0, step }
    }

    pub fn value(self) -> f64 {
        self.value
    }

    pub fn advance(&mut self) -> f64 {
        self.value = (self.value + self.step).rem_euclid(360.0);
        self.value
    }
}

/// Turns begin/move/end signals into strokes in a [`Scene`].
///
/// Owns the "current stroke" handle, the rainbow hue counter and the
/// generator for per-stroke motion parameters.
#[derive(Clone, Debug)]
pub struct StrokeCapture {
    current: Option<StrokeId>,
    hue: HueCounter,
    rng: Rng64,
}

impl StrokeCapture {
    pub fn new(cfg: &EngineConfig) -> Self {
        Self {
            current: None,
            hue: HueCounter::new(cfg.hue_step),
            rng: Rng64::new(cfg.seed),
        }
    }

    pub fn current(&self) -> Option<StrokeId> {
        self.current
    }

    pub fn is_active(&self) -> bool {
        self.current.is_some()
    }

    pub fn hue(&self) -> f64 {
        self.hue.value()
    }

    /// Start a stroke styled from `tool` and record its first sample.
    ///
    /// A stroke still in progress is finished first.
    pub fn begin(
        &mut self,
        scene: &mut Scene,
        point: StrokePoint,
        tool: &ToolState,
        cfg: &EngineConfig,
    ) -> StrokeId {
        if self.current.is_some() {
            self.end(scene, cfg);
        }

        let mut stroke = Stroke::new(tool, self.hue.value());
        stroke.seed = self.rng.range(0.0, std::f64::consts::TAU);
        stroke.fall_speed = self.rng.range(cfg.rain_speed[0], cfg.rain_speed[1]);

        let id = scene.push(stroke);
        self.current = Some(id);
        tracing::trace!(stroke = id.0, behavior = ?tool.behavior, "stroke begin");
        self.append(scene, point, tool);
        id
    }

    /// Record a sample on the current stroke; no-op without one.
    ///
    /// With rainbow on, the hue counter advances and the stroke turns rainbow
    /// from here on even if it started plain.
    pub fn append(&mut self, scene: &mut Scene, point: StrokePoint, tool: &ToolState) -> bool {
        let Some(stroke) = self.current.and_then(|id| scene.get_mut(id)) else {
            return false;
        };
        if tool.rainbow {
            self.hue.advance();
            stroke.rainbow = true;
        }
        stroke.push_point(point);
        true
    }

    /// Finish and classify the current stroke; no-op without one.
    pub fn end(&mut self, scene: &mut Scene, cfg: &EngineConfig) -> Option<(StrokeId, ShapeClass)> {
        let id = self.current.take()?;
        let stroke = scene.get_mut(id)?;
        let class = finalize(stroke, cfg);
        tracing::debug!(stroke = id.0, ?class, "stroke end");
        Some((id, class))
    }

    /// Forget the current stroke without classifying it (its scene was cleared).
    pub fn reset(&mut self) {
        self.current = None;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/stroke/capture.rs"]
mod tests;
