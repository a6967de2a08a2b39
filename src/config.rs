use crate::foundation::color::StrokeColor;
use crate::foundation::error::{DoodleError, DoodleResult};

/// Tunables for capture, classification, motion and rendering.
///
/// `Default` gives the classic doodle feel; every field can be
/// overridden from JSON.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Bounce acceleration in px/frame².
    pub gravity: f64,
    /// Fraction of vertical speed kept after hitting the floor.
    pub restitution: f64,
    /// Gap between a resting ball and the bottom edge.
    pub floor_margin: f64,
    /// Rainbow hue advance per captured point, in degrees.
    pub hue_step: f64,
    /// Strokes need strictly more points than this to be classified.
    pub min_classify_points: usize,
    /// Endpoint gap allowed relative to the smaller bbox side.
    pub closure_ratio: f64,
    /// Side difference allowed relative to the larger bbox side.
    pub squareness_ratio: f64,
    pub bob_amplitude: f64,
    pub bob_rate: f64,
    /// Per-stroke fall speed range for `rain`, px/ms.
    pub rain_speed: [f64; 2],
    /// Extra room above and below the canvas for the rain wrap-around.
    pub rain_pad: f64,
    pub fuzzy_dot_alpha: f64,
    pub fuzzy_outline_alpha: f64,
    /// Background painted under the strokes on readback; `None` keeps alpha.
    pub background: Option<StrokeColor>,
    /// Seed for per-stroke phases and speeds.
    pub seed: u64,
    /// Render dashed/dotted rainbow strokes solid (compositor workaround).
    pub force_solid_rainbow: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            gravity: 0.35,
            restitution: 0.58,
            floor_margin: 4.0,
            hue_step: 3.0,
            min_classify_points: 8,
            closure_ratio: 0.35,
            squareness_ratio: 0.35,
            bob_amplitude: 2.0,
            bob_rate: 0.002,
            rain_speed: [0.05, 0.12],
            rain_pad: 20.0,
            fuzzy_dot_alpha: 0.45,
            fuzzy_outline_alpha: 0.2,
            background: None,
            seed: 0x5EED_D00D,
            force_solid_rainbow: false,
        }
    }
}

impl EngineConfig {
    pub fn from_json(s: &str) -> DoodleResult<Self> {
        let cfg: Self = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> DoodleResult<()> {
        let finite = [
            ("gravity", self.gravity),
            ("restitution", self.restitution),
            ("floor_margin", self.floor_margin),
            ("hue_step", self.hue_step),
            ("closure_ratio", self.closure_ratio),
            ("squareness_ratio", self.squareness_ratio),
            ("bob_amplitude", self.bob_amplitude),
            ("bob_rate", self.bob_rate),
            ("rain_speed[0]", self.rain_speed[0]),
            ("rain_speed[1]", self.rain_speed[1]),
            ("rain_pad", self.rain_pad),
            ("fuzzy_dot_alpha", self.fuzzy_dot_alpha),
            ("fuzzy_outline_alpha", self.fuzzy_outline_alpha),
        ];
        for (name, v) in finite {
            if !v.is_finite() {
                return Err(DoodleError::validation(format!("{name} must be finite")));
            }
        }
        if !(self.restitution > 0.0 && self.restitution < 1.0) {
            return Err(DoodleError::validation("restitution must be in (0, 1)"));
        }
        if !(self.hue_step > 0.0 && self.hue_step < 360.0) {
            return Err(DoodleError::validation("hue_step must be in (0, 360)"));
        }
        if self.rain_speed[0] < 0.0 || self.rain_speed[0] > self.rain_speed[1] {
            return Err(DoodleError::validation(
                "rain_speed must be a non-negative [min, max] range",
            ));
        }
        if self.floor_margin < 0.0 || self.rain_pad < 0.0 {
            return Err(DoodleError::validation(
                "floor_margin and rain_pad must be >= 0",
            ));
        }
        for (name, a) in [
            ("fuzzy_dot_alpha", self.fuzzy_dot_alpha),
            ("fuzzy_outline_alpha", self.fuzzy_outline_alpha),
        ] {
            if !(0.0..=1.0).contains(&a) {
                return Err(DoodleError::validation(format!("{name} must be in [0, 1]")));
            }
        }
        Ok(())
    }
}
