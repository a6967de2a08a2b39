use crate::foundation::color::StrokeColor;
use crate::foundation::core::{BoundingBox, Point, StrokePoint};

/// Per-frame procedural motion applied to a stroke.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Behavior {
    /// Per-point sinusoidal jitter, applied by the brush.
    #[default]
    Wiggle,
    /// Falling ball with inelastic floor bounces; closed strokes only.
    Bounce,
    /// Gentle vertical sway.
    Float,
    /// Endless fall with vertical wrap-around.
    Rain,
    /// Gentle horizontal sway.
    Slide,
    /// Pulsing scale about the stroke centroid.
    Zoom,
}

/// Static line style, orthogonal to [`Behavior`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BrushMode {
    #[default]
    Normal,
    Fuzzy,
    Dashed,
    Dotted,
}

/// Current tool selections, snapshotted into each new stroke.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ToolState {
    pub color: StrokeColor,
    pub size: f64,
    pub behavior: Behavior,
    pub mode: BrushMode,
    pub rainbow: bool,
    pub erase: bool,
}

impl Default for ToolState {
    fn default() -> Self {
        Self {
            color: StrokeColor::default(),
            size: 8.0,
            behavior: Behavior::default(),
            mode: BrushMode::default(),
            rainbow: false,
            erase: false,
        }
    }
}

impl ToolState {
    pub const MIN_SIZE: f64 = 0.5;

    /// Picking a solid color leaves rainbow mode.
    pub fn select_color(&mut self, color: StrokeColor) {
        self.color = color;
        self.rainbow = false;
    }

    pub fn toggle_rainbow(&mut self) -> bool {
        self.rainbow = !self.rainbow;
        self.rainbow
    }

    pub fn set_size(&mut self, size: f64) {
        self.size = if size.is_finite() {
            size.max(Self::MIN_SIZE)
        } else {
            Self::MIN_SIZE
        };
    }

    pub fn set_behavior(&mut self, behavior: Behavior) {
        self.behavior = behavior;
    }

    pub fn set_mode(&mut self, mode: BrushMode) {
        self.mode = mode;
    }

    pub fn set_erase(&mut self, erase: bool) {
        self.erase = erase;
    }
}

/// One continuous gesture plus its style and animation state.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Stroke {
    pub points: Vec<StrokePoint>,
    pub color: StrokeColor,
    pub size: f64,
    pub bbox: BoundingBox,
    pub behavior: Behavior,
    pub mode: BrushMode,
    pub closed: bool,
    pub rainbow: bool,
    /// Hue counter value when the stroke began, in degrees.
    pub hue_start: f64,
    pub erase: bool,
    /// Bounce vertical speed, px/frame.
    pub velocity_y: f64,
    /// Ball center for `bounce`, pivot for `zoom`. Tracks the bbox center
    /// until the stroke is finished.
    pub center: Point,
    pub radius: f64,
    /// Phase offset in radians.
    pub seed: f64,
    /// `rain` speed, px/ms.
    pub fall_speed: f64,
    /// Accumulated `rain` displacement, px.
    pub fall_offset: f64,
    pub(crate) finished: bool,
}

impl Stroke {
    /// Empty stroke styled from `tool`; motion parameters start neutral.
    pub fn new(tool: &ToolState, hue_start: f64) -> Self {
        Self {
            points: Vec::new(),
            color: tool.color,
            size: tool.size.max(ToolState::MIN_SIZE),
            bbox: BoundingBox::EMPTY,
            behavior: tool.behavior,
            mode: tool.mode,
            closed: false,
            rainbow: tool.rainbow,
            hue_start,
            erase: tool.erase,
            velocity_y: 0.0,
            center: Point::ZERO,
            radius: 0.0,
            seed: 0.0,
            fall_speed: 0.0,
            fall_offset: 0.0,
            finished: false,
        }
    }

    /// Build a finished stroke from a point list without classifying it.
    pub fn from_points(tool: &ToolState, points: impl IntoIterator<Item = StrokePoint>) -> Self {
        let mut s = Self::new(tool, 0.0);
        for p in points {
            s.push_point(p);
        }
        s.finished = true;
        s
    }

    pub fn push_point(&mut self, p: StrokePoint) {
        self.points.push(p);
        self.bbox.include(p);
        if !self.finished {
            self.center = self.bbox.center();
        }
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Vertical `rain` displacement for a canvas of `height` px.
    pub fn rain_offset(&self, height: f64, pad: f64) -> f64 {
        let span = height + 2.0 * pad;
        if span <= 0.0 {
            return 0.0;
        }
        self.fall_offset.rem_euclid(span) - pad
    }
}

/// Handle to a stroke in a [`Scene`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct StrokeId(pub usize);

/// Ordered stroke collection; insertion order is paint order.
///
/// Strokes are only ever appended or cleared all at once.
#[derive(Clone, Debug, Default)]
pub struct Scene {
    strokes: Vec<Stroke>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, stroke: Stroke) -> StrokeId {
        self.strokes.push(stroke);
        StrokeId(self.strokes.len() - 1)
    }

    pub fn clear(&mut self) {
        self.strokes.clear();
    }

    pub fn len(&self) -> usize {
        self.strokes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty()
    }

    pub fn get(&self, id: StrokeId) -> Option<&Stroke> {
        self.strokes.get(id.0)
    }

    pub(crate) fn get_mut(&mut self, id: StrokeId) -> Option<&mut Stroke> {
        self.strokes.get_mut(id.0)
    }

    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    pub(crate) fn strokes_mut(&mut self) -> &mut [Stroke] {
        &mut self.strokes
    }

    pub fn last(&self) -> Option<&Stroke> {
        self.strokes.last()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/stroke/model.rs"]
mod tests;
