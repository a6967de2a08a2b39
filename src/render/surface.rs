use crate::foundation::color::StrokeColor;
use crate::foundation::core::{Affine, BezPath, Canvas, Point};

/// A rendered frame as RGBA8 pixels.
///
/// Frames read back from a surface are **premultiplied**; [`FrameRGBA::to_straight`]
/// converts for image encoders.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether the `data` is premultiplied alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    pub fn empty(canvas: Canvas) -> Self {
        Self {
            width: canvas.width,
            height: canvas.height,
            data: vec![0; canvas.pixel_count() * 4],
            premultiplied: true,
        }
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        self.data.get(i..i + 4).map(|p| [p[0], p[1], p[2], p[3]])
    }

    /// Copy with straight (non-premultiplied) alpha.
    pub fn to_straight(&self) -> FrameRGBA {
        let mut out = self.clone();
        if out.premultiplied {
            crate::foundation::math::unpremultiply_rgba8_in_place(&mut out.data);
            out.premultiplied = false;
        }
        out
    }

    pub fn is_blank(&self) -> bool {
        self.data.chunks_exact(4).all(|p| p[3] == 0)
    }
}

/// How a draw call combines with pixels already on the surface.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Composite {
    /// Source-over painting.
    #[default]
    Paint,
    /// Destination-out: covered pixels lose alpha, color is ignored.
    Erase,
}

/// Stroke geometry settings. Caps and joins are always round.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineStyle {
    pub width: f64,
    /// `[on, off]` lengths; a zero `on` length draws round dots.
    pub dash: Option<[f64; 2]>,
}

impl LineStyle {
    pub fn solid(width: f64) -> Self {
        Self { width, dash: None }
    }

    pub fn dashed(width: f64, on: f64, off: f64) -> Self {
        Self {
            width,
            dash: Some([on, off]),
        }
    }
}

/// The 2D raster target strokes are painted on.
///
/// Every draw call carries its own transform; nothing leaks between calls.
pub trait Surface {
    fn canvas(&self) -> Canvas;

    /// Drop everything drawn so far.
    fn clear(&mut self);

    fn stroke_path(
        &mut self,
        path: &BezPath,
        transform: Affine,
        style: &LineStyle,
        color: StrokeColor,
        composite: Composite,
    );

    fn fill_circle(
        &mut self,
        center: Point,
        radius: f64,
        transform: Affine,
        color: StrokeColor,
        composite: Composite,
    );

    /// Rasterize pending draws into `out`, resizing it when needed.
    fn read_frame(&mut self, out: &mut FrameRGBA);
}

/// Open polyline through `points`.
pub fn polyline(points: impl IntoIterator<Item = Point>) -> BezPath {
    let mut path = BezPath::new();
    for (i, p) in points.into_iter().enumerate() {
        if i == 0 {
            path.move_to(p);
        } else {
            path.line_to(p);
        }
    }
    path
}

/// Closed circle outline.
pub fn circle_path(center: Point, radius: f64) -> BezPath {
    use kurbo::Shape as _;
    kurbo::Circle::new(center, radius).to_path(0.1)
}
