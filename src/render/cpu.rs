use crate::foundation::color::StrokeColor;
use crate::foundation::core::{Affine, BezPath, Canvas, Point, Rgba8Premul};
use crate::foundation::error::{DoodleError, DoodleResult};
use crate::foundation::math::premul_over_px;
use crate::render::surface::{Composite, FrameRGBA, LineStyle, Surface, circle_path};

use vello_cpu::kurbo::{Cap, Join};
use vello_cpu::peniko::{BlendMode, Compose, Mix};

/// Tolerance below which a dash "on" length counts as a dot.
const DOT_EPSILON: f64 = 1e-6;

/// CPU raster surface powered by `vello_cpu`.
///
/// Draws accumulate in a render context and are rasterized on
/// [`Surface::read_frame`]. Strokes render on a transparent target so erasing
/// leaves real holes; an optional background is laid under on readback.
pub struct CpuSurface {
    canvas: Canvas,
    ctx: vello_cpu::RenderContext,
    pixmap: vello_cpu::Pixmap,
    background: Option<Rgba8Premul>,
}

impl std::fmt::Debug for CpuSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CpuSurface")
            .field("canvas", &self.canvas)
            .field("background", &self.background)
            .finish_non_exhaustive()
    }
}

impl CpuSurface {
    pub fn new(canvas: Canvas, background: Option<StrokeColor>) -> DoodleResult<Self> {
        let (w, h) = surface_dims(canvas)?;
        Ok(Self {
            canvas,
            ctx: vello_cpu::RenderContext::new(w, h),
            pixmap: vello_cpu::Pixmap::new(w, h),
            background: background.map(StrokeColor::to_rgba8_premul),
        })
    }

    /// Reallocate for a new canvas size; drawn content is dropped.
    pub fn resize(&mut self, canvas: Canvas) -> DoodleResult<()> {
        if canvas == self.canvas {
            return Ok(());
        }
        let (w, h) = surface_dims(canvas)?;
        self.canvas = canvas;
        self.ctx = vello_cpu::RenderContext::new(w, h);
        self.pixmap = vello_cpu::Pixmap::new(w, h);
        Ok(())
    }

    fn set_paint(&mut self, color: StrokeColor, composite: Composite) {
        let [r, g, b, a] = match composite {
            Composite::Paint => color.to_rgba8(),
            // Only coverage matters for destination-out.
            Composite::Erase => [0, 0, 0, 255],
        };
        self.ctx
            .set_paint(vello_cpu::peniko::Color::from_rgba8(r, g, b, a));
    }

    fn with_composite(&mut self, composite: Composite, draw: impl FnOnce(&mut Self)) {
        match composite {
            Composite::Paint => draw(self),
            Composite::Erase => {
                self.ctx
                    .push_blend_layer(BlendMode::new(Mix::Normal, Compose::DestOut));
                draw(self);
                self.ctx.pop_layer();
            }
        }
    }

    fn fill_dots(&mut self, path: &BezPath, gap: f64, radius: f64) {
        for c in dot_centers(path, gap) {
            self.ctx.fill_path(&bezpath_to_cpu(&circle_path(c, radius)));
        }
    }
}

impl Surface for CpuSurface {
    fn canvas(&self) -> Canvas {
        self.canvas
    }

    fn clear(&mut self) {
        self.ctx.reset();
    }

    fn stroke_path(
        &mut self,
        path: &BezPath,
        transform: Affine,
        style: &LineStyle,
        color: StrokeColor,
        composite: Composite,
    ) {
        if !(style.width > 0.0) {
            return;
        }
        self.ctx.set_transform(affine_to_cpu(transform));
        self.set_paint(color, composite);
        self.with_composite(composite, |this| match style.dash {
            Some([on, off]) if on <= DOT_EPSILON => {
                this.fill_dots(path, on + off, style.width * 0.5);
            }
            dash => {
                let mut stroke = vello_cpu::kurbo::Stroke::new(style.width)
                    .with_caps(Cap::Round)
                    .with_join(Join::Round);
                if let Some([on, off]) = dash {
                    stroke = stroke.with_dashes(0.0, [on, off]);
                }
                this.ctx.set_stroke(stroke);
                this.ctx.stroke_path(&bezpath_to_cpu(path));
            }
        });
    }

    fn fill_circle(
        &mut self,
        center: Point,
        radius: f64,
        transform: Affine,
        color: StrokeColor,
        composite: Composite,
    ) {
        if !(radius > 0.0) {
            return;
        }
        self.ctx.set_transform(affine_to_cpu(transform));
        self.set_paint(color, composite);
        let path = bezpath_to_cpu(&circle_path(center, radius));
        self.with_composite(composite, |this| this.ctx.fill_path(&path));
    }

    fn read_frame(&mut self, out: &mut FrameRGBA) {
        self.pixmap.data_as_u8_slice_mut().fill(0);
        self.ctx.flush();
        self.ctx.render_to_pixmap(&mut self.pixmap);

        let bytes = self.pixmap.data_as_u8_slice();
        out.width = self.canvas.width;
        out.height = self.canvas.height;
        out.premultiplied = true;
        out.data.clear();
        out.data.extend_from_slice(bytes);

        if let Some(bg) = self.background {
            let bg = bg.to_array();
            for px in out.data.chunks_exact_mut(4) {
                let over = premul_over_px(bg, [px[0], px[1], px[2], px[3]]);
                px.copy_from_slice(&over);
            }
        }
    }
}

fn surface_dims(canvas: Canvas) -> DoodleResult<(u16, u16)> {
    let w: u16 = canvas
        .width
        .try_into()
        .map_err(|_| DoodleError::render("surface width exceeds u16"))?;
    let h: u16 = canvas
        .height
        .try_into()
        .map_err(|_| DoodleError::render("surface height exceeds u16"))?;
    if w == 0 || h == 0 {
        return Err(DoodleError::render("surface dimensions must be > 0"));
    }
    Ok((w, h))
}

/// Points spaced `gap` apart along `path`, starting at its first point.
///
/// Spacing carries across segments the way a dash pattern does.
pub(crate) fn dot_centers(path: &BezPath, gap: f64) -> Vec<Point> {
    use kurbo::{ParamCurve as _, ParamCurveArclen as _};

    let mut out = Vec::new();
    if !(gap > 0.0) {
        return out;
    }
    const ACCURACY: f64 = 1e-3;
    // Distance along the current segment of the next dot.
    let mut next = 0.0;
    for seg in path.segments() {
        let len = seg.arclen(ACCURACY);
        while next <= len {
            let t = if len > 0.0 {
                seg.inv_arclen(next, ACCURACY)
            } else {
                0.0
            };
            out.push(seg.eval(t));
            next += gap;
        }
        next -= len;
    }
    out
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::LineTo(p) => out.line_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::QuadTo(p1, p2) => out.quad_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
            ),
            PathEl::CurveTo(p1, p2, p3) => out.curve_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
                vello_cpu::kurbo::Point::new(p3.x, p3.y),
            ),
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
