use super::*;
use crate::render::surface::polyline;

fn surface(bg: Option<StrokeColor>) -> CpuSurface {
    CpuSurface::new(Canvas::new(64, 32).unwrap(), bg).unwrap()
}

fn read(s: &mut CpuSurface) -> FrameRGBA {
    let mut f = FrameRGBA::empty(s.canvas());
    s.read_frame(&mut f);
    f
}

fn hline(y: f64) -> BezPath {
    polyline([Point::new(4.0, y), Point::new(60.0, y)])
}

const RED: StrokeColor = StrokeColor::rgb8(255, 0, 0);

#[test]
fn empty_surface_reads_back_transparent() {
    let mut s = surface(None);
    let f = read(&mut s);
    assert_eq!((f.width, f.height), (64, 32));
    assert_eq!(f.data.len(), 64 * 32 * 4);
    assert!(f.premultiplied);
    assert!(f.is_blank());
}

#[test]
fn solid_stroke_covers_its_centerline() {
    let mut s = surface(None);
    s.stroke_path(
        &hline(16.0),
        Affine::IDENTITY,
        &LineStyle::solid(6.0),
        RED,
        Composite::Paint,
    );
    let f = read(&mut s);
    let px = f.pixel(32, 16).unwrap();
    assert!(px[3] > 250 && px[0] > 250 && px[1] < 5, "{px:?}");
    assert_eq!(f.pixel(32, 2).unwrap()[3], 0);
}

#[test]
fn transform_moves_the_draw() {
    let mut s = surface(None);
    s.stroke_path(
        &hline(4.0),
        Affine::translate((0.0, 20.0)),
        &LineStyle::solid(4.0),
        RED,
        Composite::Paint,
    );
    let f = read(&mut s);
    assert_eq!(f.pixel(32, 4).unwrap()[3], 0);
    assert!(f.pixel(32, 24).unwrap()[3] > 250);
}

#[test]
fn erase_removes_painted_pixels() {
    let mut s = surface(None);
    s.fill_circle(
        Point::new(32.0, 16.0),
        14.0,
        Affine::IDENTITY,
        RED,
        Composite::Paint,
    );
    s.stroke_path(
        &hline(16.0),
        Affine::IDENTITY,
        &LineStyle::solid(6.0),
        StrokeColor::rgb8(0, 255, 0),
        Composite::Erase,
    );
    let f = read(&mut s);
    assert!(f.pixel(32, 16).unwrap()[3] < 5);
    assert!(f.pixel(32, 8).unwrap()[3] > 250);
}

#[test]
fn clear_drops_pending_draws() {
    let mut s = surface(None);
    s.fill_circle(
        Point::new(10.0, 10.0),
        5.0,
        Affine::IDENTITY,
        RED,
        Composite::Paint,
    );
    s.clear();
    assert!(read(&mut s).is_blank());
}

#[test]
fn background_is_laid_under_strokes_and_shows_through_erasure() {
    let bg = StrokeColor::rgb8(0, 0, 255);
    let mut s = surface(Some(bg));
    s.fill_circle(
        Point::new(32.0, 16.0),
        12.0,
        Affine::IDENTITY,
        RED,
        Composite::Paint,
    );
    s.fill_circle(
        Point::new(32.0, 16.0),
        4.0,
        Affine::IDENTITY,
        RED,
        Composite::Erase,
    );
    let f = read(&mut s);
    assert_eq!(f.pixel(0, 0), Some([0, 0, 255, 255]));
    assert_eq!(f.pixel(32, 16), Some([0, 0, 255, 255]));
    let ring = f.pixel(32, 8).unwrap();
    assert!(ring[0] > 250 && ring[2] < 5);
}

#[test]
fn dashed_stroke_leaves_gaps() {
    let mut s = surface(None);
    s.stroke_path(
        &hline(16.0),
        Affine::IDENTITY,
        &LineStyle::dashed(2.0, 8.0, 8.0),
        RED,
        Composite::Paint,
    );
    let f = read(&mut s);
    let covered = (4..60)
        .filter(|&x| f.pixel(x, 16).unwrap()[3] > 128)
        .count();
    assert!(covered > 10 && covered < 50, "covered={covered}");
}

#[test]
fn zero_length_dashes_draw_round_dots() {
    let mut s = surface(None);
    s.stroke_path(
        &hline(16.0),
        Affine::IDENTITY,
        &LineStyle::dashed(4.0, 0.0, 14.0),
        RED,
        Composite::Paint,
    );
    let f = read(&mut s);
    // Dots at x = 4, 18, 32, 46, 60.
    for x in [4, 18, 32, 46] {
        assert!(f.pixel(x, 16).unwrap()[3] > 128, "x={x}");
    }
    assert_eq!(f.pixel(11, 16).unwrap()[3], 0);
    assert_eq!(f.pixel(25, 16).unwrap()[3], 0);
}

#[test]
fn dot_centers_carry_spacing_across_segments() {
    let path = polyline([
        Point::new(0.0, 0.0),
        Point::new(5.0, 0.0),
        Point::new(5.0, 10.0),
    ]);
    let dots = dot_centers(&path, 4.0);
    let expected = [(0.0, 0.0), (4.0, 0.0), (5.0, 3.0), (5.0, 7.0)];
    assert_eq!(dots.len(), expected.len());
    for (d, (x, y)) in dots.iter().zip(expected) {
        assert!((d.x - x).abs() < 1e-6 && (d.y - y).abs() < 1e-6, "{d:?}");
    }
    assert!(dot_centers(&path, 0.0).is_empty());
}

#[test]
fn resize_reallocates_and_rejects_oversize() {
    let mut s = surface(None);
    s.resize(Canvas::new(10, 12).unwrap()).unwrap();
    let f = read(&mut s);
    assert_eq!((f.width, f.height, f.data.len()), (10, 12, 10 * 12 * 4));
    assert!(
        s.resize(Canvas {
            width: 70_000,
            height: 1
        })
        .is_err()
    );
    assert!(CpuSurface::new(Canvas { width: 0, height: 4 }, None).is_err());
}
