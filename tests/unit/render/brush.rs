use super::*;
use crate::foundation::core::{Canvas, StrokePoint, Vec2};
use crate::render::recording::{Call, RecordingSurface};
use crate::stroke::model::{Behavior, ToolState};

fn rec() -> RecordingSurface {
    RecordingSurface::new(Canvas::new(200, 200).unwrap())
}

fn line_stroke(tool: ToolState, n: usize) -> Stroke {
    let pts = (0..n).map(|i| StrokePoint::new(10.0 + i as f64 * 5.0, 50.0, i as f64));
    let mut s = Stroke::from_points(&tool, pts);
    s.seed = 0.25;
    s
}

fn at_rest() -> Pose {
    Pose::Path {
        transform: Affine::IDENTITY,
        jitter_amp: 0.0,
    }
}

#[test]
fn normal_stroke_is_one_continuous_path() {
    let cfg = EngineConfig::default();
    let mut surf = rec();
    let s = line_stroke(ToolState::default(), 6);
    draw_stroke(&mut surf, &s, at_rest(), 0.0, &cfg);
    assert_eq!(surf.calls.len(), 1);
    let Call::Stroke {
        points,
        style,
        color,
        composite,
        ..
    } = &surf.calls[0]
    else {
        panic!("expected stroke");
    };
    assert_eq!(points.len(), 6);
    assert_eq!(*style, LineStyle::solid(s.size));
    assert_eq!(*color, s.color);
    assert_eq!(*composite, Composite::Paint);
}

#[test]
fn dash_patterns_scale_with_size() {
    assert_eq!(line_style(BrushMode::Dashed, 5.0).dash, Some([10.0, 7.0]));
    assert_eq!(line_style(BrushMode::Dotted, 5.0).dash, Some([0.0, 8.0]));
    assert_eq!(line_style(BrushMode::Normal, 5.0).dash, None);
}

#[test]
fn single_point_stroke_draws_nothing() {
    let cfg = EngineConfig::default();
    let mut surf = rec();
    let s = line_stroke(ToolState::default(), 1);
    draw_stroke(&mut surf, &s, at_rest(), 0.0, &cfg);
    assert!(surf.calls.is_empty());
}

#[test]
fn rainbow_draws_progressive_segments() {
    let cfg = EngineConfig::default();
    let mut surf = rec();
    let mut s = line_stroke(
        ToolState {
            rainbow: true,
            mode: BrushMode::Dashed,
            ..ToolState::default()
        },
        5,
    );
    s.hue_start = 350.0;
    draw_stroke(&mut surf, &s, at_rest(), 0.0, &cfg);
    let calls: Vec<_> = surf.strokes().collect();
    assert_eq!(calls.len(), 4);
    for (idx, call) in calls.iter().enumerate() {
        let i = idx + 1;
        let Call::Stroke {
            points,
            color,
            style,
            ..
        } = call
        else {
            unreachable!()
        };
        assert_eq!(points.len(), 2);
        assert_eq!(
            color.to_rgba8(),
            StrokeColor::rainbow((350.0 + i as f64 * 3.0) % 360.0).to_rgba8()
        );
        assert_eq!(style.dash, Some([2.0 * s.size, 1.4 * s.size]));
    }
    // Hue keeps progressing past the wrap.
    let Call::Stroke { color: last, .. } = calls[3] else {
        unreachable!()
    };
    assert!(matches!(*last, StrokeColor::Hsl { h, .. } if (h - 2.0).abs() < 1e-9));
}

#[test]
fn forced_solid_rainbow_drops_dashes() {
    let cfg = EngineConfig {
        force_solid_rainbow: true,
        ..EngineConfig::default()
    };
    let mut surf = rec();
    let s = line_stroke(
        ToolState {
            rainbow: true,
            mode: BrushMode::Dotted,
            ..ToolState::default()
        },
        4,
    );
    draw_stroke(&mut surf, &s, at_rest(), 0.0, &cfg);
    assert_eq!(surf.strokes().count(), 3);
    assert!(surf.strokes().all(|c| matches!(
        c,
        Call::Stroke { style, .. } if style.dash.is_none()
    )));
}

#[test]
fn erase_is_always_one_solid_destructive_line() {
    let cfg = EngineConfig::default();
    for mode in [
        BrushMode::Normal,
        BrushMode::Fuzzy,
        BrushMode::Dashed,
        BrushMode::Dotted,
    ] {
        let mut surf = rec();
        let s = line_stroke(
            ToolState {
                erase: true,
                rainbow: true,
                mode,
                ..ToolState::default()
            },
            8,
        );
        draw_stroke(&mut surf, &s, at_rest(), 0.0, &cfg);
        assert_eq!(surf.calls.len(), 1, "{mode:?}");
        let Call::Stroke {
            points,
            style,
            composite,
            ..
        } = &surf.calls[0]
        else {
            panic!("expected stroke");
        };
        assert_eq!(points.len(), 8);
        assert_eq!(style.dash, None);
        assert_eq!(*composite, Composite::Erase);
    }
}

#[test]
fn fuzzy_scatters_three_dots_every_other_point() {
    let cfg = EngineConfig::default();
    let mut surf = rec();
    let s = line_stroke(
        ToolState {
            mode: BrushMode::Fuzzy,
            size: 10.0,
            ..ToolState::default()
        },
        9,
    );
    draw_stroke(&mut surf, &s, at_rest(), 0.0, &cfg);
    // Samples at 0, 2, 4, 6, 8.
    assert_eq!(surf.circles().count(), 5 * 3);
    assert_eq!(surf.strokes().count(), 1);
    let Call::Stroke { color, .. } = &surf.calls[0] else {
        panic!("outline first");
    };
    assert!(color.alpha() < 0.5);
    for c in surf.circles() {
        let Call::Circle {
            radius,
            color,
            center,
            ..
        } = c
        else {
            unreachable!()
        };
        assert!(*radius >= 1.2 && *radius <= 3.0);
        assert!((color.alpha() - cfg.fuzzy_dot_alpha).abs() < 1e-12);
        assert!((center.y - 50.0).abs() <= 5.0);
    }
}

#[test]
fn fuzzy_scatter_is_stable_between_renders() {
    let cfg = EngineConfig::default();
    let s = line_stroke(
        ToolState {
            mode: BrushMode::Fuzzy,
            ..ToolState::default()
        },
        10,
    );
    let mut a = rec();
    let mut b = rec();
    draw_stroke(&mut a, &s, at_rest(), 0.0, &cfg);
    draw_stroke(&mut b, &s, at_rest(), 0.0, &cfg);
    assert_eq!(a.calls, b.calls);
}

#[test]
fn rainbow_fuzzy_dots_spread_hue() {
    let cfg = EngineConfig::default();
    let mut s = line_stroke(
        ToolState {
            mode: BrushMode::Fuzzy,
            rainbow: true,
            ..ToolState::default()
        },
        4,
    );
    s.hue_start = 10.0;
    let c = fuzzy_dot_color(&s, 2, 1, &cfg);
    assert!(matches!(c, StrokeColor::Hsl { h, .. } if (h - (10.0 + 6.0 + 8.0)).abs() < 1e-9));
}

#[test]
fn wiggle_jitter_moves_points_only_when_amplitude_set() {
    let s = line_stroke(ToolState::default(), 5);
    let still = jittered_points(&s, 250.0, 0.0);
    assert!(still.iter().zip(&s.points).all(|(a, b)| *a == b.pos()));
    let moved = jittered_points(&s, 250.0, 4.0);
    for (i, (a, b)) in moved.iter().zip(&s.points).enumerate() {
        assert_eq!(*a, b.pos() + jitter_offset(i, 250.0, 4.0));
    }
    assert_ne!(moved, still);
}

#[test]
fn ball_pose_draws_ring_ignoring_mode() {
    let cfg = EngineConfig::default();
    let mut surf = rec();
    let mut s = line_stroke(
        ToolState {
            behavior: Behavior::Bounce,
            mode: BrushMode::Dotted,
            ..ToolState::default()
        },
        12,
    );
    s.closed = true;
    let pose = Pose::Ball {
        center: Point::new(40.0, 60.0),
        radius: 12.0,
    };
    draw_stroke(&mut surf, &s, pose, 100.0, &cfg);
    assert_eq!(surf.calls.len(), 1);
    let Call::Stroke {
        points,
        style,
        transform,
        ..
    } = &surf.calls[0]
    else {
        panic!("expected ring stroke");
    };
    assert_eq!(style.dash, None);
    assert_eq!(*transform, Affine::IDENTITY);
    assert!(points.iter().any(|p| (p.x - 52.0).abs() < 1e-6));
}

#[test]
fn pose_transform_is_passed_through() {
    let cfg = EngineConfig::default();
    let mut surf = rec();
    let s = line_stroke(ToolState::default(), 3);
    let tr = Affine::translate(Vec2::new(0.0, 7.0));
    draw_stroke(
        &mut surf,
        &s,
        Pose::Path {
            transform: tr,
            jitter_amp: 0.0,
        },
        0.0,
        &cfg,
    );
    assert!(matches!(&surf.calls[0], Call::Stroke { transform, .. } if *transform == tr));
}
