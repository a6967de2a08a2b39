use super::*;
use crate::stroke::model::{Behavior, BrushMode};

fn p(x: f64, y: f64) -> StrokePoint {
    StrokePoint::new(x, y, 0.0)
}

#[test]
fn hue_counter_returns_to_start_after_full_turn() {
    let mut hue = HueCounter::new(3.0);
    let start = hue.value();
    for _ in 0..120 {
        hue.advance();
    }
    assert_eq!(hue.value(), start);
}

#[test]
fn move_and_end_without_active_stroke_are_ignored() {
    let cfg = EngineConfig::default();
    let tool = ToolState::default();
    let mut scene = Scene::new();
    let mut cap = StrokeCapture::new(&cfg);

    assert!(!cap.append(&mut scene, p(1.0, 1.0), &tool));
    assert!(cap.end(&mut scene, &cfg).is_none());
    assert!(scene.is_empty());
}

#[test]
fn begin_snapshots_tool_and_records_first_point() {
    let cfg = EngineConfig::default();
    let tool = ToolState {
        behavior: Behavior::Float,
        mode: BrushMode::Fuzzy,
        size: 6.0,
        ..ToolState::default()
    };
    let mut scene = Scene::new();
    let mut cap = StrokeCapture::new(&cfg);

    let id = cap.begin(&mut scene, p(3.0, 4.0), &tool, &cfg);
    assert_eq!(cap.current(), Some(id));
    let s = scene.get(id).unwrap();
    assert_eq!(s.points.len(), 1);
    assert_eq!(s.behavior, Behavior::Float);
    assert_eq!(s.mode, BrushMode::Fuzzy);
    assert_eq!(s.size, 6.0);
    assert!((0.0..std::f64::consts::TAU).contains(&s.seed));
    assert!(s.fall_speed >= cfg.rain_speed[0] && s.fall_speed <= cfg.rain_speed[1]);
}

#[test]
fn end_clears_handle_and_finalizes() {
    let cfg = EngineConfig::default();
    let tool = ToolState::default();
    let mut scene = Scene::new();
    let mut cap = StrokeCapture::new(&cfg);

    let id = cap.begin(&mut scene, p(0.0, 0.0), &tool, &cfg);
    for i in 1..20 {
        cap.append(&mut scene, p(i as f64 * 10.0, 0.0), &tool);
    }
    let (ended, class) = cap.end(&mut scene, &cfg).unwrap();
    assert_eq!(ended, id);
    assert_eq!(class, ShapeClass::Open);
    assert!(!cap.is_active());
    let s = scene.get(id).unwrap();
    assert!(s.is_finished());
    assert!(!s.closed);
    assert_eq!(s.behavior, Behavior::Wiggle);
    assert!(cap.end(&mut scene, &cfg).is_none());
}

#[test]
fn rainbow_stroke_records_start_hue_and_advances_per_point() {
    let cfg = EngineConfig::default();
    let mut tool = ToolState::default();
    tool.toggle_rainbow();
    let mut scene = Scene::new();
    let mut cap = StrokeCapture::new(&cfg);

    let h0 = cap.hue();
    let id = cap.begin(&mut scene, p(0.0, 0.0), &tool, &cfg);
    for i in 1..50 {
        cap.append(&mut scene, p(i as f64, (i as f64).sin()), &tool);
    }
    let s = scene.get(id).unwrap();
    assert!(s.rainbow);
    assert_eq!(s.hue_start, h0);
    assert_eq!(s.points.len(), 50);
    assert_eq!(cap.hue(), (h0 + 50.0 * 3.0) % 360.0);
}

#[test]
fn enabling_rainbow_mid_stroke_marks_current_stroke() {
    let cfg = EngineConfig::default();
    let mut tool = ToolState::default();
    let mut scene = Scene::new();
    let mut cap = StrokeCapture::new(&cfg);

    let id = cap.begin(&mut scene, p(0.0, 0.0), &tool, &cfg);
    cap.append(&mut scene, p(1.0, 0.0), &tool);
    assert!(!scene.get(id).unwrap().rainbow);
    assert_eq!(cap.hue(), 0.0);

    tool.toggle_rainbow();
    cap.append(&mut scene, p(2.0, 0.0), &tool);
    assert!(scene.get(id).unwrap().rainbow);
    assert_eq!(cap.hue(), 3.0);
}

#[test]
fn second_begin_finishes_previous_stroke() {
    let cfg = EngineConfig::default();
    let tool = ToolState::default();
    let mut scene = Scene::new();
    let mut cap = StrokeCapture::new(&cfg);

    let a = cap.begin(&mut scene, p(0.0, 0.0), &tool, &cfg);
    let b = cap.begin(&mut scene, p(5.0, 5.0), &tool, &cfg);
    assert_ne!(a, b);
    assert!(scene.get(a).unwrap().is_finished());
    assert!(!scene.get(b).unwrap().is_finished());
    assert_eq!(scene.len(), 2);
}

#[test]
fn strokes_get_distinct_phases() {
    let cfg = EngineConfig::default();
    let tool = ToolState::default();
    let mut scene = Scene::new();
    let mut cap = StrokeCapture::new(&cfg);
    let a = cap.begin(&mut scene, p(0.0, 0.0), &tool, &cfg);
    cap.end(&mut scene, &cfg);
    let b = cap.begin(&mut scene, p(0.0, 0.0), &tool, &cfg);
    assert_ne!(scene.get(a).unwrap().seed, scene.get(b).unwrap().seed);
}
