//! Magic Doodle is an animated freehand drawing engine.
//!
//! Strokes are captured as timestamped point sequences, classified once when
//! the gesture ends, and re-rendered every frame under a procedural motion
//! behavior and a brush style.
//!
//! # Pipeline overview
//!
//! 1. **Capture**: pointer samples → [`Stroke`] in a [`Scene`] (insertion order = paint order)
//! 2. **Classify**: closed, roughly round strokes become bouncing balls
//! 3. **Advance**: per frame, bounce and rain integrate their state
//! 4. **Render**: pose + brush → draw calls on a [`Surface`] → [`FrameRGBA`]
//!
//! [`Session`] ties these together behind pointer and frame-callback entry
//! points; [`DoodleScript`] replays recorded sessions deterministically.
//!
//! Pixels are **premultiplied RGBA8** end-to-end; [`Session::export_frame`]
//! converts to straight alpha for encoders.
#![forbid(unsafe_code)]

mod config;
mod foundation;
mod motion;
mod render;
mod script;
mod session;
mod stroke;

pub use config::EngineConfig;
pub use foundation::color::{PALETTE, RAINBOW_LIGHTNESS, StrokeColor, hsl_to_rgb, palette_color};
pub use foundation::core::{
    Affine, BezPath, BoundingBox, Canvas, Point, Rgba8Premul, StrokePoint, Vec2,
};
pub use foundation::error::{DoodleError, DoodleResult};
pub use foundation::math::{Rng64, keyed_rng};
pub use motion::behavior::{
    BounceStep, MotionCtx, Pose, advance, advance_scene, bounce_floor, global_bob,
    jitter_amplitude, jitter_offset, pose, step_bounce,
};
pub use render::brush::{draw_stroke, line_style, segment_color};
pub use render::cpu::CpuSurface;
pub use render::pipeline::render_scene;
pub use render::surface::{Composite, FrameRGBA, LineStyle, Surface, circle_path, polyline};
pub use script::{DEFAULT_FPS, DoodleScript, ScriptPlayer, Step};
pub use session::doodle::Session;
pub use session::frame_loop::{FrameLoop, FrameTick};
pub use stroke::capture::{HueCounter, StrokeCapture};
pub use stroke::classify::{ShapeClass, finalize, is_circle_like};
pub use stroke::model::{Behavior, BrushMode, Scene, Stroke, StrokeId, ToolState};
