//! JSON doodle scripts: recorded gestures and clock steps replayed on a [`Session`].
//!
//! A script carries its own virtual clock, so replay is deterministic: the
//! same script always renders the same frames.

use std::f64::consts::TAU;

use crate::config::EngineConfig;
use crate::foundation::color::{StrokeColor, palette_color};
use crate::foundation::core::{Canvas, StrokePoint};
use crate::foundation::error::{DoodleError, DoodleResult};
use crate::session::doodle::Session;
use crate::stroke::model::{Behavior, BrushMode, ToolState};

/// Default replay frame rate.
pub const DEFAULT_FPS: f64 = 60.0;

fn default_fps() -> f64 {
    DEFAULT_FPS
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DoodleScript {
    pub canvas: Canvas,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<EngineConfig>,
    /// Tool state before the first step.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool: Option<ToolState>,
    #[serde(default)]
    pub steps: Vec<Step>,
}

/// One replay step.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Step {
    /// Change tool selections; unset fields keep their value.
    ///
    /// `color` is applied first and turns rainbow off, like picking a palette chip.
    Tool {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        color: Option<StrokeColor>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        size: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        behavior: Option<Behavior>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        mode: Option<BrushMode>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        rainbow: Option<bool>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        erase: Option<bool>,
    },
    /// One gesture from press to release. Point times are relative to the step.
    Stroke { points: Vec<StrokePoint> },
    Animate { on: bool },
    /// Move the clock forward `ms`, rendering a frame every `1000 / fps` ms.
    Advance {
        ms: f64,
        #[serde(default = "default_fps")]
        fps: f64,
    },
    Clear,
}

impl Step {
    fn validate(&self) -> DoodleResult<()> {
        match self {
            Self::Tool { size, .. } => {
                if let Some(size) = size
                    && !(size.is_finite() && *size > 0.0)
                {
                    return Err(DoodleError::validation("tool size must be finite and > 0"));
                }
            }
            Self::Stroke { points } => {
                if points.is_empty() {
                    return Err(DoodleError::validation("stroke needs at least one point"));
                }
                if points
                    .iter()
                    .any(|p| !(p.x.is_finite() && p.y.is_finite() && p.t.is_finite()))
                {
                    return Err(DoodleError::validation("stroke points must be finite"));
                }
            }
            Self::Advance { ms, fps } => {
                if !(ms.is_finite() && *ms >= 0.0) {
                    return Err(DoodleError::validation("advance ms must be finite and >= 0"));
                }
                if !(fps.is_finite() && *fps > 0.0) {
                    return Err(DoodleError::validation("advance fps must be finite and > 0"));
                }
            }
            Self::Animate { .. } | Self::Clear => {}
        }
        Ok(())
    }
}

impl DoodleScript {
    pub fn from_json(s: &str) -> DoodleResult<Self> {
        let script: Self = serde_json::from_str(s)?;
        script.validate()?;
        Ok(script)
    }

    pub fn to_json_pretty(&self) -> DoodleResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> DoodleResult<()> {
        Canvas::new(self.canvas.width, self.canvas.height)?;
        if let Some(cfg) = &self.config {
            cfg.validate()?;
        }
        for (i, step) in self.steps.iter().enumerate() {
            step.validate()
                .map_err(|e| DoodleError::validation(format!("step {i}: {e}")))?;
        }
        Ok(())
    }

    /// Fresh session sized and configured for this script.
    pub fn session(&self) -> DoodleResult<Session> {
        let canvas = Canvas::new(self.canvas.width, self.canvas.height)?;
        let mut session = Session::new(canvas, self.config.clone().unwrap_or_default())?;
        if let Some(tool) = &self.tool {
            *session.tool_mut() = tool.clone();
        }
        Ok(session)
    }

    /// A few strokes exercising every behavior, then half a second of animation.
    pub fn demo(canvas: Canvas) -> Self {
        let w = canvas.width_f64();
        let h = canvas.height_f64();
        let unit = w.min(h);

        let tool = |color: &str, behavior: Behavior, mode: BrushMode| Step::Tool {
            color: Some(palette_color(color).unwrap_or_default()),
            size: Some((unit * 0.02).max(2.0)),
            behavior: Some(behavior),
            mode: Some(mode),
            rainbow: None,
            erase: None,
        };
        let sampled = |n: usize, f: &dyn Fn(f64) -> (f64, f64)| Step::Stroke {
            points: (0..n)
                .map(|i| {
                    let u = i as f64 / (n - 1) as f64;
                    let (x, y) = f(u);
                    StrokePoint::new(x, y, i as f64 * 16.0)
                })
                .collect(),
        };

        let steps = vec![
            tool("sky", Behavior::Float, BrushMode::Normal),
            sampled(40, &|u| {
                (w * (0.1 + 0.8 * u), h * 0.2 + (u * TAU * 2.0).sin() * unit * 0.05)
            }),
            Step::Tool {
                color: None,
                size: None,
                behavior: Some(Behavior::Wiggle),
                mode: Some(BrushMode::Dashed),
                rainbow: Some(true),
                erase: None,
            },
            sampled(30, &|u| {
                let zig = if (u * 12.0) as usize % 2 == 0 { 1.0 } else { -1.0 };
                (w * (0.1 + 0.8 * u), h * 0.45 + zig * unit * 0.04)
            }),
            tool("pink", Behavior::Wiggle, BrushMode::Normal),
            sampled(24, &|u| {
                let a = u * TAU;
                (w * 0.3 + a.cos() * unit * 0.12, h * 0.7 + a.sin() * unit * 0.12)
            }),
            tool("yellow", Behavior::Rain, BrushMode::Dotted),
            sampled(12, &|u| (w * 0.6, h * (0.55 + 0.2 * u))),
            tool("lime", Behavior::Zoom, BrushMode::Fuzzy),
            sampled(20, &|u| {
                (w * (0.72 + 0.16 * u), h * 0.75 + (u * TAU).sin() * unit * 0.05)
            }),
            Step::Animate { on: true },
            Step::Advance {
                ms: 500.0,
                fps: DEFAULT_FPS,
            },
        ];

        Self {
            canvas,
            config: None,
            tool: None,
            steps,
        }
    }
}

/// Replays steps against a session on a virtual clock (ms).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScriptPlayer {
    clock: f64,
}

impl ScriptPlayer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clock(&self) -> f64 {
        self.clock
    }

    /// Apply every step in order. `on_frame` sees each animated frame.
    #[tracing::instrument(level = "debug", skip_all, fields(steps = steps.len()))]
    pub fn play<F>(
        &mut self,
        session: &mut Session,
        steps: &[Step],
        mut on_frame: F,
    ) -> DoodleResult<()>
    where
        F: FnMut(&Session, f64) -> DoodleResult<()>,
    {
        for step in steps {
            self.apply(session, step, &mut on_frame)?;
        }
        Ok(())
    }

    pub fn apply<F>(
        &mut self,
        session: &mut Session,
        step: &Step,
        on_frame: &mut F,
    ) -> DoodleResult<()>
    where
        F: FnMut(&Session, f64) -> DoodleResult<()>,
    {
        step.validate()?;
        match step {
            Step::Tool {
                color,
                size,
                behavior,
                mode,
                rainbow,
                erase,
            } => {
                let tool = session.tool_mut();
                if let Some(c) = color {
                    tool.select_color(*c);
                }
                if let Some(r) = rainbow {
                    tool.rainbow = *r;
                }
                if let Some(s) = size {
                    tool.set_size(*s);
                }
                if let Some(b) = behavior {
                    tool.set_behavior(*b);
                }
                if let Some(m) = mode {
                    tool.set_mode(*m);
                }
                if let Some(e) = erase {
                    tool.set_erase(*e);
                }
            }
            Step::Stroke { points } => {
                let at = |p: &StrokePoint| StrokePoint::new(p.x, p.y, self.clock + p.t);
                let mut iter = points.iter();
                if let Some(first) = iter.next() {
                    session.pointer_down(at(first));
                    for p in iter {
                        session.pointer_move(at(p));
                    }
                    session.pointer_up();
                }
            }
            Step::Animate { on } => {
                let was = session.is_animating();
                session.set_animating(*on);
                // The first frame after starting pins the animation origin to now.
                if *on && !was && session.on_frame(self.clock) {
                    on_frame(session, self.clock)?;
                }
            }
            Step::Advance { ms, fps } => self.advance(session, *ms, *fps, on_frame)?,
            Step::Clear => session.clear(),
        }
        Ok(())
    }

    /// Move the clock by `ms`, ticking the session every `1000 / fps` ms.
///
/// A trailing partial interval moves the clock without rendering.
    pub fn advance<F>(
        &mut self,
        session: &mut Session,
        ms: f64,
        fps: f64,
        on_frame: &mut F,
    ) -> DoodleResult<()>
    where
        F: FnMut(&Session, f64) -> DoodleResult<()>,
    {
        let step = 1000.0 / fps;
        let start = self.clock;
        let end = start + ms;
        // Never tick past `end`; the epsilon keeps exact multiples of `step`.
        let frames = (ms / step + 1e-9).floor() as u64;
        for i in 1..=frames {
            self.clock = (start + i as f64 * step).min(end);
            if session.on_frame(self.clock) {
                on_frame(session, self.clock)?;
            }
        }
        self.clock = end;
        Ok(())
    }
}

impl Session {
    /// Replay `script`'s steps on this session and return the final clock.
    pub fn run_script(&mut self, script: &DoodleScript) -> DoodleResult<f64> {
        script.validate()?;
        if let Some(tool) = &script.tool {
            *self.tool_mut() = tool.clone();
        }
        let mut player = ScriptPlayer::new();
        player.play(self, &script.steps, |_, _| Ok(()))?;
        Ok(player.clock())
    }
}

#[cfg(test)]
#[path = "../tests/unit/script.rs"]
mod tests;
