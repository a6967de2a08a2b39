//! Static/Running animation clock.
//!
//! The loop owns no timer: the host calls [`FrameLoop::tick`] once per display
//! refresh and gets back the elapsed time to render, or `None` while static.

/// Clock values for one scheduled frame, in ms.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameTick {
    /// Elapsed time since the first frame after `start`.
    pub t: f64,
    /// Time since the previous frame; 0 on the first.
    pub dt: f64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
enum LoopState {
    #[default]
    Static,
    Running {
        origin: Option<f64>,
        last: f64,
    },
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameLoop {
    state: LoopState,
}

impl FrameLoop {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, LoopState::Running { .. })
    }

    /// Static → Running. The next tick's timestamp becomes the origin.
    ///
    /// Returns `false` if the loop was already running.
    pub fn start(&mut self) -> bool {
        if self.is_running() {
            return false;
        }
        self.state = LoopState::Running {
            origin: None,
            last: 0.0,
        };
        true
    }

    /// Running → Static. Returns `false` if the loop was already static.
    pub fn stop(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }
        self.state = LoopState::Static;
        true
    }

    /// Clock for a frame at host time `now`; `None` while static.
    ///
    /// Timestamps that run backwards are treated as no time passing.
    pub fn tick(&mut self, now: f64) -> Option<FrameTick> {
        let LoopState::Running { origin, last } = &mut self.state else {
            return None;
        };
        let Some(o) = *origin else {
            *origin = Some(now);
            *last = now;
            return Some(FrameTick { t: 0.0, dt: 0.0 });
        };
        let dt = (now - *last).max(0.0);
        *last = last.max(now);
        Some(FrameTick {
            t: (*last - o).max(0.0),
            dt,
        })
    }
}
