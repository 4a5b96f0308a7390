//! Frame-loop abstraction.
//!
//! What happens in a frame lives behind [`FrameLoop`]; how the next frame is
//! requested belongs to whoever drives a [`RenderLoop`]. The driver hands
//! [`RenderLoop::tick`] a scheduling callback, and the loop calls it before
//! doing any work so the cadence never depends on how long a frame takes.
//!
//! ```text
//!   Idle ──start (frame 0)──▶ Running ──tick (Continue)──▶ Running
//!                      │
//!                      └──tick (Stop | Err)────▶ Halted
//! ```

use crate::error::RenderError;

/// Whether a frame wants another one after it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Stop,
}

/// Per-frame work, invoked with a monotonically increasing timestamp in
/// milliseconds.
pub trait FrameLoop {
    fn frame(&mut self, timestamp: f64) -> Result<LoopControl, RenderError>;
}

/// Lifecycle of a [`RenderLoop`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopState {
    /// Built, first frame not yet requested.
    Idle,
    Running,
    /// Stopped for good; no further frames are requested.
    Halted,
}

/// Drives a [`FrameLoop`] one scheduled frame at a time.
pub struct RenderLoop<L> {
    name: String,
    inner: L,
    state: LoopState,
}

impl<L: FrameLoop> RenderLoop<L> {
    pub fn new(name: impl Into<String>, inner: L) -> Self {
        Self {
            name: name.into(),
            inner,
            state: LoopState::Idle,
        }
    }

    /// Moves `Idle → Running` and runs the first frame right away with
    /// timestamp `0.0`, which issues the first scheduling call.
    ///
    /// Returns `false` if the loop was already started or halted, or if the
    /// first frame halted it.
    pub fn start(&mut self, request_frame: impl FnOnce()) -> bool {
        if self.state != LoopState::Idle {
            return false;
        }
        self.state = LoopState::Running;
        log::info!("{}: render loop started", self.name);
        self.tick(0.0, request_frame)
    }

    /// Runs one frame if the loop is running.
    ///
    /// The next frame is requested first; a `Stop` result or an error then
    /// halts the loop. Errors are logged here and never retried. Returns
    /// whether the loop is still running afterwards.
    pub fn tick(&mut self, timestamp: f64, request_frame: impl FnOnce()) -> bool {
        if self.state != LoopState::Running {
            return false;
        }

        request_frame();

        match self.inner.frame(timestamp) {
            Ok(LoopControl::Continue) => true,
            Ok(LoopControl::Stop) => {
                log::info!("{}: render loop stopped", self.name);
                self.state = LoopState::Halted;
                false
            }
            Err(e) => {
                log::error!("{}: frame failed, halting: {}", self.name, e);
                self.state = LoopState::Halted;
                false
            }
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn inner(&self) -> &L {
        &self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    /// Records timestamps and returns a scripted result per frame.
    struct Scripted {
        seen: Vec<f64>,
        stop_after: Option<usize>,
        fail_after: Option<usize>,
    }

    impl Scripted {
        fn forever() -> Self {
            Self {
                seen: Vec::new(),
                stop_after: None,
                fail_after: None,
            }
        }
    }

    impl FrameLoop for Scripted {
        fn frame(&mut self, timestamp: f64) -> Result<LoopControl, RenderError> {
            self.seen.push(timestamp);
            if self.fail_after == Some(self.seen.len()) {
                return Err(RenderError::Shader("boom".into()));
            }
            if self.stop_after == Some(self.seen.len()) {
                return Ok(LoopControl::Stop);
            }
            Ok(LoopControl::Continue)
        }
    }

    #[test]
    fn idle_until_started() {
        let mut lp = RenderLoop::new("test", Scripted::forever());
        assert_eq!(lp.state(), LoopState::Idle);

        let mut requested = 0;
        assert!(!lp.tick(1.0, || requested += 1));
        assert_eq!(requested, 0);
        assert!(lp.inner().seen.is_empty());

        assert!(lp.start(|| requested += 1));
        assert_eq!(lp.state(), LoopState::Running);
        assert_eq!(requested, 1);
        assert!(!lp.start(|| requested += 1));
        assert_eq!(requested, 1);
    }

    #[test]
    fn start_renders_frame_zero_synchronously() {
        let mut lp = RenderLoop::new("test", Scripted::forever());
        assert!(lp.start(|| {}));
        assert_eq!(lp.inner().seen, vec![0.0]);

        assert!(lp.tick(16.0, || {}));
        assert_eq!(lp.inner().seen, vec![0.0, 16.0]);
    }

    #[test]
    fn every_tick_requests_the_next_frame_first() {
        let events = RefCell::new(Vec::new());

        struct Logged<'a>(&'a RefCell<Vec<String>>);

        impl FrameLoop for Logged<'_> {
            fn frame(&mut self, timestamp: f64) -> Result<LoopControl, RenderError> {
                self.0.borrow_mut().push(format!("frame {timestamp}"));
                Ok(LoopControl::Continue)
            }
        }

        let mut lp = RenderLoop::new("test", Logged(&events));
        lp.start(|| events.borrow_mut().push("request".to_string()));
        assert!(lp.tick(16.0, || events.borrow_mut().push("request".to_string())));
        assert!(lp.tick(32.0, || events.borrow_mut().push("request".to_string())));
        drop(lp);

        assert_eq!(
            events.into_inner(),
            vec!["request", "frame 0", "request", "frame 16", "request", "frame 32"]
        );
    }

    #[test]
    fn stop_halts_for_good() {
        let mut lp = RenderLoop::new(
            "test",
            Scripted {
                stop_after: Some(2),
                ..Scripted::forever()
            },
        );
        assert!(lp.start(|| {}));
        assert!(!lp.tick(1.0, || {}));
        assert_eq!(lp.state(), LoopState::Halted);

        let mut requested = false;
        assert!(!lp.tick(2.0, || requested = true));
        assert!(!requested);
        assert_eq!(lp.inner().seen, vec![0.0, 1.0]);
    }

    #[test]
    fn error_halts_without_retry() {
        let mut lp = RenderLoop::new(
            "test",
            Scripted {
                fail_after: Some(2),
                ..Scripted::forever()
            },
        );
        assert!(lp.start(|| {}));
        assert!(!lp.tick(1.0, || {}));
        assert_eq!(lp.state(), LoopState::Halted);
        assert!(!lp.tick(2.0, || {}));
        assert_eq!(lp.inner().seen.len(), 2);
    }

    #[test]
    fn failing_first_frame_halts_on_start() {
        let mut lp = RenderLoop::new(
            "test",
            Scripted {
                fail_after: Some(1),
                ..Scripted::forever()
            },
        );
        let mut requested = 0;
        assert!(!lp.start(|| requested += 1));
        assert_eq!(lp.state(), LoopState::Halted);
        assert_eq!(requested, 1);
        assert!(!lp.start(|| requested += 1));
        assert_eq!(lp.inner().seen, vec![0.0]);
    }
}
