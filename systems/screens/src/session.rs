//! Frame driver that owns the current screen.

use std::{collections::VecDeque, time::Duration};

use might_and_magic_core::InputEvent;
use rand::Rng;

use crate::{
    tick, transition, Flow, Screen, ScreenConfig, ScreenContext, ScreenLayout, ScreenView,
};

/// Result of pumping a single frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameStatus {
    /// The loop should render and continue.
    Running,
    /// The process should end.
    Terminated,
}

/// Owns the current screen and everything needed to advance it.
#[derive(Debug)]
pub struct Session<R> {
    screen: Option<Screen>,
    pending: VecDeque<InputEvent>,
    rng: R,
    config: ScreenConfig,
    layout: ScreenLayout,
}

impl<R: Rng> Session<R> {
    /// Starts a session on the intro screen at `now`.
    #[must_use]
    pub fn new(rng: R, config: ScreenConfig, now: Duration) -> Self {
        Self {
            screen: Some(Screen::intro(now)),
            pending: VecDeque::new(),
            rng,
            config,
            layout: ScreenLayout::default(),
        }
    }

    /// Processes one frame: a bounded batch of events followed by a tick.
    ///
    /// Events beyond [`ScreenConfig::max_events_per_frame`] stay queued for the
    /// following frames, except that a queued terminate request ends the
    /// session at once. Once terminated, every later frame reports
    /// [`FrameStatus::Terminated`] and input is discarded.
    pub fn frame<I>(&mut self, events: I, now: Duration) -> FrameStatus
    where
        I: IntoIterator<Item = InputEvent>,
    {
        let Some(mut screen) = self.screen.take() else {
            self.pending.clear();
            return FrameStatus::Terminated;
        };

        self.pending.extend(events);
        if self
            .pending
            .iter()
            .any(|event| matches!(event, InputEvent::Terminate))
        {
            tracing::info!(
                discarded = self.pending.len(),
                "terminate requested; ending session"
            );
            self.pending.clear();
            return FrameStatus::Terminated;
        }

        let batch_len = self
            .config
            .max_events_per_frame
            .get()
            .min(self.pending.len());
        let batch: Vec<InputEvent> = self.pending.drain(..batch_len).collect();
        let mut ctx = ScreenContext {
            rng: &mut self.rng,
            config: &self.config,
            layout: &self.layout,
        };

        for event in batch {
            match transition(screen, event, &mut ctx) {
                Flow::Continue(next) => screen = next,
                Flow::Terminate => {
                    self.pending.clear();
                    return FrameStatus::Terminated;
                }
            }
        }

        if !self.pending.is_empty() {
            tracing::debug!(
                deferred = self.pending.len(),
                "input backlog carried to next frame"
            );
        }

        match tick(screen, now, &self.config) {
            Flow::Continue(next) => {
                self.screen = Some(next);
                FrameStatus::Running
            }
            Flow::Terminate => {
                self.pending.clear();
                FrameStatus::Terminated
            }
        }
    }
}

impl<R> Session<R> {
    /// Current screen, or `None` once the session terminated.
    #[must_use]
    pub fn screen(&self) -> Option<&Screen> {
        self.screen.as_ref()
    }

    /// Reports whether the session has ended.
    #[must_use]
    pub fn is_terminated(&self) -> bool {
        self.screen.is_none()
    }

    /// Render snapshot of the current screen.
    #[must_use]
    pub fn view(&self) -> Option<ScreenView<'_>> {
        self.screen.as_ref().map(|screen| screen.view(&self.layout))
    }

    /// Number of events waiting for a later frame.
    #[must_use]
    pub fn pending_events(&self) -> usize {
        self.pending.len()
    }
}
