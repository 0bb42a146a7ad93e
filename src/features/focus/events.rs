//! Outbound notifications from the focus machine.
//!
//! Collaborators (sound cues, stats recording) implement [`FocusEvents`].
//! Every hook is fire-and-forget from the machine's point of view: errors
//! are logged and dropped, never propagated into a machine operation.

use crate::error::FocusFlowError;

/// Capability interface for observers of the focus machine.
///
/// All hooks default to doing nothing so collaborators only implement what
/// they care about.
#[cfg_attr(test, mockall::automock)]
pub trait FocusEvents {
    /// The active branch started counting.
    fn on_start(&mut self) -> Result<(), FocusFlowError> {
        Ok(())
    }

    /// The active branch was paused.
    fn on_pause(&mut self) -> Result<(), FocusFlowError> {
        Ok(())
    }

    /// The active branch was stopped and rewound.
    fn on_stop(&mut self) -> Result<(), FocusFlowError> {
        Ok(())
    }

    /// A timer phase ran out.
    fn on_session_end(&mut self) -> Result<(), FocusFlowError> {
        Ok(())
    }

    /// One second of focus time elapsed.
    fn on_focus_second_elapsed(&mut self) -> Result<(), FocusFlowError> {
        Ok(())
    }

    /// A focus phase or stopwatch session was completed.
    fn on_session_completed(&mut self) -> Result<(), FocusFlowError> {
        Ok(())
    }
}

/// Listener that ignores every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoEvents;

impl FocusEvents for NoEvents {}

/// Forwards every event to each listener in order.
///
/// A failing listener does not stop the remaining ones from being notified.
#[derive(Default)]
pub struct Fanout<'a> {
    listeners: Vec<&'a mut dyn FocusEvents>,
}

impl<'a> Fanout<'a> {
    /// Create an empty fanout.
    #[must_use]
    pub fn new() -> Self {
        Self {
            listeners: Vec::new(),
        }
    }

    /// Add a listener.
    #[must_use]
    pub fn with(mut self, listener: &'a mut dyn FocusEvents) -> Self {
        self.listeners.push(listener);
        self
    }

    fn each(
        &mut self,
        event: &'static str,
        f: impl Fn(&mut dyn FocusEvents) -> Result<(), FocusFlowError>,
    ) -> Result<(), FocusFlowError> {
        for listener in &mut self.listeners {
            if let Err(e) = f(&mut **listener) {
                tracing::warn!(event, error = %e, "focus listener failed");
            }
        }
        Ok(())
    }
}

impl FocusEvents for Fanout<'_> {
    fn on_start(&mut self) -> Result<(), FocusFlowError> {
        self.each("start", |l| l.on_start())
    }

    fn on_pause(&mut self) -> Result<(), FocusFlowError> {
        self.each("pause", |l| l.on_pause())
    }

    fn on_stop(&mut self) -> Result<(), FocusFlowError> {
        self.each("stop", |l| l.on_stop())
    }

    fn on_session_end(&mut self) -> Result<(), FocusFlowError> {
        self.each("session_end", |l| l.on_session_end())
    }

    fn on_focus_second_elapsed(&mut self) -> Result<(), FocusFlowError> {
        self.each("focus_second", |l| l.on_focus_second_elapsed())
    }

    fn on_session_completed(&mut self) -> Result<(), FocusFlowError> {
        self.each("session_completed", |l| l.on_session_completed())
    }
}
