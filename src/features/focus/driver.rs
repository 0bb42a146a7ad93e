//! One-second tick source for the focus machine.
//!
//! The ticker does not own a thread. The event loop asks it how long it may
//! block and how many ticks fell due, then applies them to the machine
//! itself, so ticks and user operations stay strictly ordered.

use std::time::{Duration, Instant};

use super::events::FocusEvents;
use super::machine::{FocusMachine, TickOutcome};
use super::session::Phase;

/// Most ticks delivered at once after the loop was held up; anything beyond
/// is dropped and the schedule re-anchored.
pub const MAX_CATCH_UP: u32 = 5;

/// Periodic deadline tracker.
#[derive(Debug, Clone)]
pub struct Ticker {
    period: Duration,
    next_due: Option<Instant>,
}

impl Ticker {
    /// Create a detached ticker with the given period.
    #[must_use]
    pub const fn new(period: Duration) -> Self {
        Self {
            period,
            next_due: None,
        }
    }

    /// Create a detached one-second ticker.
    #[must_use]
    pub const fn every_second() -> Self {
        Self::new(Duration::from_secs(1))
    }

    /// Start ticking, first deadline one period from `now`.
    ///
    /// Attaching an attached ticker keeps its schedule.
    pub fn attach(&mut self, now: Instant) {
        if self.next_due.is_none() {
            self.next_due = Some(now + self.period);
        }
    }

    /// Stop ticking. Detaching a detached ticker does nothing.
    pub fn detach(&mut self) {
        self.next_due = None;
    }

    /// Check if the ticker is attached.
    #[must_use]
    pub const fn is_attached(&self) -> bool {
        self.next_due.is_some()
    }

    /// How long the loop may wait before the next tick is due.
    ///
    /// Returns `None` when detached.
    #[must_use]
    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        self.next_due
            .map(|due| due.saturating_duration_since(now))
    }

    /// Count the ticks that fell due by `now` and move the deadline forward.
    pub fn due_ticks(&mut self, now: Instant) -> u32 {
        let Some(mut due) = self.next_due else {
            return 0;
        };

        let mut ticks = 0;
        while due <= now {
            ticks += 1;
            due += self.period;
            if ticks == MAX_CATCH_UP {
                if due <= now {
                    due = now + self.period;
                }
                break;
            }
        }

        self.next_due = Some(due);
        ticks
    }
}

impl Default for Ticker {
    fn default() -> Self {
        Self::every_second()
    }
}

/// Summary of applying several ticks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Advance {
    /// Ticks that changed state
    pub counted: u32,
    /// Phase transitions, in order, as (finished, next)
    pub completions: Vec<(Phase, Phase)>,
}

impl Advance {
    /// Check if anything changed.
    #[must_use]
    pub fn changed(&self) -> bool {
        self.counted > 0
    }
}

/// Feed `ticks` one-second ticks to the machine in order.
pub fn advance<E: FocusEvents + ?Sized>(
    machine: &mut FocusMachine,
    events: &mut E,
    ticks: u32,
) -> Advance {
    let mut result = Advance::default();
    for _ in 0..ticks {
        match machine.tick(events) {
            TickOutcome::Idle => {}
            TickOutcome::Counted => result.counted += 1,
            TickOutcome::PhaseCompleted { finished, next } => {
                result.counted += 1;
                result.completions.push((finished, next));
            }
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::focus::events::NoEvents;
    use crate::features::focus::machine::TimerConfiguration;

    #[test]
    fn test_detached_ticker_is_inert() {
        let mut ticker = Ticker::every_second();
        let now = Instant::now();

        assert!(!ticker.is_attached());
        assert_eq!(ticker.time_until_due(now), None);
        assert_eq!(ticker.due_ticks(now + Duration::from_secs(10)), 0);
    }

    #[test]
    fn test_due_ticks_follow_schedule() {
        let mut ticker = Ticker::every_second();
        let start = Instant::now();
        ticker.attach(start);

        assert_eq!(ticker.due_ticks(start + Duration::from_millis(999)), 0);
        assert_eq!(ticker.due_ticks(start + Duration::from_millis(1000)), 1);
        assert_eq!(ticker.due_ticks(start + Duration::from_millis(3500)), 2);
        assert_eq!(
            ticker.time_until_due(start + Duration::from_millis(3500)),
            Some(Duration::from_millis(500))
        );
    }

    #[test]
    fn test_catch_up_is_capped() {
        let mut ticker = Ticker::every_second();
        let start = Instant::now();
        ticker.attach(start);

        let late = start + Duration::from_secs(60);
        assert_eq!(ticker.due_ticks(late), MAX_CATCH_UP);
        assert_eq!(ticker.time_until_due(late), Some(Duration::from_secs(1)));
    }

    #[test]
    fn test_attach_and_detach_are_idempotent() {
        let mut ticker = Ticker::every_second();
        let start = Instant::now();

        ticker.attach(start);
        ticker.attach(start + Duration::from_millis(700));
        assert_eq!(
            ticker.time_until_due(start),
            Some(Duration::from_secs(1))
        );

        ticker.detach();
        ticker.detach();
        assert!(!ticker.is_attached());
    }

    #[test]
    fn test_advance_reports_completions() {
        let config = TimerConfiguration {
            focus_duration_seconds: 3,
            short_break_duration_seconds: 2,
            long_break_duration_seconds: 4,
            rounds_until_long_break: 2,
            auto_start_breaks: true,
            auto_start_focus: true,
        };
        let mut machine = FocusMachine::new(config).unwrap();
        let mut events = NoEvents;
        machine.start(&mut events);

        let result = advance(&mut machine, &mut events, 5);

        assert_eq!(result.counted, 5);
        assert_eq!(
            result.completions,
            vec![(Phase::Focus, Phase::ShortBreak), (Phase::ShortBreak, Phase::Focus)]
        );
    }

    #[test]
    fn test_advance_idle_machine() {
        let mut machine = FocusMachine::new(TimerConfiguration::default()).unwrap();
        let result = advance(&mut machine, &mut NoEvents, 10);
        assert!(!result.changed());
    }
}
