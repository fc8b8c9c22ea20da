// Tick-counted timers owned by the session

use crate::tournament::MatchState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    /// Dwell between an open-play goal and the score being applied
    GoalPause,
    /// Resample the automatic keeper's lean
    KeeperShuffle,
    /// Delay between pressing shoot and the ball being struck
    KickWindup,
    /// Dwell after a penalty before it is recorded
    Celebration,
}

#[derive(Debug, Clone)]
struct Timer {
    kind: TimerKind,
    remaining: u32,
    // Some(period) for repeating timers
    period: Option<u32>,
}

/// Pending timers, counted in physics ticks
///
/// Every status or mode change re-arms the scheduler, which drops all pending
/// timers; nothing scheduled for one state can fire in the next.
#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    timers: Vec<Timer>,
    clock_armed: bool,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every timer and decide whether the match clock runs in `state`
    pub fn arm(&mut self, state: &MatchState) {
        if !self.timers.is_empty() {
            tracing::debug!(dropped = self.timers.len(), "Clearing timers");
        }
        self.timers.clear();
        self.clock_armed = state.clock_runs();
    }

    pub fn clock_armed(&self) -> bool {
        self.clock_armed
    }

    /// Fire `kind` once after `ticks` ticks, replacing any pending timer of that kind
    pub fn schedule(&mut self, kind: TimerKind, ticks: u32) {
        self.insert(Timer {
            kind,
            remaining: ticks.max(1),
            period: None,
        });
    }

    /// Fire `kind` every `period` ticks until cancelled
    pub fn repeat(&mut self, kind: TimerKind, period: u32) {
        let period = period.max(1);
        self.insert(Timer {
            kind,
            remaining: period,
            period: Some(period),
        });
    }

    pub fn cancel(&mut self, kind: TimerKind) {
        self.timers.retain(|timer| timer.kind != kind);
    }

    pub fn is_pending(&self, kind: TimerKind) -> bool {
        self.timers.iter().any(|timer| timer.kind == kind)
    }

    fn insert(&mut self, timer: Timer) {
        self.cancel(timer.kind);
        self.timers.push(timer);
    }

    /// Count one tick down and return the timers that fired, in scheduling order
    pub fn advance(&mut self) -> Vec<TimerKind> {
        let mut fired = Vec::new();
        for timer in &mut self.timers {
            timer.remaining = timer.remaining.saturating_sub(1);
            if timer.remaining == 0 {
                fired.push(timer.kind);
                if let Some(period) = timer.period {
                    timer.remaining = period;
                }
            }
        }
        self.timers.retain(|timer| timer.remaining > 0);
        fired
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tournament::{Contest, Scoreline};

    #[test]
    fn test_one_shot_fires_once() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(TimerKind::GoalPause, 3);

        assert!(scheduler.advance().is_empty());
        assert!(scheduler.advance().is_empty());
        assert_eq!(scheduler.advance(), vec![TimerKind::GoalPause]);
        assert!(!scheduler.is_pending(TimerKind::GoalPause));
        assert!(scheduler.advance().is_empty());
    }

    #[test]
    fn test_repeating_timer_keeps_firing() {
        let mut scheduler = Scheduler::new();
        scheduler.repeat(TimerKind::KeeperShuffle, 2);

        let fired: usize = (0..10).map(|_| scheduler.advance().len()).sum();
        assert_eq!(fired, 5);
        assert!(scheduler.is_pending(TimerKind::KeeperShuffle));

        scheduler.cancel(TimerKind::KeeperShuffle);
        assert!(scheduler.advance().is_empty());
    }

    #[test]
    fn test_rescheduling_replaces_pending_timer() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(TimerKind::KickWindup, 1);
        scheduler.schedule(TimerKind::KickWindup, 5);
        assert!(scheduler.advance().is_empty());
    }

    #[test]
    fn test_arm_drops_timers_and_sets_clock() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(TimerKind::Celebration, 10);
        scheduler.arm(&MatchState::Playing(Contest::Arcade {
            score: Scoreline::default(),
            ball: 1,
        }));
        assert!(!scheduler.is_pending(TimerKind::Celebration));
        assert!(!scheduler.clock_armed());
    }
}
