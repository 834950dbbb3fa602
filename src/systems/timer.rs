//! A tick-counted countdown that drives every timed state of the simulation.

/// How long a [`TickTimer`] runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerDuration {
    Ticks(u32),
    /// Never expires on its own; only [`TickTimer::expire`] ends it.
    Indefinite,
}

/// A countdown measured in simulation ticks.
///
/// A default timer has zero ticks and is therefore already expired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickTimer {
    duration: TimerDuration,
    elapsed: u32,
    expired: bool,
}

impl Default for TickTimer {
    fn default() -> Self {
        Self::new(TimerDuration::Ticks(0))
    }
}

impl TickTimer {
    pub fn new(duration: TimerDuration) -> Self {
        let mut timer = Self {
            duration,
            elapsed: 0,
            expired: false,
        };
        timer.start(duration);
        timer
    }

    /// Restarts the timer with a new duration.
    pub fn start(&mut self, duration: TimerDuration) {
        self.duration = duration;
        self.elapsed = 0;
        self.expired = duration == TimerDuration::Ticks(0);
    }

    /// Advances the timer by one tick. Has no effect once expired.
    pub fn tick(&mut self) {
        if self.expired {
            return;
        }
        self.elapsed += 1;
        if let TimerDuration::Ticks(total) = self.duration {
            if self.elapsed >= total {
                self.expired = true;
            }
        }
    }

    /// Forces the timer to expire, exactly as if it had run out.
    pub fn expire(&mut self) {
        if let TimerDuration::Ticks(total) = self.duration {
            self.elapsed = total;
        }
        self.expired = true;
    }

    pub fn expired(&self) -> bool {
        self.expired
    }

    pub fn is_running(&self) -> bool {
        !self.expired
    }

    pub fn is_indefinite(&self) -> bool {
        self.duration == TimerDuration::Indefinite
    }

    /// Ticks left before expiry, `None` for an indefinite timer that is still running.
    pub fn remaining(&self) -> Option<u32> {
        match self.duration {
            _ if self.expired => Some(0),
            TimerDuration::Ticks(total) => Some(total - self.elapsed),
            TimerDuration::Indefinite => None,
        }
    }

    pub fn elapsed(&self) -> u32 {
        self.elapsed
    }

    pub fn duration(&self) -> TimerDuration {
        self.duration
    }

    /// Whether exactly `ticks` have elapsed since the timer started.
    pub fn at_elapsed(&self, ticks: u32) -> bool {
        self.elapsed == ticks
    }
}
