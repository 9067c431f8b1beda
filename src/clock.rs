use std::time::{Duration, Instant};

/// Upper bound on ticks run in one wake-up after a stall.
pub const MAX_CATCH_UP: u32 = 5;

/// Fixed-timestep accumulator driving tick/render calls.
pub struct TickClock {
    period: Duration,
    last: Instant,
    backlog: Duration,
}

impl TickClock {
    pub fn new(ticks_per_second: u32, now: Instant) -> Self {
        Self {
            period: Duration::from_secs(1) / ticks_per_second.max(1),
            last: now,
            backlog: Duration::ZERO,
        }
    }

    /// Number of whole ticks due at `now`.
    pub fn advance(&mut self, now: Instant) -> u32 {
        self.backlog += now.saturating_duration_since(self.last);
        self.last = now;

        let mut ticks = 0;
        while self.backlog >= self.period {
            self.backlog -= self.period;
            ticks += 1;
        }
        if ticks > MAX_CATCH_UP {
            ticks = MAX_CATCH_UP;
        }
        ticks
    }

    /// When the next tick falls due.
    pub fn next_deadline(&self) -> Instant {
        self.last + self.period.saturating_sub(self.backlog)
    }
}

/// Counts ticks and frames, reporting once per second.
pub struct RateCounter {
    window_start: Instant,
    ticks: u32,
    frames: u32,
}

impl RateCounter {
    pub fn new(now: Instant) -> Self {
        Self {
            window_start: now,
            ticks: 0,
            frames: 0,
        }
    }

    pub fn record(&mut self, ticks: u32, frames: u32) {
        self.ticks += ticks;
        self.frames += frames;
    }

    /// `(ticks, frames)` for the window just closed, once a second has passed.
    pub fn poll(&mut self, now: Instant) -> Option<(u32, u32)> {
        if now.duration_since(self.window_start) < Duration::from_secs(1) {
            return None;
        }
        self.window_start += Duration::from_secs(1);
        let out = (self.ticks, self.frames);
        self.ticks = 0;
        self.frames = 0;
        Some(out)
    }
}
