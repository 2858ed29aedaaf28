/// Outcome of advancing the round timer by one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerTick {
    /// No whole second elapsed.
    Idle,
    /// The displayed value changed; payload is the new seconds-left.
    Ticked(u32),
    /// The countdown just reached zero. Fires exactly once per round.
    Expired,
}

/// One-second-granularity countdown gating play.
///
/// Decrements by real-time accumulation, not frame count, so it stays
/// correct under variable frame rates. Never goes below zero; reaching
/// zero stops the timer.
#[derive(Debug, Clone)]
pub struct RoundTimer {
    time_left: u32,
    running: bool,
    accumulator: f32,
}

impl RoundTimer {
    pub fn new() -> Self {
        Self {
            time_left: 0,
            running: false,
            accumulator: 0.0,
        }
    }

    /// Restart the countdown from `seconds`.
    pub fn reset(&mut self, seconds: u32) {
        self.time_left = seconds;
        self.running = seconds > 0;
        self.accumulator = 0.0;
    }

    /// Halt the countdown (win, level unload). Idempotent.
    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn running(&self) -> bool {
        self.running
    }

    pub fn time_left(&self) -> u32 {
        self.time_left
    }

    /// Advance by `dt` seconds. While paused the accumulator is frozen.
    pub fn tick(&mut self, dt: f32, paused: bool) -> TimerTick {
        if !self.running || paused {
            return TimerTick::Idle;
        }
        self.accumulator += dt;
        let mut changed = false;
        while self.accumulator >= 1.0 {
            self.accumulator -= 1.0;
            self.time_left -= 1;
            changed = true;
            if self.time_left == 0 {
                self.running = false;
                return TimerTick::Expired;
            }
        }
        if changed {
            TimerTick::Ticked(self.time_left)
        } else {
            TimerTick::Idle
        }
    }
}

impl Default for RoundTimer {
    fn default() -> Self {
        Self::new()
    }
}
