//! Frame pacing

use std::thread;
use std::time::{Duration, Instant};

/// The driver's only blocking waits
pub trait Clock {
    /// Sleep out the rest of the current frame budget
    fn wait_frame(&mut self);
    /// Block for a fixed real-time interval (countdown beats)
    fn pause(&mut self, duration: Duration);
}

/// Caps the step rate by sleeping whatever is left of each frame
#[derive(Debug)]
pub struct FrameClock {
    frame: Duration,
    frame_start: Instant,
}

impl FrameClock {
    pub fn new(frame: Duration) -> Self {
        Self {
            frame,
            frame_start: Instant::now(),
        }
    }
}

impl Clock for FrameClock {
    fn wait_frame(&mut self) {
        let elapsed = self.frame_start.elapsed();
        if elapsed < self.frame {
            thread::sleep(self.frame - elapsed);
        }
        self.frame_start = Instant::now();
    }

    fn pause(&mut self, duration: Duration) {
        thread::sleep(duration);
        self.frame_start = Instant::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wait_frame_sleeps_the_remaining_budget() {
        let mut clock = FrameClock::new(Duration::from_millis(20));
        let start = Instant::now();
        clock.wait_frame();
        assert!(start.elapsed() >= Duration::from_millis(15));
    }

    #[test]
    fn overrun_frames_do_not_sleep() {
        let mut clock = FrameClock::new(Duration::from_millis(50));
        thread::sleep(Duration::from_millis(60));
        let start = Instant::now();
        clock.wait_frame();
        assert!(start.elapsed() < Duration::from_millis(40));
    }
}
