//! Frame scheduling.
//!
//! A browser would drive the field from `requestAnimationFrame`; natively the
//! same loop is a fixed-rate timer on the event loop thread. [`FrameClock`]
//! holds at most one pending frame request. Cancelling it (or restarting the
//! loop, as a resize does) bumps the generation, so a request issued before
//! the cancel can never fire and two loops never run side by side.
//!
//! # Example
//!
//! ```ignore
//! let mut clock = FrameClock::new(60);
//! clock.request(Instant::now());
//!
//! // In the event loop:
//! if let Some(tick) = clock.poll(Instant::now()) {
//!     field.frame(pointer.position(), &mut batch);
//! }
//! ```

use std::time::{Duration, Instant};

/// Handle to a scheduled frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameRequest {
    generation: u64,
    deadline: Instant,
}

impl FrameRequest {
    /// Loop generation this request belongs to.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// When the frame is due.
    pub fn deadline(&self) -> Instant {
        self.deadline
    }
}

/// A fired frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTick {
    /// Frames fired since the clock was created, starting at 1.
    pub frame: u64,
    /// Time since the previous tick of the same loop (zero for the first).
    pub delta: Duration,
    pub generation: u64,
}

#[derive(Debug)]
pub struct FrameClock {
    interval: Duration,
    pending: Option<FrameRequest>,
    generation: u64,
    frame_count: u64,
    last_tick: Option<Instant>,
    fps: f32,
    fps_frame_count: u64,
    fps_update_time: Option<Instant>,
    fps_update_interval: Duration,
}

impl FrameClock {
    /// Clock firing `frame_rate` times per second. A rate of zero is treated
    /// as one frame per second.
    pub fn new(frame_rate: u32) -> Self {
        Self::with_interval(Duration::from_secs(1) / frame_rate.max(1))
    }

    pub fn with_interval(interval: Duration) -> Self {
        Self {
            interval,
            pending: None,
            generation: 0,
            frame_count: 0,
            last_tick: None,
            fps: 0.0,
            fps_frame_count: 0,
            fps_update_time: None,
            fps_update_interval: Duration::from_secs(1),
        }
    }

    /// Schedule the next frame one interval after `now`.
    ///
    /// If a request is already pending it is returned unchanged; there is
    /// never more than one.
    pub fn request(&mut self, now: Instant) -> FrameRequest {
        if let Some(pending) = self.pending {
            return pending;
        }
        let request = FrameRequest {
            generation: self.generation,
            deadline: now + self.interval,
        };
        self.pending = Some(request);
        request
    }

    /// Drop the pending request, if any. It will never fire.
    pub fn cancel(&mut self) {
        if self.pending.take().is_some() {
            tracing::trace!(generation = self.generation, "cancelled frame request");
        }
        self.generation += 1;
        self.last_tick = None;
    }

    /// Cancel the current loop and start a fresh one.
    pub fn restart(&mut self, now: Instant) -> FrameRequest {
        self.cancel();
        self.request(now)
    }

    /// Whether `request` is the live pending request.
    pub fn is_live(&self, request: &FrameRequest) -> bool {
        self.pending.as_ref() == Some(request)
    }

    /// Fire the pending request if it is due, and re-arm the next one.
    ///
    /// The loop keeps running until cancelled. A clock that fell behind by
    /// more than one interval skips the missed frames rather than bursting.
    pub fn poll(&mut self, now: Instant) -> Option<FrameTick> {
        let pending = self.pending?;
        if now < pending.deadline {
            return None;
        }

        self.frame_count += 1;
        let delta = self
            .last_tick
            .map(|last| now.saturating_duration_since(last))
            .unwrap_or(Duration::ZERO);
        self.last_tick = Some(now);
        self.update_fps(now);

        let mut next = pending.deadline + self.interval;
        if next <= now {
            next = now + self.interval;
        }
        self.pending = Some(FrameRequest {
            generation: pending.generation,
            deadline: next,
        });

        Some(FrameTick {
            frame: self.frame_count,
            delta,
            generation: pending.generation,
        })
    }

    fn update_fps(&mut self, now: Instant) {
        let Some(since) = self.fps_update_time else {
            self.fps_update_time = Some(now);
            self.fps_frame_count = self.frame_count;
            return;
        };
        let elapsed = now.saturating_duration_since(since);
        if elapsed >= self.fps_update_interval {
            let frames = self.frame_count - self.fps_frame_count;
            self.fps = frames as f32 / elapsed.as_secs_f32();
            self.fps_frame_count = self.frame_count;
            self.fps_update_time = Some(now);
            tracing::debug!(fps = self.fps, frames = self.frame_count, "frame rate");
        }
    }

    /// Deadline of the pending request.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.map(|r| r.deadline)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    #[inline]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Total frames fired.
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame_count
    }

    /// Measured frames per second, refreshed once a second.
    #[inline]
    pub fn fps(&self) -> f32 {
        self.fps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS: Duration = Duration::from_millis(1);

    #[test]
    fn test_new_clock() {
        let clock = FrameClock::new(50);
        assert_eq!(clock.interval(), 20 * MS);
        assert_eq!(clock.frame(), 0);
        assert!(!clock.is_pending());
        assert_eq!(FrameClock::new(0).interval(), Duration::from_secs(1));
    }

    #[test]
    fn test_poll_before_deadline() {
        let t0 = Instant::now();
        let mut clock = FrameClock::with_interval(10 * MS);
        assert!(clock.poll(t0).is_none());

        clock.request(t0);
        assert!(clock.poll(t0 + 9 * MS).is_none());
        let tick = clock.poll(t0 + 10 * MS).unwrap();
        assert_eq!(tick.frame, 1);
        assert_eq!(tick.delta, Duration::ZERO);
    }

    #[test]
    fn test_loop_rearms() {
        let t0 = Instant::now();
        let mut clock = FrameClock::with_interval(10 * MS);
        clock.request(t0);

        assert!(clock.poll(t0 + 10 * MS).is_some());
        assert_eq!(clock.next_deadline(), Some(t0 + 20 * MS));
        assert!(clock.poll(t0 + 15 * MS).is_none());
        let tick = clock.poll(t0 + 21 * MS).unwrap();
        assert_eq!(tick.frame, 2);
        assert_eq!(tick.delta, 11 * MS);
    }

    #[test]
    fn test_falling_behind_skips_frames() {
        let t0 = Instant::now();
        let mut clock = FrameClock::with_interval(10 * MS);
        clock.request(t0);
        assert!(clock.poll(t0 + 100 * MS).is_some());
        assert_eq!(clock.next_deadline(), Some(t0 + 110 * MS));
        assert!(clock.poll(t0 + 105 * MS).is_none());
    }

    #[test]
    fn test_duplicate_request_returns_pending() {
        let t0 = Instant::now();
        let mut clock = FrameClock::with_interval(10 * MS);
        let a = clock.request(t0);
        let b = clock.request(t0 + 5 * MS);
        assert_eq!(a, b);
    }

    #[test]
    fn test_cancelled_request_never_fires() {
        let t0 = Instant::now();
        let mut clock = FrameClock::with_interval(10 * MS);
        let request = clock.request(t0);
        clock.cancel();
        assert!(!clock.is_live(&request));
        assert!(clock.poll(t0 + 50 * MS).is_none());
        assert_eq!(clock.frame(), 0);
    }

    #[test]
    fn test_restart_leaves_single_live_loop() {
        let t0 = Instant::now();
        let mut clock = FrameClock::with_interval(10 * MS);
        let old = clock.request(t0);
        assert!(clock.poll(t0 + 10 * MS).is_some());

        let fresh = clock.restart(t0 + 12 * MS);
        assert!(!clock.is_live(&old));
        assert!(clock.is_live(&fresh));
        assert!(fresh.generation() > old.generation());
        assert_eq!(fresh.deadline(), t0 + 22 * MS);

        // The old loop's deadline (t0 + 20ms) does not fire.
        assert!(clock.poll(t0 + 20 * MS).is_none());
        let tick = clock.poll(t0 + 22 * MS).unwrap();
        assert_eq!(tick.generation, fresh.generation());
        assert_eq!(tick.delta, Duration::ZERO);
    }

    #[test]
    fn test_fps_estimate() {
        let t0 = Instant::now();
        let mut clock = FrameClock::with_interval(10 * MS);
        clock.request(t0);
        let mut now = t0;
        for _ in 0..=100 {
            now += 10 * MS;
            clock.poll(now);
        }
        assert!((clock.fps() - 100.0).abs() < 1.0, "fps was {}", clock.fps());
    }
}
