//! Per-connection flood protection for WebSocket messages.

use std::{
    collections::VecDeque,
    time::{Duration, Instant},
};

/// Sliding-window message limiter
#[derive(Debug)]
pub struct RateLimiter {
    /// Arrival times of the messages still inside the window, oldest first
    arrivals: VecDeque<Instant>,
    max_messages: usize,
    window: Duration,
}

impl RateLimiter {
    /// Allow `max_messages` in any `window`
    ///
    /// # Example
    ///
    /// ```
    /// use cr_server::api::rate_limiter::RateLimiter;
    /// use std::time::Duration;
    ///
    /// let mut limiter = RateLimiter::new(2, Duration::from_secs(1));
    /// assert!(limiter.check());
    /// assert!(limiter.check());
    /// assert!(!limiter.check());
    /// ```
    pub fn new(max_messages: usize, window: Duration) -> Self {
        Self {
            arrivals: VecDeque::with_capacity(max_messages),
            max_messages,
            window,
        }
    }

    /// 10 messages per second
    pub fn burst() -> Self {
        Self::new(10, Duration::from_secs(1))
    }

    /// 100 messages per minute
    pub fn sustained() -> Self {
        Self::new(100, Duration::from_secs(60))
    }

    /// Record a message arriving now. Returns `false` if it's over the limit,
    /// in which case it isn't counted.
    pub fn check(&mut self) -> bool {
        self.check_at(Instant::now())
    }

    fn check_at(&mut self, now: Instant) -> bool {
        while self
            .arrivals
            .front()
            .is_some_and(|arrival| now.duration_since(*arrival) >= self.window)
        {
            self.arrivals.pop_front();
        }

        if self.arrivals.len() >= self.max_messages {
            return false;
        }
        self.arrivals.push_back(now);
        true
    }

    /// Messages still allowed in the current window
    pub fn remaining(&self) -> usize {
        self.max_messages.saturating_sub(self.arrivals.len())
    }
}

/// Both limits a connection is held to
#[derive(Debug)]
pub struct ConnectionLimits {
    burst: RateLimiter,
    sustained: RateLimiter,
}

impl Default for ConnectionLimits {
    fn default() -> Self {
        Self {
            burst: RateLimiter::burst(),
            sustained: RateLimiter::sustained(),
        }
    }
}

impl ConnectionLimits {
    /// Why the message was refused, if it was
    pub fn check(&mut self) -> Result<(), &'static str> {
        if !self.burst.check() {
            return Err("Rate limit exceeded. Please slow down.");
        }
        if !self.sustained.check() {
            return Err("Too many messages. Please wait before sending more.");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blocks_past_the_limit() {
        let mut limiter = RateLimiter::new(3, Duration::from_secs(1));
        let now = Instant::now();
        for _ in 0..3 {
            assert!(limiter.check_at(now));
        }
        assert!(!limiter.check_at(now));
        assert_eq!(limiter.remaining(), 0);
    }

    #[test]
    fn test_window_slides() {
        let mut limiter = RateLimiter::new(2, Duration::from_millis(100));
        let start = Instant::now();
        assert!(limiter.check_at(start));
        assert!(limiter.check_at(start + Duration::from_millis(60)));
        assert!(!limiter.check_at(start + Duration::from_millis(90)));

        // Only the first arrival has left the window.
        assert!(limiter.check_at(start + Duration::from_millis(100)));
        assert!(!limiter.check_at(start + Duration::from_millis(120)));
        assert!(limiter.check_at(start + Duration::from_millis(160)));
    }

    #[test]
    fn test_refused_messages_are_not_counted() {
        let mut limiter = RateLimiter::new(1, Duration::from_millis(100));
        let start = Instant::now();
        assert!(limiter.check_at(start));
        for ms in [10, 50, 90] {
            assert!(!limiter.check_at(start + Duration::from_millis(ms)));
        }
        assert!(limiter.check_at(start + Duration::from_millis(100)));
    }

    #[test]
    fn test_connection_limits_trip_on_burst_first() {
        let mut limits = ConnectionLimits::default();
        for _ in 0..10 {
            assert!(limits.check().is_ok());
        }
        assert_eq!(
            limits.check(),
            Err("Rate limit exceeded. Please slow down.")
        );
    }
}
