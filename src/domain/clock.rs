use std::time::Duration;

/// Turns measured wall-clock time into whole timer ticks.
///
/// Elapsed time is only accumulated while armed. The part of a period left
/// over when the ticker is paused is carried into the next run, so repeated
/// pause/resume cycles neither lose nor gain time.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use tpomo::domain::Ticker;
///
/// let mut ticker = Ticker::default();
/// ticker.resume();
/// assert_eq!(ticker.advance(Duration::from_millis(2500)), 2);
/// assert_eq!(ticker.carried(), Duration::from_millis(500));
/// ```
#[derive(Debug, Clone)]
pub struct Ticker {
    period: Duration,
    carried: Duration,
    armed: bool,
}

impl Default for Ticker {
    fn default() -> Self {
        Self::new(Duration::from_secs(1))
    }
}

impl Ticker {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            carried: Duration::ZERO,
            armed: false,
        }
    }

    /// Time accumulated towards the next tick.
    pub fn carried(&self) -> Duration {
        self.carried
    }

    pub fn resume(&mut self) {
        self.armed = true;
    }

    /// Disarms the ticker. The partial period is kept for the next resume.
    pub fn pause(&mut self) {
        self.armed = false;
    }

    /// Adds `elapsed` and returns how many full periods are now complete.
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        if !self.armed || self.period.is_zero() {
            return 0;
        }

        self.carried += elapsed;
        let mut ticks = 0;
        while self.carried >= self.period {
            self.carried -= self.period;
            ticks += 1;
        }
        ticks
    }

    /// How long until the next tick fires, or `None` while paused.
    pub fn until_next(&self) -> Option<Duration> {
        self.armed.then(|| self.period.saturating_sub(self.carried))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[test]
    fn test_paused_ticker_ignores_time() {
        let mut ticker = Ticker::default();
        assert_eq!(ticker.advance(ms(5000)), 0);
        assert_eq!(ticker.carried(), Duration::ZERO);
        assert_eq!(ticker.until_next(), None);
    }

    #[test]
    fn test_counts_whole_periods() {
        let mut ticker = Ticker::default();
        ticker.resume();
        assert_eq!(ticker.advance(ms(999)), 0);
        assert_eq!(ticker.advance(ms(1)), 1);
        assert_eq!(ticker.advance(ms(3200)), 3);
        assert_eq!(ticker.carried(), ms(200));
        assert_eq!(ticker.until_next(), Some(ms(800)));
    }

    #[test]
    fn test_remainder_survives_pause() {
        let mut ticker = Ticker::default();
        ticker.resume();
        assert_eq!(ticker.advance(ms(600)), 0);
        ticker.pause();
        assert_eq!(ticker.advance(ms(10_000)), 0);
        ticker.resume();
        assert_eq!(ticker.advance(ms(400)), 1);
        assert_eq!(ticker.carried(), Duration::ZERO);
    }

    #[test]
    fn test_many_pause_cycles_do_not_drift() {
        let mut ticker = Ticker::default();
        let mut ticks = 0;
        for _ in 0..100 {
            ticker.resume();
            ticks += ticker.advance(ms(750));
            ticker.pause();
        }
        assert_eq!(ticks, 75);
        assert_eq!(ticker.carried(), Duration::ZERO);
    }
}
