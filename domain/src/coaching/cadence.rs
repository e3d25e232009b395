//! Auto-coaching trigger.

/// Default number of reviews between automatic coaching rounds
pub const DEFAULT_AUTO_INTERVAL: u32 = 3;

/// Counts review submissions and signals when a coaching round is due.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoachingCadence {
    interval: u32,
    since_last: u32,
}

impl Default for CoachingCadence {
    fn default() -> Self {
        Self::new(DEFAULT_AUTO_INTERVAL)
    }
}

impl CoachingCadence {
    /// An interval of zero disables automatic coaching.
    pub fn new(interval: u32) -> Self {
        Self {
            interval,
            since_last: 0,
        }
    }

    pub fn interval(&self) -> u32 {
        self.interval
    }

    pub fn since_last(&self) -> u32 {
        self.since_last
    }

    /// Count one review. Returns `true` when the interval is reached; the
    /// counter restarts at that point.
    pub fn record_review(&mut self) -> bool {
        if self.interval == 0 {
            return false;
        }
        self.since_last += 1;
        if self.since_last >= self.interval {
            self.since_last = 0;
            true
        } else {
            false
        }
    }

    pub fn reset(&mut self) {
        self.since_last = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_every_interval() {
        let mut cadence = CoachingCadence::default();
        let fired: Vec<bool> = (0..7).map(|_| cadence.record_review()).collect();
        assert_eq!(fired, vec![false, false, true, false, false, true, false]);
        assert_eq!(cadence.since_last(), 1);
    }

    #[test]
    fn test_reset() {
        let mut cadence = CoachingCadence::new(2);
        cadence.record_review();
        cadence.reset();
        assert!(!cadence.record_review());
        assert!(cadence.record_review());
    }

    #[test]
    fn test_zero_interval_never_fires() {
        let mut cadence = CoachingCadence::new(0);
        assert!((0..10).all(|_| !cadence.record_review()));
    }
}
