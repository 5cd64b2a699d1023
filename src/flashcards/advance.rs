//! Auto-advance timer
//!
//! Cancellable delay between grading a card and moving to the next one.
//! Owned by the view loop and dropped with it, so a torn-down view never
//! advances.

use super::state::{AdvanceTicket, DEFAULT_ADVANCE_DELAY};
use std::pin::Pin;
use std::time::Duration;
use tokio::time::{sleep, Sleep};

/// At most one pending advance, keyed by its ticket
pub struct AdvanceTimer {
    delay: Duration,
    pending: Option<(AdvanceTicket, Pin<Box<Sleep>>)>,
}

impl AdvanceTimer {
    pub fn new(delay: Duration) -> Self {
        Self { delay, pending: None }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Arm the timer for `ticket`, replacing any earlier one
    pub fn schedule(&mut self, ticket: AdvanceTicket) {
        self.pending = Some((ticket, Box::pin(sleep(self.delay))));
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Resolves with the ticket once the delay elapses.
    ///
    /// Pends forever when nothing is scheduled. Safe to use in `select!`:
    /// dropping the future keeps the schedule.
    pub async fn fired(&mut self) -> AdvanceTicket {
        let ticket = match self.pending.as_mut() {
            Some((ticket, delay)) => {
                let ticket = *ticket;
                delay.as_mut().await;
                ticket
            }
            None => std::future::pending().await,
        };
        self.pending = None;
        ticket
    }
}

impl Default for AdvanceTimer {
    fn default() -> Self {
        Self::new(DEFAULT_ADVANCE_DELAY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flashcards::FlashcardState;

    #[tokio::test(start_paused = true)]
    async fn test_fires_with_ticket() {
        let mut state = FlashcardState::new();
        let mut timer = AdvanceTimer::default();

        let ticket = state.grade(true).unwrap();
        timer.schedule(ticket);
        assert!(timer.is_pending());

        let fired = timer.fired().await;
        assert_eq!(fired, ticket);
        assert!(!timer.is_pending());
        assert!(state.complete_advance(fired));
        assert_eq!(state.current_index(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_timer_never_fires() {
        let mut state = FlashcardState::new();
        let mut timer = AdvanceTimer::default();

        timer.schedule(state.grade(false).unwrap());
        timer.cancel();

        let waited = tokio::time::timeout(Duration::from_secs(5), timer.fired()).await;
        assert!(waited.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_schedule_survives_dropped_wait() {
        let mut state = FlashcardState::new();
        let mut timer = AdvanceTimer::default();
        let ticket = state.grade(true).unwrap();
        timer.schedule(ticket);

        let early = tokio::time::timeout(Duration::from_millis(10), timer.fired()).await;
        assert!(early.is_err());
        assert!(timer.is_pending());

        assert_eq!(timer.fired().await, ticket);
    }

    #[tokio::test(start_paused = true)]
    async fn test_fires_only_after_delay() {
        let mut state = FlashcardState::new();
        let mut timer = AdvanceTimer::default();
        let start = tokio::time::Instant::now();
        let ticket = state.grade(true).unwrap();
        timer.schedule(ticket);

        tokio::time::advance(DEFAULT_ADVANCE_DELAY - Duration::from_millis(1)).await;
        let early = tokio::time::timeout(Duration::ZERO, timer.fired()).await;
        assert!(early.is_err());

        assert_eq!(timer.fired().await, ticket);
        assert!(start.elapsed() >= DEFAULT_ADVANCE_DELAY);
    }
}
