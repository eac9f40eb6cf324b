use std::time::Duration;

/// Proof of a scheduled debounce wait
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebounceTicket(u64);

/// Single-slot debounce
///
/// Each `schedule` supersedes the previous ticket; a waiter only acts if
/// its ticket is still current once the delay has elapsed.
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    generation: u64,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self { delay, generation: 0 }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn schedule(&mut self) -> DebounceTicket {
        self.generation = self.generation.wrapping_add(1);
        DebounceTicket(self.generation)
    }

    /// Invalidate whatever is pending without scheduling anything new
    pub fn cancel(&mut self) {
        self.generation = self.generation.wrapping_add(1);
    }

    pub fn is_current(&self, ticket: DebounceTicket) -> bool {
        self.generation == ticket.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_schedule_supersedes_previous() {
        let mut debouncer = Debouncer::new(Duration::from_millis(500));
        let first = debouncer.schedule();
        assert!(debouncer.is_current(first));

        let second = debouncer.schedule();
        assert!(!debouncer.is_current(first));
        assert!(debouncer.is_current(second));
    }

    #[test]
    fn test_cancel_invalidates_pending() {
        let mut debouncer = Debouncer::new(Duration::from_millis(500));
        let ticket = debouncer.schedule();
        debouncer.cancel();
        assert!(!debouncer.is_current(ticket));
        assert_eq!(debouncer.delay(), Duration::from_millis(500));
    }
}
