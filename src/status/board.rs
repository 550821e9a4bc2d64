//! Ordering of overlapping status polls
//!
//! A poll is started on a timer whether or not the previous one finished,
//! so completions can arrive out of order. Each poll takes a ticket when it
//! starts; a completion only replaces the displayed snapshot if its ticket
//! is newer than the one currently shown.

use crate::domain::StatusSnapshot;

/// Sequence number of one poll
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

/// Latest displayed status
#[derive(Debug, Clone, Default)]
pub struct StatusBoard {
    issued: u64,
    shown: Option<Ticket>,
    current: StatusSnapshot,
}

impl StatusBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a poll
    pub fn begin(&mut self) -> Ticket {
        self.issued += 1;
        Ticket(self.issued)
    }

    /// Record a finished poll
    ///
    /// Returns whether the snapshot was applied.
    pub fn complete(&mut self, ticket: Ticket, snapshot: StatusSnapshot) -> bool {
        if self.shown.is_some_and(|shown| ticket <= shown) {
            log::debug!("Dropping stale status poll {:?}", ticket);
            return false;
        }
        self.shown = Some(ticket);
        self.current = snapshot;
        true
    }

    /// Snapshot currently shown
    pub fn current(&self) -> &StatusSnapshot {
        &self.current
    }

    /// Number of polls started so far
    pub fn issued(&self) -> u64 {
        self.issued
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Celsius, Reading};

    fn snap(temp: f64) -> StatusSnapshot {
        StatusSnapshot {
            temperature: Reading::Value(Celsius(temp)),
            fan_pwm: Reading::Value(0),
        }
    }

    #[test]
    fn test_starts_unavailable() {
        let board = StatusBoard::new();
        assert_eq!(board.current().summary(), "Temp: N/A | Fan PWM: N/A");
    }

    #[test]
    fn test_in_order_completions_apply() {
        let mut board = StatusBoard::new();
        let a = board.begin();
        assert!(board.complete(a, snap(40.0)));
        let b = board.begin();
        assert!(board.complete(b, snap(41.0)));
        assert_eq!(board.current(), &snap(41.0));
    }

    #[test]
    fn test_stale_completion_dropped() {
        let mut board = StatusBoard::new();
        let first = board.begin();
        let second = board.begin();

        assert!(board.complete(second, snap(50.0)));
        assert!(!board.complete(first, snap(45.0)));
        assert_eq!(board.current(), &snap(50.0));
        assert_eq!(board.issued(), 2);
    }
}
