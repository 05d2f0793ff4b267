//! Drops responses of superseded requests.
//!
//! A screen that reloads a collection calls [`RequestSeq::issue`] before each
//! request and applies the response only while the ticket is still current.

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RequestSeq {
    latest: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

impl RequestSeq {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&mut self) -> Ticket {
        self.latest += 1;
        Ticket(self.latest)
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        ticket.0 == self.latest
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latest_ticket_wins() {
        let mut seq = RequestSeq::new();
        let first = seq.issue();
        assert!(seq.is_current(first));

        let second = seq.issue();
        assert!(!seq.is_current(first));
        assert!(seq.is_current(second));
    }

    #[test]
    fn test_tickets_are_distinct() {
        let mut seq = RequestSeq::new();
        let a = seq.issue();
        let b = seq.issue();
        assert_ne!(a, b);
    }
}
