//! Request tickets.
//!
//! Every async operation of a container begins by taking a ticket from a
//! [`RequestTracker`]. Beginning again, or invalidating the tracker, makes
//! every earlier ticket stale; applying a result with a stale ticket is a
//! no-op. Only the latest request of an operation ever lands in state.
//!
//! [`KeyedRequests`] does the same per key (post id, follow target) and
//! forgets a key once its request settles.

use std::collections::HashMap;

/// Generation number handed out when a request begins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestTicket(u64);

impl RequestTicket {
    pub fn generation(&self) -> u64 {
        self.0
    }
}

/// Tracks the latest request of one operation.
#[derive(Debug, Clone, Default)]
pub struct RequestTracker {
    generation: u64,
    in_flight: bool,
}

impl RequestTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a request, superseding any in flight.
    pub fn begin(&mut self) -> RequestTicket {
        self.generation += 1;
        self.in_flight = true;
        RequestTicket(self.generation)
    }

    /// Settle the request holding `ticket`.
    ///
    /// Returns false (and changes nothing) when the ticket is stale.
    pub fn settle(&mut self, ticket: RequestTicket) -> bool {
        if !self.is_current(ticket) {
            tracing::debug!(
                "Discarding stale result (ticket {}, current {})",
                ticket.0,
                self.generation
            );
            return false;
        }
        self.in_flight = false;
        true
    }

    /// Make every outstanding ticket stale.
    pub fn invalidate(&mut self) {
        self.generation += 1;
        self.in_flight = false;
    }

    pub fn is_current(&self, ticket: RequestTicket) -> bool {
        self.in_flight && ticket.0 == self.generation
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }
}

/// Latest request per key, for operations that run on many targets.
///
/// Generations are shared across keys, so a key that settled and started
/// again never reuses an old ticket.
#[derive(Debug, Clone, Default)]
pub struct KeyedRequests {
    generation: u64,
    in_flight: HashMap<String, u64>,
}

impl KeyedRequests {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a request on `key`, superseding any in flight on it.
    pub fn begin(&mut self, key: &str) -> RequestTicket {
        self.generation += 1;
        self.in_flight.insert(key.to_string(), self.generation);
        RequestTicket(self.generation)
    }

    /// Settle the request on `key` holding `ticket`; the key is forgotten.
    pub fn settle(&mut self, key: &str, ticket: RequestTicket) -> bool {
        if self.in_flight.get(key) != Some(&ticket.0) {
            tracing::debug!("Discarding stale result for {} (ticket {})", key, ticket.0);
            return false;
        }
        self.in_flight.remove(key);
        true
    }

    pub fn is_in_flight(&self, key: &str) -> bool {
        self.in_flight.contains_key(key)
    }

    /// Number of keys with a request in flight.
    pub fn pending(&self) -> usize {
        self.in_flight.len()
    }

    /// Make every outstanding ticket stale.
    pub fn clear(&mut self) {
        self.in_flight.clear();
    }
}
