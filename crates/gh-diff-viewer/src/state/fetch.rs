//! Load state for one asynchronously fetched value.
//!
//! There is no cancellation: a slot hands out a ticket per request and only
//! accepts the result carrying the newest ticket, and nothing after
//! [`FetchSlot::unmount`].

use log::debug;
use std::fmt::Display;

/// What a slot currently shows.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FetchState<T> {
    #[default]
    Idle,
    Loading,
    Loaded(T),
    Failed(String),
}

/// Identifies one request started through [`FetchSlot::begin`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket(u64);

#[derive(Debug, Clone)]
pub struct FetchSlot<T> {
    state: FetchState<T>,
    generation: u64,
    mounted: bool,
}

impl<T> Default for FetchSlot<T> {
    fn default() -> Self {
        Self {
            state: FetchState::Idle,
            generation: 0,
            mounted: true,
        }
    }
}

impl<T> FetchSlot<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &FetchState<T> {
        &self.state
    }

    pub fn value(&self) -> Option<&T> {
        match &self.state {
            FetchState::Loaded(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, FetchState::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            FetchState::Failed(message) => Some(message),
            _ => None,
        }
    }

    /// Start a request. Any earlier ticket becomes stale.
    pub fn begin(&mut self) -> FetchTicket {
        self.generation += 1;
        if self.mounted {
            self.state = FetchState::Loading;
        }
        FetchTicket(self.generation)
    }

    /// Deliver the outcome of a request.
    ///
    /// Returns `false` and drops the result when the ticket is stale or the
    /// slot was unmounted.
    pub fn complete<E: Display>(&mut self, ticket: FetchTicket, result: Result<T, E>) -> bool {
        if !self.mounted {
            debug!("Dropping fetch result after unmount");
            return false;
        }
        if ticket.0 != self.generation {
            debug!(
                "Dropping stale fetch result (ticket {}, current {})",
                ticket.0, self.generation
            );
            return false;
        }

        self.state = match result {
            Ok(value) => FetchState::Loaded(value),
            Err(e) => FetchState::Failed(e.to_string()),
        };
        true
    }

    /// The owner went away; every outstanding result will be dropped.
    pub fn unmount(&mut self) {
        self.mounted = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_load_success() {
        let mut slot: FetchSlot<Vec<u32>> = FetchSlot::new();
        assert_eq!(slot.state(), &FetchState::Idle);

        let ticket = slot.begin();
        assert!(slot.is_loading());

        assert!(slot.complete(ticket, Ok::<_, String>(vec![1, 2])));
        assert_eq!(slot.value(), Some(&vec![1, 2]));
    }

    #[test]
    fn test_failure_keeps_message() {
        let mut slot: FetchSlot<String> = FetchSlot::new();
        let ticket = slot.begin();
        slot.complete(ticket, Err::<String, _>("GitHub API error 404: Not Found"));
        assert_eq!(slot.error(), Some("GitHub API error 404: Not Found"));
    }

    #[test]
    fn test_stale_ticket_is_discarded() {
        let mut slot: FetchSlot<&str> = FetchSlot::new();
        let first = slot.begin();
        let second = slot.begin();

        assert!(slot.complete(second, Ok::<_, String>("new")));
        assert!(!slot.complete(first, Ok::<_, String>("old")));
        assert_eq!(slot.value(), Some(&"new"));
    }

    #[test]
    fn test_result_after_unmount_is_discarded() {
        let mut slot: FetchSlot<u8> = FetchSlot::new();
        let ticket = slot.begin();
        slot.unmount();

        assert!(!slot.complete(ticket, Ok::<_, String>(1)));
        assert!(slot.is_loading());
    }

    #[test]
    fn test_reload_replaces_value() {
        let mut slot: FetchSlot<u8> = FetchSlot::new();
        let ticket = slot.begin();
        slot.complete(ticket, Ok::<_, String>(1));

        let ticket = slot.begin();
        assert_eq!(slot.value(), None);
        slot.complete(ticket, Ok::<_, String>(2));
        assert_eq!(slot.value(), Some(&2));
    }
}
