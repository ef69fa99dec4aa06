//! Reference-counted loading indicator.
//!
//! Every in-flight backend call holds a ticket. The indicator stays on until
//! the last ticket is released, so overlapping requests cannot hide it early.

use uuid::Uuid;

/// Handle for one in-flight operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ticket(Uuid);

#[derive(Debug, Clone)]
struct Pending {
    ticket: Ticket,
    label: String,
}

#[derive(Debug, Clone, Default)]
pub struct LoadingTracker {
    pending: Vec<Pending>,
}

impl LoadingTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new operation and return its ticket.
    pub fn begin(&mut self, label: impl Into<String>) -> Ticket {
        let ticket = Ticket(Uuid::new_v4());
        self.pending.push(Pending {
            ticket,
            label: label.into(),
        });
        ticket
    }

    /// Release a ticket. Returns false if it was unknown (already released).
    pub fn finish(&mut self, ticket: Ticket) -> bool {
        let before = self.pending.len();
        self.pending.retain(|p| p.ticket != ticket);
        self.pending.len() != before
    }

    pub fn is_active(&self) -> bool {
        !self.pending.is_empty()
    }

    pub fn count(&self) -> usize {
        self.pending.len()
    }

    /// Label of the most recently started operation still running.
    pub fn current_label(&self) -> Option<&str> {
        self.pending.last().map(|p| p.label.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlapping_operations_keep_indicator_on() {
        let mut loading = LoadingTracker::new();
        let docs = loading.begin("Generating documentation");
        let repos = loading.begin("Loading repositories");

        assert!(loading.finish(repos));
        assert!(loading.is_active());
        assert_eq!(loading.current_label(), Some("Generating documentation"));

        assert!(loading.finish(docs));
        assert!(!loading.is_active());
    }

    #[test]
    fn double_finish_is_ignored() {
        let mut loading = LoadingTracker::new();
        let t = loading.begin("x");
        assert!(loading.finish(t));
        assert!(!loading.finish(t));
        assert_eq!(loading.count(), 0);
    }
}
