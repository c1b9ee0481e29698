use payloads::RequestId;
use std::collections::HashSet;
use std::hash::Hash;

/// Which rows have an action in flight, and which action.
///
/// Every row is tracked on its own, so starting an action on one row never
/// clears or overwrites the marker of another.
#[derive(Debug, Clone)]
pub struct PendingActions<A> {
    actions: HashSet<(RequestId, A)>,
}

impl<A> Default for PendingActions<A> {
    fn default() -> Self {
        Self {
            actions: HashSet::new(),
        }
    }
}

impl<A: Copy + Eq + Hash> PendingActions<A> {
    pub fn start(&mut self, request_id: RequestId, action: A) {
        self.actions.insert((request_id, action));
    }

    pub fn settle(&mut self, request_id: RequestId, action: A) {
        self.actions.remove(&(request_id, action));
    }

    pub fn contains(&self, request_id: RequestId, action: A) -> bool {
        self.actions.contains(&(request_id, action))
    }

    /// Rows with `action` in flight, in ascending id order.
    pub fn rows(&self, action: A) -> Vec<RequestId> {
        let mut rows: Vec<RequestId> = self
            .actions
            .iter()
            .filter(|(_, a)| *a == action)
            .map(|(id, _)| *id)
            .collect();
        rows.sort();
        rows
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum Action {
        Approve,
        Delete,
    }

    #[test]
    fn rows_are_tracked_independently() {
        let mut pending = PendingActions::default();
        pending.start(RequestId(1), Action::Approve);
        pending.start(RequestId(2), Action::Approve);
        pending.start(RequestId(2), Action::Delete);

        pending.settle(RequestId(1), Action::Approve);

        assert!(!pending.contains(RequestId(1), Action::Approve));
        assert!(pending.contains(RequestId(2), Action::Approve));
        assert_eq!(pending.rows(Action::Approve), vec![RequestId(2)]);
        assert_eq!(pending.rows(Action::Delete), vec![RequestId(2)]);

        pending.settle(RequestId(2), Action::Approve);
        pending.settle(RequestId(2), Action::Delete);
        assert!(pending.is_empty());
    }
}
