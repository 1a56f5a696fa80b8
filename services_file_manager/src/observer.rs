//! Change subscriptions
//!
//! Observers are called with a fresh [`DashboardView`] after every state
//! change, in subscription order.

use crate::view::DashboardView;
use std::fmt;

/// Receives dashboard views
pub trait FileManagerObserver {
    /// Called after a state change
    fn on_change(&mut self, view: &DashboardView);
}

impl<F> FileManagerObserver for F
where
    F: FnMut(&DashboardView),
{
    fn on_change(&mut self, view: &DashboardView) {
        self(view)
    }
}

/// Handle returned by `subscribe`, used to unsubscribe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObserverId(u64);

impl fmt::Display for ObserverId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "observer:{}", self.0)
    }
}

/// Ordered set of observers
#[derive(Default)]
pub(crate) struct ObserverRegistry {
    next_id: u64,
    observers: Vec<(ObserverId, Box<dyn FileManagerObserver>)>,
}

impl ObserverRegistry {
    pub(crate) fn subscribe(&mut self, observer: Box<dyn FileManagerObserver>) -> ObserverId {
        let id = ObserverId(self.next_id);
        self.next_id += 1;
        self.observers.push((id, observer));
        id
    }

    pub(crate) fn unsubscribe(&mut self, id: ObserverId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(existing, _)| *existing != id);
        self.observers.len() != before
    }

    pub(crate) fn notify(&mut self, view: &DashboardView) {
        for (_, observer) in &mut self.observers {
            observer.on_change(view);
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.observers.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }
}

impl fmt::Debug for ObserverRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObserverRegistry")
            .field("observers", &self.len())
            .finish()
    }
}
