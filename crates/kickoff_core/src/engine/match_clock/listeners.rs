//! Clock observers
//!
//! Handle-based registry owned by a single `MatchClock`. Listeners run synchronously
//! during `advance` / `proceed_to_*`. They cannot reach the clock itself; instead they
//! get a `ListenerContext` whose commands (unsubscribe, stop) are applied once the
//! dispatch pass is over, so a callback can never observe a half-updated registry.

use super::phase::MatchPhase;
use super::time_state::TimeState;

/// Returned by `MatchClock::subscribe`; pass to `unsubscribe`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerHandle(u64);

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClockEvent {
    /// Time accumulated this tick
    Tick(TimeState),
    PhaseChanged { from: MatchPhase, to: MatchPhase, state: TimeState },
}

impl ClockEvent {
    pub fn state(&self) -> &TimeState {
        match self {
            ClockEvent::Tick(state) => state,
            ClockEvent::PhaseChanged { state, .. } => state,
        }
    }
}

/// Commands a listener may issue from inside its callback.
#[derive(Debug)]
pub struct ListenerContext {
    handle: ListenerHandle,
    removals: Vec<ListenerHandle>,
    stop_requested: bool,
}

impl ListenerContext {
    /// Handle of the listener being called
    pub fn handle(&self) -> ListenerHandle {
        self.handle
    }

    /// Remove the calling listener after this dispatch.
    pub fn unsubscribe(&mut self) {
        self.removals.push(self.handle);
    }

    /// Remove another listener; it will not see the rest of this dispatch.
    pub fn unsubscribe_handle(&mut self, handle: ListenerHandle) {
        self.removals.push(handle);
    }

    /// Stop the clock once dispatch finishes. Safe to request repeatedly.
    pub fn request_stop(&mut self) {
        self.stop_requested = true;
    }
}

pub type Listener = Box<dyn FnMut(&ClockEvent, &mut ListenerContext)>;

#[derive(Default)]
pub(crate) struct ListenerRegistry {
    next_id: u64,
    entries: Vec<(ListenerHandle, Listener)>,
}

/// Result of a dispatch pass
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct DispatchOutcome {
    pub stop_requested: bool,
}

impl ListenerRegistry {
    pub fn subscribe<F>(&mut self, listener: F) -> ListenerHandle
    where
        F: FnMut(&ClockEvent, &mut ListenerContext) + 'static,
    {
        let handle = ListenerHandle(self.next_id);
        self.next_id += 1;
        self.entries.push((handle, Box::new(listener)));
        handle
    }

    /// `false` when the handle is unknown (already removed)
    pub fn unsubscribe(&mut self, handle: ListenerHandle) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(h, _)| *h != handle);
        self.entries.len() != before
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Notify every listener in subscription order.
    pub fn dispatch(&mut self, event: &ClockEvent) -> DispatchOutcome {
        let mut removed: Vec<ListenerHandle> = Vec::new();
        let mut outcome = DispatchOutcome::default();

        for (handle, listener) in self.entries.iter_mut() {
            if removed.contains(handle) {
                continue;
            }
            let mut ctx =
                ListenerContext { handle: *handle, removals: Vec::new(), stop_requested: false };
            listener(event, &mut ctx);

            removed.extend(ctx.removals);
            outcome.stop_requested |= ctx.stop_requested;
        }

        if !removed.is_empty() {
            self.entries.retain(|(h, _)| !removed.contains(h));
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn tick() -> ClockEvent {
        ClockEvent::Tick(TimeState::default())
    }

    #[test]
    fn test_subscribe_and_unsubscribe() {
        let mut registry = ListenerRegistry::default();
        let a = registry.subscribe(|_, _| {});
        let b = registry.subscribe(|_, _| {});
        assert_ne!(a, b);
        assert_eq!(registry.len(), 2);

        assert!(registry.unsubscribe(a));
        assert!(!registry.unsubscribe(a), "second unsubscribe is a no-op");
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_self_unsubscribe_during_dispatch() {
        let mut registry = ListenerRegistry::default();
        let calls = Rc::new(RefCell::new(0));
        let counter = calls.clone();
        registry.subscribe(move |_, ctx| {
            *counter.borrow_mut() += 1;
            ctx.unsubscribe();
        });

        registry.dispatch(&tick());
        registry.dispatch(&tick());
        assert_eq!(*calls.borrow(), 1);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_unsubscribing_a_later_listener_skips_it() {
        let mut registry = ListenerRegistry::default();
        let seen = Rc::new(RefCell::new(Vec::new()));

        // handles are sequential: the second subscription gets ListenerHandle(1)
        let victim = ListenerHandle(1);
        let log = seen.clone();
        registry.subscribe(move |_, ctx| {
            log.borrow_mut().push("first");
            ctx.unsubscribe_handle(victim);
        });
        let log = seen.clone();
        let second = registry.subscribe(move |_, _| log.borrow_mut().push("second"));
        assert_eq!(second, victim);

        registry.dispatch(&tick());
        assert_eq!(*seen.borrow(), vec!["first"]);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_stop_request_is_reported() {
        let mut registry = ListenerRegistry::default();
        registry.subscribe(|_, ctx| {
            ctx.request_stop();
            ctx.request_stop();
        });
        assert!(registry.dispatch(&tick()).stop_requested);
    }
}
