use std::fmt;

/// Crouch state-machine signals. Neither carries a payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CrouchSignal {
    Start,
    End,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

struct Subscription {
    id: SubscriptionId,
    signal: CrouchSignal,
    handler: Box<dyn FnMut()>,
}

/// Observers of crouch transitions. Handlers run synchronously in the order
/// they were subscribed.
#[derive(Default)]
pub struct CrouchEvents {
    subscriptions: Vec<Subscription>,
    next_id: u64,
}

impl CrouchEvents {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, signal: CrouchSignal, handler: impl FnMut() + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscriptions.push(Subscription {
            id,
            signal,
            handler: Box::new(handler),
        });
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscriptions.len();
        self.subscriptions.retain(|s| s.id != id);
        self.subscriptions.len() != before
    }

    pub fn fire(&mut self, signal: CrouchSignal) {
        for subscription in self.subscriptions.iter_mut().filter(|s| s.signal == signal) {
            (subscription.handler)();
        }
    }

    pub fn subscriber_count(&self, signal: CrouchSignal) -> usize {
        self.subscriptions.iter().filter(|s| s.signal == signal).count()
    }
}

impl fmt::Debug for CrouchEvents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CrouchEvents")
            .field("start", &self.subscriber_count(CrouchSignal::Start))
            .field("end", &self.subscriber_count(CrouchSignal::End))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    #[test]
    fn fires_in_subscription_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut events = CrouchEvents::new();

        for tag in ["first", "second", "third"] {
            let log = Rc::clone(&log);
            events.subscribe(CrouchSignal::Start, move || log.borrow_mut().push(tag));
        }
        let end_log = Rc::clone(&log);
        events.subscribe(CrouchSignal::End, move || end_log.borrow_mut().push("end"));

        events.fire(CrouchSignal::Start);
        assert_eq!(*log.borrow(), vec!["first", "second", "third"]);
    }

    #[test]
    fn unsubscribed_handler_is_silent() {
        let hits = Rc::new(RefCell::new(0));
        let mut events = CrouchEvents::new();
        let counter = Rc::clone(&hits);
        let id = events.subscribe(CrouchSignal::End, move || *counter.borrow_mut() += 1);

        events.fire(CrouchSignal::End);
        assert!(events.unsubscribe(id));
        assert!(!events.unsubscribe(id));
        events.fire(CrouchSignal::End);

        assert_eq!(*hits.borrow(), 1);
        assert_eq!(events.subscriber_count(CrouchSignal::End), 0);
    }
}
