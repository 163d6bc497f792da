use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use log::trace;

pub type Callback<T> = Rc<dyn Fn(&T)>;
pub type SubscriptionId = u64;

pub struct EventEmitter<T: std::fmt::Debug> {
    channel: Channel<T>,
}

impl<T: std::fmt::Debug> Clone for EventEmitter<T> {
    fn clone(&self) -> Self {
        Self {
            channel: self.channel.clone(),
        }
    }
}

pub struct EventObserver<T: std::fmt::Debug> {
    channel: Channel<T>,
}

impl<T: std::fmt::Debug> Clone for EventObserver<T> {
    fn clone(&self) -> Self {
        Self {
            channel: self.channel.clone(),
        }
    }
}

/// Handle returned by [`EventObserver::subscribe`]; consuming it removes the listener.
pub struct Unsubscriber<T: std::fmt::Debug> {
    channel: Channel<T>,
    id: SubscriptionId,
}

impl<T: std::fmt::Debug> Unsubscriber<T> {
    pub fn unsubscribe(self) -> bool {
        self.channel.unsubscribe(self.id)
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Unsubscriber<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Unsubscriber({})", self.id)
    }
}

pub struct Channel<T: std::fmt::Debug> {
    // BTreeMap keeps delivery in subscription order
    listeners: Rc<RefCell<BTreeMap<SubscriptionId, Callback<T>>>>,
    next_id: Rc<RefCell<SubscriptionId>>,
}

impl<T: std::fmt::Debug> Clone for Channel<T> {
    fn clone(&self) -> Self {
        Self {
            listeners: Rc::clone(&self.listeners),
            next_id: Rc::clone(&self.next_id),
        }
    }
}

impl<T: std::fmt::Debug> Channel<T> {
    pub fn new() -> (EventEmitter<T>, EventObserver<T>) {
        let channel = Channel {
            listeners: Rc::new(RefCell::new(BTreeMap::new())),
            next_id: Rc::new(RefCell::new(0)),
        };
        (
            EventEmitter {
                channel: channel.clone(),
            },
            EventObserver { channel },
        )
    }

    fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&T) + 'static,
    {
        let id = {
            let mut next_id = self.next_id.borrow_mut();
            let id = *next_id;
            *next_id += 1;
            id
        };
        self.listeners.borrow_mut().insert(id, Rc::new(callback));
        id
    }

    fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.listeners.borrow_mut().remove(&id).is_some()
    }

    fn emit(&self, data: &T) {
        // snapshot so listeners may (un)subscribe while being notified
        let listeners: Vec<Callback<T>> = self.listeners.borrow().values().cloned().collect();
        trace!(target: "events", "Emitting event to {} listeners: {:?}", listeners.len(), data);
        for listener in listeners {
            listener(data);
        }
    }

    fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }
}

impl<T: std::fmt::Debug> EventEmitter<T> {
    pub fn emit(&self, data: T) {
        self.channel.emit(&data);
    }

    pub fn listener_count(&self) -> usize {
        self.channel.listener_count()
    }
}

impl<T: std::fmt::Debug + 'static> EventObserver<T> {
    pub fn subscribe<F>(&self, callback: F) -> Unsubscriber<T>
    where
        F: Fn(&T) + 'static,
    {
        let id = self.channel.subscribe(callback);
        Unsubscriber {
            channel: self.channel.clone(),
            id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[derive(Debug)]
    enum Ping {
        Star,
        Score(u32),
    }

    #[test]
    fn test_emit_reaches_subscriber() {
        let (emitter, observer) = Channel::<Ping>::new();
        let stars = Rc::new(Cell::new(0));
        let stars_clone = stars.clone();

        let _sub = observer.subscribe(move |ping: &Ping| {
            if let Ping::Star = ping {
                stars_clone.set(stars_clone.get() + 1);
            }
        });

        emitter.emit(Ping::Star);
        emitter.emit(Ping::Score(10));
        assert_eq!(stars.get(), 1);
    }

    #[test]
    fn test_listeners_called_in_subscription_order() {
        let (emitter, observer) = Channel::<Ping>::new();
        let order = Rc::new(RefCell::new(Vec::new()));

        for label in ["first", "second", "third"] {
            let order = order.clone();
            let _ = observer.subscribe(move |_: &Ping| order.borrow_mut().push(label));
        }

        emitter.emit(Ping::Star);
        assert_eq!(*order.borrow(), vec!["first", "second", "third"]);
    }

    #[test]
    fn test_cloned_handles_share_listeners() {
        let (emitter1, observer1) = Channel::<Ping>::new();
        let emitter2 = emitter1.clone();
        let observer2 = observer1.clone();

        let total = Rc::new(Cell::new(0));
        let total_clone = total.clone();
        let _a = observer1.subscribe(move |ping: &Ping| {
            if let Ping::Score(points) = ping {
                total_clone.set(total_clone.get() + points);
            }
        });
        emitter2.emit(Ping::Score(10));
        assert_eq!(total.get(), 10);

        let total_clone = total.clone();
        let _b = observer2.subscribe(move |ping: &Ping| {
            if let Ping::Score(points) = ping {
                total_clone.set(total_clone.get() + points);
            }
        });
        emitter1.emit(Ping::Score(10));
        assert_eq!(total.get(), 30);
        assert_eq!(emitter1.listener_count(), 2);
    }

    #[test]
    fn test_unsubscriber_removes_listener() {
        let (emitter, observer) = Channel::<Ping>::new();
        let counter = Rc::new(Cell::new(0));
        let counter_clone = counter.clone();

        let sub = observer.subscribe(move |_: &Ping| {
            counter_clone.set(counter_clone.get() + 1);
        });

        emitter.emit(Ping::Star);
        assert_eq!(counter.get(), 1);

        assert!(sub.unsubscribe());
        emitter.emit(Ping::Star);
        assert_eq!(counter.get(), 1);
        assert_eq!(emitter.listener_count(), 0);
    }

    #[test]
    fn test_listener_may_subscribe_during_emit() {
        let (emitter, observer) = Channel::<Ping>::new();
        let observer_clone = observer.clone();
        let _sub = observer.subscribe(move |_: &Ping| {
            let _ = observer_clone.subscribe(|_: &Ping| {});
        });

        emitter.emit(Ping::Star);
        assert_eq!(emitter.listener_count(), 2);
    }
}
