use std::cell::RefCell;
use std::rc::Rc;

use super::{EventObserver, Unsubscriber};

/// Something that folds a stream of events into its own state.
pub trait EventHandler<T> {
    fn handle_event(&mut self, event: &T);
}

/// Routes every event published on `observer` into `handler`.
pub fn attach_handler<T, H>(observer: &EventObserver<T>, handler: &Rc<RefCell<H>>) -> Unsubscriber<T>
where
    T: std::fmt::Debug + 'static,
    H: EventHandler<T> + 'static,
{
    let handler = Rc::clone(handler);
    observer.subscribe(move |event| handler.borrow_mut().handle_event(event))
}
