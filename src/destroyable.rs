/// Implemented by owners of subscriptions or pending timers that must be released explicitly;
/// `Rc` cycles through channel callbacks are not cleaned up on drop.
pub trait Destroyable {
    fn destroy(&mut self);
}
