//! Observable values for the view-state holders.
//!
//! An [`Observable`] owns a value and a list of subscriber callbacks. Every
//! mutation goes through it, so subscribers see each change exactly once.
//! The plugin is single-threaded, so callbacks are neither `Send` nor `Sync`.

/// Handle returned by [`Observable::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Subscriber<T> = Box<dyn FnMut(&T)>;

/// A value that notifies subscribers when it changes.
///
/// # Examples
///
/// ```
/// use std::cell::Cell;
/// use std::rc::Rc;
/// use zodo::app::observable::Observable;
///
/// let seen = Rc::new(Cell::new(0));
/// let mut count = Observable::new(0);
///
/// let sink = Rc::clone(&seen);
/// count.subscribe(move |v| sink.set(*v));
/// count.update(|v| *v += 2);
///
/// assert_eq!(seen.get(), 2);
/// assert_eq!(count.revision(), 1);
/// ```
pub struct Observable<T> {
    value: T,
    revision: u64,
    next_id: u64,
    subscribers: Vec<(SubscriptionId, Subscriber<T>)>,
}

impl<T> Observable<T> {
    pub const fn new(value: T) -> Self {
        Self {
            value,
            revision: 0,
            next_id: 0,
            subscribers: Vec::new(),
        }
    }

    /// Current snapshot.
    pub const fn get(&self) -> &T {
        &self.value
    }

    /// Number of notified changes since construction.
    pub const fn revision(&self) -> u64 {
        self.revision
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Registers a callback run after every change. It is not called with the
    /// current value; read [`get`](Self::get) for that.
    pub fn subscribe(&mut self, callback: impl FnMut(&T) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    /// Removes a subscriber. Returns `false` if it was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        self.subscribers.len() != before
    }

    /// Replaces the value and notifies.
    pub fn set(&mut self, value: T) {
        self.value = value;
        self.notify();
    }

    /// Mutates the value in place and notifies, even if nothing changed.
    pub fn update<R>(&mut self, f: impl FnOnce(&mut T) -> R) -> R {
        let result = f(&mut self.value);
        self.notify();
        result
    }

    fn notify(&mut self) {
        self.revision += 1;
        for (_, callback) in &mut self.subscribers {
            callback(&self.value);
        }
    }
}

impl<T: PartialEq> Observable<T> {
    /// Replaces the value and notifies only if it differs.
    pub fn set_if_changed(&mut self, value: T) -> bool {
        if self.value == value {
            return false;
        }
        self.set(value);
        true
    }
}

impl<T: Clone + PartialEq> Observable<T> {
    /// Mutates a copy and commits it only if it differs from the current
    /// value. Returns whether subscribers were notified.
    pub fn update_if_changed(&mut self, f: impl FnOnce(&mut T)) -> bool {
        let mut next = self.value.clone();
        f(&mut next);
        self.set_if_changed(next)
    }
}

impl<T: Default> Default for Observable<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Observable")
            .field("value", &self.value)
            .field("revision", &self.revision)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn recorder<T: Clone + 'static>() -> (Rc<RefCell<Vec<T>>>, impl FnMut(&T)) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        (log, move |v: &T| sink.borrow_mut().push(v.clone()))
    }

    #[test]
    fn test_update_always_notifies() {
        let mut value = Observable::new(1);
        let (log, cb) = recorder();
        value.subscribe(cb);

        value.update(|v| *v = 1);
        value.update(|v| *v = 5);

        assert_eq!(*log.borrow(), vec![1, 5]);
        assert_eq!(value.revision(), 2);
    }

    #[test]
    fn test_update_if_changed_skips_equal_values() {
        let mut value = Observable::new(String::from("a"));
        let (log, cb) = recorder();
        value.subscribe(cb);

        assert!(!value.update_if_changed(|v| *v = "a".to_string()));
        assert!(value.update_if_changed(|v| v.push('b')));

        assert_eq!(*log.borrow(), vec!["ab".to_string()]);
    }

    #[test]
    fn test_unsubscribe_stops_notifications() {
        let mut value = Observable::new(0);
        let (log, cb) = recorder();
        let id = value.subscribe(cb);

        value.set(1);
        assert!(value.unsubscribe(id));
        assert!(!value.unsubscribe(id));
        value.set(2);

        assert_eq!(*log.borrow(), vec![1]);
        assert_eq!(value.subscriber_count(), 0);
    }
}
