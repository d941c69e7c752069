// ============================================================================
// REACTIVITY - Shared value + subscriber notifications
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

type Callback = Rc<dyn Fn()>;

/// Reactive value. Clones share both the value and the subscriber list.
pub struct ReactiveState<T> {
    value: Rc<RefCell<T>>,
    subscribers: Rc<RefCell<Vec<Callback>>>,
}

impl<T> ReactiveState<T> {
    pub fn new(value: T) -> Self {
        Self {
            value: Rc::new(RefCell::new(value)),
            subscribers: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// Shared handle to the inner value
    pub fn get(&self) -> Rc<RefCell<T>> {
        self.value.clone()
    }

    /// Read without cloning
    pub fn with<R>(&self, reader: impl FnOnce(&T) -> R) -> R {
        reader(&self.value.borrow())
    }

    /// Replace the value and notify
    pub fn set(&self, new_value: T) {
        *self.value.borrow_mut() = new_value;
        self.notify();
    }

    /// Mutate in place and notify; returns whatever the closure returns
    pub fn update<R, F>(&self, updater: F) -> R
    where
        F: FnOnce(&mut T) -> R,
    {
        let result = updater(&mut self.value.borrow_mut());
        self.notify();
        result
    }

    pub fn subscribe<F>(&self, callback: F)
    where
        F: Fn() + 'static,
    {
        self.subscribers.borrow_mut().push(Rc::new(callback));
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.borrow().len()
    }

    fn notify(&self) {
        // Snapshot so callbacks may subscribe or read state while we iterate
        let callbacks: Vec<Callback> = self.subscribers.borrow().iter().cloned().collect();
        for callback in callbacks {
            callback();
        }
    }
}

impl<T: Clone> ReactiveState<T> {
    pub fn snapshot(&self) -> T {
        self.value.borrow().clone()
    }
}

impl<T: Default> Default for ReactiveState<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T> Clone for ReactiveState<T> {
    fn clone(&self) -> Self {
        Self {
            value: self.value.clone(),
            subscribers: self.subscribers.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn set_and_update_notify_subscribers() {
        let state = ReactiveState::new(1);
        let hits = Rc::new(Cell::new(0));
        let hits_clone = hits.clone();
        state.subscribe(move || hits_clone.set(hits_clone.get() + 1));

        state.set(2);
        let doubled = state.update(|v| {
            *v *= 2;
            *v
        });

        assert_eq!(doubled, 4);
        assert_eq!(state.snapshot(), 4);
        assert_eq!(hits.get(), 2);
    }

    #[test]
    fn clones_share_value_and_subscribers() {
        let state = ReactiveState::new(String::from("a"));
        let clone = state.clone();
        let seen = Rc::new(RefCell::new(String::new()));
        let seen_clone = seen.clone();
        let reader = state.clone();
        state.subscribe(move || *seen_clone.borrow_mut() = reader.snapshot());

        clone.set("b".to_string());
        assert_eq!(state.snapshot(), "b");
        assert_eq!(*seen.borrow(), "b");
        assert_eq!(clone.subscriber_count(), 1);
    }
}
