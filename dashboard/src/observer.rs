use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

type Callback<T> = Rc<dyn Fn(&T)>;
type Slots<T> = RefCell<Vec<(u64, Callback<T>)>>;

/// A list of callbacks invoked whenever a value is published.
pub struct Observers<T> {
    next_id: Cell<u64>,
    slots: Rc<Slots<T>>,
}

impl<T> Default for Observers<T> {
    fn default() -> Self {
        Self {
            next_id: Cell::new(0),
            slots: Rc::new(RefCell::new(Vec::new())),
        }
    }
}

impl<T: 'static> Observers<T> {
    pub fn subscribe(&self, callback: impl Fn(&T) + 'static) -> Subscription {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.slots.borrow_mut().push((id, Rc::new(callback)));

        let slots: Weak<Slots<T>> = Rc::downgrade(&self.slots);
        Subscription {
            cancel: Some(Box::new(move || {
                if let Some(slots) = slots.upgrade() {
                    slots.borrow_mut().retain(|(slot_id, _)| *slot_id != id);
                }
            })),
        }
    }

    /// Callbacks may subscribe or unsubscribe while being notified; they see
    /// the list as it was when publishing started.
    pub fn notify(&self, value: &T) {
        let callbacks: Vec<Callback<T>> = self
            .slots
            .borrow()
            .iter()
            .map(|(_, callback)| callback.clone())
            .collect();
        for callback in callbacks {
            callback(value);
        }
    }

    pub fn len(&self) -> usize {
        self.slots.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Keeps a callback registered. Dropping it unsubscribes.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drop_unsubscribes() {
        let observers = Observers::<u32>::default();
        let seen = Rc::new(RefCell::new(Vec::new()));

        let first = {
            let seen = seen.clone();
            observers.subscribe(move |v| seen.borrow_mut().push(("first", *v)))
        };
        let _second = {
            let seen = seen.clone();
            observers.subscribe(move |v| seen.borrow_mut().push(("second", *v)))
        };

        observers.notify(&1);
        drop(first);
        observers.notify(&2);

        assert_eq!(
            *seen.borrow(),
            vec![("first", 1), ("second", 1), ("second", 2)]
        );
        assert_eq!(observers.len(), 1);
    }

    #[test]
    fn subscription_outliving_observers_is_harmless() {
        let observers = Observers::<()>::default();
        let subscription = observers.subscribe(|_| {});
        drop(observers);
        drop(subscription);
    }
}
