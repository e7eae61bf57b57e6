//! One-shot and persistent callback subscriptions
//!
//! Explicit subscription kinds instead of flagging closures after the fact:
//! a one-shot subscriber is removed the first time the list fires, a
//! persistent one stays until cleared.

struct Subscriber<T> {
    callback: Box<dyn FnMut(&T)>,
    once: bool,
}

/// Ordered list of event callbacks
pub struct CallbackList<T = ()> {
    subscribers: Vec<Subscriber<T>>,
}

impl<T> CallbackList<T> {
    pub fn new() -> Self {
        Self {
            subscribers: Vec::new(),
        }
    }

    /// Subscribe for every emission
    pub fn on(&mut self, callback: impl FnMut(&T) + 'static) {
        self.subscribers.push(Subscriber {
            callback: Box::new(callback),
            once: false,
        });
    }

    /// Subscribe for the next emission only
    pub fn once(&mut self, callback: impl FnMut(&T) + 'static) {
        self.subscribers.push(Subscriber {
            callback: Box::new(callback),
            once: true,
        });
    }

    /// Fire all subscribers in subscription order, dropping one-shots
    pub fn emit(&mut self, value: &T) {
        let mut i = 0;
        while i < self.subscribers.len() {
            if self.subscribers[i].once {
                let mut subscriber = self.subscribers.remove(i);
                (subscriber.callback)(value);
            } else {
                (self.subscribers[i].callback)(value);
                i += 1;
            }
        }
    }

    /// Drop every subscriber
    pub fn clear(&mut self) {
        self.subscribers.clear();
    }

    pub fn len(&self) -> usize {
        self.subscribers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }
}

impl<T> Default for CallbackList<T> {
    fn default() -> Self {
        Self::new()
    }
}
