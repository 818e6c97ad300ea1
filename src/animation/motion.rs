use std::sync::{Arc, Weak};

use parking_lot::Mutex;

type Listener = Arc<dyn Fn(f64) + Send + Sync>;

struct MotionInner {
    current: f64,
    next_id: u64,
    listeners: Vec<(u64, Listener)>,
}

/// An observable scalar that animations write into.
///
/// Cloning yields another handle to the same value. Change listeners registered with
/// [`MotionValue::on_change`] run synchronously on every `set` that actually changes the
/// value, outside the internal lock, so a listener may read the value it observes.
#[derive(Clone)]
pub struct MotionValue {
    inner: Arc<Mutex<MotionInner>>,
}

impl std::fmt::Debug for MotionValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.lock();
        f.debug_struct("MotionValue")
            .field("current", &inner.current)
            .field("listeners", &inner.listeners.len())
            .finish()
    }
}

impl MotionValue {
    /// Create a value starting at `initial`.
    pub fn new(initial: f64) -> Self {
        Self {
            inner: Arc::new(Mutex::new(MotionInner {
                current: initial,
                next_id: 0,
                listeners: Vec::new(),
            })),
        }
    }

    /// Current value.
    pub fn get(&self) -> f64 {
        self.inner.lock().current
    }

    /// Store `value` and notify listeners if it differs from the current value.
    pub fn set(&self, value: f64) {
        let listeners: Vec<Listener> = {
            let mut inner = self.inner.lock();
            if inner.current == value {
                return;
            }
            inner.current = value;
            inner.listeners.iter().map(|(_, l)| Arc::clone(l)).collect()
        };
        for listener in listeners {
            listener(value);
        }
    }

    /// Register `listener` for value changes.
    ///
    /// The listener stays registered until the returned [`Subscription`] is dropped.
    #[must_use = "dropping the subscription unregisters the listener"]
    pub fn on_change<F>(&self, listener: F) -> Subscription
    where
        F: Fn(f64) + Send + Sync + 'static,
    {
        let mut inner = self.inner.lock();
        let id = inner.next_id;
        inner.next_id += 1;
        inner.listeners.push((id, Arc::new(listener)));
        Subscription {
            value: Arc::downgrade(&self.inner),
            id,
        }
    }

    /// Number of live listeners.
    pub fn listener_count(&self) -> usize {
        self.inner.lock().listeners.len()
    }
}

/// Keeps a [`MotionValue`] listener registered; unregisters it on drop.
pub struct Subscription {
    value: Weak<Mutex<MotionInner>>,
    id: u64,
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(inner) = self.value.upgrade() {
            inner.lock().listeners.retain(|(id, _)| *id != self.id);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/motion.rs"]
mod tests;
