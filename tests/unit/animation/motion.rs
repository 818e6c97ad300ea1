use std::sync::atomic::{AtomicUsize, Ordering};

use super::*;

#[test]
fn set_notifies_only_on_change() {
    let value = MotionValue::new(0.0);
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let _sub = value.on_change(move |v| sink.lock().push(v));

    value.set(0.0);
    value.set(12.5);
    value.set(12.5);
    value.set(300.0);

    assert_eq!(*seen.lock(), vec![12.5, 300.0]);
    assert_eq!(value.get(), 300.0);
}

#[test]
fn dropping_subscription_unregisters() {
    let value = MotionValue::new(1.0);
    let hits = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&hits);
    let sub = value.on_change(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    });
    assert_eq!(value.listener_count(), 1);

    value.set(2.0);
    drop(sub);
    value.set(3.0);

    assert_eq!(hits.load(Ordering::SeqCst), 1);
    assert_eq!(value.listener_count(), 0);
}

#[test]
fn clones_share_state() {
    let a = MotionValue::new(0.0);
    let b = a.clone();
    b.set(7.0);
    assert_eq!(a.get(), 7.0);
}

#[test]
fn listener_may_read_the_value() {
    let value = MotionValue::new(0.0);
    let reader = value.clone();
    let seen = Arc::new(Mutex::new(None));
    let sink = Arc::clone(&seen);
    let _sub = value.on_change(move |v| {
        *sink.lock() = Some((v, reader.get()));
    });
    value.set(4.0);
    assert_eq!(*seen.lock(), Some((4.0, 4.0)));
}

#[test]
fn subscription_outliving_value_is_harmless() {
    let value = MotionValue::new(0.0);
    let sub = value.on_change(|_| {});
    drop(value);
    drop(sub);
}
