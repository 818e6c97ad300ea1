use std::sync::Arc;

use parking_lot::Mutex;

use super::*;

fn transition(ms: u64) -> Transition {
    Transition {
        duration: Duration::from_millis(ms),
        ease: Ease::OutCubic,
        frame_interval: Duration::from_millis(10),
    }
}

#[tokio::test(start_paused = true)]
async fn animation_ends_exactly_on_target() {
    let value = MotionValue::new(0.0);
    let handle = animate(vec![Tween::to(&value, 300.0)], transition(600));
    handle.finished().await.unwrap();
    assert_eq!(value.get(), 300.0);
}

#[tokio::test(start_paused = true)]
async fn samples_are_monotonic_for_rising_track() {
    let value = MotionValue::new(0.0);
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let _sub = value.on_change(move |v| sink.lock().push(v));

    animate(vec![Tween::to(&value, 1.0)], transition(200))
        .finished()
        .await
        .unwrap();

    let seen = seen.lock();
    assert!(seen.len() > 5, "expected intermediate frames, got {seen:?}");
    assert!(seen.windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(*seen.last().unwrap(), 1.0);
}

#[tokio::test(start_paused = true)]
async fn animation_takes_its_duration() {
    let value = MotionValue::new(1.0);
    let start = Instant::now();
    animate(vec![Tween::to(&value, 1.2)], transition(600))
        .finished()
        .await
        .unwrap();
    let elapsed = start.elapsed();
    assert!(elapsed >= Duration::from_millis(600));
    assert!(elapsed < Duration::from_millis(620));
}

#[tokio::test(start_paused = true)]
async fn tracks_share_one_clock() {
    let scale = MotionValue::new(1.0);
    let opacity = MotionValue::new(1.0);
    let fade = Keyframes::new(&[1.0, 1.0, 0.0], &[0.0, 0.5, 1.0]).unwrap();
    let handle = animate(
        vec![Tween::to(&scale, 1.2), Tween::keyed(&opacity, fade)],
        transition(600),
    );

    tokio::time::sleep(Duration::from_millis(250)).await;
    assert!(scale.get() > 1.0);
    assert_eq!(opacity.get(), 1.0);

    handle.finished().await.unwrap();
    assert_eq!(scale.get(), 1.2);
    assert_eq!(opacity.get(), 0.0);
}

#[test]
fn instant_transition_applies_without_a_runtime() {
    let value = MotionValue::new(300.0);
    let handle = animate(vec![Tween::to(&value, 0.0)], Transition::instant());
    assert_eq!(value.get(), 0.0);
    assert!(handle.is_finished());
}
