use super::*;

fn hold_then_fade() -> Keyframes {
    Keyframes::new(&[1.0, 1.0, 0.0], &[0.0, 0.5, 1.0]).unwrap()
}

#[test]
fn rejects_malformed_tracks() {
    assert!(Keyframes::new(&[], &[]).is_err());
    assert!(Keyframes::new(&[1.0, 2.0], &[0.0]).is_err());
    assert!(Keyframes::new(&[1.0, 2.0], &[0.6, 0.4]).is_err());
    assert!(Keyframes::new(&[1.0, 2.0], &[0.0, 1.5]).is_err());
    assert!(Keyframes::new(&[f64::NAN], &[0.0]).is_err());
}

#[test]
fn hold_segment_stays_at_one_until_midpoint() {
    let kf = hold_then_fade();
    for p in [0.0, 0.1, 0.3, 0.49, 0.5] {
        assert_eq!(kf.sample(p, Ease::OutCubic), 1.0, "progress {p}");
    }
    assert!(kf.sample(0.6, Ease::OutCubic) < 1.0);
}

#[test]
fn fade_segment_is_eased_locally() {
    let kf = hold_then_fade();
    // Local progress in the second segment at p=0.75 is 0.5.
    let expected = 1.0 - Ease::OutCubic.apply(0.5);
    assert!((kf.sample(0.75, Ease::OutCubic) - expected).abs() < 1e-12);
    assert_eq!(kf.sample(1.0, Ease::OutCubic), 0.0);
}

#[test]
fn between_interpolates_with_ease() {
    let kf = Keyframes::between(0.0, 300.0);
    assert_eq!(kf.sample(0.0, Ease::OutCubic), 0.0);
    assert_eq!(kf.sample(1.0, Ease::OutCubic), 300.0);
    assert_eq!(kf.sample(0.5, Ease::Linear), 150.0);
    assert!((kf.sample(0.5, Ease::OutCubic) - 262.5).abs() < 1e-9);
}

#[test]
fn progress_outside_unit_range_clamps_to_ends() {
    let kf = Keyframes::between(1.0, 1.2);
    assert_eq!(kf.sample(-1.0, Ease::OutCubic), 1.0);
    assert_eq!(kf.sample(2.0, Ease::OutCubic), 1.2);
}

#[test]
fn single_key_is_constant() {
    let kf = Keyframes::new(&[4.0], &[0.3]).unwrap();
    assert_eq!(kf.sample(0.0, Ease::Linear), 4.0);
    assert_eq!(kf.sample(1.0, Ease::Linear), 4.0);
}

#[test]
fn keys_are_kept_in_offset_order() {
    let kf = Keyframes::new(&[1.0, 1.0, 0.0], &[0.0, 0.5, 1.0]).unwrap();
    let offsets: Vec<f64> = kf.keys().iter().map(|k| k.offset).collect();
    assert_eq!(offsets, vec![0.0, 0.5, 1.0]);
    assert_eq!(kf.keys()[2], Keyframe { offset: 1.0, value: 0.0 });
}
