use super::*;

const ALL: [Ease; 2] = [Ease::Linear, Ease::OutCubic];

#[test]
fn endpoints_are_exact() {
    for ease in ALL {
        assert_eq!(ease.apply(0.0), 0.0);
        assert_eq!(ease.apply(1.0), 1.0);
    }
}

#[test]
fn out_of_range_progress_is_clamped() {
    for ease in ALL {
        assert_eq!(ease.apply(-3.0), 0.0);
        assert_eq!(ease.apply(7.5), 1.0);
    }
}

#[test]
fn out_cubic_matches_closed_form() {
    for t in [0.1, 0.25, 0.5, 0.9] {
        let expected = 1.0 - (1.0 - t) * (1.0 - t) * (1.0 - t);
        assert!((Ease::OutCubic.apply(t) - expected).abs() < 1e-12);
    }
    // Front-loaded: most of the motion happens early.
    assert!(Ease::OutCubic.apply(0.5) > 0.85);
}

#[test]
fn curves_are_monotonic() {
    for ease in ALL {
        let mut prev = ease.apply(0.0);
        for i in 1..=20 {
            let v = ease.apply(f64::from(i) / 20.0);
            assert!(v >= prev, "{ease:?} decreased at step {i}");
            prev = v;
        }
    }
}

#[test]
fn default_is_out_cubic() {
    assert_eq!(Ease::default(), Ease::OutCubic);
}

#[test]
fn linear_is_identity() {
    for t in [0.0, 0.2, 0.5, 0.75, 1.0] {
        assert_eq!(Ease::Linear.apply(t), t);
    }
}
