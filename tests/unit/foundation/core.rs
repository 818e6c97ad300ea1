use super::*;

#[test]
fn fps_rejects_zero_parts() {
    assert!(Fps::new(0, 1).is_err());
    assert!(Fps::new(30, 0).is_err());
    assert_eq!(Fps::new(30, 1).unwrap().as_f64(), 30.0);
}

#[test]
fn frame_time_follows_rate() {
    let fps = Fps::new(10, 1).unwrap();
    assert_eq!(fps.frame_time(FrameIndex(0)), Duration::ZERO);
    assert_eq!(fps.frame_time(FrameIndex(5)), Duration::from_millis(500));
}

#[test]
fn frames_covering_includes_both_endpoints() {
    let fps = Fps::new(10, 1).unwrap();
    assert_eq!(fps.frames_covering(Duration::ZERO), 1);
    assert_eq!(fps.frames_covering(Duration::from_millis(1100)), 12);
    assert_eq!(fps.frames_covering(Duration::from_millis(1150)), 13);
}

#[test]
fn frame_range_validates_and_iterates() {
    assert!(FrameRange::new(FrameIndex(3), FrameIndex(1)).is_err());
    let r = FrameRange::new(FrameIndex(2), FrameIndex(5)).unwrap();
    assert_eq!(r.len_frames(), 3);
    assert!(!r.is_empty());
    assert_eq!(
        r.iter().collect::<Vec<_>>(),
        vec![FrameIndex(2), FrameIndex(3), FrameIndex(4)]
    );
}

#[test]
fn canvas_must_not_be_empty() {
    assert!(Canvas::new(0, 10).is_err());
    assert!(Canvas::new(10, 0).is_err());
    assert_eq!(
        Canvas::new(4, 3).unwrap(),
        Canvas {
            width: 4,
            height: 3
        }
    );
}
