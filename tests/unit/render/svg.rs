use std::time::Duration;

use super::*;
use crate::{config::SnapConfig, effects::timeline::DissolveTimeline};

fn renderer() -> DissolveFrameRenderer {
    DissolveFrameRenderer::new(Canvas::new(64, 48).unwrap(), &RevealConfig::default()).unwrap()
}

fn timeline() -> DissolveTimeline {
    DissolveTimeline::new(&SnapConfig::default()).unwrap()
}

#[test]
fn document_embeds_sample_values() {
    let r = renderer();
    let sample = timeline().sample(Duration::from_millis(200));
    let doc = r.document(&sample);

    assert!(doc.contains(r#"filter="url(#dissolve-filter)""#));
    assert!(doc.contains(&format!(r#"scale="{}""#, format_scale(sample.displacement))));
    assert!(doc.contains(r#"opacity="1""#));
    assert!(doc.contains("Built this... for your smile"));
    assert!(doc.contains(r#"filterUnits="userSpaceOnUse" x="0" y="0" width="64" height="48""#));
}

#[test]
fn label_is_escaped() {
    let mut cfg = RevealConfig::default();
    cfg.content.intro_label = "<b>&'\"".to_string();
    let r = DissolveFrameRenderer::new(Canvas::new(32, 32).unwrap(), &cfg).unwrap();
    let doc = r.document(&timeline().sample(Duration::ZERO));
    assert!(doc.contains("&lt;b&gt;&amp;&apos;&quot;"));
}

#[test]
fn oversized_canvas_is_rejected() {
    let err = DissolveFrameRenderer::new(Canvas::new(10_000, 10).unwrap(), &RevealConfig::default())
        .unwrap_err();
    assert!(matches!(err, RevealError::Validation(_)));
}

#[test]
fn card_is_visible_at_rest_and_gone_while_settling() {
    let r = renderer();
    let tl = timeline();

    let rest = r.render(&tl.sample(Duration::ZERO)).unwrap();
    assert_eq!((rest.width, rest.height), (64, 48));
    assert_eq!(rest.data.len(), 64 * 48 * 4);
    assert!(rest.premultiplied);
    assert_ne!(rest.pixel(22, 20), Some([0, 0, 0, 255]));
    // Corners are page background.
    assert_eq!(rest.pixel(0, 0), Some([0, 0, 0, 255]));

    let settled = r.render(&tl.sample(Duration::from_millis(800))).unwrap();
    assert!(
        settled
            .data
            .chunks_exact(4)
            .all(|px| px == [0, 0, 0, 255])
    );
}

#[test]
fn rendering_is_deterministic() {
    let r = renderer();
    let sample = timeline().sample(Duration::from_millis(450));
    assert_eq!(r.render(&sample).unwrap(), r.render(&sample).unwrap());
}

#[test]
fn late_frames_render_at_small_and_odd_sizes() {
    let tl = timeline();
    for (w, h) in [(64, 48), (33, 17), (100, 100), (320, 240), (1, 1)] {
        let r = DissolveFrameRenderer::new(Canvas::new(w, h).unwrap(), &RevealConfig::default())
            .unwrap();
        assert_eq!(r.region(), canvas_region(Canvas::new(w, h).unwrap()));
        for ms in [550, 599, 600, 800, 1100] {
            let frame = r.render(&tl.sample(Duration::from_millis(ms))).unwrap();
            assert_eq!((frame.width, frame.height), (w, h), "{w}x{h} at {ms}ms");
        }
    }
}
