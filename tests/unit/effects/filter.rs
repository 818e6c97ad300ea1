use super::*;

#[test]
fn new_node_starts_at_zero() {
    let node = DisplacementMapNode::new();
    assert_eq!(node.attribute("scale").as_deref(), Some("0"));
    assert_eq!(node.scale(), 0.0);
}

#[test]
fn scale_text_matches_plain_number_formatting() {
    assert_eq!(format_scale(300.0), "300");
    assert_eq!(format_scale(0.0), "0");
    assert_eq!(format_scale(12.5), "12.5");
}

#[test]
fn clones_share_attributes() {
    let node = DisplacementMapNode::new();
    let other = node.clone();
    other.set_attribute("scale", format_scale(42.25));
    assert_eq!(node.scale(), 42.25);
}

#[test]
fn svg_carries_current_scale_and_both_noise_layers() {
    let node = DisplacementMapNode::new();
    let filter = DissolveFilter::new(FilterConfig::default(), node.clone());

    let svg = filter.to_svg();
    assert!(svg.starts_with(r#"<filter id="dissolve-filter" x="-300%" y="-300%" width="600%" height="600%""#));
    assert!(svg.contains(r#"color-interpolation-filters="sRGB""#));
    assert!(svg.contains(r#"baseFrequency="0.015" numOctaves="1" result="bigNoise""#));
    assert!(svg.contains(r#"baseFrequency="1" numOctaves="2" result="fineNoise""#));
    assert!(svg.contains(r#"<feFuncG type="linear" slope="3" intercept="-0.6"/>"#));
    assert!(svg.contains(r#"scale="0""#));

    node.set_attribute("scale", "150");
    assert!(filter.to_svg().contains(r#"scale="150" xChannelSelector="R""#));
}

#[test]
fn user_space_region_replaces_percentages() {
    let filter = DissolveFilter::new(FilterConfig::default(), DisplacementMapNode::new())
        .with_region(FilterRegion::UserSpace {
            x: 0.0,
            y: 0.0,
            width: 33.0,
            height: 17.0,
        });
    let svg = filter.to_svg();
    assert!(svg.starts_with(
        r#"<filter id="dissolve-filter" filterUnits="userSpaceOnUse" x="0" y="0" width="33" height="17""#
    ));
    assert!(!svg.contains('%'));
}

#[test]
fn region_comes_from_config_by_default() {
    let filter = DissolveFilter::new(FilterConfig::default(), DisplacementMapNode::new());
    assert_eq!(
        filter.region(),
        FilterRegion::BoundingBox {
            origin_pct: -300.0,
            size_pct: 600.0
        }
    );
    assert!(filter.region().validate().is_ok());
}

#[test]
fn empty_or_non_finite_regions_are_rejected() {
    for region in [
        FilterRegion::UserSpace {
            x: 0.0,
            y: 0.0,
            width: 0.0,
            height: 10.0,
        },
        FilterRegion::UserSpace {
            x: f64::NAN,
            y: 0.0,
            width: 10.0,
            height: 10.0,
        },
        FilterRegion::BoundingBox {
            origin_pct: -10.0,
            size_pct: -5.0,
        },
    ] {
        let err = region.validate().unwrap_err();
        assert!(matches!(err, RevealError::Validation(_)), "{region:?}");
    }
}
