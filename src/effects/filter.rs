use std::{collections::BTreeMap, fmt::Write as _, sync::Arc};

use parking_lot::Mutex;

use crate::{
    config::FilterConfig,
    foundation::error::{RevealError, RevealResult},
};

/// Id the dissolving element references through `filter="url(#...)"`.
pub const DISSOLVE_FILTER_ID: &str = "dissolve-filter";

/// The `feDisplacementMap` primitive whose `scale` attribute is driven by the dissolve.
///
/// Cloning yields another handle to the same node. Attributes are stored as the text that
/// ends up in the document, the way a DOM element keeps them.
#[derive(Clone, Debug, Default)]
pub struct DisplacementMapNode {
    attrs: Arc<Mutex<BTreeMap<String, String>>>,
}

impl DisplacementMapNode {
    /// A node with `scale="0"`.
    pub fn new() -> Self {
        let node = Self::default();
        node.set_attribute("scale", "0");
        node
    }

    pub fn set_attribute(&self, name: &str, value: impl Into<String>) {
        self.attrs.lock().insert(name.to_string(), value.into());
    }

    pub fn attribute(&self, name: &str) -> Option<String> {
        self.attrs.lock().get(name).cloned()
    }

    /// Current `scale` attribute parsed back to a number; `0` when unset or unparsable.
    pub fn scale(&self) -> f64 {
        self.attribute("scale")
            .and_then(|s| s.parse().ok())
            .unwrap_or(0.0)
    }
}

/// Text form of a scale value as written to the attribute: `300`, `0`, `12.5`.
pub fn format_scale(value: f64) -> String {
    value.to_string()
}

/// Area the filter renders into.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FilterRegion {
    /// Percentages of the filtered element's bounding box, as on the live page.
    BoundingBox { origin_pct: f64, size_pct: f64 },
    /// Absolute rectangle in the user space of the filtered element.
    ///
    /// Every primitive inherits this region, so the noise layers and the source graphic
    /// resolve to the same pixel box.
    UserSpace {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
}

impl FilterRegion {
    /// The percentage region from `params`.
    pub fn from_config(params: &FilterConfig) -> Self {
        Self::BoundingBox {
            origin_pct: params.region_origin_pct,
            size_pct: params.region_size_pct,
        }
    }

    /// Reject non-finite coordinates and empty extents.
    pub fn validate(self) -> RevealResult<()> {
        let (coords, extents) = match self {
            Self::BoundingBox {
                origin_pct,
                size_pct,
            } => ([origin_pct, origin_pct], [size_pct, size_pct]),
            Self::UserSpace {
                x,
                y,
                width,
                height,
            } => ([x, y], [width, height]),
        };
        if coords.iter().chain(&extents).any(|v| !v.is_finite()) {
            return Err(RevealError::validation("filter region must be finite"));
        }
        if extents.iter().any(|v| *v <= 0.0) {
            return Err(RevealError::validation("filter region must not be empty"));
        }
        Ok(())
    }

    fn to_attrs(self) -> String {
        match self {
            Self::BoundingBox {
                origin_pct,
                size_pct,
            } => format!(
                r#"x="{origin_pct}%" y="{origin_pct}%" width="{size_pct}%" height="{size_pct}%""#
            ),
            Self::UserSpace {
                x,
                y,
                width,
                height,
            } => format!(
                r#"filterUnits="userSpaceOnUse" x="{x}" y="{y}" width="{width}" height="{height}""#
            ),
        }
    }
}

/// The dissolve filter graph.
///
/// Two fractal-noise layers are merged into a displacement source: a coarse layer whose red
/// and green channels are remapped linearly, and a fine grain layer on top. The source
/// graphic is then displaced by that noise using red for x and green for y, with the
/// strength taken from the [`DisplacementMapNode`].
#[derive(Clone, Debug)]
pub struct DissolveFilter {
    params: FilterConfig,
    region: FilterRegion,
    displacement: DisplacementMapNode,
}

impl DissolveFilter {
    pub fn new(params: FilterConfig, displacement: DisplacementMapNode) -> Self {
        Self {
            region: FilterRegion::from_config(&params),
            params,
            displacement,
        }
    }

    /// Replace the filter region.
    pub fn with_region(mut self, region: FilterRegion) -> Self {
        self.region = region;
        self
    }

    pub fn region(&self) -> FilterRegion {
        self.region
    }

    pub fn displacement(&self) -> &DisplacementMapNode {
        &self.displacement
    }

    /// Emit the `<filter>` element using the node's current `scale`.
    pub fn to_svg(&self) -> String {
        let p = &self.params;
        let region = self.region.to_attrs();
        let scale = self
            .displacement
            .attribute("scale")
            .unwrap_or_else(|| "0".to_string());

        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = write!(
            out,
            r#"<filter id="{DISSOLVE_FILTER_ID}" {region} color-interpolation-filters="sRGB">"#
        );
        let _ = write!(
            out,
            r#"<feTurbulence type="fractalNoise" baseFrequency="{}" numOctaves="{}" result="bigNoise"/>"#,
            p.coarse_frequency, p.coarse_octaves
        );
        let _ = write!(
            out,
            r#"<feComponentTransfer in="bigNoise" result="bigNoiseAdjusted"><feFuncR type="linear" slope="{}" intercept="{}"/><feFuncG type="linear" slope="{}" intercept="{}"/></feComponentTransfer>"#,
            p.red_slope, p.red_intercept, p.green_slope, p.green_intercept
        );
        let _ = write!(
            out,
            r#"<feTurbulence type="fractalNoise" baseFrequency="{}" numOctaves="{}" result="fineNoise"/>"#,
            p.fine_frequency, p.fine_octaves
        );
        out.push_str(
            r#"<feMerge result="combinedNoise"><feMergeNode in="bigNoiseAdjusted"/><feMergeNode in="fineNoise"/></feMerge>"#,
        );
        let _ = write!(
            out,
            r#"<feDisplacementMap in="SourceGraphic" in2="combinedNoise" scale="{scale}" xChannelSelector="R" yChannelSelector="G"/>"#
        );
        out.push_str("</filter>");
        out
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/filter.rs"]
mod tests;
