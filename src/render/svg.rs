use std::{fmt::Write as _, sync::Arc};

use kurbo::{Affine, Point, Vec2};

use crate::{
    config::{FilterConfig, RevealConfig},
    effects::{
        filter::{
            DISSOLVE_FILTER_ID, DisplacementMapNode, DissolveFilter, FilterRegion, format_scale,
        },
        timeline::DissolveSample,
    },
    foundation::{
        core::Canvas,
        error::{RevealError, RevealResult},
    },
    render::frame::FrameRGBA,
};

const PAGE_BACKGROUND: &str = "#000000";
const CARD_MAX_WIDTH: f64 = 260.0;
const CARD_HEIGHT: f64 = 40.0;
const CARD_RADIUS: f64 = 6.0;
const LABEL_SIZE: f64 = 14.0;

// Avoid pathological allocations from CLI-supplied sizes.
const MAX_DIM: u32 = 8_192;

/// Builds and rasterizes the intro card with the dissolve filter applied.
pub struct DissolveFrameRenderer {
    canvas: Canvas,
    label: String,
    filter: FilterConfig,
    options: usvg::Options<'static>,
}

impl std::fmt::Debug for DissolveFrameRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DissolveFrameRenderer")
            .field("canvas", &self.canvas)
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}

impl DissolveFrameRenderer {
    /// Renderer for `canvas` using the label and filter from `cfg`. System fonts are loaded
    /// once here; without any installed fonts the label is simply not drawn.
    pub fn new(canvas: Canvas, cfg: &RevealConfig) -> RevealResult<Self> {
        if canvas.width > MAX_DIM || canvas.height > MAX_DIM {
            return Err(RevealError::validation(format!(
                "canvas too large: {}x{} (max {MAX_DIM}x{MAX_DIM})",
                canvas.width, canvas.height
            )));
        }
        canvas_region(canvas).validate()?;

        let mut db = usvg::fontdb::Database::new();
        db.load_system_fonts();
        tracing::debug!(faces = db.len(), "loaded system fonts");

        Ok(Self {
            canvas,
            label: cfg.content.intro_label.clone(),
            filter: cfg.filter.clone(),
            options: usvg::Options {
                fontdb: Arc::new(db),
                ..Default::default()
            },
        })
    }

    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Filter region used offline: the whole canvas in user space.
    ///
    /// A percentage region around the scaled card makes resvg clip the noise layers and the
    /// source graphic to different pixel boxes, which the displacement map cannot combine.
    pub fn region(&self) -> FilterRegion {
        canvas_region(self.canvas)
    }

    /// SVG document for one sample of the dissolve.
    pub fn document(&self, sample: &DissolveSample) -> String {
        let w = f64::from(self.canvas.width);
        let h = f64::from(self.canvas.height);
        let card_w = (w * 0.6).min(CARD_MAX_WIDTH);
        let card_h = CARD_HEIGHT.min(h * 0.5);
        let center = Point::new(w / 2.0, h / 2.0);
        let origin = center - Vec2::new(card_w / 2.0, card_h / 2.0);

        let node = DisplacementMapNode::new();
        node.set_attribute("scale", format_scale(sample.displacement));
        let filter = DissolveFilter::new(self.filter.clone(), node).with_region(self.region());

        let transform = Affine::translate(center.to_vec2())
            * Affine::scale(sample.element.scale)
            * Affine::translate(-center.to_vec2());
        let [a, b, c, d, e, f] = transform.as_coeffs();

        let mut svg = String::new();
        // Writing into a String cannot fail.
        let _ = write!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#
        );
        let _ = write!(
            svg,
            r##"<defs>{}<linearGradient id="card-fill" x1="0" y1="0" x2="1" y2="0"><stop offset="0" stop-color="#ec4899" stop-opacity="0.8"/><stop offset="1" stop-color="#9333ea" stop-opacity="0.8"/></linearGradient></defs>"##,
            filter.to_svg()
        );
        let _ = write!(
            svg,
            r#"<rect width="{w}" height="{h}" fill="{PAGE_BACKGROUND}"/>"#
        );
        // The filter sits on an untransformed group so its region is the canvas in pixels.
        let _ = write!(
            svg,
            r#"<g filter="url(#{DISSOLVE_FILTER_ID})"><g opacity="{}" transform="matrix({a} {b} {c} {d} {e} {f})">"#,
            sample.element.opacity
        );
        let _ = write!(
            svg,
            r##"<rect x="{}" y="{}" width="{card_w}" height="{card_h}" rx="{CARD_RADIUS}" fill="url(#card-fill)" stroke="#ffffff" stroke-opacity="0.1"/>"##,
            origin.x, origin.y
        );
        let _ = write!(
            svg,
            r##"<text x="{}" y="{}" font-family="sans-serif" font-size="{LABEL_SIZE}" font-weight="300" fill="#ffffff" text-anchor="middle">{}</text>"##,
            center.x,
            center.y + LABEL_SIZE * 0.35,
            xml_escape(&self.label)
        );
        svg.push_str("</g></g></svg>");
        svg
    }

    /// Rasterize one sample into a premultiplied frame.
    pub fn render(&self, sample: &DissolveSample) -> RevealResult<FrameRGBA> {
        let doc = self.document(sample);
        let tree = usvg::Tree::from_str(&doc, &self.options)
            .map_err(|e| RevealError::render(format!("parse dissolve svg: {e}")))?;
        rasterize(&tree, self.canvas)
    }
}

fn canvas_region(canvas: Canvas) -> FilterRegion {
    FilterRegion::UserSpace {
        x: 0.0,
        y: 0.0,
        width: f64::from(canvas.width),
        height: f64::from(canvas.height),
    }
}

fn rasterize(tree: &usvg::Tree, canvas: Canvas) -> RevealResult<FrameRGBA> {
    let mut pixmap = resvg::tiny_skia::Pixmap::new(canvas.width, canvas.height)
        .ok_or_else(|| RevealError::render("failed to allocate frame pixmap"))?;

    let sx = (canvas.width as f32) / tree.size().width();
    let sy = (canvas.height as f32) / tree.size().height();
    resvg::render(
        tree,
        resvg::tiny_skia::Transform::from_scale(sx, sy),
        &mut pixmap.as_mut(),
    );

    Ok(FrameRGBA {
        width: canvas.width,
        height: canvas.height,
        data: pixmap.take(),
        premultiplied: true,
    })
}

fn xml_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/svg.rs"]
mod tests;
