//! Serializable view trees produced by [`PresentationShell::render`](super::PresentationShell::render).
//!
//! These describe what a host should draw; they carry no behavior.

use crate::{
    effects::{element::ElementState, sequencer::SnapPhase},
    shell::{hints::HintKind, scene::Cursor},
};

/// Top-level view: exactly one of the two trees is shown.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum View {
    /// Before the reveal.
    Intro(IntroView),
    /// After the reveal; permanent.
    Revealed(RevealedView),
}

impl View {
    pub fn is_revealed(&self) -> bool {
        matches!(self, Self::Revealed(_))
    }
}

/// The clickable card wrapped in the dissolve.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct IntroView {
    pub label: String,
    pub phase: SnapPhase,
    pub element: ElementState,
    /// Current `scale` attribute of the displacement map.
    pub filter_scale: String,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RevealedView {
    pub hero: HeroView,
    pub dashboard: DashboardView,
}

/// Full-screen embedded scene with its overlays.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct HeroView {
    /// Present until the scene reports ready.
    pub loading: Option<LoadingOverlay>,
    pub scene: SceneView,
    pub badge: String,
    pub hints: Vec<HintView>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LoadingOverlay {
    pub text: String,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SceneView {
    pub url: String,
    pub title: String,
    /// `0` while loading, `1` once ready.
    pub opacity: f64,
    pub cursor: Cursor,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct HintView {
    pub kind: HintKind,
    pub text: String,
}

/// The call-to-action panel under the scene.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DashboardView {
    pub heading: String,
    pub cta: Link,
}

/// Outbound hyperlink.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Link {
    pub label: String,
    pub href: String,
    /// Browsing context, always `_blank`.
    pub target: String,
    pub rel: String,
}

impl Link {
    /// A link that opens in a new browsing context without handing it the opener.
    pub fn external(label: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            href: href.into(),
            target: "_blank".to_string(),
            rel: "noopener noreferrer".to_string(),
        }
    }
}
