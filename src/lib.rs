//! snapreveal drives a "dissolve and reveal" landing sequence.
//!
//! A click on the intro card runs a short SVG displacement dissolve. When it settles, the
//! [`PresentationShell`] flips its one-way `revealed` flag and swaps the intro for the revealed
//! page, which schedules delayed usage hints. The same [`DissolveTimeline`] can be sampled
//! offline and rasterized into frames:
//!
//! - Configure with [`RevealConfig`]
//! - Drive it live with [`PresentationShell`] on a tokio runtime
//! - Render single frames or stream a range into a [`FrameSink`]
#![forbid(unsafe_code)]

mod foundation;

pub(crate) mod animation;
/// Tunable constants and JSON configuration.
pub mod config;
pub(crate) mod effects;
pub(crate) mod render;
pub(crate) mod shell;

pub use crate::foundation::core::{Canvas, Fps, FrameIndex, FrameRange};
pub use crate::foundation::error::{RevealError, RevealResult};

pub use crate::animation::driver::{AnimationHandle, Transition, Tween, animate};
pub use crate::animation::ease::Ease;
pub use crate::animation::keyframes::{Keyframe, Keyframes};
pub use crate::animation::motion::{MotionValue, Subscription};

pub use crate::config::{
    ContentConfig, FilterConfig, HintConfig, RevealConfig, SceneConfig, SnapConfig,
};

pub use crate::effects::element::{ElementState, VisualElement};
pub use crate::effects::filter::{
    DISSOLVE_FILTER_ID, DisplacementMapNode, DissolveFilter, format_scale,
};
pub use crate::effects::sequencer::{DissolveSequencer, SnapPhase};
pub use crate::effects::timeline::{DissolveSample, DissolveTimeline};

pub use crate::render::frame::FrameRGBA;
pub use crate::render::pipeline::{
    RenderOpts, RenderStats, full_range, render_dissolve_frame, render_dissolve_frames,
};
pub use crate::render::sink::{FrameSink, InMemorySink, PngSequenceSink, SinkConfig};
pub use crate::render::svg::DissolveFrameRenderer;

pub use crate::shell::PresentationShell;
pub use crate::shell::hints::{HintFlags, HintKind, HintScheduler};
pub use crate::shell::scene::{Cursor, EmbeddedScene};
pub use crate::shell::view::{
    DashboardView, HeroView, HintView, IntroView, Link, LoadingOverlay, RevealedView, SceneView,
    View,
};
