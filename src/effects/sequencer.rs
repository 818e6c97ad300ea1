//! The dissolve sequencer.
//!
//! One activation runs `Idle -> Animating -> Settling -> Idle`:
//!
//! - **Animating**: the element animation (scale up, hold-then-fade opacity) and the
//!   displacement animation start together and are joined.
//! - **Settling**: a fixed pause with the element fully dissolved.
//! - back to **Idle**: the element snaps to rest, the displacement drops to zero, the guard
//!   is released, and the completion callback runs exactly once.
//!
//! Triggers that arrive while an activation is in flight are rejected, not queued. An
//! activation cannot be cancelled once it starts.

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::task::JoinHandle;

use crate::{
    animation::{
        driver::{Tween, animate},
        motion::{MotionValue, Subscription},
    },
    config::SnapConfig,
    effects::{
        element::VisualElement,
        filter::{DisplacementMapNode, format_scale},
        timeline::DissolveTimeline,
    },
    foundation::error::RevealResult,
};

/// Where an activation currently is.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SnapPhase {
    /// Ready for a trigger.
    #[default]
    Idle,
    /// Element and displacement animations running.
    Animating,
    /// Animations done; waiting out the settle delay.
    Settling,
}

impl SnapPhase {
    /// `true` while an activation holds the guard.
    pub fn is_animating(self) -> bool {
        !matches!(self, Self::Idle)
    }
}

/// Drives the dissolve on demand and reports completion.
///
/// Every change of the displacement value is mirrored onto the filter node's `scale`
/// attribute through a subscription held for the sequencer's lifetime.
#[derive(Debug)]
pub struct DissolveSequencer {
    timeline: DissolveTimeline,
    element: VisualElement,
    displacement: MotionValue,
    filter_node: DisplacementMapNode,
    phase: Arc<Mutex<SnapPhase>>,
    _mirror: Subscription,
}

impl DissolveSequencer {
    /// Bind a sequencer to its target element and displacement-map node.
    pub fn new(
        cfg: &SnapConfig,
        element: VisualElement,
        filter_node: DisplacementMapNode,
    ) -> RevealResult<Self> {
        let timeline = DissolveTimeline::new(cfg)?;
        let displacement = MotionValue::new(0.0);

        let node = filter_node.clone();
        let mirror = displacement.on_change(move |latest| {
            node.set_attribute("scale", format_scale(latest));
        });

        Ok(Self {
            timeline,
            element,
            displacement,
            filter_node,
            phase: Arc::new(Mutex::new(SnapPhase::Idle)),
            _mirror: mirror,
        })
    }

    pub fn phase(&self) -> SnapPhase {
        *self.phase.lock()
    }

    pub fn is_animating(&self) -> bool {
        self.phase().is_animating()
    }

    /// The animated distortion intensity.
    pub fn displacement(&self) -> &MotionValue {
        &self.displacement
    }

    pub fn element(&self) -> &VisualElement {
        &self.element
    }

    pub fn filter_node(&self) -> &DisplacementMapNode {
        &self.filter_node
    }

    pub fn timeline(&self) -> &DissolveTimeline {
        &self.timeline
    }

    /// Start an activation unless one is already running.
    ///
    /// Returns the activation task, or `None` when the trigger was ignored. `on_complete`
    /// runs once, on the task, after the reset. Must be called inside a tokio runtime.
    pub fn trigger<F>(&self, on_complete: F) -> Option<JoinHandle<()>>
    where
        F: FnOnce() + Send + 'static,
    {
        {
            let mut phase = self.phase.lock();
            if phase.is_animating() {
                tracing::warn!(phase = ?*phase, "dissolve already running; trigger ignored");
                return None;
            }
            *phase = SnapPhase::Animating;
        }
        tracing::debug!("dissolve started");

        let timeline = self.timeline.clone();
        let element = self.element.clone();
        let displacement = self.displacement.clone();
        let phase = Arc::clone(&self.phase);

        Some(tokio::spawn(async move {
            run_activation(timeline, element, displacement, phase, on_complete).await;
        }))
    }
}

async fn run_activation<F>(
    timeline: DissolveTimeline,
    element: VisualElement,
    displacement: MotionValue,
    phase: Arc<Mutex<SnapPhase>>,
    on_complete: F,
) where
    F: FnOnce(),
{
    let transition = timeline.transition();
    let dissolve = animate(
        vec![
            Tween::keyed(element.scale(), timeline.scale_track().clone()),
            Tween::keyed(element.opacity(), timeline.opacity_track().clone()),
        ],
        transition,
    );
    let distort = animate(
        vec![Tween::keyed(
            &displacement,
            timeline.displacement_track().clone(),
        )],
        transition,
    );

    let (dissolved, distorted) = tokio::join!(dissolve.finished(), distort.finished());
    for result in [dissolved, distorted] {
        if let Err(err) = result {
            tracing::error!(error = %err, "dissolve animation ended abnormally");
        }
    }

    *phase.lock() = SnapPhase::Settling;
    tracing::debug!(delay = ?timeline.settle_delay(), "dissolve settling");
    tokio::time::sleep(timeline.settle_delay()).await;

    element.snap_to_rest();
    displacement.set(0.0);
    *phase.lock() = SnapPhase::Idle;
    tracing::debug!("dissolve complete");
    on_complete();
}

#[cfg(test)]
#[path = "../../tests/unit/effects/sequencer.rs"]
mod tests;
