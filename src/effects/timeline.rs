use std::time::Duration;

use crate::{
    animation::{driver::Transition, ease::Ease, keyframes::Keyframes},
    config::SnapConfig,
    effects::{element::ElementState, sequencer::SnapPhase},
    foundation::error::RevealResult,
};

/// Values of the dissolve at one instant of an activation.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DissolveSample {
    pub phase: SnapPhase,
    pub element: ElementState,
    pub displacement: f64,
}

/// Pure description of one dissolve activation.
///
/// The live sequencer drives its animations from these tracks, and the offline renderer
/// samples them directly, so both agree on every value.
#[derive(Clone, Debug, PartialEq)]
pub struct DissolveTimeline {
    scale: Keyframes,
    opacity: Keyframes,
    displacement: Keyframes,
    duration: Duration,
    settle_delay: Duration,
    frame_interval: Duration,
    ease: Ease,
}

impl DissolveTimeline {
    pub fn new(cfg: &SnapConfig) -> RevealResult<Self> {
        Ok(Self {
            scale: Keyframes::between(ElementState::at_rest().scale, cfg.end_scale),
            opacity: Keyframes::new(&[1.0, 1.0, 0.0], &[0.0, cfg.opacity_change_start, 1.0])?,
            displacement: Keyframes::between(0.0, cfg.max_displacement),
            duration: cfg.duration(),
            settle_delay: cfg.settle_delay(),
            frame_interval: cfg.frame_interval(),
            ease: Ease::OutCubic,
        })
    }

    pub fn scale_track(&self) -> &Keyframes {
        &self.scale
    }

    pub fn opacity_track(&self) -> &Keyframes {
        &self.opacity
    }

    pub fn displacement_track(&self) -> &Keyframes {
        &self.displacement
    }

    /// Timing shared by the element and displacement animations.
    pub fn transition(&self) -> Transition {
        Transition {
            duration: self.duration,
            ease: self.ease,
            frame_interval: self.frame_interval,
        }
    }

    /// Length of the animated part.
    pub fn animation_duration(&self) -> Duration {
        self.duration
    }

    /// Pause between the end of the animations and the reset.
    pub fn settle_delay(&self) -> Duration {
        self.settle_delay
    }

    /// Time from trigger to completion signal.
    pub fn total_duration(&self) -> Duration {
        self.duration + self.settle_delay
    }

    /// Sample the activation `elapsed` after the trigger.
    pub fn sample(&self, elapsed: Duration) -> DissolveSample {
        if elapsed >= self.total_duration() {
            return DissolveSample {
                phase: SnapPhase::Idle,
                element: ElementState::at_rest(),
                displacement: 0.0,
            };
        }

        let (phase, progress) = if elapsed < self.duration {
            (
                SnapPhase::Animating,
                elapsed.as_secs_f64() / self.duration.as_secs_f64(),
            )
        } else {
            (SnapPhase::Settling, 1.0)
        };

        DissolveSample {
            phase,
            element: ElementState {
                scale: self.scale.sample(progress, self.ease),
                opacity: self.opacity.sample(progress, self.ease),
            },
            displacement: self.displacement.sample(progress, self.ease),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/timeline.rs"]
mod tests;
