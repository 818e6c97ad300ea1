use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

use crate::{
    animation::{ease::Ease, keyframes::Keyframes, motion::MotionValue},
    foundation::error::{RevealError, RevealResult},
};

const MIN_FRAME_INTERVAL: Duration = Duration::from_millis(1);

/// Timing shared by every track of one animation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transition {
    /// Total duration. Zero means the final values are applied immediately.
    pub duration: Duration,
    /// Curve applied to each keyframe segment.
    pub ease: Ease,
    /// Interval between samples while the animation runs.
    pub frame_interval: Duration,
}

impl Transition {
    /// Zero-duration transition: snap to the final values with no intermediate frames.
    pub fn instant() -> Self {
        Self {
            duration: Duration::ZERO,
            ease: Ease::Linear,
            frame_interval: Duration::from_millis(16),
        }
    }
}

/// A keyframe track bound to the value it drives.
#[derive(Clone, Debug)]
pub struct Tween {
    /// Value written on every sample.
    pub target: MotionValue,
    /// Track sampled over normalized progress.
    pub keyframes: Keyframes,
}

impl Tween {
    /// Animate `target` from whatever it holds now to `to`.
    pub fn to(target: &MotionValue, to: f64) -> Self {
        Self {
            keyframes: Keyframes::between(target.get(), to),
            target: target.clone(),
        }
    }

    /// Animate `target` through explicit keyframes.
    pub fn keyed(target: &MotionValue, keyframes: Keyframes) -> Self {
        Self {
            target: target.clone(),
            keyframes,
        }
    }

    fn apply(&self, progress: f64, ease: Ease) {
        self.target.set(self.keyframes.sample(progress, ease));
    }
}

/// Handle to a running animation.
#[derive(Debug)]
pub struct AnimationHandle {
    // `None` when the animation completed synchronously.
    join: Option<JoinHandle<()>>,
}

impl AnimationHandle {
    /// Wait until every track has reached its final value.
    pub async fn finished(self) -> RevealResult<()> {
        match self.join {
            Some(join) => join
                .await
                .map_err(|e| RevealError::animation(format!("animation task failed: {e}"))),
            None => Ok(()),
        }
    }

    /// Return `true` once the animation has written its final frame.
    pub fn is_finished(&self) -> bool {
        self.join.as_ref().is_none_or(JoinHandle::is_finished)
    }
}

/// Start driving `tweens` over `transition` on the current tokio runtime.
///
/// The tracks share one clock, so they stay in lockstep. The first sample is written
/// immediately and the last sample is always exactly the final keyframe. A zero-duration
/// transition writes the final values before this function returns and needs no runtime.
pub fn animate(tweens: Vec<Tween>, transition: Transition) -> AnimationHandle {
    if transition.duration.is_zero() {
        for tween in &tweens {
            tween.apply(1.0, transition.ease);
        }
        return AnimationHandle { join: None };
    }

    let join = tokio::spawn(async move {
        let start = Instant::now();
        let total = transition.duration.as_secs_f64();
        let mut ticker = tokio::time::interval(transition.frame_interval.max(MIN_FRAME_INTERVAL));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            ticker.tick().await;
            let progress = (start.elapsed().as_secs_f64() / total).min(1.0);
            for tween in &tweens {
                tween.apply(progress, transition.ease);
            }
            if progress >= 1.0 {
                break;
            }
        }
    });
    AnimationHandle { join: Some(join) }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/driver.rs"]
mod tests;
