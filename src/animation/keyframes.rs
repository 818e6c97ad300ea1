use crate::{
    animation::ease::Ease,
    foundation::error::{RevealError, RevealResult},
};

/// One key in a normalized keyframe track.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Keyframe {
    /// Position of this key in normalized progress, `[0, 1]`.
    pub offset: f64,
    /// Value at `offset`.
    pub value: f64,
}

/// Scalar keyframes over normalized progress.
///
/// The easing curve is applied per segment: between two adjacent keys the local progress is
/// eased before interpolating. A track `[1, 1, 0]` at `[0, 0.5, 1]` therefore holds at `1`
/// for the first half and eases down to `0` over the second.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Keyframes {
    keys: Vec<Keyframe>,
}

impl Keyframes {
    /// Build a track from parallel value/offset lists.
    pub fn new(values: &[f64], offsets: &[f64]) -> RevealResult<Self> {
        if values.is_empty() {
            return Err(RevealError::animation("keyframes need at least one value"));
        }
        if values.len() != offsets.len() {
            return Err(RevealError::animation(format!(
                "keyframes have {} values but {} offsets",
                values.len(),
                offsets.len()
            )));
        }
        if values.iter().chain(offsets).any(|v| !v.is_finite()) {
            return Err(RevealError::animation("keyframes must be finite"));
        }
        if offsets.iter().any(|o| !(0.0..=1.0).contains(o)) {
            return Err(RevealError::animation("keyframe offsets must be in [0, 1]"));
        }
        if !offsets.windows(2).all(|w| w[0] <= w[1]) {
            return Err(RevealError::animation("keyframe offsets must be sorted"));
        }

        let keys = values
            .iter()
            .zip(offsets)
            .map(|(&value, &offset)| Keyframe { offset, value })
            .collect();
        Ok(Self { keys })
    }

    /// Two-key track from `from` at 0 to `to` at 1.
    pub fn between(from: f64, to: f64) -> Self {
        Self {
            keys: vec![
                Keyframe {
                    offset: 0.0,
                    value: from,
                },
                Keyframe {
                    offset: 1.0,
                    value: to,
                },
            ],
        }
    }

    /// Borrow the keys in offset order.
    pub fn keys(&self) -> &[Keyframe] {
        &self.keys
    }

    /// Value of the first key.
    pub fn first_value(&self) -> f64 {
        self.keys[0].value
    }

    /// Value of the last key; this is where an animation of this track comes to rest.
    pub fn last_value(&self) -> f64 {
        self.keys[self.keys.len() - 1].value
    }

    /// Sample the track at normalized `progress` using `ease` per segment.
    pub fn sample(&self, progress: f64, ease: Ease) -> f64 {
        let p = progress.clamp(0.0, 1.0);
        let idx = self.keys.partition_point(|k| k.offset <= p);

        if idx == 0 {
            return self.first_value();
        }
        if idx >= self.keys.len() {
            return self.last_value();
        }

        let a = self.keys[idx - 1];
        let b = self.keys[idx];
        let span = b.offset - a.offset;
        if span <= 0.0 {
            return b.value;
        }

        let t = ease.apply((p - a.offset) / span);
        a.value + (b.value - a.value) * t
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/keyframes.rs"]
mod tests;
