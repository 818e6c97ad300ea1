use crate::animation::{
    driver::{Transition, Tween, animate},
    motion::MotionValue,
};

/// Resting scale of the dissolve target.
pub const REST_SCALE: f64 = 1.0;
/// Resting opacity of the dissolve target.
pub const REST_OPACITY: f64 = 1.0;

/// The element the dissolve is applied to: its transform scale and its opacity.
#[derive(Clone, Debug)]
pub struct VisualElement {
    scale: MotionValue,
    opacity: MotionValue,
}

impl Default for VisualElement {
    fn default() -> Self {
        Self::new()
    }
}

impl VisualElement {
    /// An element at rest.
    pub fn new() -> Self {
        Self {
            scale: MotionValue::new(REST_SCALE),
            opacity: MotionValue::new(REST_OPACITY),
        }
    }

    pub fn scale(&self) -> &MotionValue {
        &self.scale
    }

    pub fn opacity(&self) -> &MotionValue {
        &self.opacity
    }

    /// Current `(scale, opacity)`.
    pub fn state(&self) -> ElementState {
        ElementState {
            scale: self.scale.get(),
            opacity: self.opacity.get(),
        }
    }

    /// Put the element back at rest with a zero-duration transition.
    pub fn snap_to_rest(&self) {
        // A zero-duration animation applies synchronously; the handle is already done.
        drop(animate(
            vec![
                Tween::to(&self.scale, REST_SCALE),
                Tween::to(&self.opacity, REST_OPACITY),
            ],
            Transition::instant(),
        ));
    }
}

/// Snapshot of a [`VisualElement`].
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ElementState {
    pub scale: f64,
    pub opacity: f64,
}

impl ElementState {
    pub fn at_rest() -> Self {
        Self {
            scale: REST_SCALE,
            opacity: REST_OPACITY,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/element.rs"]
mod tests;
