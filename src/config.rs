//! Tunables for the dissolve, the hint timers, and the revealed content.
//!
//! Every field has a default, so an empty JSON object is a complete configuration.

use std::{path::Path, time::Duration};

use anyhow::Context as _;

use crate::foundation::error::{RevealError, RevealResult};

/// Length of one dissolve activation, in seconds.
pub const DURATION_SECS: f64 = 0.6;
/// Peak displacement-map scale reached at the end of the dissolve.
pub const MAX_DISPLACEMENT: f64 = 300.0;
/// Normalized progress at which the opacity starts fading.
pub const OPACITY_CHANGE_START: f64 = 0.5;
/// Scale the dissolving element grows to.
pub const END_SCALE: f64 = 1.2;
/// Pause between the end of the dissolve and the reset + completion signal, in seconds.
pub const SETTLE_DELAY_SECS: f64 = 0.5;
/// Delay before the "drag to explore" hint appears, in seconds.
pub const INTERACTION_HINT_DELAY_SECS: f64 = 1.5;
/// Delay before the "scroll for more" hint appears, in seconds.
pub const SCROLL_HINT_DELAY_SECS: f64 = 4.0;

/// Upper bound for any configured delay or duration, in seconds.
pub const MAX_DURATION_SECS: f64 = 86_400.0;
/// Upper bound for the live animation sample rate; the driver never ticks faster than 1ms.
pub const MAX_FRAME_RATE: f64 = 1_000.0;

// Only called on validated values, where the conversion cannot fail.
fn secs(v: f64) -> Duration {
    Duration::try_from_secs_f64(v).unwrap_or(Duration::ZERO)
}

/// Top-level configuration.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RevealConfig {
    /// Dissolve timing and magnitudes.
    pub snap: SnapConfig,
    /// Dissolve filter parameters.
    pub filter: FilterConfig,
    /// Hint overlay delays.
    pub hints: HintConfig,
    /// Embedded 3D scene.
    pub scene: SceneConfig,
    /// Copy and links shown on the page.
    pub content: ContentConfig,
}

/// Dissolve timing and magnitudes.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SnapConfig {
    pub duration_secs: f64,
    pub max_displacement: f64,
    pub opacity_change_start: f64,
    pub end_scale: f64,
    pub settle_delay_secs: f64,
    /// Sample rate of the live animation driver.
    pub frame_rate: f64,
}

impl Default for SnapConfig {
    fn default() -> Self {
        Self {
            duration_secs: DURATION_SECS,
            max_displacement: MAX_DISPLACEMENT,
            opacity_change_start: OPACITY_CHANGE_START,
            end_scale: END_SCALE,
            settle_delay_secs: SETTLE_DELAY_SECS,
            frame_rate: 60.0,
        }
    }
}

impl SnapConfig {
    pub fn duration(&self) -> Duration {
        secs(self.duration_secs)
    }

    pub fn settle_delay(&self) -> Duration {
        secs(self.settle_delay_secs)
    }

    pub fn frame_interval(&self) -> Duration {
        secs(1.0 / self.frame_rate)
    }
}

/// Parameters of the two-noise displacement filter.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FilterConfig {
    pub coarse_frequency: f64,
    pub coarse_octaves: u32,
    pub red_slope: f64,
    pub red_intercept: f64,
    pub green_slope: f64,
    pub green_intercept: f64,
    pub fine_frequency: f64,
    pub fine_octaves: u32,
    /// Filter region origin (x and y) as a percentage of the element box.
    pub region_origin_pct: f64,
    /// Filter region width and height as a percentage of the element box.
    pub region_size_pct: f64,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            coarse_frequency: 0.015,
            coarse_octaves: 1,
            red_slope: 0.5,
            red_intercept: -0.2,
            green_slope: 3.0,
            green_intercept: -0.6,
            fine_frequency: 1.0,
            fine_octaves: 2,
            region_origin_pct: -300.0,
            region_size_pct: 600.0,
        }
    }
}

/// Hint overlay delays, measured from the moment the revealed view mounts.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HintConfig {
    pub interaction_delay_secs: f64,
    pub scroll_delay_secs: f64,
}

impl Default for HintConfig {
    fn default() -> Self {
        Self {
            interaction_delay_secs: INTERACTION_HINT_DELAY_SECS,
            scroll_delay_secs: SCROLL_HINT_DELAY_SECS,
        }
    }
}

impl HintConfig {
    pub fn interaction_delay(&self) -> Duration {
        secs(self.interaction_delay_secs)
    }

    pub fn scroll_delay(&self) -> Duration {
        secs(self.scroll_delay_secs)
    }
}

/// The embedded third-party scene.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SceneConfig {
    pub url: String,
    pub title: String,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            url: "https://my.spline.design/plasticlove-5wFOWLLs3rLvPVSfK8QrJq5X/".to_string(),
            title: "Interactive 3D Scene".to_string(),
        }
    }
}

/// Copy and links.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ContentConfig {
    pub intro_label: String,
    pub loading_text: String,
    pub badge_text: String,
    pub interaction_hint_text: String,
    pub scroll_hint_text: String,
    pub dashboard_heading: String,
    pub cta_label: String,
    pub cta_url: String,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            intro_label: "Built this... for your smile".to_string(),
            loading_text: "Loading Magic...".to_string(),
            badge_text: "For Radha ✨".to_string(),
            interaction_hint_text: "🖱️ Drag to Explore".to_string(),
            scroll_hint_text: "🌸 Scroll for More Magic".to_string(),
            dashboard_heading: "For My Radha, With All My Heart ❤️".to_string(),
            cta_label: "Open your Special Page".to_string(),
            cta_url: "https://formyyradha.vercel.app/dashboard".to_string(),
        }
    }
}

impl RevealConfig {
    /// Parse a configuration from JSON text and validate it.
    pub fn from_json_str(json: &str) -> RevealResult<Self> {
        let cfg: Self =
            serde_json::from_str(json).map_err(|e| RevealError::serde(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read, parse, and validate a JSON configuration file.
    pub fn from_path(path: impl AsRef<Path>) -> RevealResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read config '{}'", path.display()))?;
        Self::from_json_str(&text)
    }

    /// Check value ranges.
    pub fn validate(&self) -> RevealResult<()> {
        fn non_negative(name: &str, v: f64) -> RevealResult<()> {
            if !v.is_finite() || v < 0.0 {
                return Err(RevealError::validation(format!(
                    "{name} must be finite and >= 0, got {v}"
                )));
            }
            Ok(())
        }

        // A positive value must survive conversion without truncating to zero.
        fn duration(name: &str, v: f64) -> RevealResult<Duration> {
            non_negative(name, v)?;
            if v > MAX_DURATION_SECS {
                return Err(RevealError::validation(format!(
                    "{name} must be <= {MAX_DURATION_SECS}, got {v}"
                )));
            }
            let d = Duration::try_from_secs_f64(v)
                .map_err(|e| RevealError::validation(format!("{name}: {e}")))?;
            if v > 0.0 && d.is_zero() {
                return Err(RevealError::validation(format!(
                    "{name} is too small to represent, got {v}"
                )));
            }
            Ok(d)
        }

        let snap = &self.snap;
        duration("snap.duration_secs", snap.duration_secs)?;
        non_negative("snap.max_displacement", snap.max_displacement)?;
        duration("snap.settle_delay_secs", snap.settle_delay_secs)?;
        if !snap.end_scale.is_finite() || snap.end_scale <= 0.0 {
            return Err(RevealError::validation("snap.end_scale must be > 0"));
        }
        if !(0.0..=1.0).contains(&snap.opacity_change_start) {
            return Err(RevealError::validation(
                "snap.opacity_change_start must be in [0, 1]",
            ));
        }
        if !snap.frame_rate.is_finite() || snap.frame_rate <= 0.0 {
            return Err(RevealError::validation("snap.frame_rate must be > 0"));
        }
        if snap.frame_rate > MAX_FRAME_RATE {
            return Err(RevealError::validation(format!(
                "snap.frame_rate must be <= {MAX_FRAME_RATE}, got {}",
                snap.frame_rate
            )));
        }
        duration("snap frame interval", 1.0 / snap.frame_rate)?;

        let filter = &self.filter;
        non_negative("filter.coarse_frequency", filter.coarse_frequency)?;
        non_negative("filter.fine_frequency", filter.fine_frequency)?;
        non_negative("filter.region_size_pct", filter.region_size_pct)?;
        for (name, v) in [
            ("filter.red_slope", filter.red_slope),
            ("filter.red_intercept", filter.red_intercept),
            ("filter.green_slope", filter.green_slope),
            ("filter.green_intercept", filter.green_intercept),
            ("filter.region_origin_pct", filter.region_origin_pct),
        ] {
            if !v.is_finite() {
                return Err(RevealError::validation(format!("{name} must be finite")));
            }
        }

        duration("hints.interaction_delay_secs", self.hints.interaction_delay_secs)?;
        duration("hints.scroll_delay_secs", self.hints.scroll_delay_secs)?;

        if self.scene.url.trim().is_empty() {
            return Err(RevealError::validation("scene.url must not be empty"));
        }
        if self.content.cta_url.trim().is_empty() {
            return Err(RevealError::validation("content.cta_url must not be empty"));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../tests/unit/config/config.rs"]
mod tests;
