use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};
use std::time::Duration;

use tokio::task::JoinHandle;

use crate::config::HintConfig;

/// The two hint overlays.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HintKind {
    /// "Drag to explore", nudging the user to play with the scene.
    Interaction,
    /// "Scroll for more", pointing at the call-to-action below.
    Scroll,
}

/// One-shot visibility flags. Each flips to `true` once and stays there.
#[derive(Debug, Default)]
pub struct HintFlags {
    interaction: AtomicBool,
    scroll: AtomicBool,
}

impl HintFlags {
    pub fn is_visible(&self, kind: HintKind) -> bool {
        self.flag(kind).load(Ordering::Acquire)
    }

    pub fn interaction(&self) -> bool {
        self.is_visible(HintKind::Interaction)
    }

    pub fn scroll(&self) -> bool {
        self.is_visible(HintKind::Scroll)
    }

    fn show(&self, kind: HintKind) {
        self.flag(kind).store(true, Ordering::Release);
    }

    fn flag(&self, kind: HintKind) -> &AtomicBool {
        match kind {
            HintKind::Interaction => &self.interaction,
            HintKind::Scroll => &self.scroll,
        }
    }
}

/// Reveals the hints at fixed delays after mount.
///
/// Dropping the scheduler aborts any reveal that has not fired yet, so a torn-down view
/// never has a flag set behind its back.
#[derive(Debug)]
pub struct HintScheduler {
    flags: Arc<HintFlags>,
    timers: Vec<JoinHandle<()>>,
}

impl HintScheduler {
    /// Start both hint timers. Must be called inside a tokio runtime.
    pub fn mount(cfg: &HintConfig) -> Self {
        let flags = Arc::new(HintFlags::default());
        let timers = vec![
            spawn_reveal(&flags, HintKind::Interaction, cfg.interaction_delay()),
            spawn_reveal(&flags, HintKind::Scroll, cfg.scroll_delay()),
        ];
        Self { flags, timers }
    }

    pub fn flags(&self) -> &Arc<HintFlags> {
        &self.flags
    }

    /// Number of reveals still waiting on their delay.
    pub fn pending(&self) -> usize {
        self.timers.iter().filter(|t| !t.is_finished()).count()
    }
}

impl Drop for HintScheduler {
    fn drop(&mut self) {
        for timer in &self.timers {
            timer.abort();
        }
    }
}

fn spawn_reveal(flags: &Arc<HintFlags>, kind: HintKind, delay: Duration) -> JoinHandle<()> {
    let flags = Arc::clone(flags);
    let deadline = tokio::time::Instant::now() + delay;
    tokio::spawn(async move {
        tokio::time::sleep_until(deadline).await;
        flags.show(kind);
        tracing::debug!(hint = ?kind, "hint shown");
    })
}

#[cfg(test)]
#[path = "../../tests/unit/shell/hints.rs"]
mod tests;
