//! The presentation shell: intro card until the dissolve completes, then the revealed page.

pub(crate) mod hints;
pub(crate) mod scene;
pub(crate) mod view;

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::{sync::watch, task::JoinHandle};

use crate::{
    config::RevealConfig,
    effects::{element::VisualElement, filter::DisplacementMapNode, sequencer::DissolveSequencer},
    foundation::error::RevealResult,
    shell::{
        hints::{HintFlags, HintKind, HintScheduler},
        scene::EmbeddedScene,
        view::{
            DashboardView, HeroView, HintView, IntroView, Link, LoadingOverlay, RevealedView,
            SceneView, View,
        },
    },
};

/// Everything that only exists after the reveal.
#[derive(Debug)]
struct HeroSection {
    scene: EmbeddedScene,
    hints: HintScheduler,
}

impl HeroSection {
    fn mount(cfg: &RevealConfig) -> Self {
        Self {
            scene: EmbeddedScene::new(&cfg.scene),
            hints: HintScheduler::mount(&cfg.hints),
        }
    }
}

#[derive(Debug)]
struct ShellState {
    mounted: bool,
    hero: Option<HeroSection>,
}

/// Owns the one-way `revealed` flag and renders the matching view.
///
/// `revealed` starts `false` and is set only by the dissolve's completion signal; nothing
/// sets it back. Unmounting the shell tears down the revealed view, which cancels pending
/// hint timers.
#[derive(Debug)]
pub struct PresentationShell {
    cfg: Arc<RevealConfig>,
    sequencer: DissolveSequencer,
    state: Arc<Mutex<ShellState>>,
    revealed: Arc<watch::Sender<bool>>,
}

impl PresentationShell {
    pub fn new(cfg: RevealConfig) -> RevealResult<Self> {
        cfg.validate()?;
        let sequencer = DissolveSequencer::new(
            &cfg.snap,
            VisualElement::new(),
            DisplacementMapNode::new(),
        )?;
        Ok(Self {
            cfg: Arc::new(cfg),
            sequencer,
            state: Arc::new(Mutex::new(ShellState {
                mounted: true,
                hero: None,
            })),
            revealed: Arc::new(watch::Sender::new(false)),
        })
    }

    pub fn is_revealed(&self) -> bool {
        *self.revealed.borrow()
    }

    /// Watch the `revealed` flag.
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.revealed.subscribe()
    }

    pub fn sequencer(&self) -> &DissolveSequencer {
        &self.sequencer
    }

    /// The intro card was clicked.
    ///
    /// Starts the dissolve and returns its task, or `None` when the click is ignored
    /// (already revealed, dissolve in flight, or shell unmounted). Must be called inside a
    /// tokio runtime.
    pub fn click(&self) -> Option<JoinHandle<()>> {
        if self.is_revealed() || !self.state.lock().mounted {
            return None;
        }

        let cfg = Arc::clone(&self.cfg);
        let state = Arc::clone(&self.state);
        let revealed = Arc::clone(&self.revealed);
        self.sequencer
            .trigger(move || on_dissolve_complete(&cfg, &state, &revealed))
    }

    /// The embedded scene reported ready. Ignored before the reveal.
    pub fn scene_ready(&self) {
        if let Some(hero) = self.state.lock().hero.as_mut() {
            hero.scene.on_ready();
        }
    }

    pub fn scene_pointer_down(&self) {
        if let Some(hero) = self.state.lock().hero.as_mut() {
            hero.scene.pointer_down();
        }
    }

    pub fn scene_pointer_up(&self) {
        if let Some(hero) = self.state.lock().hero.as_mut() {
            hero.scene.pointer_up();
        }
    }

    pub fn scene_pointer_leave(&self) {
        if let Some(hero) = self.state.lock().hero.as_mut() {
            hero.scene.pointer_leave();
        }
    }

    /// Hint flags of the revealed view, if it is mounted.
    pub fn hint_flags(&self) -> Option<Arc<HintFlags>> {
        self.state
            .lock()
            .hero
            .as_ref()
            .map(|hero| Arc::clone(hero.hints.flags()))
    }

    /// Tear the shell down. Pending hint reveals are cancelled and a dissolve that
    /// completes afterwards no longer mounts anything.
    pub fn unmount(&self) {
        let mut state = self.state.lock();
        state.mounted = false;
        state.hero = None;
        tracing::debug!("shell unmounted");
    }

    /// Describe the current view.
    pub fn render(&self) -> View {
        let state = self.state.lock();
        match (self.is_revealed(), state.hero.as_ref()) {
            (true, Some(hero)) => View::Revealed(self.revealed_view(hero)),
            _ => View::Intro(self.intro_view()),
        }
    }

    fn intro_view(&self) -> IntroView {
        IntroView {
            label: self.cfg.content.intro_label.clone(),
            phase: self.sequencer.phase(),
            element: self.sequencer.element().state(),
            filter_scale: self
                .sequencer
                .filter_node()
                .attribute("scale")
                .unwrap_or_default(),
        }
    }

    fn revealed_view(&self, hero: &HeroSection) -> RevealedView {
        let content = &self.cfg.content;
        let scene = &hero.scene;
        let flags = hero.hints.flags();

        let hints = [
            (HintKind::Interaction, &content.interaction_hint_text),
            (HintKind::Scroll, &content.scroll_hint_text),
        ]
        .into_iter()
        .filter(|(kind, _)| flags.is_visible(*kind))
        .map(|(kind, text)| HintView {
            kind,
            text: text.clone(),
        })
        .collect();

        RevealedView {
            hero: HeroView {
                loading: (!scene.is_loaded()).then(|| LoadingOverlay {
                    text: content.loading_text.clone(),
                }),
                scene: SceneView {
                    url: scene.url().to_string(),
                    title: scene.title().to_string(),
                    opacity: if scene.is_loaded() { 1.0 } else { 0.0 },
                    cursor: scene.cursor(),
                },
                badge: content.badge_text.clone(),
                hints,
            },
            dashboard: DashboardView {
                heading: content.dashboard_heading.clone(),
                cta: Link::external(&content.cta_label, &content.cta_url),
            },
        }
    }
}

impl Drop for PresentationShell {
    fn drop(&mut self) {
        self.unmount();
    }
}

fn on_dissolve_complete(
    cfg: &RevealConfig,
    state: &Mutex<ShellState>,
    revealed: &watch::Sender<bool>,
) {
    let mut state = state.lock();
    if !state.mounted {
        tracing::debug!("dissolve finished after unmount; nothing to reveal");
        return;
    }
    if *revealed.borrow() {
        return;
    }
    state.hero = Some(HeroSection::mount(cfg));
    revealed.send_replace(true);
    tracing::info!("revealed");
}

#[cfg(test)]
#[path = "../../tests/unit/shell/shell.rs"]
mod tests;
