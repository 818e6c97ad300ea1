use super::*;
use crate::effects::sequencer::SnapPhase;

fn shell() -> PresentationShell {
    PresentationShell::new(RevealConfig::default()).unwrap()
}

#[test]
fn starts_on_intro_at_rest() {
    let shell = shell();
    assert!(!shell.is_revealed());
    let View::Intro(intro) = shell.render() else {
        panic!("expected intro view");
    };
    assert_eq!(intro.label, "Built this... for your smile");
    assert_eq!(intro.phase, SnapPhase::Idle);
    assert_eq!(intro.element.scale, 1.0);
    assert_eq!(intro.element.opacity, 1.0);
    assert_eq!(intro.filter_scale, "0");
}

#[test]
fn invalid_config_is_rejected() {
    let mut cfg = RevealConfig::default();
    cfg.snap.frame_rate = -1.0;
    assert!(PresentationShell::new(cfg).is_err());
}

#[test]
fn scene_events_before_reveal_are_ignored() {
    let shell = shell();
    shell.scene_ready();
    shell.scene_pointer_down();
    assert!(shell.hint_flags().is_none());
    assert!(!shell.render().is_revealed());
}

#[tokio::test(start_paused = true)]
async fn revealed_view_tracks_loading_and_cursor() {
    let shell = shell();
    shell.click().unwrap().await.unwrap();

    let View::Revealed(view) = shell.render() else {
        panic!("expected revealed view");
    };
    assert_eq!(view.hero.loading.unwrap().text, "Loading Magic...");
    assert_eq!(view.hero.scene.opacity, 0.0);
    assert!(view.hero.hints.is_empty());
    assert_eq!(view.dashboard.cta.target, "_blank");
    assert_eq!(view.dashboard.cta.rel, "noopener noreferrer");
    assert_eq!(
        view.dashboard.cta.href,
        "https://formyyradha.vercel.app/dashboard"
    );

    shell.scene_ready();
    shell.scene_pointer_down();
    let View::Revealed(view) = shell.render() else {
        panic!("expected revealed view");
    };
    assert!(view.hero.loading.is_none());
    assert_eq!(view.hero.scene.opacity, 1.0);
    assert_eq!(view.hero.scene.cursor, scene::Cursor::Grabbing);

    shell.scene_pointer_up();
    let View::Revealed(view) = shell.render() else {
        panic!("expected revealed view");
    };
    assert_eq!(view.hero.scene.cursor, scene::Cursor::Grab);
}

#[tokio::test(start_paused = true)]
async fn hints_show_up_in_render_order() {
    let shell = shell();
    shell.click().unwrap().await.unwrap();

    tokio::time::sleep(std::time::Duration::from_secs(5)).await;
    let View::Revealed(view) = shell.render() else {
        panic!("expected revealed view");
    };
    let kinds: Vec<_> = view.hero.hints.iter().map(|h| h.kind).collect();
    assert_eq!(kinds, vec![HintKind::Interaction, HintKind::Scroll]);
    assert_eq!(view.hero.hints[1].text, "🌸 Scroll for More Magic");
}

#[tokio::test(start_paused = true)]
async fn click_after_unmount_is_ignored() {
    let shell = shell();
    shell.unmount();
    assert!(shell.click().is_none());
    assert_eq!(shell.sequencer().phase(), SnapPhase::Idle);
}
