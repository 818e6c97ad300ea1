use super::*;

async fn at(start: tokio::time::Instant, ms: u64) {
    tokio::time::sleep_until(start + Duration::from_millis(ms)).await;
}

#[tokio::test(start_paused = true)]
async fn hints_appear_at_their_delays() {
    let start = tokio::time::Instant::now();
    let hints = HintScheduler::mount(&HintConfig::default());
    let flags = Arc::clone(hints.flags());
    assert_eq!(hints.pending(), 2);

    at(start, 1499).await;
    assert!(!flags.interaction());
    assert!(!flags.scroll());

    at(start, 1501).await;
    assert!(flags.interaction());
    assert!(!flags.scroll());

    at(start, 3999).await;
    assert!(!flags.scroll());

    at(start, 4001).await;
    assert!(flags.interaction());
    assert!(flags.scroll());
    assert_eq!(hints.pending(), 0);
}

#[tokio::test(start_paused = true)]
async fn drop_before_delay_cancels_both() {
    let start = tokio::time::Instant::now();
    let hints = HintScheduler::mount(&HintConfig::default());
    let flags = Arc::clone(hints.flags());

    at(start, 1000).await;
    drop(hints);

    at(start, 10_000).await;
    assert!(!flags.interaction());
    assert!(!flags.scroll());
}

#[tokio::test(start_paused = true)]
async fn drop_between_delays_keeps_the_first_and_cancels_the_second() {
    let start = tokio::time::Instant::now();
    let hints = HintScheduler::mount(&HintConfig::default());
    let flags = Arc::clone(hints.flags());

    at(start, 2000).await;
    drop(hints);

    at(start, 10_000).await;
    assert!(flags.interaction());
    assert!(!flags.scroll());
}

#[tokio::test(start_paused = true)]
async fn flags_are_independent() {
    let cfg = HintConfig {
        interaction_delay_secs: 3.0,
        scroll_delay_secs: 1.0,
    };
    let start = tokio::time::Instant::now();
    let hints = HintScheduler::mount(&cfg);

    at(start, 1500).await;
    assert!(hints.flags().is_visible(HintKind::Scroll));
    assert!(!hints.flags().is_visible(HintKind::Interaction));
}
