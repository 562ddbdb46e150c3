use std::sync::Once;

use digest_core::{update, AppState, Article, Effect, Msg, COPY_FEEDBACK_DELAY};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(digest_logging::initialize_for_tests);
}

fn seeded_state() -> AppState {
    let (state, _) = update(
        AppState::new(),
        Msg::HistoryLoaded(vec![
            Article::new("https://b.example.com", "second"),
            Article::new("https://a.example.com", "first"),
        ]),
    );
    state
}

fn copied_rows(state: &AppState) -> Vec<String> {
    state
        .view()
        .history
        .into_iter()
        .filter(|row| row.copied)
        .map(|row| row.url)
        .collect()
}

#[test]
fn copy_sets_feedback_and_schedules_reset() {
    init_logging();
    let (state, effects) = update(seeded_state(), Msg::CopyClicked { index: 1 });

    assert_eq!(
        effects,
        vec![
            Effect::CopyToClipboard {
                url: "https://a.example.com".to_string()
            },
            Effect::ScheduleCopyReset {
                generation: 1,
                delay: COPY_FEEDBACK_DELAY,
            },
        ]
    );
    assert_eq!(copied_rows(&state), vec!["https://a.example.com".to_string()]);
    assert_eq!(COPY_FEEDBACK_DELAY.as_secs(), 3);
}

#[test]
fn copy_does_not_touch_fetch_state() {
    init_logging();
    let before = seeded_state();
    let (after, _) = update(before.clone(), Msg::CopyClicked { index: 0 });

    assert_eq!(after.status(), before.status());
    assert_eq!(after.article(), before.article());
    assert_eq!(after.history(), before.history());
}

#[test]
fn feedback_clears_when_timer_fires() {
    init_logging();
    let (state, _) = update(seeded_state(), Msg::CopyClicked { index: 0 });

    let (state, effects) = update(state, Msg::CopyFeedbackExpired { generation: 1 });

    assert!(effects.is_empty());
    assert!(state.copied().is_none());
    assert!(copied_rows(&state).is_empty());
}

#[test]
fn stale_timer_does_not_clear_newer_copy() {
    init_logging();
    let (state, _) = update(seeded_state(), Msg::CopyClicked { index: 0 });
    let (state, effects) = update(state, Msg::CopyClicked { index: 0 });
    assert!(effects.contains(&Effect::ScheduleCopyReset {
        generation: 2,
        delay: COPY_FEEDBACK_DELAY,
    }));

    let (state, _) = update(state, Msg::CopyFeedbackExpired { generation: 1 });
    assert_eq!(copied_rows(&state), vec!["https://b.example.com".to_string()]);

    let (state, _) = update(state, Msg::CopyFeedbackExpired { generation: 2 });
    assert!(copied_rows(&state).is_empty());
}

#[test]
fn copy_moves_marker_to_latest_row() {
    init_logging();
    let (state, _) = update(seeded_state(), Msg::CopyClicked { index: 0 });
    let (state, _) = update(state, Msg::CopyClicked { index: 1 });

    assert_eq!(copied_rows(&state), vec!["https://a.example.com".to_string()]);
}

#[test]
fn copy_out_of_range_is_noop() {
    init_logging();
    let (state, effects) = update(seeded_state(), Msg::CopyClicked { index: 9 });
    assert!(effects.is_empty());
    assert!(state.copied().is_none());
}
