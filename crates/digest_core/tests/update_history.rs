use std::sync::Once;

use digest_core::{update, AppState, Article, Effect, FetchStatus, Msg, ResultPanel};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(digest_logging::initialize_for_tests);
}

fn seeded_state() -> AppState {
    let (mut state, _) = update(
        AppState::new(),
        Msg::HistoryLoaded(vec![
            Article::new("https://b.example.com", "second"),
            Article::new("https://a.example.com", "first"),
        ]),
    );
    assert!(state.consume_dirty());
    state
}

#[test]
fn loaded_history_is_shown_in_order() {
    init_logging();
    let view = seeded_state().view();
    let urls: Vec<_> = view.history.iter().map(|row| row.url.as_str()).collect();
    assert_eq!(urls, vec!["https://b.example.com", "https://a.example.com"]);
    assert_eq!(view.panel, ResultPanel::Empty);
}

#[test]
fn selecting_entry_shows_stored_article_without_request() {
    init_logging();
    let state = seeded_state();

    let (mut state, effects) = update(state, Msg::HistorySelected { index: 1 });

    assert!(effects.is_empty());
    assert_eq!(state.article(), &Article::new("https://a.example.com", "first"));
    assert_eq!(state.status(), &FetchStatus::Success);
    let view = state.view();
    assert_eq!(view.input, "https://a.example.com");
    assert_eq!(
        view.panel,
        ResultPanel::Summary {
            url: "https://a.example.com".to_string(),
            summary: "first".to_string(),
        }
    );
    assert!(state.consume_dirty());
}

#[test]
fn selecting_out_of_range_is_noop() {
    init_logging();
    let mut state = seeded_state();
    let before = state.clone();

    let (mut next, effects) = update(state.clone(), Msg::HistorySelected { index: 5 });

    assert!(effects.is_empty());
    assert_eq!(next, before);
    assert!(!next.consume_dirty());
    assert!(!state.consume_dirty());
}

#[test]
fn selecting_during_fetch_keeps_loading_panel() {
    init_logging();
    let (state, _) = update(seeded_state(), Msg::InputChanged("https://c.example.com".into()));
    let (state, effects) = update(state, Msg::UrlSubmitted);
    let request_id = match effects.as_slice() {
        [Effect::FetchSummary { request_id, .. }] => *request_id,
        other => panic!("unexpected effects {other:?}"),
    };

    let (state, _) = update(state, Msg::HistorySelected { index: 0 });
    assert!(state.is_fetching());
    assert!(matches!(state.view().panel, ResultPanel::Loading { .. }));

    let (state, effects) = update(
        state,
        Msg::SummaryFetched {
            request_id,
            url: "https://c.example.com".to_string(),
            result: Ok("third".to_string()),
        },
    );
    assert_eq!(effects.len(), 1);
    assert_eq!(state.article(), &Article::new("https://c.example.com", "third"));
    assert_eq!(state.history().len(), 3);
}

#[test]
fn history_entries_are_snapshots() {
    init_logging();
    let (state, _) = update(seeded_state(), Msg::HistorySelected { index: 0 });
    let (state, _) = update(state, Msg::InputChanged("https://edited.example.com".into()));

    assert_eq!(state.history()[0], Article::new("https://b.example.com", "second"));
    assert_eq!(state.article(), &Article::new("https://b.example.com", "second"));
    assert_eq!(state.input(), "https://edited.example.com");
    assert_eq!(state.view().input, "https://edited.example.com");
}
