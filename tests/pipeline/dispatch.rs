//! Query dispatch: stale results never win, and clearing is immediate.

use crate::common::{
    advance, ever_shown, hits_named, mount, run_local, settle, shown_ids, type_text,
};
use searchlight::testing::{RecordingPage, Script};
use searchlight::{LoadState, SearchError};
use std::time::Duration;

#[tokio::test(start_paused = true)]
async fn test_slow_older_query_never_overwrites_newer_results() {
    run_local(async {
        let script = Script::new();
        script.respond_after("ru", Duration::from_millis(300), hits_named("old", 2));
        script.respond_after("rust", Duration::from_millis(50), hits_named("new", 7));
        let page = RecordingPage::new();
        let widget = mount(&script, &page);

        type_text(&widget, &page, "ru");
        type_text(&widget, &page, "rust");
        advance(500).await;

        assert_eq!(widget.result_count(), Some(7));
        assert_eq!(shown_ids(&page), ["new1", "new2", "new3", "new4", "new5"]);
        assert!(!ever_shown(&page, "old1"));
        assert_eq!(script.queries().len(), 2);
    })
    .await;
}

#[tokio::test(start_paused = true)]
async fn test_superseded_queries_leave_the_store_alone() {
    run_local(async {
        let script = Script::new();
        script.supersede("ru");
        script.respond_after("rust", Duration::from_millis(100), hits_named("r", 3));
        let page = RecordingPage::new();
        let widget = mount(&script, &page);

        type_text(&widget, &page, "ru");
        advance(10).await;
        assert_eq!(widget.result_count(), None);
        assert_eq!(page.panel.show_count(), 0);

        type_text(&widget, &page, "rust");
        advance(200).await;
        assert_eq!(widget.result_count(), Some(3));
    })
    .await;
}

#[tokio::test(start_paused = true)]
async fn test_clearing_the_input_is_synchronous() {
    run_local(async {
        let script = Script::new();
        script.respond("rust", hits_named("r", 3));
        let page = RecordingPage::new();
        let widget = mount(&script, &page);

        type_text(&widget, &page, "rust");
        advance(10).await;
        assert_eq!(shown_ids(&page), ["r1", "r2", "r3"]);

        type_text(&widget, &page, "");
        // No await: the panel is already empty
        assert_eq!(widget.result_count(), None);
        assert_eq!(page.panel.history().last(), Some(&None));
        assert_eq!(widget.current_view(), None);
        assert_eq!(script.queries(), ["rust"]);
    })
    .await;
}

#[tokio::test(start_paused = true)]
async fn test_clearing_invalidates_a_query_in_flight() {
    run_local(async {
        let script = Script::new();
        script.respond_after("rust", Duration::from_millis(200), hits_named("r", 3));
        let page = RecordingPage::new();
        let widget = mount(&script, &page);

        type_text(&widget, &page, "rust");
        settle().await;
        type_text(&widget, &page, "");
        advance(400).await;

        assert_eq!(widget.result_count(), None);
        assert!(!ever_shown(&page, "r1"));
    })
    .await;
}

#[tokio::test(start_paused = true)]
async fn test_typing_before_the_index_is_ready_waits_for_it() {
    run_local(async {
        let script = Script::new();
        script.set_init_delay(Duration::from_millis(250));
        script.respond("lazy", hits_named("l", 1));
        let page = RecordingPage::new();
        let widget = mount(&script, &page);

        type_text(&widget, &page, "l");
        type_text(&widget, &page, "la");
        type_text(&widget, &page, "lazy");
        advance(100).await;
        assert_eq!(widget.load_state(), LoadState::Initializing);

        advance(300).await;
        assert_eq!(script.inits(), 1);
        assert_eq!(shown_ids(&page), ["l1"]);
    })
    .await;
}

#[tokio::test(start_paused = true)]
async fn test_queries_after_a_failed_load_do_nothing() {
    run_local(async {
        let script = Script::new();
        script.fail_init(SearchError::Init("offline".to_string()));
        script.respond("rust", hits_named("r", 3));
        let page = RecordingPage::new();
        let widget = mount(&script, &page);

        type_text(&widget, &page, "rust");
        advance(50).await;
        type_text(&widget, &page, "rusty");
        advance(50).await;

        assert!(matches!(widget.load_state(), LoadState::Failed(SearchError::Init(_))));
        assert!(script.queries().is_empty());
        assert_eq!(page.panel.show_count(), 0);
        assert_eq!(script.inits(), 1);
    })
    .await;
}
