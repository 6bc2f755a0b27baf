//! Mount-time setup and the open/clear chrome.

use crate::common::{advance, hits_named, mount, run_local, shown_ids, type_text};
use searchlight::testing::{RecordingInput, RecordingPage, Script, ScriptedSource};
use searchlight::{
    ClassSwitch, Elements, InputElement, LoadState, SearchConfig, SearchController, TokioPlatform,
};

#[tokio::test(start_paused = true)]
async fn test_mount_enables_and_empties_the_input() {
    run_local(async {
        let script = Script::new();
        let page = RecordingPage::new();
        page.input.set_value("restored by the browser");
        assert!(!page.input.is_enabled());

        let widget = mount(&script, &page);
        assert!(page.input.is_enabled());
        assert_eq!(page.input.value(), "");
        assert!(!page.clear_button.is_on());
        assert_eq!(widget.load_state(), LoadState::Idle);
    })
    .await;
}

#[tokio::test(start_paused = true)]
async fn test_clear_button_follows_the_text() {
    run_local(async {
        let script = Script::new();
        let page = RecordingPage::new();
        let widget = mount(&script, &page);

        type_text(&widget, &page, "r");
        assert!(page.clear_button.is_on());
        type_text(&widget, &page, "");
        assert!(!page.clear_button.is_on());
    })
    .await;
}

#[tokio::test(start_paused = true)]
async fn test_opening_the_search_area_focuses_and_prewarms() {
    run_local(async {
        let script = Script::new();
        let page = RecordingPage::new();
        let widget = mount(&script, &page);

        widget.on_open_toggle();
        assert!(page.search_area.is_on());
        assert_eq!(page.input.focus_count(), 1);
        // Open area keeps the clear button visible even with no text
        assert!(page.clear_button.is_on());
        advance(10).await;
        assert_eq!(script.loads(), 1);

        widget.on_open_toggle();
        assert!(!page.search_area.is_on());
        assert!(!page.clear_button.is_on());
        assert_eq!(page.input.focus_count(), 1);
    })
    .await;
}

#[tokio::test(start_paused = true)]
async fn test_clear_button_resets_everything() {
    run_local(async {
        let script = Script::new();
        script.respond("rust", hits_named("r", 2));
        let page = RecordingPage::new();
        let widget = mount(&script, &page);

        widget.on_open_toggle();
        type_text(&widget, &page, "rust");
        advance(10).await;
        assert_eq!(shown_ids(&page), ["r1", "r2"]);

        widget.on_clear();
        assert_eq!(page.input.value(), "");
        assert!(!page.search_area.is_on());
        assert!(!page.clear_button.is_on());
        assert_eq!(page.panel.showing(), None);
        assert_eq!(widget.result_count(), None);
    })
    .await;
}

#[tokio::test(start_paused = true)]
async fn test_only_the_first_focus_prewarms() {
    run_local(async {
        let script = Script::new();
        let page = RecordingPage::new();
        let widget = mount(&script, &page);

        widget.on_focus();
        advance(10).await;
        assert_eq!(widget.load_state(), LoadState::Ready);
        widget.on_focus();
        widget.on_focus();
        advance(10).await;
        assert_eq!(script.loads(), 1);
        assert_eq!(script.inits(), 1);
    })
    .await;
}

#[tokio::test(start_paused = true)]
async fn test_results_panel_tracks_the_navigation_bar() {
    run_local(async {
        let script = Script::new();
        let page = RecordingPage::new();
        let widget = mount(&script, &page);

        widget.on_navigation_resize(64.0);
        assert_eq!(page.panel.top_offset(), Some(64.0));
        widget.on_navigation_resize(112.5);
        assert_eq!(page.panel.top_offset(), Some(112.5));
    })
    .await;
}

#[tokio::test(start_paused = true)]
async fn test_missing_optional_elements_are_tolerated() {
    run_local(async {
        let script = Script::new();
        script.respond("rust", hits_named("r", 2));
        let input = RecordingInput::new(Some("Search"));
        let widget = SearchController::mount(
            ScriptedSource::new(&script, TokioPlatform),
            TokioPlatform,
            Elements::input_only(input.clone()),
            &SearchConfig::default(),
        );

        widget.on_open_toggle();
        widget.on_navigation_resize(40.0);
        input.set_value("rust");
        widget.on_input();
        advance(10).await;

        assert_eq!(widget.result_count(), Some(2));
        assert_eq!(widget.current_view().map(|v| v.hits().len()), Some(2));
        widget.on_clear();
        assert_eq!(input.value(), "");
    })
    .await;
}
