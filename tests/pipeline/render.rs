//! Pagination and render passes, driven through the widget.

use crate::common::{
    advance, ever_shown, hits_named, make_hits, mount, mount_with, run_local, shown_ids, type_text,
    HitSpec,
};
use searchlight::testing::{RecordingPage, Script};
use searchlight::{ResultDetail, ResultsBody, SearchConfig, SubResult};
use std::time::Duration;

fn page_of(page: &RecordingPage) -> (usize, usize) {
    let view = page.panel.showing().expect("results shown");
    (view.pagination.page, view.pagination.num_pages)
}

#[tokio::test(start_paused = true)]
async fn test_twelve_results_five_per_page() {
    run_local(async {
        let script = Script::new();
        script.respond("post", make_hits(12));
        let page = RecordingPage::new();
        let widget = mount(&script, &page);

        type_text(&widget, &page, "post");
        advance(10).await;
        let view = page.panel.showing().unwrap();
        assert_eq!((view.pagination.page, view.pagination.num_pages), (1, 3));
        assert!(!view.pagination.previous_enabled);
        assert!(view.pagination.next_enabled);
        assert!(view.pagination.input_enabled);
        assert_eq!(shown_ids(&page), ["1", "2", "3", "4", "5"]);
        // Only the visible page is fetched
        assert_eq!(script.fetches(), 5);

        widget.on_next_page();
        advance(10).await;
        assert_eq!(page_of(&page), (2, 3));
        assert_eq!(shown_ids(&page), ["6", "7", "8", "9", "10"]);

        widget.on_next_page();
        advance(10).await;
        assert_eq!(page_of(&page), (3, 3));
        assert_eq!(shown_ids(&page), ["11", "12"]);
        assert!(!page.panel.showing().unwrap().pagination.next_enabled);

        let paints = page.panel.show_count();
        widget.on_next_page();
        advance(10).await;
        assert_eq!(page.panel.show_count(), paints);
        assert_eq!(widget.page_state().page(), 3);
    })
    .await;
}

#[tokio::test(start_paused = true)]
async fn test_page_input_is_clamped_and_non_numbers_ignored() {
    run_local(async {
        let script = Script::new();
        script.respond("post", make_hits(12));
        let page = RecordingPage::new();
        let widget = mount(&script, &page);
        type_text(&widget, &page, "post");
        advance(10).await;

        widget.on_page_input("99");
        advance(10).await;
        assert_eq!(page_of(&page), (3, 3));

        widget.on_page_input("-4");
        advance(10).await;
        assert_eq!(page_of(&page), (1, 3));

        widget.on_page_input("2.7");
        advance(10).await;
        assert_eq!(page_of(&page), (2, 3));

        let paints = page.panel.show_count();
        for raw in ["", "two", "NaN", "Infinity"] {
            widget.on_page_input(raw);
        }
        advance(10).await;
        assert_eq!(page.panel.show_count(), paints);
        assert_eq!(widget.page_state().page(), 2);
    })
    .await;
}

#[tokio::test(start_paused = true)]
async fn test_new_result_set_resets_to_first_page() {
    run_local(async {
        let script = Script::new();
        script.respond("post", make_hits(12));
        script.respond("rust", hits_named("r", 7));
        let page = RecordingPage::new();
        let widget = mount(&script, &page);

        type_text(&widget, &page, "post");
        advance(10).await;
        widget.on_page_input("3");
        advance(10).await;
        assert_eq!(page_of(&page), (3, 3));

        type_text(&widget, &page, "rust");
        advance(10).await;
        assert_eq!(page_of(&page), (1, 2));
        assert_eq!(shown_ids(&page), ["r1", "r2", "r3", "r4", "r5"]);

        // Same query again is a new result set, so it resets too
        widget.on_next_page();
        advance(10).await;
        type_text(&widget, &page, "rust");
        advance(10).await;
        assert_eq!(page_of(&page), (1, 2));
    })
    .await;
}

#[tokio::test(start_paused = true)]
async fn test_zero_results_disable_all_controls() {
    run_local(async {
        let script = Script::new();
        script.respond("zzz", Vec::new());
        let page = RecordingPage::new();
        let widget = mount(&script, &page);

        type_text(&widget, &page, "zzz");
        advance(10).await;
        let view = page.panel.showing().unwrap();
        assert_eq!(view.body, ResultsBody::NoResults);
        assert_eq!((view.pagination.page, view.pagination.num_pages), (0, 0));
        assert!(!view.pagination.previous_enabled);
        assert!(!view.pagination.next_enabled);
        assert!(!view.pagination.input_enabled);

        let paints = page.panel.show_count();
        widget.on_next_page();
        widget.on_previous_page();
        widget.on_page_input("1");
        advance(10).await;
        assert_eq!(page.panel.show_count(), paints);
    })
    .await;
}

#[tokio::test(start_paused = true)]
async fn test_slow_fetch_for_an_old_result_set_is_dropped() {
    run_local(async {
        let script = Script::new();
        script.respond("old", vec![HitSpec::new("old").delayed(Duration::from_millis(500))]);
        script.respond("new", hits_named("n", 2));
        let page = RecordingPage::new();
        let widget = mount(&script, &page);

        type_text(&widget, &page, "old");
        advance(10).await;
        assert_eq!(widget.result_count(), Some(1));

        type_text(&widget, &page, "new");
        advance(700).await;
        assert_eq!(shown_ids(&page), ["n1", "n2"]);
        assert!(!ever_shown(&page, "old"));
    })
    .await;
}

#[tokio::test(start_paused = true)]
async fn test_slow_fetch_for_an_old_page_is_dropped() {
    run_local(async {
        let script = Script::new();
        let mut hits = make_hits(12);
        for hit in &mut hits[5..10] {
            hit.delay = Duration::from_millis(300);
        }
        script.respond("post", hits);
        let page = RecordingPage::new();
        let widget = mount(&script, &page);
        type_text(&widget, &page, "post");
        advance(10).await;

        widget.on_next_page();
        widget.on_next_page();
        advance(500).await;

        assert_eq!(page_of(&page), (3, 3));
        assert_eq!(shown_ids(&page), ["11", "12"]);
        assert!(!ever_shown(&page, "6"));
    })
    .await;
}

#[tokio::test(start_paused = true)]
async fn test_page_fragments_are_fetched_concurrently() {
    run_local(async {
        let script = Script::new();
        let hits = make_hits(5)
            .into_iter()
            .map(|hit| hit.delayed(Duration::from_millis(100)))
            .collect();
        script.respond("post", hits);
        let page = RecordingPage::new();
        let widget = mount(&script, &page);

        type_text(&widget, &page, "post");
        advance(150).await;
        assert_eq!(shown_ids(&page).len(), 5);
    })
    .await;
}

#[tokio::test(start_paused = true)]
async fn test_failed_fetch_keeps_the_previous_page() {
    run_local(async {
        let script = Script::new();
        let mut hits = make_hits(8);
        hits[6] = HitSpec::new("7").failing();
        script.respond("post", hits);
        let page = RecordingPage::new();
        let widget = mount(&script, &page);
        type_text(&widget, &page, "post");
        advance(10).await;

        let paints = page.panel.show_count();
        widget.on_next_page();
        advance(10).await;

        assert_eq!(page.panel.show_count(), paints);
        assert_eq!(shown_ids(&page), ["1", "2", "3", "4", "5"]);
        // The page number stays with what is on screen
        assert_eq!(widget.page_state().page(), 1);
        assert_eq!(page_of(&page), (1, 2));

        // Retrying asks for page 2 again, not page 3
        widget.on_next_page();
        advance(10).await;
        assert_eq!(widget.page_state().page(), 1);
        assert_eq!(shown_ids(&page), ["1", "2", "3", "4", "5"]);
    })
    .await;
}

#[tokio::test(start_paused = true)]
async fn test_failed_fetch_never_leaves_the_previous_query_on_screen() {
    run_local(async {
        let script = Script::new();
        script.respond("post", make_hits(12));
        script.respond("rust", vec![HitSpec::new("r1"), HitSpec::new("r2").failing()]);
        let page = RecordingPage::new();
        let widget = mount(&script, &page);
        type_text(&widget, &page, "post");
        advance(10).await;
        widget.on_page_input("3");
        advance(10).await;
        assert_eq!(shown_ids(&page), ["11", "12"]);

        type_text(&widget, &page, "rust");
        advance(10).await;

        assert_eq!(widget.result_count(), Some(2));
        assert_eq!(page.panel.showing(), None);
        assert_eq!(widget.current_view(), None);
        let state = widget.page_state();
        assert!(state.page() <= state.num_pages().max(1));
        assert!(!state.can_go_next());

        // The next query paints normally
        script.respond("rusty", hits_named("ok", 3));
        type_text(&widget, &page, "rusty");
        advance(10).await;
        assert_eq!(page_of(&page), (1, 1));
        assert_eq!(shown_ids(&page), ["ok1", "ok2", "ok3"]);
    })
    .await;
}

#[tokio::test(start_paused = true)]
async fn test_root_sub_result_is_not_repeated() {
    run_local(async {
        let script = Script::new();
        let detail = ResultDetail {
            title: None,
            url: "/p/index.html".to_string(),
            canonical: Some("/p/".to_string()),
            excerpt: "x".to_string(),
            sub_results: ["/p/", "/p/#a", "/p/#b", "/p/#c", "/p/#d"]
                .iter()
                .map(|url| SubResult {
                    title: url.to_string(),
                    url: url.to_string(),
                    excerpt: String::new(),
                })
                .collect(),
        };
        script.respond("p", vec![HitSpec::new("p").with_detail(detail)]);
        let page = RecordingPage::new();
        let widget = mount(&script, &page);

        type_text(&widget, &page, "p");
        advance(10).await;
        let view = page.panel.showing().unwrap();
        let hit = &view.hits()[0];
        assert_eq!(hit.title, "No Title");
        assert_eq!(hit.url, "/p/index.html");
        let urls: Vec<&str> = hit.sub_results.iter().map(|s| s.url.as_str()).collect();
        assert_eq!(urls, ["/p/#a", "/p/#b", "/p/#c"]);
    })
    .await;
}

#[tokio::test(start_paused = true)]
async fn test_results_per_page_is_configurable() {
    run_local(async {
        let script = Script::new();
        script.respond("post", make_hits(12));
        let page = RecordingPage::new();
        let config = SearchConfig {
            results_per_page: 4,
            ..SearchConfig::default()
        };
        let widget = mount_with(&script, &page, &config);

        type_text(&widget, &page, "post");
        advance(10).await;
        assert_eq!(page_of(&page), (1, 3));
        assert_eq!(shown_ids(&page).len(), 4);
    })
    .await;
}
