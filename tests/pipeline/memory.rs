//! End to end over the in-memory index and the blog fixture.

use crate::common::{advance, run_local, shown_ids, type_text, BLOG_CORPUS};
use searchlight::memory::{load_corpus, CorpusStats, DEFAULT_DEBOUNCE_MS};
use searchlight::testing::RecordingPage;
use searchlight::{
    render_html, InputElement, LoadState, MemorySource, SearchConfig, SearchController,
    SearchError, TokioPlatform,
};
use std::io::Write;
use std::path::Path;
use std::rc::Rc;

type BlogWidget = SearchController<MemorySource<TokioPlatform>, TokioPlatform>;

fn mount_blog(page: &RecordingPage) -> Rc<BlogWidget> {
    SearchController::mount(
        MemorySource::from_path(BLOG_CORPUS, TokioPlatform),
        TokioPlatform,
        page.elements(),
        &SearchConfig::default(),
    )
}

#[test]
fn test_fixture_is_a_valid_corpus() {
    let pages = load_corpus(Path::new(BLOG_CORPUS)).unwrap();
    let stats = CorpusStats::of(&pages);
    assert_eq!(stats.pages, 7);
    assert_eq!(stats.untitled, 1);
}

#[tokio::test(start_paused = true)]
async fn test_search_paints_after_the_debounce_window() {
    run_local(async {
        let page = RecordingPage::new();
        let widget = mount_blog(&page);

        type_text(&widget, &page, "search");
        advance(DEFAULT_DEBOUNCE_MS / 2).await;
        assert_eq!(page.panel.show_count(), 0);

        advance(DEFAULT_DEBOUNCE_MS).await;
        let view = page.panel.showing().unwrap();
        assert_eq!(widget.result_count(), Some(6));
        assert_eq!((view.pagination.page, view.pagination.num_pages), (1, 2));
        // Title matches rank first, then corpus order
        assert_eq!(
            shown_ids(&page),
            [
                "/posts/lazy-loading-search/",
                "/posts/pagination/",
                "/posts/debouncing-input/",
                "/posts/cafe-notes/",
                "/posts/rust-wasm/",
            ]
        );
    })
    .await;
}

#[tokio::test(start_paused = true)]
async fn test_typing_burst_resolves_to_the_last_query() {
    run_local(async {
        let page = RecordingPage::new();
        let widget = mount_blog(&page);

        for text in ["o", "ob", "obs", "obse", "observer"] {
            type_text(&widget, &page, text);
            advance(50).await;
        }
        advance(DEFAULT_DEBOUNCE_MS * 2).await;

        assert_eq!(shown_ids(&page), ["/posts/resize-observer/"]);
        assert_eq!(page.panel.show_count(), 1);
    })
    .await;
}

#[tokio::test(start_paused = true)]
async fn test_diacritics_fold_and_sections_become_sub_results() {
    run_local(async {
        let page = RecordingPage::new();
        let widget = mount_blog(&page);

        type_text(&widget, &page, "cafe");
        advance(DEFAULT_DEBOUNCE_MS + 50).await;
        assert_eq!(shown_ids(&page), ["/posts/cafe-notes/"]);

        type_text(&widget, &page, "superseded");
        advance(DEFAULT_DEBOUNCE_MS + 50).await;
        let view = page.panel.showing().unwrap();
        let hit = &view.hits()[0];
        assert_eq!(hit.url, "/posts/debouncing-input/");
        // The page itself is skipped; the matching section remains
        let subs: Vec<&str> = hit.sub_results.iter().map(|s| s.url.as_str()).collect();
        assert_eq!(subs, ["/posts/debouncing-input/#superseded"]);
        assert!(hit.excerpt.contains("<mark>superseded</mark>"));
    })
    .await;
}

#[tokio::test(start_paused = true)]
async fn test_static_markup_matches_the_painted_view() {
    run_local(async {
        let page = RecordingPage::new();
        let widget = mount_blog(&page);

        type_text(&widget, &page, "title");
        advance(DEFAULT_DEBOUNCE_MS + 50).await;
        let view = page.panel.showing().unwrap();
        let html = render_html(&view);

        assert!(html.starts_with(r#"<div class="search-results"><div class="pagination">"#));
        assert!(html.contains(r#"<header class="result-title">No Title</header>"#));
        assert!(html.contains(&format!("<span> of {}</span>", view.pagination.num_pages)));
    })
    .await;
}

#[tokio::test(start_paused = true)]
async fn test_malformed_corpus_fails_the_loader() {
    run_local(async {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"[{{"url": ""}}]"#).unwrap();
        let page = RecordingPage::new();
        let widget = SearchController::mount(
            MemorySource::from_path(file.path(), TokioPlatform),
            TokioPlatform,
            page.elements(),
            &SearchConfig::default(),
        );

        assert!(matches!(widget.ready().await, Err(SearchError::Corpus(_))));
        assert!(matches!(widget.load_state(), LoadState::Failed(SearchError::Corpus(_))));
        assert_eq!(page.input.placeholder().as_deref(), Some("Search"));
    })
    .await;
}
