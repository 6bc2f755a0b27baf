//! Lazy loading: one initialization, a delayed loading hint, and failure revert.

use crate::common::{advance, run_local};
use searchlight::testing::{RecordingInput, Script, ScriptedSource};
use searchlight::{InputElement, LazyIndexLoader, LoadState, SearchConfig, SearchError, TokioPlatform};
use std::rc::Rc;
use std::time::Duration;

type Loader = LazyIndexLoader<ScriptedSource<TokioPlatform>, TokioPlatform>;

fn loader(script: &Rc<Script>, input: &Rc<RecordingInput>) -> Rc<Loader> {
    Rc::new(LazyIndexLoader::new(
        ScriptedSource::new(script, TokioPlatform),
        TokioPlatform,
        input.clone(),
        &SearchConfig::default(),
    ))
}

fn loading_shown(input: &RecordingInput) -> bool {
    input
        .placeholder_history()
        .iter()
        .any(|p| p.as_deref() == Some("Loading..."))
}

#[tokio::test(start_paused = true)]
async fn test_nothing_loads_before_first_use() {
    run_local(async {
        let script = Script::new();
        let input = RecordingInput::new(Some("Search"));
        let loader = loader(&script, &input);
        advance(1000).await;

        assert_eq!(loader.state(), LoadState::Idle);
        assert_eq!(script.loads(), 0);
        assert!(input.placeholder_history().is_empty());
    })
    .await;
}

#[tokio::test(start_paused = true)]
async fn test_concurrent_callers_share_one_initialization() {
    run_local(async {
        let script = Script::new();
        script.set_init_delay(Duration::from_millis(250));
        let input = RecordingInput::new(Some("Search"));
        let loader = loader(&script, &input);

        let outcomes =
            futures::future::join_all((0..8).map(|_| loader.ensure_loaded())).await;
        assert!(outcomes.iter().all(Result::is_ok));
        assert_eq!(script.loads(), 1);
        assert_eq!(script.inits(), 1);

        // Later callers reuse the memoized backend
        loader.ensure_loaded().await.unwrap();
        assert_eq!(script.inits(), 1);
        assert_eq!(loader.state(), LoadState::Ready);
    })
    .await;
}

#[tokio::test(start_paused = true)]
async fn test_fast_initialization_never_shows_the_hint() {
    run_local(async {
        let script = Script::new();
        script.set_init_delay(Duration::from_millis(40));
        let input = RecordingInput::new(Some("Search"));
        let loader = loader(&script, &input);

        loader.ensure_loaded().await.unwrap();
        advance(500).await;

        assert!(!loading_shown(&input));
        assert!(!input.is_loading());
        assert_eq!(input.placeholder().as_deref(), Some("Search"));
        assert!(loader.is_preloaded());
    })
    .await;
}

#[tokio::test(start_paused = true)]
async fn test_hint_stays_until_preload_settles() {
    run_local(async {
        let script = Script::new();
        script.set_init_delay(Duration::from_millis(300));
        script.set_preload_delay(Duration::from_millis(200));
        let input = RecordingInput::new(Some("Search"));
        let loader = loader(&script, &input);

        loader.prewarm();
        advance(150).await;
        assert_eq!(loader.state(), LoadState::Initializing);
        assert_eq!(input.placeholder().as_deref(), Some("Loading..."));
        assert!(input.is_loading());

        // init() done at 300ms, preload() still running until 500ms
        advance(200).await;
        assert_eq!(loader.state(), LoadState::Ready);
        assert!(input.is_loading());
        assert!(!loader.is_preloaded());

        advance(200).await;
        assert!(loader.is_preloaded());
        assert!(!input.is_loading());
        assert_eq!(input.placeholder().as_deref(), Some("Search"));
        assert!(script.preloaded_with(""));
    })
    .await;
}

#[tokio::test(start_paused = true)]
async fn test_failed_initialization_reverts_and_is_not_retried() {
    run_local(async {
        let script = Script::new();
        script.set_init_delay(Duration::from_millis(300));
        script.fail_init(SearchError::Init("wasm blocked".to_string()));
        let input = RecordingInput::new(Some("Search"));
        let loader = loader(&script, &input);

        loader.prewarm();
        advance(150).await;
        assert!(input.is_loading());

        advance(200).await;
        assert_eq!(
            loader.state(),
            LoadState::Failed(SearchError::Init("wasm blocked".to_string()))
        );
        assert!(!input.is_loading());
        assert_eq!(input.placeholder().as_deref(), Some("Search"));

        let again = loader.ensure_loaded().await;
        assert!(matches!(again, Err(SearchError::Init(_))));
        assert_eq!(script.inits(), 1);
        assert_eq!(script.preloads(), 0);
    })
    .await;
}

#[tokio::test(start_paused = true)]
async fn test_preload_failure_still_restores_the_input() {
    run_local(async {
        let script = Script::new();
        script.fail_preload(SearchError::Preload("chunk 404".to_string()));
        let input = RecordingInput::new(None);
        let loader = loader(&script, &input);

        loader.ensure_loaded().await.unwrap();
        advance(10).await;

        assert!(loader.is_preloaded());
        assert!(!input.is_loading());
        assert_eq!(input.placeholder(), None);
        assert_eq!(loader.state(), LoadState::Ready);
    })
    .await;
}
