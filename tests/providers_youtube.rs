// tests/providers_youtube.rs
// Decoding a recorded commentThreads.list page and running it through the pipeline.

use std::sync::Arc;

use async_trait::async_trait;
use yt_comment_analyzer::ingest::providers::youtube::parse_thread_page;
use yt_comment_analyzer::{
    AnalyzerConfig, CommentPage, CommentProvider, Pipeline, ProviderError, VideoId, VideoLookup,
};

const FIXTURE: &str = include_str!("fixtures/comment_threads_page.json");

/// Replays the fixture as a single, final page.
struct FixtureProvider;

#[async_trait]
impl CommentProvider for FixtureProvider {
    async fn list_comment_threads(
        &self,
        _video_id: &str,
        _page_size: u32,
        _page_token: Option<&str>,
    ) -> Result<CommentPage, ProviderError> {
        let mut page = parse_thread_page(FIXTURE)?;
        page.next_page_token = None;
        Ok(page)
    }
    fn name(&self) -> &'static str {
        "fixture"
    }
}

#[test]
fn fixture_page_decodes() {
    let page = parse_thread_page(FIXTURE).expect("fixture parses");
    assert_eq!(page.items.len(), 5);
    assert_eq!(page.next_page_token.as_deref(), Some("QURTSl9pMlg1"));
    assert_eq!(page.items[1].author_id, "UCowner");
}

#[tokio::test]
async fn fixture_page_through_pipeline() {
    let pipeline = Pipeline::from_config(&AnalyzerConfig::default(), Arc::new(FixtureProvider));
    let video = VideoId::parse("https://www.youtube.com/watch?v=dQw4w9WgXcQ").unwrap();
    let run = pipeline
        .run(&video, &VideoLookup::found("UCowner"))
        .await
        .expect("run succeeds");

    // owner comment excluded at source
    assert_eq!(run.fetched_count, 4);
    // link spam and the emoji-dominated reaction are filtered out
    let corpus: Vec<&str> = run.corpus.iter().map(|c| c.as_str()).collect();
    assert_eq!(
        corpus,
        vec![
            "this was an amazing and insightful video 😀",
            "the audio is terrible in the second half."
        ]
    );

    let stats = &run.result.corpus_stats;
    assert_eq!(stats.total_count, 2);
    assert_eq!(stats.emoji_count, 1);
    assert_eq!(stats.link_count, 0);
    assert_eq!(stats.sentiment_distribution.positive, 1);
    assert_eq!(stats.sentiment_distribution.negative, 1);
}
