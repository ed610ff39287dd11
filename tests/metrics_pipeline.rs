// tests/metrics_pipeline.rs
#![cfg(feature = "strict-metrics")] // compile & run only when explicitly enabled

use std::sync::Arc;

use async_trait::async_trait;
use yt_comment_analyzer::telemetry::install_prometheus;
use yt_comment_analyzer::{
    AnalyzerConfig, CommentPage, CommentProvider, Pipeline, ProviderError, RawComment, VideoId,
    VideoLookup,
};

struct OnePage;

#[async_trait]
impl CommentProvider for OnePage {
    async fn list_comment_threads(
        &self,
        _video_id: &str,
        _page_size: u32,
        _page_token: Option<&str>,
    ) -> Result<CommentPage, ProviderError> {
        Ok(CommentPage {
            items: vec![
                RawComment {
                    text: "Really helpful walkthrough".into(),
                    author_id: "UCa".into(),
                },
                RawComment {
                    text: "https://spam.example".into(),
                    author_id: "UCb".into(),
                },
                RawComment {
                    text: "Thanks for watching everyone".into(),
                    author_id: "UCowner".into(),
                },
                RawComment {
                    text: "Over the cap".into(),
                    author_id: "UCc".into(),
                },
            ],
            next_page_token: None,
        })
    }
    fn name(&self) -> &'static str {
        "one-page"
    }
}

#[tokio::test]
async fn metrics_exposed_after_run() {
    let handle = install_prometheus().expect("recorder");

    let cfg = AnalyzerConfig {
        max_comments: 2,
        ..AnalyzerConfig::default()
    };
    let pipeline = Pipeline::from_config(&cfg, Arc::new(OnePage));
    let video = VideoId::parse("dQw4w9WgXcQ").unwrap();
    let run = pipeline
        .run(&video, &VideoLookup::found("UCowner"))
        .await
        .expect("run");
    assert_eq!(run.fetched_count, 2);

    let out = handle.render();
    assert!(out.contains("comments_fetched_total"));
    assert!(out.contains("comments_kept_total"));
    assert!(out.contains("comments_rejected_total"));
    assert!(out.contains("analysis_runs_total"));
    // the cap drops one viewer comment; only the owner's counts as skipped
    assert!(out.contains("comments_owner_skipped_total 1"), "{out}");
    assert!(out.contains("comments_fetched_total 2"), "{out}");

    let last_run: f64 = out
        .lines()
        .find_map(|l| l.strip_prefix("analysis_last_run_ts "))
        .expect("last run gauge")
        .trim()
        .parse()
        .unwrap();
    assert_eq!(last_run, run.analyzed_at.timestamp() as f64);
}
