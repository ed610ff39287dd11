//! Demo: analyze one video and export the corpus + JSON report.
//!
//! Usage: `analyze_demo <video id or url> <owner channel id>`
//! The owner channel id normally comes from a metadata lookup done by the caller.

use anyhow::{bail, Context};
use yt_comment_analyzer::{
    export, telemetry, youtube_pipeline, AnalyzerConfig, VideoId, VideoLookup,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env in local/dev; no-op otherwise.
    let _ = dotenvy::dotenv();
    telemetry::init_tracing();

    let mut args = std::env::args().skip(1);
    let (Some(video), Some(owner)) = (args.next(), args.next()) else {
        bail!("usage: analyze_demo <video id or url> <owner channel id>");
    };

    let cfg = AnalyzerConfig::load_default().context("loading analyzer config")?;
    let video = VideoId::parse(&video)?;
    let pipeline = youtube_pipeline(&cfg).context("building YouTube client")?;

    let run = match pipeline.run(&video, &VideoLookup::found(owner)).await {
        Ok(run) => run,
        Err(e) => {
            tracing::error!(error = %e, "analysis failed");
            eprintln!("{}", e.user_message());
            return Err(e.into());
        }
    };

    let files = export::export_run(&cfg.export_dir, &run)?;
    println!("{}", serde_json::to_string_pretty(&run.result)?);
    println!("corpus: {}", files.corpus.display());
    println!("report: {}", files.report.display());
    Ok(())
}
