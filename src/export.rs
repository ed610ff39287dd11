// src/export.rs
//! Artifacts for downstream consumers: plain-text corpus and JSON report.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::error::{AnalyzerError, Result};
use crate::pipeline::AnalysisRun;

/// One comment per line, UTF-8, newline-terminated. Line breaks inside a comment
/// are folded to spaces so each comment stays on its own line.
pub fn corpus_text<S: AsRef<str>>(comments: &[S]) -> String {
    let mut out = String::new();
    for c in comments {
        let line = c.as_ref().replace(['\r', '\n'], " ");
        out.push_str(&line);
        out.push('\n');
    }
    out
}

// unique tmp file in the target dir + rename; the tmp file is removed on drop if anything fails
fn write_atomic(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let dir = match path.parent().filter(|d| !d.as_os_str().is_empty()) {
        Some(d) => {
            fs::create_dir_all(d)?;
            d
        }
        None => Path::new("."),
    };
    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(bytes)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

fn export_err(path: &Path) -> impl FnOnce(io::Error) -> AnalyzerError + '_ {
    move |source| AnalyzerError::Export {
        path: path.to_path_buf(),
        source,
    }
}

pub fn write_corpus<S: AsRef<str>>(path: &Path, comments: &[S]) -> Result<()> {
    write_atomic(path, corpus_text(comments).as_bytes()).map_err(export_err(path))
}

pub fn write_report(path: &Path, run: &AnalysisRun) -> Result<()> {
    let json = serde_json::to_vec_pretty(run)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
        .map_err(export_err(path))?;
    write_atomic(path, &json).map_err(export_err(path))
}

/// Paths written by [`export_run`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedFiles {
    pub corpus: PathBuf,
    pub report: PathBuf,
}

/// Write `<dir>/<video_id>_comments.txt` and `<dir>/<video_id>_report.json`.
pub fn export_run(dir: &Path, run: &AnalysisRun) -> Result<ExportedFiles> {
    let corpus = dir.join(format!("{}_comments.txt", run.video_id));
    let report = dir.join(format!("{}_report.json", run.video_id));
    write_corpus(&corpus, &run.corpus)?;
    write_report(&report, run)?;
    tracing::info!(
        target: "pipeline",
        corpus = %corpus.display(),
        report = %report.display(),
        "analysis exported"
    );
    Ok(ExportedFiles { corpus, report })
}
