// src/config/analyzer.rs
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::{env, fs, path::Path, path::PathBuf};

pub const DEFAULT_CONFIG_PATH: &str = "config/analyzer.toml";
pub const ENV_CONFIG_PATH: &str = "ANALYZER_CONFIG_PATH";
pub const ENV_MAX_COMMENTS: &str = "ANALYZER_MAX_COMMENTS";
pub const ENV_TEXT_RATIO: &str = "ANALYZER_TEXT_RATIO";
pub const ENV_API_KEY: &str = "YOUTUBE_API_KEY";

pub const DEFAULT_MAX_COMMENTS: usize = 600;
/// Upper bound for `max_comments`, whatever the config says.
pub const HARD_MAX_COMMENTS: usize = 10_000;
pub const MAX_PAGE_SIZE: u32 = 100;
pub const DEFAULT_TEXT_RATIO: f64 = 0.65;
pub const DEFAULT_TOP_N: usize = 10;

fn default_api_key() -> String {
    "ENV".to_string()
}
fn default_base_url() -> String {
    "https://www.googleapis.com/youtube/v3".to_string()
}
fn default_max_comments() -> usize {
    DEFAULT_MAX_COMMENTS
}
fn default_page_size() -> u32 {
    MAX_PAGE_SIZE
}
fn default_text_ratio() -> f64 {
    DEFAULT_TEXT_RATIO
}
fn default_positive() -> f64 {
    0.05
}
fn default_negative() -> f64 {
    -0.05
}
fn default_top_n() -> usize {
    DEFAULT_TOP_N
}
fn default_min_words() -> usize {
    5
}
fn default_timeout() -> u64 {
    10
}
fn default_export_dir() -> PathBuf {
    PathBuf::from("exports")
}

/// Tunables for one analysis pipeline. Passed explicitly to the fetcher and provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// "ENV" means: read from YOUTUBE_API_KEY
    #[serde(default = "default_api_key")]
    pub api_key: String,
    #[serde(default = "default_base_url")]
    pub api_base_url: String,
    #[serde(default = "default_max_comments")]
    pub max_comments: usize,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    /// Minimum text share `C / (C + E)` for an emoji-bearing comment to be kept (exclusive).
    #[serde(default = "default_text_ratio")]
    pub text_ratio_threshold: f64,
    #[serde(default = "default_positive")]
    pub positive_threshold: f64,
    #[serde(default = "default_negative")]
    pub negative_threshold: f64,
    #[serde(default = "default_top_n")]
    pub top_n: usize,
    /// Readability is averaged only over comments with more words than this.
    #[serde(default = "default_min_words")]
    pub min_readability_words: usize,
    #[serde(default)]
    pub allow_partial_results: bool,
    #[serde(default = "default_timeout")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_export_dir")]
    pub export_dir: PathBuf,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            api_key: default_api_key(),
            api_base_url: default_base_url(),
            max_comments: default_max_comments(),
            page_size: default_page_size(),
            text_ratio_threshold: default_text_ratio(),
            positive_threshold: default_positive(),
            negative_threshold: default_negative(),
            top_n: default_top_n(),
            min_readability_words: default_min_words(),
            allow_partial_results: false,
            request_timeout_secs: default_timeout(),
            export_dir: default_export_dir(),
        }
    }
}

impl AnalyzerConfig {
    /// Parse a TOML document and sanitize the values.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let cfg: AnalyzerConfig = toml::from_str(s).context("parsing analyzer config")?;
        Ok(cfg.sanitized())
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let data = fs::read_to_string(path)
            .with_context(|| format!("reading analyzer config from {}", path.display()))?;
        Self::from_toml_str(&data)
    }

    /// Load using env var + fallbacks, then apply env overrides:
    /// 1) $ANALYZER_CONFIG_PATH (must exist)
    /// 2) config/analyzer.toml
    /// 3) built-in defaults
    pub fn load_default() -> Result<Self> {
        let cfg = if let Ok(p) = env::var(ENV_CONFIG_PATH) {
            let pb = PathBuf::from(p);
            if !pb.exists() {
                return Err(anyhow!("{ENV_CONFIG_PATH} points to non-existent path"));
            }
            Self::load_from_file(&pb)?
        } else if Path::new(DEFAULT_CONFIG_PATH).exists() {
            Self::load_from_file(DEFAULT_CONFIG_PATH)?
        } else {
            Self::default()
        };
        Ok(cfg.with_env_overrides())
    }

    /// Apply ANALYZER_MAX_COMMENTS / ANALYZER_TEXT_RATIO / YOUTUBE_API_KEY.
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(n) = parse_env::<usize>(ENV_MAX_COMMENTS) {
            self.max_comments = n;
        }
        if let Some(r) = parse_env::<f64>(ENV_TEXT_RATIO) {
            self.text_ratio_threshold = r;
        }
        if self.api_key.trim().eq_ignore_ascii_case("env") {
            self.api_key = env::var(ENV_API_KEY).unwrap_or_default();
        }
        self.sanitized()
    }

    /// Clamp every tunable into its supported range.
    pub fn sanitized(mut self) -> Self {
        self.max_comments = self.max_comments.clamp(1, HARD_MAX_COMMENTS);
        self.page_size = self.page_size.clamp(1, MAX_PAGE_SIZE);
        if !self.text_ratio_threshold.is_finite() {
            self.text_ratio_threshold = DEFAULT_TEXT_RATIO;
        }
        self.text_ratio_threshold = self.text_ratio_threshold.clamp(0.0, 1.0);
        if !self.positive_threshold.is_finite() {
            self.positive_threshold = default_positive();
        }
        if !self.negative_threshold.is_finite() {
            self.negative_threshold = default_negative();
        }
        if self.negative_threshold > self.positive_threshold {
            std::mem::swap(&mut self.negative_threshold, &mut self.positive_threshold);
        }
        self.top_n = self.top_n.clamp(1, 100);
        self.request_timeout_secs = self.request_timeout_secs.max(1);
        self
    }

    pub fn has_api_key(&self) -> bool {
        let k = self.api_key.trim();
        !k.is_empty() && !k.eq_ignore_ascii_case("env")
    }
}

fn parse_env<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|s| s.trim().parse::<T>().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_constants() {
        let cfg = AnalyzerConfig::default();
        assert_eq!(cfg.max_comments, 600);
        assert_eq!(cfg.page_size, 100);
        assert_eq!(cfg.text_ratio_threshold, 0.65);
        assert_eq!(cfg.top_n, 10);
        assert!(!cfg.allow_partial_results);
    }

    #[test]
    fn toml_partial_document_fills_defaults_and_clamps() {
        let cfg = AnalyzerConfig::from_toml_str(
            r#"
            max_comments = 1000000
            page_size = 500
            text_ratio_threshold = 0.8
            "#,
        )
        .unwrap();
        assert_eq!(cfg.max_comments, HARD_MAX_COMMENTS);
        assert_eq!(cfg.page_size, 100);
        assert_eq!(cfg.text_ratio_threshold, 0.8);
        assert_eq!(cfg.positive_threshold, 0.05);
    }

    #[test]
    fn inverted_thresholds_are_swapped() {
        let cfg = AnalyzerConfig {
            positive_threshold: -0.2,
            negative_threshold: 0.3,
            ..Default::default()
        }
        .sanitized();
        assert_eq!(cfg.positive_threshold, 0.3);
        assert_eq!(cfg.negative_threshold, -0.2);
    }

    #[test]
    fn env_placeholder_is_not_a_key() {
        let cfg = AnalyzerConfig::default();
        assert!(!cfg.has_api_key());
    }
}
