// src/ingest/mod.rs
//! Comment ingestion: provider capability, YouTube provider and the paginating fetcher.

pub mod fetcher;
pub mod providers;
pub mod types;

pub use fetcher::{CommentFetcher, FetchLimits};
pub use types::{CommentPage, CommentProvider, RawComment};
