// ABOUTME: Main library entry point for the noticia article extraction pipeline.
// ABOUTME: Re-exports the public API: Client, Pipeline, ExtractionResult, ExtractError, report helpers.

//! noticia - single-article extraction with bounded retry.
//!
//! This crate fetches one web article by URL, extracts its metadata (title,
//! authors, publish date, body text, summary), tolerates transient fetch
//! failures with a fixed-delay retry, and normalizes the outcome into a flat
//! record suitable for CSV persistence.
//!
//! # Example
//!
//! ```no_run
//! use noticia::{Client, ExtractionResult, Pipeline};
//!
//! #[tokio::main]
//! async fn main() {
//!     let pipeline = Pipeline::new(Client::builder().build());
//!     match pipeline.extract("https://example.com/articulo").await {
//!         ExtractionResult::Success(record) => println!("{}", record.title),
//!         ExtractionResult::Failure(failure) => eprintln!("{}", failure.error),
//!     }
//! }
//! ```

pub mod article;
pub mod client;
pub mod error;
pub mod metadata;
pub mod pipeline;
pub mod report;
pub mod resource;

pub use crate::article::{ArticleSource, PublishDate, RawArticle};
pub use crate::client::{Client, ClientBuilder, Options};
pub use crate::error::{ErrorCode, ExtractError};
pub use crate::pipeline::{
    ArticleRecord, ExtractionResult, FailureRecord, Pipeline, NOT_AVAILABLE,
};
pub use crate::report::{csv_file_name, write_csv, StoreError};
