// ABOUTME: RawArticle struct holding the fields the content extractor pulls from a page.
// ABOUTME: PublishDate keeps unparsable date values as raw text instead of discarding them.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::ExtractError;

/// A publish date as found in the source document.
///
/// Pages frequently carry date-like values that are not recognizable
/// calendar timestamps. Those are kept verbatim rather than dropped.
#[derive(Debug, Clone, PartialEq)]
pub enum PublishDate {
    /// A recognized calendar timestamp.
    Timestamp(DateTime<Utc>),
    /// A date-like value that could not be parsed; kept as-is.
    Raw(String),
}

/// The raw fields extracted from an article page, before normalization.
///
/// Any field may be empty or absent; the pipeline is responsible for
/// substituting sentinels and flattening the record.
#[derive(Debug, Clone, Default)]
pub struct RawArticle {
    pub title: String,
    /// Author names in source order.
    pub authors: Vec<String>,
    pub published: Option<PublishDate>,
    /// Main body text, paragraphs separated by blank lines.
    pub text: String,
    /// Derived summary of the body.
    pub summary: String,
}

/// The content-extractor capability the pipeline consumes.
///
/// Each call is independent; implementations hold no state between calls
/// and must be safe to invoke repeatedly with the same URL.
#[async_trait]
pub trait ArticleSource: Send + Sync {
    /// Download and parse the page at `url` into its raw article fields.
    async fn fetch_and_parse(&self, url: &str) -> Result<RawArticle, ExtractError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn default_is_fully_absent() {
        let raw = RawArticle::default();
        assert!(raw.title.is_empty());
        assert!(raw.authors.is_empty());
        assert!(raw.published.is_none());
        assert!(raw.text.is_empty());
        assert!(raw.summary.is_empty());
    }

    #[test]
    fn publish_date_variants_compare() {
        let ts = Utc.with_ymd_and_hms(2025, 11, 10, 10, 30, 0).unwrap();
        assert_eq!(
            PublishDate::Timestamp(ts),
            PublishDate::Timestamp(ts)
        );
        assert_ne!(
            PublishDate::Raw("ayer".to_string()),
            PublishDate::Timestamp(ts)
        );
    }
}
