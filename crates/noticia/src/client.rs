// ABOUTME: The HTTP-backed content extractor implementing the ArticleSource contract.
// ABOUTME: Fetches a page, parses it with scraper, and assembles a RawArticle from its fields.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use scraper::Html;

use crate::article::{ArticleSource, RawArticle};
use crate::error::ExtractError;
use crate::metadata;
use crate::resource::{fetch, FetchOptions};

/// Configuration options for the extraction client.
#[derive(Debug, Clone)]
pub struct Options {
    pub timeout: Duration,
    pub user_agent: String,
    pub headers: HashMap<String, String>,
    pub http_client: Option<reqwest::Client>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            user_agent: "Noticia/0.1".to_string(),
            headers: HashMap::new(),
            http_client: None,
        }
    }
}

/// Builder for constructing Client instances with custom configuration.
#[derive(Debug, Clone, Default)]
pub struct ClientBuilder {
    opts: Options,
}

impl ClientBuilder {
    /// Create a new ClientBuilder with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.opts.timeout = timeout;
        self
    }

    /// Set the User-Agent header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.opts.user_agent = user_agent.into();
        self
    }

    /// Add a custom header to all requests.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.opts.headers.insert(key.into(), value.into());
        self
    }

    /// Use a custom HTTP client.
    pub fn http_client(mut self, client: reqwest::Client) -> Self {
        self.opts.http_client = Some(client);
        self
    }

    /// Build the Client with the configured options.
    pub fn build(self) -> Client {
        Client::new(self.opts)
    }
}

/// The content extractor: downloads an article page and pulls out its
/// title, authors, publish date, body text, and summary.
#[derive(Debug, Clone)]
pub struct Client {
    opts: Options,
    http_client: reqwest::Client,
}

impl Client {
    /// Create a new ClientBuilder for configuring the client.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Create a new Client with the given options.
    pub fn new(opts: Options) -> Self {
        let http_client = opts.http_client.clone().unwrap_or_else(|| {
            reqwest::Client::builder()
                .user_agent(&opts.user_agent)
                .timeout(opts.timeout)
                .cookie_store(true)
                .gzip(true)
                .brotli(true)
                .deflate(true)
                .build()
                .expect("failed to build HTTP client")
        });

        Self { opts, http_client }
    }
}

/// Returns true if a Content-Type header names something we can parse.
fn is_parseable_content_type(content_type: &str) -> bool {
    let ct = content_type.split(';').next().unwrap_or("").trim();
    ct.is_empty()
        || ct.starts_with("text/")
        || ct == "application/xhtml+xml"
        || ct == "application/xml"
}

#[async_trait]
impl ArticleSource for Client {
    async fn fetch_and_parse(&self, url: &str) -> Result<RawArticle, ExtractError> {
        let fetch_opts = FetchOptions {
            headers: self.opts.headers.clone(),
        };

        let fetch_result = fetch(&self.http_client, url, &fetch_opts).await?;

        if let Some(ref ct) = fetch_result.content_type {
            if !is_parseable_content_type(ct) {
                return Err(ExtractError::extract(
                    url,
                    "Parse",
                    Some(anyhow::anyhow!("unparsable content type: {}", ct)),
                ));
            }
        }

        let raw_html = fetch_result.text_utf8();
        let doc = Html::parse_document(&raw_html);

        let title = metadata::extract_title(&doc);
        let authors = metadata::extract_authors(&doc);
        let published = metadata::extract_publish_date(&doc);
        let text = metadata::extract_body_text(&doc);
        let summary = metadata::extract_summary(&doc, &text);

        tracing::debug!(
            url,
            title = %title,
            authors = authors.len(),
            has_date = published.is_some(),
            body_len = text.len(),
            "article parsed"
        );

        Ok(RawArticle {
            title,
            authors,
            published,
            text,
            summary,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_sets_options() {
        let client = Client::builder()
            .timeout(Duration::from_secs(5))
            .user_agent("prueba/1.0")
            .header("x-test", "1")
            .build();

        assert_eq!(client.opts.timeout, Duration::from_secs(5));
        assert_eq!(client.opts.user_agent, "prueba/1.0");
        assert_eq!(client.opts.headers.get("x-test").unwrap(), "1");
    }

    #[test]
    fn parseable_content_types() {
        assert!(is_parseable_content_type("text/html; charset=utf-8"));
        assert!(is_parseable_content_type("application/xhtml+xml"));
        assert!(is_parseable_content_type(""));
        assert!(!is_parseable_content_type("image/jpeg"));
        assert!(!is_parseable_content_type("application/pdf"));
    }
}
