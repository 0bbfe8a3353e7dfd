// ABOUTME: The extraction pipeline: bounded retry around an ArticleSource plus field normalization.
// ABOUTME: Always yields an ExtractionResult (Success or Failure), never an error.

use std::time::Duration;

use serde::Serialize;

use crate::article::{ArticleSource, PublishDate, RawArticle};

/// Sentinel substituted for any field the source document does not provide.
pub const NOT_AVAILABLE: &str = "No disponible";

/// Fixed rendering pattern for recognized publish timestamps.
const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Default number of fetch attempts per request.
const DEFAULT_MAX_RETRIES: u32 = 3;

/// Default pause between consecutive attempts. Fixed, not exponential.
const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(2);

/// A fully normalized article, ready for rendering or persistence.
///
/// Every field is a flat string; absent data has already been replaced by
/// the [`NOT_AVAILABLE`] sentinel. Serialization uses the presentation keys
/// the report format expects.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArticleRecord {
    #[serde(rename = "URL")]
    pub url: String,
    #[serde(rename = "Título")]
    pub title: String,
    #[serde(rename = "Autor")]
    pub author: String,
    #[serde(rename = "Fecha")]
    pub published_at: String,
    #[serde(rename = "Contenido")]
    pub body: String,
    #[serde(rename = "Resumen")]
    pub summary: String,
}

/// A failed extraction, with enough detail to diagnose the failure class.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FailureRecord {
    #[serde(rename = "URL")]
    pub url: String,
    #[serde(rename = "Error")]
    pub error: String,
}

/// The outcome of one extraction request. Exactly one variant per request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ExtractionResult {
    Success(ArticleRecord),
    Failure(FailureRecord),
}

impl ExtractionResult {
    /// Returns true if this is the Success variant.
    pub fn is_success(&self) -> bool {
        matches!(self, ExtractionResult::Success(_))
    }

    /// The URL this result was produced for.
    pub fn url(&self) -> &str {
        match self {
            ExtractionResult::Success(r) => &r.url,
            ExtractionResult::Failure(r) => &r.url,
        }
    }
}

impl ArticleRecord {
    /// Normalize a [`RawArticle`] into the uniform output shape.
    ///
    /// Title, body and summary pass through unchanged; authors are joined
    /// with `", "` in source order; the publish date renders with
    /// [`DATE_FORMAT`] when it is a calendar timestamp and verbatim when it
    /// is not. Absent authors or date become the sentinel.
    pub fn from_raw(url: &str, raw: RawArticle) -> Self {
        let author = if raw.authors.is_empty() {
            NOT_AVAILABLE.to_string()
        } else {
            raw.authors.join(", ")
        };

        let published_at = match raw.published {
            Some(PublishDate::Timestamp(dt)) => dt.format(DATE_FORMAT).to_string(),
            Some(PublishDate::Raw(s)) => s,
            None => NOT_AVAILABLE.to_string(),
        };

        Self {
            url: url.to_string(),
            title: raw.title,
            author,
            published_at,
            body: raw.text,
            summary: raw.summary,
        }
    }
}

/// The extraction pipeline: drives an [`ArticleSource`] with bounded retry
/// and produces a uniform [`ExtractionResult`].
///
/// Transient fetch/parse failures are retried up to `max_retries` total
/// attempts with a fixed pause in between; any other fault fails
/// immediately. The pipeline holds no state between calls, so a single
/// instance may serve concurrent requests.
#[derive(Debug, Clone)]
pub struct Pipeline<S> {
    source: S,
    max_retries: u32,
    retry_delay: Duration,
}

impl<S: ArticleSource> Pipeline<S> {
    /// Create a pipeline with the default retry policy (3 attempts, 2 s pause).
    pub fn new(source: S) -> Self {
        Self {
            source,
            max_retries: DEFAULT_MAX_RETRIES,
            retry_delay: DEFAULT_RETRY_DELAY,
        }
    }

    /// Set the total number of fetch attempts per request.
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Set the pause between consecutive attempts.
    ///
    /// Tests substitute `Duration::ZERO` to avoid real delays.
    pub fn with_retry_delay(mut self, retry_delay: Duration) -> Self {
        self.retry_delay = retry_delay;
        self
    }

    /// Extract the article at `url`.
    ///
    /// Never returns an error: every outcome, including unexpected faults
    /// in the source, is captured as a Success or Failure record.
    pub async fn extract(&self, url: &str) -> ExtractionResult {
        for attempt in 1..=self.max_retries {
            match self.source.fetch_and_parse(url).await {
                Ok(raw) => {
                    tracing::debug!(url, attempt, "article extracted");
                    return ExtractionResult::Success(ArticleRecord::from_raw(url, raw));
                }
                Err(err) if err.is_transient() => {
                    if attempt < self.max_retries {
                        tracing::warn!(
                            url,
                            attempt,
                            max_retries = self.max_retries,
                            error = %err,
                            "fetch failed, retrying"
                        );
                        tokio::time::sleep(self.retry_delay).await;
                    } else {
                        return ExtractionResult::Failure(FailureRecord {
                            url: url.to_string(),
                            error: format!(
                                "No se pudo descargar o analizar la URL después de {} intentos: {}",
                                self.max_retries, err
                            ),
                        });
                    }
                }
                Err(err) => {
                    // Non-transient faults are assumed permanent; more
                    // attempts would not change the outcome.
                    return ExtractionResult::Failure(FailureRecord {
                        url: url.to_string(),
                        error: format!(
                            "Ocurrió un error inesperado en el intento {}: {}",
                            attempt, err
                        ),
                    });
                }
            }
        }

        // Only reachable when the loop body never runs (max_retries == 0).
        // The caller still gets a result.
        ExtractionResult::Failure(FailureRecord {
            url: url.to_string(),
            error: "La extracción falló por un motivo desconocido después de reintentos."
                .to_string(),
        })
    }
}
