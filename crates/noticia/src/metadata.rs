// ABOUTME: Field extraction from parsed article pages: title, authors, publish date, body, summary.
// ABOUTME: Selectors are tried in priority order; the first non-empty match wins.

use chrono::{DateTime, Utc};
use scraper::{Html, Selector};

use crate::article::PublishDate;

/// Generic title selectors in priority order.
const TITLE_SELECTORS: &[&str] = &[
    "title",
    "meta[property='og:title']",
    "meta[name='title']",
    "h1",
    "h2",
];

/// Generic author selectors in priority order.
const AUTHOR_SELECTORS: &[&str] = &[
    "meta[name='author']",
    "meta[property='article:author']",
    "[rel='author']",
    "[itemprop='author']",
    ".byline",
    ".author",
];

/// Generic date selectors for meta tags (content attribute).
const DATE_META_SELECTORS: &[&str] = &[
    "meta[property='article:published_time']",
    "meta[name='date']",
];

/// Body scopes tried in priority order; paragraphs are gathered inside the
/// first scope that yields any.
const BODY_SCOPES: &[&str] = &["article", "main", "body"];

/// Summary meta selectors in priority order.
const SUMMARY_META_SELECTORS: &[&str] = &[
    "meta[property='og:description']",
    "meta[name='description']",
];

/// Normalizes whitespace by collapsing runs into single spaces.
fn normalize_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Extracts the `content` attribute from the first matching meta tag.
pub fn extract_meta_content(doc: &Html, selector: &str) -> Option<String> {
    let sel = Selector::parse(selector).ok()?;
    for el in doc.select(&sel) {
        if let Some(content) = el.value().attr("content") {
            let trimmed = content.trim();
            if !trimmed.is_empty() {
                return Some(trimmed.to_string());
            }
        }
    }
    None
}

/// Extracts an attribute value from the first matching element.
pub fn extract_attr_first(doc: &Html, selector: &str, attr: &str) -> Option<String> {
    let sel = Selector::parse(selector).ok()?;
    for el in doc.select(&sel) {
        if let Some(value) = el.value().attr(attr) {
            let trimmed = value.trim();
            if !trimmed.is_empty() {
                return Some(trimmed.to_string());
            }
        }
    }
    None
}

/// Extracts text from the first selector that yields a non-empty match.
///
/// Meta selectors read the `content` attribute; everything else reads
/// normalized inner text.
pub fn extract_first_text(doc: &Html, selectors: &[&str]) -> Option<String> {
    for &sel_str in selectors {
        if sel_str.starts_with("meta[") {
            if let Some(value) = extract_meta_content(doc, sel_str) {
                return Some(value);
            }
            continue;
        }

        let sel = match Selector::parse(sel_str) {
            Ok(s) => s,
            Err(_) => continue,
        };

        for el in doc.select(&sel) {
            let text: String = el.text().collect::<Vec<_>>().join(" ");
            let normalized = normalize_whitespace(&text);
            if !normalized.is_empty() {
                return Some(normalized);
            }
        }
    }
    None
}

/// Extract the page title.
pub fn extract_title(doc: &Html) -> String {
    extract_first_text(doc, TITLE_SELECTORS).unwrap_or_default()
}

/// Extract author names in source order.
///
/// The first selector that yields anything wins, but all of its matches are
/// collected so pages with repeated `meta[name=author]` tags keep every
/// author. Candidate strings are then split on common multi-author
/// separators and deduplicated preserving order.
pub fn extract_authors(doc: &Html) -> Vec<String> {
    for &sel_str in AUTHOR_SELECTORS {
        let candidates = collect_all_text(doc, sel_str);
        if candidates.is_empty() {
            continue;
        }

        let mut authors = Vec::new();
        for candidate in candidates {
            for name in split_author_names(&candidate) {
                if !authors.contains(&name) {
                    authors.push(name);
                }
            }
        }
        if !authors.is_empty() {
            return authors;
        }
    }
    Vec::new()
}

/// Collect every non-empty match for a selector, meta-aware.
fn collect_all_text(doc: &Html, sel_str: &str) -> Vec<String> {
    let sel = match Selector::parse(sel_str) {
        Ok(s) => s,
        Err(_) => return Vec::new(),
    };

    let mut out = Vec::new();
    for el in doc.select(&sel) {
        let value = if sel_str.starts_with("meta[") {
            el.value().attr("content").unwrap_or("").to_string()
        } else {
            el.text().collect::<Vec<_>>().join(" ")
        };
        let normalized = normalize_whitespace(&value);
        if !normalized.is_empty() {
            out.push(normalized);
        }
    }
    out
}

/// Split a byline-style string into individual author names.
fn split_author_names(s: &str) -> Vec<String> {
    let stripped = s
        .trim()
        .trim_start_matches("By ")
        .trim_start_matches("by ")
        .trim_start_matches("Por ")
        .trim_start_matches("por ");

    stripped
        .split(|c| c == ',' || c == ';')
        .flat_map(|part| part.split(" and "))
        .flat_map(|part| part.split(" y "))
        .map(|part| normalize_whitespace(part))
        .filter(|part| !part.is_empty())
        .collect()
}

/// Parse a date string, trying RFC3339 first then falling back to dateparser.
pub fn parse_date(s: &str) -> Option<DateTime<Utc>> {
    // Fast path: RFC3339/ISO8601
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    // Common date-only and date-time patterns without timezone, anchored to
    // UTC midnight to avoid local timezone shifts.
    const LOOSE_PATTERNS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y", "%b %e, %Y", "%e %B %Y"];
    for pat in LOOSE_PATTERNS {
        if let Ok(date) = chrono::NaiveDate::parse_from_str(s.trim(), pat) {
            let naive_dt = date.and_hms_opt(0, 0, 0)?;
            return Some(DateTime::<Utc>::from_naive_utc_and_offset(naive_dt, Utc));
        }
    }
    if let Ok(naive_dt) = chrono::NaiveDateTime::parse_from_str(s.trim(), "%Y-%m-%d %H:%M:%S") {
        return Some(DateTime::<Utc>::from_naive_utc_and_offset(naive_dt, Utc));
    }

    // Fall back to dateparser for natural/loose formats
    if let Ok(dt) = dateparser::parse(s) {
        return Some(dt.with_timezone(&Utc));
    }

    None
}

/// Extract the publish date.
///
/// A date-like value that cannot be parsed as a calendar timestamp is kept
/// verbatim as `PublishDate::Raw` rather than discarded.
pub fn extract_publish_date(doc: &Html) -> Option<PublishDate> {
    let mut raw_value: Option<String> = None;

    for sel in DATE_META_SELECTORS {
        if let Some(content) = extract_meta_content(doc, sel) {
            if let Some(dt) = parse_date(&content) {
                return Some(PublishDate::Timestamp(dt));
            }
            raw_value.get_or_insert(content);
        }
    }

    if let Some(dt_str) = extract_attr_first(doc, "time[datetime]", "datetime") {
        if let Some(dt) = parse_date(&dt_str) {
            return Some(PublishDate::Timestamp(dt));
        }
        raw_value.get_or_insert(dt_str);
    }

    if let Some(time_text) = extract_first_text(doc, &["time"]) {
        if let Some(dt) = parse_date(&time_text) {
            return Some(PublishDate::Timestamp(dt));
        }
        raw_value.get_or_insert(time_text);
    }

    raw_value.map(PublishDate::Raw)
}

/// Extract the main body text as paragraphs joined with blank lines.
pub fn extract_body_text(doc: &Html) -> String {
    for &scope in BODY_SCOPES {
        let sel_str = format!("{} p", scope);
        let sel = match Selector::parse(&sel_str) {
            Ok(s) => s,
            Err(_) => continue,
        };

        let paragraphs: Vec<String> = doc
            .select(&sel)
            .map(|el| normalize_whitespace(&el.text().collect::<Vec<_>>().join(" ")))
            .filter(|p| !p.is_empty())
            .collect();

        if !paragraphs.is_empty() {
            return paragraphs.join("\n\n");
        }
    }
    String::new()
}

/// Derive a summary: page description if present, else the leading sentences
/// of the body text.
pub fn extract_summary(doc: &Html, body: &str) -> String {
    if let Some(description) = extract_first_text(doc, SUMMARY_META_SELECTORS) {
        return description;
    }
    first_sentences(body, 3)
}

/// Take up to `n` leading sentences from a text.
fn first_sentences(text: &str, n: usize) -> String {
    let flat = normalize_whitespace(text);
    if flat.is_empty() {
        return String::new();
    }

    let mut count = 0;
    let mut end = flat.len();
    let mut chars = flat.char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        if matches!(c, '.' | '!' | '?') {
            let at_boundary = chars
                .peek()
                .map_or(true, |&(_, next)| next.is_whitespace());
            if at_boundary {
                count += 1;
                if count == n {
                    end = i + c.len_utf8();
                    break;
                }
            }
        }
    }
    flat[..end].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    const SAMPLE_HTML: &str = r#"
        <!DOCTYPE html>
        <html>
        <head>
            <title>El riesgo país perfora los 600 puntos</title>
            <meta name="author" content="A. Smith">
            <meta name="author" content="B. Lee">
            <meta property="article:published_time" content="2025-11-10T10:30:00Z">
            <meta property="og:description" content="Un resumen breve.">
        </head>
        <body>
            <article>
                <p>Primer párrafo del artículo.</p>
                <p>Segundo párrafo con más detalle.</p>
            </article>
        </body>
        </html>
    "#;

    fn parse(html: &str) -> Html {
        Html::parse_document(html)
    }

    #[test]
    fn title_prefers_title_tag() {
        let doc = parse(SAMPLE_HTML);
        assert_eq!(extract_title(&doc), "El riesgo país perfora los 600 puntos");
    }

    #[test]
    fn title_falls_back_to_h1() {
        let doc = parse("<html><body><h1>Solo un H1</h1></body></html>");
        assert_eq!(extract_title(&doc), "Solo un H1");
    }

    #[test]
    fn authors_collects_all_meta_tags_in_order() {
        let doc = parse(SAMPLE_HTML);
        assert_eq!(extract_authors(&doc), vec!["A. Smith", "B. Lee"]);
    }

    #[test]
    fn authors_splits_byline() {
        let doc = parse(
            "<html><body><span class=\"byline\">By Mariana La Analista and J. T. Smith</span></body></html>",
        );
        assert_eq!(
            extract_authors(&doc),
            vec!["Mariana La Analista", "J. T. Smith"]
        );
    }

    #[test]
    fn authors_dedupes_preserving_order() {
        let doc = parse(
            r#"<html><head>
                <meta name="author" content="A. Smith">
                <meta name="author" content="A. Smith">
            </head></html>"#,
        );
        assert_eq!(extract_authors(&doc), vec!["A. Smith"]);
    }

    #[test]
    fn authors_empty_when_absent() {
        let doc = parse("<html><body><p>sin firma</p></body></html>");
        assert!(extract_authors(&doc).is_empty());
    }

    #[test]
    fn publish_date_parses_meta_timestamp() {
        let doc = parse(SAMPLE_HTML);
        let expected = Utc.with_ymd_and_hms(2025, 11, 10, 10, 30, 0).unwrap();
        assert_eq!(
            extract_publish_date(&doc),
            Some(PublishDate::Timestamp(expected))
        );
    }

    #[test]
    fn publish_date_keeps_unparsable_value_raw() {
        let doc = parse(
            r#"<html><head><meta name="date" content="hace dos días"></head></html>"#,
        );
        assert_eq!(
            extract_publish_date(&doc),
            Some(PublishDate::Raw("hace dos días".to_string()))
        );
    }

    #[test]
    fn publish_date_absent() {
        let doc = parse("<html><body><p>sin fecha</p></body></html>");
        assert_eq!(extract_publish_date(&doc), None);
    }

    #[test]
    fn publish_date_from_time_element() {
        let doc = parse(
            r#"<html><body><time datetime="2023-12-01T12:00:00Z">1 de diciembre</time></body></html>"#,
        );
        let expected = Utc.with_ymd_and_hms(2023, 12, 1, 12, 0, 0).unwrap();
        assert_eq!(
            extract_publish_date(&doc),
            Some(PublishDate::Timestamp(expected))
        );
    }

    #[test]
    fn body_joins_article_paragraphs() {
        let doc = parse(SAMPLE_HTML);
        assert_eq!(
            extract_body_text(&doc),
            "Primer párrafo del artículo.\n\nSegundo párrafo con más detalle."
        );
    }

    #[test]
    fn body_falls_back_to_body_paragraphs() {
        let doc = parse("<html><body><p>Suelto.</p></body></html>");
        assert_eq!(extract_body_text(&doc), "Suelto.");
    }

    #[test]
    fn body_empty_without_paragraphs() {
        let doc = parse("<html><body><div>solo un div</div></body></html>");
        assert_eq!(extract_body_text(&doc), "");
    }

    #[test]
    fn summary_prefers_description() {
        let doc = parse(SAMPLE_HTML);
        assert_eq!(extract_summary(&doc, "cuerpo"), "Un resumen breve.");
    }

    #[test]
    fn summary_falls_back_to_leading_sentences() {
        let doc = parse("<html><body></body></html>");
        let body = "Una. Dos. Tres. Cuatro. Cinco.";
        assert_eq!(extract_summary(&doc, body), "Una. Dos. Tres.");
    }

    #[test]
    fn first_sentences_handles_short_text() {
        assert_eq!(first_sentences("Sin punto final", 3), "Sin punto final");
        assert_eq!(first_sentences("", 3), "");
    }

    #[test]
    fn parse_date_rfc3339() {
        let dt = parse_date("2025-11-10T10:30:00Z").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2025, 11, 10, 10, 30, 0).unwrap());
    }

    #[test]
    fn parse_date_loose_date_only() {
        let dt = parse_date("2024-06-15").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2024, 6, 15, 0, 0, 0).unwrap());
    }

    #[test]
    fn parse_date_rejects_garbage() {
        assert!(parse_date("hace dos días").is_none());
    }
}
