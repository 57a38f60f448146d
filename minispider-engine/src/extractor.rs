use crate::error::{Result, ScanError};
use scraper::{Html, Selector};
use std::sync::LazyLock;
use tracing::debug;
use url::Url;

/// Finds outgoing links in a fetched page.
///
/// Links come back absolute and in document order. Duplicates within a page
/// are kept; the crawler's visited set is the only dedup point.
pub trait LinkExtractor: Send + Sync {
    fn extract(&self, body: &[u8], base: &Url) -> Result<Vec<Url>>;
}

static LINK_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a[href]").expect("static selector"));

#[derive(Debug, Default, Clone, Copy)]
pub struct HtmlLinkExtractor;

impl HtmlLinkExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl LinkExtractor for HtmlLinkExtractor {
    fn extract(&self, body: &[u8], base: &Url) -> Result<Vec<Url>> {
        if base.cannot_be_a_base() {
            return Err(ScanError::ParseError(format!(
                "{} cannot resolve relative links",
                base
            )));
        }

        let html = String::from_utf8_lossy(body);
        let document = Html::parse_document(&html);

        let links: Vec<Url> = document
            .select(&LINK_SELECTOR)
            .filter_map(|element| element.value().attr("href"))
            .filter_map(|href| resolve_link(base, href))
            .collect();

        debug!("Found {} links on {}", links.len(), base);
        Ok(links)
    }
}

fn resolve_link(base: &Url, href: &str) -> Option<Url> {
    let href = href.trim();
    // Skip empty, in-page anchors and non-navigational schemes
    if href.is_empty()
        || href.starts_with('#')
        || href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
    {
        return None;
    }

    let resolved = base.join(href).ok()?;
    matches!(resolved.scheme(), "http" | "https").then_some(resolved)
}
